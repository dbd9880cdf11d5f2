mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

// Validation contracts of the public endpoints. Every assertion here fires
// before any database access, so these pass with or without Postgres running.

#[tokio::test]
async fn validar_codigo_requires_a_code() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    for payload in [json!({}), json!({ "codigo_verificacao": "   " })] {
        let res = client
            .post(format!("{}/api/clientes", server.base_url))
            .json(&payload)
            .send()
            .await?;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "payload: {}", payload);
        let body = res.json::<serde_json::Value>().await?;
        assert_eq!(body["message"], "Código de verificação é necessário.");
        assert_eq!(body["error"], body["message"], "both keys carry the text: {}", body);
    }
    Ok(())
}

#[tokio::test]
async fn validar_codigo_rejects_non_object_body() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/clientes", server.base_url))
        .json(&json!("um texto solto"))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], "Código de verificação é necessário.");
    Ok(())
}

#[tokio::test]
async fn login_requires_every_field() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let incompletos = [
        json!({}),
        json!({ "email": "tesoureiro@igreja.org" }),
        json!({
            "email": "tesoureiro@igreja.org",
            "senha": "segredo",
            "nome_banco": "igreja_x"
            // codigo_verificacao missing
        }),
        json!({
            "email": "tesoureiro@igreja.org",
            "senha": "",
            "nome_banco": "igreja_x",
            "codigo_verificacao": "abc-123"
        }),
    ];

    for payload in incompletos {
        let res = client
            .post(format!("{}/api/auth", server.base_url))
            .json(&payload)
            .send()
            .await?;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "payload: {}", payload);
        let body = res.json::<serde_json::Value>().await?;
        assert_eq!(body["message"], "Todos os campos são obrigatórios.", "payload: {}", payload);
    }
    Ok(())
}

#[tokio::test]
async fn login_rejects_malformed_email() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/auth", server.base_url))
        .json(&json!({
            "email": "sem-arroba",
            "senha": "segredo",
            "nome_banco": "igreja_x",
            "codigo_verificacao": "abc-123"
        }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], "Email inválido.");
    Ok(())
}

#[tokio::test]
async fn login_rejects_wrong_method() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/auth", server.base_url))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    Ok(())
}

#[tokio::test]
async fn protect_status_requires_query_code() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    for url in [
        format!("{}/api/protectStatus", server.base_url),
        format!("{}/api/protectStatus?codigoVerificacao=", server.base_url),
        format!("{}/api/protectStatus?codigoVerificacao=%20%20", server.base_url),
    ] {
        let res = client.get(&url).send().await?;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "url: {}", url);
        let body = res.json::<serde_json::Value>().await?;
        assert_eq!(
            body["message"],
            "Código de verificação não fornecido ou inválido.",
            "url: {}",
            url
        );
    }
    Ok(())
}

#[tokio::test]
async fn contasapagar_requires_chave() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    for url in [
        format!("{}/api/contasapagar", server.base_url),
        format!("{}/api/contasapagar?chave=", server.base_url),
        format!("{}/api/contasapagar?status=Pago", server.base_url),
    ] {
        let res = client.get(&url).send().await?;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "url: {}", url);
        let body = res.json::<serde_json::Value>().await?;
        assert_eq!(body["message"], "Chave de verificação inválida.", "url: {}", url);
    }
    Ok(())
}
