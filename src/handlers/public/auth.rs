use axum::{http::StatusCode, response::Json};
use serde_json::{json, Value};

use crate::auth::{self, Claims, LoginPayload};
use crate::database::models::Usuario;
use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::services::resolver::{self, ResolveError};

/// POST /api/auth - Authenticate a tenant user and issue a JWT
///
/// The tenant is resolved and authorized before any credential touches the
/// tenant database, so login against a blocked account fails with 403 and
/// a forged `nome_banco` fails with 400.
pub async fn login(Json(body): Json<Value>) -> Result<(StatusCode, Json<Value>), ApiError> {
    let payload: LoginPayload = serde_json::from_value(body)
        .map_err(|_| ApiError::bad_request("Todos os campos são obrigatórios."))?;

    let credenciais = auth::validar_credenciais(&payload)
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let cliente = match resolver::resolver_e_autorizar(
        &credenciais.codigo_verificacao,
        &credenciais.nome_banco,
    )
    .await
    {
        Ok(cliente) => cliente,
        Err(ResolveError::CodigoVazio) => {
            return Err(ApiError::bad_request("Todos os campos são obrigatórios."))
        }
        Err(ResolveError::NaoEncontrado) => {
            return Err(ApiError::not_found("Cliente não encontrado."))
        }
        Err(ResolveError::BancoDivergente) => {
            return Err(ApiError::bad_request("Nome do banco inválido."))
        }
        Err(ResolveError::Inativo { status }) => {
            return Err(ApiError::forbidden(format!(
                "Cliente está bloqueado. Entre em contato com o suporte. Status: {}",
                status
            )))
        }
        Err(e) => return Err(e.into()),
    };

    let pool = DatabaseManager::tenant_pool(&cliente.nome_banco).await?;

    let usuario: Option<Usuario> =
        sqlx::query_as("SELECT id, email, nome, senha, cargo FROM usuarios WHERE email = $1")
            .bind(&credenciais.email)
            .fetch_optional(&pool)
            .await?;

    // Unknown email and wrong password answer identically.
    let usuario = usuario.ok_or_else(|| ApiError::unauthorized("Email ou senha inválidos."))?;

    let senha_confere = bcrypt::verify(&credenciais.senha, &usuario.senha)?;
    if !senha_confere {
        return Err(ApiError::unauthorized("Email ou senha inválidos."));
    }

    let claims = Claims::new(
        usuario.email.clone(),
        usuario.nome.clone(),
        cliente.nome_banco.clone(),
    );
    let token = auth::gerar_token(&claims)?;

    tracing::info!("user '{}' logged into '{}'", usuario.email, cliente.nome_banco);

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": "Login realizado com sucesso!",
            "token": token,
            "usuario": {
                "email": usuario.email,
                "nome": usuario.nome,
            },
        })),
    ))
}
