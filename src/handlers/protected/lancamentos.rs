use axum::{extract::Extension, http::StatusCode, response::Json};
use chrono::Utc;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::TenantPool;
use crate::services::lancamentos::{self, LancamentoPayload, SaidaFinanceiraPayload};

/// POST /api/entradasaida - Record an income or expense transaction
pub async fn registrar(
    Extension(TenantPool(pool)): Extension<TenantPool>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let payload: LancamentoPayload = serde_json::from_value(body)
        .map_err(|_| ApiError::bad_request("Dados faltando no corpo da requisição."))?;

    let lancamento = lancamentos::validar_lancamento(payload)?;
    lancamentos::registrar_lancamento(&pool, &lancamento).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Entrada/Saída registrada com sucesso!" })),
    ))
}

/// POST /api/financeirosaida - Record an expense together with its payable
pub async fn registrar_financeiro(
    Extension(TenantPool(pool)): Extension<TenantPool>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let payload: SaidaFinanceiraPayload = serde_json::from_value(body)
        .map_err(|_| ApiError::bad_request("Dados faltando no corpo da requisição."))?;

    let saida = lancamentos::validar_saida_financeira(payload)?;
    let hoje = Utc::now().date_naive();
    lancamentos::registrar_saida_financeira(&pool, &saida, hoje).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Saída registrada com sucesso." })),
    ))
}
