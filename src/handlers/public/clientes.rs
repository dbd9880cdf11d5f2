use axum::{http::StatusCode, response::Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::services::resolver::{self, ResolveError};

#[derive(Debug, Default, Deserialize)]
pub struct ValidacaoPayload {
    pub codigo_verificacao: Option<String>,
}

/// POST /api/clientes - Validate a verification code and return the account
pub async fn validar_codigo(
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let payload: ValidacaoPayload = serde_json::from_value(body)
        .map_err(|_| ApiError::bad_request("Código de verificação é necessário."))?;
    let codigo = payload.codigo_verificacao.unwrap_or_default();

    let cliente = match resolver::resolver(&codigo).await {
        Ok(cliente) => cliente,
        Err(ResolveError::CodigoVazio) => {
            return Err(ApiError::bad_request("Código de verificação é necessário."))
        }
        Err(ResolveError::NaoEncontrado) => {
            return Err(ApiError::not_found("Cliente não encontrado."))
        }
        Err(ResolveError::Inativo { status }) => {
            return Err(ApiError::forbidden(format!(
                "Cliente está bloqueado. Entre em contato com o suporte. Status: {}",
                status
            )))
        }
        Err(e) => return Err(e.into()),
    };

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": "Cliente validado com sucesso!",
            "cliente": cliente,
        })),
    ))
}
