use axum::{extract::Query, http::StatusCode, response::Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::services::resolver::{self, ResolveError};

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    #[serde(rename = "codigoVerificacao")]
    pub codigo_verificacao: Option<String>,
}

/// GET /api/protectStatus - Status probe the UI shell runs on page load
pub async fn protect_status(
    Query(query): Query<StatusQuery>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let codigo = query.codigo_verificacao.unwrap_or_default();

    match resolver::resolver(&codigo).await {
        Ok(cliente) => Ok((
            StatusCode::OK,
            Json(json!({
                "message": "Cliente autenticado com sucesso!",
                "status": normalizar_status(&cliente.status),
            })),
        )),
        Err(ResolveError::CodigoVazio) => Err(ApiError::bad_request(
            "Código de verificação não fornecido ou inválido.",
        )),
        Err(ResolveError::NaoEncontrado) => Err(ApiError::not_found(
            "Cliente não encontrado no banco administrativo.",
        )),
        Err(ResolveError::Inativo { status }) => Err(ApiError::forbidden(format!(
            "O cliente está inativo. Acesso bloqueado. Status do cliente: {}",
            normalizar_status(&status)
        ))),
        Err(e) => Err(e.into()),
    }
}

/// The probe reports the status lowercased; an empty status reads as
/// undefined.
fn normalizar_status(status: &str) -> String {
    let status = status.trim().to_lowercase();
    if status.is_empty() {
        "não definido".to_string()
    } else {
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_e_normalizado_para_minusculas() {
        assert_eq!(normalizar_status("  Ativo "), "ativo");
        assert_eq!(normalizar_status("BLOQUEADO"), "bloqueado");
        assert_eq!(normalizar_status("   "), "não definido");
    }
}
