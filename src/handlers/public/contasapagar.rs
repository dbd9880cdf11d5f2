use axum::{extract::Query, http::StatusCode, response::Json};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::services::contas;
use crate::services::resolver::{self, ResolveError};

#[derive(Debug, Deserialize)]
pub struct ContasQuery {
    pub chave: Option<String>,
    pub status: Option<String>,
}

/// GET /api/contasapagar - Payables listing with status recomputed for today
pub async fn listar(
    Query(query): Query<ContasQuery>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let chave = query.chave.unwrap_or_default();

    let cliente = match resolver::resolver(&chave).await {
        Ok(cliente) => cliente,
        Err(ResolveError::CodigoVazio) => {
            return Err(ApiError::bad_request("Chave de verificação inválida."))
        }
        Err(ResolveError::NaoEncontrado) => {
            return Err(ApiError::not_found("Chave de verificação inválida."))
        }
        Err(e) => return Err(e.into()),
    };

    let pool = DatabaseManager::tenant_pool(&cliente.nome_banco).await?;
    let hoje = Utc::now().date_naive();
    let data = contas::listar_contas(&pool, query.status.as_deref(), hoje).await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Sucesso", "data": data })),
    ))
}
