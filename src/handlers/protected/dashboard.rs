use axum::{extract::Extension, http::HeaderMap, response::Json};
use serde_json::{json, Value};
use sqlx::PgPool;

use crate::database::models::TipoTransacao;
use crate::error::ApiError;
use crate::middleware::TenantPool;
use crate::services::relatorios;

/// GET /api/entradas - Inflow total; month/year-scoped when both headers come
pub async fn total_entradas(
    headers: HeaderMap,
    Extension(TenantPool(pool)): Extension<TenantPool>,
) -> Result<Json<Value>, ApiError> {
    total(&headers, &pool, TipoTransacao::Entrada).await
}

/// GET /api/saidas - Outflow total, same filters
pub async fn total_saidas(
    headers: HeaderMap,
    Extension(TenantPool(pool)): Extension<TenantPool>,
) -> Result<Json<Value>, ApiError> {
    total(&headers, &pool, TipoTransacao::Saida).await
}

async fn total(
    headers: &HeaderMap,
    pool: &PgPool,
    tipo: TipoTransacao,
) -> Result<Json<Value>, ApiError> {
    // The dashboard cards send month and year together; anything less means
    // the all-time total. Unparseable values count as absent.
    let mes = header_i32(headers, "x-mes");
    let ano = header_i32(headers, "x-ano");
    let (mes, ano) = match (mes, ano) {
        (Some(m), Some(a)) => (Some(m), Some(a)),
        _ => (None, None),
    };

    let total = relatorios::total_transacoes(pool, tipo, mes, ano).await?;
    Ok(Json(json!({ "total": total })))
}

fn header_i32(headers: &HeaderMap, nome: &str) -> Option<i32> {
    headers
        .get(nome)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<i32>().ok())
}
