use axum::{extract::Extension, response::Json};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::TenantPool;
use crate::services::relatorios;

/// GET /api/membros - Member headcount for the dashboard card
pub async fn quantidade(
    Extension(TenantPool(pool)): Extension<TenantPool>,
) -> Result<Json<Value>, ApiError> {
    let quantidade = relatorios::contar_membros(&pool).await?;
    Ok(Json(json!({ "quantidade": quantidade })))
}

/// GET /api/memberList - Members for the tithe member dropdown
pub async fn listar(
    Extension(TenantPool(pool)): Extension<TenantPool>,
) -> Result<Json<Value>, ApiError> {
    let membros = relatorios::listar_membros(&pool).await?;
    Ok(Json(json!({ "membros": membros })))
}
