use axum::{
    extract::{Extension, Query},
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::models::Usuario;
use crate::error::ApiError;
use crate::middleware::TenantPool;

#[derive(Debug, Deserialize)]
pub struct PerfilQuery {
    pub email: Option<String>,
}

/// GET /api/usuarios - Profile card data for the logged-in user
pub async fn perfil(
    Query(query): Query<PerfilQuery>,
    Extension(TenantPool(pool)): Extension<TenantPool>,
) -> Result<Json<Value>, ApiError> {
    let email = query
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ApiError::bad_request("Email é obrigatório."))?;

    let usuario: Option<Usuario> =
        sqlx::query_as("SELECT id, email, nome, senha, cargo FROM usuarios WHERE email = $1")
            .bind(&email)
            .fetch_optional(&pool)
            .await?;

    let usuario = usuario.ok_or_else(|| ApiError::not_found("Usuário não encontrado"))?;

    Ok(Json(json!({ "nome": usuario.nome, "cargo": usuario.cargo })))
}
