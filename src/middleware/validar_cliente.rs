use axum::{extract::Request, http::HeaderMap, middleware::Next, response::Response};
use sqlx::PgPool;

use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::services::resolver;

/// Tenant database pool, injected by middleware.
#[derive(Clone)]
pub struct TenantPool(pub PgPool);

/// Guards the tenant-scoped routes. Reads the two verification headers,
/// resolves and authorizes the account against the admin registry, then
/// injects the tenant pool for the handler.
///
/// The header-presence check runs before anything touches a database.
pub async fn validar_cliente_middleware(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let codigo = header_texto(&headers, "x-verificacao-chave");
    let nome_banco = header_texto(&headers, "x-nome-banco");

    let (codigo, nome_banco) = match (codigo, nome_banco) {
        (Some(c), Some(n)) => (c, n),
        _ => {
            return Err(ApiError::bad_request(
                "Chave de verificação ou nome do banco não fornecidos.",
            ))
        }
    };

    let cliente = resolver::resolver_e_autorizar(&codigo, &nome_banco).await?;
    let pool = DatabaseManager::tenant_pool(&cliente.nome_banco).await?;

    tracing::debug!(
        "tenant authorized: {} ({})",
        cliente.nome_igreja,
        cliente.nome_banco
    );

    request.extensions_mut().insert(TenantPool(pool));
    Ok(next.run(request).await)
}

fn header_texto(headers: &HeaderMap, nome: &str) -> Option<String> {
    headers
        .get(nome)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
