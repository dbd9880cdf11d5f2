// HTTP API error types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request (missing/malformed input)
    BadRequest(String),

    // 401 Unauthorized (bad credentials)
    Unauthorized(String),

    // 403 Forbidden (tenant inactive/blocked)
    Forbidden(String),

    // 404 Not Found (unknown verification code or entity)
    NotFound(String),

    // 500 Internal Server Error (database/connection failure)
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::Internal(msg) => msg,
        }
    }

    /// Error body. Both keys carry the same text: the frontend reads
    /// `data.error` on some screens and `data.message` on others.
    pub fn to_json(&self) -> Value {
        json!({
            "error": self.message(),
            "message": self.message(),
        })
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }
}

impl From<crate::database::manager::DatabaseError> for ApiError {
    fn from(err: crate::database::manager::DatabaseError) -> Self {
        use crate::database::manager::DatabaseError;
        match err {
            DatabaseError::InvalidTenantName(name) => {
                // client-supplied names are rejected earlier by the resolver,
                // so reaching this means the admin registry itself is bad
                tracing::error!("invalid database name in registry: {}", name);
                ApiError::internal("Erro interno do servidor.")
            }
            DatabaseError::ConfigMissing(var) => {
                tracing::error!("missing configuration: {}", var);
                ApiError::internal("Erro interno do servidor.")
            }
            DatabaseError::InvalidDatabaseUrl => {
                tracing::error!("DATABASE_URL could not be parsed");
                ApiError::internal("Erro interno do servidor.")
            }
            DatabaseError::Sqlx(e) => {
                tracing::error!("database error: {}", e);
                ApiError::internal("Erro interno do servidor.")
            }
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("query error: {}", err);
        ApiError::internal("Erro interno do servidor.")
    }
}

/// Default mapping for the tenant-header surface. Public endpoints that speak
/// a different wording match on the variants themselves instead.
impl From<crate::services::resolver::ResolveError> for ApiError {
    fn from(err: crate::services::resolver::ResolveError) -> Self {
        use crate::services::resolver::ResolveError;
        match err {
            ResolveError::CodigoVazio => {
                ApiError::bad_request("Chave de verificação ou nome do banco não fornecidos.")
            }
            ResolveError::NaoEncontrado => ApiError::not_found("Chave inválida."),
            ResolveError::BancoDivergente => ApiError::bad_request("Nome do banco inválido."),
            ResolveError::Inativo { status } => ApiError::forbidden(format!(
                "O cliente está inativo. Acesso bloqueado. Status do cliente: {}",
                status
            )),
            ResolveError::Database(e) => e.into(),
            ResolveError::Sqlx(e) => e.into(),
        }
    }
}

impl From<crate::services::lancamentos::LancamentoError> for ApiError {
    fn from(err: crate::services::lancamentos::LancamentoError) -> Self {
        use crate::services::lancamentos::LancamentoError;
        match err {
            LancamentoError::Database(e) => e.into(),
            LancamentoError::Sqlx(e) => e.into(),
            other => ApiError::bad_request(other.to_string()),
        }
    }
}

impl From<crate::services::contas::ContasError> for ApiError {
    fn from(err: crate::services::contas::ContasError) -> Self {
        use crate::services::contas::ContasError;
        match err {
            ContasError::Database(e) => e.into(),
            ContasError::Sqlx(e) => e.into(),
        }
    }
}

impl From<crate::services::relatorios::RelatorioError> for ApiError {
    fn from(err: crate::services::relatorios::RelatorioError) -> Self {
        use crate::services::relatorios::RelatorioError;
        match err {
            RelatorioError::Database(e) => e.into(),
            RelatorioError::Sqlx(e) => e.into(),
            other => ApiError::bad_request(other.to_string()),
        }
    }
}

impl From<crate::auth::JwtError> for ApiError {
    fn from(err: crate::auth::JwtError) -> Self {
        tracing::error!("jwt error: {}", err);
        ApiError::internal("Erro interno do servidor.")
    }
}

impl From<bcrypt::BcryptError> for ApiError {
    fn from(err: bcrypt::BcryptError) -> Self {
        tracing::error!("bcrypt error: {}", err);
        ApiError::internal("Erro interno do servidor.")
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_taxonomy() {
        assert_eq!(ApiError::bad_request("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::unauthorized("x").status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::forbidden("x").status_code(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::not_found("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::internal("x").status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn body_mirrors_message_under_both_keys() {
        let body = ApiError::not_found("Cliente não encontrado.").to_json();
        assert_eq!(body["error"], "Cliente não encontrado.");
        assert_eq!(body["message"], "Cliente não encontrado.");
    }
}
