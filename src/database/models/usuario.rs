use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Tenant-side user account. `senha` holds the bcrypt hash and never leaves
/// the server.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Usuario {
    pub id: i32,
    pub email: String,
    pub nome: String,
    #[serde(skip_serializing)]
    pub senha: String,
    pub cargo: String,
}
