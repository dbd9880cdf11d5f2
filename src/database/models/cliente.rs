use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Row of the administrative `clientes` registry. One per church/tenant;
/// created and mutated only by the provisioning CLI, read-only for the API.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Cliente {
    pub id: i32,
    pub codigo_verificacao: String,
    pub nome_banco: String,
    pub nome_igreja: String,
    pub status: String,
}
