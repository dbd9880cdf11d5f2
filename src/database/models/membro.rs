use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Membro {
    pub id: i32,
    pub nome: String,
    pub status: String,
}

/// Projection used by the member dropdown (`GET /api/memberList`).
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MembroResumo {
    pub id: i32,
    pub nome: String,
}
