use axum::{
    extract::{Extension, Query},
    response::Json,
};
use serde::Deserialize;
use sqlx::PgPool;

use crate::database::models::TipoTransacao;
use crate::error::ApiError;
use crate::middleware::TenantPool;
use crate::services::relatorios::{self, SerieDiaria};

#[derive(Debug, Deserialize)]
pub struct PeriodoQuery {
    #[serde(rename = "dataInicial")]
    pub data_inicial: Option<String>,
    #[serde(rename = "dataFinal")]
    pub data_final: Option<String>,
}

/// GET /api/entradasgrafico - Daily inflow series for the dashboard chart
pub async fn entradas(
    Query(query): Query<PeriodoQuery>,
    Extension(TenantPool(pool)): Extension<TenantPool>,
) -> Result<Json<SerieDiaria>, ApiError> {
    serie(query, &pool, TipoTransacao::Entrada).await
}

/// GET /api/saidasgrafico - Daily outflow series
pub async fn saidas(
    Query(query): Query<PeriodoQuery>,
    Extension(TenantPool(pool)): Extension<TenantPool>,
) -> Result<Json<SerieDiaria>, ApiError> {
    serie(query, &pool, TipoTransacao::Saida).await
}

async fn serie(
    query: PeriodoQuery,
    pool: &PgPool,
    tipo: TipoTransacao,
) -> Result<Json<SerieDiaria>, ApiError> {
    let (inicio, fim) =
        relatorios::validar_periodo(query.data_inicial.as_deref(), query.data_final.as_deref())?;
    let serie = relatorios::serie_diaria(pool, tipo, inicio, fim).await?;
    Ok(Json(serie))
}
