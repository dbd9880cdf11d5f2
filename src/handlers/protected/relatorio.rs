use axum::{
    extract::Extension,
    response::{IntoResponse, Json, Response},
};
use serde_json::Value;

use crate::database::models::TipoTransacao;
use crate::error::ApiError;
use crate::middleware::TenantPool;
use crate::services::relatorios::{self, RelatorioPayload};

/// POST /api/relatorio - Filtered transaction listing, raw array response
pub async fn gerar(
    Extension(TenantPool(pool)): Extension<TenantPool>,
    Json(body): Json<Value>,
) -> Result<Response, ApiError> {
    let payload: RelatorioPayload = serde_json::from_value(body)
        .map_err(|_| ApiError::bad_request("Tipo de relatório inválido."))?;
    let (tipo, filtro) = relatorios::validar_filtro(payload)?;

    let resposta = match tipo {
        TipoTransacao::Entrada => {
            Json(relatorios::relatorio_entradas(&pool, &filtro).await?).into_response()
        }
        TipoTransacao::Saida => {
            Json(relatorios::relatorio_saidas(&pool, &filtro).await?).into_response()
        }
    };

    Ok(resposta)
}
