use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;
use thiserror::Error;

use crate::database::manager::DatabaseError;
use crate::database::models::{classificar, ContaAPagar, StatusConta};

#[derive(Debug, Error)]
pub enum ContasError {
    #[error(transparent)]
    Database(#[from] DatabaseError),
    #[error("query error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// Payable as the listing returns it: the stored status replaced by the
/// one computed for today.
#[derive(Debug, Clone, Serialize)]
pub struct ContaClassificada {
    pub id: i32,
    pub observacao: String,
    pub valor: Decimal,
    pub valor_pago: Decimal,
    pub status: StatusConta,
    pub data_vencimento: NaiveDate,
}

/// Recomputes every status against `hoje`. The stored column is ignored on
/// read, so a bill that went overdue since it was written shows up as
/// overdue without any update pass.
pub fn reclassificar(contas: Vec<ContaAPagar>, hoje: NaiveDate) -> Vec<ContaClassificada> {
    contas
        .into_iter()
        .map(|conta| {
            let status = classificar(conta.valor, conta.valor_pago, conta.data_vencimento, hoje);
            ContaClassificada {
                id: conta.id,
                observacao: conta.observacao,
                valor: conta.valor,
                valor_pago: conta.valor_pago,
                status,
                data_vencimento: conta.data_vencimento,
            }
        })
        .collect()
}

/// Applies the optional status filter after reclassification. `Todos` and an
/// absent filter mean no filtering; a label no status renders to yields an
/// empty list rather than an error.
pub fn filtrar_por_status(
    contas: Vec<ContaClassificada>,
    filtro: Option<&str>,
) -> Vec<ContaClassificada> {
    let filtro = match filtro.map(str::trim) {
        None | Some("") | Some("Todos") => return contas,
        Some(f) => f,
    };
    contas
        .into_iter()
        .filter(|conta| conta.status.as_str() == filtro)
        .collect()
}

/// Lists payables ordered by due date, statuses recomputed for `hoje`.
pub async fn listar_contas(
    pool: &PgPool,
    filtro: Option<&str>,
    hoje: NaiveDate,
) -> Result<Vec<ContaClassificada>, ContasError> {
    let contas: Vec<ContaAPagar> = sqlx::query_as(
        "SELECT id, observacao, valor, valor_pago, status, data_vencimento \
         FROM contas_a_pagar ORDER BY data_vencimento ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(filtrar_por_status(reclassificar(contas, hoje), filtro))
}
