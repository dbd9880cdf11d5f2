use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Display status of a payable account. Wire values are the exact strings
/// the accounts screen filters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusConta {
    #[serde(rename = "Pago")]
    Pago,
    #[serde(rename = "Pendente")]
    Pendente,
    #[serde(rename = "Pago Parcial")]
    PagoParcial,
    #[serde(rename = "Vencida")]
    Vencida,
}

impl StatusConta {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusConta::Pago => "Pago",
            StatusConta::Pendente => "Pendente",
            StatusConta::PagoParcial => "Pago Parcial",
            StatusConta::Vencida => "Vencida",
        }
    }
}

impl std::fmt::Display for StatusConta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derives the display status of a payable from its amounts and due date.
///
/// Precedence, in order: full payment wins over everything (a settled
/// account never shows as overdue); a partial payment shows as overdue once
/// past due, partial while current; an unpaid account is overdue past due,
/// pending otherwise. `vencimento < hoje` is strict, so an account due today
/// is not yet overdue.
///
/// Pure function of its arguments. Both the insert path and the listing path
/// call this one function; the listing recomputes on every request because
/// "today" moves independently of writes, so the stored column is only a
/// snapshot.
pub fn classificar(
    valor: Decimal,
    valor_pago: Decimal,
    vencimento: NaiveDate,
    hoje: NaiveDate,
) -> StatusConta {
    let vencida = vencimento < hoje;

    if valor_pago == valor {
        StatusConta::Pago
    } else if valor_pago > Decimal::ZERO && valor_pago < valor {
        if vencida {
            StatusConta::Vencida
        } else {
            StatusConta::PagoParcial
        }
    } else if vencida {
        StatusConta::Vencida
    } else {
        StatusConta::Pendente
    }
}

/// Stored payable row. `status` is the snapshot written at insert time;
/// readers must reclassify before display.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ContaAPagar {
    pub id: i32,
    pub observacao: String,
    pub valor: Decimal,
    pub valor_pago: Decimal,
    pub status: String,
    pub data_vencimento: NaiveDate,
}
