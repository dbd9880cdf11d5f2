use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Direction of a financial transaction. Wire values are the capitalized
/// Portuguese strings the entry form sends ("Entrada"/"Saida"); the report
/// endpoint uses the lowercase spelling instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TipoTransacao {
    Entrada,
    Saida,
}

impl TipoTransacao {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Entrada" => Some(TipoTransacao::Entrada),
            "Saida" => Some(TipoTransacao::Saida),
            _ => None,
        }
    }

    pub fn parse_relatorio(s: &str) -> Option<Self> {
        match s {
            "entrada" => Some(TipoTransacao::Entrada),
            "saida" => Some(TipoTransacao::Saida),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TipoTransacao::Entrada => "Entrada",
            TipoTransacao::Saida => "Saida",
        }
    }

    /// Table the direction persists into.
    pub fn tabela(&self) -> &'static str {
        match self {
            TipoTransacao::Entrada => "entrada",
            TipoTransacao::Saida => "saida",
        }
    }
}

/// Transaction category. The set differs per direction; `compativel_com`
/// is the authoritative pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoriaTransacao {
    Dizimo,
    Oferta,
    Doacao,
    Campanha,
    Pagamento,
    Salario,
    AjudaDeCusto,
}

impl CategoriaTransacao {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Dizimo" => Some(CategoriaTransacao::Dizimo),
            "Oferta" => Some(CategoriaTransacao::Oferta),
            "Doacao" => Some(CategoriaTransacao::Doacao),
            "Campanha" => Some(CategoriaTransacao::Campanha),
            "Pagamento" => Some(CategoriaTransacao::Pagamento),
            "Salario" => Some(CategoriaTransacao::Salario),
            "Ajuda de Custo" => Some(CategoriaTransacao::AjudaDeCusto),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoriaTransacao::Dizimo => "Dizimo",
            CategoriaTransacao::Oferta => "Oferta",
            CategoriaTransacao::Doacao => "Doacao",
            CategoriaTransacao::Campanha => "Campanha",
            CategoriaTransacao::Pagamento => "Pagamento",
            CategoriaTransacao::Salario => "Salario",
            CategoriaTransacao::AjudaDeCusto => "Ajuda de Custo",
        }
    }

    pub fn compativel_com(&self, tipo: TipoTransacao) -> bool {
        match self {
            CategoriaTransacao::Dizimo
            | CategoriaTransacao::Oferta
            | CategoriaTransacao::Doacao
            | CategoriaTransacao::Campanha => tipo == TipoTransacao::Entrada,
            CategoriaTransacao::Pagamento
            | CategoriaTransacao::Salario
            | CategoriaTransacao::AjudaDeCusto => tipo == TipoTransacao::Saida,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormaPagamento {
    Dinheiro,
    Pix,
    Debito,
    Credito,
}

impl FormaPagamento {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Dinheiro" => Some(FormaPagamento::Dinheiro),
            "PIX" => Some(FormaPagamento::Pix),
            "Debito" => Some(FormaPagamento::Debito),
            "Credito" => Some(FormaPagamento::Credito),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FormaPagamento::Dinheiro => "Dinheiro",
            FormaPagamento::Pix => "PIX",
            FormaPagamento::Debito => "Debito",
            FormaPagamento::Credito => "Credito",
        }
    }
}

/// Persisted inflow row.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Entrada {
    pub id: i32,
    pub observacao: String,
    pub tipo: String,
    pub forma_pagamento: String,
    pub valor: Decimal,
    pub data: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub membro_id: Option<i32>,
}

/// Persisted outflow row.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Saida {
    pub id: i32,
    pub observacao: String,
    pub tipo: String,
    pub forma_pagamento: String,
    pub valor: Decimal,
    pub data: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direcao_usa_grafia_do_formulario() {
        assert_eq!(TipoTransacao::parse("Entrada"), Some(TipoTransacao::Entrada));
        assert_eq!(TipoTransacao::parse("Saida"), Some(TipoTransacao::Saida));
        // lowercase is the report spelling, not the form spelling
        assert_eq!(TipoTransacao::parse("entrada"), None);
        assert_eq!(TipoTransacao::parse("Transferencia"), None);
    }

    #[test]
    fn relatorio_usa_grafia_minuscula() {
        assert_eq!(TipoTransacao::parse_relatorio("entrada"), Some(TipoTransacao::Entrada));
        assert_eq!(TipoTransacao::parse_relatorio("saida"), Some(TipoTransacao::Saida));
        assert_eq!(TipoTransacao::parse_relatorio("Entrada"), None);
    }

    #[test]
    fn categorias_pertencem_a_uma_unica_direcao() {
        let dizimo = CategoriaTransacao::parse("Dizimo").unwrap();
        assert!(dizimo.compativel_com(TipoTransacao::Entrada));
        assert!(!dizimo.compativel_com(TipoTransacao::Saida));

        let salario = CategoriaTransacao::parse("Salario").unwrap();
        assert!(salario.compativel_com(TipoTransacao::Saida));
        assert!(!salario.compativel_com(TipoTransacao::Entrada));

        let ajuda = CategoriaTransacao::parse("Ajuda de Custo").unwrap();
        assert_eq!(ajuda.as_str(), "Ajuda de Custo");
        assert!(ajuda.compativel_com(TipoTransacao::Saida));
    }

    #[test]
    fn forma_pagamento_reconhece_o_conjunto_fixo() {
        for forma in ["Dinheiro", "PIX", "Debito", "Credito"] {
            let parsed = FormaPagamento::parse(forma).unwrap();
            assert_eq!(parsed.as_str(), forma);
        }
        assert_eq!(FormaPagamento::parse("Cheque"), None);
        assert_eq!(FormaPagamento::parse("pix"), None);
    }
}
