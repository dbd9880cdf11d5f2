use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, QueryBuilder};
use thiserror::Error;

use crate::database::manager::DatabaseError;
use crate::database::models::transacao::{Entrada, Saida};
use crate::database::models::{MembroResumo, TipoTransacao};

use super::lancamentos::parse_dia;

#[derive(Debug, Error)]
pub enum RelatorioError {
    #[error("Tipo de relatório inválido.")]
    TipoInvalido,
    #[error("Dados incompletos.")]
    PeriodoIncompleto,
    #[error("Datas inválidas.")]
    DataInvalida,
    #[error(transparent)]
    Database(#[from] DatabaseError),
    #[error("query error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// Report filters of `POST /api/relatorio`, field names as the report
/// screen sends them.
#[derive(Debug, Default, Deserialize)]
pub struct RelatorioPayload {
    #[serde(rename = "type")]
    pub tipo: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
}

/// Validated report filters. Each bound is independent; an absent category
/// or date simply drops that clause.
#[derive(Debug, Clone, PartialEq)]
pub struct FiltroRelatorio {
    pub categoria: Option<String>,
    pub inicio: Option<NaiveDate>,
    pub fim: Option<NaiveDate>,
}

/// Daily totals shaped for the dashboard chart: two parallel arrays, one
/// of dates and one of summed values.
#[derive(Debug, Serialize)]
pub struct SerieDiaria {
    pub categorias: Vec<NaiveDate>,
    pub valores: Vec<Decimal>,
}

pub fn validar_filtro(
    payload: RelatorioPayload,
) -> Result<(TipoTransacao, FiltroRelatorio), RelatorioError> {
    let tipo = payload
        .tipo
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .and_then(TipoTransacao::parse_relatorio)
        .ok_or(RelatorioError::TipoInvalido)?;

    let categoria = payload
        .category
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());

    let inicio = parse_data_opcional(payload.start_date.as_deref())?;
    let fim = parse_data_opcional(payload.end_date.as_deref())?;

    Ok((
        tipo,
        FiltroRelatorio {
            categoria,
            inicio,
            fim,
        },
    ))
}

/// Chart endpoints require both ends of the range.
pub fn validar_periodo(
    inicio: Option<&str>,
    fim: Option<&str>,
) -> Result<(NaiveDate, NaiveDate), RelatorioError> {
    let inicio = inicio.map(str::trim).filter(|s| !s.is_empty());
    let fim = fim.map(str::trim).filter(|s| !s.is_empty());
    let (inicio, fim) = match (inicio, fim) {
        (Some(i), Some(f)) => (i, f),
        _ => return Err(RelatorioError::PeriodoIncompleto),
    };
    let inicio = parse_dia(inicio).ok_or(RelatorioError::DataInvalida)?;
    let fim = parse_dia(fim).ok_or(RelatorioError::DataInvalida)?;
    Ok((inicio, fim))
}

/// Absent or blank report dates drop the bound; a present but unparseable
/// one is an error, not a silent full-range query.
fn parse_data_opcional(campo: Option<&str>) -> Result<Option<NaiveDate>, RelatorioError> {
    let campo = match campo.map(str::trim).filter(|s| !s.is_empty()) {
        Some(c) => c,
        None => return Ok(None),
    };
    parse_dia(campo)
        .map(Some)
        .ok_or(RelatorioError::DataInvalida)
}

pub async fn contar_membros(pool: &PgPool) -> Result<i64, RelatorioError> {
    let quantidade: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM membros")
        .fetch_one(pool)
        .await?;
    Ok(quantidade)
}

pub async fn listar_membros(pool: &PgPool) -> Result<Vec<MembroResumo>, RelatorioError> {
    let membros: Vec<MembroResumo> = sqlx::query_as("SELECT id, nome FROM membros")
        .fetch_all(pool)
        .await?;
    Ok(membros)
}

/// Sum of all transactions in one direction, optionally narrowed to a
/// month and/or year. An empty table sums to zero, not NULL.
pub async fn total_transacoes(
    pool: &PgPool,
    tipo: TipoTransacao,
    mes: Option<i32>,
    ano: Option<i32>,
) -> Result<Decimal, RelatorioError> {
    let mut query: QueryBuilder<'_, Postgres> = QueryBuilder::new(format!(
        "SELECT COALESCE(SUM(valor), 0) FROM {}",
        tipo.tabela()
    ));

    let mut prefixo = " WHERE ";
    if let Some(mes) = mes {
        query
            .push(prefixo)
            .push("EXTRACT(MONTH FROM data) = ")
            .push_bind(mes);
        prefixo = " AND ";
    }
    if let Some(ano) = ano {
        query
            .push(prefixo)
            .push("EXTRACT(YEAR FROM data) = ")
            .push_bind(ano);
    }

    let total: Decimal = query.build_query_scalar().fetch_one(pool).await?;
    Ok(total)
}

/// Per-day totals over an inclusive date range, grouped on the calendar
/// date of each transaction.
pub async fn serie_diaria(
    pool: &PgPool,
    tipo: TipoTransacao,
    inicio: NaiveDate,
    fim: NaiveDate,
) -> Result<SerieDiaria, RelatorioError> {
    let sql = format!(
        "SELECT data::date AS dia, SUM(valor) AS total FROM {} \
         WHERE data::date BETWEEN $1 AND $2 \
         GROUP BY data::date ORDER BY dia ASC",
        tipo.tabela()
    );
    let linhas: Vec<(NaiveDate, Decimal)> = sqlx::query_as(&sql)
        .bind(inicio)
        .bind(fim)
        .fetch_all(pool)
        .await?;

    let (categorias, valores) = linhas.into_iter().unzip();
    Ok(SerieDiaria { categorias, valores })
}

pub async fn relatorio_entradas(
    pool: &PgPool,
    filtro: &FiltroRelatorio,
) -> Result<Vec<Entrada>, RelatorioError> {
    let mut query: QueryBuilder<'_, Postgres> = QueryBuilder::new(
        "SELECT id, observacao, tipo, forma_pagamento, valor, data, membro_id FROM entrada",
    );
    aplicar_filtros(&mut query, filtro);
    query.push(" ORDER BY data ASC");
    Ok(query.build_query_as().fetch_all(pool).await?)
}

pub async fn relatorio_saidas(
    pool: &PgPool,
    filtro: &FiltroRelatorio,
) -> Result<Vec<Saida>, RelatorioError> {
    let mut query: QueryBuilder<'_, Postgres> = QueryBuilder::new(
        "SELECT id, observacao, tipo, forma_pagamento, valor, data FROM saida",
    );
    aplicar_filtros(&mut query, filtro);
    query.push(" ORDER BY data ASC");
    Ok(query.build_query_as().fetch_all(pool).await?)
}

fn aplicar_filtros(query: &mut QueryBuilder<'_, Postgres>, filtro: &FiltroRelatorio) {
    let mut prefixo = " WHERE ";
    if let Some(categoria) = &filtro.categoria {
        query
            .push(prefixo)
            .push("tipo = ")
            .push_bind(categoria.clone());
        prefixo = " AND ";
    }
    if let Some(inicio) = filtro.inicio {
        query
            .push(prefixo)
            .push("data::date >= ")
            .push_bind(inicio);
        prefixo = " AND ";
    }
    if let Some(fim) = filtro.fim {
        query.push(prefixo).push("data::date <= ").push_bind(fim);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tipo_do_relatorio_usa_grafia_minuscula() {
        let payload: RelatorioPayload =
            serde_json::from_value(json!({ "type": "entrada" })).unwrap();
        let (tipo, filtro) = validar_filtro(payload).unwrap();
        assert_eq!(tipo, TipoTransacao::Entrada);
        assert_eq!(
            filtro,
            FiltroRelatorio {
                categoria: None,
                inicio: None,
                fim: None
            }
        );

        for invalido in ["Entrada", "ENTRADA", "transferencia", ""] {
            let payload: RelatorioPayload =
                serde_json::from_value(json!({ "type": invalido })).unwrap();
            assert!(matches!(
                validar_filtro(payload),
                Err(RelatorioError::TipoInvalido)
            ));
        }

        let payload: RelatorioPayload = serde_json::from_value(json!({})).unwrap();
        assert!(matches!(
            validar_filtro(payload),
            Err(RelatorioError::TipoInvalido)
        ));
    }

    #[test]
    fn categoria_em_branco_nao_filtra() {
        let payload: RelatorioPayload =
            serde_json::from_value(json!({ "type": "saida", "category": "  " })).unwrap();
        let (_, filtro) = validar_filtro(payload).unwrap();
        assert_eq!(filtro.categoria, None);

        let payload: RelatorioPayload =
            serde_json::from_value(json!({ "type": "saida", "category": "Pagamento" })).unwrap();
        let (_, filtro) = validar_filtro(payload).unwrap();
        assert_eq!(filtro.categoria.as_deref(), Some("Pagamento"));
    }

    #[test]
    fn datas_do_relatorio_sao_independentes() {
        let payload: RelatorioPayload = serde_json::from_value(json!({
            "type": "entrada",
            "startDate": "2024-01-01"
        }))
        .unwrap();
        let (_, filtro) = validar_filtro(payload).unwrap();
        assert_eq!(filtro.inicio, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(filtro.fim, None);

        let payload: RelatorioPayload = serde_json::from_value(json!({
            "type": "entrada",
            "endDate": "não é data"
        }))
        .unwrap();
        assert!(matches!(
            validar_filtro(payload),
            Err(RelatorioError::DataInvalida)
        ));
    }

    #[test]
    fn grafico_exige_as_duas_datas() {
        assert!(matches!(
            validar_periodo(Some("2024-01-01"), None),
            Err(RelatorioError::PeriodoIncompleto)
        ));
        assert!(matches!(
            validar_periodo(None, Some("2024-01-31")),
            Err(RelatorioError::PeriodoIncompleto)
        ));
        assert!(matches!(
            validar_periodo(Some(""), Some("2024-01-31")),
            Err(RelatorioError::PeriodoIncompleto)
        ));
        assert!(matches!(
            validar_periodo(Some("ontem"), Some("2024-01-31")),
            Err(RelatorioError::DataInvalida)
        ));

        let (inicio, fim) =
            validar_periodo(Some("2024-01-01"), Some("2024-01-31")).unwrap();
        assert_eq!(inicio, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(fim, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
    }
}
