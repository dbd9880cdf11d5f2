use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use thiserror::Error;

use crate::database::manager::DatabaseError;
use crate::database::models::{CategoriaTransacao, FormaPagamento, TipoTransacao};

use super::resolver::status_ativo;

/// Wire messages double as the `Display` text: these are the exact strings
/// the entry forms show the user.
#[derive(Debug, Error)]
pub enum LancamentoError {
    #[error("Dados faltando no corpo da requisição.")]
    DadosFaltando,
    #[error("Tipo de transação inválido.")]
    TipoInvalido,
    #[error("Categoria inválida para o tipo de transação.")]
    CategoriaInvalida,
    #[error("Forma de pagamento inválida.")]
    FormaPagamentoInvalida,
    #[error("O valor deve ser maior que zero.")]
    ValorNaoPositivo,
    #[error("Data da transação inválida.")]
    DataInvalida,
    #[error("Data de vencimento inválida.")]
    VencimentoInvalido,
    #[error("O ID do membro deve ser fornecido para transações de Dízimo.")]
    MembroObrigatorio,
    #[error("O membro fornecido não está ativo.")]
    MembroInativo,
    #[error("O valor pago não pode ser negativo nem maior que o valor da conta.")]
    ValorPagoForaDoIntervalo,
    #[error(transparent)]
    Database(DatabaseError),
    #[error("query error: {0}")]
    Sqlx(sqlx::Error),
}

impl PartialEq for LancamentoError {
    fn eq(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl From<DatabaseError> for LancamentoError {
    fn from(err: DatabaseError) -> Self {
        LancamentoError::Database(err)
    }
}

impl From<sqlx::Error> for LancamentoError {
    fn from(err: sqlx::Error) -> Self {
        LancamentoError::Sqlx(err)
    }
}

/// Request body of `POST /api/entradasaida`, camelCase as the entry form
/// sends it. Every field is optional at the serde level so missing fields
/// surface as the contract's own 400 instead of a framework rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LancamentoPayload {
    pub observacao: Option<String>,
    pub tipo_transacao: Option<String>,
    pub tipo: Option<String>,
    pub forma_pagamento: Option<String>,
    pub valor: Option<Decimal>,
    pub data_transacao: Option<String>,
    #[serde(default, deserialize_with = "de_membro_id")]
    pub membro_id: Option<i32>,
}

/// Request body of `POST /api/financeirosaida`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaidaFinanceiraPayload {
    pub observacao: Option<String>,
    pub tipo: Option<String>,
    pub forma_pagamento: Option<String>,
    pub valor: Option<Decimal>,
    pub data_transacao: Option<String>,
    pub valor_pago: Option<Decimal>,
    pub data_vencimento: Option<String>,
}

/// Validated transaction, ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct Lancamento {
    pub observacao: String,
    pub tipo_transacao: TipoTransacao,
    pub categoria: CategoriaTransacao,
    pub forma_pagamento: FormaPagamento,
    pub valor: Decimal,
    pub data: NaiveDateTime,
    pub membro_id: Option<i32>,
}

/// Validated expense-with-payable, ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct SaidaFinanceira {
    pub observacao: String,
    pub categoria: CategoriaTransacao,
    pub forma_pagamento: FormaPagamento,
    pub valor: Decimal,
    pub data: NaiveDateTime,
    pub valor_pago: Decimal,
    pub vencimento: NaiveDate,
}

/// Pure payload validation; runs before any tenant-database access.
pub fn validar_lancamento(payload: LancamentoPayload) -> Result<Lancamento, LancamentoError> {
    let observacao = texto_obrigatorio(payload.observacao)?;
    let tipo_transacao = texto_obrigatorio(payload.tipo_transacao)?;
    let tipo = texto_obrigatorio(payload.tipo)?;
    let forma_pagamento = texto_obrigatorio(payload.forma_pagamento)?;
    let valor = payload.valor.ok_or(LancamentoError::DadosFaltando)?;
    let data_transacao = texto_obrigatorio(payload.data_transacao)?;

    let tipo_transacao =
        TipoTransacao::parse(&tipo_transacao).ok_or(LancamentoError::TipoInvalido)?;
    let categoria = CategoriaTransacao::parse(&tipo).ok_or(LancamentoError::CategoriaInvalida)?;
    if !categoria.compativel_com(tipo_transacao) {
        return Err(LancamentoError::CategoriaInvalida);
    }
    let forma_pagamento =
        FormaPagamento::parse(&forma_pagamento).ok_or(LancamentoError::FormaPagamentoInvalida)?;

    if valor <= Decimal::ZERO {
        return Err(LancamentoError::ValorNaoPositivo);
    }

    let data = parse_data_hora(&data_transacao).ok_or(LancamentoError::DataInvalida)?;

    // Outflows never carry a member; the tithe rule only binds inflows.
    let membro_id = match tipo_transacao {
        TipoTransacao::Entrada => payload.membro_id,
        TipoTransacao::Saida => None,
    };
    if tipo_transacao == TipoTransacao::Entrada
        && categoria == CategoriaTransacao::Dizimo
        && membro_id.is_none()
    {
        return Err(LancamentoError::MembroObrigatorio);
    }

    Ok(Lancamento {
        observacao,
        tipo_transacao,
        categoria,
        forma_pagamento,
        valor,
        data,
        membro_id,
    })
}

pub fn validar_saida_financeira(
    payload: SaidaFinanceiraPayload,
) -> Result<SaidaFinanceira, LancamentoError> {
    let observacao = texto_obrigatorio(payload.observacao)?;
    let tipo = texto_obrigatorio(payload.tipo)?;
    let forma_pagamento = texto_obrigatorio(payload.forma_pagamento)?;
    let valor = payload.valor.ok_or(LancamentoError::DadosFaltando)?;
    let data_transacao = texto_obrigatorio(payload.data_transacao)?;
    // Zero is a legitimate paid amount (nothing paid yet); only absence fails.
    let valor_pago = payload.valor_pago.ok_or(LancamentoError::DadosFaltando)?;
    let data_vencimento = texto_obrigatorio(payload.data_vencimento)?;

    let categoria = CategoriaTransacao::parse(&tipo).ok_or(LancamentoError::CategoriaInvalida)?;
    if !categoria.compativel_com(TipoTransacao::Saida) {
        return Err(LancamentoError::CategoriaInvalida);
    }
    let forma_pagamento =
        FormaPagamento::parse(&forma_pagamento).ok_or(LancamentoError::FormaPagamentoInvalida)?;

    if valor <= Decimal::ZERO {
        return Err(LancamentoError::ValorNaoPositivo);
    }
    if valor_pago < Decimal::ZERO || valor_pago > valor {
        return Err(LancamentoError::ValorPagoForaDoIntervalo);
    }

    let data = parse_data_hora(&data_transacao).ok_or(LancamentoError::DataInvalida)?;
    let vencimento = parse_dia(&data_vencimento).ok_or(LancamentoError::VencimentoInvalido)?;

    Ok(SaidaFinanceira {
        observacao,
        categoria,
        forma_pagamento,
        valor,
        data,
        valor_pago,
        vencimento,
    })
}

/// Persists one validated transaction into the direction-appropriate table.
///
/// For tithes the member status is checked in a separate statement right
/// before the insert; the two are not wrapped in a transaction, so a member
/// deactivated in between still lands.
pub async fn registrar_lancamento(
    pool: &PgPool,
    lancamento: &Lancamento,
) -> Result<(), LancamentoError> {
    if lancamento.tipo_transacao == TipoTransacao::Entrada
        && lancamento.categoria == CategoriaTransacao::Dizimo
    {
        let membro_id = lancamento.membro_id.ok_or(LancamentoError::MembroObrigatorio)?;
        verificar_membro_ativo(pool, membro_id).await?;
    }

    match lancamento.tipo_transacao {
        TipoTransacao::Entrada => {
            sqlx::query(
                "INSERT INTO entrada (observacao, tipo, forma_pagamento, valor, data, membro_id) \
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(&lancamento.observacao)
            .bind(lancamento.categoria.as_str())
            .bind(lancamento.forma_pagamento.as_str())
            .bind(lancamento.valor)
            .bind(lancamento.data)
            .bind(lancamento.membro_id)
            .execute(pool)
            .await?;
        }
        TipoTransacao::Saida => {
            sqlx::query(
                "INSERT INTO saida (observacao, tipo, forma_pagamento, valor, data) \
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(&lancamento.observacao)
            .bind(lancamento.categoria.as_str())
            .bind(lancamento.forma_pagamento.as_str())
            .bind(lancamento.valor)
            .bind(lancamento.data)
            .execute(pool)
            .await?;
        }
    }

    Ok(())
}

/// Persists the payable (with its classified status) plus, when something was
/// actually paid, the matching outflow row carrying the paid amount.
pub async fn registrar_saida_financeira(
    pool: &PgPool,
    saida: &SaidaFinanceira,
    hoje: NaiveDate,
) -> Result<(), LancamentoError> {
    let status = crate::database::models::classificar(
        saida.valor,
        saida.valor_pago,
        saida.vencimento,
        hoje,
    );

    sqlx::query(
        "INSERT INTO contas_a_pagar (observacao, valor, valor_pago, data_vencimento, status) \
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(&saida.observacao)
    .bind(saida.valor)
    .bind(saida.valor_pago)
    .bind(saida.vencimento)
    .bind(status.as_str())
    .execute(pool)
    .await?;

    if saida.valor_pago > Decimal::ZERO {
        sqlx::query(
            "INSERT INTO saida (observacao, tipo, forma_pagamento, valor, data) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&saida.observacao)
        .bind(saida.categoria.as_str())
        .bind(saida.forma_pagamento.as_str())
        .bind(saida.valor_pago)
        .bind(saida.data)
        .execute(pool)
        .await?;
    }

    Ok(())
}

async fn verificar_membro_ativo(pool: &PgPool, membro_id: i32) -> Result<(), LancamentoError> {
    let status: Option<String> = sqlx::query_scalar("SELECT status FROM membros WHERE id = $1")
        .bind(membro_id)
        .fetch_optional(pool)
        .await?;

    match status {
        Some(ref s) if status_ativo(s) => Ok(()),
        _ => Err(LancamentoError::MembroInativo),
    }
}

fn texto_obrigatorio(campo: Option<String>) -> Result<String, LancamentoError> {
    match campo {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(LancamentoError::DadosFaltando),
    }
}

/// Accepts the timestamp spellings the forms produce: ISO date-time with or
/// without fractional seconds and trailing Z, or a bare date (midnight).
pub(crate) fn parse_data_hora(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim().trim_end_matches('Z');
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

/// Calendar date, also tolerating a full timestamp (the date part wins).
pub(crate) fn parse_dia(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    parse_data_hora(s).map(|dt| dt.date())
}

fn de_membro_id<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    // The member dropdown sends a number or a numeric string, some screens
    // send null when nothing is selected.
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::Number(n)) => n
            .as_i64()
            .and_then(|v| i32::try_from(v).ok())
            .map(Some)
            .ok_or_else(|| D::Error::custom("membroId fora do intervalo")),
        Some(serde_json::Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            s.parse::<i32>()
                .map(Some)
                .map_err(|_| D::Error::custom("membroId inválido"))
        }
        Some(outro) => Err(D::Error::custom(format!(
            "membroId inválido: {}",
            outro
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload_entrada() -> LancamentoPayload {
        serde_json::from_value(json!({
            "observacao": "Dízimo semanal",
            "tipoTransacao": "Entrada",
            "tipo": "Dizimo",
            "formaPagamento": "PIX",
            "valor": "150.00",
            "dataTransacao": "2024-03-15T10:30:00",
            "membroId": 7
        }))
        .unwrap()
    }

    #[test]
    fn payload_completo_e_aceito() {
        let lancamento = validar_lancamento(payload_entrada()).unwrap();
        assert_eq!(lancamento.tipo_transacao, TipoTransacao::Entrada);
        assert_eq!(lancamento.categoria, CategoriaTransacao::Dizimo);
        assert_eq!(lancamento.valor, Decimal::new(15000, 2));
        assert_eq!(lancamento.membro_id, Some(7));
    }

    #[test]
    fn campos_ausentes_sao_rejeitados() {
        let payload: LancamentoPayload = serde_json::from_value(json!({
            "observacao": "Oferta",
            "tipoTransacao": "Entrada"
        }))
        .unwrap();
        assert_eq!(
            validar_lancamento(payload),
            Err(LancamentoError::DadosFaltando)
        );
    }

    #[test]
    fn valor_aceita_numero_ou_texto() {
        let mut payload = payload_entrada();
        payload.valor = serde_json::from_value(json!(99.9)).unwrap();
        let lancamento = validar_lancamento(payload).unwrap();
        assert_eq!(lancamento.valor, Decimal::new(999, 1));
    }

    #[test]
    fn valor_zerado_ou_negativo_e_rejeitado() {
        let mut payload = payload_entrada();
        payload.valor = Some(Decimal::ZERO);
        assert_eq!(
            validar_lancamento(payload),
            Err(LancamentoError::ValorNaoPositivo)
        );

        let mut payload = payload_entrada();
        payload.valor = Some(Decimal::from(-5));
        assert_eq!(
            validar_lancamento(payload),
            Err(LancamentoError::ValorNaoPositivo)
        );
    }

    #[test]
    fn dizimo_sem_membro_e_rejeitado() {
        let mut payload = payload_entrada();
        payload.membro_id = None;
        assert_eq!(
            validar_lancamento(payload),
            Err(LancamentoError::MembroObrigatorio)
        );
    }

    #[test]
    fn membro_id_aceita_texto_numerico_e_nulo() {
        let payload: LancamentoPayload = serde_json::from_value(json!({
            "observacao": "Dízimo",
            "tipoTransacao": "Entrada",
            "tipo": "Dizimo",
            "formaPagamento": "Dinheiro",
            "valor": 50,
            "dataTransacao": "2024-03-15",
            "membroId": "12"
        }))
        .unwrap();
        assert_eq!(payload.membro_id, Some(12));

        let payload: LancamentoPayload = serde_json::from_value(json!({
            "observacao": "Oferta",
            "tipoTransacao": "Entrada",
            "tipo": "Oferta",
            "formaPagamento": "Dinheiro",
            "valor": 50,
            "dataTransacao": "2024-03-15",
            "membroId": null
        }))
        .unwrap();
        assert_eq!(payload.membro_id, None);
    }

    #[test]
    fn saida_descarta_membro_e_nao_exige() {
        let payload: LancamentoPayload = serde_json::from_value(json!({
            "observacao": "Conta de luz",
            "tipoTransacao": "Saida",
            "tipo": "Pagamento",
            "formaPagamento": "Debito",
            "valor": 320,
            "dataTransacao": "2024-03-15T08:00:00",
            "membroId": 7
        }))
        .unwrap();
        let lancamento = validar_lancamento(payload).unwrap();
        assert_eq!(lancamento.tipo_transacao, TipoTransacao::Saida);
        assert_eq!(lancamento.membro_id, None);
    }

    #[test]
    fn categoria_incompativel_com_a_direcao_e_rejeitada() {
        let mut payload = payload_entrada();
        payload.tipo = Some("Salario".to_string());
        assert_eq!(
            validar_lancamento(payload),
            Err(LancamentoError::CategoriaInvalida)
        );
    }

    #[test]
    fn direcao_desconhecida_e_rejeitada() {
        let mut payload = payload_entrada();
        payload.tipo_transacao = Some("Transferencia".to_string());
        assert_eq!(
            validar_lancamento(payload),
            Err(LancamentoError::TipoInvalido)
        );
    }

    #[test]
    fn datas_nos_formatos_do_formulario_sao_aceitas() {
        assert!(parse_data_hora("2024-03-15T10:30:00").is_some());
        assert!(parse_data_hora("2024-03-15T10:30:00.123Z").is_some());
        assert!(parse_data_hora("2024-03-15 10:30:00").is_some());
        assert_eq!(
            parse_data_hora("2024-03-15"),
            Some(
                NaiveDate::from_ymd_opt(2024, 3, 15)
                    .unwrap()
                    .and_time(NaiveTime::MIN)
            )
        );
        assert!(parse_data_hora("15/03/2024").is_none());

        assert_eq!(
            parse_dia("2024-03-15T10:30:00"),
            NaiveDate::from_ymd_opt(2024, 3, 15)
        );
    }

    fn payload_financeiro() -> SaidaFinanceiraPayload {
        serde_json::from_value(json!({
            "observacao": "Aluguel do salão",
            "tipo": "Pagamento",
            "formaPagamento": "PIX",
            "valor": "1200.00",
            "dataTransacao": "2024-03-10T09:00:00",
            "valorPago": "400.00",
            "dataVencimento": "2024-03-20"
        }))
        .unwrap()
    }

    #[test]
    fn saida_financeira_completa_e_aceita() {
        let saida = validar_saida_financeira(payload_financeiro()).unwrap();
        assert_eq!(saida.valor, Decimal::new(120000, 2));
        assert_eq!(saida.valor_pago, Decimal::new(40000, 2));
        assert_eq!(saida.vencimento, NaiveDate::from_ymd_opt(2024, 3, 20).unwrap());
    }

    #[test]
    fn valor_pago_zero_e_valido() {
        let mut payload = payload_financeiro();
        payload.valor_pago = Some(Decimal::ZERO);
        let saida = validar_saida_financeira(payload).unwrap();
        assert_eq!(saida.valor_pago, Decimal::ZERO);
    }

    #[test]
    fn valor_pago_fora_do_intervalo_e_rejeitado() {
        let mut payload = payload_financeiro();
        payload.valor_pago = Some(Decimal::from(-1));
        assert_eq!(
            validar_saida_financeira(payload),
            Err(LancamentoError::ValorPagoForaDoIntervalo)
        );

        let mut payload = payload_financeiro();
        payload.valor_pago = Some(Decimal::from(5000));
        assert_eq!(
            validar_saida_financeira(payload),
            Err(LancamentoError::ValorPagoForaDoIntervalo)
        );
    }

    #[test]
    fn saida_financeira_exige_categoria_de_saida() {
        let mut payload = payload_financeiro();
        payload.tipo = Some("Oferta".to_string());
        assert_eq!(
            validar_saida_financeira(payload),
            Err(LancamentoError::CategoriaInvalida)
        );
    }
}
