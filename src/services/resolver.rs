use serde::Serialize;
use sqlx::FromRow;
use thiserror::Error;

use crate::database::manager::{DatabaseError, DatabaseManager};

/// Resolved tenant record from the administrative `clientes` registry.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ClienteResolvido {
    pub nome_banco: String,
    pub nome_igreja: String,
    pub status: String,
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("verification code is required")]
    CodigoVazio,
    #[error("verification code not found")]
    NaoEncontrado,
    #[error("client is not active (status: {status})")]
    Inativo { status: String },
    #[error("claimed database name does not match the registry")]
    BancoDivergente,
    #[error(transparent)]
    Database(#[from] DatabaseError),
    #[error("query error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// The single authorization predicate: a tenant (or member) is active iff its
/// status equals "ativo" after trimming, ignoring ASCII case. The registry
/// column is free text written by the provisioning CLI, so "Ativo " must not
/// lock a paying church out while "bloqueado", "inativo" and "" all deny.
pub fn status_ativo(status: &str) -> bool {
    status.trim().eq_ignore_ascii_case("ativo")
}

/// Trims the caller-supplied code; an empty result is a validation failure,
/// not a lookup miss.
pub fn normalizar_codigo(codigo: &str) -> Result<&str, ResolveError> {
    let codigo = codigo.trim();
    if codigo.is_empty() {
        return Err(ResolveError::CodigoVazio);
    }
    Ok(codigo)
}

/// Resolves a verification code against the administrative registry and
/// requires the tenant to be active. Read-only, uncached: every call
/// re-queries, so a deactivation takes effect on the next request.
pub async fn resolver(codigo: &str) -> Result<ClienteResolvido, ResolveError> {
    let cliente = buscar(codigo).await?;
    verificar_ativo(&cliente)?;
    Ok(cliente)
}

/// Like [`resolver`], but additionally requires the client-supplied database
/// name to match the registry. This is the anti-tampering check for every
/// endpoint that accepts the tenant name alongside the code. The mismatch is
/// reported before the status check.
pub async fn resolver_e_autorizar(
    codigo: &str,
    nome_banco: &str,
) -> Result<ClienteResolvido, ResolveError> {
    let cliente = buscar(codigo).await?;
    if cliente.nome_banco != nome_banco.trim() {
        return Err(ResolveError::BancoDivergente);
    }
    verificar_ativo(&cliente)?;
    Ok(cliente)
}

async fn buscar(codigo: &str) -> Result<ClienteResolvido, ResolveError> {
    let codigo = normalizar_codigo(codigo)?;
    let pool = DatabaseManager::admin_pool().await?;

    let cliente = sqlx::query_as::<_, ClienteResolvido>(
        "SELECT nome_banco, nome_igreja, status FROM clientes WHERE codigo_verificacao = $1",
    )
    .bind(codigo)
    .fetch_optional(&pool)
    .await?;

    cliente.ok_or(ResolveError::NaoEncontrado)
}

fn verificar_ativo(cliente: &ClienteResolvido) -> Result<(), ResolveError> {
    if status_ativo(&cliente.status) {
        Ok(())
    } else {
        tracing::warn!(
            "blocked tenant '{}' attempted access (status: {})",
            cliente.nome_banco,
            cliente.status.trim()
        );
        Err(ResolveError::Inativo {
            status: cliente.status.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicado_de_ativacao_normaliza_espacos_e_caixa() {
        assert!(status_ativo("ativo"));
        assert!(status_ativo("Ativo"));
        assert!(status_ativo("  ATIVO  "));
        assert!(!status_ativo("bloqueado"));
        assert!(!status_ativo("inativo"));
        assert!(!status_ativo("não definido"));
        assert!(!status_ativo(""));
        assert!(!status_ativo("ativo agora nao"));
    }

    #[test]
    fn codigo_em_branco_e_erro_de_validacao() {
        assert!(matches!(normalizar_codigo(""), Err(ResolveError::CodigoVazio)));
        assert!(matches!(normalizar_codigo("   "), Err(ResolveError::CodigoVazio)));
        assert_eq!(normalizar_codigo("  abc-123  ").unwrap(), "abc-123");
    }

    #[test]
    fn cliente_inativo_carrega_o_status_armazenado() {
        let cliente = ClienteResolvido {
            nome_banco: "igreja_x".to_string(),
            nome_igreja: "Igreja X".to_string(),
            status: " bloqueado ".to_string(),
        };
        match verificar_ativo(&cliente) {
            Err(ResolveError::Inativo { status }) => assert_eq!(status, "bloqueado"),
            outro => panic!("esperava Inativo, veio {:?}", outro.err()),
        }
    }
}
