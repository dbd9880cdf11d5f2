use clap::Subcommand;

use crate::cli::OutputFormat;
use crate::database::DatabaseManager;

const DDL_CLIENTES: &str = "CREATE TABLE IF NOT EXISTS clientes (
    id SERIAL PRIMARY KEY,
    codigo_verificacao TEXT UNIQUE NOT NULL,
    nome_banco TEXT NOT NULL,
    nome_igreja TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'ativo'
)";

// Tenant schema. membros comes before entrada so the foreign key resolves.
const DDL_TENANT: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS usuarios (
        id SERIAL PRIMARY KEY,
        email TEXT UNIQUE NOT NULL,
        nome TEXT NOT NULL,
        senha TEXT NOT NULL,
        cargo TEXT NOT NULL DEFAULT ''
    )",
    "CREATE TABLE IF NOT EXISTS membros (
        id SERIAL PRIMARY KEY,
        nome TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'ativo'
    )",
    "CREATE TABLE IF NOT EXISTS entrada (
        id SERIAL PRIMARY KEY,
        observacao TEXT NOT NULL,
        tipo TEXT NOT NULL,
        forma_pagamento TEXT NOT NULL,
        valor NUMERIC(12,2) NOT NULL,
        data TIMESTAMP NOT NULL,
        membro_id INTEGER REFERENCES membros(id)
    )",
    "CREATE TABLE IF NOT EXISTS saida (
        id SERIAL PRIMARY KEY,
        observacao TEXT NOT NULL,
        tipo TEXT NOT NULL,
        forma_pagamento TEXT NOT NULL,
        valor NUMERIC(12,2) NOT NULL,
        data TIMESTAMP NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS contas_a_pagar (
        id SERIAL PRIMARY KEY,
        observacao TEXT NOT NULL,
        valor NUMERIC(12,2) NOT NULL,
        valor_pago NUMERIC(12,2) NOT NULL DEFAULT 0,
        data_vencimento DATE NOT NULL,
        status TEXT NOT NULL
    )",
];

#[derive(Subcommand)]
pub enum InitCommands {
    #[command(about = "Create the administrative database and its registry table")]
    Admin,

    #[command(about = "Create a tenant database with the full treasury schema")]
    Banco {
        #[arg(help = "Tenant database name (as printed by 'cliente add')")]
        nome_banco: String,
    },
}

pub async fn handle(cmd: InitCommands, _output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        InitCommands::Admin => {
            let nome = DatabaseManager::admin_db_name();
            criar_banco(nome).await?;

            let pool = DatabaseManager::admin_pool().await?;
            sqlx::query(DDL_CLIENTES).execute(&pool).await?;

            println!("Administrative database '{}' ready", nome);
            Ok(())
        }
        InitCommands::Banco { nome_banco } => {
            if !DatabaseManager::is_valid_db_name(&nome_banco) {
                return Err(anyhow::anyhow!("invalid database name '{}'", nome_banco));
            }
            criar_banco(&nome_banco).await?;

            let pool = DatabaseManager::tenant_pool(&nome_banco).await?;
            for ddl in DDL_TENANT {
                sqlx::query(ddl).execute(&pool).await?;
            }

            println!("Tenant database '{}' ready", nome_banco);
            Ok(())
        }
    }
}

/// Creates the database if it does not exist yet. CREATE DATABASE cannot be
/// parameterized, so the name goes through the identifier quoter.
async fn criar_banco(nome: &str) -> anyhow::Result<()> {
    let pool = DatabaseManager::maintenance_pool().await?;

    let existe: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pg_database WHERE datname = $1")
        .bind(nome)
        .fetch_one(&pool)
        .await?;

    if existe == 0 {
        let sql = format!(
            "CREATE DATABASE {}",
            DatabaseManager::quote_identifier(nome)
        );
        sqlx::query(&sql).execute(&pool).await?;
        println!("Created database '{}'", nome);
    }

    Ok(())
}
