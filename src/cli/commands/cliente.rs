use clap::Subcommand;
use serde_json::json;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::cli::OutputFormat;
use crate::database::models::Cliente;
use crate::database::DatabaseManager;

#[derive(Subcommand)]
pub enum ClienteCommands {
    #[command(about = "Register a church account and print its verification code")]
    Add {
        #[arg(help = "Church display name")]
        nome_igreja: String,

        #[arg(long, help = "Tenant database name (derived from the name when omitted)")]
        nome_banco: Option<String>,

        #[arg(long, help = "Verification code (generated when omitted)")]
        codigo: Option<String>,
    },

    #[command(about = "List registered accounts")]
    List,

    #[command(about = "Set an account's status (anything but 'ativo' blocks access)")]
    SetStatus {
        #[arg(help = "Verification code of the account")]
        codigo: String,

        #[arg(help = "New status (e.g. ativo, bloqueado)")]
        status: String,
    },
}

pub async fn handle(cmd: ClienteCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        ClienteCommands::Add {
            nome_igreja,
            nome_banco,
            codigo,
        } => {
            let nome_igreja = nome_igreja.trim().to_string();
            if nome_igreja.is_empty() {
                return Err(anyhow::anyhow!("church name must not be empty"));
            }

            let nome_banco = match nome_banco {
                Some(nome) => {
                    let nome = nome.trim().to_string();
                    if !DatabaseManager::is_valid_db_name(&nome) {
                        return Err(anyhow::anyhow!("invalid database name '{}'", nome));
                    }
                    nome
                }
                None => derivar_nome_banco(&nome_igreja),
            };
            let codigo = match codigo {
                Some(codigo) => {
                    let codigo = codigo.trim().to_string();
                    if codigo.is_empty() {
                        return Err(anyhow::anyhow!("verification code must not be empty"));
                    }
                    codigo
                }
                None => Uuid::new_v4().to_string(),
            };

            let pool = DatabaseManager::admin_pool().await?;
            sqlx::query(
                "INSERT INTO clientes (codigo_verificacao, nome_banco, nome_igreja, status) \
                 VALUES ($1, $2, $3, 'ativo')",
            )
            .bind(&codigo)
            .bind(&nome_banco)
            .bind(&nome_igreja)
            .execute(&pool)
            .await?;

            match output_format {
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::to_string_pretty(&json!({
                        "codigo_verificacao": codigo,
                        "nome_banco": nome_banco,
                        "nome_igreja": nome_igreja,
                        "status": "ativo",
                    }))?
                ),
                OutputFormat::Text => {
                    println!("Registered '{}'", nome_igreja);
                    println!("  codigo_verificacao: {}", codigo);
                    println!("  nome_banco:         {}", nome_banco);
                    println!(
                        "Run 'tesouraria init banco {}' to provision the database.",
                        nome_banco
                    );
                }
            }
            Ok(())
        }
        ClienteCommands::List => {
            let pool = DatabaseManager::admin_pool().await?;
            let clientes: Vec<Cliente> = sqlx::query_as(
                "SELECT id, codigo_verificacao, nome_banco, nome_igreja, status \
                 FROM clientes ORDER BY id",
            )
            .fetch_all(&pool)
            .await?;

            match output_format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&clientes)?),
                OutputFormat::Text => {
                    if clientes.is_empty() {
                        println!("No accounts registered");
                        return Ok(());
                    }
                    println!(
                        "{:<4} {:<38} {:<20} {:<12} {}",
                        "ID", "CODIGO", "BANCO", "STATUS", "IGREJA"
                    );
                    println!("{}", "-".repeat(90));
                    for cliente in &clientes {
                        println!(
                            "{:<4} {:<38} {:<20} {:<12} {}",
                            cliente.id,
                            cliente.codigo_verificacao,
                            cliente.nome_banco,
                            cliente.status,
                            cliente.nome_igreja
                        );
                    }
                }
            }
            Ok(())
        }
        ClienteCommands::SetStatus { codigo, status } => {
            let pool = DatabaseManager::admin_pool().await?;
            let result =
                sqlx::query("UPDATE clientes SET status = $1 WHERE codigo_verificacao = $2")
                    .bind(status.trim())
                    .bind(codigo.trim())
                    .execute(&pool)
                    .await?;

            if result.rows_affected() == 0 {
                return Err(anyhow::anyhow!("no account with code '{}'", codigo));
            }

            println!("Status updated");
            Ok(())
        }
    }
}

/// Hash the church name to a stable tenant database name.
fn derivar_nome_banco(nome_igreja: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(nome_igreja.trim().to_lowercase().as_bytes());
    let hash = hasher.finalize();
    let hash_str = format!("{:x}", hash);

    format!("igreja_{}", &hash_str[..12])
}
