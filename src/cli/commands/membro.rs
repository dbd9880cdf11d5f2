use clap::Subcommand;

use crate::cli::OutputFormat;
use crate::database::DatabaseManager;

#[derive(Subcommand)]
pub enum MembroCommands {
    #[command(about = "Register a member in a tenant database")]
    Add {
        #[arg(help = "Tenant database name")]
        nome_banco: String,

        #[arg(help = "Member name")]
        nome: String,

        #[arg(long, default_value = "ativo", help = "Member status")]
        status: String,
    },
}

pub async fn handle(cmd: MembroCommands, _output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        MembroCommands::Add {
            nome_banco,
            nome,
            status,
        } => {
            let nome = nome.trim().to_string();
            if nome.is_empty() {
                return Err(anyhow::anyhow!("member name must not be empty"));
            }

            let pool = DatabaseManager::tenant_pool(&nome_banco).await?;
            sqlx::query("INSERT INTO membros (nome, status) VALUES ($1, $2)")
                .bind(&nome)
                .bind(status.trim())
                .execute(&pool)
                .await?;

            println!("Member '{}' added to '{}'", nome, nome_banco);
            Ok(())
        }
    }
}
