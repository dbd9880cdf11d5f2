use clap::Subcommand;
use validator::ValidateEmail;

use crate::cli::OutputFormat;
use crate::database::DatabaseManager;

#[derive(Subcommand)]
pub enum UsuarioCommands {
    #[command(about = "Create a user in a tenant database")]
    Add {
        #[arg(help = "Tenant database name")]
        nome_banco: String,

        #[arg(help = "Login email")]
        email: String,

        #[arg(help = "Display name")]
        nome: String,

        #[arg(help = "Plain-text password, stored as a bcrypt hash")]
        senha: String,

        #[arg(long, default_value = "", help = "Role shown on the profile card")]
        cargo: String,
    },
}

pub async fn handle(cmd: UsuarioCommands, _output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        UsuarioCommands::Add {
            nome_banco,
            email,
            nome,
            senha,
            cargo,
        } => {
            let email = email.trim().to_string();
            if !email.validate_email() {
                return Err(anyhow::anyhow!("invalid email '{}'", email));
            }

            let hash = bcrypt::hash(&senha, bcrypt::DEFAULT_COST)?;

            let pool = DatabaseManager::tenant_pool(&nome_banco).await?;
            sqlx::query("INSERT INTO usuarios (email, nome, senha, cargo) VALUES ($1, $2, $3, $4)")
                .bind(&email)
                .bind(nome.trim())
                .bind(&hash)
                .bind(cargo.trim())
                .execute(&pool)
                .await?;

            println!("User '{}' created in '{}'", email, nome_banco);
            Ok(())
        }
    }
}
