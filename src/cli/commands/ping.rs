use serde_json::json;

use crate::cli::OutputFormat;

/// Hits /health on a running server and prints the result.
pub async fn handle(url: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let endpoint = format!("{}/health", url.trim_end_matches('/'));
    let response = reqwest::get(&endpoint).await?;
    let status = response.status();
    let body: serde_json::Value = response.json().await?;

    match output_format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "status": status.as_u16(),
                "body": body,
            }))?
        ),
        OutputFormat::Text => {
            println!("{} -> {}", endpoint, status);
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
    }

    Ok(())
}
