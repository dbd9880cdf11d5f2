use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;

// One server per test binary; tests inside a file share it.
static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    pub base_url: String,
    #[allow(dead_code)]
    child: Child,
}

/// Spawns the compiled server binary on a free port and waits until /health
/// answers. A 503 counts as ready: it means the router is serving but the
/// administrative database is unreachable, which is all the validation-path
/// tests need.
pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| spawn().expect("failed to spawn server binary"));
    wait_ready(&server.base_url, Duration::from_secs(10)).await?;
    Ok(server)
}

fn spawn() -> Result<TestServer> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let base_url = format!("http://127.0.0.1:{}", port);

    // Environment is inherited so the server picks up DATABASE_URL and
    // TESOURARIA_ADMIN_DB when they are set.
    let child = Command::new(env!("CARGO_BIN_EXE_tesouraria-api"))
        .env("TESOURARIA_API_PORT", port.to_string())
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .context("failed to spawn server binary")?;

    Ok(TestServer { base_url, child })
}

async fn wait_ready(base_url: &str, timeout: Duration) -> Result<()> {
    let client = reqwest::Client::new();
    let url = format!("{}/health", base_url);
    let deadline = Instant::now() + timeout;

    while Instant::now() < deadline {
        if let Ok(resp) = client.get(&url).send().await {
            if resp.status() == StatusCode::OK || resp.status() == StatusCode::SERVICE_UNAVAILABLE {
                return Ok(());
            }
        }
        tokio::time::sleep(Duration::from_millis(150)).await;
    }

    anyhow::bail!(
        "server did not become ready on {} within {:?}",
        base_url,
        timeout
    )
}
