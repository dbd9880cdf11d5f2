use tesouraria_api::{app, config::config};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL,
    // TESOURARIA_ADMIN_DB, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config();
    tracing::info!("starting Tesouraria API in {:?} mode", config.environment);

    let app = app();

    // Allow tests or deployments to override port via env
    let port = std::env::var("TESOURARIA_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(config.server.port);

    let bind_addr = format!("{}:{}", config.server.host, port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("🚀 Tesouraria API server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
