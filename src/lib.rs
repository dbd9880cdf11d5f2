use axum::{routing::get, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;

/// Builds the full application router: public endpoints, the tenant-scoped
/// group behind the verification middleware, and the global CORS/trace layers.
pub fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(rotas_publicas())
        // Tenant-scoped
        .merge(rotas_protegidas())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn rotas_publicas() -> Router {
    use axum::routing::post;
    use handlers::public::{auth, clientes, contasapagar, status};

    Router::new()
        .route("/api/clientes", post(clientes::validar_codigo))
        .route("/api/auth", post(auth::login))
        .route("/api/protectStatus", get(status::protect_status))
        .route("/api/contasapagar", get(contasapagar::listar))
}

fn rotas_protegidas() -> Router {
    use axum::routing::post;
    use handlers::protected::{dashboard, graficos, lancamentos, membros, relatorio, usuarios};

    Router::new()
        .route("/api/entradasaida", post(lancamentos::registrar))
        .route(
            "/api/financeirosaida",
            post(lancamentos::registrar_financeiro),
        )
        .route("/api/membros", get(membros::quantidade))
        .route("/api/memberList", get(membros::listar))
        .route("/api/entradas", get(dashboard::total_entradas))
        .route("/api/saidas", get(dashboard::total_saidas))
        .route("/api/entradasgrafico", get(graficos::entradas))
        .route("/api/saidasgrafico", get(graficos::saidas))
        .route("/api/relatorio", post(relatorio::gerar))
        .route("/api/usuarios", get(usuarios::perfil))
        .layer(axum::middleware::from_fn(
            middleware::validar_cliente_middleware,
        ))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Tesouraria API",
            "version": version,
            "description": "Multi-tenant church treasury backend built with Rust (Axum)",
            "endpoints": {
                "home": "/ (public)",
                "clientes": "POST /api/clientes (public - license validation)",
                "auth": "POST /api/auth (public - login)",
                "status": "GET /api/protectStatus?codigoVerificacao= (public)",
                "contasapagar": "GET /api/contasapagar?chave=&status= (public)",
                "lancamentos": "POST /api/entradasaida, /api/financeirosaida (tenant headers)",
                "membros": "GET /api/membros, /api/memberList (tenant headers)",
                "dashboard": "GET /api/entradas, /api/saidas (tenant headers)",
                "graficos": "GET /api/entradasgrafico, /api/saidasgrafico (tenant headers)",
                "relatorio": "POST /api/relatorio (tenant headers)",
                "usuarios": "GET /api/usuarios?email= (tenant headers)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match crate::database::manager::DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
