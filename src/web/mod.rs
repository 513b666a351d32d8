use crate::db::Database;
use axum::{
    Router,
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::{Instrument, Level, info, info_span};
use uuid::Uuid;

/// Shared application state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Mutex<Database>>,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        AppState {
            db: Arc::new(Mutex::new(db)),
        }
    }
}

pub mod errors;
mod handlers;

/// Wrap each request in a span carrying a fresh request id.
async fn request_id(request: Request, next: Next) -> Response {
    let span = info_span!(
        "request",
        request_id = %Uuid::new_v4(),
        method = %request.method(),
        uri = %request.uri(),
    );
    next.run(request).instrument(span).await
}

/// Build the axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/restaurants", get(handlers::list_restaurants))
        .route(
            "/restaurants/{id}",
            get(handlers::get_restaurant).delete(handlers::delete_restaurant),
        )
        .route("/pizzas", get(handlers::list_pizzas))
        .route("/restaurant_pizzas", post(handlers::create_restaurant_pizza))
        .layer(middleware::from_fn(request_id))
        .layer(
            TraceLayer::new_for_http().on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the web server, creating the schema first if needed.
pub async fn serve(db_path: &Path, host: &str, port: u16) -> Result<(), String> {
    let db = Database::open(db_path).map_err(|e| format!("failed to open database: {e}"))?;
    db.migrate()
        .map_err(|e| format!("failed to migrate database: {e}"))?;
    let app = create_router(AppState::new(db));

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| format!("failed to bind to {addr}: {e}"))?;
    info!(%addr, db = %db_path.display(), "listening");
    println!("Pizzeria API: http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| format!("server error: {e}"))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutting down");
}
