//! Axum-based skill gateway: entry point for Lost Then Found. Config-driven
//! via SkillConfig.
//!
//! The platform adapter posts one [`RequestEnvelope`] per turn to `/v1/turn`.
//! Session attributes live here, keyed by session id; per-session locks keep
//! concurrent turns for the same session serialized.

use std::path::Path as StdPath;
use std::sync::Arc;

use axum::{
    extract::{Json, State},
    routing::{get, post},
    Router,
};
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lostfound_core::{
    AttributeStore, RequestEnvelope, RequestKind, ResponseEnvelope, SessionAttributes,
    SkillConfig, SledAttributeStore,
};
use lostfound_handlers::build_skill;

/// Pre-flight check: verify the attribute store opens and the port is free.
fn run_verify() -> Result<(), String> {
    let config = SkillConfig::load().map_err(|e| format!("Config load failed: {}", e))?;
    let store_path = StdPath::new(&config.storage_path).join("lostfound_attributes");

    print!("Checking attribute store... ");
    let store = SledAttributeStore::open_path(&store_path)
        .map_err(|e| format!("attribute store LOCKED or inaccessible: {}", e))?;
    drop(store);
    println!("OK");

    print!("Checking port {}... ", config.port);
    let addr = std::net::SocketAddr::from(([127, 0, 0, 1], config.port));
    match std::net::TcpListener::bind(addr) {
        Ok(listener) => {
            drop(listener);
            println!("OK (available)");
        }
        Err(e) => {
            return Err(format!("Port {} BLOCKED: {}", config.port, e));
        }
    }

    println!("\nAll checks passed. Ready to start gateway.");
    Ok(())
}

#[tokio::main]
async fn main() {
    // Load .env file if present (before any env::var calls)
    if let Err(e) = dotenvy::dotenv() {
        eprintln!(
            "[lostfound-gateway] .env not loaded: {} (using system environment)",
            e
        );
    }

    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--verify") {
        match run_verify() {
            Ok(()) => std::process::exit(0),
            Err(e) => {
                eprintln!("PRE-FLIGHT FAILED: {}", e);
                std::process::exit(1);
            }
        }
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Arc::new(SkillConfig::load().expect("load SkillConfig"));
    let store_path = StdPath::new(&config.storage_path).join("lostfound_attributes");
    let store: Arc<dyn AttributeStore> = Arc::new(
        SledAttributeStore::open_path(&store_path).expect("open attribute store"),
    );

    let app = build_app(AppState {
        config: Arc::clone(&config),
        skill: Arc::new(build_skill(store)),
        sessions: Arc::new(DashMap::new()),
    });

    let addr = std::net::SocketAddr::from(([127, 0, 0, 1], config.port));
    tracing::info!("{} listening on {}", config.app_name, addr);
    axum::serve(tokio::net::TcpListener::bind(addr).await.unwrap(), app)
        .await
        .unwrap();
}

fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/v1/status", get(status))
        .route("/v1/turn", post(turn))
        .with_state(state)
}

#[derive(Clone)]
struct AppState {
    config: Arc<SkillConfig>,
    skill: Arc<lostfound_core::Skill>,
    /// Live session attribute bags, keyed by session id. Entries are removed
    /// when the session ends.
    sessions: Arc<DashMap<String, Arc<Mutex<SessionAttributes>>>>,
}

/// GET /v1/status – app identity, handler chain, and live session count.
async fn status(State(state): State<AppState>) -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "app_name": state.config.app_name,
        "port": state.config.port,
        "default_locale": state.config.default_locale,
        "handlers": state.skill.handler_names(),
        "active_sessions": state.sessions.len(),
    }))
}

/// POST /v1/turn – processes one envelope through the skill.
async fn turn(
    State(state): State<AppState>,
    Json(mut envelope): Json<RequestEnvelope>,
) -> axum::Json<ResponseEnvelope> {
    if envelope.locale.trim().is_empty() {
        envelope.locale = state.config.default_locale.clone();
    }

    let session_id = envelope.session_id.clone();
    let ended_by_platform = envelope.kind == RequestKind::SessionEnd;

    let entry = state
        .sessions
        .entry(session_id.clone())
        .or_insert_with(|| Arc::new(Mutex::new(SessionAttributes::default())))
        .clone();

    // Turns for one session are serialized; sessions proceed independently.
    let mut session = entry.lock().await;
    let response = state.skill.handle_turn(envelope, &mut session);
    drop(session);

    if response.end_session || ended_by_platform {
        state.sessions.remove(&session_id);
        tracing::debug!(
            target: "lostfound::gateway",
            session_id = %session_id,
            "session closed"
        );
    }

    axum::Json(response)
}
