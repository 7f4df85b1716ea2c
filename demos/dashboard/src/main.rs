// Web dashboard: load the inbox, chat with it, and browse simple analytics.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json};
use axum::routing::{get, post};
use clap::Parser;
use inbox_chat::{
    AppConfig, InboxAssistant,
    shutdown::{self, CtrlCShutdown},
    stats::{QUICK_QUESTIONS, category_breakdown, timeline},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

const MIN_EMAILS: usize = 5;
const MAX_EMAILS: usize = 20;
const DEFAULT_EMAILS: usize = 10;

const INDEX_HTML: &str = include_str!("index.html");

#[derive(Parser)]
#[command(name = "dashboard", version, about = "Web dashboard for chatting with your Gmail inbox")]
struct Cli {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8501")]
    bind: String,
}

#[derive(Clone)]
struct AppState {
    assistant: Arc<Mutex<InboxAssistant>>,
}

#[derive(Deserialize)]
struct LoadRequest {
    max_emails: Option<usize>,
}

#[derive(Deserialize)]
struct ChatRequest {
    query: String,
}

#[derive(Serialize)]
struct ChatResponse {
    response: String,
}

#[derive(Serialize)]
struct QuickQuestion {
    label: &'static str,
    question: &'static str,
}

/// Slider bounds of the load form.
fn clamp_max_emails(requested: Option<usize>) -> usize {
    requested
        .unwrap_or(DEFAULT_EMAILS)
        .clamp(MIN_EMAILS, MAX_EMAILS)
}

async fn handle_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn handle_load(
    State(state): State<AppState>,
    Json(request): Json<LoadRequest>,
) -> impl IntoResponse {
    let max_emails = clamp_max_emails(request.max_emails);
    let mut assistant = state.assistant.lock().await;
    let outcome = assistant.load_gmail(max_emails).await;
    let status = if outcome.success {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(outcome))
}

async fn handle_chat(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> impl IntoResponse {
    let query = body.query.trim();
    if query.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "query must not be empty" })),
        )
            .into_response();
    }
    let response = state.assistant.lock().await.chat(query).await;
    Json(ChatResponse { response }).into_response()
}

async fn handle_quick_questions() -> Json<Vec<QuickQuestion>> {
    Json(
        QUICK_QUESTIONS
            .iter()
            .map(|&(label, question)| QuickQuestion { label, question })
            .collect(),
    )
}

async fn handle_stats(State(state): State<AppState>) -> impl IntoResponse {
    let assistant = state.assistant.lock().await;
    match assistant.stats() {
        Some(stats) => Json(serde_json::json!({
            "categories": category_breakdown(&stats.all_subjects),
            "timeline": timeline(&stats.all_subjects),
            "stats": stats,
        }))
        .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "No emails processed" })),
        )
            .into_response(),
    }
}

async fn handle_summary(State(state): State<AppState>) -> impl IntoResponse {
    let summary = state.assistant.lock().await.all_emails_summary();
    Json(serde_json::json!({ "summary": summary }))
}

async fn handle_clear(State(state): State<AppState>) -> impl IntoResponse {
    state.assistant.lock().await.clear_memory();
    Json(serde_json::json!({ "success": true, "message": "Chat cleared!" }))
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handle_index))
        .route("/api/load", post(handle_load))
        .route("/api/chat", post(handle_chat))
        .route("/api/quick-questions", get(handle_quick_questions))
        .route("/api/stats", get(handle_stats))
        .route("/api/summary", get(handle_summary))
        .route("/api/clear", post(handle_clear))
        .with_state(state)
}

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to install logger: {e}");
    }

    let cli = Cli::parse();

    let assistant = match AppConfig::from_env()
        .map_err(|e| e.to_string())
        .and_then(|config| InboxAssistant::new(config).map_err(|e| e.to_string()))
    {
        Ok(assistant) => assistant,
        Err(e) => {
            error!(error = %e, "Failed to create assistant");
            return;
        }
    };
    let state = AppState {
        assistant: Arc::new(Mutex::new(assistant)),
    };

    let listener = match tokio::net::TcpListener::bind(&cli.bind).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(bind = %cli.bind, error = %e, "Failed to bind");
            return;
        }
    };
    info!(bind = %cli.bind, "Dashboard listening");

    if let Err(e) = axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown::wait_for(CtrlCShutdown::new()))
        .await
    {
        error!(error = %e, "Server error");
    }
    info!("Dashboard shut down gracefully");
}
