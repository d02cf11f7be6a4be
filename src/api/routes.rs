use axum::{
    Router,
    extract::{Json, State},
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::api::models::{
    AskRequest, AskResponse, InitializeResponse, ScrapeRequest, ScrapeResponse,
};
use crate::api::response;
use crate::error::{AppError, Result};
use crate::{AppState, qa, scrape};

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/initialize", get(initialize_handler))
        .route("/api/scrape", post(scrape_handler))
        .route("/api/ask", post(ask_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

/// Reset the session to empty. Safe to call any number of times.
async fn initialize_handler(State(state): State<AppState>) -> impl IntoResponse {
    state.session.lock().unwrap().clear();
    info!("session initialized");
    response::success(InitializeResponse {
        message: "Chatbot initialized successfully",
    })
}

async fn scrape_handler(
    State(state): State<AppState>,
    Json(req): Json<ScrapeRequest>,
) -> Result<impl IntoResponse> {
    if req.url.trim().is_empty() {
        return Err(AppError::BadRequest("URL is required".to_string()));
    }

    info!(url = %req.url, "scrape requested");
    let content = scrape::scrape_page(&req.url).await;

    // Failed attempts land in the session too, so the record stays
    // inspectable until the next scrape.
    state.session.lock().unwrap().store(content.clone());

    if !content.status {
        return Err(AppError::ScrapeFailed(content.error));
    }

    let word_count = content.text.split_whitespace().count();
    Ok(response::success(ScrapeResponse {
        url: content.url,
        title: content.title,
        scraped_at: content.timestamp.unwrap_or_else(Utc::now),
        word_count,
    }))
}

async fn ask_handler(
    State(state): State<AppState>,
    Json(req): Json<AskRequest>,
) -> Result<impl IntoResponse> {
    if req.question.trim().is_empty() {
        return Err(AppError::BadRequest("Question is required".to_string()));
    }

    let current = state.session.lock().unwrap().snapshot();
    let content = match &current {
        Some(content) if content.status => content,
        _ => return Err(AppError::NothingScraped),
    };

    info!(url = %content.url, "answering question");
    let answer = qa::answer_question(&state.config.llm, Some(content), &req.question).await;
    Ok(response::success(AskResponse { answer }))
}
