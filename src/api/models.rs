use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct ScrapeRequest {
    #[serde(default)]
    pub url: String,
}

#[derive(Serialize)]
pub struct ScrapeResponse {
    pub url: String,
    pub title: String,
    pub scraped_at: DateTime<Utc>,
    pub word_count: usize,
}

#[derive(Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub question: String,
}

#[derive(Serialize)]
pub struct AskResponse {
    pub answer: String,
}

#[derive(Serialize)]
pub struct InitializeResponse {
    pub message: &'static str,
}
