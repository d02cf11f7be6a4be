use reqwest::Client;
use serde::Serialize;

use crate::config::LlmConfig;

pub const SYSTEM_PROMPT: &str =
    "You are a helpful assistant that provides accurate, detailed answers based on the given context.";

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
}

/// One chat-completion round trip. This never returns an error: transport
/// and decode failures come back as strings, and the caller surfaces them
/// verbatim as the answer body.
pub async fn complete(cfg: &LlmConfig, system: &str, user: &str) -> String {
    let body = ChatRequest {
        model: &cfg.model,
        messages: vec![
            Message {
                role: "system",
                content: system,
            },
            Message {
                role: "user",
                content: user,
            },
        ],
        temperature: cfg.temperature,
        max_tokens: cfg.max_tokens,
        top_p: cfg.top_p,
    };

    let response = Client::new()
        .post(&cfg.endpoint)
        .bearer_auth(&cfg.api_key)
        .json(&body)
        .send()
        .await
        .and_then(|res| res.error_for_status());

    let response = match response {
        Ok(res) => res,
        Err(e) => return format!("API Error: {}", e),
    };

    let json: serde_json::Value = match response.json().await {
        Ok(json) => json,
        Err(e) => return format!("Error processing request: {}", e),
    };

    match json["choices"][0]["message"]["content"].as_str() {
        Some(content) => content.trim().to_string(),
        None => "Failed to get a response from the API.".to_string(),
    }
}
