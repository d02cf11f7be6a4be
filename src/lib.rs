pub mod api;
pub mod config;
pub mod content;
pub mod error;
pub mod llm;
pub mod qa;
pub mod scrape;

use std::sync::{Arc, Mutex};

use config::Config;
use content::Session;

/// Application state shared across handlers: the configuration and the
/// single session slot holding the most recent scrape.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub session: Arc<Mutex<Session>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        AppState {
            config: Arc::new(config),
            session: Arc::new(Mutex::new(Session::new())),
        }
    }
}
