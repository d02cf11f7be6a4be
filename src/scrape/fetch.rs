use std::ffi::OsStr;
use std::time::Duration;

use headless_chrome::{Browser, LaunchOptions};
use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder};
use tracing::debug;

use crate::error::{AppError, Result};

/// Desktop-browser identity used on both fetch paths; some sites refuse
/// the default library User-Agent outright.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

// Shared client so connections get reused across requests
static CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .user_agent(USER_AGENT)
        .timeout(FETCH_TIMEOUT)
        .connect_timeout(Duration::from_secs(5))
        .pool_max_idle_per_host(10)
        .build()
        .expect("Failed to build HTTP client")
});

/// Plain GET for pages that render server side. Non-2xx statuses are
/// failures.
pub async fn fetch_direct(url: &str) -> Result<String> {
    let response = CLIENT.get(url).send().await?.error_for_status()?;
    let html = response.text().await?;
    Ok(html)
}

/// Fetch the DOM as a headless browser sees it after client-side scripts
/// run. The browser API is synchronous, so the whole render happens on a
/// blocking task.
pub async fn fetch_rendered(url: &str) -> Result<String> {
    let url = url.to_string();
    tokio::task::spawn_blocking(move || render_page(&url))
        .await
        .map_err(|e| AppError::FetchError(format!("Browser task failed: {}", e)))?
}

// The chromium process dies with the `Browser` value, on error paths too.
fn render_page(url: &str) -> Result<String> {
    let options = LaunchOptions::default_builder()
        .headless(true)
        .sandbox(false)
        .args(vec![
            OsStr::new("--disable-gpu"),
            OsStr::new("--disable-dev-shm-usage"),
        ])
        .build()
        .map_err(|e| AppError::FetchError(format!("Failed to configure browser: {}", e)))?;

    let browser = Browser::new(options)
        .map_err(|e| AppError::FetchError(format!("Failed to launch browser: {}", e)))?;
    let tab = browser
        .new_tab()
        .map_err(|e| AppError::FetchError(format!("Failed to open tab: {}", e)))?;
    let _ = tab.set_user_agent(USER_AGENT, None, None);

    tab.navigate_to(url)
        .map_err(|e| AppError::FetchError(format!("Failed to navigate to {}: {}", url, e)))?;
    tab.wait_until_navigated()
        .map_err(|e| AppError::FetchError(format!("Navigation to {} did not settle: {}", url, e)))?;

    let html = tab
        .get_content()
        .map_err(|e| AppError::FetchError(format!("Failed to read rendered page: {}", e)))?;
    debug!(chars = html.len(), "captured rendered DOM");
    Ok(html)
}
