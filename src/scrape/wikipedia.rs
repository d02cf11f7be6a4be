//! Wikipedia articles have a stable DOM shape, so instead of the generic
//! largest-block heuristic the body is split into heading-delimited
//! sections, which makes for much better question context.

use once_cell::sync::Lazy;
use scraper::node::Element;
use scraper::{ElementRef, Html, Selector};

use super::visible_text;
use crate::content::ScrapedContent;
use crate::error::{AppError, Result};

static HEADING_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("#firstHeading").expect("Failed to parse heading selector"));

static BODY_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("#mw-content-text div.mw-parser-output")
        .expect("Failed to parse article body selector")
});

/// Navigation aids, edit-section links, citation markers and error boxes
/// carry no article text.
fn is_boilerplate(element: &Element) -> bool {
    element.classes().any(|class| {
        matches!(
            class,
            "mw-jump-link" | "mw-editsection" | "reference" | "error"
        )
    })
}

/// Split an article into sections keyed by its level-2 headings. Everything
/// before the first heading lands in an "Introduction" section; headings
/// with no paragraph or list content under them are dropped.
pub fn extract(html: &str, url: &str) -> Result<ScrapedContent> {
    let document = Html::parse_document(html);

    let title = document
        .select(&HEADING_SELECTOR)
        .next()
        .map(|heading| visible_text(heading, &is_boilerplate).trim().to_string())
        .ok_or_else(|| AppError::ParseError("article heading not found".to_string()))?;

    let body = document
        .select(&BODY_SELECTOR)
        .next()
        .ok_or_else(|| AppError::ParseError("article body not found".to_string()))?;

    let mut sections: Vec<(String, String)> = Vec::new();
    let mut current_section = "Introduction".to_string();
    let mut current_text: Vec<String> = Vec::new();

    for child in body.children().filter_map(ElementRef::wrap) {
        match child.value().name() {
            "h2" => {
                if !current_text.is_empty() {
                    sections.push((current_section, current_text.join(" ")));
                    current_text = Vec::new();
                }
                current_section = visible_text(child, &is_boilerplate).trim().to_string();
            }
            "p" | "ul" | "ol" => {
                let text = visible_text(child, &is_boilerplate).trim().to_string();
                if !text.is_empty() {
                    current_text.push(text);
                }
            }
            _ => {}
        }
    }
    if !current_text.is_empty() {
        sections.push((current_section, current_text.join(" ")));
    }

    let text = sections
        .iter()
        .map(|(_, body)| body.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    Ok(ScrapedContent::success(url, title, text, Some(sections)))
}
