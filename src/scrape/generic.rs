//! Arbitrary sites have no stable structure, so the heuristic is to strip
//! known boilerplate and take the candidate container with the most visible
//! text, falling back to the whole body.

use once_cell::sync::Lazy;
use scraper::node::Element;
use scraper::{ElementRef, Html, Selector};

use super::{has_skipped_ancestor, visible_text};
use crate::content::ScrapedContent;
use crate::error::Result;

static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("title").expect("Failed to parse title selector"));

static BODY_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("body").expect("Failed to parse body selector"));

/// Candidate content containers, in scoring order.
static CANDIDATE_SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    ["main", "article", r#"[class*="content"]"#, r#"[class*="article"]"#]
        .iter()
        .map(|s| Selector::parse(s).expect("Failed to parse candidate selector"))
        .collect()
});

static BLOCK_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("p, h1, h2, h3, ul, ol").expect("Failed to parse block selector")
});

fn is_boilerplate(element: &Element) -> bool {
    matches!(
        element.name(),
        "script" | "style" | "nav" | "footer" | "header"
    )
}

/// Flatten the most plausible content block of a rendered page. Finding no
/// content at all is still a success, just an empty one; only a document
/// that cannot be processed at all fails upstream.
pub fn extract(html: &str, url: &str) -> Result<ScrapedContent> {
    let document = Html::parse_document(html);

    let title = document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    let mut best: Option<(ElementRef, usize)> = None;
    for selector in CANDIDATE_SELECTORS.iter() {
        for candidate in document.select(selector) {
            if is_boilerplate(candidate.value())
                || has_skipped_ancestor(candidate, &is_boilerplate)
            {
                continue;
            }
            let length = visible_text(candidate, &is_boilerplate).len();
            // Strictly greater, so the first candidate wins ties.
            if best.map_or(true, |(_, best_length)| length > best_length) {
                best = Some((candidate, length));
            }
        }
    }

    let content = best
        .map(|(el, _)| el)
        .or_else(|| document.select(&BODY_SELECTOR).next());

    let text = match content {
        Some(el) => el
            .select(&BLOCK_SELECTOR)
            .filter(|block| !has_skipped_ancestor(*block, &is_boilerplate))
            .map(|block| visible_text(block, &is_boilerplate).trim().to_string())
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" "),
        None => String::new(),
    };

    Ok(ScrapedContent::success(url, title, text, None))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_URL: &str = "https://example.com/page";

    #[test]
    fn longest_candidate_wins() {
        let long_text = "long ".repeat(200);
        let html = format!(
            r#"<html><head><title>Two Articles</title></head><body>
            <article><p>short one</p></article>
            <article><p>{}</p></article>
            </body></html>"#,
            long_text
        );
        let content = extract(&html, PAGE_URL).unwrap();

        assert!(content.status);
        assert_eq!(content.title, "Two Articles");
        assert_eq!(content.text, long_text.trim());
        assert!(content.sections.is_none());
    }

    #[test]
    fn class_substring_marks_a_candidate() {
        let html = r#"<html><body>
            <div class="sidebar"><p>sidebar junk that is much longer than the content</p></div>
            <div class="main-content"><p>the real thing</p><h2>Heading</h2></div>
            </body></html>"#;
        let content = extract(html, PAGE_URL).unwrap();

        assert_eq!(content.text, "the real thing Heading");
    }

    #[test]
    fn body_is_the_fallback_when_no_candidate_matches() {
        let html = r#"<html><body><div><p>plain page</p></div></body></html>"#;
        let content = extract(html, PAGE_URL).unwrap();

        assert_eq!(content.text, "plain page");
        assert!(content.title.is_empty());
    }

    #[test]
    fn boilerplate_is_invisible_to_scoring_and_extraction() {
        let html = r#"<html><body>
            <nav><p>menu menu menu menu menu menu menu menu</p></nav>
            <main><p>content<script>var x = "not text";</script></p></main>
            <footer><p>copyright</p></footer>
            </body></html>"#;
        let content = extract(html, PAGE_URL).unwrap();

        assert_eq!(content.text, "content");
    }

    #[test]
    fn page_with_no_block_elements_is_an_empty_success() {
        let html = r#"<html><body><div><span>inline only</span></div></body></html>"#;
        let content = extract(html, PAGE_URL).unwrap();

        assert!(content.status);
        assert!(content.text.is_empty());
        assert!(content.error.is_empty());
    }
}
