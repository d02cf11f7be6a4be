pub mod fetch;
pub mod generic;
pub mod wikipedia;

use ego_tree::NodeRef;
use scraper::node::Element;
use scraper::{ElementRef, Node};
use tracing::{info, warn};
use url::Url;

use crate::content::ScrapedContent;

/// True only for URLs carrying both a scheme and a non-empty host.
pub fn validate_url(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => parsed.host_str().is_some_and(|host| !host.is_empty()),
        Err(_) => false,
    }
}

fn is_wikipedia(url: &str) -> bool {
    Url::parse(url)
        .ok()
        .and_then(|parsed| {
            parsed
                .host_str()
                .map(|host| host.to_ascii_lowercase().contains("wikipedia.org"))
        })
        .unwrap_or(false)
}

/// Run one scrape attempt end to end. Never errors outward: anything that
/// goes wrong becomes a failed record, which the session keeps so the
/// caller can read the reason back.
pub async fn scrape_page(url: &str) -> ScrapedContent {
    if !validate_url(url) {
        return ScrapedContent::failure(url, "Invalid URL format");
    }

    if is_wikipedia(url) {
        info!(%url, "scraping via the Wikipedia extractor");
        let result = match fetch::fetch_direct(url).await {
            Ok(html) => wikipedia::extract(&html, url),
            Err(e) => Err(e),
        };
        result.unwrap_or_else(|e| {
            warn!(%url, error = %e, "Wikipedia scrape failed");
            ScrapedContent::failure(url, format!("Error processing Wikipedia page: {}", e))
        })
    } else {
        info!(%url, "scraping via the generic extractor");
        let result = match fetch::fetch_rendered(url).await {
            Ok(html) => generic::extract(&html, url),
            Err(e) => Err(e),
        };
        result.unwrap_or_else(|e| {
            warn!(%url, error = %e, "generic scrape failed");
            ScrapedContent::failure(url, format!("Error scraping website: {}", e))
        })
    }
}

/// Text of an element and its descendants, with subtrees matching `skip`
/// left out. The scraper DOM is read-only, so boilerplate removal is a walk
/// that declines to descend rather than a mutation.
pub(crate) fn visible_text(el: ElementRef<'_>, skip: &dyn Fn(&Element) -> bool) -> String {
    let mut out = String::new();
    push_visible_text(*el, skip, &mut out);
    out
}

fn push_visible_text(node: NodeRef<'_, Node>, skip: &dyn Fn(&Element) -> bool, out: &mut String) {
    match node.value() {
        Node::Text(text) => out.push_str(text),
        Node::Element(element) => {
            if skip(element) {
                return;
            }
            for child in node.children() {
                push_visible_text(child, skip, out);
            }
        }
        _ => {}
    }
}

/// Whether any ancestor of `el` matches `skip`. Used where elements are
/// picked by selector, since a selector match inside stripped boilerplate
/// must not count.
pub(crate) fn has_skipped_ancestor(el: ElementRef<'_>, skip: &dyn Fn(&Element) -> bool) -> bool {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| skip(ancestor.value()))
}
