use crate::config::LlmConfig;
use crate::content::ScrapedContent;
use crate::llm;

/// Longest context, in characters, forwarded to the model.
pub const CONTEXT_BUDGET: usize = 15_000;

/// Returned when there is nothing (or nothing usable) to answer against.
pub const SCRAPE_FIRST: &str = "Please scrape a website first using 'scrape:<URL>'";

/// Cap the stored text at the context budget, marking the cut with an
/// ellipsis.
pub fn build_context(text: &str) -> String {
    if text.chars().count() > CONTEXT_BUDGET {
        let mut context: String = text.chars().take(CONTEXT_BUDGET).collect();
        context.push_str("...");
        context
    } else {
        text.to_string()
    }
}

pub fn build_prompt(context: &str, question: &str) -> String {
    let mut prompt = String::with_capacity(context.len() + question.len() + 300);
    prompt.push_str(
        "Using the following context, please answer the question. If the answer cannot be found in the context, say so.\n\nContext: ",
    );
    prompt.push_str(context);
    prompt.push_str("\n\nQuestion: ");
    prompt.push_str(question);
    prompt.push_str(
        "\n\nPlease provide a detailed, accurate answer based on the context provided. If multiple relevant pieces of information exist, synthesize them into a coherent response.",
    );
    prompt
}

/// Answer a question against the current scrape record. Requires a
/// successful scrape; LLM-side failures come back as the answer string,
/// exactly as the client reports them.
pub async fn answer_question(
    cfg: &LlmConfig,
    current: Option<&ScrapedContent>,
    question: &str,
) -> String {
    let content = match current {
        Some(content) if content.status => content,
        _ => return SCRAPE_FIRST.to_string(),
    };

    let context = build_context(&content.text);
    let prompt = build_prompt(&context, question);
    llm::complete(cfg, llm::SYSTEM_PROMPT, &prompt).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dead_end_config() -> LlmConfig {
        // Points nowhere on purpose: tests that reach the client would
        // surface an "API Error:" string instead of the expected value.
        LlmConfig {
            endpoint: "http://127.0.0.1:1/v1/chat/completions".to_string(),
            api_key: "unused".to_string(),
            model: "unused".to_string(),
            temperature: 0.3,
            max_tokens: 1000,
            top_p: 0.9,
        }
    }

    #[test]
    fn short_context_passes_through_unchanged() {
        let text = "a".repeat(100);
        assert_eq!(build_context(&text), text);
    }

    #[test]
    fn long_context_is_cut_at_the_budget() {
        let text = "a".repeat(20_000);
        let context = build_context(&text);
        assert_eq!(context.chars().count(), CONTEXT_BUDGET + 3);
        assert!(context.ends_with("..."));
        assert_eq!(&context[..CONTEXT_BUDGET], &text[..CONTEXT_BUDGET]);
    }

    #[test]
    fn prompt_embeds_context_and_question() {
        let prompt = build_prompt("some page text", "what is this?");
        assert!(prompt.contains("Context: some page text"));
        assert!(prompt.contains("Question: what is this?"));
    }

    #[tokio::test]
    async fn no_record_short_circuits() {
        let answer = answer_question(&dead_end_config(), None, "anything").await;
        assert_eq!(answer, SCRAPE_FIRST);
    }

    #[tokio::test]
    async fn failed_record_short_circuits() {
        let failed = crate::content::ScrapedContent::failure("https://example.com", "boom");
        let answer = answer_question(&dead_end_config(), Some(&failed), "anything").await;
        assert_eq!(answer, SCRAPE_FIRST);
    }
}
