//! Prompt template for answer synthesis.

use rag_shared::ScoredDocument;

/// Fixed template the retrieved context and question are injected into.
const PROMPT_TEMPLATE: &str = "If the context is not relevant, please answer the question by \
using your own knowledge about the topic. If you don't know the answer, just say that you \
don't know, don't try to make up an answer. don't include harmful content

{context}

Question: {input}
Answer:";

/// Render the prompt for the given retrieved documents and question.
pub fn render(context: &[ScoredDocument], question: &str) -> String {
    let context_block = context
        .iter()
        .map(|doc| doc.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    PROMPT_TEMPLATE
        .replace("{context}", &context_block)
        .replace("{input}", question)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(text: &str) -> ScoredDocument {
        ScoredDocument {
            text: text.to_string(),
            score: 1.0,
        }
    }

    #[test]
    fn test_render_contains_context_and_question() {
        let prompt = render(
            &[doc("Life insurance covers people."), doc("Car insurance covers cars.")],
            "Can we combine life and car insurance?",
        );

        assert!(prompt.contains("Life insurance covers people."));
        assert!(prompt.contains("Car insurance covers cars."));
        assert!(prompt.contains("Question: Can we combine life and car insurance?"));
        assert!(prompt.ends_with("Answer:"));
    }

    #[test]
    fn test_render_with_no_context() {
        let prompt = render(&[], "What is RAG?");

        assert!(prompt.contains("Question: What is RAG?"));
        assert!(!prompt.contains("{context}"));
    }
}
