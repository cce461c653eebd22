use crate::templates::{build_summary_prompt, SYSTEM_PROMPT};
use scholia_llm::{estimate_tokens, Message};
use scholia_types::{CourseContext, SummaryRecord};

/// Everything sent to the model for one reading. Built fresh per run.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    /// Prior summaries included as context
    pub previous_summaries: usize,
    /// Whether the reading text was cut to the character budget
    pub truncated: bool,
}

impl GenerationRequest {
    pub fn build(
        reading_text: &str,
        context: &CourseContext,
        previous: &[SummaryRecord],
        max_chars: usize,
    ) -> Self {
        let (text, truncated) = truncate_chars(reading_text, max_chars);
        if truncated {
            tracing::warn!(
                max_chars,
                total_chars = reading_text.chars().count(),
                "Reading text exceeds the character budget, truncating"
            );
        }

        Self {
            system_prompt: SYSTEM_PROMPT.to_string(),
            user_prompt: build_summary_prompt(text, context, previous),
            previous_summaries: previous.len(),
            truncated,
        }
    }

    /// Advisory only; nothing enforces it
    pub fn estimated_tokens(&self) -> usize {
        estimate_tokens(&self.system_prompt) + estimate_tokens(&self.user_prompt)
    }

    pub fn to_messages(&self) -> Vec<Message> {
        vec![
            Message::system(self.system_prompt.clone()),
            Message::human(self.user_prompt.clone()),
        ]
    }
}

/// At most `max_chars` characters of `text`, never splitting a character.
pub fn truncate_chars(text: &str, max_chars: usize) -> (&str, bool) {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => (&text[..index], true),
        None => (text, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("abcdef", 3), ("abc", true));
        assert_eq!(truncate_chars("abc", 3), ("abc", false));
        assert_eq!(truncate_chars("éèêë", 2), ("éè", true));
        assert_eq!(truncate_chars("", 0), ("", false));
    }

    #[test]
    fn test_build_request() {
        let ctx = CourseContext::new("/courses/RELG210");
        let text = "word ".repeat(100);
        let request = GenerationRequest::build(&text, &ctx, &[], 20);

        assert!(request.truncated);
        assert_eq!(request.previous_summaries, 0);
        assert!(request.user_prompt.contains("READING TEXT:\nword word word word \n"));
        assert!(!request.user_prompt.contains(&text));

        let messages = request.to_messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role(), "system");
        assert!(request.estimated_tokens() > 0);
    }
}
