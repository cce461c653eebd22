use std::sync::OnceLock;
use tiktoken_rs::{cl100k_base, CoreBPE};

static BPE: OnceLock<Option<CoreBPE>> = OnceLock::new();

/// Advisory token count for `text`.
///
/// Uses the cl100k tokenizer; falls back to ~4 characters per token if the
/// tokenizer cannot be loaded.
pub fn estimate_tokens(text: &str) -> usize {
    let bpe = BPE.get_or_init(|| match cl100k_base() {
        Ok(bpe) => Some(bpe),
        Err(e) => {
            tracing::debug!("Tokenizer unavailable, using length heuristic: {}", e);
            None
        }
    });

    match bpe {
        Some(bpe) => bpe.encode_with_special_tokens(text).len(),
        None => text.chars().count() / 4,
    }
}
