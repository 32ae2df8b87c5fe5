// Modular translation architecture
//
// Translation backends are created through a factory: currently only the
// free Google Translate endpoint is implemented.

pub mod google;

use async_trait::async_trait;

use crate::config::TranslateConfig;
use crate::error::Result;

/// Main trait for translation operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate text into the target language. `source` is an ISO code
    /// or "auto" for server-side detection.
    async fn translate(&self, text: &str, target: &str, source: &str) -> Result<String>;
}

/// Factory for creating translator instances
pub struct TranslatorFactory;

impl TranslatorFactory {
    pub fn create_default(config: TranslateConfig) -> Box<dyn Translator> {
        Box::new(google::GoogleTranslator::new(config))
    }
}

/// Split text into chunks of at most `limit` characters, preferring
/// whitespace boundaries. Words longer than the limit are hard-split.
pub(crate) fn chunk_text(text: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > limit {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let word_chars: Vec<char> = word.chars().collect();
            for piece in word_chars.chunks(limit) {
                chunks.push(piece.iter().collect());
            }
            continue;
        }

        let needed = if current.is_empty() { word_len } else { word_len + 1 };
        if current_len + needed > limit {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}
