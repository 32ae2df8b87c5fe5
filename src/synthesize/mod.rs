// Modular speech synthesis architecture
//
// Synthesis backends are created through a factory: currently only the
// Google Translate TTS endpoint is implemented.

pub mod google_tts;

use async_trait::async_trait;

use crate::config::SynthesizeConfig;
use crate::error::Result;

/// Main trait for speech synthesis operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Synthesizer: Send + Sync {
    /// Convert text to speech in the given language, returning MP3 bytes
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>>;
}

/// Factory for creating synthesizer instances
pub struct SynthesizerFactory;

impl SynthesizerFactory {
    pub fn create_default(config: SynthesizeConfig) -> Box<dyn Synthesizer> {
        Box::new(google_tts::GoogleTtsSynthesizer::new(config))
    }
}

/// Split text into speakable chunks of at most `limit` characters.
///
/// Prefers cutting after sentence punctuation, then at whitespace, and
/// only hard-cuts when a single run of characters exceeds the limit.
pub(crate) fn split_for_tts(text: &str, limit: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut chunks = Vec::new();
    let mut start = 0usize;

    while start < chars.len() {
        while start < chars.len() && chars[start].is_whitespace() {
            start += 1;
        }
        if start >= chars.len() {
            break;
        }

        let window_end = (start + limit).min(chars.len());
        let end = if window_end == chars.len() {
            window_end
        } else {
            let window = &chars[start..window_end];
            let cut = window
                .iter()
                .rposition(|c| matches!(c, '.' | '!' | '?' | ';' | ':' | ','))
                .map(|p| p + 1)
                .or_else(|| window.iter().rposition(|c| c.is_whitespace()))
                .unwrap_or(limit);
            start + cut.max(1)
        };

        let chunk: String = chars[start..end].iter().collect();
        let chunk = chunk.trim().to_string();
        if !chunk.is_empty() {
            chunks.push(chunk);
        }
        start = end;
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_short_text_single_chunk() {
        assert_eq!(split_for_tts("Hello world.", 100), vec!["Hello world."]);
    }

    #[test]
    fn test_split_respects_limit() {
        let text = "This is the first sentence. This is the second one! And a third?";
        let chunks = split_for_tts(text, 30);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 30, "chunk too long: {:?}", chunk);
        }
    }

    #[test]
    fn test_split_prefers_sentence_punctuation() {
        let chunks = split_for_tts("One two. Three four five six seven", 15);
        assert_eq!(chunks[0], "One two.");
    }

    #[test]
    fn test_split_falls_back_to_whitespace() {
        let chunks = split_for_tts("alpha beta gamma delta", 12);
        assert_eq!(chunks[0], "alpha beta");
    }

    #[test]
    fn test_split_hard_cuts_unbreakable_runs() {
        let chunks = split_for_tts("abcdefghijklmnop", 5);
        assert_eq!(chunks, vec!["abcde", "fghij", "klmno", "p"]);
    }

    #[test]
    fn test_split_empty() {
        assert!(split_for_tts("", 10).is_empty());
        assert!(split_for_tts("   ", 10).is_empty());
    }
}
