use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::SynthesizeConfig;
use crate::error::{Result, LingodubError};
use super::{Synthesizer, split_for_tts};

/// Synthesizer backed by the Google Translate TTS endpoint (the same one
/// the gTTS Python package uses). No API key required.
pub struct GoogleTtsSynthesizer {
    client: Client,
    config: SynthesizeConfig,
}

impl GoogleTtsSynthesizer {
    pub fn new(config: SynthesizeConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("HTTP client creation should not fail");

        Self { client, config }
    }

    async fn synthesize_chunk(&self, text: &str, language: &str, idx: usize, total: usize) -> Result<Vec<u8>> {
        let url = format!("{}/translate_tts", self.config.endpoint);
        let speed = if self.config.slow { "0.3" } else { "1" };
        let total_param = total.to_string();
        let idx_param = idx.to_string();
        let textlen_param = text.chars().count().to_string();

        debug!("Sending synthesis request {}/{} to: {}", idx + 1, total, url);

        let response = self.client
            .get(&url)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", language),
                ("q", text),
                ("total", total_param.as_str()),
                ("idx", idx_param.as_str()),
                ("textlen", textlen_param.as_str()),
                ("ttsspeed", speed),
            ])
            .send()
            .await
            .map_err(|e| LingodubError::Synthesize(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(LingodubError::Synthesize(format!(
                "TTS API error {} (language '{}' may not be supported for synthesis)",
                status, language
            )));
        }

        let bytes = response.bytes().await
            .map_err(|e| LingodubError::Synthesize(format!("Failed to read audio data: {}", e)))?;

        if bytes.is_empty() {
            return Err(LingodubError::Synthesize("Empty audio response".to_string()));
        }

        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl Synthesizer for GoogleTtsSynthesizer {
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>> {
        if text.trim().is_empty() {
            return Err(LingodubError::Synthesize("nothing to synthesize".to_string()));
        }

        // The endpoint only speaks ~100 characters per request; MP3 frames
        // are self-contained so per-chunk responses concatenate cleanly.
        let chunks = split_for_tts(text, self.config.chunk_limit);
        let total = chunks.len();

        info!("Synthesizing speech in '{}' ({} request{})",
              language, total, if total == 1 { "" } else { "s" });

        let mut audio = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            let bytes = self.synthesize_chunk(chunk, language, idx, total).await?;
            audio.extend_from_slice(&bytes);
        }

        Ok(audio)
    }
}
