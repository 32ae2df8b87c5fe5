use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::TranslateConfig;
use crate::error::{Result, LingodubError};
use super::{Translator, chunk_text};

/// Translator backed by the free Google Translate web endpoint
/// (the same one the deep-translator Python package wraps).
pub struct GoogleTranslator {
    client: Client,
    config: TranslateConfig,
}

impl GoogleTranslator {
    pub fn new(config: TranslateConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("HTTP client creation should not fail");

        Self { client, config }
    }

    async fn translate_chunk(&self, text: &str, target: &str, source: &str) -> Result<String> {
        let url = format!("{}/translate_a/single", self.config.endpoint);

        debug!("Sending translation request to: {}", url);

        let response = self.client
            .get(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", source),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| LingodubError::Translate(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(LingodubError::Translate(format!(
                "Translation API error {}: {}", status, error_text
            )));
        }

        let body: Value = response.json().await
            .map_err(|e| LingodubError::Translate(format!("Failed to parse response: {}", e)))?;

        parse_translation_body(&body)
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str, target: &str, source: &str) -> Result<String> {
        info!("Translating to '{}' (source '{}')", target, source);

        if text.trim().is_empty() {
            return Err(LingodubError::Translate("nothing to translate".to_string()));
        }

        // The endpoint rejects requests over the character limit, so long
        // texts go through in sequential chunks.
        let chunks = chunk_text(text, self.config.chunk_limit);
        let mut translated = Vec::with_capacity(chunks.len());

        for (idx, chunk) in chunks.iter().enumerate() {
            debug!("Translating chunk {}/{}", idx + 1, chunks.len());
            translated.push(self.translate_chunk(chunk, target, source).await?);
        }

        Ok(translated.join(" "))
    }
}

/// Extract the translated text from the endpoint's response body.
///
/// The body is a JSON array whose first element is an array of
/// `[translated_sentence, source_sentence, ...]` entries.
fn parse_translation_body(body: &Value) -> Result<String> {
    let sentences = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| LingodubError::Translate("Unexpected response shape".to_string()))?;

    let mut result = String::new();
    for sentence in sentences {
        if let Some(part) = sentence.get(0).and_then(Value::as_str) {
            result.push_str(part);
        }
    }

    let result = result.trim().to_string();
    if result.is_empty() {
        return Err(LingodubError::Translate("Empty translation received".to_string()));
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_translation_body() {
        let body = json!([
            [
                ["Hola, ", "Hello, ", null, null, 10],
                ["mundo.", "world.", null, null, 10]
            ],
            null,
            "en"
        ]);

        assert_eq!(parse_translation_body(&body).unwrap(), "Hola, mundo.");
    }

    #[test]
    fn test_parse_translation_body_skips_null_entries() {
        let body = json!([
            [
                ["Bonjour", "Hello", null, null, 10],
                [null, null, "extra"]
            ]
        ]);

        assert_eq!(parse_translation_body(&body).unwrap(), "Bonjour");
    }

    #[test]
    fn test_parse_translation_body_unexpected_shape() {
        let body = json!({"error": "nope"});
        assert!(matches!(
            parse_translation_body(&body),
            Err(LingodubError::Translate(_))
        ));
    }

    #[test]
    fn test_parse_translation_body_empty() {
        let body = json!([[]]);
        assert!(matches!(
            parse_translation_body(&body),
            Err(LingodubError::Translate(_))
        ));
    }
}
