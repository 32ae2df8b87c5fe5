use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

use crate::config::TranscriberConfig;
use crate::error::{Result, LingodubError};
use super::{Transcriber, Transcript};

/// Whisper CLI JSON output format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhisperOutput {
    pub text: String,
    pub language: Option<String>,
    #[serde(default)]
    pub segments: Vec<WhisperSegment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhisperSegment {
    pub id: u64,
    pub start: f64,
    pub end: f64,
    pub text: String,
}

/// Transcriber backed by the openai-whisper command line tool.
///
/// Runs the model locally; the first run downloads the model weights.
pub struct WhisperCliTranscriber {
    config: TranscriberConfig,
}

impl WhisperCliTranscriber {
    pub fn new(config: TranscriberConfig) -> Self {
        Self { config }
    }

    fn parse_output(json_content: &str) -> Result<Transcript> {
        let output: WhisperOutput = serde_json::from_str(json_content)
            .map_err(|e| LingodubError::Transcribe(format!("Failed to parse whisper JSON: {}", e)))?;

        let text = output.text.trim().to_string();
        if text.is_empty() {
            return Err(LingodubError::Transcribe(
                "whisper returned an empty transcript".to_string(),
            ));
        }

        Ok(Transcript {
            text,
            language: output.language.unwrap_or_else(|| "en".to_string()),
        })
    }
}

#[async_trait]
impl Transcriber for WhisperCliTranscriber {
    async fn transcribe(&self, audio_path: &Path) -> Result<Transcript> {
        info!("Transcribing '{}' with whisper model '{}'",
              audio_path.display(), self.config.model);

        let temp_dir = tempfile::tempdir()
            .map_err(|e| LingodubError::Transcribe(format!("Failed to create temp directory: {}", e)))?;
        let output_dir = temp_dir.path();

        let output = Command::new(&self.config.binary_path)
            .arg(audio_path)
            .arg("--model").arg(&self.config.model)
            .arg("--output_dir").arg(output_dir)
            .arg("--output_format").arg("json")
            .output()
            .map_err(|e| LingodubError::Transcribe(format!("Failed to execute whisper: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(LingodubError::Transcribe(format!("Whisper failed: {}", stderr)));
        }

        let audio_stem = audio_path.file_stem()
            .ok_or_else(|| LingodubError::Transcribe("Invalid audio filename".to_string()))?;
        let json_file = output_dir.join(format!("{}.json", audio_stem.to_string_lossy()));

        debug!("Reading whisper output from {}", json_file.display());
        let json_content = std::fs::read_to_string(&json_file)
            .map_err(|e| LingodubError::Transcribe(format!("Failed to read whisper output: {}", e)))?;

        Self::parse_output(&json_content)
    }

    fn check_availability(&self) -> Result<()> {
        let output = Command::new(&self.config.binary_path)
            .arg("--help")
            .output()
            .map_err(|e| LingodubError::Transcribe(format!(
                "whisper binary '{}' not found: {} (install with: pip install openai-whisper)",
                self.config.binary_path, e
            )))?;

        if output.status.success() {
            info!("Whisper binary is available");
            Ok(())
        } else {
            Err(LingodubError::Transcribe(
                "whisper binary check failed".to_string(),
            ))
        }
    }
}
