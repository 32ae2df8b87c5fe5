// Modular transcription architecture
//
// Transcription backends are created through a factory so alternative
// implementations (e.g. a hosted speech-to-text API) can be added without
// touching the pipeline:
// 1. Create backend-specific structures for parsing its output
// 2. Implement the Transcriber trait
// 3. Add the backend to TranscriberImplementation and the factory

pub mod whisper_cli;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::TranscriberConfig;
use crate::error::Result;

/// Result of transcribing an audio file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    /// Full transcribed text, trimmed
    pub text: String,
    /// Language detected in the audio (ISO code)
    pub language: String,
}

/// Main trait for transcription operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe an audio file, detecting the spoken language
    async fn transcribe(&self, audio_path: &Path) -> Result<Transcript>;

    /// Check that the transcription backend is usable
    fn check_availability(&self) -> Result<()>;
}

/// Transcriber implementation type
#[derive(Debug, Clone)]
pub enum TranscriberImplementation {
    WhisperCli,
}

/// Factory for creating transcriber instances
pub struct TranscriberFactory;

impl TranscriberFactory {
    pub fn create_transcriber(
        implementation: TranscriberImplementation,
        config: TranscriberConfig,
    ) -> Box<dyn Transcriber> {
        match implementation {
            TranscriberImplementation::WhisperCli => {
                Box::new(whisper_cli::WhisperCliTranscriber::new(config))
            }
        }
    }

    pub fn create_default(config: TranscriberConfig) -> Box<dyn Transcriber> {
        Self::create_transcriber(TranscriberImplementation::WhisperCli, config)
    }
}
