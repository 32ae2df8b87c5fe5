use serde::{Deserialize, Serialize};
use std::path::Path;
use crate::error::{Result, LingodubError};

fn default_timeout_secs() -> u64 {
    300
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub transcriber: TranscriberConfig,
    pub translate: TranslateConfig,
    pub synthesize: SynthesizeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriberConfig {
    /// Path to the whisper CLI binary
    pub binary_path: String,
    /// Whisper model to use for transcription
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateConfig {
    /// Translation endpoint base URL
    pub endpoint: String,
    /// Maximum characters per translation request
    pub chunk_limit: usize,
    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesizeConfig {
    /// Speech synthesis endpoint base URL
    pub endpoint: String,
    /// Maximum characters per synthesis request
    pub chunk_limit: usize,
    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Request slower, clearer speech
    pub slow: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            transcriber: TranscriberConfig {
                binary_path: "whisper".to_string(),
                model: "base".to_string(),
            },
            translate: TranslateConfig {
                endpoint: "https://translate.googleapis.com".to_string(),
                // The endpoint rejects requests over 5000 characters
                chunk_limit: 4999,
                timeout_secs: 300,
            },
            synthesize: SynthesizeConfig {
                endpoint: "https://translate.google.com".to_string(),
                // The TTS endpoint truncates text beyond roughly 100 characters
                chunk_limit: 100,
                timeout_secs: 300,
                slow: false,
            },
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| LingodubError::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| LingodubError::Config(format!("Failed to parse config file: {}", e)))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| LingodubError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| LingodubError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_round_trip() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(parsed.transcriber.binary_path, "whisper");
        assert_eq!(parsed.transcriber.model, "base");
        assert_eq!(parsed.translate.chunk_limit, 4999);
        assert_eq!(parsed.synthesize.chunk_limit, 100);
        assert!(!parsed.synthesize.slow);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        Config::default().save_to_file(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.translate.endpoint, "https://translate.googleapis.com");
        assert_eq!(loaded.translate.timeout_secs, 300);
    }

    #[test]
    fn test_from_file_missing() {
        let result = Config::from_file("no_such_config.toml");
        assert!(matches!(result, Err(LingodubError::Config(_))));
    }

    #[test]
    fn test_timeout_defaults_when_omitted() {
        let toml_str = r#"
[transcriber]
binary_path = "whisper"
model = "base"

[translate]
endpoint = "https://translate.googleapis.com"
chunk_limit = 4999

[synthesize]
endpoint = "https://translate.google.com"
chunk_limit = 100
slow = false
"#;
        let parsed: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(parsed.translate.timeout_secs, 300);
        assert_eq!(parsed.synthesize.timeout_secs, 300);
    }
}
