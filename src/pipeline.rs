use std::path::{Path, PathBuf};
use std::time::Duration;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::fs;
use tracing::info;

use crate::config::Config;
use crate::error::{Result, LingodubError};
use crate::transcribe::{Transcriber, TranscriberFactory};
use crate::translate::{Translator, TranslatorFactory};
use crate::synthesize::{Synthesizer, SynthesizerFactory};

/// Sequential audio translation pipeline: transcribe, translate, synthesize.
/// Each stage consumes the full output of the previous one.
pub struct Pipeline {
    transcriber: Box<dyn Transcriber>,
    translator: Box<dyn Translator>,
    synthesizer: Box<dyn Synthesizer>,
}

impl Pipeline {
    pub fn new(config: Config) -> Result<Self> {
        let transcriber = TranscriberFactory::create_default(config.transcriber.clone());
        let translator = TranslatorFactory::create_default(config.translate.clone());
        let synthesizer = SynthesizerFactory::create_default(config.synthesize.clone());

        // Fail fast when whisper is not installed
        transcriber.check_availability()?;

        Ok(Self {
            transcriber,
            translator,
            synthesizer,
        })
    }

    /// Assemble a pipeline from explicit stage implementations.
    pub fn from_parts(
        transcriber: Box<dyn Transcriber>,
        translator: Box<dyn Translator>,
        synthesizer: Box<dyn Synthesizer>,
    ) -> Self {
        Self {
            transcriber,
            translator,
            synthesizer,
        }
    }

    /// Run the full pipeline on one audio file. Returns the path of the
    /// translated audio file written next to the input.
    pub async fn run<P: AsRef<Path>>(&self, input_path: P, lang_code: &str) -> Result<PathBuf> {
        let input_path = input_path.as_ref();

        if !input_path.exists() {
            return Err(LingodubError::FileNotFound(input_path.display().to_string()));
        }

        let output_path = output_path(input_path, lang_code)?;
        info!("Processing '{}' -> '{}'", input_path.display(), output_path.display());

        // Step 1: Transcribe
        let spinner = stage_spinner("Transcribing audio...");
        let transcript = self.transcriber.transcribe(input_path).await?;
        spinner.finish_with_message(format!(
            "Transcribed ({} chars, detected language '{}')",
            transcript.text.chars().count(),
            transcript.language
        ));
        info!("Transcript: {}", transcript.text);

        // Step 2: Translate
        let spinner = stage_spinner(format!("Translating to '{}'...", lang_code));
        let translated = self.translator
            .translate(&transcript.text, lang_code, &transcript.language)
            .await?;
        spinner.finish_with_message(format!("Translated ({} chars)", translated.chars().count()));
        info!("Translation: {}", translated);

        // Step 3: Synthesize
        let spinner = stage_spinner("Synthesizing speech...");
        let audio = self.synthesizer.synthesize(&translated, lang_code).await?;
        spinner.finish_with_message(format!("Synthesized {} bytes of audio", audio.len()));

        fs::write(&output_path, &audio).await?;
        info!("Output saved to: {}", output_path.display());

        Ok(output_path)
    }

    /// Transcribe only, returning the transcript.
    pub async fn transcribe<P: AsRef<Path>>(&self, input_path: P) -> Result<crate::transcribe::Transcript> {
        let input_path = input_path.as_ref();
        if !input_path.exists() {
            return Err(LingodubError::FileNotFound(input_path.display().to_string()));
        }
        self.transcriber.transcribe(input_path).await
    }

    /// Translate only.
    pub async fn translate(&self, text: &str, target: &str, source: &str) -> Result<String> {
        self.translator.translate(text, target, source).await
    }

    /// Synthesize only, returning MP3 bytes.
    pub async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>> {
        self.synthesizer.synthesize(text, language).await
    }
}

/// Derive the output path for a translated audio file: the input path with
/// `_translated_<code>` appended to the stem and the extension kept.
pub fn output_path(input_path: &Path, lang_code: &str) -> Result<PathBuf> {
    let stem = input_path
        .file_stem()
        .ok_or_else(|| LingodubError::Config("Invalid input filename".to_string()))?
        .to_string_lossy();

    let extension = input_path
        .extension()
        .map(|e| e.to_string_lossy().to_string())
        .unwrap_or_else(|| "mp3".to_string());

    let filename = format!("{}_translated_{}.{}", stem, lang_code, extension);

    Ok(match input_path.parent() {
        Some(parent) => parent.join(filename),
        None => PathBuf::from(filename),
    })
}

fn stage_spinner(message: impl Into<String>) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
        .unwrap());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(message.into());
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcribe::{MockTranscriber, Transcript};
    use crate::translate::MockTranslator;
    use crate::synthesize::MockSynthesizer;

    #[test]
    fn test_output_path_examples() {
        assert_eq!(
            output_path(Path::new("speech.mp3"), "hi").unwrap(),
            PathBuf::from("speech_translated_hi.mp3")
        );
        assert_eq!(
            output_path(Path::new("clip.mp3"), "fr").unwrap(),
            PathBuf::from("clip_translated_fr.mp3")
        );
    }

    #[test]
    fn test_output_path_keeps_parent() {
        assert_eq!(
            output_path(Path::new("/tmp/audio/story.mp3"), "es").unwrap(),
            PathBuf::from("/tmp/audio/story_translated_es.mp3")
        );
    }

    #[test]
    fn test_output_path_defaults_extension() {
        assert_eq!(
            output_path(Path::new("voicenote"), "de").unwrap(),
            PathBuf::from("voicenote_translated_de.mp3")
        );
    }

    #[test]
    fn test_output_path_never_equals_input() {
        for (input, code) in [("a.mp3", "en"), ("x/y/z.wav", "ja"), ("noext", "fr")] {
            let input = Path::new(input);
            assert_ne!(output_path(input, code).unwrap(), input);
        }
    }

    fn fixed_transcriber(text: &str, language: &str) -> MockTranscriber {
        let transcript = Transcript {
            text: text.to_string(),
            language: language.to_string(),
        };
        let mut mock = MockTranscriber::new();
        mock.expect_transcribe()
            .times(1)
            .returning(move |_| Ok(transcript.clone()));
        mock
    }

    #[tokio::test]
    async fn test_run_chains_stages_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("speech.mp3");
        std::fs::write(&input, b"fake mp3").unwrap();

        let transcriber = fixed_transcriber("hello world", "en");

        let mut translator = MockTranslator::new();
        translator
            .expect_translate()
            .withf(|text, target, source| text == "hello world" && target == "hi" && source == "en")
            .times(1)
            .returning(|_, _, _| Ok("namaste duniya".to_string()));

        let mut synthesizer = MockSynthesizer::new();
        synthesizer
            .expect_synthesize()
            .withf(|text, language| text == "namaste duniya" && language == "hi")
            .times(1)
            .returning(|_, _| Ok(vec![0xff, 0xfb, 0x90]));

        let pipeline = Pipeline::from_parts(
            Box::new(transcriber),
            Box::new(translator),
            Box::new(synthesizer),
        );

        let output = pipeline.run(&input, "hi").await.unwrap();
        assert_eq!(output, dir.path().join("speech_translated_hi.mp3"));
        assert_eq!(std::fs::read(&output).unwrap(), vec![0xff, 0xfb, 0x90]);
        assert!(input.exists());
    }

    #[tokio::test]
    async fn test_run_missing_input_fails_before_transcription() {
        let pipeline = Pipeline::from_parts(
            Box::new(MockTranscriber::new()),
            Box::new(MockTranslator::new()),
            Box::new(MockSynthesizer::new()),
        );

        let result = pipeline.run("no/such/file.mp3", "fr").await;
        assert!(matches!(result, Err(LingodubError::FileNotFound(_))));
    }

    #[tokio::test]
    async fn test_run_translation_failure_skips_synthesis() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("clip.mp3");
        std::fs::write(&input, b"fake mp3").unwrap();

        let transcriber = fixed_transcriber("hello", "en");

        let mut translator = MockTranslator::new();
        translator
            .expect_translate()
            .times(1)
            .returning(|_, _, _| Err(LingodubError::Translate("network unreachable".to_string())));

        // No synthesize expectation: the mock panics if synthesis is reached
        let synthesizer = MockSynthesizer::new();

        let pipeline = Pipeline::from_parts(
            Box::new(transcriber),
            Box::new(translator),
            Box::new(synthesizer),
        );

        let result = pipeline.run(&input, "fr").await;
        assert!(matches!(result, Err(LingodubError::Translate(_))));
        assert!(!dir.path().join("clip_translated_fr.mp3").exists());
    }
}
