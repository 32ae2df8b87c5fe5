//! Lingodub - Audio Translation Pipeline
//!
//! Main entry point: transcribes an MP3 file with whisper, translates the
//! transcript with Google Translate, and synthesizes a translated MP3 with
//! Google TTS.

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tracing_appender::{non_blocking, rolling};

use lingodub::cli::{Args, Commands};
use lingodub::config::Config;
use lingodub::error::LingodubError;
use lingodub::lang;
use lingodub::pipeline::Pipeline;
use lingodub::transcribe::TranscriberFactory;
use lingodub::translate::TranslatorFactory;
use lingodub::synthesize::SynthesizerFactory;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Setup logging to both console and file
    setup_logging(args.verbose)?;

    // Load configuration
    let config = match &args.config {
        Some(config_path) => Config::from_file(config_path)?,
        None => {
            // Try to load config.toml from current directory first
            if std::path::Path::new("config.toml").exists() {
                info!("Found config.toml in current directory, loading...");
                Config::from_file("config.toml")?
            } else {
                Config::default()
            }
        }
    };

    match args.command {
        Some(Commands::Languages) => {
            println!("{}", lang::render_table());
        }
        Some(Commands::Transcribe { input, output }) => {
            info!("Transcribing audio: {}", input.display());

            if !input.exists() {
                return Err(LingodubError::FileNotFound(input.display().to_string()).into());
            }

            let transcriber = TranscriberFactory::create_default(config.transcriber.clone());
            transcriber.check_availability()?;

            let transcript = transcriber.transcribe(&input).await?;
            info!("Detected source language: {}", transcript.language);

            match output {
                Some(path) => {
                    tokio::fs::write(&path, &transcript.text).await?;
                    println!("Transcript saved to: {}", path.display());
                }
                None => println!("{}", transcript.text),
            }
        }
        Some(Commands::Translate { input, language, output }) => {
            info!("Translating text file: {}", input.display());

            let lang_code = lang::resolve(&language)?;
            let text = tokio::fs::read_to_string(&input).await
                .map_err(|e| LingodubError::FileNotFound(format!("{}: {}", input.display(), e)))?;

            let translator = TranslatorFactory::create_default(config.translate.clone());
            let translated = translator.translate(&text, &lang_code, "auto").await?;

            match output {
                Some(path) => {
                    tokio::fs::write(&path, &translated).await?;
                    println!("Translation saved to: {}", path.display());
                }
                None => println!("{}", translated),
            }
        }
        Some(Commands::Synthesize { input, language, output }) => {
            info!("Synthesizing speech from: {}", input.display());

            let lang_code = lang::resolve(&language)?;
            let text = tokio::fs::read_to_string(&input).await
                .map_err(|e| LingodubError::FileNotFound(format!("{}: {}", input.display(), e)))?;

            let synthesizer = SynthesizerFactory::create_default(config.synthesize.clone());
            let audio = synthesizer.synthesize(&text, &lang_code).await?;

            tokio::fs::write(&output, &audio).await?;
            println!("Audio saved to: {}", output.display());
        }
        None => {
            // Full pipeline: transcribe, translate, synthesize
            let input = args.input.ok_or_else(|| {
                LingodubError::Config("--input <path> is required (or use a subcommand, see --help)".to_string())
            })?;

            if !input.exists() {
                return Err(LingodubError::FileNotFound(input.display().to_string()).into());
            }

            let lang_code = match args.language {
                Some(language) => lang::resolve(&language)?,
                None => lang::prompt()?,
            };

            info!("Target language code: {}", lang_code);

            let pipeline = Pipeline::new(config)?;
            let output_path = pipeline.run(&input, &lang_code).await?;

            println!("Output saved to: {}", output_path.display());
        }
    }

    Ok(())
}

/// Setup logging to both console and file
fn setup_logging(verbose: bool) -> Result<()> {
    // Create log directory
    let app_dir = std::env::current_dir()?.join(".lingodub");
    let log_dir = app_dir.join("log");
    std::fs::create_dir_all(&log_dir)?;

    // Set up file appender with daily rotation
    let file_appender = rolling::daily(&log_dir, "lingodub.log");
    let (non_blocking_file, _guard) = non_blocking(file_appender);
    // Keep the guard alive for the duration of the program
    std::mem::forget(_guard);

    // Determine log level
    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    // Create console layer
    let console_layer = fmt::layer()
        .with_target(false);

    // Create file layer
    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false); // No ANSI colors in file

    // Setup layered subscriber
    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(console_layer)
        .with(file_layer);

    // Initialize the subscriber
    subscriber.try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
