//! Lingodub - Audio Translation Pipeline
//!
//! Converts an MP3 file's spoken content into a translated MP3 by chaining
//! whisper (speech-to-text), Google Translate, and Google TTS, strictly in
//! that order.

pub mod cli;
pub mod config;
pub mod error;
pub mod lang;
pub mod pipeline;
pub mod synthesize;
pub mod transcribe;
pub mod translate;
