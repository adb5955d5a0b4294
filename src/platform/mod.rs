//! Speech platform seams
//!
//! The core never talks to a concrete speech service. Recognition and
//! synthesis are reached through the traits below, and a backend that is
//! missing on this platform is represented by `None` at construction.

use std::sync::Arc;
use thiserror::Error;

use crate::data::SpeechBackend;

pub mod console;
pub mod mock;

pub use console::{ConsoleMicrophone, ConsoleRecognizer, ConsoleSynthesizer};

/// One hypothesis in a recognition event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionResult {
    pub transcript: String,
    pub is_final: bool,
}

impl RecognitionResult {
    pub fn final_text(transcript: impl Into<String>) -> Self {
        Self {
            transcript: transcript.into(),
            is_final: true,
        }
    }

    pub fn interim_text(transcript: impl Into<String>) -> Self {
        Self {
            transcript: transcript.into(),
            is_final: false,
        }
    }
}

/// Events a live recognition connection emits
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionEvent {
    /// Accumulated results so far; the last entry is the newest
    Results(Vec<RecognitionResult>),
    /// The connection closed, whether asked to or not
    Ended,
    /// The connection reported a failure; an `Ended` usually follows
    Failed(RecognitionError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecognitionError {
    #[error("microphone permission denied")]
    PermissionDenied,

    #[error("no speech detected")]
    NoSpeech,

    #[error("network error: {0}")]
    Network(String),

    #[error("recognition aborted")]
    Aborted,

    #[error("platform error: {0}")]
    Platform(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SynthesisError {
    #[error("synthesis interrupted")]
    Interrupted,

    #[error("synthesis failed: {0}")]
    Failed(String),
}

/// Receiver for recognition events, handed to the recognizer on start
pub type RecognitionSink = Arc<dyn Fn(RecognitionEvent) + Send + Sync + 'static>;

/// Platform speech-to-text service
pub trait SpeechRecognizer: Send {
    /// Open a continuous recognition connection. Events flow into `sink`
    /// until the connection ends.
    fn start(&mut self, locale: &str, sink: RecognitionSink) -> Result<(), RecognitionError>;
    /// Ask the open connection to close. An `Ended` event follows later.
    fn stop(&mut self);
}

/// A single synthesis request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    pub text: String,
    pub locale: String,
}

/// Platform text-to-speech service
pub trait SpeechSynthesizer: Send {
    /// True while an utterance is queued or audible
    fn is_pending(&self) -> bool;
    /// Drop everything queued or playing
    fn cancel(&mut self);
    /// Queue an utterance
    fn speak(&mut self, utterance: &Utterance) -> Result<(), SynthesisError>;
}

/// Factory for the configured speech backends
pub struct PlatformFactory;

impl PlatformFactory {
    pub fn create_recognizer(
        backend: SpeechBackend,
        microphone: &ConsoleMicrophone,
    ) -> Option<Box<dyn SpeechRecognizer>> {
        match backend {
            SpeechBackend::Console => Some(Box::new(microphone.recognizer())),
            SpeechBackend::None => None,
        }
    }

    pub fn create_synthesizer(backend: SpeechBackend) -> Option<Box<dyn SpeechSynthesizer>> {
        match backend {
            SpeechBackend::Console => Some(Box::new(ConsoleSynthesizer::new())),
            SpeechBackend::None => None,
        }
    }
}
