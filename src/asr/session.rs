//! Speech input session
//!
//! Keeps one continuous recognition connection open for as long as voice
//! navigation is enabled. A connection that ends on its own is reopened
//! straight away. Failures are logged and leave the session in `Error`.

use std::sync::Arc;

use crate::platform::{RecognitionEvent, RecognitionSink, SpeechRecognizer};

/// Receives events tagged with the connection that produced them
pub type SessionSink = Arc<dyn Fn(u64, RecognitionEvent) + Send + Sync + 'static>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    Listening,
    Error,
    Unsupported,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Listening => "listening",
            Self::Error => "error",
            Self::Unsupported => "unsupported",
        }
    }
}

pub struct SpeechInputSession {
    recognizer: Option<Box<dyn SpeechRecognizer>>,
    sink: SessionSink,
    locale: String,
    status: SessionStatus,
    enabled: bool,
    live: bool,
    connection: u64,
    restarts: u64,
}

impl SpeechInputSession {
    /// `None` means the platform has no recognition service.
    pub fn new(recognizer: Option<Box<dyn SpeechRecognizer>>, sink: SessionSink) -> Self {
        let status = if recognizer.is_some() {
            SessionStatus::Idle
        } else {
            SessionStatus::Unsupported
        };
        Self {
            recognizer,
            sink,
            locale: String::new(),
            status,
            enabled: false,
            live: false,
            connection: 0,
            restarts: 0,
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Connection id the session currently accepts events from
    pub fn connection(&self) -> u64 {
        self.connection
    }

    /// How many times a connection was reopened after ending
    pub fn restarts(&self) -> u64 {
        self.restarts
    }

    /// Turn voice navigation on and open a connection if none is live
    pub fn enable(&mut self, locale: &str) {
        if self.status == SessionStatus::Unsupported {
            tracing::debug!("Speech recognition unsupported, ignoring enable");
            return;
        }
        self.enabled = true;
        self.locale = locale.to_string();
        if self.live {
            return;
        }
        self.open_connection();
    }

    /// Turn voice navigation off. The flag is cleared before the stop call
    /// so an `Ended` delivered afterwards cannot reopen the connection.
    pub fn disable(&mut self) {
        self.enabled = false;
        if self.status == SessionStatus::Unsupported {
            return;
        }
        if self.live {
            if let Some(recognizer) = self.recognizer.as_mut() {
                recognizer.stop();
            }
            self.live = false;
        }
        self.status = SessionStatus::Idle;
        tracing::info!("Voice navigation disabled");
    }

    /// Process one platform event. Returns the transcript to interpret, if any.
    pub fn handle_event(&mut self, connection: u64, event: RecognitionEvent) -> Option<String> {
        if connection != self.connection {
            tracing::trace!(
                "Ignoring event from stale connection #{} (current #{})",
                connection,
                self.connection
            );
            return None;
        }

        match event {
            RecognitionEvent::Results(results) => {
                if !self.enabled || !self.live {
                    return None;
                }
                let latest = results.into_iter().last()?;
                if !latest.is_final {
                    tracing::trace!("[INTERIM] {}", latest.transcript);
                    return None;
                }
                let transcript = latest.transcript.trim().to_string();
                if transcript.is_empty() {
                    return None;
                }
                tracing::debug!("[FINAL #{}] {}", connection, transcript);
                Some(transcript)
            }
            RecognitionEvent::Failed(error) => {
                tracing::error!("Speech recognition error: {}", error);
                self.status = SessionStatus::Error;
                None
            }
            RecognitionEvent::Ended => {
                self.live = false;
                if self.enabled {
                    // No backoff: a platform that ends immediately on every
                    // start will spin here.
                    self.restarts += 1;
                    tracing::debug!("Recognition ended, reopening (restart #{})", self.restarts);
                    self.open_connection();
                } else {
                    self.status = SessionStatus::Idle;
                    tracing::debug!("Recognition ended while disabled");
                }
                None
            }
        }
    }

    fn open_connection(&mut self) {
        let Some(recognizer) = self.recognizer.as_mut() else {
            return;
        };

        let connection = self.connection + 1;
        let session_sink = self.sink.clone();
        let sink: RecognitionSink = Arc::new(move |event| session_sink(connection, event));

        match recognizer.start(&self.locale, sink) {
            Ok(()) => {
                self.connection = connection;
                self.live = true;
                self.status = SessionStatus::Listening;
                tracing::info!("Listening for voice commands ({})", self.locale);
            }
            Err(e) => {
                self.status = SessionStatus::Error;
                tracing::error!("Failed to start speech recognition: {}", e);
            }
        }
    }
}
