//! Console speech adapters
//!
//! Typed lines stand in for the microphone and printed lines for the
//! speaker. The recognizer only forwards lines while a connection is open,
//! and reports `Ended` when asked to stop, the way a browser recognizer does.

use std::sync::{Arc, Mutex};

use super::{
    RecognitionError, RecognitionEvent, RecognitionResult, RecognitionSink, SpeechRecognizer,
    SpeechSynthesizer, SynthesisError, Utterance,
};

/// Shared line feed between stdin and the console recognizer
#[derive(Clone, Default)]
pub struct ConsoleMicrophone {
    open: Arc<Mutex<Option<RecognitionSink>>>,
}

impl ConsoleMicrophone {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recognizer(&self) -> ConsoleRecognizer {
        ConsoleRecognizer {
            open: self.open.clone(),
        }
    }

    /// Deliver a spoken line. Returns false if nothing is listening.
    pub fn hear(&self, line: &str) -> bool {
        let sink = match self.open.lock() {
            Ok(guard) => guard.as_ref().cloned(),
            Err(_) => None,
        };
        match sink {
            Some(sink) => {
                sink(RecognitionEvent::Results(vec![RecognitionResult::final_text(
                    line,
                )]));
                true
            }
            None => false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.lock().map(|g| g.is_some()).unwrap_or(false)
    }
}

pub struct ConsoleRecognizer {
    open: Arc<Mutex<Option<RecognitionSink>>>,
}

impl SpeechRecognizer for ConsoleRecognizer {
    fn start(&mut self, locale: &str, sink: RecognitionSink) -> Result<(), RecognitionError> {
        let mut open = self
            .open
            .lock()
            .map_err(|_| RecognitionError::Platform("microphone lock poisoned".into()))?;
        if open.is_some() {
            return Err(RecognitionError::Platform("already listening".into()));
        }
        *open = Some(sink);
        tracing::debug!("Console recognizer listening ({})", locale);
        Ok(())
    }

    fn stop(&mut self) {
        let sink = match self.open.lock() {
            Ok(mut open) => open.take(),
            Err(_) => None,
        };
        if let Some(sink) = sink {
            tracing::debug!("Console recognizer closed");
            sink(RecognitionEvent::Ended);
        }
    }
}

#[derive(Debug, Default)]
pub struct ConsoleSynthesizer;

impl ConsoleSynthesizer {
    pub fn new() -> Self {
        Self
    }
}

impl SpeechSynthesizer for ConsoleSynthesizer {
    fn is_pending(&self) -> bool {
        // Printing completes synchronously
        false
    }

    fn cancel(&mut self) {}

    fn speak(&mut self, utterance: &Utterance) -> Result<(), SynthesisError> {
        println!("🔊 {}", utterance.text);
        tracing::info!("[TTS {}] {}", utterance.locale, utterance.text);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collecting_sink() -> (RecognitionSink, Arc<Mutex<Vec<RecognitionEvent>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let captured = events.clone();
        let sink: RecognitionSink = Arc::new(move |event| captured.lock().unwrap().push(event));
        (sink, events)
    }

    #[test]
    fn lines_are_dropped_while_closed() {
        let microphone = ConsoleMicrophone::new();
        assert!(!microphone.hear("saldo"));
    }

    #[test]
    fn open_connection_forwards_lines_and_reports_end() {
        let microphone = ConsoleMicrophone::new();
        let mut recognizer = microphone.recognizer();
        let (sink, events) = collecting_sink();

        recognizer.start("es-ES", sink).unwrap();
        assert!(microphone.hear("mis tarjetas"));
        recognizer.stop();
        assert!(!microphone.is_open());

        let events = events.lock().unwrap();
        assert_eq!(
            *events,
            vec![
                RecognitionEvent::Results(vec![RecognitionResult::final_text("mis tarjetas")]),
                RecognitionEvent::Ended,
            ]
        );
    }

    #[test]
    fn second_start_is_refused() {
        let microphone = ConsoleMicrophone::new();
        let mut recognizer = microphone.recognizer();
        let (sink, _) = collecting_sink();

        recognizer.start("es-ES", sink.clone()).unwrap();
        assert!(recognizer.start("es-ES", sink).is_err());
    }
}
