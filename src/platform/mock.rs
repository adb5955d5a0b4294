//! Recording doubles for the speech platform.
//!
//! Both mocks are cheap handles over shared state: keep one clone for
//! assertions and box the other into the component under test.

use std::sync::{Arc, Mutex};

use super::{
    RecognitionError, RecognitionEvent, RecognitionSink, SpeechRecognizer, SpeechSynthesizer,
    SynthesisError, Utterance,
};

#[derive(Default)]
struct RecognizerState {
    starts: usize,
    stops: usize,
    open: bool,
    sink: Option<RecognitionSink>,
    fail_next: Option<RecognitionError>,
}

#[derive(Clone, Default)]
pub struct MockRecognizer {
    state: Arc<Mutex<RecognizerState>>,
}

impl MockRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `start` calls
    pub fn starts(&self) -> usize {
        self.state.lock().unwrap().starts
    }

    pub fn stops(&self) -> usize {
        self.state.lock().unwrap().stops
    }

    /// Whether a started connection has not been stopped yet
    pub fn is_open(&self) -> bool {
        self.state.lock().unwrap().open
    }

    /// Make the next `start` call fail with `error`
    pub fn fail_next_start(&self, error: RecognitionError) {
        self.state.lock().unwrap().fail_next = Some(error);
    }

    /// Push an event through the most recent sink, even after `stop`,
    /// to model events the platform delivers late.
    pub fn emit(&self, event: RecognitionEvent) {
        let sink = self.state.lock().unwrap().sink.clone();
        if let Some(sink) = sink {
            sink(event);
        }
    }
}

impl SpeechRecognizer for MockRecognizer {
    fn start(&mut self, _locale: &str, sink: RecognitionSink) -> Result<(), RecognitionError> {
        let mut state = self.state.lock().unwrap();
        if let Some(error) = state.fail_next.take() {
            return Err(error);
        }
        state.starts += 1;
        state.open = true;
        state.sink = Some(sink);
        Ok(())
    }

    fn stop(&mut self) {
        let mut state = self.state.lock().unwrap();
        state.stops += 1;
        state.open = false;
    }
}

#[derive(Default)]
struct SynthesizerState {
    spoken: Vec<Utterance>,
    cancels: usize,
    pending: bool,
    fail: bool,
}

#[derive(Clone, Default)]
pub struct MockSynthesizer {
    state: Arc<Mutex<SynthesizerState>>,
}

impl MockSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every utterance accepted, in order
    pub fn spoken(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .spoken
            .iter()
            .map(|u| u.text.clone())
            .collect()
    }

    pub fn last_utterance(&self) -> Option<Utterance> {
        self.state.lock().unwrap().spoken.last().cloned()
    }

    pub fn cancels(&self) -> usize {
        self.state.lock().unwrap().cancels
    }

    /// Mark the queued utterance as played out
    pub fn finish(&self) {
        self.state.lock().unwrap().pending = false;
    }

    /// Make every `speak` fail
    pub fn fail_all(&self) {
        self.state.lock().unwrap().fail = true;
    }
}

impl SpeechSynthesizer for MockSynthesizer {
    fn is_pending(&self) -> bool {
        self.state.lock().unwrap().pending
    }

    fn cancel(&mut self) {
        let mut state = self.state.lock().unwrap();
        state.cancels += 1;
        state.pending = false;
    }

    fn speak(&mut self, utterance: &Utterance) -> Result<(), SynthesisError> {
        let mut state = self.state.lock().unwrap();
        if state.fail {
            return Err(SynthesisError::Failed("mock failure".into()));
        }
        state.spoken.push(utterance.clone());
        state.pending = true;
        Ok(())
    }
}
