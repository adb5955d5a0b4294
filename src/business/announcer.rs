//! Speech output channel
//!
//! At most one utterance is ever audible: a new request cancels whatever is
//! still queued or playing. Synthesis failures are logged and dropped.

use crate::data::AccessibilityProfile;
use crate::platform::{SpeechSynthesizer, Utterance};

pub struct Announcer {
    synthesizer: Option<Box<dyn SpeechSynthesizer>>,
    locale: String,
}

impl Announcer {
    /// `None` means the platform has no synthesis service.
    pub fn new(synthesizer: Option<Box<dyn SpeechSynthesizer>>, locale: impl Into<String>) -> Self {
        Self {
            synthesizer,
            locale: locale.into(),
        }
    }

    pub fn is_supported(&self) -> bool {
        self.synthesizer.is_some()
    }

    /// Speak regardless of the profile. Used for voice command acknowledgements.
    pub fn speak(&mut self, text: &str) {
        let Some(synthesizer) = self.synthesizer.as_mut() else {
            return;
        };

        if synthesizer.is_pending() {
            synthesizer.cancel();
        }

        let utterance = Utterance {
            text: text.to_string(),
            locale: self.locale.clone(),
        };
        if let Err(e) = synthesizer.speak(&utterance) {
            tracing::warn!("Speech synthesis failed: {}", e);
        }
    }

    /// Speak only for users who asked for spoken feedback
    pub fn announce(&mut self, text: &str, profile: &AccessibilityProfile) {
        if profile.wants_announcements() {
            self.speak(text);
        } else {
            tracing::trace!("Announcement muted by profile: {}", text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ProfileAnswer;
    use crate::platform::mock::MockSynthesizer;

    fn announcer_with(mock: &MockSynthesizer) -> Announcer {
        Announcer::new(Some(Box::new(mock.clone())), "es-ES")
    }

    #[test]
    fn newer_request_replaces_pending_one() {
        let mock = MockSynthesizer::new();
        let mut announcer = announcer_with(&mock);

        announcer.speak("A");
        announcer.speak("B");

        assert_eq!(mock.cancels(), 1);
        let last = mock.last_utterance().unwrap();
        assert_eq!(last.text, "B");
        assert_eq!(last.locale, "es-ES");
    }

    #[test]
    fn finished_utterance_is_not_cancelled() {
        let mock = MockSynthesizer::new();
        let mut announcer = announcer_with(&mock);

        announcer.speak("A");
        mock.finish();
        announcer.speak("B");

        assert_eq!(mock.cancels(), 0);
        assert_eq!(mock.spoken(), vec!["A", "B"]);
    }

    #[test]
    fn announcements_respect_the_profile() {
        let mock = MockSynthesizer::new();
        let mut announcer = announcer_with(&mock);

        let quiet = AccessibilityProfile::initialize();
        announcer.announce("Inicio", &quiet);
        assert!(mock.spoken().is_empty());

        let reader = quiet.with_answer(ProfileAnswer::UsesScreenReader(true));
        announcer.announce("Inicio", &reader);
        assert_eq!(mock.spoken(), vec!["Inicio"]);
    }

    #[test]
    fn synthesis_errors_are_swallowed() {
        let mock = MockSynthesizer::new();
        mock.fail_all();
        let mut announcer = announcer_with(&mock);

        announcer.speak("Saldo");

        assert!(mock.spoken().is_empty());
    }

    #[test]
    fn missing_synthesizer_is_silent() {
        let mut announcer = Announcer::new(None, "es-ES");
        assert!(!announcer.is_supported());
        announcer.speak("Hola");
    }
}
