//! End-to-end tests driving the voice controller through its event channel

use voz_banca::business::{EngineEvent, UiAction, View, VoiceController, HELP_COMMANDS};
use voz_banca::data::{
    AccessibilityProfile, FileStore, KeyValueStore, Level, MemoryStore, ProfileAnswer, Theme,
    PROFILE_KEY,
};
use voz_banca::platform::mock::{MockRecognizer, MockSynthesizer};
use voz_banca::platform::{RecognitionEvent, RecognitionResult};
use voz_banca::SessionStatus;

fn say(recognizer: &MockRecognizer, text: &str) {
    recognizer.emit(RecognitionEvent::Results(vec![RecognitionResult::final_text(
        text,
    )]));
}

/// Run the controller on its own task; the returned handle yields it back
/// once a shutdown event has been processed.
fn spawn(mut controller: VoiceController) -> tokio::task::JoinHandle<VoiceController> {
    tokio::spawn(async move {
        controller.run().await;
        controller
    })
}

#[tokio::test]
async fn signup_wizard_then_voice_navigation() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let recognizer = MockRecognizer::new();
    let speech = MockSynthesizer::new();

    let controller = VoiceController::new(
        Box::new(FileStore::open(&path)),
        Some(Box::new(recognizer.clone())),
        Some(Box::new(speech.clone())),
        "es-ES",
    );
    let handle = controller.handle();
    let task = spawn(controller);

    handle.ui(UiAction::OpenSignup);
    handle.ui(UiAction::SignupSucceeded);
    for answer in [
        ProfileAnswer::Name("Carmen".into()),
        ProfileAnswer::CanReadSmallText(false),
        ProfileAnswer::Confidence(Level::Low),
        ProfileAnswer::Theme(Theme::HighContrast),
    ] {
        handle.ui(UiAction::WizardAnswer(answer));
    }
    handle.ui(UiAction::CompleteWizard);
    handle.set_voice_navigation(true);
    handle.shutdown();
    let mut controller = task.await.unwrap();

    assert_eq!(controller.current_view(), View::Home);
    assert!(controller.profile().simple_mode());
    assert_eq!(controller.profile().font_size_px(), 20);

    // Shutdown closed the connection; reopen it for the spoken part
    controller.set_voice_navigation(true);
    let handle = controller.handle();
    let task = spawn(controller);

    say(&recognizer, "Quiero enviar dinero a mi mamá");
    say(&recognizer, "buenos días");
    say(&recognizer, "ayuda por favor");
    handle.shutdown();
    let controller = task.await.unwrap();

    assert_eq!(controller.current_view(), View::Transfer);
    let spoken = speech.spoken();
    assert_eq!(spoken.len(), 2);
    assert_eq!(spoken[0], "Abriendo Enviar dinero");
    for command in HELP_COMMANDS {
        assert!(spoken[1].contains(command), "help is missing {}", command);
    }

    let reopened = FileStore::open(&path);
    let stored = AccessibilityProfile::from_json(&reopened.get(PROFILE_KEY).unwrap()).unwrap();
    assert_eq!(stored.name(), "Carmen");
    assert_eq!(stored.theme(), Theme::HighContrast);
    assert!(stored.simple_mode());
}

#[tokio::test]
async fn late_end_event_after_disable_does_not_restart() {
    let recognizer = MockRecognizer::new();
    let controller = VoiceController::new(
        Box::new(MemoryStore::new()),
        Some(Box::new(recognizer.clone())),
        None,
        "es-ES",
    );
    let handle = controller.handle();
    let task = spawn(controller);

    handle.set_voice_navigation(true);
    handle.set_voice_navigation(false);
    // queued behind the disable, as a platform would deliver it
    handle.send(EngineEvent::Recognition {
        connection: 1,
        event: RecognitionEvent::Ended,
    });
    handle.shutdown();
    let controller = task.await.unwrap();

    assert_eq!(recognizer.starts(), 1);
    assert!(!recognizer.is_open());
    assert_eq!(controller.session_status(), SessionStatus::Idle);
}

#[test]
fn ended_connection_reopens_and_keeps_listening() {
    let recognizer = MockRecognizer::new();
    let mut controller = VoiceController::new(
        Box::new(MemoryStore::new()),
        Some(Box::new(recognizer.clone())),
        None,
        "es-ES",
    );
    controller.dispatch(EngineEvent::Ui(UiAction::LoginSucceeded));
    controller.set_voice_navigation(true);

    recognizer.emit(RecognitionEvent::Ended);
    controller.drain();
    assert_eq!(recognizer.starts(), 2);

    say(&recognizer, "Preferencias");
    controller.drain();

    assert_eq!(controller.current_view(), View::Preferences);
    assert_eq!(controller.session_status(), SessionStatus::Listening);
}

#[test]
fn corrupt_persisted_profile_yields_defaults() {
    let mut store = MemoryStore::new();
    store.set(PROFILE_KEY, "}}not a profile{{").unwrap();

    let controller = VoiceController::new(Box::new(store), None, None, "es-ES");

    assert_eq!(controller.profile(), &AccessibilityProfile::initialize());
    assert_eq!(controller.session_status(), SessionStatus::Unsupported);
}

#[test]
fn logout_from_anywhere_returns_to_login() {
    let recognizer = MockRecognizer::new();
    let mut controller = VoiceController::new(
        Box::new(MemoryStore::new()),
        Some(Box::new(recognizer.clone())),
        None,
        "es-ES",
    );
    controller.dispatch(EngineEvent::Ui(UiAction::LoginSucceeded));
    controller.set_voice_navigation(true);
    say(&recognizer, "pagar la luz");
    controller.drain();
    assert_eq!(controller.current_view(), View::Pay);

    controller.dispatch(EngineEvent::Ui(UiAction::Logout));

    assert_eq!(controller.current_view(), View::Login);
}
