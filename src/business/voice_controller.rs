//! Voice Controller
//!
//! Owns the speech session, interpreter, announcer, navigation state and
//! profile for one running application, and feeds them from a single event
//! channel. Every event is handled to completion by [`VoiceController::dispatch`]
//! before the next one is taken, so two transcripts never interleave.

use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::asr::{SessionSink, SessionStatus, SpeechInputSession};
use crate::business::announcer::Announcer;
use crate::business::command_interpreter::CommandInterpreter;
use crate::business::navigation::{NavigationController, Transition, UiAction, View};
use crate::data::{AccessibilityProfile, KeyValueStore, ProfileStore, Theme};
use crate::platform::{RecognitionEvent, SpeechRecognizer, SpeechSynthesizer};

/// Everything the controller reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// Platform recognition event, tagged with its connection
    Recognition {
        connection: u64,
        event: RecognitionEvent,
    },
    Ui(UiAction),
    SetVoiceNavigation(bool),
    Shutdown,
}

/// Cloneable sender into the controller's event channel
#[derive(Clone)]
pub struct EngineHandle {
    tx: UnboundedSender<EngineEvent>,
}

impl EngineHandle {
    /// Queue an event. Returns false once the controller is gone.
    pub fn send(&self, event: EngineEvent) -> bool {
        self.tx.send(event).is_ok()
    }

    pub fn ui(&self, action: UiAction) -> bool {
        self.send(EngineEvent::Ui(action))
    }

    pub fn set_voice_navigation(&self, enabled: bool) -> bool {
        self.send(EngineEvent::SetVoiceNavigation(enabled))
    }

    pub fn shutdown(&self) -> bool {
        self.send(EngineEvent::Shutdown)
    }
}

pub struct VoiceController {
    profiles: ProfileStore,
    session: SpeechInputSession,
    interpreter: CommandInterpreter,
    announcer: Announcer,
    navigation: NavigationController,
    locale: String,
    handle: EngineHandle,
    events: UnboundedReceiver<EngineEvent>,
    on_transition: Option<Arc<dyn Fn(Transition) + Send + Sync + 'static>>,
}

impl VoiceController {
    /// Create the controller. A `None` backend means the platform lacks
    /// that speech service; the related features become silent no-ops.
    pub fn new(
        store: Box<dyn KeyValueStore>,
        recognizer: Option<Box<dyn SpeechRecognizer>>,
        synthesizer: Option<Box<dyn SpeechSynthesizer>>,
        locale: impl Into<String>,
    ) -> Self {
        let locale = locale.into();
        let (tx, events) = mpsc::unbounded_channel();
        let handle = EngineHandle { tx };

        let session_handle = handle.clone();
        let sink: SessionSink = Arc::new(move |connection, event| {
            session_handle.send(EngineEvent::Recognition { connection, event });
        });

        let profiles = ProfileStore::new(store);
        tracing::info!(
            "Profile loaded (simple_mode={})",
            profiles.profile().simple_mode()
        );

        Self {
            profiles,
            session: SpeechInputSession::new(recognizer, sink),
            interpreter: CommandInterpreter::default(),
            announcer: Announcer::new(synthesizer, locale.clone()),
            navigation: NavigationController::new(),
            locale,
            handle,
            events,
            on_transition: None,
        }
    }

    /// Replace the command interpreter
    pub fn with_interpreter(mut self, interpreter: CommandInterpreter) -> Self {
        self.interpreter = interpreter;
        self
    }

    /// Set view change callback
    pub fn set_on_transition<F>(&mut self, callback: F)
    where
        F: Fn(Transition) + Send + Sync + 'static,
    {
        self.on_transition = Some(Arc::new(callback));
    }

    pub fn handle(&self) -> EngineHandle {
        self.handle.clone()
    }

    pub fn current_view(&self) -> View {
        self.navigation.current_view()
    }

    pub fn profile(&self) -> &AccessibilityProfile {
        self.profiles.profile()
    }

    /// Theme stored on its own key, for styling before the profile is read
    pub fn stored_theme(&self) -> Theme {
        self.profiles.load_theme()
    }

    pub fn session_status(&self) -> SessionStatus {
        self.session.status()
    }

    pub fn voice_navigation_enabled(&self) -> bool {
        self.session.is_enabled()
    }

    /// Re-apply the device's stored voice navigation choice
    pub fn restore_voice_navigation(&mut self, default_enabled: bool) {
        let enabled = self.profiles.voice_enabled().unwrap_or(default_enabled);
        if enabled {
            self.session.enable(&self.locale);
        }
    }

    /// Toggle voice navigation and remember the choice for this device
    pub fn set_voice_navigation(&mut self, enabled: bool) {
        if enabled {
            self.session.enable(&self.locale);
        } else {
            self.session.disable();
        }
        self.profiles.save_voice_enabled(enabled);

        // Only confirm the state the session actually reached
        let text = match (enabled, self.session.status()) {
            (true, SessionStatus::Listening) => "Navegación por voz activada",
            (false, SessionStatus::Idle) => "Navegación por voz desactivada",
            (_, status) => {
                tracing::warn!(
                    "Voice navigation {} left the session {}",
                    if enabled { "enable" } else { "disable" },
                    status.as_str()
                );
                return;
            }
        };
        self.announcer.announce(text, self.profiles.profile());
    }

    /// Handle one event to completion. Returns false on shutdown.
    pub fn dispatch(&mut self, event: EngineEvent) -> bool {
        match event {
            EngineEvent::Recognition { connection, event } => {
                let Some(transcript) = self.session.handle_event(connection, event) else {
                    return true;
                };
                let intent = self.interpreter.interpret(&transcript);
                if let Some(transition) = self.navigation.handle_intent(intent, &mut self.announcer)
                {
                    self.notify(transition);
                }
            }
            EngineEvent::Ui(action) => {
                tracing::debug!("UI action: {:?}", action);
                if let Some(transition) =
                    self.navigation
                        .handle_ui(action, &mut self.profiles, &mut self.announcer)
                {
                    self.notify(transition);
                }
            }
            EngineEvent::SetVoiceNavigation(enabled) => self.set_voice_navigation(enabled),
            EngineEvent::Shutdown => {
                tracing::info!("Voice controller shutting down");
                self.session.disable();
                return false;
            }
        }
        true
    }

    /// Handle every event already queued, without waiting for more
    pub fn drain(&mut self) -> bool {
        while let Ok(event) = self.events.try_recv() {
            if !self.dispatch(event) {
                return false;
            }
        }
        true
    }

    /// Process events until a shutdown event arrives
    pub async fn run(&mut self) {
        tracing::info!("Voice controller running");
        while let Some(event) = self.events.recv().await {
            if !self.dispatch(event) {
                break;
            }
        }
    }

    fn notify(&self, transition: Transition) {
        if let Some(ref cb) = self.on_transition {
            cb(transition);
        }
    }
}
