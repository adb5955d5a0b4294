//! Voz Banca - voice navigation and adaptive accessibility engine
//!
//! Interprets short Spanish voice commands to move between the screens of a
//! banking front-end, and turns a short questionnaire into concrete
//! accessibility settings.

pub mod asr;
pub mod business;
pub mod data;
pub mod platform;

pub use asr::{SessionStatus, SpeechInputSession};
pub use business::{
    Announcer, CommandInterpreter, EngineEvent, EngineHandle, Intent, NavigationController,
    UiAction, View, VoiceController,
};
pub use data::{AccessibilityProfile, AppConfig, FileStore, MemoryStore, ProfileStore};
