//! Data module for configuration, settings persistence and the accessibility profile

mod config;
mod profile;
mod store;

pub use config::{AppConfig, GeneralConfig, SpeechBackend, VoiceConfig};
pub use profile::{
    AccessibilityProfile, AgeRange, Level, ProfileAnswer, ProfileStore, Theme, LARGE_FONT_PX,
    SMALL_FONT_PX,
};
pub use store::{
    FileStore, KeyValueStore, MemoryStore, StorageError, PROFILE_KEY, SIMPLE_MODE_KEY,
    THEME_KEY, VOICE_ENABLED_KEY,
};
