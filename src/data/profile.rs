//! Accessibility profile
//!
//! The user's display and assistance preferences, plus the two rules that
//! derive fields from the answers: `simple_mode` follows confidence and
//! literacy, `font_size_px` follows `can_read_small_text`. Fields are only
//! writable through [`AccessibilityProfile::apply_answer`], which re-applies
//! both rules in the same step.

use serde::{Deserialize, Serialize};

use super::store::{
    KeyValueStore, PROFILE_KEY, SIMPLE_MODE_KEY, THEME_KEY, VOICE_ENABLED_KEY,
};

pub const SMALL_FONT_PX: u32 = 16;
pub const LARGE_FONT_PX: u32 = 20;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    HighContrast,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::HighContrast => "high-contrast",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            "high-contrast" => Some(Self::HighContrast),
            _ => None,
        }
    }
}

/// Self-reported level for confidence and literacy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    #[default]
    Medium,
    High,
}

impl Level {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeRange {
    #[default]
    #[serde(rename = "unspecified")]
    Unspecified,
    #[serde(rename = "18-29")]
    From18To29,
    #[serde(rename = "30-44")]
    From30To44,
    #[serde(rename = "45-59")]
    From45To59,
    #[serde(rename = "60-74")]
    From60To74,
    #[serde(rename = "75+")]
    From75,
}

impl AgeRange {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "unspecified" => Some(Self::Unspecified),
            "18-29" => Some(Self::From18To29),
            "30-44" => Some(Self::From30To44),
            "45-59" => Some(Self::From45To59),
            "60-74" => Some(Self::From60To74),
            "75+" => Some(Self::From75),
            _ => None,
        }
    }
}

/// A single questionnaire answer or preference edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileAnswer {
    Name(String),
    AgeRange(AgeRange),
    CanReadSmallText(bool),
    UsesScreenReader(bool),
    NeedsVoiceAssistant(bool),
    Confidence(Level),
    Literacy(Level),
    Theme(Theme),
    Font(String),
}

impl ProfileAnswer {
    /// Parse a `field value` pair as typed at the console.
    pub fn parse(field: &str, value: &str) -> Option<Self> {
        let flag = || match value.trim() {
            "true" | "si" | "sí" | "yes" => Some(true),
            "false" | "no" => Some(false),
            _ => None,
        };
        match field.trim() {
            "name" => Some(Self::Name(value.trim().to_string())),
            "age" => AgeRange::parse(value).map(Self::AgeRange),
            "small-text" => flag().map(Self::CanReadSmallText),
            "screen-reader" => flag().map(Self::UsesScreenReader),
            "voice-assistant" => flag().map(Self::NeedsVoiceAssistant),
            "confidence" => Level::parse(value).map(Self::Confidence),
            "literacy" => Level::parse(value).map(Self::Literacy),
            "theme" => Theme::parse(value).map(Self::Theme),
            "font" => Some(Self::Font(value.trim().to_string())),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccessibilityProfile {
    theme: Theme,
    font: String,
    font_size_px: u32,
    can_read_small_text: bool,
    uses_screen_reader: bool,
    needs_voice_assistant: bool,
    confidence: Level,
    literacy: Level,
    name: String,
    age_range: AgeRange,
    simple_mode: bool,
}

impl Default for AccessibilityProfile {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            font: "Atkinson Hyperlegible".to_string(),
            font_size_px: SMALL_FONT_PX,
            can_read_small_text: true,
            uses_screen_reader: false,
            needs_voice_assistant: false,
            confidence: Level::Medium,
            literacy: Level::Medium,
            name: String::new(),
            age_range: AgeRange::Unspecified,
            simple_mode: false,
        }
    }
}

impl AccessibilityProfile {
    /// Hard-coded starting profile
    pub fn initialize() -> Self {
        Self::default()
    }

    /// Apply one answer and recompute the derived fields
    pub fn apply_answer(&mut self, answer: ProfileAnswer) {
        match answer {
            ProfileAnswer::Name(name) => self.name = name,
            ProfileAnswer::AgeRange(range) => self.age_range = range,
            ProfileAnswer::CanReadSmallText(v) => self.can_read_small_text = v,
            ProfileAnswer::UsesScreenReader(v) => self.uses_screen_reader = v,
            ProfileAnswer::NeedsVoiceAssistant(v) => self.needs_voice_assistant = v,
            ProfileAnswer::Confidence(level) => self.confidence = level,
            ProfileAnswer::Literacy(level) => self.literacy = level,
            ProfileAnswer::Theme(theme) => self.theme = theme,
            ProfileAnswer::Font(font) => self.font = font,
        }
        self.enforce_invariants();
    }

    /// Consuming form of [`apply_answer`](Self::apply_answer)
    pub fn with_answer(mut self, answer: ProfileAnswer) -> Self {
        self.apply_answer(answer);
        self
    }

    fn enforce_invariants(&mut self) {
        self.simple_mode = self.confidence == Level::Low || self.literacy == Level::Low;
        self.font_size_px = if self.can_read_small_text {
            SMALL_FONT_PX
        } else {
            LARGE_FONT_PX
        };
    }

    /// Whether informational announcements should be spoken
    pub fn wants_announcements(&self) -> bool {
        self.needs_voice_assistant || self.uses_screen_reader
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn font(&self) -> &str {
        &self.font
    }

    pub fn font_size_px(&self) -> u32 {
        self.font_size_px
    }

    pub fn can_read_small_text(&self) -> bool {
        self.can_read_small_text
    }

    pub fn uses_screen_reader(&self) -> bool {
        self.uses_screen_reader
    }

    pub fn needs_voice_assistant(&self) -> bool {
        self.needs_voice_assistant
    }

    pub fn confidence(&self) -> Level {
        self.confidence
    }

    pub fn literacy(&self) -> Level {
        self.literacy
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age_range(&self) -> AgeRange {
        self.age_range
    }

    pub fn simple_mode(&self) -> bool {
        self.simple_mode
    }

    /// Decode a stored blob. Derived fields are recomputed rather than trusted.
    pub fn from_json(blob: &str) -> Result<Self, serde_json::Error> {
        let mut profile: Self = serde_json::from_str(blob)?;
        profile.enforce_invariants();
        Ok(profile)
    }
}

/// Owns the shared profile and its persistence
pub struct ProfileStore {
    store: Box<dyn KeyValueStore>,
    profile: AccessibilityProfile,
}

impl ProfileStore {
    /// Open over a backend, loading whatever profile it holds
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        let mut this = Self {
            store,
            profile: AccessibilityProfile::initialize(),
        };
        this.profile = this.load();
        this
    }

    pub fn profile(&self) -> &AccessibilityProfile {
        &self.profile
    }

    /// Read the stored profile, or defaults if it is absent or unparseable
    pub fn load(&self) -> AccessibilityProfile {
        let Some(blob) = self.store.get(PROFILE_KEY) else {
            return AccessibilityProfile::initialize();
        };
        match AccessibilityProfile::from_json(&blob) {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!("Discarding corrupt stored profile: {}", e);
                AccessibilityProfile::initialize()
            }
        }
    }

    /// Standalone theme, readable before the profile is decoded
    pub fn load_theme(&self) -> Theme {
        self.store
            .get(THEME_KEY)
            .and_then(|s| Theme::parse(&s))
            .unwrap_or_default()
    }

    /// Edit the shared profile and persist it
    pub fn apply_answer(&mut self, answer: ProfileAnswer) {
        let mut updated = self.profile.clone();
        updated.apply_answer(answer);
        self.commit(updated);
    }

    /// Replace the shared profile and write it out. Write failures are
    /// logged; the in-memory profile is updated regardless.
    pub fn commit(&mut self, profile: AccessibilityProfile) {
        self.profile = profile;

        let blob = match serde_json::to_string(&self.profile) {
            Ok(blob) => blob,
            Err(e) => {
                tracing::error!("Failed to serialize profile: {}", e);
                return;
            }
        };

        let simple_mode = self.profile.simple_mode.to_string();
        let writes = [
            (PROFILE_KEY, blob.as_str()),
            (SIMPLE_MODE_KEY, simple_mode.as_str()),
            (THEME_KEY, self.profile.theme.as_str()),
        ];
        for (key, value) in writes {
            if let Err(e) = self.store.set(key, value) {
                tracing::warn!("Failed to persist {}: {}", key, e);
            }
        }

        tracing::info!(
            "Profile committed (simple_mode={}, font_size={}px, theme={})",
            self.profile.simple_mode,
            self.profile.font_size_px,
            self.profile.theme.as_str()
        );
    }

    /// Per-device voice navigation flag, if one was ever stored
    pub fn voice_enabled(&self) -> Option<bool> {
        self.store
            .get(VOICE_ENABLED_KEY)
            .and_then(|s| s.trim().parse().ok())
    }

    pub fn save_voice_enabled(&mut self, enabled: bool) {
        if let Err(e) = self.store.set(VOICE_ENABLED_KEY, &enabled.to_string()) {
            tracing::warn!("Failed to persist voice navigation flag: {}", e);
        }
    }
}
