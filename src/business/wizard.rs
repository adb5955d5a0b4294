//! Accessibility questionnaire shown right after signup

use crate::data::{AccessibilityProfile, ProfileAnswer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Name,
    AgeRange,
    SmallText,
    ScreenReader,
    VoiceAssistant,
    Confidence,
    Literacy,
    Theme,
}

impl WizardStep {
    pub const ALL: [WizardStep; 8] = [
        Self::Name,
        Self::AgeRange,
        Self::SmallText,
        Self::ScreenReader,
        Self::VoiceAssistant,
        Self::Confidence,
        Self::Literacy,
        Self::Theme,
    ];

    pub fn prompt(&self) -> &'static str {
        match self {
            Self::Name => "¿Cómo te llamas?",
            Self::AgeRange => "¿Cuál es tu rango de edad?",
            Self::SmallText => "¿Puedes leer texto pequeño con comodidad?",
            Self::ScreenReader => "¿Usas un lector de pantalla?",
            Self::VoiceAssistant => "¿Quieres que un asistente de voz te acompañe?",
            Self::Confidence => "¿Qué tan seguro te sientes usando la banca digital?",
            Self::Literacy => "¿Qué tan fácil te resulta leer textos largos?",
            Self::Theme => "¿Prefieres un tema claro, oscuro o de alto contraste?",
        }
    }

    /// The question an answer belongs to; font edits are not asked for
    fn of(answer: &ProfileAnswer) -> Option<Self> {
        match answer {
            ProfileAnswer::Name(_) => Some(Self::Name),
            ProfileAnswer::AgeRange(_) => Some(Self::AgeRange),
            ProfileAnswer::CanReadSmallText(_) => Some(Self::SmallText),
            ProfileAnswer::UsesScreenReader(_) => Some(Self::ScreenReader),
            ProfileAnswer::NeedsVoiceAssistant(_) => Some(Self::VoiceAssistant),
            ProfileAnswer::Confidence(_) => Some(Self::Confidence),
            ProfileAnswer::Literacy(_) => Some(Self::Literacy),
            ProfileAnswer::Theme(_) => Some(Self::Theme),
            ProfileAnswer::Font(_) => None,
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// Draft profile collected step by step. Steps left unanswered keep the
/// value the draft started from.
#[derive(Debug, Clone)]
pub struct Wizard {
    draft: AccessibilityProfile,
    answers: Vec<ProfileAnswer>,
    answered: [bool; WizardStep::ALL.len()],
}

impl Wizard {
    pub fn start(base: &AccessibilityProfile) -> Self {
        Self {
            draft: base.clone(),
            answers: Vec::new(),
            answered: [false; WizardStep::ALL.len()],
        }
    }

    pub fn draft(&self) -> &AccessibilityProfile {
        &self.draft
    }

    /// First question still open
    pub fn current_step(&self) -> Option<WizardStep> {
        WizardStep::ALL
            .iter()
            .copied()
            .find(|step| !self.answered[step.index()])
    }

    pub fn is_complete(&self) -> bool {
        self.current_step().is_none()
    }

    /// Record an answer and return the next open question
    pub fn answer(&mut self, answer: ProfileAnswer) -> Option<WizardStep> {
        if let Some(step) = WizardStep::of(&answer) {
            self.answered[step.index()] = true;
        }
        self.draft.apply_answer(answer.clone());
        self.answers.push(answer);
        self.current_step()
    }

    /// Merge the answers given so far into `current`, in the order given.
    /// Fields the wizard never asked about keep their `current` values.
    pub fn finish(self, current: &AccessibilityProfile) -> AccessibilityProfile {
        self.answers
            .into_iter()
            .fold(current.clone(), AccessibilityProfile::with_answer)
    }
}
