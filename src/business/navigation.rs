//! Navigation Controller
//!
//! Single owner of the current view. Voice intents and UI actions both end
//! up here; each call applies one transition to completion.

use crate::business::announcer::Announcer;
use crate::business::command_interpreter::{help_text, Intent};
use crate::business::wizard::Wizard;
use crate::data::{ProfileAnswer, ProfileStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Signup,
    Wizard,
    Home,
    Transfer,
    Receive,
    Pay,
    Accounts,
    Cards,
    Preferences,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Signup => "signup",
            Self::Wizard => "wizard",
            Self::Home => "home",
            Self::Transfer => "transfer",
            Self::Receive => "receive",
            Self::Pay => "pay",
            Self::Accounts => "accounts",
            Self::Cards => "cards",
            Self::Preferences => "preferences",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "login" => Some(Self::Login),
            "signup" => Some(Self::Signup),
            "wizard" => Some(Self::Wizard),
            "home" => Some(Self::Home),
            "transfer" => Some(Self::Transfer),
            "receive" => Some(Self::Receive),
            "pay" => Some(Self::Pay),
            "accounts" => Some(Self::Accounts),
            "cards" => Some(Self::Cards),
            "preferences" => Some(Self::Preferences),
            _ => None,
        }
    }

    /// Spoken name of the screen
    pub fn label(&self) -> &'static str {
        match self {
            Self::Login => "Inicio de sesión",
            Self::Signup => "Registro",
            Self::Wizard => "Asistente de accesibilidad",
            Self::Home => "Inicio",
            Self::Transfer => "Enviar dinero",
            Self::Receive => "Recibir dinero",
            Self::Pay => "Pagar servicios",
            Self::Accounts => "Mis saldos",
            Self::Cards => "Mis tarjetas",
            Self::Preferences => "Preferencias",
        }
    }

    /// Fixed target of the back control on this screen
    pub fn back_target(&self) -> View {
        match self {
            Self::Login | Self::Signup => Self::Login,
            Self::Wizard => Self::Signup,
            Self::Home
            | Self::Transfer
            | Self::Receive
            | Self::Pay
            | Self::Accounts
            | Self::Cards
            | Self::Preferences => Self::Home,
        }
    }
}

/// Actions raised by on-screen controls
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    LoginSucceeded,
    OpenSignup,
    SignupSucceeded,
    WizardAnswer(ProfileAnswer),
    CompleteWizard,
    Navigate(View),
    Back,
    Logout,
    UpdatePreference(ProfileAnswer),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: View,
    pub to: View,
}

pub struct NavigationController {
    current: View,
    wizard: Option<Wizard>,
}

impl Default for NavigationController {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationController {
    pub fn new() -> Self {
        Self {
            current: View::Login,
            wizard: None,
        }
    }

    pub fn current_view(&self) -> View {
        self.current
    }

    /// Draft being filled in, while on the wizard screen
    pub fn wizard(&self) -> Option<&Wizard> {
        self.wizard.as_ref()
    }

    /// Apply an interpreted voice command. Acknowledgements are spoken
    /// whatever the profile says.
    pub fn handle_intent(
        &mut self,
        intent: Intent,
        announcer: &mut Announcer,
    ) -> Option<Transition> {
        match intent {
            Intent::Navigate(view) => {
                let transition = self.go(view);
                announcer.speak(&format!("Abriendo {}", view.label()));
                Some(transition)
            }
            Intent::Help(commands) => {
                announcer.speak(&help_text(commands));
                None
            }
            Intent::NoOp => None,
        }
    }

    /// Apply an on-screen action. Announcements here are gated by the profile.
    pub fn handle_ui(
        &mut self,
        action: UiAction,
        profiles: &mut ProfileStore,
        announcer: &mut Announcer,
    ) -> Option<Transition> {
        let transition = match action {
            UiAction::LoginSucceeded => self.go(View::Home),
            UiAction::OpenSignup => self.go(View::Signup),
            UiAction::SignupSucceeded => {
                self.wizard = Some(Wizard::start(profiles.profile()));
                self.go(View::Wizard)
            }
            UiAction::WizardAnswer(answer) => {
                let Some(wizard) = self.wizard.as_mut() else {
                    tracing::warn!("Wizard answer outside the wizard: {:?}", answer);
                    return None;
                };
                if let Some(step) = wizard.answer(answer) {
                    announcer.announce(step.prompt(), wizard.draft());
                }
                return None;
            }
            UiAction::CompleteWizard => {
                let Some(wizard) = self.wizard.take() else {
                    tracing::warn!("Wizard completion with no wizard in progress");
                    return None;
                };
                let merged = wizard.finish(profiles.profile());
                profiles.commit(merged);
                self.go(View::Home)
            }
            UiAction::Navigate(view) => {
                if view == View::Wizard && self.wizard.is_none() {
                    self.wizard = Some(Wizard::start(profiles.profile()));
                }
                self.go(view)
            }
            UiAction::Back => self.go(self.current.back_target()),
            UiAction::Logout => self.go(View::Login),
            UiAction::UpdatePreference(answer) => {
                profiles.apply_answer(answer);
                announcer.announce("Preferencias guardadas", profiles.profile());
                return None;
            }
        };

        // The wizard draft decides gating while it is being filled in
        match (&self.wizard, transition.to) {
            (Some(wizard), View::Wizard) => {
                let text = match wizard.current_step() {
                    Some(step) => format!("{}. {}", View::Wizard.label(), step.prompt()),
                    None => View::Wizard.label().to_string(),
                };
                announcer.announce(&text, wizard.draft());
            }
            _ => announcer.announce(transition.to.label(), profiles.profile()),
        }
        Some(transition)
    }

    fn go(&mut self, view: View) -> Transition {
        let from = self.current;
        if view != View::Wizard && self.wizard.take().is_some() {
            tracing::debug!("Wizard draft dropped on leaving for {}", view.as_str());
        }
        self.current = view;
        tracing::info!("View {} -> {}", from.as_str(), view.as_str());
        Transition { from, to: view }
    }
}
