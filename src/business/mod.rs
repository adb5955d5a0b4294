//! Business logic: command interpretation, navigation and spoken feedback

pub mod announcer;
pub mod command_interpreter;
pub mod navigation;
pub mod voice_controller;
pub mod wizard;

pub use announcer::Announcer;
pub use command_interpreter::{
    help_text, normalize, CommandGrammar, CommandInterpreter, Intent, Rule, HELP_COMMANDS,
};
pub use navigation::{NavigationController, Transition, UiAction, View};
pub use voice_controller::{EngineEvent, EngineHandle, VoiceController};
pub use wizard::{Wizard, WizardStep};
