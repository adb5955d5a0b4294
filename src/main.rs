//! Voz Banca - Main Entry Point
//!
//! Console front-end: typed lines stand in for speech while voice
//! navigation is on, and `:`-prefixed lines stand in for on-screen controls.
//! Run with `--debug` for verbose logging.

use anyhow::Result;
use std::env;
use std::io::{self, Write};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use voz_banca::business::{EngineEvent, EngineHandle, UiAction, View, HELP_COMMANDS};
use voz_banca::data::ProfileAnswer;
use voz_banca::platform::{ConsoleMicrophone, PlatformFactory};
use voz_banca::{AppConfig, FileStore, VoiceController};

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let debug = args.iter().any(|a| a == "--debug" || a == "-d");
    init_logging(debug);

    info!("Starting Voz Banca v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = AppConfig::load_or_default()?;
    info!("Configuration loaded");

    let store = FileStore::open(config.data_path());
    info!("Settings store: {}", store.path().display());

    let microphone = ConsoleMicrophone::new();
    let recognizer = PlatformFactory::create_recognizer(config.voice.recognizer, &microphone);
    let synthesizer = PlatformFactory::create_synthesizer(config.voice.synthesizer);

    let mut controller = VoiceController::new(
        Box::new(store),
        recognizer,
        synthesizer,
        config.general.locale.clone(),
    );
    controller.set_on_transition(|t| {
        println!("📍 {} → {}", t.from.label(), t.to.label());
    });
    controller.restore_voice_navigation(config.voice.enabled_by_default);

    print_banner(&controller);

    let handle = controller.handle();
    tokio::spawn(read_console(handle, microphone));

    controller.run().await;

    println!("Hasta pronto");
    info!("Application exited");
    Ok(())
}

fn print_banner(controller: &VoiceController) {
    println!("════════════════════════════════════════════════════════════");
    println!("  Voz Banca v{}", env!("CARGO_PKG_VERSION"));
    println!("  Tema: {}", controller.stored_theme().as_str());
    println!("  Pantalla: {}", controller.current_view().label());
    println!(
        "  Voz: {} ({})",
        if controller.voice_navigation_enabled() { "activada" } else { "desactivada" },
        controller.session_status().as_str()
    );
    println!("  Comandos de voz: {}", HELP_COMMANDS.join(", "));
    println!("  Controles: :login :signup :registered :back :logout :finish");
    println!("             :go <view> :voz on|off :answer <campo> <valor>");
    println!("             :pref <campo> <valor> :quit");
    println!("════════════════════════════════════════════════════════════");
}

/// A console line that stands in for an on-screen control
#[derive(Debug, PartialEq, Eq)]
enum ConsoleCommand {
    Event(EngineEvent),
    Quit,
}

fn parse_command(cmd: &str) -> Option<ConsoleCommand> {
    let mut parts = cmd.trim().splitn(3, ' ');
    let name = parts.next()?;
    let arg = parts.next();
    let rest = parts.next();

    let ui = |action| Some(ConsoleCommand::Event(EngineEvent::Ui(action)));
    match (name, arg) {
        ("quit" | "q", _) => Some(ConsoleCommand::Quit),
        ("login", _) => ui(UiAction::LoginSucceeded),
        ("signup", _) => ui(UiAction::OpenSignup),
        ("registered", _) => ui(UiAction::SignupSucceeded),
        ("back", _) => ui(UiAction::Back),
        ("logout", _) => ui(UiAction::Logout),
        ("finish", _) => ui(UiAction::CompleteWizard),
        ("go", Some(view)) => ui(UiAction::Navigate(View::parse(view)?)),
        ("voz", Some(state @ ("on" | "off"))) => Some(ConsoleCommand::Event(
            EngineEvent::SetVoiceNavigation(state == "on"),
        )),
        ("answer", Some(field)) => {
            let answer = ProfileAnswer::parse(field, rest?)?;
            ui(UiAction::WizardAnswer(answer))
        }
        ("pref", Some(field)) => {
            let answer = ProfileAnswer::parse(field, rest?)?;
            ui(UiAction::UpdatePreference(answer))
        }
        _ => None,
    }
}

async fn read_console(handle: EngineHandle, microphone: ConsoleMicrophone) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!(">>> ");
        let _ = io::stdout().flush();

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::error!("Failed to read console input: {}", e);
                break;
            }
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(cmd) = line.strip_prefix(':') {
            match parse_command(cmd) {
                Some(ConsoleCommand::Quit) => break,
                Some(ConsoleCommand::Event(event)) => {
                    if !handle.send(event) {
                        break;
                    }
                }
                None => println!("❓ Comando desconocido: {}", cmd),
            }
        } else if !microphone.hear(line) {
            println!("🎙️  La navegación por voz está desactivada (:voz on)");
        }
    }

    handle.shutdown();
}

fn init_logging(debug: bool) {
    let level = if debug {
        "voz_banca=debug"
    } else {
        "voz_banca=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| level.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use voz_banca::data::Level;

    #[test]
    fn parses_controls() {
        assert_eq!(
            parse_command("go cards"),
            Some(ConsoleCommand::Event(EngineEvent::Ui(UiAction::Navigate(View::Cards))))
        );
        assert_eq!(
            parse_command("voz off"),
            Some(ConsoleCommand::Event(EngineEvent::SetVoiceNavigation(false)))
        );
        assert_eq!(
            parse_command("answer name María José"),
            Some(ConsoleCommand::Event(EngineEvent::Ui(UiAction::WizardAnswer(
                ProfileAnswer::Name("María José".into())
            ))))
        );
        assert_eq!(
            parse_command("pref literacy low"),
            Some(ConsoleCommand::Event(EngineEvent::Ui(UiAction::UpdatePreference(
                ProfileAnswer::Literacy(Level::Low)
            ))))
        );
        assert_eq!(parse_command("quit"), Some(ConsoleCommand::Quit));
    }

    #[test]
    fn rejects_malformed_controls() {
        assert_eq!(parse_command("go nowhere"), None);
        assert_eq!(parse_command("answer literacy"), None);
        assert_eq!(parse_command("dance"), None);
    }
}
