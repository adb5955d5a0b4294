//! Command Interpreter
//!
//! Turns a recognized phrase into an [`Intent`]. Phrases are folded to
//! lowercase without accents, then checked against an ordered keyword
//! grammar where the first matching rule wins.

use unicode_normalization::UnicodeNormalization;

use crate::business::navigation::View;

/// Spoken commands, as announced by the help response
pub const HELP_COMMANDS: &[&str] = &[
    "principal",
    "saldo",
    "pagar servicios",
    "enviar dinero",
    "recibir dinero",
    "tarjetas",
    "preferencias",
    "ayuda",
];

const HELP_KEYWORD: &str = "ayuda";

/// What an utterance asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Navigate(View),
    Help(&'static [&'static str]),
    NoOp,
}

impl Intent {
    pub fn help() -> Self {
        Self::Help(HELP_COMMANDS)
    }
}

/// Spoken form of a help intent's command list
pub fn help_text(commands: &[&str]) -> String {
    format!("Puedes decir: {}.", commands.join(", "))
}

/// Matches when every required term occurs in the normalized phrase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub required_terms: &'static [&'static str],
    pub intent: Intent,
}

impl Rule {
    pub const fn new(required_terms: &'static [&'static str], intent: Intent) -> Self {
        Self {
            required_terms,
            intent,
        }
    }

    pub fn matches(&self, normalized: &str) -> bool {
        self.required_terms
            .iter()
            .all(|term| normalized.contains(term))
    }
}

/// Ordered rule list; earlier rules take priority
#[derive(Debug, Clone)]
pub struct CommandGrammar {
    rules: Vec<Rule>,
}

impl CommandGrammar {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// The banking command set
    pub fn banking() -> Self {
        Self::new(vec![
            Rule::new(&["home"], Intent::Navigate(View::Home)),
            Rule::new(&["principal"], Intent::Navigate(View::Home)),
            Rule::new(&["saldo"], Intent::Navigate(View::Accounts)),
            Rule::new(&["pagar"], Intent::Navigate(View::Pay)),
            Rule::new(&["servicios"], Intent::Navigate(View::Pay)),
            Rule::new(&["enviar", "dinero"], Intent::Navigate(View::Transfer)),
            Rule::new(&["recibir", "dinero"], Intent::Navigate(View::Receive)),
            Rule::new(&["tarjetas"], Intent::Navigate(View::Cards)),
            Rule::new(&["preferencias"], Intent::Navigate(View::Preferences)),
            Rule::new(&[HELP_KEYWORD], Intent::help()),
        ])
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn first_match(&self, normalized: &str) -> Option<Intent> {
        self.rules
            .iter()
            .find(|rule| rule.matches(normalized))
            .map(|rule| rule.intent)
    }
}

impl Default for CommandGrammar {
    fn default() -> Self {
        Self::banking()
    }
}

/// Lowercase, decompose, and drop combining diacritics (U+0300..=U+036F)
pub fn normalize(raw: &str) -> String {
    raw.to_lowercase()
        .nfd()
        .filter(|c| !('\u{0300}'..='\u{036f}').contains(c))
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct CommandInterpreter {
    grammar: CommandGrammar,
}

impl CommandInterpreter {
    pub fn new(grammar: CommandGrammar) -> Self {
        Self { grammar }
    }

    pub fn grammar(&self) -> &CommandGrammar {
        &self.grammar
    }

    /// Match an already normalized phrase
    pub fn match_intent(&self, normalized: &str) -> Intent {
        if let Some(intent) = self.grammar.first_match(normalized) {
            return intent;
        }
        if normalized.contains(HELP_KEYWORD) {
            return Intent::help();
        }
        Intent::NoOp
    }

    /// Normalize then match a raw transcript
    pub fn interpret(&self, raw: &str) -> Intent {
        let normalized = normalize(raw);
        let intent = self.match_intent(&normalized);
        tracing::debug!("Interpreted '{}' as {:?}", normalized, intent);
        intent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_variants_normalize_equal() {
        assert_eq!(normalize("Inicio"), normalize("inicio"));
        assert_eq!(normalize("INICIO"), normalize("inicio"));
        assert!(normalize("Mis Saldos").contains("saldo"));
    }

    #[test]
    fn accents_are_stripped() {
        assert_eq!(normalize("Mamá"), "mama");
        assert_eq!(normalize("PREFERÉNCIAS"), "preferencias");
        assert_eq!(normalize("año"), "ano");
    }

    #[test]
    fn transfer_needs_both_terms() {
        let interpreter = CommandInterpreter::default();
        assert_eq!(
            interpreter.interpret("quiero enviar dinero a mi mamá"),
            Intent::Navigate(View::Transfer)
        );
        assert_eq!(interpreter.interpret("quiero enviar un mensaje"), Intent::NoOp);
    }

    #[test]
    fn help_carries_the_command_list() {
        let interpreter = CommandInterpreter::default();
        let intent = interpreter.interpret("ayuda por favor");
        assert_eq!(intent, Intent::Help(HELP_COMMANDS));
        assert_eq!(HELP_COMMANDS.len(), 8);
    }

    #[test]
    fn unknown_phrase_is_noop() {
        let interpreter = CommandInterpreter::default();
        assert_eq!(interpreter.interpret("buenos días"), Intent::NoOp);
    }

    #[test]
    fn grammar_order_decides_ties() {
        let interpreter = CommandInterpreter::default();
        // "saldo" outranks "tarjetas"
        assert_eq!(
            interpreter.interpret("saldo de mis tarjetas"),
            Intent::Navigate(View::Accounts)
        );
        // "pagar" outranks "recibir dinero"
        assert_eq!(
            interpreter.interpret("recibir dinero para pagar"),
            Intent::Navigate(View::Pay)
        );
        // navigation outranks help
        assert_eq!(
            interpreter.interpret("ayuda con mis tarjetas"),
            Intent::Navigate(View::Cards)
        );
    }

    #[test]
    fn every_command_word_routes() {
        let interpreter = CommandInterpreter::default();
        let cases = [
            ("Página principal", View::Home),
            ("go home", View::Home),
            ("Servicios", View::Pay),
            ("Recibir Dinero", View::Receive),
            ("Preferencias", View::Preferences),
        ];
        for (phrase, view) in cases {
            assert_eq!(interpreter.interpret(phrase), Intent::Navigate(view), "{}", phrase);
        }
    }

    #[test]
    fn help_fallback_applies_to_custom_grammars() {
        let interpreter = CommandInterpreter::new(CommandGrammar::new(vec![Rule::new(
            &["saldo"],
            Intent::Navigate(View::Accounts),
        )]));
        assert_eq!(interpreter.interpret("necesito ayuda"), Intent::help());
    }

    #[test]
    fn help_text_lists_commands() {
        let text = help_text(HELP_COMMANDS);
        assert!(text.starts_with("Puedes decir: principal, saldo"));
        assert!(text.contains("enviar dinero"));
    }
}
