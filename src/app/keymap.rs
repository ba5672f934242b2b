use super::action::Action;
use crate::domain::models::Format;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// `[keys]` table of the config file: action name -> key spec such as
/// `"ctrl+s"`, `"alt+1"` or `"f1"`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct KeyConfig {
    pub custom: HashMap<String, String>,
}

pub struct KeyMap {
    pub editing: HashMap<KeyEvent, Action>,
}

const DEFAULT_BINDINGS: &[(&str, &str)] = &[
    ("quit", "ctrl+q"),
    ("save", "ctrl+s"),
    ("save_as", "alt+s"),
    ("open", "ctrl+o"),
    ("insert_image", "alt+i"),
    ("bold", "ctrl+b"),
    ("italic", "ctrl+i"),
    ("strike", "ctrl+t"),
    ("inline_code", "ctrl+e"),
    ("heading1", "alt+1"),
    ("heading2", "alt+2"),
    ("heading3", "alt+3"),
    ("quote", "alt+q"),
    ("code_block", "alt+c"),
    ("focus_mode", "ctrl+f"),
    ("help", "f1"),
    ("theme", "f2"),
];

fn action_for(name: &str) -> Option<Action> {
    Some(match name {
        "quit" => Action::Quit,
        "save" => Action::SaveIntent,
        "save_as" => Action::SaveAsIntent,
        "open" => Action::OpenIntent,
        "insert_image" => Action::InsertImageIntent,
        "bold" => Action::ApplyFormat(Format::Bold),
        "italic" => Action::ApplyFormat(Format::Italic),
        "strike" => Action::ApplyFormat(Format::Strike),
        "inline_code" => Action::ApplyFormat(Format::InlineCode),
        "heading1" => Action::ApplyFormat(Format::Heading(1)),
        "heading2" => Action::ApplyFormat(Format::Heading(2)),
        "heading3" => Action::ApplyFormat(Format::Heading(3)),
        "quote" => Action::ApplyFormat(Format::Blockquote),
        "code_block" => Action::ApplyFormat(Format::CodeBlock),
        "focus_mode" => Action::ToggleFocusMode,
        "help" => Action::ToggleHelp,
        "theme" => Action::CycleTheme,
        _ => return None,
    })
}

impl KeyMap {
    /// Defaults first, then user overrides. An override replaces the default
    /// key of the same action; unknown names and bad specs are skipped.
    pub fn from_config(config: &KeyConfig) -> Self {
        let mut by_name: HashMap<&str, KeyEvent> = DEFAULT_BINDINGS
            .iter()
            .filter_map(|(name, spec)| Some((*name, parse_key(spec)?)))
            .collect();

        for (name, spec) in &config.custom {
            if action_for(name).is_none() {
                tracing::warn!(action = %name, "unknown action in [keys]");
                continue;
            }
            match parse_key(spec) {
                Some(key) => {
                    by_name.insert(name.as_str(), key);
                }
                None => tracing::warn!(action = %name, spec = %spec, "invalid key spec"),
            }
        }

        let editing = by_name
            .into_iter()
            .filter_map(|(name, key)| Some((key, action_for(name)?)))
            .collect();
        Self { editing }
    }

    pub fn get_action(&self, event: KeyEvent) -> Option<Action> {
        let normalized = KeyEvent::new(event.code, event.modifiers);
        self.editing.get(&normalized).cloned()
    }

    /// Key spec currently bound to `action`, for the help overlay.
    pub fn binding_for(&self, action: &Action) -> Option<String> {
        self.editing
            .iter()
            .find(|(_, a)| *a == action)
            .map(|(key, _)| describe_key(key))
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::from_config(&KeyConfig::default())
    }
}

pub fn parse_key(spec: &str) -> Option<KeyEvent> {
    let mut modifiers = KeyModifiers::NONE;
    let mut code = None;
    for part in spec.split('+').map(|p| p.trim().to_ascii_lowercase()) {
        match part.as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "alt" | "meta" => modifiers |= KeyModifiers::ALT,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            "esc" | "escape" => code = Some(KeyCode::Esc),
            "enter" => code = Some(KeyCode::Enter),
            "tab" => code = Some(KeyCode::Tab),
            "space" => code = Some(KeyCode::Char(' ')),
            f if f.len() > 1 && f.starts_with('f') => {
                code = Some(KeyCode::F(f[1..].parse().ok()?));
            }
            c if c.chars().count() == 1 => code = c.chars().next().map(KeyCode::Char),
            _ => return None,
        }
    }
    Some(KeyEvent::new(code?, modifiers))
}

fn describe_key(key: &KeyEvent) -> String {
    let mut parts = Vec::new();
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        parts.push("Ctrl".to_string());
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        parts.push("Alt".to_string());
    }
    if key.modifiers.contains(KeyModifiers::SHIFT) {
        parts.push("Shift".to_string());
    }
    parts.push(match key.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
        KeyCode::F(n) => format!("F{n}"),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        other => format!("{other:?}"),
    });
    parts.join("+")
}
