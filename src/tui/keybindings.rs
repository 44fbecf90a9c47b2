//! Keybinding definitions
//!
//! The table below drives both key dispatch and the help overlay.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Help,
    MoveUp,
    MoveDown,
    GoTop,
    GoBottom,
    OpenDetails,
    CloseDetails,
    NextDetails,
    PrevDetails,
    ScrollDetailsDown,
    ScrollDetailsUp,
}

/// A keybinding definition
#[derive(Debug, Clone)]
pub struct Keybinding {
    /// The key code
    pub key: KeyCode,
    /// Required modifiers
    pub modifiers: KeyModifiers,
    /// Description of what the key does
    pub description: &'static str,
    /// Context where this keybinding is active
    pub context: KeyContext,
    pub action: Action,
}

/// Context in which a keybinding is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyContext {
    /// Active everywhere
    Global,
    /// Active on the expense list
    List,
    /// Active while the detail overlay is open
    Detail,
}

impl KeyContext {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Global => "Global Keys",
            Self::List => "Expense List",
            Self::Detail => "Expense Details",
        }
    }
}

const fn bind(
    key: KeyCode,
    modifiers: KeyModifiers,
    action: Action,
    description: &'static str,
    context: KeyContext,
) -> Keybinding {
    Keybinding {
        key,
        modifiers,
        description,
        context,
        action,
    }
}

/// All keybindings
pub static KEYBINDINGS: &[Keybinding] = &[
    // Global
    bind(KeyCode::Char('c'), KeyModifiers::CONTROL, Action::Quit, "Quit", KeyContext::Global),
    // List
    bind(KeyCode::Char('q'), KeyModifiers::NONE, Action::Quit, "Quit", KeyContext::List),
    bind(KeyCode::Esc, KeyModifiers::NONE, Action::Quit, "Quit", KeyContext::List),
    bind(KeyCode::Char('?'), KeyModifiers::NONE, Action::Help, "Show help", KeyContext::List),
    bind(KeyCode::Char('j'), KeyModifiers::NONE, Action::MoveDown, "Next expense", KeyContext::List),
    bind(KeyCode::Down, KeyModifiers::NONE, Action::MoveDown, "Next expense", KeyContext::List),
    bind(KeyCode::Char('k'), KeyModifiers::NONE, Action::MoveUp, "Previous expense", KeyContext::List),
    bind(KeyCode::Up, KeyModifiers::NONE, Action::MoveUp, "Previous expense", KeyContext::List),
    bind(KeyCode::Char('g'), KeyModifiers::NONE, Action::GoTop, "First expense", KeyContext::List),
    bind(KeyCode::Home, KeyModifiers::NONE, Action::GoTop, "First expense", KeyContext::List),
    bind(KeyCode::Char('G'), KeyModifiers::SHIFT, Action::GoBottom, "Last expense", KeyContext::List),
    bind(KeyCode::End, KeyModifiers::NONE, Action::GoBottom, "Last expense", KeyContext::List),
    bind(KeyCode::Enter, KeyModifiers::NONE, Action::OpenDetails, "Open details", KeyContext::List),
    bind(KeyCode::Char('d'), KeyModifiers::NONE, Action::OpenDetails, "Open details", KeyContext::List),
    // Detail
    bind(KeyCode::Esc, KeyModifiers::NONE, Action::CloseDetails, "Close details", KeyContext::Detail),
    bind(KeyCode::Char('c'), KeyModifiers::NONE, Action::CloseDetails, "Close details", KeyContext::Detail),
    bind(KeyCode::Char('q'), KeyModifiers::NONE, Action::CloseDetails, "Close details", KeyContext::Detail),
    bind(KeyCode::Backspace, KeyModifiers::NONE, Action::CloseDetails, "Close details", KeyContext::Detail),
    bind(KeyCode::Char('j'), KeyModifiers::NONE, Action::NextDetails, "Next expense's details", KeyContext::Detail),
    bind(KeyCode::Down, KeyModifiers::NONE, Action::NextDetails, "Next expense's details", KeyContext::Detail),
    bind(KeyCode::Char('k'), KeyModifiers::NONE, Action::PrevDetails, "Previous expense's details", KeyContext::Detail),
    bind(KeyCode::Up, KeyModifiers::NONE, Action::PrevDetails, "Previous expense's details", KeyContext::Detail),
    bind(KeyCode::PageDown, KeyModifiers::NONE, Action::ScrollDetailsDown, "Scroll details down", KeyContext::Detail),
    bind(KeyCode::PageUp, KeyModifiers::NONE, Action::ScrollDetailsUp, "Scroll details up", KeyContext::Detail),
];

/// Resolve a key press in `context`
pub fn lookup(context: KeyContext, key: &KeyEvent) -> Option<Action> {
    KEYBINDINGS
        .iter()
        .filter(|kb| kb.context == context || kb.context == KeyContext::Global)
        .find(|kb| matches_key(kb, key))
        .map(|kb| kb.action)
}

fn matches_key(kb: &Keybinding, key: &KeyEvent) -> bool {
    if kb.key != key.code {
        return false;
    }
    match kb.key {
        // Terminals disagree on whether uppercase letters carry SHIFT
        KeyCode::Char(_) => {
            let relevant = key.modifiers & !KeyModifiers::SHIFT;
            relevant == kb.modifiers & !KeyModifiers::SHIFT
        }
        _ => key.modifiers == kb.modifiers,
    }
}

/// Get keybindings for a specific context
pub fn get_keybindings(context: KeyContext) -> Vec<&'static Keybinding> {
    KEYBINDINGS
        .iter()
        .filter(|kb| kb.context == context)
        .collect()
}

/// Format a keybinding for display
pub fn format_keybinding(kb: &Keybinding) -> String {
    let key_str = match kb.key {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::PageUp => "PgUp".to_string(),
        KeyCode::PageDown => "PgDn".to_string(),
        _ => format!("{:?}", kb.key),
    };

    if kb.modifiers.contains(KeyModifiers::CONTROL) {
        format!("Ctrl+{}", key_str)
    } else {
        key_str
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_lookup_by_context() {
        assert_eq!(lookup(KeyContext::List, &press(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(
            lookup(KeyContext::Detail, &press(KeyCode::Char('q'))),
            Some(Action::CloseDetails)
        );
        assert_eq!(lookup(KeyContext::List, &press(KeyCode::Enter)), Some(Action::OpenDetails));
        assert_eq!(lookup(KeyContext::Detail, &press(KeyCode::Enter)), None);
        assert_eq!(
            lookup(KeyContext::Detail, &press(KeyCode::PageDown)),
            Some(Action::ScrollDetailsDown)
        );
        assert_eq!(lookup(KeyContext::List, &press(KeyCode::PageDown)), None);
    }

    #[test]
    fn test_ctrl_c_is_global() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(lookup(KeyContext::Detail, &ctrl_c), Some(Action::Quit));
        assert_eq!(lookup(KeyContext::List, &ctrl_c), Some(Action::Quit));
    }

    #[test]
    fn test_uppercase_with_or_without_shift() {
        let shifted = KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT);
        assert_eq!(lookup(KeyContext::List, &shifted), Some(Action::GoBottom));
        assert_eq!(lookup(KeyContext::List, &press(KeyCode::Char('G'))), Some(Action::GoBottom));
    }

    #[test]
    fn test_format_keybinding() {
        let ctrl_c = &KEYBINDINGS[0];
        assert_eq!(format_keybinding(ctrl_c), "Ctrl+c");
        let enter = get_keybindings(KeyContext::List)
            .into_iter()
            .find(|kb| kb.key == KeyCode::Enter)
            .unwrap();
        assert_eq!(format_keybinding(enter), "Enter");
    }
}
