//! Maps terminal input to chat intents.
//!
//! Kept free of session state so every binding can be tested directly.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};

const WHEEL_STEP: u16 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatIntent {
    Submit,
    InsertChar(char),
    InsertNewline,
    Paste(String),
    DeleteBackward,
    ClearDraft,
    CycleSuggestion,
    PickSuggestion(usize),
    ScrollUp(u16),
    ScrollDown(u16),
    PageUp,
    PageDown,
    ScrollToBottom,
    Quit,
}

pub fn map_key(key: &KeyEvent) -> Option<ChatIntent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    // AltGr arrives as Ctrl+Alt and produces a printable character.
    let ctrl_only = ctrl && !alt;
    let alt_only = alt && !ctrl;

    let intent = match key.code {
        KeyCode::Char('c') if ctrl_only => ChatIntent::Quit,
        KeyCode::Char('u') if ctrl_only => ChatIntent::ClearDraft,
        KeyCode::Char('j') if ctrl_only => ChatIntent::InsertNewline,
        KeyCode::Char(digit @ '1'..='4') if alt_only => {
            ChatIntent::PickSuggestion(digit as usize - '1' as usize)
        }
        KeyCode::Char(_) if ctrl_only || alt_only => return None,
        KeyCode::Char(c) => ChatIntent::InsertChar(c),
        KeyCode::Enter if alt || shift => ChatIntent::InsertNewline,
        KeyCode::Enter => ChatIntent::Submit,
        KeyCode::Esc => ChatIntent::ClearDraft,
        KeyCode::Backspace => ChatIntent::DeleteBackward,
        KeyCode::Tab => ChatIntent::CycleSuggestion,
        KeyCode::Up => ChatIntent::ScrollUp(1),
        KeyCode::Down => ChatIntent::ScrollDown(1),
        KeyCode::PageUp => ChatIntent::PageUp,
        KeyCode::PageDown => ChatIntent::PageDown,
        KeyCode::End => ChatIntent::ScrollToBottom,
        _ => return None,
    };
    Some(intent)
}

pub fn map_mouse(event: &MouseEvent) -> Option<ChatIntent> {
    match event.kind {
        MouseEventKind::ScrollUp => Some(ChatIntent::ScrollUp(WHEEL_STEP)),
        MouseEventKind::ScrollDown => Some(ChatIntent::ScrollDown(WHEEL_STEP)),
        _ => None,
    }
}
