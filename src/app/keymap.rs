use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::event::Key;

/// What a terminal key press asks the playground to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Intent {
    Quit,
    /// Scroll by whole lines; moves focus instead while a dialog is open.
    ScrollLines(i32),
    ScrollPages(i32),
    ScrollTop,
    ScrollBottom,
    FocusNext,
    FocusPrev,
    /// Enter on the focused element.
    Activate,
    /// Space: a key press first, a click on buttons when nothing handled it.
    Press,
    Page(Key),
    Swipe { forward: bool },
    /// Text editing inside the focused form field.
    Edit(KeyEvent),
}

pub(crate) fn map_key(key: KeyEvent, editing: bool) -> Option<Intent> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => Some(Intent::Quit),
            KeyCode::Char('d') => Some(Intent::ScrollPages(1)),
            KeyCode::Char('u') => Some(Intent::ScrollPages(-1)),
            _ if editing => Some(Intent::Edit(key)),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Tab => Some(Intent::FocusNext),
        KeyCode::BackTab => Some(Intent::FocusPrev),
        KeyCode::Enter => Some(Intent::Activate),
        KeyCode::Esc => Some(Intent::Page(Key::Escape)),
        KeyCode::Up => Some(Intent::ScrollLines(-1)),
        KeyCode::Down => Some(Intent::ScrollLines(1)),
        KeyCode::PageUp => Some(Intent::ScrollPages(-1)),
        KeyCode::PageDown => Some(Intent::ScrollPages(1)),
        _ if editing => match key.code {
            KeyCode::Char(_)
            | KeyCode::Backspace
            | KeyCode::Delete
            | KeyCode::Left
            | KeyCode::Right
            | KeyCode::Home
            | KeyCode::End => Some(Intent::Edit(key)),
            _ => None,
        },
        KeyCode::Left => Some(Intent::Page(Key::ArrowLeft)),
        KeyCode::Right => Some(Intent::Page(Key::ArrowRight)),
        KeyCode::Home | KeyCode::Char('g') => Some(Intent::ScrollTop),
        KeyCode::End | KeyCode::Char('G') => Some(Intent::ScrollBottom),
        KeyCode::Char(' ') => Some(Intent::Press),
        KeyCode::Char('j') => Some(Intent::ScrollLines(1)),
        KeyCode::Char('k') => Some(Intent::ScrollLines(-1)),
        KeyCode::Char('<') => Some(Intent::Swipe { forward: false }),
        KeyCode::Char('>') => Some(Intent::Swipe { forward: true }),
        KeyCode::Char('q') => Some(Intent::Quit),
        _ => None,
    }
}
