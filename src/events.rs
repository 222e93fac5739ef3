use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks the application to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Type a character into the draft
    Insert(char),
    Newline,
    Backspace,
    /// Empty the draft
    ClearDraft,
    /// Append clipboard text to the draft
    Paste,
    /// Submit the draft for grading
    Submit,
    Quit,
    None,
}

/// Translate a key event into an [`Action`]
pub fn map_key(key: KeyEvent) -> Action {
    // Release/repeat events are reported on some platforms; act on presses only
    if key.kind == KeyEventKind::Release {
        return Action::None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => Action::Quit,
        KeyCode::Char('c') | KeyCode::Char('q') if ctrl => Action::Quit,
        KeyCode::Char('s') if ctrl => Action::Submit,
        KeyCode::F(5) => Action::Submit,
        KeyCode::Enter if ctrl => Action::Submit,
        KeyCode::Char('u') if ctrl => Action::ClearDraft,
        KeyCode::Char('v') if ctrl => Action::Paste,
        KeyCode::Char(_) if ctrl => Action::None,
        KeyCode::Char(c) => Action::Insert(c),
        KeyCode::Tab => Action::Insert('\t'),
        KeyCode::Enter => Action::Newline,
        KeyCode::Backspace => Action::Backspace,
        _ => Action::None,
    }
}

/// Apply an editing action to the draft text.
///
/// Returns false for actions that do not edit the draft.
pub fn apply_edit(draft: &mut String, action: &Action) -> bool {
    match action {
        Action::Insert(c) => {
            draft.push(*c);
            true
        }
        Action::Newline => {
            draft.push('\n');
            true
        }
        Action::Backspace => {
            draft.pop();
            true
        }
        Action::ClearDraft => {
            draft.clear();
            true
        }
        _ => false,
    }
}
