use crate::runtime::{ScrollAction, UserInputEvent};
use crate::state::{CycleDirection, InputLine};
use crate::ui::input_metrics::clamp_to_char_boundary_left;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

const PAGE_ROWS: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
struct SyncKey {
    line_id: usize,
    refocus: bool,
    text: String,
}

/// Caret bookkeeping for the live line. The session owns the text; this only
/// tracks where the caret sits and turns keys into session events.
#[derive(Default, Debug)]
pub struct LineEditor {
    cursor: usize,
    synced: Option<SyncKey>,
}

impl LineEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Moves the caret to the end whenever the session replaced the text, moved
    /// to a new line, or flipped its refocus signal.
    pub fn sync(&mut self, live: Option<&InputLine>, refocus: bool) {
        let Some(line) = live else {
            self.synced = None;
            self.cursor = 0;
            return;
        };
        let key = SyncKey {
            line_id: line.id,
            refocus,
            text: line.command.clone(),
        };
        if self.synced.as_ref() != Some(&key) {
            self.cursor = line.command.len();
            self.synced = Some(key);
        }
        self.cursor = clamp_to_char_boundary_left(&line.command, self.cursor);
    }

    /// Maps a key press against the current live text. Editing keys return
    /// `TextChanged` with the new text and move the caret to match.
    pub fn map_key(&mut self, text: &str, key: KeyEvent) -> Option<UserInputEvent> {
        let control = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('d') if control => Some(UserInputEvent::Quit),
            KeyCode::Char('u') if control => self.edited(text, String::new(), 0),
            KeyCode::Enter => Some(UserInputEvent::Submit),
            KeyCode::Tab => Some(UserInputEvent::Tab),
            KeyCode::Up => Some(UserInputEvent::Cycle(CycleDirection::Previous)),
            KeyCode::Down => Some(UserInputEvent::Cycle(CycleDirection::Next)),
            KeyCode::PageUp => Some(UserInputEvent::Scroll(ScrollAction::PageUp(PAGE_ROWS))),
            KeyCode::PageDown => Some(UserInputEvent::Scroll(ScrollAction::PageDown(PAGE_ROWS))),
            KeyCode::Home if control => Some(UserInputEvent::Scroll(ScrollAction::Home)),
            KeyCode::End if control => Some(UserInputEvent::Scroll(ScrollAction::End)),
            KeyCode::Home => {
                self.cursor = 0;
                None
            }
            KeyCode::End => {
                self.cursor = text.len();
                None
            }
            KeyCode::Left => {
                self.cursor = prev_char_boundary(text, self.cursor);
                None
            }
            KeyCode::Right => {
                self.cursor = next_char_boundary(text, self.cursor);
                None
            }
            KeyCode::Backspace => {
                let end = clamp_to_char_boundary_left(text, self.cursor);
                if end == 0 {
                    return None;
                }
                let start = prev_char_boundary(text, end);
                let mut next = text.to_string();
                next.replace_range(start..end, "");
                self.edited(text, next, start)
            }
            KeyCode::Delete => {
                let start = clamp_to_char_boundary_left(text, self.cursor);
                if start >= text.len() {
                    return None;
                }
                let end = next_char_boundary(text, start);
                let mut next = text.to_string();
                next.replace_range(start..end, "");
                self.edited(text, next, start)
            }
            KeyCode::Char(ch) if !control && !key.modifiers.contains(KeyModifiers::ALT) => {
                self.insert_str(text, &ch.to_string())
            }
            _ => None,
        }
    }

    /// Pasted text lands at the caret; line breaks collapse to spaces.
    pub fn insert_str(&mut self, text: &str, value: &str) -> Option<UserInputEvent> {
        let value: String = value
            .chars()
            .map(|ch| if ch == '\n' || ch == '\r' { ' ' } else { ch })
            .collect();
        if value.is_empty() {
            return None;
        }
        let cursor = clamp_to_char_boundary_left(text, self.cursor);
        let mut next = text.to_string();
        next.insert_str(cursor, &value);
        self.edited(text, next, cursor + value.len())
    }

    fn edited(&mut self, before: &str, after: String, cursor: usize) -> Option<UserInputEvent> {
        if before == after {
            return None;
        }
        self.cursor = cursor;
        if let Some(key) = self.synced.as_mut() {
            key.text = after.clone();
        }
        Some(UserInputEvent::TextChanged(after))
    }
}

fn prev_char_boundary(text: &str, idx: usize) -> usize {
    let i = clamp_to_char_boundary_left(text, idx);
    if i == 0 {
        return 0;
    }
    let mut j = i - 1;
    while j > 0 && !text.is_char_boundary(j) {
        j -= 1;
    }
    j
}

fn next_char_boundary(text: &str, idx: usize) -> usize {
    let i = clamp_to_char_boundary_left(text, idx);
    if i >= text.len() {
        return text.len();
    }
    match text[i..].chars().next() {
        Some(ch) => i + ch.len_utf8(),
        None => text.len(),
    }
}
