use super::autocomplete::find_completion;
use super::line::{InputLine, Line};
use serde::Serialize;
use std::sync::Arc;

/// Text the first live line starts with, so the very first render shows a hint.
pub const INITIAL_COMMAND: &str = "c";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionPhase {
    Idle,
    Executing,
}

/// One immutable snapshot of the terminal. Every operation returns a new
/// snapshot; callers swap it in place of the old one.
#[derive(Debug, Clone)]
pub struct Session {
    pub(super) lines: Vec<Line>,
    pub(super) cycle_offset: i64,
    pub(super) suggestion_index: Option<usize>,
    pub(super) phase: SessionPhase,
    pub(super) refocus: bool,
    pub(super) candidates: Arc<[String]>,
}

impl Session {
    pub fn new(candidates: Vec<String>) -> Self {
        let candidates: Arc<[String]> = candidates.into();
        let completion = find_completion(INITIAL_COMMAND, &candidates);
        let suggestion = completion
            .map(|(_, text)| text.to_string())
            .unwrap_or_default();
        let suggestion_index = completion.map(|(idx, _)| idx);
        let mut first = InputLine::live(0, true, suggestion);
        first.command = INITIAL_COMMAND.to_string();

        Self {
            lines: vec![Line::Input(first)],
            cycle_offset: 0,
            suggestion_index,
            phase: SessionPhase::Idle,
            refocus: false,
            candidates,
        }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_executing(&self) -> bool {
        self.phase == SessionPhase::Executing
    }

    pub fn cycle_offset(&self) -> i64 {
        self.cycle_offset
    }

    pub fn suggestion_index(&self) -> Option<usize> {
        self.suggestion_index
    }

    /// Flips whenever the presentation layer should re-focus the edit surface
    /// and put the caret at the end. Only changes matter, not the value.
    pub fn refocus_signal(&self) -> bool {
        self.refocus
    }

    /// The last input line, frozen or not.
    pub fn last_input(&self) -> Option<&InputLine> {
        self.lines.last().and_then(Line::as_input)
    }

    /// The line currently accepting edits. `None` while a command executes.
    pub fn live_line(&self) -> Option<&InputLine> {
        self.last_input().filter(|line| line.editable)
    }

    pub fn live_command(&self) -> &str {
        self.live_line()
            .map(|line| line.command.as_str())
            .unwrap_or_default()
    }

    pub(super) fn live_line_mut(&mut self) -> Option<&mut InputLine> {
        self.lines
            .last_mut()
            .and_then(Line::as_input_mut)
            .filter(|line| line.editable)
    }
}
