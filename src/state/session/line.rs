use super::autocomplete::suggestion_remainder;
use crate::commands::CommandOutcome;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputLine {
    pub id: usize,
    pub command: String,
    pub editable: bool,
    pub autocomplete_enabled: bool,
    pub suggestion: String,
}

impl InputLine {
    pub(super) fn live(id: usize, autocomplete_enabled: bool, suggestion: String) -> Self {
        Self {
            id,
            command: String::new(),
            editable: true,
            autocomplete_enabled,
            suggestion,
        }
    }

    /// Frozen lines are history: never edited or completed again.
    pub(super) fn freeze(&mut self) {
        self.editable = false;
        self.autocomplete_enabled = false;
        self.suggestion.clear();
    }

    /// The part of the suggestion not yet typed, when it should be shown at all.
    pub fn visible_suggestion(&self) -> Option<String> {
        if !self.autocomplete_enabled {
            return None;
        }
        suggestion_remainder(&self.command, &self.suggestion)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResultKind {
    PlainText,
    StructuredValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultLine {
    pub id: usize,
    pub kind: ResultKind,
    pub payload: String,
}

impl ResultLine {
    /// Successful output is assumed to be JSON; errors are always plain text.
    pub(super) fn from_outcome(id: usize, outcome: &CommandOutcome) -> Self {
        let kind = if outcome.success {
            ResultKind::StructuredValue
        } else {
            ResultKind::PlainText
        };
        Self {
            id,
            kind,
            payload: outcome.message.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Line {
    Input(InputLine),
    Result(ResultLine),
}

impl Line {
    pub fn id(&self) -> usize {
        match self {
            Line::Input(line) => line.id,
            Line::Result(line) => line.id,
        }
    }

    pub fn as_input(&self) -> Option<&InputLine> {
        match self {
            Line::Input(line) => Some(line),
            Line::Result(_) => None,
        }
    }

    pub(super) fn as_input_mut(&mut self) -> Option<&mut InputLine> {
        match self {
            Line::Input(line) => Some(line),
            Line::Result(_) => None,
        }
    }
}
