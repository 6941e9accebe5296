use super::autocomplete::find_completion;
use super::history::{resolve_cycle, CycleDirection};
use super::line::{InputLine, Line, ResultLine};
use super::state::{Session, SessionPhase};
use crate::commands::{CommandOutcome, CommandPipeline};
use crate::util::sanitize_command;
use std::time::Duration;

impl Session {
    /// Replaces the live line's text and re-matches the suggestion.
    pub fn update_command(&self, text: &str) -> Session {
        let mut next = self.clone();
        if next.is_executing() {
            return next;
        }
        let command = sanitize_command(text);
        let completion = find_completion(&command, &self.candidates);
        let Some(line) = next.live_line_mut() else {
            return next;
        };

        line.command = command;
        line.autocomplete_enabled = true;
        line.suggestion = completion
            .map(|(_, text)| text.to_string())
            .unwrap_or_default();
        next.suggestion_index = completion.map(|(idx, _)| idx);
        next.cycle_offset = 0;
        next
    }

    /// Steps through earlier commands. Rejected steps return an equal snapshot.
    pub fn cycle_command(&self, direction: CycleDirection) -> Session {
        let mut next = self.clone();
        if next.is_executing() {
            return next;
        }
        let Some(resolution) = resolve_cycle(&self.lines, self.cycle_offset, direction) else {
            return next;
        };
        let Some(line) = next.live_line_mut() else {
            return next;
        };

        line.command = resolution.command;
        next.cycle_offset = resolution.offset;
        next.refocus = !next.refocus;
        tracing::debug!(offset = next.cycle_offset, "history cycled");
        next
    }

    /// Takes the whole suggestion as the command text. The line stays editable.
    pub fn accept_suggestion(&self) -> Session {
        let Some(line) = self.live_line() else {
            return self.clone();
        };
        if !line.autocomplete_enabled || line.suggestion.is_empty() {
            return self.clone();
        }

        let mut next = self.update_command(&line.suggestion);
        next.refocus = !next.refocus;
        next
    }

    /// Sets the live text verbatim, the first half of click-to-fill.
    pub fn fill_command(&self, command: &str) -> Session {
        let mut next = self.clone();
        if next.is_executing() {
            return next;
        }
        let Some(line) = next.live_line_mut() else {
            return next;
        };

        line.command = sanitize_command(command);
        next.cycle_offset = 0;
        next.refocus = !next.refocus;
        next
    }

    /// Freezes the live line and enters `Executing`, returning the command to
    /// run. `None` when an execution is already in flight.
    pub fn begin_execution(&self) -> Option<(Session, String)> {
        if self.is_executing() {
            return None;
        }
        let mut next = self.clone();
        let line = next.live_line_mut()?;
        line.freeze();
        let command = line.command.clone();

        next.phase = SessionPhase::Executing;
        next.cycle_offset = 0;
        tracing::debug!(command = %command, "execution started");
        Some((next, command))
    }

    /// Appends the result and a fresh live line, returning to `Idle`.
    pub fn finish_execution(&self, outcome: &CommandOutcome) -> Session {
        let mut next = self.clone();
        if !next.is_executing() {
            return next;
        }

        let result_id = next.lines.len();
        next.lines
            .push(Line::Result(ResultLine::from_outcome(result_id, outcome)));

        let autocomplete_enabled = !outcome.success;
        let unseen = if autocomplete_enabled {
            next.next_unseen_candidate()
        } else {
            None
        };
        let suggestion = unseen
            .map(|idx| next.candidates[idx].clone())
            .unwrap_or_default();
        let input_id = next.lines.len();
        next.lines.push(Line::Input(InputLine::live(
            input_id,
            autocomplete_enabled,
            suggestion,
        )));

        next.suggestion_index = unseen;
        next.phase = SessionPhase::Idle;
        next.cycle_offset = 0;
        next.refocus = !next.refocus;
        next
    }

    /// Runs the live line through `pipeline` and returns the settled snapshot.
    pub async fn execute_command(&self, pipeline: &CommandPipeline) -> Session {
        let Some((executing, command)) = self.begin_execution() else {
            return self.clone();
        };
        let outcome = pipeline.execute(&command).await;
        executing.finish_execution(&outcome)
    }

    /// Click-to-fill: sets the text, waits `settle`, then executes.
    pub async fn fill_and_execute(
        &self,
        command: &str,
        pipeline: &CommandPipeline,
        settle: Duration,
    ) -> Session {
        let filled = self.fill_command(command);
        if !settle.is_zero() {
            tokio::time::sleep(settle).await;
        }
        filled.execute_command(pipeline).await
    }

    /// First candidate no frozen line has executed yet.
    fn next_unseen_candidate(&self) -> Option<usize> {
        let executed: Vec<String> = self
            .lines
            .iter()
            .filter_map(Line::as_input)
            .filter(|line| !line.editable)
            .map(|line| sanitize_command(&line.command))
            .collect();

        self.candidates
            .iter()
            .position(|candidate| !executed.iter().any(|seen| seen == candidate))
    }
}
