use super::line::Line;

/// Input lines sit at even positions with results between them, so one step
/// through history moves two positions in the line sequence.
const LINE_STRIDE: i64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleDirection {
    Previous,
    Next,
}

impl CycleDirection {
    pub fn step(self) -> i64 {
        match self {
            CycleDirection::Previous => -1,
            CycleDirection::Next => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleResolution {
    pub offset: i64,
    pub command: String,
}

/// Resolves the text to restore when stepping `direction` from `offset`.
/// `None` means the step is rejected: past the live line, or before the
/// first command ever issued.
pub fn resolve_cycle(
    lines: &[Line],
    offset: i64,
    direction: CycleDirection,
) -> Option<CycleResolution> {
    let live_index = i64::try_from(lines.len()).ok()?.checked_sub(1)?;
    let offset = offset + direction.step();
    if offset > 0 {
        return None;
    }
    if offset == 0 {
        return Some(CycleResolution {
            offset,
            command: String::new(),
        });
    }

    let index = live_index + offset * LINE_STRIDE;
    if index < 0 {
        return None;
    }
    let line = lines.get(usize::try_from(index).ok()?)?.as_input()?;
    Some(CycleResolution {
        offset,
        command: line.command.clone(),
    })
}
