mod autocomplete;
mod core;
mod history;
mod line;
mod state;

#[cfg(test)]
mod tests;

pub use autocomplete::{find_completion, suggestion_remainder};
pub use history::{resolve_cycle, CycleDirection, CycleResolution};
pub use line::{InputLine, Line, ResultKind, ResultLine};
pub use state::{Session, SessionPhase, INITIAL_COMMAND};
