pub mod session;

pub use session::{
    CycleDirection, InputLine, Line, ResultKind, ResultLine, Session, SessionPhase,
};
