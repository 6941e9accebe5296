pub mod frontend;
pub mod r#loop;
pub mod mode;
pub mod update;

pub use frontend::{FrontendAdapter, ScrollAction, UserInputEvent};
pub use mode::ShellMode;
pub use r#loop::Runtime;
pub use update::UiUpdate;
