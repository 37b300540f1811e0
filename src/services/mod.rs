pub mod console_input;
pub mod prompter;

pub use console_input::ConsoleInput;
pub use prompter::{ConsolePrompter, Prompter};
