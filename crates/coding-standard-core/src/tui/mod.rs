//! Interactive prompts using cliclack
//!
//! This module is optional and only available when the `tui` feature is enabled.

mod prompts;

pub use prompts::ClackPrompter;

/// Whether a user is sitting at the terminal
pub fn terminal_attached() -> bool {
    console::user_attended()
}
