//! Interactive shell: menu, operator input parsing and result rendering.

pub mod input;
pub mod render;
pub mod shell;

pub use input::MenuOption;
pub use shell::{Shell, ShellError};
