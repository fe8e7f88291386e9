//! Interactive console: tables, selection and confirmation prompts

pub mod prompter;
pub mod selector;
pub mod table;

pub use prompter::{Console, Prompter};
pub use selector::{select_entry, show_attributes};
