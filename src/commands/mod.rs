//! CLI command handlers.

mod get;
mod info;
mod search;

pub use get::run_get_command;
pub use info::run_info_command;
pub use search::run_search_command;
