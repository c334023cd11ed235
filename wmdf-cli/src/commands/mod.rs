//! Command implementations for the wmdf CLI.

pub mod convert;
pub mod info;
pub mod structure;

pub use convert::{ConvertArgs, cmd_convert};
pub use info::cmd_info;
pub use structure::cmd_structure;
