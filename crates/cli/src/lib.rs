//! Interactive front end for a single store.

pub mod args;
pub mod menu;
pub mod seed;

pub use args::{CommandLine, LogFormatArg};
pub use menu::{Menu, Shop};
pub use seed::{default_inventory, default_store};
