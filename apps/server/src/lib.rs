pub mod api;
pub mod config;
pub mod dispatch;
mod main_lib;

pub use main_lib::{build_tools, init_tracing};
