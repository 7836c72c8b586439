//! CLI flags

mod globals;
pub use globals::GlobalArgs;

mod config;
pub use config::ConfigArgs;
