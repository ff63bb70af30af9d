pub mod config;
pub mod format;
pub mod lang;
pub mod math;
pub mod persistence;
pub mod repl;
pub mod session;
