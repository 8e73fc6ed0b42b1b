//! CLI command implementations.

mod config;
mod doctor;
mod process;
mod serve;
mod thumbnail;

pub use config::run_config;
pub use doctor::run_doctor;
pub use process::run_process;
pub use serve::run_serve;
pub use thumbnail::run_thumbnail;
