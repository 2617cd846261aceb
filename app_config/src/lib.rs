pub mod clap;
pub mod config;
pub mod log_file_rotation;
pub mod log_level_wrapper;

pub use crate::clap::{ClapArgs, Credentials};
pub use crate::config::AppConfig;
