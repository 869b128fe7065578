pub mod config;
pub mod download;
pub mod fallback;
pub mod install;
pub mod layout;
