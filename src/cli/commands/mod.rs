pub mod config;
pub mod del;
pub mod init;
pub mod list;
pub mod log;
pub mod pause;
pub mod project;
pub mod report;
pub mod start;
pub mod status;
pub mod stop;
