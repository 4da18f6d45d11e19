pub mod admin;
pub mod config;
pub mod employee;
pub mod init;
pub mod log;
pub mod report;
pub mod watch;
