pub mod auth;
pub mod convert;
pub mod extract;
pub mod init_config;
