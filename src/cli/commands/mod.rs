//! CLI command implementations.

pub mod init_config;
pub mod inspect;
pub mod scan;
pub mod validate;
