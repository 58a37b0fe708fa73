//! CLI subcommand implementations

pub mod history;
pub mod init;
pub mod mat;
pub mod price;
pub mod quote;
pub mod rcp;
pub mod ven;
