pub mod generate;
pub mod init;
pub mod quiz;
pub mod validate;
