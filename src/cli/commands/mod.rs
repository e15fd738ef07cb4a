pub mod config;
pub mod export;
pub mod facets;
pub mod init;
pub mod list;
pub mod source;
pub mod summary;
