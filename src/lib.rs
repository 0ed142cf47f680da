pub mod config;
pub mod error;
pub mod extract;
pub mod models;
pub mod parsers;
pub mod server;
pub mod storage;
pub mod utils;
