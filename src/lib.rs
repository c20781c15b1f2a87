pub mod app;
pub mod config;
pub mod entries;
pub mod error;
pub mod nutrition;
pub mod state;
pub mod storage;
