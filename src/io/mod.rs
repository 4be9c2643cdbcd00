pub mod bridge;
pub mod config_io;
pub mod storage;
