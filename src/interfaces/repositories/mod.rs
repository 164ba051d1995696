pub mod file;
pub mod postgres;
pub mod storage;
