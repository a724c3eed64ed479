pub mod args;
pub mod storage;
pub mod tracker;
pub mod ui;
