pub mod common;
pub mod forms;
pub mod views;
