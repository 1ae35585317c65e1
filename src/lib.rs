pub mod calendar;
pub mod config;
pub mod error;
pub mod events;
pub mod presenter;
pub mod rotation;
pub mod ui;
