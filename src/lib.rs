#![cfg_attr(not(test), no_std)]

pub mod button;
pub mod config;
pub mod platform;
pub mod serial;
pub mod timing;
pub mod touch;
pub mod ui;
