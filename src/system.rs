//! OS-facing capabilities: clipboard, keyboard and display

pub mod clipboard;
pub mod display;
pub mod keyboard;

#[cfg(test)]
pub mod fakes;
