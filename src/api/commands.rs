//! Command modules for the Tauri bridge
//!
//! - `clipboard`: history listing plus activate / remove / clear
//! - `settings`: monitoring toggle and settings access

pub mod clipboard;
pub mod settings;
