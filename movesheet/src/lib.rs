//! Terminal viewer for move and ability CSV sheets.

pub mod action;
pub mod audio;
pub mod components;
pub mod config;
pub mod csv;
pub mod effect;
pub mod filter;
pub mod icons;
pub mod loader;
pub mod reducer;
pub mod schema;
pub mod state;
pub mod ui;
