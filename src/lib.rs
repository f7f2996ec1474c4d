//! Terminal scouting form for FIRST Robotics Competition matches.
//!
//! Scouts fill in a fixed form per team and match. Submitted forms are kept
//! in a local JSON file and can be handed to another device as a QR code.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod events;
pub mod export;
pub mod logger;
pub mod schema;
pub mod state;
pub mod store;
pub mod ui;
