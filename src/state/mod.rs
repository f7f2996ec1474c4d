//! Application state management module.
//!
//! This module contains the core state management for the application, including:
//! - Main `State` struct that holds all application data
//! - Navigation types (View, SessionMode)
//! - The form editing session
//! - State error handling

mod error;
mod navigation;
mod session;

pub use error::StateError;
pub use navigation::{SessionMode, View};
pub use session::{FieldEntry, FormSession, SectionEntry};

#[path = "state_impl.rs"]
mod state_impl;

pub use state_impl::{QrPopup, State};
