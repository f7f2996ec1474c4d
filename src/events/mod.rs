//! Event handling module.
//!
//! This module contains handlers for different types of events:
//! - Storage events: loading and saving the record list
//! - Terminal events: User input and terminal interactions

pub mod storage;
pub mod terminal;
