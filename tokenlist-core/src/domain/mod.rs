//! Domain layer - token list entities
//!
//! This module contains the value types shared by every stage of validation.

pub mod entities;

pub use entities::*;
