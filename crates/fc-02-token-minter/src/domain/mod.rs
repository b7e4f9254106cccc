//! # Domain Layer
//!
//! Coin record shape and mint errors.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
