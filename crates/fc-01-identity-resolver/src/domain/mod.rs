//! # Domain Layer
//!
//! Identifier classification, raw-key address derivation and profile inbox
//! lookup. Contains no I/O.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
