//! Request middleware.
//!
//! Purpose: request lifecycle concerns that sit in front of every handler,
//! currently trace-id propagation.

pub mod trace;

pub use trace::Trace;
