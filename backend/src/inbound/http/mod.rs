//! HTTP inbound adapter exposing the lesson REST endpoints.

pub mod error;
pub mod health;
pub mod lessons;
pub mod schemas;
pub mod state;
pub mod validation;

pub use error::ApiResult;
