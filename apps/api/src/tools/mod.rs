//! The five generation tools: request validation, upload handling and handlers.

pub mod handlers;
pub mod multipart;
pub mod validation;
