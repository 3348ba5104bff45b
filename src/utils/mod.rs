//! Utility functions shared across layers.
//!
//! - [`code_generator`] - Short link id generation and promo code normalization
//! - [`client_info`] - Best-effort client metadata from request headers

pub mod client_info;
pub mod code_generator;
