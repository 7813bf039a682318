//! Cross-domain search entry points.
//!
//! # Responsibility
//! - Expose substring query APIs over topics, conversations and notebooks.
//! - Keep search result shaping inside core.

pub mod text;
