//! Shared utility functions.
//!
//! This module contains helpers used by both the bar renderer and the pool
//! frame composer.
//!
//! # Overview
//!
//! The utils module currently contains:
//!
//! - [`width`] - Column-aware measuring, truncating and padding of rendered lines
//!
//! # Examples
//!
//! ```rust
//! use barpool::utils::fit_width;
//!
//! assert_eq!(fit_width("héllo", 8), "héllo   ");
//! assert_eq!(fit_width("héllo", 3), "hél");
//! ```

pub mod width;

// Re-export commonly used utilities
pub use width::{fit_width, text_width};
