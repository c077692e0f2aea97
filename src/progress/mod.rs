//! Progress module containing the bar state and its rendering.
//!
//! # Overview
//!
//! The progress module is organized into two main components:
//!
//! - `bar` - The lock-guarded [`Bar`] state and its [`BarSnapshot`]
//! - `style` - The swappable [`Template`] and the [`ProgressChars`] glyph palettes
//!
//! # Examples
//!
//! ## Driving a Bar by Hand
//!
//! ```rust
//! use barpool::progress::Bar;
//!
//! let bar = Bar::new(200);
//! bar.set_title("Downloading File A:");
//! bar.add(50);
//!
//! let line = bar.render(80);
//! assert!(line.starts_with("Downloading File A: 50/200"));
//! ```
//!
//! ## Recording a Failure
//!
//! ```rust
//! use barpool::{progress::Bar, Error};
//!
//! let bar = Bar::new(10);
//! bar.set_err(Error::Cancelled);
//! bar.finish();
//! assert!(bar.error().is_some());
//! ```

pub(crate) mod bar;
pub(crate) mod style;

pub use bar::{Bar, BarSnapshot};
pub use style::{DefaultTemplate, ProgressChars, Template};
