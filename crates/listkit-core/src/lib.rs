#![forbid(unsafe_code)]

//! Core: the collection contract, key events, focus tracking, and errors.
//!
//! Everything here describes what a list-style widget toolkit must provide
//! for the behaviors in `listkit-widgets` to work: an ordered, indexable,
//! mutable [`Collection`](collection::Collection) with a focused index, and
//! a [`KeyHandler`](collection::KeyHandler) that reports whether it consumed
//! a key.

pub mod collection;
pub mod error;
pub mod event;
pub mod geometry;
pub mod logging;

pub use collection::{Collection, FocusList, Iter, KeyHandler};
pub use error::{Error, Result};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace, warn};
