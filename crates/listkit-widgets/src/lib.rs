#![forbid(unsafe_code)]

//! List behaviors for listkit.
//!
//! Both behaviors decorate a [`Collection`](listkit_core::Collection) and can
//! be stacked: a [`Searchable`] over a [`SortedList`] gives type-ahead search
//! over a list that stays sorted.

pub mod searchable;
pub mod sorted;

pub use searchable::{AsRefLabel, SearchKey, Searchable};
pub use sorted::{Diagnostic, Position, SortKey, SortedList};
