#![forbid(unsafe_code)]

//! listkit public facade crate.
//!
//! Re-exports the collection contract from `listkit-core` and the list
//! behaviors from `listkit-widgets`, plus a prelude for day-to-day use.
//!
//! ```
//! use listkit::prelude::*;
//!
//! let mut list = Searchable::new(SortedList::new(["pear", "fig", "apple"]));
//! list.handle_key(Size::new(20, 10), KeyEvent::char('f'));
//! assert_eq!(list.get_ref().focused(), Some(&"fig"));
//! ```

// --- Core re-exports -------------------------------------------------------

pub use listkit_core::collection::{Collection, FocusList, Iter, KeyHandler};
pub use listkit_core::event::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers};
pub use listkit_core::geometry::Size;

#[cfg(feature = "tracing-json")]
pub use listkit_core::logging::{LOG_ENV_VAR, init_json_logging};

// --- Widget re-exports -----------------------------------------------------

pub use listkit_widgets::searchable::{SearchKey, Searchable};
pub use listkit_widgets::sorted::{Diagnostic, Position, SortKey, SortedList};

// --- Errors ---------------------------------------------------------------

pub use listkit_core::error::{Error, Result};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Collection, Diagnostic, Error, Event, FocusList, KeyCode, KeyEvent, KeyHandler, Modifiers,
        Result, Searchable, Size, SortKey, SortedList,
    };

    pub use crate::{core, widgets};
}

pub use listkit_core as core;
pub use listkit_widgets as widgets;
