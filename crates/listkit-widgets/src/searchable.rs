#![forbid(unsafe_code)]

//! Type-ahead search over a list: typing jumps to the first matching item.
//!
//! [`Searchable`] wraps a [`Collection`] that also handles keys. Every key
//! goes to the wrapped list first; whatever it does not consume drives a
//! small state machine over the accumulated search prefix:
//!
//! | Key | Effect | Prefix afterwards |
//! |-----|--------|-------------------|
//! | consumed by the list | none | cleared |
//! | `Backspace`, prefix non-empty | drop the last char, focus the first match of the shorter prefix | shortened |
//! | `Backspace`, prefix empty | none | empty |
//! | a typed character | focus the first item whose label starts with prefix + char | extended, or unchanged if nothing matches |
//! | anything else | returned to the caller | cleared |
//!
//! Matching is a case-sensitive `starts_with` on the item's label, scanning
//! from index 0; the first hit wins even if a later item is closer to the
//! current focus.
//!
//! The prefix is empty or matches at least one item; a character that would
//! break that is rejected and the focus stays put.
//!
//! # Example
//!
//! ```
//! use listkit_core::{Collection, FocusList, KeyHandler};
//! use listkit_core::event::{KeyCode, KeyEvent};
//! use listkit_core::geometry::Size;
//! use listkit_widgets::searchable::Searchable;
//!
//! let list = FocusList::new(["abc", "aab", "aaa", "bcd", "bdd"]);
//! let mut search = Searchable::new(list);
//! let size = Size::new(40, 40);
//!
//! search.handle_key(size, KeyEvent::char('b'));
//! assert_eq!(search.focus(), Some(3));
//! search.handle_key(size, KeyEvent::new(KeyCode::Escape));
//! assert_eq!(search.search(), "");
//! ```

use core::cmp::Ordering;
use core::fmt;

use listkit_core::collection::{Collection, KeyHandler};
use listkit_core::error::{Error, Result};
use listkit_core::event::{Event, KeyCode, KeyEvent};
use listkit_core::geometry::Size;
use listkit_core::{debug, trace};

/// How a key that reached the search logic is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKey {
    /// The wrapped list already used the key.
    Consumed,
    /// Delete the last character of the prefix.
    Backspace,
    /// A single typed character.
    Character(char),
    /// Any other key: navigation, Escape, function keys, chords.
    Other(KeyEvent),
}

impl SearchKey {
    /// Classify what the wrapped list handed back: `None` means it consumed
    /// the key.
    #[must_use]
    pub fn classify(remaining: Option<KeyEvent>) -> Self {
        let Some(key) = remaining else {
            return Self::Consumed;
        };
        if key.code == KeyCode::Backspace {
            return Self::Backspace;
        }
        match key.typed_char() {
            Some(c) => Self::Character(c),
            None => Self::Other(key),
        }
    }
}

/// Label function used by [`Searchable::new`]: the item's own text.
pub type AsRefLabel<T> = for<'a> fn(&'a T) -> &'a str;

fn as_ref_label<T: AsRef<str>>(item: &T) -> &str {
    item.as_ref()
}

/// A [`Collection`] decorator adding type-ahead search.
///
/// `label` maps each item to the text the prefix is matched against. The
/// wrapped collection can be owned or borrowed (`&mut C`); everything the
/// decorator does not handle itself is forwarded to it through the
/// [`Collection`] impl, or reached with [`get_ref`](Self::get_ref) and
/// [`get_mut`](Self::get_mut).
pub struct Searchable<C, L = AsRefLabel<<C as Collection>::Item>>
where
    C: Collection,
{
    inner: C,
    label: L,
    search: String,
}

impl<C> Searchable<C>
where
    C: Collection,
    C::Item: AsRef<str>,
{
    /// Wrap `inner`, matching against each item's own text.
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            label: as_ref_label::<C::Item>,
            search: String::new(),
        }
    }
}

impl<C, L> Searchable<C, L>
where
    C: Collection,
    L: Fn(&C::Item) -> &str,
{
    /// Wrap `inner`, matching against the text `label` returns for each item.
    pub fn with_label(inner: C, label: L) -> Self {
        Self {
            inner,
            label,
            search: String::new(),
        }
    }

    /// Wrap `inner` with an initial search prefix already applied.
    ///
    /// Fails with [`Error::InvalidArgument`] if `prefix` is non-empty and no
    /// item matches it.
    pub fn with_search(inner: C, label: L, prefix: impl Into<String>) -> Result<Self> {
        let prefix = prefix.into();
        let mut searchable = Self::with_label(inner, label);
        if searchable.set_search(prefix.as_str()) {
            Ok(searchable)
        } else {
            Err(Error::InvalidArgument(format!(
                "search prefix {prefix:?} matches no item"
            )))
        }
    }

    /// The current search prefix.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Commit `candidate` as the search prefix if any item matches it.
    ///
    /// On a match, focus moves to the first matching item and the view is
    /// invalidated. Without a match nothing changes. Returns whether the
    /// prefix was committed. The empty prefix is always committed, and only
    /// moves focus if there is an item to focus.
    pub fn set_search(&mut self, candidate: impl Into<String>) -> bool {
        let candidate = candidate.into();
        if candidate.is_empty() && self.inner.is_empty() {
            self.search.clear();
            return true;
        }
        match self.first_match(&candidate) {
            Some(index) => {
                self.inner.set_focus(index);
                self.inner.invalidate();
                debug!(message = "searchable.match", search = %candidate, index);
                self.search = candidate;
                true
            }
            None => {
                trace!(message = "searchable.reject", search = %candidate);
                false
            }
        }
    }

    /// Forget the search prefix without moving focus.
    pub fn clear_search(&mut self) {
        self.search.clear();
    }

    /// Index of the first item whose label starts with `prefix`.
    #[must_use]
    pub fn first_match(&self, prefix: &str) -> Option<usize> {
        self.inner
            .iter()
            .position(|item| (self.label)(item).starts_with(prefix))
    }

    /// Borrow the wrapped collection.
    #[must_use]
    pub fn get_ref(&self) -> &C {
        &self.inner
    }

    /// Mutably borrow the wrapped collection.
    ///
    /// Mutations made this way bypass the prefix check; call
    /// [`clear_search`](Self::clear_search) if items matching the prefix
    /// may have been removed.
    pub fn get_mut(&mut self) -> &mut C {
        &mut self.inner
    }

    /// Consume the wrapper, returning the wrapped collection.
    #[must_use]
    pub fn into_inner(self) -> C {
        self.inner
    }

    fn backspace(&mut self) {
        if self.search.pop().is_none() {
            return;
        }
        // The shorter prefix is kept even when it no longer matches.
        if let Some(index) = self.first_match(&self.search) {
            self.inner.set_focus(index);
            self.inner.invalidate();
        }
        debug!(message = "searchable.backspace", search = %self.search);
    }

    fn push_char(&mut self, c: char) {
        let mut candidate = String::with_capacity(self.search.len() + c.len_utf8());
        candidate.push_str(&self.search);
        candidate.push(c);
        self.set_search(candidate);
    }

    /// Drop the prefix if a mutation removed every item it matched.
    fn revalidate(&mut self) {
        if !self.search.is_empty() && self.first_match(&self.search).is_none() {
            trace!(message = "searchable.stale", search = %self.search);
            self.search.clear();
        }
    }
}

impl<C, L> Searchable<C, L>
where
    C: Collection + KeyHandler,
    L: Fn(&C::Item) -> &str,
{
    /// Handle a terminal event. Only key presses and repeats are handled.
    ///
    /// Returns `true` if the key was consumed.
    pub fn handle_event(&mut self, size: Size, event: &Event) -> bool {
        if let Event::Key(key) = event
            && key.is_press()
        {
            return self.handle_key(size, *key).is_none();
        }
        false
    }
}

impl<C, L> KeyHandler for Searchable<C, L>
where
    C: Collection + KeyHandler,
    L: Fn(&C::Item) -> &str,
{
    fn handle_key(&mut self, size: Size, key: KeyEvent) -> Option<KeyEvent> {
        match SearchKey::classify(self.inner.handle_key(size, key)) {
            SearchKey::Consumed => {
                self.search.clear();
                None
            }
            SearchKey::Backspace => {
                self.backspace();
                None
            }
            SearchKey::Character(c) => {
                self.push_char(c);
                None
            }
            SearchKey::Other(key) => {
                self.search.clear();
                Some(key)
            }
        }
    }
}

impl<C, L> Collection for Searchable<C, L>
where
    C: Collection,
    L: Fn(&C::Item) -> &str,
{
    type Item = C::Item;

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn get(&self, index: usize) -> Option<&C::Item> {
        self.inner.get(index)
    }

    fn set(&mut self, index: usize, item: C::Item) -> Result<C::Item> {
        let previous = self.inner.set(index, item)?;
        self.revalidate();
        Ok(previous)
    }

    fn insert(&mut self, index: usize, item: C::Item) {
        self.inner.insert(index, item);
    }

    fn remove(&mut self, index: usize) -> Option<C::Item> {
        let removed = self.inner.remove(index);
        self.revalidate();
        removed
    }

    fn push(&mut self, item: C::Item) {
        self.inner.push(item);
    }

    fn focus(&self) -> Option<usize> {
        self.inner.focus()
    }

    fn set_focus(&mut self, index: usize) {
        self.inner.set_focus(index);
    }

    fn invalidate(&mut self) {
        self.inner.invalidate();
    }

    fn sort_by(&mut self, compare: &mut dyn FnMut(&C::Item, &C::Item) -> Ordering) {
        self.inner.sort_by(compare);
    }
}

impl<C, L> fmt::Debug for Searchable<C, L>
where
    C: Collection + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Searchable")
            .field("inner", &self.inner)
            .field("search", &self.search)
            .finish_non_exhaustive()
    }
}
