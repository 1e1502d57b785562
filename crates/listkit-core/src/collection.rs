#![forbid(unsafe_code)]

//! The ordered-collection contract and a `Vec`-backed implementation.
//!
//! A [`Collection`] is what a list widget exposes to behaviors layered on
//! top of it: indexed access, positional mutation, and a single focused
//! index. Decorators in `listkit-widgets` are written against this trait so
//! they work with any toolkit list that implements it.
//!
//! # Focus convention
//!
//! Implementations must keep focusing the same *element* when positional
//! mutations shift indices beneath it:
//!
//! - inserting at or before the focus index moves the focus index up by one;
//! - removing before the focus index moves it down by one;
//! - removing the focused element focuses its successor, or the new last
//!   element when it was the tail;
//! - an empty collection has no focus, and the first insertion focuses
//!   index 0.
//!
//! [`FocusList`] is the reference implementation of that convention.

use core::cmp::Ordering;
use core::fmt;

use crate::error::{Error, Result};
use crate::event::{KeyCode, KeyEvent};
use crate::geometry::Size;

/// An ordered, indexable, mutable sequence with a focused index.
pub trait Collection {
    /// The element type.
    type Item;

    /// Number of elements.
    fn len(&self) -> usize;

    /// Whether the collection has no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The element at `index`, if any.
    fn get(&self, index: usize) -> Option<&Self::Item>;

    /// Replace the element at `index`, returning the previous one.
    fn set(&mut self, index: usize, item: Self::Item) -> Result<Self::Item>;

    /// Insert `item` before the element at `index`.
    ///
    /// Indices past the end append, as with an ordinary list insert.
    fn insert(&mut self, index: usize, item: Self::Item);

    /// Remove and return the element at `index`.
    fn remove(&mut self, index: usize) -> Option<Self::Item>;

    /// Append `item` at the tail.
    fn push(&mut self, item: Self::Item) {
        let len = self.len();
        self.insert(len, item);
    }

    /// The focused index, or `None` when the collection is empty.
    fn focus(&self) -> Option<usize>;

    /// Move focus to `index`. Out-of-range indices are clamped to the last
    /// element; the call is ignored on an empty collection.
    fn set_focus(&mut self, index: usize);

    /// Mark the view as needing a redraw.
    fn invalidate(&mut self) {}

    /// Stably reorder all elements with `compare`.
    ///
    /// The focus index is left as a raw index: after the call it points at
    /// whatever element now occupies that position. The default drains and
    /// re-inserts through the positional API; `Vec`-backed collections
    /// should override it with an in-place sort.
    fn sort_by(&mut self, compare: &mut dyn FnMut(&Self::Item, &Self::Item) -> Ordering) {
        let focus = self.focus();
        let mut items = Vec::with_capacity(self.len());
        while let Some(item) = self.len().checked_sub(1).and_then(|last| self.remove(last)) {
            items.push(item);
        }
        items.reverse();
        items.sort_by(|a, b| compare(a, b));
        for item in items {
            self.push(item);
        }
        if let Some(focus) = focus {
            self.set_focus(focus);
        }
    }

    /// Iterate over the elements in display order.
    fn iter(&self) -> Iter<'_, Self>
    where
        Self: Sized,
    {
        Iter::new(self)
    }
}

/// A widget that can react to key events.
pub trait KeyHandler {
    /// Handle `key` given the widget's current `size`.
    ///
    /// Returns `None` when the key was consumed, or the key itself when the
    /// widget did not use it and it should bubble up.
    fn handle_key(&mut self, size: Size, key: KeyEvent) -> Option<KeyEvent>;
}

impl<C: Collection + ?Sized> Collection for &mut C {
    type Item = C::Item;

    fn len(&self) -> usize {
        (**self).len()
    }

    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }

    fn get(&self, index: usize) -> Option<&Self::Item> {
        (**self).get(index)
    }

    fn set(&mut self, index: usize, item: Self::Item) -> Result<Self::Item> {
        (**self).set(index, item)
    }

    fn insert(&mut self, index: usize, item: Self::Item) {
        (**self).insert(index, item);
    }

    fn remove(&mut self, index: usize) -> Option<Self::Item> {
        (**self).remove(index)
    }

    fn push(&mut self, item: Self::Item) {
        (**self).push(item);
    }

    fn focus(&self) -> Option<usize> {
        (**self).focus()
    }

    fn set_focus(&mut self, index: usize) {
        (**self).set_focus(index);
    }

    fn invalidate(&mut self) {
        (**self).invalidate();
    }

    fn sort_by(&mut self, compare: &mut dyn FnMut(&Self::Item, &Self::Item) -> Ordering) {
        (**self).sort_by(compare);
    }
}

impl<K: KeyHandler + ?Sized> KeyHandler for &mut K {
    fn handle_key(&mut self, size: Size, key: KeyEvent) -> Option<KeyEvent> {
        (**self).handle_key(size, key)
    }
}

/// Iterator over a [`Collection`] by index.
pub struct Iter<'a, C: Collection> {
    collection: &'a C,
    front: usize,
    back: usize,
}

impl<'a, C: Collection> Iter<'a, C> {
    fn new(collection: &'a C) -> Self {
        Self {
            collection,
            front: 0,
            back: collection.len(),
        }
    }
}

impl<'a, C: Collection> Iterator for Iter<'a, C> {
    type Item = &'a C::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let item = self.collection.get(self.front);
        self.front += 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<C: Collection> DoubleEndedIterator for Iter<'_, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        self.collection.get(self.back)
    }
}

impl<C: Collection> ExactSizeIterator for Iter<'_, C> {}

/// A `Vec`-backed [`Collection`] that keeps focus on the same element
/// through positional mutations.
///
/// It also handles the usual list navigation keys: Up/Down move focus by
/// one, PageUp/PageDown by one page of the given size, Home/End jump to the
/// ends. Every other key is returned unconsumed.
#[derive(Clone, PartialEq, Eq)]
pub struct FocusList<T> {
    items: Vec<T>,
    focus: Option<usize>,
    dirty: bool,
}

impl<T> Default for FocusList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            focus: None,
            dirty: false,
        }
    }
}

impl<T> FocusList<T> {
    /// Create a list from `items`, focusing the first one if any.
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        let items: Vec<T> = items.into_iter().collect();
        let focus = if items.is_empty() { None } else { Some(0) };
        Self {
            items,
            focus,
            dirty: false,
        }
    }

    /// Move focus to `index`, rejecting out-of-range indices.
    pub fn select(&mut self, index: usize) -> Result<()> {
        if index >= self.items.len() {
            return Err(Error::InvalidArgument(format!(
                "focus index {index} out of range for {} items",
                self.items.len()
            )));
        }
        self.focus = Some(index);
        self.dirty = true;
        Ok(())
    }

    /// The focused element.
    #[must_use]
    pub fn focused(&self) -> Option<&T> {
        self.focus.and_then(|i| self.items.get(i))
    }

    /// The elements as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Consume the list, returning its elements.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    /// Whether the view was invalidated since the last [`take_dirty`](Self::take_dirty).
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Return and clear the dirty flag.
    pub fn take_dirty(&mut self) -> bool {
        core::mem::take(&mut self.dirty)
    }

    /// Move focus to the next element, clamping at the last one.
    ///
    /// Returns `true` if the focus moved.
    pub fn focus_next(&mut self, step: usize) -> bool {
        let Some(current) = self.focus else {
            return false;
        };
        let next = current.saturating_add(step).min(self.items.len() - 1);
        self.move_focus(current, next)
    }

    /// Move focus to the previous element, clamping at the first one.
    ///
    /// Returns `true` if the focus moved.
    pub fn focus_previous(&mut self, step: usize) -> bool {
        let Some(current) = self.focus else {
            return false;
        };
        self.move_focus(current, current.saturating_sub(step))
    }

    fn move_focus(&mut self, from: usize, to: usize) -> bool {
        if from == to {
            return false;
        }
        self.focus = Some(to);
        self.dirty = true;
        true
    }
}

impl<T> Collection for FocusList<T> {
    type Item = T;

    fn len(&self) -> usize {
        self.items.len()
    }

    fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    fn set(&mut self, index: usize, item: T) -> Result<T> {
        let len = self.items.len();
        let slot = self
            .items
            .get_mut(index)
            .ok_or(Error::IndexOutOfBounds { index, len })?;
        self.dirty = true;
        Ok(core::mem::replace(slot, item))
    }

    fn insert(&mut self, index: usize, item: T) {
        let index = index.min(self.items.len());
        self.items.insert(index, item);
        self.focus = match self.focus {
            None => Some(0),
            Some(focus) if index <= focus => Some(focus + 1),
            unchanged => unchanged,
        };
        self.dirty = true;
    }

    fn remove(&mut self, index: usize) -> Option<T> {
        if index >= self.items.len() {
            return None;
        }
        let item = self.items.remove(index);
        let len = self.items.len();
        self.focus = match self.focus {
            _ if len == 0 => None,
            Some(focus) if index < focus => Some(focus - 1),
            Some(focus) => Some(focus.min(len - 1)),
            None => None,
        };
        self.dirty = true;
        Some(item)
    }

    fn focus(&self) -> Option<usize> {
        self.focus
    }

    fn set_focus(&mut self, index: usize) {
        if self.items.is_empty() {
            return;
        }
        self.focus = Some(index.min(self.items.len() - 1));
        self.dirty = true;
    }

    fn invalidate(&mut self) {
        self.dirty = true;
    }

    fn sort_by(&mut self, compare: &mut dyn FnMut(&T, &T) -> Ordering) {
        self.items.sort_by(|a, b| compare(a, b));
        self.dirty = true;
    }
}

impl<T> KeyHandler for FocusList<T> {
    fn handle_key(&mut self, size: Size, key: KeyEvent) -> Option<KeyEvent> {
        if self.items.is_empty() || !key.modifiers.is_empty() {
            return Some(key);
        }
        let last = self.items.len() - 1;
        match key.code {
            KeyCode::Up => self.focus_previous(1),
            KeyCode::Down => self.focus_next(1),
            KeyCode::PageUp => self.focus_previous(size.page_rows()),
            KeyCode::PageDown => self.focus_next(size.page_rows()),
            KeyCode::Home => {
                self.set_focus(0);
                true
            }
            KeyCode::End => {
                self.set_focus(last);
                true
            }
            _ => return Some(key),
        };
        None
    }
}

impl<T> FromIterator<T> for FocusList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<T: fmt::Debug> fmt::Debug for FocusList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FocusList({:?}, focus=", self.items)?;
        match self.focus {
            Some(focus) => write!(f, "{focus})"),
            None => f.write_str("None)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Modifiers;

    fn list(items: &[i32]) -> FocusList<i32> {
        FocusList::new(items.iter().copied())
    }

    #[test]
    fn new_focuses_first_item() {
        assert_eq!(list(&[3, 1]).focus(), Some(0));
        assert_eq!(list(&[]).focus(), None);
    }

    #[test]
    fn insert_before_focus_follows_element() {
        let mut l = list(&[10, 20, 30]);
        l.set_focus(1);
        l.insert(0, 5);
        assert_eq!(l.focus(), Some(2));
        assert_eq!(l.focused(), Some(&20));
    }

    #[test]
    fn insert_at_focus_follows_element() {
        let mut l = list(&[10, 20]);
        l.insert(0, 1);
        assert_eq!(l.focused(), Some(&10));
    }

    #[test]
    fn insert_after_focus_keeps_index() {
        let mut l = list(&[10, 20]);
        l.insert(2, 30);
        assert_eq!(l.focus(), Some(0));
    }

    #[test]
    fn insert_into_empty_focuses_zero() {
        let mut l = list(&[]);
        l.push(7);
        assert_eq!(l.focus(), Some(0));
    }

    #[test]
    fn insert_past_end_appends() {
        let mut l = list(&[1]);
        l.insert(3, 9);
        assert_eq!(l.as_slice(), &[1, 9]);
        assert_eq!(l.focus(), Some(0));
    }

    #[test]
    fn remove_before_focus_shifts_down() {
        let mut l = list(&[1, 2, 3]);
        l.set_focus(2);
        assert_eq!(l.remove(0), Some(1));
        assert_eq!(l.focused(), Some(&3));
    }

    #[test]
    fn remove_focused_moves_to_successor() {
        let mut l = list(&[1, 2, 3]);
        l.set_focus(1);
        l.remove(1);
        assert_eq!(l.focused(), Some(&3));
    }

    #[test]
    fn remove_focused_tail_moves_to_new_tail() {
        let mut l = list(&[1, 2, 3]);
        l.set_focus(2);
        l.remove(2);
        assert_eq!(l.focus(), Some(1));
    }

    #[test]
    fn remove_last_item_clears_focus() {
        let mut l = list(&[1]);
        assert_eq!(l.remove(0), Some(1));
        assert_eq!(l.focus(), None);
        assert_eq!(l.remove(0), None);
    }

    #[test]
    fn set_replaces_in_place() {
        let mut l = list(&[1, 2]);
        assert_eq!(l.set(1, 5), Ok(2));
        assert_eq!(l.as_slice(), &[1, 5]);
        assert!(l.set(2, 0).is_err());
    }

    #[test]
    fn select_rejects_out_of_range() {
        let mut l = list(&[1, 2]);
        assert!(l.select(1).is_ok());
        assert!(matches!(l.select(2), Err(Error::InvalidArgument(_))));
        assert_eq!(l.focus(), Some(1));
    }

    #[test]
    fn set_focus_clamps() {
        let mut l = list(&[1, 2]);
        l.set_focus(9);
        assert_eq!(l.focus(), Some(1));
    }

    #[test]
    fn sort_by_keeps_raw_focus_index() {
        let mut l = list(&[3, 1, 2]);
        l.set_focus(1);
        l.sort_by(&mut |a, b| a.cmp(b));
        assert_eq!(l.as_slice(), &[1, 2, 3]);
        assert_eq!(l.focus(), Some(1));
    }

    #[test]
    fn default_sort_by_drains_and_restores_focus() {
        // Exercise the provided trait method through a wrapper that does not
        // override it.
        struct Plain(FocusList<i32>);
        impl Collection for Plain {
            type Item = i32;
            fn len(&self) -> usize {
                self.0.len()
            }
            fn get(&self, index: usize) -> Option<&i32> {
                self.0.get(index)
            }
            fn set(&mut self, index: usize, item: i32) -> Result<i32> {
                self.0.set(index, item)
            }
            fn insert(&mut self, index: usize, item: i32) {
                self.0.insert(index, item);
            }
            fn remove(&mut self, index: usize) -> Option<i32> {
                self.0.remove(index)
            }
            fn focus(&self) -> Option<usize> {
                self.0.focus()
            }
            fn set_focus(&mut self, index: usize) {
                self.0.set_focus(index);
            }
        }

        let mut plain = Plain(list(&[4, 2, 9, 1]));
        plain.set_focus(2);
        plain.sort_by(&mut |a, b| a.cmp(b));
        assert_eq!(plain.0.as_slice(), &[1, 2, 4, 9]);
        assert_eq!(plain.focus(), Some(2));
    }

    #[test]
    fn iter_in_both_directions() {
        let l = list(&[1, 2, 3]);
        assert_eq!(l.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(l.iter().rev().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
        assert_eq!(l.iter().len(), 3);
    }

    #[test]
    fn navigation_keys_are_consumed() {
        let mut l = list(&[1, 2, 3, 4, 5]);
        let size = Size::new(20, 2);
        assert_eq!(l.handle_key(size, KeyEvent::new(KeyCode::Down)), None);
        assert_eq!(l.focus(), Some(1));
        assert_eq!(l.handle_key(size, KeyEvent::new(KeyCode::PageDown)), None);
        assert_eq!(l.focus(), Some(3));
        assert_eq!(l.handle_key(size, KeyEvent::new(KeyCode::End)), None);
        assert_eq!(l.focus(), Some(4));
        assert_eq!(l.handle_key(size, KeyEvent::new(KeyCode::Home)), None);
        assert_eq!(l.focus(), Some(0));
        assert_eq!(l.handle_key(size, KeyEvent::new(KeyCode::Up)), None);
        assert_eq!(l.focus(), Some(0));
    }

    #[test]
    fn other_keys_bubble_up() {
        let mut l = list(&[1, 2]);
        let size = Size::new(20, 2);
        let key = KeyEvent::char('a');
        assert_eq!(l.handle_key(size, key), Some(key));
        let chord = KeyEvent::new(KeyCode::Down).with_modifiers(Modifiers::CTRL);
        assert_eq!(l.handle_key(size, chord), Some(chord));
        let mut empty = list(&[]);
        let down = KeyEvent::new(KeyCode::Down);
        assert_eq!(empty.handle_key(size, down), Some(down));
    }

    #[test]
    fn mutations_mark_dirty() {
        let mut l = list(&[1]);
        assert!(!l.is_dirty());
        l.push(2);
        assert!(l.take_dirty());
        assert!(!l.is_dirty());
        l.invalidate();
        assert!(l.is_dirty());
    }

    #[test]
    fn debug_shows_items_and_focus() {
        assert_eq!(format!("{:?}", list(&[1, 2])), "FocusList([1, 2], focus=0)");
        assert_eq!(format!("{:?}", list(&[])), "FocusList([], focus=None)");
    }

    #[test]
    fn mut_ref_is_a_collection() {
        let mut l = list(&[1]);
        {
            let mut r = &mut l;
            Collection::push(&mut r, 2);
            assert_eq!(Collection::len(&r), 2);
        }
        assert_eq!(l.as_slice(), &[1, 2]);
    }
}
