#![forbid(unsafe_code)]

//! A list that keeps its elements sorted under every mutation.
//!
//! [`SortedList`] decorates any [`Collection`] and owns the sort key and
//! direction. Elements enter through [`SortedList::add`] and
//! [`SortedList::extend`], which place each item by its key; positional
//! entry points inherited from the collection contract are redirected to
//! `add` and reported through a [`Diagnostic`].
//!
//! # Invariants
//!
//! 1. **Sorted between calls**: for every adjacent pair, the first element's
//!    key is not worse than the second's under the current direction.
//! 2. **Stable ties**: elements with equal keys keep their insertion order;
//!    a new element is placed after every existing element with an equal key.
//! 3. **Reject before mutate**: an unsupported operation returns
//!    [`Error::UnsupportedOperation`] without touching the elements.
//!
//! # Focus
//!
//! `add`, `extend`, `remove` and `replace` rely on the collection keeping
//! focus on the same element while indices shift beneath it (see
//! [`listkit_core::collection`]). [`SortedList::sort`] freezes the raw focus
//! index; [`SortedList::sort_tracking_focus`] re-targets it to the element
//! that held focus before the re-sort.
//!
//! # Example
//!
//! ```
//! use listkit_widgets::sorted::{SortKey, SortedList};
//!
//! let mut list = SortedList::new([1, 4, 2, 7, 3]);
//! list.add(5);
//! assert_eq!(list.to_vec(), vec![1, 2, 3, 4, 5, 7]);
//!
//! let pairs = SortedList::with_key(
//!     [(1, 10), (4, 2), (0, 7)],
//!     SortKey::by_key(|pair: &(i32, i32)| pair.1).descending(),
//! );
//! assert_eq!(pairs.to_vec(), vec![(1, 10), (0, 7), (4, 2)]);
//! ```

use core::cmp::Ordering;
use core::fmt;
use core::ops::{
    AddAssign, Bound, Range, RangeFrom, RangeFull, RangeInclusive, RangeTo, RangeToInclusive,
};

use listkit_core::collection::{Collection, FocusList, Iter, KeyHandler};
use listkit_core::error::{Error, Result};
use listkit_core::event::KeyEvent;
use listkit_core::geometry::Size;
use listkit_core::{debug, debug_span, trace, warn};

// ============================================================================
// Sort key
// ============================================================================

/// How a [`SortedList`] orders its elements: a comparison plus a direction.
///
/// Build one from a key function ([`SortKey::by_key`]), a comparator
/// ([`SortKey::by`]) or the element's own ordering ([`SortKey::natural`]),
/// then flip it with [`SortKey::descending`].
pub struct SortKey<T> {
    compare: Box<dyn Fn(&T, &T) -> Ordering>,
    reverse: bool,
}

impl<T> SortKey<T> {
    /// Order elements by the value `key` extracts from them.
    pub fn by_key<K, F>(key: F) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + 'static,
    {
        Self::by(move |a, b| key(a).cmp(&key(b)))
    }

    /// Order elements with an explicit comparator.
    pub fn by<F>(compare: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + 'static,
    {
        Self {
            compare: Box::new(compare),
            reverse: false,
        }
    }

    /// Order elements by their own [`Ord`] implementation (identity key).
    pub fn natural() -> Self
    where
        T: Ord,
    {
        Self::by(|a: &T, b: &T| a.cmp(b))
    }

    /// Sort from greatest to smallest key.
    #[must_use]
    pub fn descending(self) -> Self {
        self.with_reverse(true)
    }

    /// Set the direction explicitly; `true` sorts descending.
    #[must_use]
    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// Whether this key sorts descending.
    #[must_use]
    pub const fn is_reversed(&self) -> bool {
        self.reverse
    }

    /// Compare two elements with the direction applied.
    ///
    /// `Less` means `a` belongs before `b`.
    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        let ordering = (self.compare)(a, b);
        if self.reverse {
            ordering.reverse()
        } else {
            ordering
        }
    }
}

impl<T: Ord> Default for SortKey<T> {
    fn default() -> Self {
        Self::natural()
    }
}

impl<T> fmt::Debug for SortKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortKey")
            .field("reverse", &self.reverse)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Positions and diagnostics
// ============================================================================

/// Target of a positional assignment: one index or a range of indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// A single element.
    Index(usize),
    /// A span of elements.
    Range(Bound<usize>, Bound<usize>),
}

impl From<usize> for Position {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<Range<usize>> for Position {
    fn from(range: Range<usize>) -> Self {
        Self::Range(Bound::Included(range.start), Bound::Excluded(range.end))
    }
}

impl From<RangeInclusive<usize>> for Position {
    fn from(range: RangeInclusive<usize>) -> Self {
        Self::Range(Bound::Included(*range.start()), Bound::Included(*range.end()))
    }
}

impl From<RangeFrom<usize>> for Position {
    fn from(range: RangeFrom<usize>) -> Self {
        Self::Range(Bound::Included(range.start), Bound::Unbounded)
    }
}

impl From<RangeTo<usize>> for Position {
    fn from(range: RangeTo<usize>) -> Self {
        Self::Range(Bound::Unbounded, Bound::Excluded(range.end))
    }
}

impl From<RangeToInclusive<usize>> for Position {
    fn from(range: RangeToInclusive<usize>) -> Self {
        Self::Range(Bound::Unbounded, Bound::Included(range.end))
    }
}

impl From<RangeFull> for Position {
    fn from(_: RangeFull) -> Self {
        Self::Range(Bound::Unbounded, Bound::Unbounded)
    }
}

/// A non-fatal report that a discouraged entry point was used.
///
/// The operation still completes; the report only tells the caller that the
/// item did not go where a plain list would have put it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic {
    /// [`Collection::push`] was called; the item was placed by its key.
    UnsortedPush {
        /// Where the item ended up.
        placed_at: usize,
    },
    /// [`Collection::insert`] was called; the requested index was ignored.
    UnsortedInsert {
        /// The index the caller asked for.
        requested: usize,
        /// Where the item ended up.
        placed_at: usize,
    },
    /// [`Collection::sort_by`] was called; the list kept its own key.
    ForeignSort,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsortedPush { placed_at } => write!(
                f,
                "push on a sorted list placed the item at index {placed_at}; use SortedList::add"
            ),
            Self::UnsortedInsert {
                requested,
                placed_at,
            } => write!(
                f,
                "insert at index {requested} on a sorted list placed the item at index {placed_at}; use SortedList::add"
            ),
            Self::ForeignSort => f.write_str(
                "sort_by on a sorted list is ignored; use SortedList::sort to change the key",
            ),
        }
    }
}

type DiagnosticSink = Box<dyn FnMut(&Diagnostic)>;

// ============================================================================
// SortedList
// ============================================================================

/// A [`Collection`] decorator that keeps its elements sorted.
pub struct SortedList<C: Collection> {
    inner: C,
    key: SortKey<C::Item>,
    diagnostics: Option<DiagnosticSink>,
}

impl<T: Ord> SortedList<FocusList<T>> {
    /// Create an ascending list of `items` ordered by their own [`Ord`].
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        Self::with_key(items, SortKey::natural())
    }
}

impl<T> SortedList<FocusList<T>> {
    /// Create a list of `items` ordered by `key`.
    ///
    /// The items may arrive unsorted; they are stably sorted once, and the
    /// first element (if any) gets focus.
    pub fn with_key(items: impl IntoIterator<Item = T>, key: SortKey<T>) -> Self {
        let mut items: Vec<T> = items.into_iter().collect();
        items.sort_by(|a, b| key.compare(a, b));
        Self {
            inner: FocusList::new(items),
            key,
            diagnostics: None,
        }
    }

    /// Copy the elements out in sorted order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.inner.as_slice().to_vec()
    }

    /// The elements as a slice, in sorted order.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        self.inner.as_slice()
    }
}

impl<C: Collection> SortedList<C> {
    /// Take over an existing collection, sorting its current elements by
    /// `key` and focusing the first one.
    pub fn from_collection(mut inner: C, key: SortKey<C::Item>) -> Self {
        inner.sort_by(&mut |a, b| key.compare(a, b));
        if !inner.is_empty() {
            inner.set_focus(0);
        }
        Self {
            inner,
            key,
            diagnostics: None,
        }
    }

    /// Route [`Diagnostic`]s to `sink` in addition to the `warn` log event.
    #[must_use]
    pub fn with_diagnostics(mut self, sink: impl FnMut(&Diagnostic) + 'static) -> Self {
        self.diagnostics = Some(Box::new(sink));
        self
    }

    /// The current sort key.
    #[must_use]
    pub fn sort_key(&self) -> &SortKey<C::Item> {
        &self.key
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the list has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// The element at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&C::Item> {
        self.inner.get(index)
    }

    /// The focused index, `None` when empty.
    #[must_use]
    pub fn focus(&self) -> Option<usize> {
        self.inner.focus()
    }

    /// The focused element.
    #[must_use]
    pub fn focused(&self) -> Option<&C::Item> {
        self.inner.focus().and_then(|index| self.inner.get(index))
    }

    /// Iterate over the elements in sorted order.
    pub fn iter(&self) -> Iter<'_, C> {
        self.inner.iter()
    }

    /// Borrow the decorated collection.
    #[must_use]
    pub fn get_ref(&self) -> &C {
        &self.inner
    }

    /// Consume the list, returning the decorated collection.
    #[must_use]
    pub fn into_inner(self) -> C {
        self.inner
    }

    /// Index at which `item` would be added: the first element that sorts
    /// strictly after it, or the end.
    fn insertion_index(&self, item: &C::Item) -> usize {
        // Binary search over the sorted indices; equal keys sort before the
        // new item so it lands after them.
        let (mut low, mut high) = (0, self.inner.len());
        while low < high {
            let mid = low + (high - low) / 2;
            match self.inner.get(mid) {
                Some(existing) if self.key.compare(existing, item) == Ordering::Greater => {
                    high = mid;
                }
                _ => low = mid + 1,
            }
        }
        low
    }

    /// Insert `item` at the position its key dictates and return that index.
    ///
    /// Ties go after existing elements with an equal key.
    pub fn add(&mut self, item: C::Item) -> usize {
        let index = self.insertion_index(&item);
        self.inner.insert(index, item);
        debug!(message = "sorted_list.add", index, len = self.inner.len());
        index
    }

    /// Add every item of `items`.
    ///
    /// The new items are stably sorted by the list's key first and then
    /// added one by one, so the result does not depend on their order.
    pub fn extend(&mut self, items: impl IntoIterator<Item = C::Item>) {
        let mut items: Vec<C::Item> = items.into_iter().collect();
        items.sort_by(|a, b| self.key.compare(a, b));
        for item in items {
            self.add(item);
        }
    }

    /// Remove and return the element at `index`.
    pub fn remove(&mut self, index: usize) -> Option<C::Item> {
        self.inner.remove(index)
    }

    /// Replace the element at `index`: remove it, then [`add`](Self::add)
    /// `item` wherever its key belongs. Returns the removed element.
    pub fn replace(&mut self, index: usize, item: C::Item) -> Result<C::Item> {
        let len = self.inner.len();
        let previous = self
            .inner
            .remove(index)
            .ok_or(Error::IndexOutOfBounds { index, len })?;
        self.add(item);
        Ok(previous)
    }

    /// Positional assignment.
    ///
    /// A single index behaves like [`replace`](Self::replace). Assigning to a
    /// range fails with [`Error::UnsupportedOperation`]: bulk positional
    /// replacement cannot keep the list sorted.
    pub fn set_at(&mut self, position: impl Into<Position>, item: C::Item) -> Result<C::Item> {
        match position.into() {
            Position::Index(index) => self.replace(index, item),
            Position::Range(..) => {
                trace!(message = "sorted_list.reject", operation = "range assignment");
                Err(Error::unsupported("range assignment"))
            }
        }
    }

    /// Repetition (`list *= n`) is meaningless for a sorted list and always
    /// fails with [`Error::UnsupportedOperation`].
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    pub fn repeat(&mut self, times: usize) -> Result<()> {
        trace!(message = "sorted_list.reject", operation = "repeat", times);
        Err(Error::unsupported("repeat"))
    }

    /// Replace the sort key and stably re-sort every element.
    ///
    /// The focus index stays the same number, so it generally points at a
    /// different element afterwards. Use
    /// [`sort_tracking_focus`](Self::sort_tracking_focus) to keep the
    /// focused element.
    pub fn sort(&mut self, key: SortKey<C::Item>) {
        let span = debug_span!("sorted_list.sort", len = self.inner.len());
        let _guard = span.enter();
        self.key = key;
        let key = &self.key;
        self.inner.sort_by(&mut |a, b| key.compare(a, b));
        self.inner.invalidate();
    }

    /// Like [`sort`](Self::sort), but focus follows the element that held it.
    pub fn sort_tracking_focus(&mut self, key: SortKey<C::Item>) {
        let focused = self.inner.focus();
        self.key = key;

        let mut tagged = Vec::with_capacity(self.inner.len());
        let mut index = self.inner.len();
        while index > 0 {
            index -= 1;
            if let Some(item) = self.inner.remove(index) {
                tagged.push((index, item));
            }
        }
        tagged.reverse();

        let key = &self.key;
        tagged.sort_by(|(_, a), (_, b)| key.compare(a, b));
        let new_focus =
            focused.and_then(|old| tagged.iter().position(|(original, _)| *original == old));
        for (_, item) in tagged {
            self.inner.push(item);
        }
        if let Some(new_focus) = new_focus {
            self.inner.set_focus(new_focus);
        }
        self.inner.invalidate();
        debug!(message = "sorted_list.sort_tracking_focus", ?focused, ?new_focus);
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        warn!(message = "sorted_list.discouraged", diagnostic = %diagnostic);
        if let Some(sink) = self.diagnostics.as_mut() {
            sink(&diagnostic);
        }
    }
}

impl<C: Collection> Collection for SortedList<C> {
    type Item = C::Item;

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn get(&self, index: usize) -> Option<&C::Item> {
        self.inner.get(index)
    }

    /// Same as [`SortedList::replace`].
    fn set(&mut self, index: usize, item: C::Item) -> Result<C::Item> {
        self.replace(index, item)
    }

    /// Discouraged: `index` is ignored and the item is added by its key.
    fn insert(&mut self, index: usize, item: C::Item) {
        let placed_at = self.add(item);
        self.report(Diagnostic::UnsortedInsert {
            requested: index,
            placed_at,
        });
    }

    fn remove(&mut self, index: usize) -> Option<C::Item> {
        self.inner.remove(index)
    }

    /// Discouraged: the item is added by its key, not at the tail.
    fn push(&mut self, item: C::Item) {
        let placed_at = self.add(item);
        self.report(Diagnostic::UnsortedPush { placed_at });
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

    /// Ignored: a sorted list only reorders through [`SortedList::sort`].
    fn sort_by(&mut self, _compare: &mut dyn FnMut(&C::Item, &C::Item) -> Ordering) {
        self.report(Diagnostic::ForeignSort);
    }
}

impl<C: Collection + KeyHandler> KeyHandler for SortedList<C> {
    fn handle_key(&mut self, size: Size, key: KeyEvent) -> Option<KeyEvent> {
        self.inner.handle_key(size, key)
    }
}

impl<C: Collection> AddAssign<C::Item> for SortedList<C> {
    fn add_assign(&mut self, item: C::Item) {
        self.add(item);
    }
}

impl<C: Collection> Extend<C::Item> for SortedList<C> {
    fn extend<I: IntoIterator<Item = C::Item>>(&mut self, items: I) {
        SortedList::extend(self, items);
    }
}

impl<T: Ord> FromIterator<T> for SortedList<FocusList<T>> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<C> fmt::Debug for SortedList<C>
where
    C: Collection,
    C::Item: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SortedList(")?;
        f.debug_list().entries(self.inner.iter()).finish()?;
        match self.inner.focus() {
            Some(focus) => write!(f, ", focus={focus})"),
            None => f.write_str(", focus=None)"),
        }
    }
}
