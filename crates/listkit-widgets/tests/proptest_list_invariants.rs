//! Property-based invariant tests for the sorted and searchable lists.
//!
//! These tests verify invariants that must hold for any sequence of inputs:
//!
//! 1. Adding keeps the list sorted, in either direction.
//! 2. Ties keep insertion order.
//! 3. The result of `extend` does not depend on the order of the new items
//!    and matches adding them one by one in any order.
//! 4. Rejected operations leave the elements untouched.
//! 5. Focus stays on the same element across `add`.
//! 6. `sort_tracking_focus` keeps the focused element.
//! 7. A committed search prefix always matches the focused item.
//! 8. A navigation key always resets the search prefix.

use listkit_core::collection::{Collection, FocusList, KeyHandler};
use listkit_core::event::{KeyCode, KeyEvent};
use listkit_core::geometry::Size;
use listkit_widgets::searchable::Searchable;
use listkit_widgets::sorted::{SortKey, SortedList};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

const SIZE: Size = Size::new(40, 20);

fn is_sorted_by<T>(items: &[T], key: &SortKey<T>) -> bool {
    items.windows(2).all(|w| key.compare(&w[0], &w[1]).is_le())
}

fn word_strategy() -> impl Strategy<Value = String> {
    "[abc]{1,4}"
}

fn key_strategy() -> impl Strategy<Value = KeyEvent> {
    prop_oneof![
        prop::char::range('a', 'd').prop_map(KeyEvent::char),
        Just(KeyEvent::new(KeyCode::Backspace)),
        Just(KeyEvent::new(KeyCode::Down)),
        Just(KeyEvent::new(KeyCode::Up)),
        Just(KeyEvent::new(KeyCode::Escape)),
    ]
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Adding keeps the list sorted
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn add_keeps_sorted(
        initial in prop::collection::vec(-50i32..50, 0..30),
        added in prop::collection::vec(-50i32..50, 0..30),
        reverse in any::<bool>(),
    ) {
        let mut list = SortedList::with_key(initial, SortKey::natural().with_reverse(reverse));
        for item in added {
            let index = list.add(item);
            prop_assert_eq!(list.get(index), Some(&item));
            prop_assert!(is_sorted_by(list.as_slice(), list.sort_key()));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Ties keep insertion order
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn ties_keep_insertion_order(
        keys in prop::collection::vec(0u8..4, 0..40),
        reverse in any::<bool>(),
    ) {
        // Tag each element with its arrival order; sort by the key alone.
        let key = SortKey::by_key(|pair: &(u8, usize)| pair.0).with_reverse(reverse);
        let mut list = SortedList::with_key(Vec::new(), key);
        for (arrival, k) in keys.iter().enumerate() {
            list.add((*k, arrival));
        }
        for pair in list.as_slice().windows(2) {
            if pair[0].0 == pair[1].0 {
                prop_assert!(pair[0].1 < pair[1].1, "tie out of order: {:?}", pair);
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Extend is order-independent
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn extend_order_independent(
        initial in prop::collection::btree_set(0i32..200, 0..20),
        added in prop::collection::btree_set(200i32..400, 0..20)
            .prop_map(|set| set.into_iter().collect::<Vec<_>>())
            .prop_shuffle(),
    ) {
        let mut shuffled = SortedList::new(initial.iter().copied());
        shuffled.extend(added.iter().copied());

        let mut ordered = SortedList::new(initial.iter().copied());
        let mut sorted_added = added.clone();
        sorted_added.sort_unstable();
        ordered.extend(sorted_added);

        prop_assert_eq!(shuffled.as_slice(), ordered.as_slice());

        let mut one_by_one = SortedList::new(initial.iter().copied());
        for item in &added {
            one_by_one.add(*item);
        }
        prop_assert_eq!(one_by_one.as_slice(), shuffled.as_slice());
    }
}

proptest! {
    #[test]
    fn extend_matches_adds_in_any_order(
        initial in prop::collection::vec(0u8..16, 0..20),
        added in prop::collection::btree_set(0u8..64, 0..20)
            .prop_map(|set| set.into_iter().collect::<Vec<_>>())
            .prop_shuffle(),
        reverse in any::<bool>(),
    ) {
        // Distinct keys, tagged so equal keys from `initial` stay distinguishable.
        let key = || SortKey::by_key(|pair: &(u8, usize)| pair.0).with_reverse(reverse);
        let tagged_initial: Vec<(u8, usize)> = initial.iter().map(|k| (*k, 0)).collect();
        let tagged_added: Vec<(u8, usize)> =
            added.iter().enumerate().map(|(i, k)| (*k + 64, i + 1)).collect();

        let mut extended = SortedList::with_key(tagged_initial.clone(), key());
        extended.extend(tagged_added.iter().copied());

        let mut one_by_one = SortedList::with_key(tagged_initial, key());
        for item in tagged_added {
            one_by_one.add(item);
        }

        prop_assert_eq!(extended.as_slice(), one_by_one.as_slice());
        prop_assert!(is_sorted_by(extended.as_slice(), extended.sort_key()));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Rejected operations do not mutate
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn rejected_operations_leave_items(
        items in prop::collection::vec(any::<i16>(), 0..20),
        times in 0usize..5,
        start in 0usize..20,
        len in 0usize..5,
    ) {
        let mut list = SortedList::new(items);
        let before = list.to_vec();
        let focus = list.focus();

        prop_assert!(list.repeat(times).unwrap_err().is_unsupported());
        prop_assert!(list.set_at(start..start + len, 0).unwrap_err().is_unsupported());
        prop_assert!(list.set_at(start.., 0).unwrap_err().is_unsupported());

        prop_assert_eq!(list.to_vec(), before);
        prop_assert_eq!(list.focus(), focus);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Focus follows its element across add
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn add_keeps_focused_element(
        initial in prop::collection::btree_set(0i32..1000, 1..20),
        focus_seed in any::<prop::sample::Index>(),
        added in prop::collection::vec(0i32..1000, 0..20),
    ) {
        let mut inner = FocusList::new(initial.iter().copied());
        let focus = focus_seed.index(inner.len());
        inner.set_focus(focus);
        let mut list = SortedList::from_collection(inner, SortKey::natural());
        let focused = *list.focused().unwrap();

        for item in added {
            list.add(item);
            prop_assert_eq!(list.focused(), Some(&focused));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. sort_tracking_focus keeps the focused element
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn resort_tracks_focus(
        items in prop::collection::btree_set(any::<i32>(), 1..30),
        focus_seed in any::<prop::sample::Index>(),
    ) {
        let mut inner = FocusList::new(items.iter().copied());
        inner.set_focus(focus_seed.index(inner.len()));
        let mut list = SortedList::from_collection(inner, SortKey::natural());
        let focused = *list.focused().unwrap();

        list.sort_tracking_focus(SortKey::natural().descending());
        prop_assert_eq!(list.focused(), Some(&focused));
        prop_assert!(is_sorted_by(list.as_slice(), list.sort_key()));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. A committed prefix matches the focused item
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn committed_prefix_matches_focus(
        words in prop::collection::vec(word_strategy(), 1..15),
        typed in prop::collection::vec(prop::char::range('a', 'd'), 0..6),
    ) {
        let mut search = Searchable::new(FocusList::new(words));
        for c in typed {
            let before = search.search().to_string();
            prop_assert_eq!(search.handle_key(SIZE, KeyEvent::char(c)), None);

            let after = search.search();
            if after.is_empty() {
                continue;
            }
            let focused = search.get(search.focus().unwrap()).unwrap();
            prop_assert!(focused.starts_with(after), "{:?} vs {:?}", focused, after);
            // Either the char was committed or the prefix stayed put.
            let extended = format!("{before}{c}");
            prop_assert!(after == before || after == extended);
            // The focused item is the first match.
            prop_assert_eq!(search.first_match(after), search.focus());
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 8. Navigation resets the prefix
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn navigation_resets_prefix(
        words in prop::collection::vec(word_strategy(), 1..15),
        keys in prop::collection::vec(key_strategy(), 0..20),
    ) {
        let mut search = Searchable::new(FocusList::new(words));
        for key in keys {
            let remaining = search.handle_key(SIZE, key);
            match key.code {
                KeyCode::Up | KeyCode::Down | KeyCode::Escape => {
                    prop_assert_eq!(search.search(), "");
                }
                _ => prop_assert_eq!(remaining, None),
            }
            if key.code == KeyCode::Escape {
                prop_assert_eq!(remaining, Some(key));
            }
        }
    }
}
