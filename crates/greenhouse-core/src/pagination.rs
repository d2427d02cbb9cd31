//! Fixed-size page slicing.
//!
//! Pages are 1-based. The paginator never rejects a page number: asking for
//! a page beyond the data yields an empty slice. Keeping the current page
//! within `[1, page_count]` is the caller's job (see
//! [`ViewController::set_page`](crate::controller::ViewController::set_page)).

/// Default number of readings per page.
pub const ITEMS_PER_PAGE: usize = 15;

/// Number of pages needed for `len` items, never less than one.
///
/// An empty table still reports "page 1 of 1".
///
/// ```
/// use greenhouse_core::pagination::page_count;
///
/// assert_eq!(page_count(0, 15), 1);
/// assert_eq!(page_count(15, 15), 1);
/// assert_eq!(page_count(16, 15), 2);
/// ```
#[must_use]
pub fn page_count(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    len.div_ceil(page_size).max(1)
}

/// The `page_number`-th slice of `items`.
///
/// Covers `[(page_number - 1) * page_size, page_number * page_size)`,
/// truncated at the end of `items`. Page 0 and pages past the end are empty.
pub fn page<T>(items: &[T], page_number: usize, page_size: usize) -> &[T] {
    if page_number == 0 || page_size == 0 {
        return &[];
    }
    let start = (page_number - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Concatenating every page reproduces the input exactly.
        #[test]
        fn pages_partition_input(len in 0usize..200, size in 1usize..40) {
            let items: Vec<usize> = (0..len).collect();
            let joined: Vec<usize> = (1..=page_count(len, size))
                .flat_map(|n| page(&items, n, size).iter().copied())
                .collect();
            prop_assert_eq!(joined, items);
        }
    }
}
