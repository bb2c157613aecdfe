//! First-true binary search over a monotone predicate.

/// Find the lowest index in `items[from..]` where `predicate` holds.
///
/// `predicate` must be monotone over the searched range: false for a
/// prefix, true for the rest. Runs in O(log n).
///
/// # Boundary convention
/// If the predicate is never true, the last index (`items.len() - 1`) is
/// returned rather than a "not found" marker. Callers use the result as an
/// inclusive upper bound, so "never true" means "everything up to the end".
/// `from` past the end is clamped the same way.
///
/// Returns 0 for an empty slice; callers are expected to check for
/// emptiness before indexing.
///
/// # Examples
///
/// ```
/// use treescroll::virtual_scroll::search::first_index_where;
///
/// let offsets = [0, 10, 20, 30, 40];
/// assert_eq!(first_index_where(&offsets, 0, |&y| y >= 20), 2);
/// assert_eq!(first_index_where(&offsets, 0, |&y| y >= 0), 0);
/// assert_eq!(first_index_where(&offsets, 0, |&y| y > 100), 4);
/// assert_eq!(first_index_where(&offsets, 3, |&y| y >= 20), 3);
/// ```
pub fn first_index_where<T, P>(items: &[T], from: usize, predicate: P) -> usize
where
    P: Fn(&T) -> bool,
{
    if items.is_empty() {
        return 0;
    }
    let last = items.len() - 1;
    let from = from.min(last);
    let found = from + items[from..].partition_point(|item| !predicate(item));
    found.min(last)
}
