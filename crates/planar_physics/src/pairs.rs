//! Unordered pair iteration over a mutable slice

/// Borrow two distinct elements of a slice mutably, `i < j`
pub(crate) fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    debug_assert!(i < j);
    let (head, tail) = items.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}

/// Visit every unordered pair `(i, j)` with `i < j` exactly once, in index order
pub(crate) fn for_each_pair_mut<T>(items: &mut [T], mut visit: impl FnMut(&mut T, &mut T)) {
    let count = items.len();
    for i in 0..count {
        for j in (i + 1)..count {
            let (a, b) = pair_mut(items, i, j);
            visit(a, b);
        }
    }
}
