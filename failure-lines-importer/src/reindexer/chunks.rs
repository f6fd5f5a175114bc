//! Partitioning of the ordered record set into pages.

use std::num::NonZeroU64;

/// Yield the `(offset, limit)` pairs that cover `[0, total)` exactly.
///
/// Every limit equals `chunk_size` except the last, which is
/// `total % chunk_size` when that is non-zero.
pub fn chunk_bounds(total: u64, chunk_size: NonZeroU64) -> impl Iterator<Item = (u64, u64)> {
    let size = chunk_size.get();
    std::iter::successors(Some(0u64), move |offset| offset.checked_add(size))
        .take_while(move |offset| *offset < total)
        .map(move |offset| (offset, size.min(total - offset)))
}
