//! Deterministic ordering and windowing of flattened listings.

use crate::error::{MgmtError, Result};

/// Reject zero-dimension windows before any remote work is dispatched.
pub fn check_window(page_size: u32, page_number: u32) -> Result<()> {
    if page_size == 0 || page_number == 0 {
        return Err(MgmtError::InvalidPageWindow {
            size: page_size,
            page: page_number,
        });
    }
    Ok(())
}

/// Sort records by a total-order key, then return the 1-based page window.
///
/// A window starting past the end yields an empty list; a window running past
/// the end is clamped. Zero page size or zero page number is a caller
/// contract violation and is rejected before any work happens.
pub fn sort_and_window<T, K, F>(
    mut records: Vec<T>,
    key: F,
    page_size: u32,
    page_number: u32,
) -> Result<Vec<T>>
where
    F: FnMut(&T) -> K,
    K: Ord,
{
    check_window(page_size, page_number)?;

    records.sort_by_key(key);

    let total = records.len();
    let start = (page_number as u64 - 1) * page_size as u64;
    if start >= total as u64 {
        return Ok(Vec::new());
    }
    let start = start as usize;
    let end = usize::min(start + page_size as usize, total);
    Ok(records.drain(start..end).collect())
}
