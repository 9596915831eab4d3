//! Traversal direction selection
//!
//! Reading a window near the tail in forward order would need an offset
//! reduction across almost the whole result set. Reading it in reverse
//! keeps the offset to reduce at most `total / 2`.

use super::types::Window;
use crate::types::SortOrder;

/// Decide the window to read, or `None` when the result is empty
///
/// `total` is the number of documents matching the base query. Offsets at
/// or below `max_from` are read as requested without looking at `total`.
pub fn select_direction(
    total: i64,
    from: i64,
    size: i64,
    order: SortOrder,
    max_from: i64,
) -> Option<Window> {
    if from <= max_from {
        return Some(Window::forward(from, size, order));
    }
    if total <= 0 || from >= total {
        return None;
    }

    let remaining = total - from;
    if from <= remaining {
        return Some(Window::forward(from, size, order));
    }

    // Measure the window from the tail. When it would start before the
    // tail origin, the size shrinks to what is left.
    let tail_from = remaining.saturating_sub(size);
    let tail_size = if tail_from < 0 { remaining } else { size };
    if tail_size <= 0 {
        return None;
    }

    Some(Window {
        from: tail_from.max(0),
        size: tail_size,
        order: order.reversed(),
        reversed: true,
    })
}
