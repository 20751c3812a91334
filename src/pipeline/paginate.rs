// src/pipeline/paginate.rs

//! Pagination engine.

use crate::models::{NavButton, NavKind, PageView, PaginationState};

/// Derive page metadata and navigation controls for `len` filtered rows.
///
/// Recomputes `total_pages` and clamps `current_page` on `state` before
/// building the view.
pub fn paginate(len: usize, state: &mut PaginationState, max_page_buttons: usize) -> PageView {
    state.recompute(len);
    let range = state.bounds(len);

    let info = if range.is_empty() {
        format!("0-0 of {len}")
    } else {
        format!("{}-{} of {}", range.start + 1, range.end, len)
    };

    PageView {
        range,
        info,
        buttons: nav_buttons(state.current_page, state.total_pages, max_page_buttons),
        visible: len > 0,
        current_page: state.current_page,
        total_pages: state.total_pages,
    }
}

/// Page numbers shown around `current`, at most `width` of them.
pub fn page_window(current: usize, total: usize, width: usize) -> std::ops::RangeInclusive<usize> {
    let width = width.max(1);
    let total = total.max(1);
    let current = current.clamp(1, total);

    let mut start = current.saturating_sub(width / 2).max(1);
    let end = (start + width - 1).min(total);
    if end - start + 1 < width {
        start = end.saturating_sub(width - 1).max(1);
    }
    start..=end
}

/// First, previous, page-number window, next, last.
pub fn nav_buttons(current: usize, total: usize, width: usize) -> Vec<NavButton> {
    let at_start = current <= 1;
    let at_end = current >= total;
    let button = |kind, target, disabled| NavButton {
        kind,
        target,
        disabled,
        active: false,
    };

    let mut buttons = vec![
        button(NavKind::First, 1, at_start),
        button(NavKind::Prev, current.saturating_sub(1).max(1), at_start),
    ];
    buttons.extend(page_window(current, total, width).map(|page| NavButton {
        kind: NavKind::Page,
        target: page,
        disabled: false,
        active: page == current,
    }));
    buttons.push(button(NavKind::Next, (current + 1).min(total), at_end));
    buttons.push(button(NavKind::Last, total, at_end));
    buttons
}
