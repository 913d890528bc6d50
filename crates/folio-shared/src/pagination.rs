//! Page boundaries and page-link sequences for listing pages.
//!
//! [`calculate_pagination`] works out which slice of a listing belongs to the
//! requested page and produces the compact sequence of page links shown under
//! it, e.g. `1 … 4 5 6 … 10`. [`paginate`] applies the same boundaries to a
//! slice.

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationError {
    #[error("Invalid page size: must be at least 1")]
    InvalidPageSize,
}

/// One entry of the page-link control, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PageItem {
    Page { number: usize },
    Ellipsis,
}

impl PageItem {
    pub fn page(number: usize) -> Self {
        PageItem::Page { number }
    }

    pub fn is_ellipsis(&self) -> bool {
        matches!(self, PageItem::Ellipsis)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationResult {
    pub total_pages: usize,
    /// Requested page clamped to `[1, total_pages]`, or 1 when there are no pages.
    pub current_page: usize,
    /// Index of the first item on the current page.
    pub start_index: usize,
    /// One past the last item on the current page.
    pub end_index: usize,
    pub has_previous_page: bool,
    pub has_next_page: bool,
    pub items: Vec<PageItem>,
}

/// Computes page boundaries and the page-link sequence.
///
/// `requested_page` is clamped rather than rejected, so any integer is
/// accepted. `sibling_count` is the number of page links shown on each side
/// of the current page. Fails only when `page_size` is zero.
pub fn calculate_pagination(
    total_items: usize,
    requested_page: i64,
    page_size: usize,
    sibling_count: usize,
) -> Result<PaginationResult, PaginationError> {
    if page_size == 0 {
        return Err(PaginationError::InvalidPageSize);
    }

    let total_pages = total_items.div_ceil(page_size);
    let last_page = total_pages.max(1);
    let current_page = if requested_page < 1 {
        1
    } else {
        usize::try_from(requested_page).map_or(last_page, |page| page.min(last_page))
    };

    let start_index = ((current_page - 1) * page_size).min(total_items);
    let end_index = start_index.saturating_add(page_size).min(total_items);

    Ok(PaginationResult {
        total_pages,
        current_page,
        start_index,
        end_index,
        has_previous_page: current_page > 1,
        has_next_page: current_page < total_pages,
        items: page_items(total_pages, current_page, sibling_count),
    })
}

/// Returns the items on `page`, using the same boundaries as
/// [`calculate_pagination`].
pub fn paginate<T>(items: &[T], page: i64, page_size: usize) -> Result<&[T], PaginationError> {
    let pagination = calculate_pagination(items.len(), page, page_size, 0)?;
    Ok(&items[pagination.start_index..pagination.end_index])
}

fn page_items(total_pages: usize, current_page: usize, sibling_count: usize) -> Vec<PageItem> {
    if total_pages == 0 {
        return Vec::new();
    }

    let window_start = current_page.saturating_sub(sibling_count).max(1);
    let window_end = current_page.saturating_add(sibling_count).min(total_pages);

    let mut shown = Vec::with_capacity(window_end - window_start + 3);
    shown.push(1);
    shown.extend(window_start.max(2)..=window_end);
    if *shown.last().unwrap_or(&1) != total_pages {
        shown.push(total_pages);
    }

    let mut items = Vec::with_capacity(shown.len() + 2);
    let mut previous: Option<usize> = None;
    for page in shown {
        if let Some(prev) = previous {
            match page - prev {
                1 => {}
                // a single hidden page is shown instead of an ellipsis
                2 => items.push(PageItem::page(prev + 1)),
                _ => items.push(PageItem::Ellipsis),
            }
        }
        items.push(PageItem::page(page));
        previous = Some(page);
    }
    items
}
