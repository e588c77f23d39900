//! Pagination over the accepted file list.
//!
//! Pagination state is derived, never authoritative: every call recomputes
//! the page count and clamps the requested page into range, so replacing the
//! file list or the page size can never leave the current page dangling past
//! the end.
//!
//! # Public API
//! - [`paginate`]: Derive the page slice bounds for a collection
//! - [`PageSize`]: Positive page size or the show-all sentinel
//! - [`Page`]: The derived slice bounds and clamped page number

use std::fmt;
use std::str::FromStr;

/// Default number of file sections per page on first load.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Page size setting: a positive count or "show everything on one page"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSize {
    Limited(usize),
    All,
}

impl PageSize {
    /// Concrete item count for a collection of `total` items. Never zero.
    fn items_per_page(self, total: usize) -> usize {
        match self {
            PageSize::Limited(size) => size.max(1),
            PageSize::All => total.max(1),
        }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize::Limited(DEFAULT_PAGE_SIZE)
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSize::Limited(size) => write!(f, "{size}"),
            PageSize::All => write!(f, "all"),
        }
    }
}

impl FromStr for PageSize {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.eq_ignore_ascii_case("all") {
            return Ok(PageSize::All);
        }
        match value.parse::<usize>() {
            Ok(size) if size > 0 => Ok(PageSize::Limited(size)),
            _ => Err(format!(
                "invalid page size '{value}': expected a positive number or 'all'"
            )),
        }
    }
}

/// Derived pagination state for one collection and one page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Requested page clamped into `[1, total_pages]`
    pub current_page: usize,
    /// Always at least 1, even for an empty collection
    pub total_pages: usize,
    /// Start index of the page slice (inclusive)
    pub start: usize,
    /// End index of the page slice (exclusive)
    pub end: usize,
}

/// Compute the page slice for `total` items at `page_size`, clamping
/// `requested_page` into range. A requested page of 0 lands on page 1.
pub fn paginate(total: usize, page_size: PageSize, requested_page: usize) -> Page {
    let items_per_page = page_size.items_per_page(total);
    let total_pages = total.div_ceil(items_per_page).max(1);
    let current_page = requested_page.clamp(1, total_pages);

    let start = (current_page - 1) * items_per_page;
    let end = (start + items_per_page).min(total);

    Page {
        current_page,
        total_pages,
        start,
        end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_slicing() {
        let page = paginate(25, PageSize::Limited(10), 2);
        assert_eq!(page.current_page, 2);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.start, 10);
        assert_eq!(page.end, 20);
    }

    #[test]
    fn test_requested_page_past_end_clamps() {
        // 25 items at 10/page: page 99 clamps to page 3, items 21-25
        let page = paginate(25, PageSize::Limited(10), 99);
        assert_eq!(page.current_page, 3);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.start, 20);
        assert_eq!(page.end, 25);
    }

    #[test]
    fn test_page_zero_clamps_to_one() {
        let page = paginate(5, PageSize::Limited(2), 0);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.start, 0);
        assert_eq!(page.end, 2);
    }

    #[test]
    fn test_empty_collection() {
        let page = paginate(0, PageSize::Limited(10), 7);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.start, 0);
        assert_eq!(page.end, 0);
    }

    #[test]
    fn test_show_all() {
        let page = paginate(37, PageSize::All, 5);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.start, 0);
        assert_eq!(page.end, 37);
    }

    #[test]
    fn test_clamp_always_in_range() {
        for total in [0, 1, 9, 10, 11, 100] {
            for requested in [0, 1, 3, 50, usize::MAX] {
                let page = paginate(total, PageSize::Limited(10), requested);
                assert!(page.current_page >= 1);
                assert!(page.current_page <= page.total_pages);
                assert!(page.end <= total.max(page.end));
                assert!(page.start <= page.end);
            }
        }
    }

    #[test]
    fn test_page_size_parsing() {
        assert_eq!("10".parse::<PageSize>(), Ok(PageSize::Limited(10)));
        assert_eq!("all".parse::<PageSize>(), Ok(PageSize::All));
        assert_eq!("ALL".parse::<PageSize>(), Ok(PageSize::All));
        assert!("0".parse::<PageSize>().is_err());
        assert!("-3".parse::<PageSize>().is_err());
        assert!("ten".parse::<PageSize>().is_err());
    }

    #[test]
    fn test_page_size_display_round_trip() {
        assert_eq!(PageSize::Limited(25).to_string(), "25");
        assert_eq!(PageSize::All.to_string(), "all");
        assert_eq!("all".parse::<PageSize>().unwrap(), PageSize::All);
    }
}
