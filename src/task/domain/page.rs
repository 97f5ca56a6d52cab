//! Page-number pagination over task listings.

/// A 1-based page request with a fixed page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    number: u32,
    size: u32,
}

impl PageRequest {
    /// Page size used when none is configured.
    pub const DEFAULT_SIZE: u32 = 10;

    /// Creates a request, clamping the page number and size to at least 1.
    #[must_use]
    pub fn new(number: u32, size: u32) -> Self {
        Self {
            number: number.max(1),
            size: size.max(1),
        }
    }

    /// Returns the 1-based page number.
    #[must_use]
    pub const fn number(self) -> u32 {
        self.number
    }

    /// Returns the page size.
    #[must_use]
    pub const fn size(self) -> u32 {
        self.size
    }

    /// Returns the offset and limit for this page.
    #[must_use]
    pub fn window(self) -> PageWindow {
        PageWindow {
            offset: u64::from(self.number - 1) * u64::from(self.size),
            limit: u64::from(self.size),
        }
    }
}

/// Offset and limit applied to an ordered listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Number of records to skip.
    pub offset: u64,
    /// Maximum number of records to return.
    pub limit: u64,
}

/// One page of results with the total number of matching records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    items: Vec<T>,
    total: u64,
    request: PageRequest,
}

impl<T> Page<T> {
    /// Assembles a page.
    #[must_use]
    pub const fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            request,
        }
    }

    /// Returns the records on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consumes the page, returning its records.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Returns the total number of records across all pages.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Returns the request this page answers.
    #[must_use]
    pub const fn request(&self) -> PageRequest {
        self.request
    }

    /// Returns `true` when a later page holds more records.
    #[must_use]
    pub fn has_next(&self) -> bool {
        let window = self.request.window();
        window.offset + window.limit < self.total
    }

    /// Returns `true` when this is not the first page.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.request.number > 1
    }
}
