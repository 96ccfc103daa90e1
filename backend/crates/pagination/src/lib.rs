//! Offset pagination primitives shared by backend endpoints.
//!
//! Purpose: give adapters one vocabulary for "which page, how big, which way"
//! and one envelope for "here is that page, and this many items exist in
//! total". Storage adapters translate [`PageRequest`] into `LIMIT`/`OFFSET`
//! (or slice an already sorted collection); inbound adapters render
//! [`Page`] into their response bodies.
//!
//! Public surface:
//! - [`SortDirection`]: ascending or descending ordering, parsed leniently from
//!   query parameters.
//! - [`PageRequest`]: zero-based page number and a non-zero page size.
//! - [`Page`]: the items for one page plus the total match count.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ordering applied to the sort key of a paged listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    /// Smallest sort key first.
    #[default]
    #[serde(rename = "ASC")]
    Ascending,
    /// Largest sort key first.
    #[serde(rename = "DESC")]
    Descending,
}

impl SortDirection {
    /// Parse a query parameter value.
    ///
    /// Only the exact token `DESC` selects descending order; every other value
    /// (including `ASC`, lowercase spellings, and the empty string) sorts
    /// ascending.
    ///
    /// # Examples
    /// ```
    /// use pagination::SortDirection;
    ///
    /// assert_eq!(SortDirection::from_param("DESC"), SortDirection::Descending);
    /// assert_eq!(SortDirection::from_param("ASC"), SortDirection::Ascending);
    /// assert_eq!(SortDirection::from_param("sideways"), SortDirection::Ascending);
    /// ```
    #[must_use]
    pub fn from_param(value: &str) -> Self {
        if value == "DESC" {
            Self::Descending
        } else {
            Self::Ascending
        }
    }

    /// Render the direction as its canonical query parameter token.
    #[must_use]
    pub const fn as_param(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }

    /// Orient an ascending comparison result in this direction.
    ///
    /// # Examples
    /// ```
    /// use std::cmp::Ordering;
    /// use pagination::SortDirection;
    ///
    /// assert_eq!(SortDirection::Descending.apply(1.cmp(&2)), Ordering::Greater);
    /// ```
    #[must_use]
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// Validation errors raised when constructing a [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// Page size must hold at least one item.
    #[error("page size must be greater than zero")]
    ZeroSize,
}

/// A zero-based page number paired with a fixed page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    number: u32,
    size: u32,
}

impl PageRequest {
    /// Build a page request.
    ///
    /// # Errors
    /// Returns [`PageRequestError::ZeroSize`] when `size` is zero.
    ///
    /// # Examples
    /// ```
    /// use pagination::PageRequest;
    ///
    /// let request = PageRequest::new(2, 20).expect("non-zero size");
    /// assert_eq!(request.offset(), 40);
    /// ```
    pub const fn new(number: u32, size: u32) -> Result<Self, PageRequestError> {
        if size == 0 {
            return Err(PageRequestError::ZeroSize);
        }
        Ok(Self { number, size })
    }

    /// Zero-based page number.
    #[must_use]
    pub const fn number(&self) -> u32 {
        self.number
    }

    /// Maximum number of items on the page.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Number of items preceding the first item of this page.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.number as u64) * (self.size as u64)
    }
}

/// One page of items together with the total number of matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    items: Vec<T>,
    number: u32,
    size: u32,
    total_items: u64,
}

impl<T> Page<T> {
    /// Wrap the items already selected for `request`.
    #[must_use]
    pub fn new(items: Vec<T>, request: PageRequest, total_items: u64) -> Self {
        Self {
            items,
            number: request.number,
            size: request.size,
            total_items,
        }
    }

    /// Cut the requested page out of a collection that is already sorted.
    ///
    /// # Examples
    /// ```
    /// use pagination::{Page, PageRequest};
    ///
    /// let request = PageRequest::new(1, 2).expect("non-zero size");
    /// let page = Page::from_sorted(vec![1, 2, 3, 4, 5], request);
    /// assert_eq!(page.items(), &[3, 4]);
    /// assert_eq!(page.total_items(), 5);
    /// assert_eq!(page.total_pages(), 3);
    /// ```
    #[must_use]
    pub fn from_sorted(sorted: Vec<T>, request: PageRequest) -> Self {
        let total_items = sorted.len() as u64;
        let skip = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let items = sorted
            .into_iter()
            .skip(skip)
            .take(request.size as usize)
            .collect();
        Self::new(items, request, total_items)
    }

    /// Items on this page, in sort order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        self.items.as_slice()
    }

    /// Consume the page and return its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Zero-based page number this page answers.
    #[must_use]
    pub const fn number(&self) -> u32 {
        self.number
    }

    /// Requested page size.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Total number of matching items across every page.
    #[must_use]
    pub const fn total_items(&self) -> u64 {
        self.total_items
    }

    /// Number of pages needed to list every match.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        self.total_items.div_ceil(self.size as u64)
    }

    /// Whether a later page holds further items.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        (self.number as u64) + 1 < self.total_pages()
    }

    /// Transform each item, keeping the page metadata.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_items: self.total_items,
        }
    }

    /// Fallibly transform each item, keeping the page metadata.
    ///
    /// # Errors
    /// Returns the first error produced by `f`.
    pub fn try_map<U, E, F>(self, f: F) -> Result<Page<U>, E>
    where
        F: FnMut(T) -> Result<U, E>,
    {
        let items = self.items.into_iter().map(f).collect::<Result<Vec<_>, _>>()?;
        Ok(Page {
            items,
            number: self.number,
            size: self.size,
            total_items: self.total_items,
        })
    }
}
