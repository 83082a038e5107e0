//! Filtering and pagination over cached collections.

use serde::{Deserialize, Serialize};

use crate::domain::{Role, User};

/// Directory search criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFilter {
    /// Case-insensitive substring matched against username, e-mail, and names.
    #[serde(default)]
    pub search: Option<String>,
    /// Restrict to one role.
    #[serde(default)]
    pub role: Option<Role>,
}

impl UserFilter {
    /// Whether `user` satisfies every criterion.
    #[must_use]
    pub fn matches(&self, user: &User) -> bool {
        if self.role.is_some_and(|role| role != user.role()) {
            return false;
        }
        let Some(needle) = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|needle| !needle.is_empty())
        else {
            return true;
        };
        let needle = needle.to_lowercase();
        [user.username(), user.email(), user.first_name(), user.last_name()]
            .into_iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    /// Users matching the filter, in input order.
    #[must_use]
    pub fn apply<'a>(&self, users: &'a [User]) -> Vec<&'a User> {
        users.iter().filter(|user| self.matches(user)).collect()
    }
}

/// Error raised for a zero page number or page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    /// Pages are numbered from one.
    #[error("page numbers start at 1")]
    ZeroPage,
    /// A page must hold at least one item.
    #[error("page size must be at least 1")]
    ZeroPageSize,
}

/// One-based page selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: usize,
    per_page: usize,
}

impl PageRequest {
    /// Default table page size.
    pub const DEFAULT_PER_PAGE: usize = 10;

    /// Validate and build a page request.
    pub fn new(page: usize, per_page: usize) -> Result<Self, PageRequestError> {
        if page == 0 {
            return Err(PageRequestError::ZeroPage);
        }
        if per_page == 0 {
            return Err(PageRequestError::ZeroPageSize);
        }
        Ok(Self { page, per_page })
    }

    /// One-based page number.
    #[must_use]
    pub fn page(self) -> usize {
        self.page
    }

    /// Items per page.
    #[must_use]
    pub fn per_page(self) -> usize {
        self.per_page
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: Self::DEFAULT_PER_PAGE,
        }
    }
}

/// A slice of a collection plus totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// One-based page number.
    pub page: usize,
    /// Requested page size.
    pub per_page: usize,
    /// Items across all pages.
    pub total: usize,
    /// Number of non-empty pages.
    pub total_pages: usize,
}

/// Cut one page out of `items`. Pages past the end are empty.
///
/// # Examples
/// ```
/// use hr_backend::domain::{PageRequest, paginate};
///
/// let page = paginate(&[1, 2, 3, 4, 5], PageRequest::new(2, 2).unwrap());
/// assert_eq!(page.items, vec![3, 4]);
/// assert_eq!(page.total_pages, 3);
/// ```
pub fn paginate<T: Clone>(items: &[T], request: PageRequest) -> Page<T> {
    let total = items.len();
    let start = (request.page - 1).saturating_mul(request.per_page);
    let page_items = items
        .iter()
        .skip(start)
        .take(request.per_page)
        .cloned()
        .collect();
    Page {
        items: page_items,
        page: request.page,
        per_page: request.per_page,
        total,
        total_pages: total.div_ceil(request.per_page),
    }
}
