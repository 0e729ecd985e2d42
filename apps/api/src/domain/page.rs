//! Paging types shared by search repositories
//!
//! A [`PageRequest`] selects a zero-based page of a fixed size with an
//! optional [`Sort`]; a [`Page`] carries one slice of results together with
//! the total number of rows the unpaged query would return.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default page size when none is given
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest page size a request may ask for
pub const MAX_PAGE_SIZE: u32 = 2000;

/// Errors raised while building a page request
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("Invalid page size: {0} (must be 1-{max})", max = MAX_PAGE_SIZE)]
    InvalidSize(u32),

    #[error("Invalid sort expression: {0}")]
    InvalidSort(String),
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    /// SQL keyword for this direction
    pub fn as_sql(&self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

/// A single sort instruction: property name plus direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub property: String,
    pub direction: Direction,
}

impl Order {
    pub fn asc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Desc,
        }
    }
}

/// Ordered list of sort instructions; empty means unsorted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort(Vec<Order>);

impl Sort {
    pub fn unsorted() -> Self {
        Self::default()
    }

    pub fn by(order: Order) -> Self {
        Self(vec![order])
    }

    /// Appends another order, applied after the existing ones
    pub fn and(mut self, order: Order) -> Self {
        self.0.push(order);
        self
    }

    /// Parses a `property[,asc|desc]` expression
    ///
    /// # Example
    /// ```
    /// use member_search_api::domain::page::{Direction, Sort};
    ///
    /// let sort = Sort::parse("age,desc").expect("valid sort");
    /// assert_eq!(sort.orders()[0].property, "age");
    /// assert_eq!(sort.orders()[0].direction, Direction::Desc);
    /// ```
    pub fn parse(expression: &str) -> Result<Self, PageError> {
        let mut parts = expression.split(',').map(str::trim);

        let property = parts
            .next()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| PageError::InvalidSort(expression.to_string()))?;

        let direction = match parts.next() {
            None => Direction::Asc,
            Some(d) if d.eq_ignore_ascii_case("asc") => Direction::Asc,
            Some(d) if d.eq_ignore_ascii_case("desc") => Direction::Desc,
            Some(_) => return Err(PageError::InvalidSort(expression.to_string())),
        };

        if parts.next().is_some() {
            return Err(PageError::InvalidSort(expression.to_string()));
        }

        Ok(Self::by(Order {
            property: property.to_string(),
            direction,
        }))
    }

    pub fn orders(&self) -> &[Order] {
        &self.0
    }

    pub fn is_unsorted(&self) -> bool {
        self.0.is_empty()
    }
}

/// Request for one page of results
///
/// Deserialization goes through [`PageRequest::new`], so the size bounds hold
/// for decoded requests too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPageRequest")]
pub struct PageRequest {
    page: u32,
    size: u32,
    sort: Sort,
}

/// Unvalidated wire form of [`PageRequest`]
#[derive(Deserialize)]
struct RawPageRequest {
    #[serde(default)]
    page: u32,
    #[serde(default = "default_page_size")]
    size: u32,
    #[serde(default)]
    sort: Sort,
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl TryFrom<RawPageRequest> for PageRequest {
    type Error = PageError;

    fn try_from(raw: RawPageRequest) -> Result<Self, Self::Error> {
        Ok(PageRequest::new(raw.page, raw.size)?.with_sort(raw.sort))
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: Sort::unsorted(),
        }
    }
}

impl PageRequest {
    /// Creates an unsorted request for a zero-based page
    ///
    /// # Returns
    /// * `Err(PageError::InvalidSize)` - If `size` is 0 or above [`MAX_PAGE_SIZE`]
    pub fn new(page: u32, size: u32) -> Result<Self, PageError> {
        if size == 0 || size > MAX_PAGE_SIZE {
            return Err(PageError::InvalidSize(size));
        }

        Ok(Self {
            page,
            size,
            sort: Sort::unsorted(),
        })
    }

    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn sort(&self) -> &Sort {
        &self.sort
    }

    /// Number of rows skipped before this page
    pub fn offset(&self) -> i64 {
        i64::from(self.page) * i64::from(self.size)
    }

    /// Page size as a SQL limit
    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }
}

/// One page of results plus total-row metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        Self {
            content,
            page: request.page(),
            size: request.size(),
            total_elements,
        }
    }

    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            return 0;
        }
        self.total_elements.div_ceil(u64::from(self.size))
    }

    pub fn number_of_elements(&self) -> usize {
        self.content.len()
    }

    pub fn is_first(&self) -> bool {
        self.page == 0
    }

    pub fn is_last(&self) -> bool {
        !self.has_next()
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.page) + 1 < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    /// Converts the content while keeping page metadata
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
        }
    }
}
