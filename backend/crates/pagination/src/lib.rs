//! Page request validation and pagination metadata.
//!
//! Endpoints that return collections accept a [`PageRequest`] and describe
//! the slice they returned with [`PaginationMeta`]. The metadata is derived
//! deterministically from the total item count and the request:
//!
//! - `totalPages = ceil(total / limit)`
//! - `hasNextPage = page < totalPages`
//! - `hasPreviousPage = page > 1`
//!
//! [`calculate_pagination`] only requires `page` and `limit` to be at least
//! one, which their types guarantee. The [`MAX_LIMIT`] cap applies to client
//! requests and is enforced by [`PageRequest`] when it is constructed or
//! deserialized.
//!
//! # Examples
//! ```
//! use pagination::PageRequest;
//!
//! let request = PageRequest::new(2, 10)?;
//! let meta = request.meta(95);
//! assert_eq!(meta.total_pages, 10);
//! assert!(meta.has_next_page);
//! assert!(meta.has_previous_page);
//! # Ok::<(), pagination::PaginationError>(())
//! ```

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// Page returned when the client does not ask for one.
pub const DEFAULT_PAGE: u32 = 1;

/// Page size used when the client does not ask for one.
pub const DEFAULT_LIMIT: u32 = 10;

/// Largest page size a client may request.
pub const MAX_LIMIT: u32 = 100;

/// Reasons a page request is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PaginationError {
    /// The requested page number was zero.
    #[error("page must be a positive integer")]
    ZeroPage,
    /// The requested page size was zero.
    #[error("limit must be a positive integer")]
    ZeroLimit,
    /// The requested page size exceeds [`MAX_LIMIT`].
    #[error("limit must not exceed {max}, got {limit}")]
    LimitTooLarge {
        /// Page size supplied by the client.
        limit: u32,
        /// Largest accepted page size.
        max: u32,
    },
}

/// Validated one-based page number and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPageRequest", into = "RawPageRequest")]
pub struct PageRequest {
    page: NonZeroU32,
    limit: NonZeroU32,
}

impl PageRequest {
    /// Validate a page number and page size.
    ///
    /// # Errors
    /// Returns [`PaginationError`] when either value is zero or the limit is
    /// larger than [`MAX_LIMIT`].
    pub fn new(page: u32, limit: u32) -> Result<Self, PaginationError> {
        let page = NonZeroU32::new(page).ok_or(PaginationError::ZeroPage)?;
        let limit = NonZeroU32::new(limit).ok_or(PaginationError::ZeroLimit)?;
        if limit.get() > MAX_LIMIT {
            return Err(PaginationError::LimitTooLarge {
                limit: limit.get(),
                max: MAX_LIMIT,
            });
        }
        Ok(Self { page, limit })
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page.get()
    }

    /// Number of items per page.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit.get()
    }

    /// Pagination metadata for `total` items served with this request.
    #[must_use]
    pub fn meta(self, total: u64) -> PaginationMeta {
        calculate_pagination(total, self.page, self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: NonZeroU32::MIN,
            limit: NonZeroU32::new(DEFAULT_LIMIT).unwrap_or(NonZeroU32::MIN),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawPageRequest {
    #[serde(default)]
    page: Option<u32>,
    #[serde(default)]
    limit: Option<u32>,
}

impl TryFrom<RawPageRequest> for PageRequest {
    type Error = PaginationError;

    fn try_from(raw: RawPageRequest) -> Result<Self, Self::Error> {
        Self::new(
            raw.page.unwrap_or(DEFAULT_PAGE),
            raw.limit.unwrap_or(DEFAULT_LIMIT),
        )
    }
}

impl From<PageRequest> for RawPageRequest {
    fn from(request: PageRequest) -> Self {
        Self {
            page: Some(request.page()),
            limit: Some(request.limit()),
        }
    }
}

/// Pagination metadata attached to list envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// One-based page number that was served.
    pub page: u32,
    /// Page size that was served.
    pub limit: u32,
    /// Total number of items across all pages.
    pub total: u64,
    /// Number of pages needed to hold `total` items.
    pub total_pages: u64,
    /// Whether a page after this one exists.
    pub has_next_page: bool,
    /// Whether a page before this one exists.
    pub has_previous_page: bool,
}

/// Derive pagination metadata for `total` items split into pages of `limit`
/// items, with `page` being the one-based page that was served.
#[must_use]
pub fn calculate_pagination(total: u64, page: NonZeroU32, limit: NonZeroU32) -> PaginationMeta {
    let page = page.get();
    let limit = limit.get();
    let total_pages = total.div_ceil(u64::from(limit));

    PaginationMeta {
        page,
        limit,
        total,
        total_pages,
        has_next_page: u64::from(page) < total_pages,
        has_previous_page: page > 1,
    }
}

#[cfg(test)]
mod tests {
    //! Unit coverage for page validation and metadata derivation.

    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn calculate(total: u64, page: u32, limit: u32) -> PaginationMeta {
        let page = NonZeroU32::new(page).expect("non-zero page");
        let limit = NonZeroU32::new(limit).expect("non-zero limit");
        calculate_pagination(total, page, limit)
    }

    #[rstest]
    fn middle_page_has_neighbours() {
        let meta = calculate(95, 2, 10);

        assert_eq!(
            meta,
            PaginationMeta {
                page: 2,
                limit: 10,
                total: 95,
                total_pages: 10,
                has_next_page: true,
                has_previous_page: true,
            }
        );
    }

    #[rstest]
    fn single_partial_page_has_no_neighbours() {
        let meta = calculate(5, 1, 10);

        assert_eq!(meta.total_pages, 1);
        assert!(!meta.has_next_page);
        assert!(!meta.has_previous_page);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(10, 1)]
    #[case(11, 2)]
    #[case(100, 10)]
    fn total_pages_rounds_up(#[case] total: u64, #[case] expected: u64) {
        assert_eq!(calculate(total, 1, 10).total_pages, expected);
    }

    #[rstest]
    fn last_page_has_no_next_page() {
        let meta = calculate(30, 3, 10);

        assert!(!meta.has_next_page);
        assert!(meta.has_previous_page);
    }

    #[rstest]
    fn limits_above_the_request_cap_are_still_calculated() {
        let meta = calculate(450, 2, 150);

        assert_eq!(meta.limit, 150);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_next_page);
        assert!(meta.has_previous_page);
    }

    #[rstest]
    fn page_request_meta_uses_its_page_and_limit() {
        let request = PageRequest::new(3, 20).expect("valid page request");

        assert_eq!(request.meta(41), calculate(41, 3, 20));
    }

    #[rstest]
    #[case(0, 10, PaginationError::ZeroPage)]
    #[case(1, 0, PaginationError::ZeroLimit)]
    #[case(1, 101, PaginationError::LimitTooLarge { limit: 101, max: MAX_LIMIT })]
    fn invalid_requests_are_rejected(
        #[case] page: u32,
        #[case] limit: u32,
        #[case] expected: PaginationError,
    ) {
        assert_eq!(PageRequest::new(page, limit), Err(expected));
    }

    #[rstest]
    fn missing_fields_fall_back_to_defaults() {
        let parsed: PageRequest = serde_json::from_value(json!({})).expect("defaults apply");

        assert_eq!(parsed, PageRequest::default());
        assert_eq!(parsed.page(), DEFAULT_PAGE);
        assert_eq!(parsed.limit(), DEFAULT_LIMIT);
    }

    #[rstest]
    fn deserialisation_rejects_zero_limit() {
        let result = serde_json::from_value::<PageRequest>(json!({ "page": 1, "limit": 0 }));

        let err = result.expect_err("zero limit rejected");
        assert!(err.to_string().contains("limit must be a positive integer"));
    }

    #[rstest]
    fn meta_serialises_with_camel_case_keys() {
        let value = serde_json::to_value(calculate(95, 2, 10))
            .expect("meta serialises");

        assert_eq!(
            value,
            json!({
                "page": 2,
                "limit": 10,
                "total": 95,
                "totalPages": 10,
                "hasNextPage": true,
                "hasPreviousPage": true,
            })
        );
    }
}
