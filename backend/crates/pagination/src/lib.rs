//! Offset/limit pagination primitives shared by list endpoints.
//!
//! Handlers deserialize [`PageParams`] straight from the query string and
//! normalise it before handing it to the persistence gateway. Normalisation
//! clamps rather than rejects: a `limit` above [`MAX_LIMIT`] is capped and a
//! negative `offset` is treated as zero, so list endpoints never fail on
//! out-of-range paging inputs.

use serde::Deserialize;

/// Limit applied when the query string does not specify one.
pub const DEFAULT_LIMIT: i64 = 100;

/// Hard upper bound on page size.
pub const MAX_LIMIT: i64 = 100;

/// Offset/limit paging parameters as supplied by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PageParams {
    /// Number of leading records to skip.
    pub offset: i64,
    /// Maximum number of records to return.
    pub limit: i64,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageParams {
    /// Construct parameters from raw values.
    #[must_use]
    pub fn new(offset: i64, limit: i64) -> Self {
        Self { offset, limit }
    }

    /// Clamp the parameters into the range the gateway accepts.
    ///
    /// `offset` is floored at zero; `limit` is clamped to
    /// `0..=`[`MAX_LIMIT`].
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            offset: self.offset.max(0),
            limit: self.limit.clamp(0, MAX_LIMIT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_params_use_default_limit() {
        let params = PageParams::default();

        assert_eq!(params.offset, 0);
        assert_eq!(params.limit, DEFAULT_LIMIT);
    }

    #[rstest]
    #[case(PageParams::new(0, 500), 0, MAX_LIMIT)]
    #[case(PageParams::new(-3, 50), 0, 50)]
    #[case(PageParams::new(10, -1), 10, 0)]
    #[case(PageParams::new(4, 100), 4, 100)]
    fn clamped_keeps_params_in_range(
        #[case] params: PageParams,
        #[case] offset: i64,
        #[case] limit: i64,
    ) {
        let clamped = params.clamped();

        assert_eq!(clamped.offset, offset);
        assert_eq!(clamped.limit, limit);
    }

    #[rstest]
    fn missing_query_fields_fall_back_to_defaults() {
        let params: PageParams = serde_json::from_str("{}").expect("deserialize empty object");

        assert_eq!(params, PageParams::default());
    }

    #[rstest]
    fn partial_query_overrides_single_field() {
        let params: PageParams =
            serde_json::from_str(r#"{"offset": 20}"#).expect("deserialize offset");

        assert_eq!(params.offset, 20);
        assert_eq!(params.limit, DEFAULT_LIMIT);
    }
}
