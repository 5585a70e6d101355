//! Path and query parameter coercion
//!
//! Integers are parsed strictly as base-10. Anything that does not parse
//! is a 400, never silently replaced by a default.

use std::collections::HashMap;

use paydesk_config::PaginationConfig;
use paydesk_core::PageRequest;

use crate::error::{ApiError, ApiResult};

pub type QueryParams = HashMap<String, String>;

/// `str::parse` also takes a leading `+`; plain digits only here
fn unsigned_digits(raw: &str) -> bool {
    !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit())
}

/// Parse a path segment id
pub fn parse_id(name: &str, raw: &str) -> ApiResult<i32> {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    if !unsigned_digits(digits) {
        return Err(ApiError::bad_request(format!(
            "{} must be an integer, got '{}'",
            name, raw
        )));
    }
    raw.parse::<i32>()
        .map_err(|_| ApiError::bad_request(format!("{} is out of range, got '{}'", name, raw)))
}

pub fn optional_i32(params: &QueryParams, name: &str) -> ApiResult<Option<i32>> {
    params.get(name).map(|raw| parse_id(name, raw)).transpose()
}

pub fn optional_u64(params: &QueryParams, name: &str) -> ApiResult<Option<u64>> {
    params
        .get(name)
        .map(|raw| {
            let value = if unsigned_digits(raw) {
                raw.parse::<u64>().ok()
            } else {
                None
            };
            value.ok_or_else(|| {
                ApiError::bad_request(format!(
                    "{} must be a non-negative integer, got '{}'",
                    name, raw
                ))
            })
        })
        .transpose()
}

/// Read `skip`/`take` with configured defaults and bounds
pub fn page_request(params: &QueryParams, pagination: &PaginationConfig) -> ApiResult<PageRequest> {
    let skip = optional_u64(params, "skip")?.unwrap_or(0);
    let take = optional_u64(params, "take")?.unwrap_or(pagination.default_take);
    Ok(PageRequest::bounded(skip, take, pagination.max_take)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> QueryParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let request = page_request(&params(&[]), &PaginationConfig::default()).unwrap();
        assert_eq!(request, PageRequest::new(0, 10));
    }

    #[test]
    fn test_take_is_clamped() {
        let request =
            page_request(&params(&[("take", "5000")]), &PaginationConfig::default()).unwrap();
        assert_eq!(request.take, 1000);
    }

    #[test]
    fn test_rejects_bad_numbers() {
        let config = PaginationConfig::default();
        assert!(page_request(&params(&[("skip", "abc")]), &config).is_err());
        assert!(page_request(&params(&[("skip", "-1")]), &config).is_err());
        assert!(page_request(&params(&[("take", "0")]), &config).is_err());
        assert!(page_request(&params(&[("take", "2.5")]), &config).is_err());
    }

    #[test]
    fn test_skip_past_i64_is_rejected() {
        let config = PaginationConfig::default();
        let request = page_request(&params(&[("skip", "9223372036854775807")]), &config).unwrap();
        assert_eq!(request.skip, i64::MAX as u64);
        for skip in ["9223372036854775808", "18446744073709551615", "18446744073709551616"] {
            assert!(page_request(&params(&[("skip", skip)]), &config).is_err(), "{}", skip);
        }
    }

    #[test]
    fn test_rejects_sign_and_whitespace() {
        let config = PaginationConfig::default();
        for raw in ["+5", " 42", "42 ", ""] {
            assert!(page_request(&params(&[("skip", raw)]), &config).is_err(), "{:?}", raw);
            assert!(parse_id("id", raw).is_err(), "{:?}", raw);
        }
        assert!(parse_id("id", "-").is_err());
        assert_eq!(parse_id("id", "-3").unwrap(), -3);
        assert!(parse_id("id", "99999999999").is_err());
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("id", "42").unwrap(), 42);
        assert!(parse_id("id", "4x").is_err());
        assert_eq!(optional_i32(&params(&[]), "accountId").unwrap(), None);
        assert_eq!(
            optional_i32(&params(&[("accountId", "3")]), "accountId").unwrap(),
            Some(3)
        );
    }
}
