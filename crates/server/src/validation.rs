//! Query parameter validation.

use crate::error::ApiError;

pub const THRESHOLD_PARAM: &str = "threshold";

/// Parse the raw `threshold` query value into a non-negative count.
///
/// Surrounding whitespace is ignored. Missing, blank, non-numeric and
/// negative values are each reported with their own message.
pub fn parse_threshold(raw: Option<&str>) -> Result<u64, ApiError> {
    let raw = raw.ok_or(ApiError::MissingParameter(THRESHOLD_PARAM))?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ApiError::BlankParameter(THRESHOLD_PARAM));
    }

    let not_a_number = || ApiError::NotANumber {
        name: THRESHOLD_PARAM,
        value: raw.to_string(),
    };

    // "-0" parses as 0
    match trimmed.parse::<i128>() {
        Ok(value) if value < 0 => Err(ApiError::NegativeThreshold),
        Ok(value) => u64::try_from(value).map_err(|_| not_a_number()),
        Err(_) => Err(not_a_number()),
    }
}
