use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// Unconditional overwrite of a participant's stored result. Range
/// checks still apply; the strictly-better ordering does not.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct OverrideResultRequest {
    #[validate(range(min = 0, max = 100))]
    pub best_series: i64,
    #[validate(range(min = 0, max = 10))]
    pub accessory_tens: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetMinorRequest {
    pub is_minor: bool,
}
