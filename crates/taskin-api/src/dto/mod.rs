//! Request and response DTOs.

pub mod request;
pub mod response;

use taskin_core::error::AppError;
use taskin_core::result::AppResult;
use validator::Validate;

/// Run a DTO's field validators, mapping failures to a 400.
pub fn check<T: Validate>(dto: &T) -> AppResult<()> {
    dto.validate()
        .map_err(|e| AppError::validation(e.to_string()))
}
