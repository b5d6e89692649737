pub mod batteries;
pub mod images;
pub mod otp;
pub mod sales;
pub mod spare_parts;

use rust_decimal::Decimal;
use validator::ValidationError;

/// Shared validator for price fields: prices are decimals and never negative.
pub(crate) fn validate_non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() {
        let mut err = ValidationError::new("non_negative");
        err.message = Some("must not be negative".into());
        return Err(err);
    }
    Ok(())
}
