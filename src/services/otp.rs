use chrono::{Duration as ChronoDuration, Utc};
use rand::Rng;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::db::DbPool;
use crate::entities::otp;
use crate::errors::ServiceError;

/// One-time-password issuance and verification for the allowed phone list.
#[derive(Debug, Clone)]
pub struct OtpService {
    db: Arc<DbPool>,
    allowed_phones: Vec<String>,
    ttl: ChronoDuration,
}

impl OtpService {
    pub fn new(db: Arc<DbPool>, allowed_phones: Vec<String>, ttl_hours: u64) -> Self {
        Self {
            db,
            allowed_phones,
            ttl: ChronoDuration::hours(ttl_hours as i64),
        }
    }

    /// Issues a fresh OTP for an allowed phone, replacing any previous one.
    /// Returns the code so the caller can deliver it.
    #[instrument(skip(self))]
    pub async fn send_otp(&self, phone: &str) -> Result<String, ServiceError> {
        if !self.allowed_phones.iter().any(|p| p == phone) {
            return Err(ServiceError::Unauthorized(
                "Phone number not allowed".to_string(),
            ));
        }

        otp::Entity::delete_many()
            .filter(otp::Column::Phone.eq(phone))
            .exec(&*self.db)
            .await?;

        let code = generate_code();
        let expires_at = Utc::now() + self.ttl;

        otp::ActiveModel {
            phone: Set(phone.to_string()),
            code: Set(code.clone()),
            expires_at: Set(expires_at),
            ..Default::default()
        }
        .insert(&*self.db)
        .await?;

        info!(phone, %expires_at, "issued OTP");
        Ok(code)
    }

    /// Verifies (phone, code). Success consumes every OTP stored for the phone.
    #[instrument(skip(self, code))]
    pub async fn verify_otp(&self, phone: &str, code: &str) -> Result<(), ServiceError> {
        let record = otp::Entity::find()
            .filter(otp::Column::Phone.eq(phone))
            .filter(otp::Column::Code.eq(code))
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::AuthError("Invalid OTP".to_string()))?;

        if record.expires_at < Utc::now() {
            return Err(ServiceError::AuthError("OTP expired".to_string()));
        }

        otp::Entity::delete_many()
            .filter(otp::Column::Phone.eq(phone))
            .exec(&*self.db)
            .await?;

        Ok(())
    }
}

/// Four-digit code in the 1000..=9999 range.
fn generate_code() -> String {
    rand::thread_rng().gen_range(1000..=9999).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_codes_are_four_digits() {
        for _ in 0..100 {
            let code = generate_code();
            assert_eq!(code.len(), 4);
            let value: u32 = code.parse().unwrap();
            assert!((1000..=9999).contains(&value));
        }
    }
}
