//! HTTP handlers, grouped per resource. Each submodule exposes a
//! `routes()` function returning a `Router<AppState>` that `lib.rs`
//! nests under its path prefix.

use std::sync::Arc;
use std::time::Duration;

use crate::auth::{AuthConfig, AuthService};
use crate::config::AppConfig;
use crate::db::DbPool;
use crate::errors::ServiceError;
use crate::services::batteries::BatteryService;
use crate::services::images::ImageStorageService;
use crate::services::otp::OtpService;
use crate::services::sales::SaleService;
use crate::services::spare_parts::SparePartService;

pub mod auth;
pub mod batteries;
pub mod common;
pub mod images;
pub mod sales;
pub mod spare_parts;

/// Service container shared across handlers through [`crate::AppState`].
#[derive(Clone)]
pub struct AppServices {
    pub spare_parts: Arc<SparePartService>,
    pub batteries: Arc<BatteryService>,
    pub sales: Arc<SaleService>,
    pub otp: Arc<OtpService>,
    pub images: Arc<ImageStorageService>,
    pub auth: Arc<AuthService>,
}

impl AppServices {
    /// Wires every service from the shared pool and configuration.
    /// Fails if the upload directory cannot be created.
    pub fn new(db: Arc<DbPool>, config: &AppConfig) -> Result<Self, ServiceError> {
        let auth_config = AuthConfig::new(
            config.jwt_secret.clone(),
            config.auth_issuer.clone(),
            config.auth_audience.clone(),
            Duration::from_secs(config.jwt_expiration as u64),
        );

        Ok(Self {
            spare_parts: Arc::new(SparePartService::new(db.clone())),
            batteries: Arc::new(BatteryService::new(db.clone())),
            sales: Arc::new(SaleService::new(db.clone())),
            otp: Arc::new(OtpService::new(
                db,
                config.allowed_phone_list(),
                config.otp_ttl_hours,
            )),
            images: Arc::new(ImageStorageService::new(config.upload_dir.clone())?),
            auth: Arc::new(AuthService::new(auth_config)),
        })
    }
}
