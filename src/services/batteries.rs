use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::db::DbPool;
use crate::entities::inverter_battery;
use crate::errors::ServiceError;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBatteryRequest {
    #[validate(length(min = 1, message = "name must not be blank"))]
    pub name: String,
    pub model_number: Option<String>,
    pub capacity: Option<String>,
    #[validate(custom = "crate::services::validate_non_negative")]
    pub dealer_price: Decimal,
    #[validate(custom = "crate::services::validate_non_negative")]
    pub customer_price: Decimal,
    pub voltage: Option<String>,
    #[validate(range(min = 0))]
    pub warranty_period_in_months: Option<i32>,
    #[validate(range(min = 0))]
    pub quantity: i32,
    pub image_url: Option<String>,
}

/// Partial update: only fields that are present overwrite the stored record.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBatteryRequest {
    #[validate(length(min = 1, message = "name must not be blank"))]
    pub name: Option<String>,
    pub model_number: Option<String>,
    pub capacity: Option<String>,
    #[validate(custom = "crate::services::validate_non_negative")]
    pub dealer_price: Option<Decimal>,
    #[validate(custom = "crate::services::validate_non_negative")]
    pub customer_price: Option<Decimal>,
    pub voltage: Option<String>,
    #[validate(range(min = 0))]
    pub warranty_period_in_months: Option<i32>,
    #[validate(range(min = 0))]
    pub quantity: Option<i32>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatteryResponse {
    pub id: i64,
    pub name: String,
    pub model_number: Option<String>,
    pub capacity: Option<String>,
    pub dealer_price: Decimal,
    pub customer_price: Decimal,
    pub voltage: Option<String>,
    pub warranty_period_in_months: Option<i32>,
    pub quantity: i32,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct BatteryService {
    db: Arc<DbPool>,
}

impl BatteryService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create(
        &self,
        request: CreateBatteryRequest,
    ) -> Result<BatteryResponse, ServiceError> {
        request.validate()?;

        let model = inverter_battery::ActiveModel {
            name: Set(request.name),
            model_number: Set(request.model_number),
            capacity: Set(request.capacity),
            dealer_price: Set(request.dealer_price),
            customer_price: Set(request.customer_price),
            voltage: Set(request.voltage),
            warranty_period_in_months: Set(request.warranty_period_in_months),
            quantity: Set(request.quantity),
            image_url: Set(request.image_url),
            ..Default::default()
        }
        .insert(&*self.db)
        .await?;

        Ok(model_to_response(model))
    }

    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        id: i64,
        request: UpdateBatteryRequest,
    ) -> Result<BatteryResponse, ServiceError> {
        request.validate()?;

        let existing = inverter_battery::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Battery not found: {}", id)))?;

        let mut active: inverter_battery::ActiveModel = existing.into();
        if let Some(name) = request.name {
            active.name = Set(name);
        }
        if let Some(model_number) = request.model_number {
            active.model_number = Set(Some(model_number));
        }
        if let Some(capacity) = request.capacity {
            active.capacity = Set(Some(capacity));
        }
        if let Some(dealer_price) = request.dealer_price {
            active.dealer_price = Set(dealer_price);
        }
        if let Some(customer_price) = request.customer_price {
            active.customer_price = Set(customer_price);
        }
        if let Some(voltage) = request.voltage {
            active.voltage = Set(Some(voltage));
        }
        if let Some(warranty) = request.warranty_period_in_months {
            active.warranty_period_in_months = Set(Some(warranty));
        }
        if let Some(quantity) = request.quantity {
            active.quantity = Set(quantity);
        }
        if let Some(image_url) = request.image_url {
            active.image_url = Set(Some(image_url));
        }

        let updated = active.update(&*self.db).await?;
        Ok(model_to_response(updated))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let result = inverter_battery::Entity::delete_by_id(id)
            .exec(&*self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!("Battery not found: {}", id)));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<BatteryResponse, ServiceError> {
        let model = inverter_battery::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Battery not found: {}", id)))?;
        Ok(model_to_response(model))
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<BatteryResponse>, ServiceError> {
        let models = inverter_battery::Entity::find()
            .order_by_asc(inverter_battery::Column::Id)
            .all(&*self.db)
            .await?;
        Ok(models.into_iter().map(model_to_response).collect())
    }
}

fn model_to_response(model: inverter_battery::Model) -> BatteryResponse {
    BatteryResponse {
        id: model.id,
        name: model.name,
        model_number: model.model_number,
        capacity: model.capacity,
        dealer_price: model.dealer_price,
        customer_price: model.customer_price,
        voltage: model.voltage,
        warranty_period_in_months: model.warranty_period_in_months,
        quantity: model.quantity,
        image_url: model.image_url,
        created_at: model.created_at,
    }
}
