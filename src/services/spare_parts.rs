use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::db::DbPool;
use crate::entities::spare_part;
use crate::errors::ServiceError;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSparePartRequest {
    #[validate(length(min = 1, message = "name must not be blank"))]
    pub name: String,
    pub category: Option<String>,
    #[validate(custom = "crate::services::validate_non_negative")]
    pub dealer_price: Decimal,
    #[validate(custom = "crate::services::validate_non_negative")]
    pub customer_price: Decimal,
    #[validate(range(min = 0))]
    pub quantity: i32,
    pub image_url: Option<String>,
}

/// Partial update: only fields that are present overwrite the stored record.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSparePartRequest {
    #[validate(length(min = 1, message = "name must not be blank"))]
    pub name: Option<String>,
    pub category: Option<String>,
    #[validate(custom = "crate::services::validate_non_negative")]
    pub dealer_price: Option<Decimal>,
    #[validate(custom = "crate::services::validate_non_negative")]
    pub customer_price: Option<Decimal>,
    #[validate(range(min = 0))]
    pub quantity: Option<i32>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SparePartResponse {
    pub id: i64,
    pub name: String,
    pub category: Option<String>,
    pub dealer_price: Decimal,
    pub customer_price: Decimal,
    pub quantity: i32,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct SparePartService {
    db: Arc<DbPool>,
}

impl SparePartService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create(
        &self,
        request: CreateSparePartRequest,
    ) -> Result<SparePartResponse, ServiceError> {
        request.validate()?;

        let model = spare_part::ActiveModel {
            name: Set(request.name),
            category: Set(request.category),
            dealer_price: Set(request.dealer_price),
            customer_price: Set(request.customer_price),
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
        request: UpdateSparePartRequest,
    ) -> Result<SparePartResponse, ServiceError> {
        request.validate()?;

        let existing = spare_part::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Spare Part not found: {}", id)))?;

        let mut active: spare_part::ActiveModel = existing.into();
        if let Some(name) = request.name {
            active.name = Set(name);
        }
        if let Some(category) = request.category {
            active.category = Set(Some(category));
        }
        if let Some(dealer_price) = request.dealer_price {
            active.dealer_price = Set(dealer_price);
        }
        if let Some(customer_price) = request.customer_price {
            active.customer_price = Set(customer_price);
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
        let result = spare_part::Entity::delete_by_id(id).exec(&*self.db).await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!(
                "Spare Part not found: {}",
                id
            )));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<SparePartResponse, ServiceError> {
        let model = spare_part::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Spare Part not found: {}", id)))?;
        Ok(model_to_response(model))
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<SparePartResponse>, ServiceError> {
        let models = spare_part::Entity::find()
            .order_by_asc(spare_part::Column::Id)
            .all(&*self.db)
            .await?;
        Ok(models.into_iter().map(model_to_response).collect())
    }
}

fn model_to_response(model: spare_part::Model) -> SparePartResponse {
    SparePartResponse {
        id: model.id,
        name: model.name,
        category: model.category,
        dealer_price: model.dealer_price,
        customer_price: model.customer_price,
        quantity: model.quantity,
        image_url: model.image_url,
        created_at: model.created_at,
    }
}
