//! Sale recording and history.
//!
//! Creating a sale validates and deducts stock line by line inside one
//! transaction, snapshots the prices quoted in the request, and persists the
//! sale header with its items. The history query applies exactly one filter,
//! in precedence order: product type, payment status, date range, none.

use chrono::{DateTime, Duration as ChronoDuration, NaiveDate, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::db::DbPool;
use crate::entities::sale::{self, PaymentStatus, PaymentType};
use crate::entities::sale_item::{self, ProductType};
use crate::entities::{inverter_battery, spare_part};
use crate::errors::ServiceError;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SaleItemRequest {
    pub product_type: ProductType,
    pub product_id: i64,
    #[validate(range(min = 1))]
    pub quantity: i32,
    #[validate(custom = "crate::services::validate_non_negative")]
    pub dealer_price: Decimal,
    #[validate(custom = "crate::services::validate_non_negative")]
    pub customer_price: Decimal,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSaleRequest {
    #[validate(length(min = 1, message = "a sale needs at least one item"))]
    pub items: Vec<SaleItemRequest>,
    pub payment_type: PaymentType,
    pub payment_status: PaymentStatus,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_address: Option<String>,
}

/// Optional filters for the sale history endpoint. Dates are calendar days;
/// both bounds must be present for the range to apply.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub product_type: Option<ProductType>,
    pub payment_status: Option<PaymentStatus>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleItemView {
    pub product_type: ProductType,
    pub product_id: i64,
    pub quantity: i32,
    pub dealer_price: Decimal,
    pub customer_price: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleResponse {
    pub id: i64,
    pub sale_date: DateTime<Utc>,
    pub total_amount: Decimal,
    pub payment_type: PaymentType,
    pub payment_status: PaymentStatus,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_address: Option<String>,
    pub items: Vec<SaleItemView>,
}

#[derive(Debug, Clone)]
pub struct SaleService {
    db: Arc<DbPool>,
}

impl SaleService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// Records a sale: per line, in request order, the referenced inventory
    /// item is looked up and its stock deducted, then the sale header and item
    /// snapshots are inserted. Everything happens in one transaction; the
    /// first failing line aborts the whole call with no inventory mutation
    /// retained.
    #[instrument(skip(self, request), fields(lines = request.items.len()))]
    pub async fn create_sale(
        &self,
        request: CreateSaleRequest,
    ) -> Result<SaleResponse, ServiceError> {
        request.validate()?;
        for line in &request.items {
            line.validate()?;
        }

        let txn = self.db.begin().await.map_err(ServiceError::DatabaseError)?;

        let mut total_amount = Decimal::ZERO;
        for line in &request.items {
            match line.product_type {
                ProductType::SparePart => deduct_spare_part(&txn, line).await?,
                ProductType::Battery => deduct_battery(&txn, line).await?,
            }
            // Snapshot prices come from the request, not the inventory record
            total_amount += line.customer_price * Decimal::from(line.quantity);
        }

        let sale = sale::ActiveModel {
            sale_date: Set(Utc::now()),
            total_amount: Set(total_amount),
            payment_type: Set(request.payment_type.to_string()),
            payment_status: Set(request.payment_status.to_string()),
            customer_name: Set(request.customer_name.clone()),
            customer_phone: Set(request.customer_phone.clone()),
            customer_address: Set(request.customer_address.clone()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let mut items = Vec::with_capacity(request.items.len());
        for line in &request.items {
            let item = sale_item::ActiveModel {
                sale_id: Set(sale.id),
                product_type: Set(line.product_type.to_string()),
                product_id: Set(line.product_id),
                quantity: Set(line.quantity),
                dealer_price: Set(line.dealer_price),
                customer_price: Set(line.customer_price),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
            items.push(item);
        }

        txn.commit().await.map_err(ServiceError::DatabaseError)?;

        sale_to_response(sale, items, None)
    }

    /// Sale history, newest first. Filter precedence: product type, else
    /// payment status, else date range (both bounds required), else all.
    /// With a product-type filter each sale's items and total are restricted
    /// to matching lines; a sale with no matching line still appears with a
    /// zero total and an empty item list.
    #[instrument(skip(self))]
    pub async fn get_sales(&self, query: SalesQuery) -> Result<Vec<SaleResponse>, ServiceError> {
        let bounds = match (query.start_date, query.end_date) {
            (Some(start), Some(end)) => Some(day_bounds(start, end)),
            _ => None,
        };

        let mut select = sale::Entity::find().order_by_desc(sale::Column::SaleDate);

        if query.product_type.is_some() {
            if let Some((lo, hi)) = bounds {
                select = select.filter(sale::Column::SaleDate.between(lo, hi));
            }
        } else if let Some(status) = query.payment_status {
            select = select.filter(sale::Column::PaymentStatus.eq(status.to_string()));
            if let Some((lo, hi)) = bounds {
                select = select.filter(sale::Column::SaleDate.between(lo, hi));
            }
        } else if let Some((lo, hi)) = bounds {
            select = select.filter(sale::Column::SaleDate.between(lo, hi));
        }

        let sales = select
            .find_with_related(sale_item::Entity)
            .all(&*self.db)
            .await?;

        sales
            .into_iter()
            .map(|(sale, items)| sale_to_response(sale, items, query.product_type))
            .collect()
    }
}

async fn deduct_spare_part<C>(conn: &C, line: &SaleItemRequest) -> Result<(), ServiceError>
where
    C: ConnectionTrait,
{
    // Row lock: concurrent sales must not both pass the stock check
    let part = spare_part::Entity::find_by_id(line.product_id)
        .lock_exclusive()
        .one(conn)
        .await?
        .ok_or_else(|| {
            ServiceError::NotFound(format!("Spare Part not found: {}", line.product_id))
        })?;

    if part.quantity < line.quantity {
        return Err(ServiceError::InsufficientStock(format!(
            "Insufficient stock for Spare Part: {}",
            part.name
        )));
    }

    let remaining = part.quantity - line.quantity;
    let mut active: spare_part::ActiveModel = part.into();
    active.quantity = Set(remaining);
    active.update(conn).await?;
    Ok(())
}

async fn deduct_battery<C>(conn: &C, line: &SaleItemRequest) -> Result<(), ServiceError>
where
    C: ConnectionTrait,
{
    // Row lock: concurrent sales must not both pass the stock check
    let battery = inverter_battery::Entity::find_by_id(line.product_id)
        .lock_exclusive()
        .one(conn)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Battery not found: {}", line.product_id)))?;

    if battery.quantity < line.quantity {
        return Err(ServiceError::InsufficientStock(format!(
            "Insufficient stock for Battery: {}",
            battery.name
        )));
    }

    let remaining = battery.quantity - line.quantity;
    let mut active: inverter_battery::ActiveModel = battery.into();
    active.quantity = Set(remaining);
    active.update(conn).await?;
    Ok(())
}

/// Inclusive bounds spanning full calendar days: start at 00:00:00.000,
/// end at 23:59:59.999.
fn day_bounds(start: NaiveDate, end: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let lo = start.and_time(NaiveTime::MIN);
    let hi = end.and_time(NaiveTime::MIN) + ChronoDuration::milliseconds(86_400_000 - 1);
    (Utc.from_utc_datetime(&lo), Utc.from_utc_datetime(&hi))
}

/// Maps a persisted sale to its response view. When `filter` is set, only
/// matching items are returned and the total is recomputed over them.
fn sale_to_response(
    sale: sale::Model,
    items: Vec<sale_item::Model>,
    filter: Option<ProductType>,
) -> Result<SaleResponse, ServiceError> {
    let payment_type: PaymentType = sale.payment_type.parse().map_err(|_| {
        ServiceError::InternalError(format!("unknown payment type on sale {}", sale.id))
    })?;
    let payment_status: PaymentStatus = sale.payment_status.parse().map_err(|_| {
        ServiceError::InternalError(format!("unknown payment status on sale {}", sale.id))
    })?;

    let mut views = Vec::with_capacity(items.len());
    let mut total_amount = Decimal::ZERO;
    for item in items {
        let product_type: ProductType = item.product_type.parse().map_err(|_| {
            ServiceError::InternalError(format!("unknown product type on sale item {}", item.id))
        })?;
        if let Some(filter) = filter {
            if product_type != filter {
                continue;
            }
        }
        total_amount += item.customer_price * Decimal::from(item.quantity);
        views.push(SaleItemView {
            product_type,
            product_id: item.product_id,
            quantity: item.quantity,
            dealer_price: item.dealer_price,
            customer_price: item.customer_price,
        });
    }

    Ok(SaleResponse {
        id: sale.id,
        sale_date: sale.sale_date,
        total_amount,
        payment_type,
        payment_status,
        customer_name: sale.customer_name,
        customer_phone: sale.customer_phone,
        customer_address: sale.customer_address,
        items: views,
    })
}
