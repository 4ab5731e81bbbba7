use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// sqlx-facing mirrors of the sea-orm entities, used by the service
// functions that go through the pool. The `state`/`role` columns come
// back as plain strings here; the closed enums live on the entity side.

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub company: Option<String>,
    pub position: Option<String>,
    pub social_id: Option<String>,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Shop {
    pub id: Uuid,
    pub name: String,
    pub url: Option<String>,
    pub accepts_orders: bool,
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub category_id: Uuid,
    pub subcategory_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct ProductInfo {
    pub id: Uuid,
    pub product_id: Uuid,
    pub shop_id: Uuid,
    pub name: String,
    pub quantity: i32,
    pub unit_id: Uuid,
    pub weight_grams: i32,
    pub price: i64,
    pub price_rrc: i64,
}

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Contact {
    pub id: Uuid,
    pub user_id: Uuid,
    pub city: String,
    pub street: String,
    pub house: String,
    pub structure: String,
    pub building: String,
    pub apartment: String,
    pub phone: String,
}

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub state: String,
    pub contact_id: Option<Uuid>,
    pub delivery_method_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_info_id: Option<Uuid>,
    pub shop_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct ConfirmEmailToken {
    pub id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub key: String,
}
