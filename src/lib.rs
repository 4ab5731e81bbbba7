//! Persistent data schema for an online ordering/marketplace application:
//! buyers and shops, catalogs, shop-specific listings, cart/order
//! lifecycle, delivery contacts and email-confirmation tokens.
//!
//! The crate carries the sea-orm entities, their sqlx mirrors, the SQL
//! migrations, and the thin services around them (user creation, token
//! issuance). Request handling and business rules live elsewhere.

pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod token;
