use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use marketplace_schema::{
    config::AppConfig,
    db::{DbPool, OrmConn, create_orm_conn, create_pool},
    entity::{
        categories, category_shops, delivery_methods, product_infos, products, shops,
        subcategories, units,
        users::UserRole,
    },
    services::user_service::{self, NewUser},
    state::AppState,
};

// The carriers the platform ships with; more can be added as rows.
const DELIVERY_METHODS: [&str; 4] = ["Russian Post", "KIT", "CDEK", "Delovye Linii"];
const UNITS: [&str; 3] = ["pcs", "kg", "l"];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,marketplace_schema=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;
    let orm = create_orm_conn(&config.database_url).await?;
    let state = AppState { pool, orm };

    seed_lookups(&state.orm).await?;
    let admin_id = ensure_superuser(&state.pool, "admin@example.com", "admin123").await?;
    let seller_id = ensure_user(&state.pool, "shop@example.com", "shop123", UserRole::Shop).await?;
    let buyer_id = ensure_user(&state.pool, "buyer@example.com", "buyer123", UserRole::Buyer).await?;
    seed_catalog(&state.orm, seller_id).await?;

    println!("Seed completed. Admin: {admin_id}, seller: {seller_id}, buyer: {buyer_id}");
    Ok(())
}

async fn seed_lookups(orm: &OrmConn) -> anyhow::Result<()> {
    for name in DELIVERY_METHODS {
        let exists = delivery_methods::Entity::find()
            .filter(delivery_methods::Column::Name.eq(name))
            .one(orm)
            .await?;
        if exists.is_none() {
            delivery_methods::ActiveModel {
                id: Set(Uuid::new_v4()),
                name: Set(name.to_string()),
            }
            .insert(orm)
            .await?;
        }
    }

    for name in UNITS {
        let exists = units::Entity::find()
            .filter(units::Column::Name.eq(name))
            .one(orm)
            .await?;
        if exists.is_none() {
            units::ActiveModel {
                id: Set(Uuid::new_v4()),
                name: Set(name.to_string()),
            }
            .insert(orm)
            .await?;
        }
    }

    println!("Seeded delivery methods and units");
    Ok(())
}

async fn ensure_superuser(pool: &DbPool, email: &str, password: &str) -> anyhow::Result<Uuid> {
    if let Some((id,)) = find_user(pool, email).await? {
        return Ok(id);
    }
    let user = user_service::create_superuser(
        pool,
        NewUser {
            email: email.to_string(),
            password: password.to_string(),
            username: "admin".to_string(),
            ..Default::default()
        },
    )
    .await?;
    println!("Ensured superuser {email}");
    Ok(user.id)
}

async fn ensure_user(
    pool: &DbPool,
    email: &str,
    password: &str,
    role: UserRole,
) -> anyhow::Result<Uuid> {
    if let Some((id,)) = find_user(pool, email).await? {
        return Ok(id);
    }
    let username = email.split('@').next().unwrap_or(email).to_string();
    let user = user_service::create_user(
        pool,
        NewUser {
            email: email.to_string(),
            password: password.to_string(),
            username,
            role: Some(role.clone()),
            ..Default::default()
        },
    )
    .await?;
    println!("Ensured user {email} (role={role})");
    Ok(user.id)
}

async fn find_user(pool: &DbPool, email: &str) -> anyhow::Result<Option<(Uuid,)>> {
    let row: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

async fn seed_catalog(orm: &OrmConn, seller_id: Uuid) -> anyhow::Result<()> {
    let existing = shops::Entity::find()
        .filter(shops::Column::UserId.eq(seller_id))
        .one(orm)
        .await?;
    if existing.is_some() {
        println!("Catalog already seeded");
        return Ok(());
    }

    let shop = shops::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set("Demo Electronics".to_string()),
        url: Set(Some("https://demo-electronics.example".to_string())),
        accepts_orders: Set(true),
        user_id: Set(Some(seller_id)),
    }
    .insert(orm)
    .await?;

    let category = categories::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set("Smartphones".to_string()),
    }
    .insert(orm)
    .await?;

    category_shops::ActiveModel {
        id: Set(Uuid::new_v4()),
        category_id: Set(category.id),
        shop_id: Set(shop.id),
    }
    .insert(orm)
    .await?;

    let subcategory = subcategories::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set("Android".to_string()),
        category_id: Set(category.id),
    }
    .insert(orm)
    .await?;

    let product = products::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set("Granite A1".to_string()),
        category_id: Set(category.id),
        subcategory_id: Set(subcategory.id),
    }
    .insert(orm)
    .await?;

    let unit = units::Entity::find()
        .filter(units::Column::Name.eq("pcs"))
        .one(orm)
        .await?
        .ok_or_else(|| anyhow::anyhow!("units not seeded"))?;

    product_infos::ActiveModel {
        id: Set(Uuid::new_v4()),
        product_id: Set(product.id),
        shop_id: Set(shop.id),
        name: Set("Granite A1 128GB".to_string()),
        quantity: Set(25),
        unit_id: Set(unit.id),
        weight_grams: Set(190),
        price: Set(2_499_000),
        price_rrc: Set(2_799_000),
    }
    .insert(orm)
    .await?;

    println!("Seeded demo shop and catalog");
    Ok(())
}
