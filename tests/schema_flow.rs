use chrono::Utc;
use marketplace_schema::{
    db::{create_orm_conn, create_pool},
    entity::{
        confirm_email_tokens, contacts, order_items, orders,
        orders::OrderState,
        shops,
        users::{self, UserRole},
    },
    error::AppError,
    services::{token_service, user_service::{self, NewUser}},
    state::AppState,
    token::CONFIRM_KEY_LEN,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, Set};
use uuid::Uuid;

// Integration flow: register users, issue confirm tokens, build a basket
// order with a contact, then delete the user and watch the cascades.
#[tokio::test]
async fn registration_tokens_and_cascade_flow() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(());
        }
    };

    let state = setup_state(&database_url).await?;
    let tag = Uuid::new_v4().simple().to_string();

    // Empty email is rejected before anything touches the table.
    let err = user_service::create_user(
        &state.pool,
        NewUser {
            email: "   ".to_string(),
            password: "pw".to_string(),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    // Regular user: inactive by default, domain lowercased, flags off.
    let buyer = user_service::create_user(
        &state.pool,
        NewUser {
            email: format!("buyer-{tag}@Example.COM"),
            password: "buyer-pw".to_string(),
            username: format!("buyer_{tag}"),
            role: Some(UserRole::Buyer),
            ..Default::default()
        },
    )
    .await?;
    assert_eq!(buyer.email, format!("buyer-{tag}@example.com"));
    assert!(!buyer.is_active);
    assert!(!buyer.is_staff);
    assert!(!buyer.is_superuser);
    assert_eq!(buyer.role, "buyer");

    // Duplicate email is refused.
    let dup = user_service::create_user(
        &state.pool,
        NewUser {
            email: format!("buyer-{tag}@example.com"),
            password: "other".to_string(),
            ..Default::default()
        },
    )
    .await;
    assert!(dup.is_err());

    // Superuser: both flags forced on.
    let admin = user_service::create_superuser(
        &state.pool,
        NewUser {
            email: format!("admin-{tag}@example.com"),
            password: "admin-pw".to_string(),
            username: format!("admin_{tag}"),
            ..Default::default()
        },
    )
    .await?;
    assert!(admin.is_staff);
    assert!(admin.is_superuser);

    // Token issuance: key arrives from the before_save hook.
    let token = token_service::issue(&state.orm, buyer.id).await?;
    assert_eq!(token.key.len(), CONFIRM_KEY_LEN);

    let second = token_service::issue(&state.orm, buyer.id).await?;
    assert_ne!(token.key, second.key);

    // A later save leaves the key alone.
    let original_key = token.key.clone();
    let mut active = token.clone().into_active_model();
    active.created_at = Set(Utc::now().into());
    active.update(&state.orm).await?;
    let reloaded = confirm_email_tokens::Entity::find_by_id(token.id)
        .one(&state.orm)
        .await?
        .expect("token still present");
    assert_eq!(reloaded.key, original_key);

    let found = token_service::find_by_key(&state.orm, &original_key).await?;
    assert_eq!(found.id, token.id);

    // Basket order with contact, shop and a line item.
    let shop = shops::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(format!("Shop {tag}")),
        url: Set(None),
        accepts_orders: Set(true),
        user_id: Set(Some(buyer.id)),
    }
    .insert(&state.orm)
    .await?;

    let contact = contacts::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(buyer.id),
        city: Set("Springfield".to_string()),
        street: Set("Main St".to_string()),
        house: Set("7".to_string()),
        structure: Set(String::new()),
        building: Set(String::new()),
        apartment: Set("12".to_string()),
        phone: Set("+1-555-0100".to_string()),
    }
    .insert(&state.orm)
    .await?;
    assert_eq!(contact.to_string(), "Springfield Main St 7");

    let order = orders::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(buyer.id),
        created_at: NotSet,
        state: Set(OrderState::Basket),
        contact_id: Set(Some(contact.id)),
        delivery_method_id: Set(None),
    }
    .insert(&state.orm)
    .await?;
    assert_eq!(order.state, OrderState::Basket);

    order_items::ActiveModel {
        id: Set(Uuid::new_v4()),
        order_id: Set(order.id),
        product_info_id: Set(None),
        shop_id: Set(shop.id),
        quantity: Set(2),
    }
    .insert(&state.orm)
    .await?;

    // The sqlx mirror sees the same row with the state as a plain string.
    let mirrored: marketplace_schema::models::Order =
        sqlx::query_as("SELECT * FROM orders WHERE id = $1")
            .bind(order.id)
            .fetch_one(&state.pool)
            .await?;
    assert_eq!(mirrored.state, "basket");
    assert_eq!(mirrored.contact_id, Some(contact.id));

    // The CHECK constraint refuses states outside the enumeration.
    let bad_state = sqlx::query("INSERT INTO orders (user_id, state) VALUES ($1, $2)")
        .bind(buyer.id)
        .bind("paid")
        .execute(&state.pool)
        .await;
    assert!(bad_state.is_err());

    // Deleting the user takes shop, contact, order, items and tokens with it.
    users::Entity::delete_by_id(buyer.id).exec(&state.orm).await?;

    assert_eq!(
        shops::Entity::find()
            .filter(shops::Column::UserId.eq(buyer.id))
            .count(&state.orm)
            .await?,
        0
    );
    assert_eq!(
        contacts::Entity::find()
            .filter(contacts::Column::UserId.eq(buyer.id))
            .count(&state.orm)
            .await?,
        0
    );
    assert_eq!(
        orders::Entity::find()
            .filter(orders::Column::UserId.eq(buyer.id))
            .count(&state.orm)
            .await?,
        0
    );
    assert_eq!(
        order_items::Entity::find()
            .filter(order_items::Column::OrderId.eq(order.id))
            .count(&state.orm)
            .await?,
        0
    );
    assert_eq!(
        confirm_email_tokens::Entity::find()
            .filter(confirm_email_tokens::Column::UserId.eq(buyer.id))
            .count(&state.orm)
            .await?,
        0
    );

    users::Entity::delete_by_id(admin.id).exec(&state.orm).await?;
    Ok(())
}

async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let pool = create_pool(database_url).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    let orm = create_orm_conn(database_url).await?;
    Ok(AppState { pool, orm })
}
