use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::{
    db::OrmConn,
    entity::confirm_email_tokens::{ActiveModel as TokenActive, Column as TokenCol, Entity as Tokens, Model as TokenModel},
    error::{AppError, AppResult},
};

/// Issue a confirm token for a user. The key is left unset and assigned
/// by the entity's before_save hook on insert.
pub async fn issue(orm: &OrmConn, user_id: Uuid) -> AppResult<TokenModel> {
    let token = TokenActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        created_at: NotSet,
        key: NotSet,
    }
    .insert(orm)
    .await?;

    tracing::info!(user_id = %user_id, token_id = %token.id, "confirm token issued");
    Ok(token)
}

/// Look a token up by its opaque key.
pub async fn find_by_key(orm: &OrmConn, key: &str) -> AppResult<TokenModel> {
    Tokens::find()
        .filter(TokenCol::Key.eq(key))
        .one(orm)
        .await?
        .ok_or(AppError::NotFound)
}

/// Delete a user's tokens, e.g. after a successful confirmation.
pub async fn revoke_for_user(orm: &OrmConn, user_id: Uuid) -> AppResult<u64> {
    let res = Tokens::delete_many()
        .filter(TokenCol::UserId.eq(user_id))
        .exec(orm)
        .await?;
    Ok(res.rows_affected)
}
