use std::fmt;

use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, ConnectionTrait, DbErr};

use crate::token;

/// Single-use opaque key bound to a user; activates the account or
/// resets credentials. The key is assigned on first save and never
/// regenerated afterwards.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "confirm_email_tokens")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    #[sea_orm(unique, indexed)]
    pub key: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    // Assign the key on insert when the caller left it out. Updates keep
    // whatever key the row already carries.
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if insert && !has_key(&self.key) {
            self.key = ActiveValue::Set(token::new_confirm_key());
        }
        Ok(self)
    }
}

fn has_key(key: &ActiveValue<String>) -> bool {
    match key {
        ActiveValue::NotSet => false,
        ActiveValue::Set(k) | ActiveValue::Unchanged(k) => !k.is_empty(),
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "confirm token for user {}", self.user_id)
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::ActiveValue;

    use super::has_key;

    #[test]
    fn unset_and_empty_keys_are_missing() {
        assert!(!has_key(&ActiveValue::NotSet));
        assert!(!has_key(&ActiveValue::Set(String::new())));
    }

    #[test]
    fn present_key_is_kept() {
        assert!(has_key(&ActiveValue::Set("abc".to_string())));
        assert!(has_key(&ActiveValue::Unchanged("abc".to_string())));
    }
}
