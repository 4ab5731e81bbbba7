use std::fmt;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order lifecycle states. `Basket` is the unsubmitted cart. The schema
/// pins the value set only; transition rules belong to calling logic.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(15))")]
#[serde(rename_all = "lowercase")]
pub enum OrderState {
    #[sea_orm(string_value = "basket")]
    Basket,
    #[sea_orm(string_value = "new")]
    New,
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
    #[sea_orm(string_value = "assembled")]
    Assembled,
    #[sea_orm(string_value = "sent")]
    Sent,
    #[sea_orm(string_value = "delivered")]
    Delivered,
    #[sea_orm(string_value = "canceled")]
    Canceled,
}

impl OrderState {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderState::Basket => "basket",
            OrderState::New => "new",
            OrderState::Confirmed => "confirmed",
            OrderState::Assembled => "assembled",
            OrderState::Sent => "sent",
            OrderState::Delivered => "delivered",
            OrderState::Canceled => "canceled",
        }
    }
}

impl fmt::Display for OrderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub state: OrderState,
    pub contact_id: Option<Uuid>,
    pub delivery_method_id: Option<Uuid>,
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
    #[sea_orm(
        belongs_to = "super::contacts::Entity",
        from = "Column::ContactId",
        to = "super::contacts::Column::Id",
        on_delete = "Cascade"
    )]
    Contacts,
    #[sea_orm(
        belongs_to = "super::delivery_methods::Entity",
        from = "Column::DeliveryMethodId",
        to = "super::delivery_methods::Column::Id",
        on_delete = "SetNull"
    )]
    DeliveryMethods,
    #[sea_orm(has_many = "super::order_items::Entity")]
    OrderItems,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::contacts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contacts.def()
    }
}

impl Related<super::delivery_methods::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DeliveryMethods.def()
    }
}

impl Related<super::order_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use sea_orm::ActiveEnum;

    use super::OrderState;

    #[test]
    fn state_round_trips_through_stored_value() {
        let all = [
            OrderState::Basket,
            OrderState::New,
            OrderState::Confirmed,
            OrderState::Assembled,
            OrderState::Sent,
            OrderState::Delivered,
            OrderState::Canceled,
        ];
        for state in all {
            let value = state.to_value();
            assert_eq!(value, state.as_str());
            assert_eq!(OrderState::try_from_value(&value).unwrap(), state);
        }
    }

    #[test]
    fn unknown_state_is_rejected() {
        assert!(OrderState::try_from_value(&"paid".to_string()).is_err());
        assert!(OrderState::try_from_value(&"".to_string()).is_err());
    }

    #[test]
    fn basket_renders_lowercase() {
        assert_eq!(OrderState::Basket.to_string(), "basket");
    }
}
