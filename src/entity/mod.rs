pub mod categories;
pub mod category_shops;
pub mod confirm_email_tokens;
pub mod contacts;
pub mod delivery_methods;
pub mod order_items;
pub mod orders;
pub mod parameters;
pub mod product_infos;
pub mod product_parameters;
pub mod products;
pub mod shops;
pub mod subcategories;
pub mod units;
pub mod users;

pub use categories::Entity as Categories;
pub use category_shops::Entity as CategoryShops;
pub use confirm_email_tokens::Entity as ConfirmEmailTokens;
pub use contacts::Entity as Contacts;
pub use delivery_methods::Entity as DeliveryMethods;
pub use order_items::Entity as OrderItems;
pub use orders::Entity as Orders;
pub use parameters::Entity as Parameters;
pub use product_infos::Entity as ProductInfos;
pub use product_parameters::Entity as ProductParameters;
pub use products::Entity as Products;
pub use shops::Entity as Shops;
pub use subcategories::Entity as Subcategories;
pub use units::Entity as Units;
pub use users::Entity as Users;
