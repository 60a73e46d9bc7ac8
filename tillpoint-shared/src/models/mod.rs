pub mod inventory;
pub mod item;
pub mod literal;
pub mod schema;
pub mod selection;
