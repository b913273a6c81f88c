// Stores layer - Data access and repository pattern
pub mod category_store;
pub mod item_store;

pub use category_store::{CategoryFields, CategoryOption, CategoryStore};
pub use item_store::{ItemFields, ItemStore};
