pub mod item;
pub mod user;

pub use item::{Item, ItemChanges, NewItem};
pub use user::User;
