pub use businesses::*;
pub use categories::*;
pub use db::*;
pub use products::*;
pub use users::*;

mod businesses;
mod categories;
mod db;
mod products;
mod users;
