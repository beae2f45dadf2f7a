pub mod auth;
pub mod images;
pub mod menu;

pub use auth::PasswordManager;
pub use images::ImageStore;
