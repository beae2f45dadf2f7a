pub mod admin_categories;
pub mod admin_products;
pub mod auth;
pub mod public;

use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    public::configure(cfg);
    auth::configure(cfg);
    admin_products::configure(cfg);
    admin_categories::configure(cfg);
}
