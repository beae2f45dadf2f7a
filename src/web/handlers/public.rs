use actix_web::{HttpResponse, Responder, get, web};
use askama::Template;
use chrono::Local;

use menupress::db;
use menupress::services::menu;

use crate::web::helpers::{render, render_not_found, see_other};
use crate::web::state::AppState;
use crate::web::templates::{LandingTemplate, MenuMissingTemplate, PublicMenuTemplate};

#[get("/")]
pub async fn landing() -> impl Responder {
    render(LandingTemplate)
}

/// Carries the original's one-business-per-deployment behavior as
/// configuration.
#[get("/carta")]
pub async fn menu_default(state: web::Data<AppState>) -> impl Responder {
    match &state.default_slug {
        Some(slug) => see_other(&format!("/carta/{slug}")),
        None => render_not_found(),
    }
}

#[get("/carta/{slug}")]
pub async fn menu_page(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let slug = path.into_inner();

    let business = match db::find_business_by_slug(&state.pool, &slug).await {
        Ok(Some(business)) => business,
        // Unknown slug is terminal for the page; products are never
        // fetched.
        Ok(None) => {
            return match (MenuMissingTemplate {}).render() {
                Ok(body) => HttpResponse::NotFound()
                    .content_type("text/html; charset=utf-8")
                    .body(body),
                Err(e) => HttpResponse::InternalServerError()
                    .content_type("text/plain; charset=utf-8")
                    .body(format!("Template error: {e}")),
            };
        }
        Err(e) => {
            log::error!("failed to load business '{slug}': {e}");
            return HttpResponse::InternalServerError()
                .content_type("text/plain; charset=utf-8")
                .body("Error cargando la carta digital.");
        }
    };

    let products = match db::list_menu_products_for_business(&state.pool, business.id).await {
        Ok(products) => products,
        Err(e) => {
            // The header still renders; the menu body falls back to its
            // empty message.
            log::error!("failed to load menu products for '{slug}': {e}");
            Vec::new()
        }
    };

    let view = menu::build_menu(&business, &products, Local::now().time());

    render(PublicMenuTemplate { view })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(landing)
        .service(menu_default)
        .service(menu_page);
}
