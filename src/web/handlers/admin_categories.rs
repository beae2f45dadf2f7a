use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use askama::Template;
use sqlx::PgPool;
use uuid::Uuid;

use menupress::db;

use crate::web::forms::{CategoriesQuery, CategoryCreateForm, CategoryToggleForm, checkbox_is_on};
use crate::web::handlers::admin_products::require_business;
use crate::web::helpers::{load_user, render, require_user, see_other};
use crate::web::state::AppState;
use crate::web::templates::{AdminCategoriesTemplate, CategoriesTableTemplate};

#[get("/admin/categories")]
pub async fn categories_page(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<CategoriesQuery>,
) -> impl Responder {
    let uid = match require_user(&req) {
        Ok(uid) => uid,
        Err(resp) => return resp,
    };
    let user = match load_user(&state.pool, uid).await {
        Ok(user) => user,
        Err(resp) => return resp,
    };

    let business = match db::find_business_by_owner(&state.pool, uid).await {
        Ok(business) => business,
        Err(e) => {
            log::error!("failed to load business for user {uid}: {e}");
            let table = CategoriesTableTemplate {
                categories: Vec::new(),
                error: Some("Error cargando datos del negocio".to_string()),
            };
            return render(AdminCategoriesTemplate {
                user_email: user.email,
                has_business: true,
                error: None,
                table_html: table.render().unwrap_or_default(),
            });
        }
    };

    let Some(business) = business else {
        return render(AdminCategoriesTemplate {
            user_email: user.email,
            has_business: false,
            error: None,
            table_html: String::new(),
        });
    };

    let table_html = categories_table_html(&state.pool, business.id, None).await;

    render(AdminCategoriesTemplate {
        user_email: user.email,
        has_business: true,
        error: query.error.clone(),
        table_html,
    })
}

#[post("/admin/categories")]
pub async fn category_create(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<CategoryCreateForm>,
) -> impl Responder {
    let uid = match require_user(&req) {
        Ok(uid) => uid,
        Err(resp) => return resp,
    };
    let business = match require_business(&state, uid).await {
        Ok(business) => business,
        Err(resp) => return resp,
    };

    let name = form.name.trim();
    if name.is_empty() {
        return see_other(&format!(
            "/admin/categories?error={}",
            urlencoding::encode("El nombre de la categoría es obligatorio.")
        ));
    }

    match db::create_category(&state.pool, business.id, name).await {
        // A fresh page render clears the input.
        Ok(_) => see_other("/admin/categories"),
        Err(e) => {
            log::error!("failed to create category: {e}");
            see_other(&format!(
                "/admin/categories?error={}",
                urlencoding::encode(&format!("Error al crear la categoría: {e}"))
            ))
        }
    }
}

#[post("/admin/categories/{id}/visible")]
pub async fn category_toggle_visible(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i64>,
    form: web::Form<CategoryToggleForm>,
) -> impl Responder {
    let uid = match require_user(&req) {
        Ok(uid) => uid,
        Err(resp) => return resp,
    };
    let business = match require_business(&state, uid).await {
        Ok(business) => business,
        Err(resp) => return resp,
    };
    let id = path.into_inner();
    let visible = checkbox_is_on(form.visible.as_deref());

    let error = match db::set_category_visible(&state.pool, id, business.id, visible).await {
        Ok(true) => None,
        Ok(false) => Some("Categoría no encontrada".to_string()),
        Err(e) => {
            log::error!("failed to toggle category {id}: {e}");
            Some(format!("Error al cambiar visibilidad: {e}"))
        }
    };

    // Same reconciliation policy as the product toggle: always rebuild
    // the table from storage.
    let html = categories_table_html(&state.pool, business.id, error).await;

    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}

async fn categories_table_html(
    pool: &PgPool,
    business_id: Uuid,
    error: Option<String>,
) -> String {
    let template = match db::list_categories_for_business(pool, business_id).await {
        Ok(categories) => CategoriesTableTemplate { categories, error },
        Err(e) => {
            log::error!("failed to load categories for business {business_id}: {e}");
            CategoriesTableTemplate {
                categories: Vec::new(),
                error: Some("Error al cargar categorías".to_string()),
            }
        }
    };

    template.render().unwrap_or_else(|e| {
        log::error!("failed to render categories table: {e}");
        String::new()
    })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(categories_page)
        .service(category_create)
        .service(category_toggle_visible);
}
