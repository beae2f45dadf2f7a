use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use askama::Template;
use sqlx::PgPool;
use uuid::Uuid;

use menupress::db;
use menupress::log_err;
use menupress::models::Business;
use menupress::services::ImageStore;

use crate::web::forms::{ProductFormData, ProductToggleForm, checkbox_is_on};
use crate::web::helpers::{load_user, render, render_not_found, require_user, see_other};
use crate::web::state::AppState;
use crate::web::templates::{
    AdminProductsTemplate, ProductFormTemplate, ProductRow, ProductsTableTemplate,
    category_options,
};

#[get("/admin")]
pub async fn products_page(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
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
            let table = ProductsTableTemplate {
                rows: Vec::new(),
                error: Some("Error cargando datos del negocio".to_string()),
            };
            return render(AdminProductsTemplate {
                user_email: user.email,
                has_business: true,
                table_html: table.render().unwrap_or_default(),
            });
        }
    };

    // No business is a terminal empty state: no table, no create button.
    let Some(business) = business else {
        return render(AdminProductsTemplate {
            user_email: user.email,
            has_business: false,
            table_html: String::new(),
        });
    };

    let table_html = products_table_html(&state.pool, business.id, None).await;

    render(AdminProductsTemplate {
        user_email: user.email,
        has_business: true,
        table_html,
    })
}

#[get("/admin/products/new")]
pub async fn product_new(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let uid = match require_user(&req) {
        Ok(uid) => uid,
        Err(resp) => return resp,
    };
    let user = match load_user(&state.pool, uid).await {
        Ok(user) => user,
        Err(resp) => return resp,
    };
    let business = match require_business(&state, uid).await {
        Ok(business) => business,
        Err(resp) => return resp,
    };

    let categories = db::list_visible_categories_for_business(&state.pool, business.id)
        .await
        .unwrap_or_default();

    render(ProductFormTemplate {
        user_email: user.email,
        heading: "Nuevo producto".to_string(),
        action: "/admin/products".to_string(),
        is_new: true,
        error: None,
        name: String::new(),
        description: String::new(),
        price: String::new(),
        has_discount: false,
        discount_price: String::new(),
        best_seller: false,
        image_url: None,
        categories: category_options(&categories, None),
    })
}

#[post("/admin/products")]
pub async fn product_create(
    state: web::Data<AppState>,
    req: HttpRequest,
    mut payload: Multipart,
) -> impl Responder {
    let uid = match require_user(&req) {
        Ok(uid) => uid,
        Err(resp) => return resp,
    };
    let user = match load_user(&state.pool, uid).await {
        Ok(user) => user,
        Err(resp) => return resp,
    };
    let business = match require_business(&state, uid).await {
        Ok(business) => business,
        Err(resp) => return resp,
    };

    let form = match ProductFormData::from_multipart(&mut payload).await {
        Ok(form) => form,
        Err(e) => {
            log::error!("failed to read product form: {e}");
            return see_other("/admin/products/new");
        }
    };

    let fields = match form.to_draft().validate(true, form.image.is_some()) {
        Ok(fields) => fields,
        Err(msg) => {
            return rerender_create_form(&state, user.email, &business, msg, &form).await;
        }
    };

    // Insert first: the image storage key needs the generated id.
    let product_id = match db::create_product(&state.pool, business.id, &fields).await {
        Ok(id) => id,
        Err(e) => {
            log::error!("failed to create product: {e}");
            return rerender_create_form(
                &state,
                user.email,
                &business,
                format!("Error al guardar: {e}"),
                &form,
            )
            .await;
        }
    };

    // Validation guarantees an image on create.
    if let Some(image) = &form.image {
        let key = format!(
            "{}/{}{}",
            business.id,
            product_id,
            ImageStore::extension_for(image.content_type.as_deref())
        );

        let url = match state.images.save(&key, &image.bytes) {
            Ok(url) => url,
            Err(e) => {
                // The row already exists without its image. Accept the
                // partial write, record it, tell the user.
                log::error!("failed to store image for product {product_id}: {e}");
                log_err!(state.pool, "product image store failed", &fields);
                return rerender_create_form(
                    &state,
                    user.email,
                    &business,
                    "El producto se creó, pero la imagen no se pudo guardar.".to_string(),
                    &form,
                )
                .await;
            }
        };

        if let Err(e) = db::set_product_image_url(&state.pool, product_id, &url).await {
            log::error!("failed to record image url for product {product_id}: {e}");
            log_err!(state.pool, "product image url patch failed", &fields);
            return rerender_create_form(
                &state,
                user.email,
                &business,
                format!("Error al guardar: {e}"),
                &form,
            )
            .await;
        }
    }

    see_other("/admin")
}

#[get("/admin/products/{id}")]
pub async fn product_edit(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> impl Responder {
    let uid = match require_user(&req) {
        Ok(uid) => uid,
        Err(resp) => return resp,
    };
    let user = match load_user(&state.pool, uid).await {
        Ok(user) => user,
        Err(resp) => return resp,
    };
    let business = match require_business(&state, uid).await {
        Ok(business) => business,
        Err(resp) => return resp,
    };
    let id = path.into_inner();

    let product = match db::get_product_by_id(&state.pool, id).await {
        Ok(Some(product)) => product,
        Ok(None) => return render_not_found(),
        Err(e) => return HttpResponse::InternalServerError().body(e.to_string()),
    };

    if product.business_id != business.id {
        return HttpResponse::Forbidden().body("Forbidden");
    }

    let categories = db::list_visible_categories_for_business(&state.pool, business.id)
        .await
        .unwrap_or_default();

    // Products without a category or an image are normal here.
    render(ProductFormTemplate {
        user_email: user.email,
        heading: "Editar producto".to_string(),
        action: format!("/admin/products/{id}"),
        is_new: false,
        error: None,
        name: product.name.clone(),
        description: product.description.clone(),
        price: product.price.to_string(),
        has_discount: product.has_discount,
        discount_price: match (product.has_discount, product.discount_price) {
            (true, Some(p)) => p.to_string(),
            _ => String::new(),
        },
        best_seller: product.best_seller,
        image_url: product.image_url.clone(),
        categories: category_options(&categories, product.category_id),
    })
}

#[post("/admin/products/{id}")]
pub async fn product_update(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i64>,
    mut payload: Multipart,
) -> impl Responder {
    let uid = match require_user(&req) {
        Ok(uid) => uid,
        Err(resp) => return resp,
    };
    let user = match load_user(&state.pool, uid).await {
        Ok(user) => user,
        Err(resp) => return resp,
    };
    let business = match require_business(&state, uid).await {
        Ok(business) => business,
        Err(resp) => return resp,
    };
    let id = path.into_inner();

    let existing = match db::get_product_by_id(&state.pool, id).await {
        Ok(Some(product)) => product,
        Ok(None) => return render_not_found(),
        Err(e) => return HttpResponse::InternalServerError().body(e.to_string()),
    };

    if existing.business_id != business.id {
        return HttpResponse::Forbidden().body("Forbidden");
    }

    let form = match ProductFormData::from_multipart(&mut payload).await {
        Ok(form) => form,
        Err(e) => {
            log::error!("failed to read product form: {e}");
            return see_other(&format!("/admin/products/{id}"));
        }
    };

    let action = format!("/admin/products/{id}");

    let fields = match form.to_draft().validate(false, form.image.is_some()) {
        Ok(fields) => fields,
        Err(msg) => {
            return rerender_form(
                &state,
                user.email,
                &business,
                action,
                "Editar producto",
                false,
                msg,
                &form,
                existing.image_url.clone(),
            )
            .await;
        }
    };

    // Store the replacement image first so the row update carries its URL.
    let mut new_image_url = None;
    if let Some(image) = &form.image {
        let key = format!(
            "{}/{}{}",
            business.id,
            id,
            ImageStore::extension_for(image.content_type.as_deref())
        );

        match state.images.save(&key, &image.bytes) {
            Ok(url) => new_image_url = Some(url),
            Err(e) => {
                log::error!("failed to store image for product {id}: {e}");
                return rerender_form(
                    &state,
                    user.email,
                    &business,
                    action,
                    "Editar producto",
                    false,
                    "La imagen no se pudo guardar.".to_string(),
                    &form,
                    existing.image_url.clone(),
                )
                .await;
            }
        }
    }

    match db::update_product(&state.pool, id, business.id, &fields, new_image_url.as_deref())
        .await
    {
        Ok(true) => see_other("/admin"),
        Ok(false) => render_not_found(),
        Err(e) => {
            log::error!("failed to update product {id}: {e}");
            rerender_form(
                &state,
                user.email,
                &business,
                action,
                "Editar producto",
                false,
                format!("Error al guardar: {e}"),
                &form,
                existing.image_url.clone(),
            )
            .await
        }
    }
}

#[post("/admin/products/{id}/active")]
pub async fn product_toggle_active(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i64>,
    form: web::Form<ProductToggleForm>,
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
    let is_active = checkbox_is_on(form.active.as_deref());

    let error = match db::set_product_active(&state.pool, id, business.id, is_active).await {
        Ok(true) => None,
        Ok(false) => Some("Producto no encontrado".to_string()),
        Err(e) => {
            log::error!("failed to toggle product {id}: {e}");
            Some(format!("Error al cambiar estado: {e}"))
        }
    };

    // Success or failure, answer with the table rebuilt from storage so
    // the optimistic checkbox resyncs with stored truth.
    table_fragment(&state.pool, business.id, error).await
}

#[post("/admin/products/{id}/delete")]
pub async fn product_delete(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i64>,
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

    let error = match db::soft_delete_product(&state.pool, id, business.id).await {
        Ok(true) => None,
        Ok(false) => Some("Producto no encontrado".to_string()),
        Err(e) => {
            log::error!("failed to delete product {id}: {e}");
            Some(format!("Error al eliminar: {e}"))
        }
    };

    table_fragment(&state.pool, business.id, error).await
}

/// Resolves the signed-in user's business for the routes that cannot work
/// without one; they bounce back to /admin, which renders the empty
/// state.
pub async fn require_business(state: &AppState, uid: Uuid) -> Result<Business, HttpResponse> {
    match db::find_business_by_owner(&state.pool, uid).await {
        Ok(Some(business)) => Ok(business),
        Ok(None) => Err(see_other("/admin")),
        Err(e) => {
            log::error!("failed to load business for user {uid}: {e}");
            Err(HttpResponse::InternalServerError().body("Database error"))
        }
    }
}

async fn products_table_html(pool: &PgPool, business_id: Uuid, error: Option<String>) -> String {
    let template = match db::list_products_for_business(pool, business_id).await {
        Ok(products) => ProductsTableTemplate {
            rows: products.iter().map(ProductRow::from_product).collect(),
            error,
        },
        Err(e) => {
            log::error!("failed to load products for business {business_id}: {e}");
            ProductsTableTemplate {
                rows: Vec::new(),
                error: Some("Error al cargar productos".to_string()),
            }
        }
    };

    template.render().unwrap_or_else(|e| {
        log::error!("failed to render products table: {e}");
        String::new()
    })
}

async fn table_fragment(pool: &PgPool, business_id: Uuid, error: Option<String>) -> HttpResponse {
    let html = products_table_html(pool, business_id, error).await;

    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}

async fn rerender_create_form(
    state: &AppState,
    user_email: String,
    business: &Business,
    error: String,
    form: &ProductFormData,
) -> HttpResponse {
    rerender_form(
        state,
        user_email,
        business,
        "/admin/products".to_string(),
        "Nuevo producto",
        true,
        error,
        form,
        None,
    )
    .await
}

#[allow(clippy::too_many_arguments)]
async fn rerender_form(
    state: &AppState,
    user_email: String,
    business: &Business,
    action: String,
    heading: &str,
    is_new: bool,
    error: String,
    form: &ProductFormData,
    image_url: Option<String>,
) -> HttpResponse {
    let categories = db::list_visible_categories_for_business(&state.pool, business.id)
        .await
        .unwrap_or_default();

    render(ProductFormTemplate {
        user_email,
        heading: heading.to_string(),
        action,
        is_new,
        error: Some(error),
        name: form.name.clone(),
        description: form.description.clone(),
        price: form.price_raw.clone(),
        has_discount: form.has_discount,
        discount_price: form.discount_price_raw.clone(),
        best_seller: form.best_seller,
        image_url,
        categories: category_options(&categories, form.category_id),
    })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(products_page)
        .service(product_new)
        .service(product_create)
        .service(product_edit)
        .service(product_update)
        .service(product_toggle_active)
        .service(product_delete);
}
