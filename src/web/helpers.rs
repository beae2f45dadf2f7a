use actix_web::{HttpRequest, HttpResponse};
use askama::Template;
use sqlx::PgPool;
use uuid::Uuid;

use menupress::db;
use menupress::models::User;

use crate::web::templates::NotFoundTemplate;

pub const SESSION_COOKIE: &str = "mp_uid";

pub fn is_htmx(req: &HttpRequest) -> bool {
    req.headers()
        .get("HX-Request")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|s| s.eq_ignore_ascii_case("true"))
}

/// The session check: a valid user id in the session cookie, or nothing.
pub fn current_user_id(req: &HttpRequest) -> Option<Uuid> {
    req.cookie(SESSION_COOKIE)
        .map(|c| c.value().trim().to_string())
        .filter(|s| !s.is_empty())
        .and_then(|s| Uuid::parse_str(&s).ok())
}

/// Admin pages bail to the login page when there is no session.
pub fn require_user(req: &HttpRequest) -> Result<Uuid, HttpResponse> {
    match current_user_id(req) {
        Some(uid) => Ok(uid),
        None => {
            if is_htmx(req) {
                Err(HttpResponse::Unauthorized()
                    .insert_header(("HX-Redirect", "/login"))
                    .finish())
            } else {
                Err(see_other("/login"))
            }
        }
    }
}

/// Resolves the session's user row. A stale cookie (row gone) is treated
/// like no session at all.
pub async fn load_user(pool: &PgPool, uid: Uuid) -> Result<User, HttpResponse> {
    match db::get_user_by_id(pool, uid).await {
        Ok(Some(user)) => Ok(user),
        Ok(None) => Err(see_other("/login")),
        Err(e) => {
            log::error!("failed to load user {uid}: {e}");
            Err(HttpResponse::InternalServerError().body("Database error"))
        }
    }
}

pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", location.to_string()))
        .finish()
}

pub fn render<T: Template>(t: T) -> HttpResponse {
    match t.render() {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => HttpResponse::InternalServerError()
            .content_type("text/plain; charset=utf-8")
            .body(format!("Template error: {e}")),
    }
}

pub fn render_not_found() -> HttpResponse {
    match (NotFoundTemplate {}).render() {
        Ok(body) => HttpResponse::NotFound()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => HttpResponse::InternalServerError()
            .content_type("text/plain; charset=utf-8")
            .body(format!("Template error: {e}")),
    }
}
