use actix_web::cookie::{Cookie, SameSite};
use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use uuid::Uuid;

use std::time::Duration;

use menupress::db;
use menupress::services::PasswordManager;

use crate::web::forms::{AuthQuery, LoginForm};
use crate::web::helpers::{SESSION_COOKIE, is_htmx, render, see_other};
use crate::web::security::{self, MIN_PASSWORD_LEN};
use crate::web::state::AppState;
use crate::web::templates::LoginTemplate;

#[get("/login")]
pub async fn login_form(query: web::Query<AuthQuery>) -> impl Responder {
    let error = query.error.as_deref().map(|code| match code {
        "missing_email" => "El correo es obligatorio".to_string(),
        "bad_email" => "Formato de correo inválido".to_string(),
        "short_password" => {
            format!("La contraseña debe tener al menos {MIN_PASSWORD_LEN} caracteres")
        }
        "invalid" => "Credenciales inválidas".to_string(),
        "rate_limit" => "Demasiados intentos. Inténtalo de nuevo en unos minutos.".to_string(),
        "internal" => "Ocurrió un error interno. Inténtalo de nuevo.".to_string(),
        other => other.to_string(),
    });

    render(LoginTemplate { error })
}

#[post("/login")]
pub async fn login_submit(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<LoginForm>,
) -> impl Responder {
    let client_ip = req
        .connection_info()
        .realip_remote_addr()
        .unwrap_or("unknown")
        .to_string();

    if !state.rate_limiter.check_rate_limit(
        &format!("login:{client_ip}"),
        5,                        // 5 attempts
        Duration::from_secs(300), // per 5 minutes
    ) {
        return see_other("/login?error=rate_limit");
    }

    // The same checks the form runs client-side, repeated before any
    // database access.
    let email = form.email.trim().to_string();
    let password = form.password.trim().to_string();

    if email.is_empty() {
        return see_other("/login?error=missing_email");
    }
    if !security::validate_email(&email) {
        return see_other("/login?error=bad_email");
    }
    if password.len() < MIN_PASSWORD_LEN {
        return see_other("/login?error=short_password");
    }

    let user = match db::get_user_by_email(&state.pool, &email).await {
        Ok(user) => user,
        Err(e) => {
            log::error!("database error during login: {e}");
            return see_other("/login?error=internal");
        }
    };

    // Verify against a dummy hash when the account does not exist, so the
    // response time does not reveal which emails are registered.
    let (user, stored_hash) = match user {
        Some(u) => {
            let hash = u.password_hash.clone();
            (Some(u), hash)
        }
        None => (None, dummy_hash()),
    };

    let password_valid =
        PasswordManager::verify_password(&password, &stored_hash).unwrap_or(false);

    match user {
        Some(user) if password_valid => HttpResponse::SeeOther()
            .cookie(session_cookie(user.id))
            .insert_header(("Location", "/admin"))
            .finish(),
        _ => see_other("/login?error=invalid"),
    }
}

#[post("/logout")]
pub async fn logout(req: HttpRequest) -> impl Responder {
    let mut cookie = Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish();
    cookie.make_removal();

    if is_htmx(&req) {
        HttpResponse::Ok()
            .cookie(cookie)
            .insert_header(("HX-Redirect", "/login"))
            .finish()
    } else {
        HttpResponse::SeeOther()
            .cookie(cookie)
            .insert_header(("Location", "/login"))
            .finish()
    }
}

fn session_cookie(user_id: Uuid) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, user_id.to_string())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(actix_web::cookie::time::Duration::days(7))
        .finish()
}

fn dummy_hash() -> String {
    PasswordManager::hash_password("menupress-timing-dummy").unwrap_or_else(|e| {
        log::error!("failed to generate dummy hash: {e}");
        "$argon2id$v=19$m=65536,t=3,p=4$dW5rbm93bl9zYWx0X2R1bW15$E2LvWPx3FxvDaJxEMpLLBfWbLkPXfYHrF8z9CGCX3eI".to_string()
    })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(login_form)
        .service(login_submit)
        .service(logout);
}
