use std::collections::HashMap;

use actix_web::{web, HttpRequest, HttpResponse};
use console::view::HostPage;

use crate::host::{AppState, FormContext, Host};

fn field<'a>(form: &'a HashMap<String, String>, name: &str) -> &'a str {
    form.get(name).map(String::as_str).unwrap_or_default()
}

pub async fn login(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<HashMap<String, String>>,
) -> HttpResponse {
    let ctx = FormContext::from_form(&form);
    let host = Host::new(&state, &req, HostPage::Index, false);
    host.resume(ctx.section);
    host.console
        .login(field(&form, "username"), field(&form, "password"))
        .await;
    host.finish().await
}

pub async fn register(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<HashMap<String, String>>,
) -> HttpResponse {
    let ctx = FormContext::from_form(&form);
    let host = Host::new(&state, &req, HostPage::Index, false);
    host.resume(ctx.section);
    host.console.show_register_form();
    host.console
        .register(field(&form, "username"), field(&form, "password"))
        .await;
    host.finish().await
}

pub async fn logout(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<HashMap<String, String>>,
) -> HttpResponse {
    let ctx = FormContext::from_form(&form);
    let host = Host::new(&state, &req, ctx.page, false);
    host.resume(ctx.section);
    host.console.logout();
    log::info!("logged out from {}", ctx.page.path());
    host.finish().await
}

pub async fn toggle_theme(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<HashMap<String, String>>,
) -> HttpResponse {
    let ctx = FormContext::from_form(&form);
    let host = Host::new(&state, &req, ctx.page, false);
    host.resume(ctx.section);
    let theme = host.console.toggle_theme();
    log::debug!("theme now {}", theme.as_str());
    host.finish().await
}
