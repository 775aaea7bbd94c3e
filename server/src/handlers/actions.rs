use std::collections::HashMap;

use actix_web::{web, HttpRequest, HttpResponse};
use console::entity::EntityKind;
use console::forms::{CreateForm, FormFields};
use console::lists::DeleteOutcome;
use pages::links::section_href;

use crate::host::{AppState, FormContext, Host};

pub async fn submit_form(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    form: web::Form<HashMap<String, String>>,
) -> HttpResponse {
    let Some(create) = CreateForm::from_slug(&path.into_inner()) else {
        return HttpResponse::NotFound().body("Unknown form");
    };
    let ctx = FormContext::from_form(&form);
    let host = Host::new(&state, &req, ctx.page, false);
    host.resume(ctx.section.or(Some(create.refreshes())));
    let fields = FormFields::from(form.into_inner());
    host.console.submit_form(create, &fields).await;
    host.finish().await
}

pub async fn delete_record(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<(String, String)>,
    form: web::Form<HashMap<String, String>>,
) -> HttpResponse {
    let (type_name, id) = path.into_inner();
    let ctx = FormContext::from_form(&form);
    let confirmed = form.get("confirmed").is_some_and(|v| v == "yes");
    let section = ctx.section.or(EntityKind::from_type_name(&type_name));
    let host = Host::new(&state, &req, ctx.page, confirmed);
    host.resume(section);
    match host.console.click_delete(&type_name, &id).await {
        // Nothing changed, so leave the backend alone.
        Some(DeleteOutcome::Cancelled) => {
            let back = section.map_or_else(
                || ctx.page.path().to_string(),
                |s| section_href(ctx.page, s),
            );
            host.redirect(back)
        }
        Some(outcome) => {
            log::info!("delete {} {}: {:?}", type_name, id, outcome);
            host.finish().await
        }
        None => HttpResponse::NotFound().body("Unknown record type"),
    }
}
