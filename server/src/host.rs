//! Glue between one HTTP request and one console instance.
//!
//! Each request builds a fresh console over the browser's cookies, replays a
//! single user action on it, and answers with the rendered view or, when the
//! console asked for a full-page navigation, a redirect.

use std::collections::HashMap;
use std::rc::Rc;

use actix_web::http::header::LOCATION;
use actix_web::{HttpRequest, HttpResponse};
use console::dialogs::Answered;
use console::entity::EntityKind;
use console::session::SESSION_EXPIRED_NOTICE;
use console::transport::HttpTransport;
use console::view::HostPage;
use console::{Console, ConsoleOptions};

use crate::cookies::CookieStorage;

const PREFERS_COLOR_SCHEME: &str = "Sec-CH-Prefers-Color-Scheme";

/// Query value carried by a redirect whose page lost its session.
pub const EXPIRED_NOTICE: &str = "expired";

pub struct AppState {
    pub transport: HttpTransport,
    pub options: ConsoleOptions,
}

/// Which page and section a POSTed form was rendered on.
#[derive(Debug, Clone, Copy)]
pub struct FormContext {
    pub page: HostPage,
    pub section: Option<EntityKind>,
}

impl FormContext {
    pub fn from_form(form: &HashMap<String, String>) -> Self {
        Self {
            page: form
                .get("page")
                .and_then(|p| HostPage::from_slug(p))
                .unwrap_or(HostPage::Index),
            section: form.get("section").and_then(|s| EntityKind::from_slug(s)),
        }
    }
}

pub struct Host {
    pub console: Console<HttpTransport>,
    storage: Rc<CookieStorage>,
    prefers_dark: bool,
}

impl Host {
    /// `confirmed` answers any confirmation prompt the action raises.
    pub fn new(state: &AppState, req: &HttpRequest, page: HostPage, confirmed: bool) -> Self {
        let storage = Rc::new(CookieStorage::from_request(req, &state.options.keys));
        let prefers_dark = req
            .headers()
            .get(PREFERS_COLOR_SCHEME)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.trim_matches('"').eq_ignore_ascii_case("dark"));
        let console = Console::new(
            page,
            state.transport.clone(),
            storage.clone(),
            Rc::new(Answered(confirmed)),
            state.options.clone(),
        );
        Self {
            console,
            storage,
            prefers_dark,
        }
    }

    /// Restores the page as the browser last saw it, without loading.
    pub fn resume(&self, section: Option<EntityKind>) {
        self.console.resume(self.prefers_dark, section);
    }

    /// Sends the browser to `location` without loading anything.
    pub fn redirect(self, location: String) -> HttpResponse {
        let mut resp = HttpResponse::SeeOther();
        self.storage.apply(&mut resp);
        log::info!("redirecting to {}", location);
        resp.insert_header((LOCATION, location)).finish()
    }

    pub async fn finish(self) -> HttpResponse {
        self.console.settle().await;
        let doc = self.console.snapshot();

        let mut resp = match &doc.location {
            Some(_) => HttpResponse::SeeOther(),
            None => HttpResponse::Ok(),
        };
        self.storage.apply(&mut resp);
        resp.insert_header(("Accept-CH", PREFERS_COLOR_SCHEME));

        match doc.location {
            Some(location) => {
                let expired = doc.notices.iter().any(|n| n.text == SESSION_EXPIRED_NOTICE);
                let target = if expired {
                    format!("{}?notice={}", location, EXPIRED_NOTICE)
                } else {
                    location
                };
                log::info!("redirecting to {}", target);
                resp.insert_header((LOCATION, target)).finish()
            }
            None => resp
                .content_type("text/html")
                .body(pages::render_console(&doc)),
        }
    }
}
