use leptos::{either::Either, prelude::*};

pub fn page_layout(title: &str, dark: bool, body_html: String) -> String {
    let title = title
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;");
    let html_class = if dark { r#" class="dark""# } else { "" };
    format!(
        r#"<!DOCTYPE html>
<html{html_class}>
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
body {{ font-family: sans-serif; margin: 0; padding: 16px; background: #f9fafb; color: #1f2937; }}
html.dark body {{ background: #111827; color: #e5e7eb; }}
header {{ display: flex; align-items: center; gap: 12px; margin-bottom: 16px; }}
header h1 {{ flex: 1; margin: 0; font-size: 1.5em; }}
nav {{ display: flex; gap: 8px; margin-bottom: 16px; }}
nav a {{ padding: 6px 12px; border-radius: 4px; text-decoration: none; background: #e5e7eb; color: #1f2937; }}
html.dark nav a {{ background: #374151; color: #e5e7eb; }}
nav a.active, html.dark nav a.active {{ background: #2563eb; color: #fff; }}
table {{ width: 100%; border-collapse: collapse; }}
th {{ text-align: left; padding: 6px 8px; border-bottom: 1px solid #ccc; }}
td {{ padding: 6px 8px; border-bottom: 1px solid #eee; vertical-align: top; }}
html.dark td {{ border-bottom-color: #374151; }}
td.placeholder {{ text-align: center; }}
pre {{ white-space: pre-wrap; word-break: break-word; margin: 0; }}
form.inline {{ display: inline; }}
label {{ display: block; margin: 8px 0 4px; }}
input[type=text], input[type=password], input[type=url], input[type=number], select {{ width: 100%; padding: 6px; box-sizing: border-box; }}
button.danger {{ background: #ef4444; color: #fff; border: none; padding: 4px 10px; border-radius: 4px; }}
.hidden {{ display: none; }}
.message.error {{ color: #dc2626; }}
.message.success {{ color: #16a34a; }}
.notice {{ padding: 8px 12px; margin-bottom: 8px; border-radius: 4px; border: 1px solid #ccc; }}
.notice.error {{ border-color: #dc2626; }}
.notice.success {{ border-color: #16a34a; }}
.modal {{ position: fixed; inset: 0; background: rgba(0, 0, 0, 0.5); display: flex; align-items: center; justify-content: center; }}
.modal-content {{ background: #fff; padding: 16px; border-radius: 8px; min-width: 360px; }}
html.dark .modal-content {{ background: #1f2937; }}
.modal-content header a {{ text-decoration: none; font-size: 1.4em; }}
</style>
</head>
<body>
{body_html}
</body>
</html>"#,
        html_class = html_class,
        title = title,
        body_html = body_html
    )
}

pub struct NavLink {
    pub label: String,
    pub href: String,
    pub active: bool,
}

impl NavLink {
    pub fn new(label: impl ToString, href: impl ToString, active: bool) -> Self {
        Self {
            label: label.to_string(),
            href: href.to_string(),
            active,
        }
    }
}

pub fn nav_bar(links: Vec<NavLink>) -> AnyView {
    if links.is_empty() {
        return ().into_any();
    }
    view! {
        <nav>
            {links.into_iter().map(|link| {
                let class = if link.active { "nav-button active" } else { "nav-button" };
                view! { <a class={class} href={link.href}>{link.label}</a> }
            }).collect::<Vec<_>>()}
        </nav>
    }
    .into_any()
}

/// Table with a header row; an empty `rows` renders just the header.
pub fn data_table(body_id: &str, columns: &[&str], rows: Vec<AnyView>) -> AnyView {
    let headers = columns
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>();
    let body_id = body_id.to_string();
    view! {
        <table>
            <thead>
                <tr>{headers.into_iter().map(|h| view! { <th>{h}</th> }).collect::<Vec<_>>()}</tr>
            </thead>
            <tbody id={body_id}>{rows}</tbody>
        </table>
    }
    .into_any()
}

/// A single full-width row carrying a status text.
pub fn placeholder_row(colspan: usize, text: &str) -> AnyView {
    let text = text.to_string();
    view! {
        <tr><td class="placeholder" colspan={colspan.to_string()}>{text}</td></tr>
    }
    .into_any()
}

pub fn hidden_input(name: &str, value: &str) -> AnyView {
    let name = name.to_string();
    let value = value.to_string();
    view! { <input type="hidden" name={name} value={value}/> }.into_any()
}

/// Message line; `class` is appended to `message`.
pub fn message_line(class: &str, text: Option<&str>) -> AnyView {
    match text {
        Some(text) => {
            let class = format!("message {}", class);
            let text = text.to_string();
            Either::Left(view! { <p class={class}>{text}</p> })
        }
        None => Either::Right(()),
    }
    .into_any()
}

pub struct Page<C: IntoView = ()> {
    pub title: String,
    pub dark: bool,
    pub header_actions: Vec<AnyView>,
    pub nav_links: Vec<NavLink>,
    pub content: C,
}

impl Default for Page {
    fn default() -> Self {
        Page {
            title: String::new(),
            dark: false,
            header_actions: Vec::new(),
            nav_links: Vec::new(),
            content: (),
        }
    }
}

impl<C: IntoView> Page<C> {
    pub fn render(self) -> String {
        let Page {
            title,
            dark,
            header_actions,
            nav_links,
            content,
        } = self;

        let heading = title.clone();
        let body = view! {
            <header>
                <h1>{heading}</h1>
                {header_actions}
            </header>
            {nav_bar(nav_links)}
            {content}
        };

        page_layout(&title, dark, body.to_html())
    }
}
