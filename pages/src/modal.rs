use common::models::ProviderType;
use console::entity::EntityKind;
use console::forms::{CreateForm, FormFields};
use console::view::{HostPage, Modal, ModalBody, SelectControl};
use leptos::prelude::*;

use crate::links::{context_inputs, dismiss_href};

fn text_input(
    id: &str,
    name: &str,
    label: &str,
    kind: &str,
    required: bool,
    values: &FormFields,
) -> AnyView {
    let value = values.text(name);
    let (id, name, label, kind) = (
        id.to_string(),
        name.to_string(),
        label.to_string(),
        kind.to_string(),
    );
    view! {
        <div class="field">
            <label>{label}<input type={kind} id={id} name={name} value={value} required={required}/></label>
        </div>
    }
    .into_any()
}

fn choice(value: &str, label: &str, current: &str) -> AnyView {
    let selected = value == current;
    let (value, label) = (value.to_string(), label.to_string());
    view! { <option value={value} selected={selected}>{label}</option> }.into_any()
}

fn related_select(
    id: &str,
    name: &str,
    label: &str,
    select: Option<&SelectControl>,
    values: &FormFields,
) -> AnyView {
    let current = values.text(name);
    let (id, name, label) = (id.to_string(), name.to_string(), label.to_string());
    let placeholder = select.map(|s| s.placeholder.clone()).unwrap_or_default();
    let options = select
        .map(|s| s.options.as_slice())
        .unwrap_or_default()
        .iter()
        .map(|o| choice(&o.value, &o.label, &current))
        .collect::<Vec<_>>();
    view! {
        <div class="field">
            <label>
                {label}
                <select id={id} name={name} required=true>
                    <option value="">{placeholder}</option>
                    {options}
                </select>
            </label>
        </div>
    }
    .into_any()
}

fn checkbox(id: &str, name: &str, label: &str, hidden: bool, values: &FormFields) -> AnyView {
    let class = if hidden { "field llm-only hidden" } else { "field llm-only" };
    let checked = values.checked(name);
    let (id, name, label) = (id.to_string(), name.to_string(), format!(" {}", label));
    view! {
        <div class={class}>
            <label><input type="checkbox" id={id} name={name} checked={checked}/>{label}</label>
        </div>
    }
    .into_any()
}

fn base_url_hints() -> String {
    let hints: serde_json::Map<String, serde_json::Value> = [ProviderType::Ollama, ProviderType::Openai]
        .into_iter()
        .map(|t| (t.as_str().to_string(), t.base_url_hint().into()))
        .collect();
    format!(
        "document.getElementById('provider_base_url').placeholder = {}[this.value] || '';",
        serde_json::Value::Object(hints)
    )
}

const TOGGLE_LLM_ONLY: &str = "document.querySelectorAll('.llm-only').forEach((el) => el.classList.toggle('hidden', this.value !== 'llm'));";

fn fields(body: &ModalBody) -> AnyView {
    let select = body.select.as_ref();
    let values = &body.values;
    match body.form {
        CreateForm::ApiKey => text_input("api_key_name", "name", "Name", "text", true, values),
        CreateForm::Connection => view! {
            {text_input("connection_name", "name", "Name", "text", true, values)}
            {related_select("connection_provider_id", "provider_id", "Provider", select, values)}
            {text_input("connection_api_key", "api_key", "API Key", "text", true, values)}
            <p class="hint">"This is the API key for the selected provider."</p>
        }
        .into_any(),
        CreateForm::Provider => {
            let current = values.text("type");
            view! {
                {text_input("provider_name", "name", "Name", "text", true, values)}
                <div class="field">
                    <label>
                        "Type"
                        <select id="provider_type" name="type" required=true onchange={base_url_hints()}>
                            <option value="">"Select a type"</option>
                            {choice("ollama", "Ollama", &current)}
                            {choice("openai", "OpenAI (compatible)", &current)}
                        </select>
                    </label>
                </div>
                {text_input("provider_base_url", "base_url", "Base URL", "url", false, values)}
            }
            .into_any()
        }
        CreateForm::Model => {
            let current = values.text("type");
            let hide_llm_only = current != "llm";
            view! {
                {related_select("model_connection_id", "connection_id", "Connection", select, values)}
                {text_input("model_proxy_model_id", "proxy_model_id", "Proxy Model ID", "text", true, values)}
                {text_input("model_provider_model_id", "provider_model_id", "Provider Model ID", "text", true, values)}
                <div class="field">
                    <label>
                        "Model Type"
                        <select id="model_type" name="type" required=true onchange={TOGGLE_LLM_ONLY}>
                            <option value="">"Select a type"</option>
                            {choice("llm", "LLM", &current)}
                            {choice("embedding", "Embedding", &current)}
                        </select>
                    </label>
                </div>
                <div class="field">
                    <label>"Price Input"<input type="number" step="0.000001" id="model_price_input" name="price_input" value={values.text("price_input")}/></label>
                </div>
                <div class="field">
                    <label>"Price Output"<input type="number" step="0.000001" id="model_price_output" name="price_output" value={values.text("price_output")}/></label>
                </div>
                {checkbox("model_thinking", "thinking", "Thinking", hide_llm_only, values)}
                {checkbox("model_tools_usage", "tools_usage", "Tools Usage", hide_llm_only, values)}
            }
            .into_any()
        }
    }
}

fn create_form(page: HostPage, section: EntityKind, body: &ModalBody) -> AnyView {
    let action = format!("/forms/{}", body.form.slug());
    let submit = format!("Create {}", body.form.entity_label());
    let form_id = format!("create-{}-form", body.form.slug());
    view! {
        <form id={form_id} method="POST" action={action}>
            {context_inputs(page, section)}
            {fields(body)}
            <button type="submit">{submit}</button>
        </form>
    }
    .into_any()
}

/// The overlay. A click on the backdrop itself, or on the close control,
/// is replayed by the host as a dismissal.
pub fn modal_view(page: HostPage, section: EntityKind, modal: &Modal) -> AnyView {
    let Some(body) = modal.body.as_ref().filter(|_| modal.visible) else {
        return ().into_any();
    };
    let close = dismiss_href(page, section, body.form, "close");
    let backdrop = format!(
        "if (event.target === this) window.location.href = {};",
        serde_json::Value::String(dismiss_href(page, section, body.form, "backdrop"))
    );
    let title = modal.title.clone();
    let form = create_form(page, section, body);
    view! {
        <div id="genericModal" class="modal" onclick={backdrop}>
            <div class="modal-content">
                <header>
                    <h3 id="modalTitle">{title}</h3>
                    <a id="closeModal" href={close}>"×"</a>
                </header>
                <div id="modalContent">{form}</div>
            </div>
        </div>
    }
    .into_any()
}

#[cfg(test)]
mod tests {
    use super::*;
    use console::view::SelectOption;

    fn open(form: CreateForm, select: Option<SelectControl>) -> Modal {
        Modal {
            visible: true,
            title: form.title(),
            body: Some(ModalBody::new(form, select)),
        }
    }

    #[test]
    fn closed_modal_renders_nothing() {
        let html = modal_view(HostPage::Index, EntityKind::ApiKeys, &Modal::default()).to_html();
        assert!(!html.contains("genericModal"));
    }

    #[test]
    fn connection_form_lists_provider_options() {
        let modal = open(
            CreateForm::Connection,
            Some(SelectControl {
                placeholder: "Select a Provider".into(),
                options: vec![SelectOption {
                    value: "1".into(),
                    label: "P1 (ID: 1)".into(),
                }],
            }),
        );
        let html = modal_view(HostPage::Index, EntityKind::Connections, &modal).to_html();
        assert!(html.contains("Create New Connection"));
        assert!(html.contains(r#"action="/forms/connection""#));
        assert!(html.contains(r#"<option value="">Select a Provider</option>"#));
        assert!(html.contains(r#"<option value="1">P1 (ID: 1)</option>"#));
        assert_eq!(html.matches("<option").count(), 2);
        assert!(html.contains(r#"name="section" value="connections""#));
    }

    #[test]
    fn provider_form_hints_base_urls() {
        let html = modal_view(
            HostPage::Index,
            EntityKind::Providers,
            &open(CreateForm::Provider, None),
        )
        .to_html();
        assert!(html.contains("http://localhost:11435"));
        assert!(html.contains("https://api.openai.com/v1"));
        assert!(html.contains(r#"name="base_url""#));
    }

    #[test]
    fn model_form_hides_llm_only_flags() {
        let html = modal_view(
            HostPage::Dashboard,
            EntityKind::Models,
            &open(
                CreateForm::Model,
                Some(SelectControl {
                    placeholder: "Failed to load connections".into(),
                    options: vec![],
                }),
            ),
        )
        .to_html();
        assert_eq!(html.matches("field llm-only hidden").count(), 2);
        assert!(html.contains("Failed to load connections"));
        assert!(html.contains(r#"name="page" value="dashboard""#));
        assert!(html.contains("dismiss=backdrop"));
    }

    #[test]
    fn rejected_input_is_drawn_back() {
        let mut modal = open(CreateForm::Model, None);
        if let Some(body) = modal.body.as_mut() {
            body.values = FormFields::default()
                .with("proxy_model_id", "gpt-local")
                .with("type", "llm")
                .with("thinking", "on");
        }
        let html = modal_view(HostPage::Index, EntityKind::Models, &modal).to_html();
        assert!(html.contains(r#"value="gpt-local""#));
        assert_eq!(html.matches("field llm-only hidden").count(), 0);
        assert_eq!(html.matches(r#"class="field llm-only""#).count(), 2);
        assert_eq!(html.matches("checked").count(), 1);
        assert_eq!(html.matches("selected").count(), 1);
    }
}
