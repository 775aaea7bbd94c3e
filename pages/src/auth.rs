use console::entity::EntityKind;
use console::view::{AuthForm, AuthPanel, HostPage, Message};
use leptos::prelude::*;
use templates::message_line;

use crate::links::{context_inputs, register_href};

fn message(msg: Option<&Message>) -> AnyView {
    match msg {
        Some(m) => message_line(m.tone.as_str(), Some(&m.text)),
        None => message_line("", None),
    }
}

fn credentials_form(action: &str, prefix: &str, submit: &str, section: EntityKind) -> AnyView {
    let action = action.to_string();
    let form_id = format!("{}Form", prefix);
    let username_id = format!("{}Username", prefix);
    let password_id = format!("{}Password", prefix);
    let submit = submit.to_string();
    view! {
        <form id={form_id} method="POST" action={action}>
            {context_inputs(HostPage::Index, section)}
            <label>"Username"<input type="text" id={username_id} name="username" required=true/></label>
            <label>"Password"<input type="password" id={password_id} name="password" required=true/></label>
            <button type="submit">{submit}</button>
        </form>
    }
    .into_any()
}

/// Login and register forms; only the selected one is visible.
pub fn auth_panel(auth: &AuthPanel, section: EntityKind) -> AnyView {
    let (login_class, register_class) = match auth.form {
        AuthForm::Login => ("auth-form", "auth-form hidden"),
        AuthForm::Register => ("auth-form hidden", "auth-form"),
    };
    // A successful registration flips back to login; keep its message visible there.
    let login_messages = view! {
        {message(auth.login_message.as_ref())}
        {message(auth.register_message.as_ref().filter(|_| auth.form == AuthForm::Login))}
    };
    let register_messages = message(
        auth.register_message
            .as_ref()
            .filter(|_| auth.form == AuthForm::Register),
    );

    view! {
        <section id="auth-section">
            <div id="login-form" class={login_class}>
                <h2>"Login"</h2>
                {credentials_form("/login", "login", "Login", section)}
                <div id="loginMessage">{login_messages}</div>
                <p>"Don't have an account? "<a id="showRegister" href={register_href()}>"Register here"</a></p>
            </div>
            <div id="register-form" class={register_class}>
                <h2>"Register"</h2>
                {credentials_form("/register", "register", "Register", section)}
                <div id="registerMessage">{register_messages}</div>
                <p>"Already have an account? "<a id="showLogin" href="/">"Login here"</a></p>
            </div>
        </section>
    }
    .into_any()
}

#[cfg(test)]
mod tests {
    use super::*;
    use console::view::Tone;

    fn panel(form: AuthForm) -> AuthPanel {
        AuthPanel {
            form,
            login_message: None,
            register_message: None,
        }
    }

    #[test]
    fn login_visible_by_default() {
        let html = auth_panel(&panel(AuthForm::Login), EntityKind::ApiKeys).to_html();
        assert!(html.contains(r#"<div id="login-form" class="auth-form">"#));
        assert!(html.contains(r#"<div id="register-form" class="auth-form hidden">"#));
        assert!(html.contains(r#"action="/login""#));
        assert!(html.contains(r#"href="/?auth=register""#));
    }

    #[test]
    fn registration_success_shows_on_login_form() {
        let mut auth = panel(AuthForm::Login);
        auth.register_message = Some(Message::new(
            Tone::Success,
            "Registration successful! You can now log in.",
        ));
        let html = auth_panel(&auth, EntityKind::ApiKeys).to_html();
        assert!(html.contains(r#"class="message success""#));
        assert!(html.contains("Registration successful! You can now log in."));
    }

    #[test]
    fn login_error_is_rendered() {
        let mut auth = panel(AuthForm::Login);
        auth.login_message = Some(Message::new(Tone::Error, "Invalid credentials"));
        let html = auth_panel(&auth, EntityKind::Models).to_html();
        assert!(html.contains(r#"class="message error""#));
        assert!(html.contains("Invalid credentials"));
        assert!(html.contains(r#"name="section" value="models""#));
    }
}
