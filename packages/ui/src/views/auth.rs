//! Login and registration pages.

use api::RegisterForm;
use dioxus::prelude::*;

use crate::forms::{FormError, TextField};
use crate::notify::{use_notifier, Operation};
use crate::session::{use_api, use_request_scope, use_session};

const MIN_PASSWORD_LEN: usize = 8;

pub fn validate_login(email: &str, password: &str) -> Result<(), &'static str> {
    if email.trim().is_empty() || password.is_empty() {
        return Err("Email dan kata sandi wajib diisi");
    }
    Ok(())
}

pub fn validate_registration(form: &RegisterForm) -> Result<(), &'static str> {
    if form.name.trim().is_empty() {
        return Err("Nama wajib diisi");
    }
    if !form.email.contains('@') {
        return Err("Format email tidak valid");
    }
    if form.password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Kata sandi minimal 8 karakter");
    }
    if form.password != form.password_confirmation {
        return Err("Konfirmasi kata sandi tidak cocok");
    }
    Ok(())
}

/// Email/password login. On success the session context is refreshed and
/// the user lands on their role's home route.
#[component]
pub fn LoginView() -> Element {
    let api = use_api();
    let scope = use_request_scope();
    let notifier = use_notifier();
    let mut session = use_session();
    let nav = use_navigator();

    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    if let Some(role) = session().role() {
        nav.replace(role.home_route());
    }

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let api = api.clone();
        let scope = scope.clone();
        async move {
            if busy() {
                return;
            }
            if let Err(message) = validate_login(&email(), &password()) {
                error.set(Some(message.to_string()));
                return;
            }
            busy.set(true);
            error.set(None);
            match scope.run(api.login(email().trim(), &password())).await {
                Ok(user) => {
                    session.set(api.session());
                    notifier.success(Operation::Login);
                    nav.replace(user.role.home_route());
                }
                Err(e) if e.is_cancelled() => return,
                Err(e) => {
                    error.set(Some(e.summary()));
                    notifier.failure(Operation::Login, &e);
                }
            }
            busy.set(false);
        }
    };

    rsx! {
        div {
            class: "auth-page",
            form {
                class: "auth-card",
                onsubmit: onsubmit,
                h1 { "Masuk" }
                p { class: "muted", "Masuk untuk mengelola kursus Anda." }
                TextField {
                    label: "Email",
                    input_type: "email",
                    required: true,
                    value: email(),
                    oninput: move |v| email.set(v),
                }
                TextField {
                    label: "Kata sandi",
                    input_type: "password",
                    required: true,
                    value: password(),
                    oninput: move |v| password.set(v),
                }
                FormError { message: error() }
                button {
                    class: "btn btn--primary btn--block",
                    r#type: "submit",
                    disabled: busy(),
                    if busy() { "Memproses..." } else { "Masuk" }
                }
                p {
                    class: "auth-card__footer",
                    "Belum punya akun? "
                    Link { to: "/register", "Daftar" }
                }
            }
        }
    }
}

/// Public sign-up. Logs the new user in when the backend returns a token,
/// otherwise sends them to the login page.
#[component]
pub fn RegisterView() -> Element {
    let api = use_api();
    let scope = use_request_scope();
    let notifier = use_notifier();
    let mut session = use_session();
    let nav = use_navigator();

    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirmation = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let api = api.clone();
        let scope = scope.clone();
        async move {
            if busy() {
                return;
            }
            let form = RegisterForm {
                name: name().trim().to_string(),
                email: email().trim().to_string(),
                password: password(),
                password_confirmation: confirmation(),
            };
            if let Err(message) = validate_registration(&form) {
                error.set(Some(message.to_string()));
                return;
            }
            busy.set(true);
            error.set(None);
            match scope.run(api.register(&form)).await {
                Ok(user) => {
                    notifier.success(Operation::Register);
                    session.set(api.session());
                    if api.is_authenticated() {
                        nav.replace(user.role.home_route());
                    } else {
                        nav.replace(crate::guard::LOGIN_ROUTE);
                    }
                }
                Err(e) if e.is_cancelled() => return,
                Err(e) => {
                    error.set(Some(e.summary()));
                    notifier.failure(Operation::Register, &e);
                }
            }
            busy.set(false);
        }
    };

    rsx! {
        div {
            class: "auth-page",
            form {
                class: "auth-card",
                onsubmit: onsubmit,
                h1 { "Daftar" }
                TextField { label: "Nama", required: true, value: name(), oninput: move |v| name.set(v) }
                TextField {
                    label: "Email",
                    input_type: "email",
                    required: true,
                    value: email(),
                    oninput: move |v| email.set(v),
                }
                TextField {
                    label: "Kata sandi",
                    input_type: "password",
                    required: true,
                    value: password(),
                    oninput: move |v| password.set(v),
                }
                TextField {
                    label: "Konfirmasi kata sandi",
                    input_type: "password",
                    required: true,
                    value: confirmation(),
                    oninput: move |v| confirmation.set(v),
                }
                FormError { message: error() }
                button {
                    class: "btn btn--primary btn--block",
                    r#type: "submit",
                    disabled: busy(),
                    if busy() { "Memproses..." } else { "Daftar" }
                }
                p {
                    class: "auth-card__footer",
                    "Sudah punya akun? "
                    Link { to: "/login", "Masuk" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(password: &str, confirmation: &str) -> RegisterForm {
        RegisterForm {
            name: "Sari".into(),
            email: "sari@kursus.test".into(),
            password: password.into(),
            password_confirmation: confirmation.into(),
        }
    }

    #[test]
    fn test_login_requires_both_fields() {
        assert!(validate_login("", "rahasia").is_err());
        assert!(validate_login("a@b.c", "").is_err());
        assert!(validate_login("a@b.c", "rahasia").is_ok());
    }

    #[test]
    fn test_registration_rules() {
        assert_eq!(validate_registration(&form("rahasia123", "rahasia123")), Ok(()));
        assert_eq!(
            validate_registration(&form("pendek", "pendek")),
            Err("Kata sandi minimal 8 karakter")
        );
        assert_eq!(
            validate_registration(&form("rahasia123", "rahasia124")),
            Err("Konfirmasi kata sandi tidak cocok")
        );

        let mut bad_email = form("rahasia123", "rahasia123");
        bad_email.email = "sari".into();
        assert_eq!(validate_registration(&bad_email), Err("Format email tidak valid"));
    }
}
