use api::{Role, User, UserForm};
use dioxus::prelude::*;

use crate::forms::{FormError, SelectField, TextField};
use crate::icons::{FaPen, FaPlus, FaTrashCan};
use crate::lists::{apply_delete, upsert, use_remote_list};
use crate::notify::{use_notifier, Operation};
use crate::session::{use_api, use_request_scope};
use crate::views::{ConfirmDialog, Editing, ModalOverlay};
use crate::Icon;

pub fn validate_user_form(form: &UserForm, is_new: bool) -> Result<(), &'static str> {
    if form.name.trim().is_empty() {
        return Err("Nama wajib diisi");
    }
    if !form.email.contains('@') {
        return Err("Format email tidak valid");
    }
    match form.password.as_deref() {
        None if is_new => Err("Kata sandi wajib diisi untuk pengguna baru"),
        Some(p) if p.chars().count() < 8 => Err("Kata sandi minimal 8 karakter"),
        _ => Ok(()),
    }
}

#[component]
pub fn UsersView() -> Element {
    let api = use_api();
    let scope = use_request_scope();
    let notifier = use_notifier();
    let (mut users, loading) =
        use_remote_list(Operation::LoadUsers, |api| async move { api.list_users().await });
    let mut editing = use_signal(|| None::<Editing<User>>);
    let mut deleting = use_signal(|| None::<User>);
    let mut busy = use_signal(|| false);

    let confirm_delete = move |_: ()| {
        let Some(user) = deleting() else {
            return;
        };
        let api = api.clone();
        let scope = scope.clone();
        spawn(async move {
            busy.set(true);
            let outcome = scope.run(api.delete_user(user.id)).await;
            if let Some(notice) = apply_delete(&mut users.write(), user.id, outcome, Operation::DeleteUser) {
                notifier.show(notice);
            }
            busy.set(false);
            deleting.set(None);
        });
    };

    rsx! {
        div {
            class: "page",
            header {
                class: "page__header",
                h1 { "Pengguna" }
                button {
                    class: "btn btn--primary",
                    onclick: move |_| editing.set(Some(Editing::New)),
                    Icon { icon: FaPlus, width: 12, height: 12 }
                    span { "Tambah pengguna" }
                }
            }

            if loading() {
                p { class: "muted", "Memuat pengguna..." }
            } else if users.read().is_empty() {
                p { class: "muted", "Belum ada pengguna." }
            } else {
                table {
                    class: "table",
                    thead {
                        tr {
                            th { "Nama" }
                            th { "Email" }
                            th { "Peran" }
                            th { class: "table__actions", "" }
                        }
                    }
                    tbody {
                        for user in users() {
                            tr {
                                key: "{user.id}",
                                td {
                                    span { class: "avatar", "{user.initial()}" }
                                    "{user.name}"
                                }
                                td { "{user.email}" }
                                td { span { class: "badge", "{user.role.label()}" } }
                                td {
                                    class: "table__actions",
                                    button {
                                        class: "btn btn--ghost",
                                        aria_label: "Ubah",
                                        onclick: {
                                            let user = user.clone();
                                            move |_| editing.set(Some(Editing::Existing(user.clone())))
                                        },
                                        Icon { icon: FaPen, width: 12, height: 12 }
                                    }
                                    button {
                                        class: "btn btn--ghost btn--danger-text",
                                        aria_label: "Hapus",
                                        onclick: {
                                            let user = user.clone();
                                            move |_| deleting.set(Some(user.clone()))
                                        },
                                        Icon { icon: FaTrashCan, width: 12, height: 12 }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            if let Some(target) = editing() {
                UserDialog {
                    target: target,
                    on_saved: move |user: User| {
                        upsert(&mut users.write(), user);
                        notifier.success(Operation::SaveUser);
                        editing.set(None);
                    },
                    on_close: move |_| editing.set(None),
                }
            }

            if let Some(user) = deleting() {
                ConfirmDialog {
                    title: "Hapus pengguna",
                    message: format!("Hapus {} ({})? Tindakan ini tidak dapat dibatalkan.", user.name, user.email),
                    busy: busy(),
                    on_confirm: confirm_delete,
                    on_cancel: move |_| deleting.set(None),
                }
            }
        }
    }
}

#[component]
fn UserDialog(target: Editing<User>, on_saved: EventHandler<User>, on_close: EventHandler<()>) -> Element {
    let api = use_api();
    let scope = use_request_scope();
    let notifier = use_notifier();

    let existing = target.existing().cloned();
    let is_new = existing.is_none();
    let initial = existing.as_ref().map(UserForm::from_user).unwrap_or(UserForm {
        name: String::new(),
        email: String::new(),
        role: Role::User,
        password: None,
    });

    let mut name = use_signal(|| initial.name.clone());
    let mut email = use_signal(|| initial.email.clone());
    let mut role = use_signal(|| initial.role);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let api = api.clone();
        let scope = scope.clone();
        let existing = existing.clone();
        async move {
            let form = UserForm {
                name: name().trim().to_string(),
                email: email().trim().to_string(),
                role: role(),
                password: Some(password()).filter(|p| !p.is_empty()),
            };
            if let Err(message) = validate_user_form(&form, existing.is_none()) {
                error.set(Some(message.to_string()));
                return;
            }
            busy.set(true);
            let outcome = match &existing {
                None => scope.run(api.create_user(&form)).await,
                Some(user) => scope.run(api.update_user(user.id, &form)).await,
            };
            busy.set(false);
            match outcome {
                Ok(user) => on_saved.call(user),
                Err(e) => {
                    error.set(Some(e.summary()));
                    notifier.failure(Operation::SaveUser, &e);
                }
            }
        }
    };

    let title = if is_new { "Tambah pengguna" } else { "Ubah pengguna" };
    let password_label = if is_new { "Kata sandi" } else { "Kata sandi baru (opsional)" };
    let roles: Vec<(String, String)> = Role::all()
        .iter()
        .map(|r| (r.as_str().to_string(), r.label().to_string()))
        .collect();

    rsx! {
        ModalOverlay {
            title: title.to_string(),
            on_close: move |_| on_close.call(()),
            form {
                class: "form",
                onsubmit: onsubmit,
                TextField { label: "Nama", required: true, value: name(), oninput: move |v| name.set(v) }
                TextField {
                    label: "Email",
                    input_type: "email",
                    required: true,
                    value: email(),
                    oninput: move |v| email.set(v),
                }
                SelectField {
                    label: "Peran",
                    value: role().as_str().to_string(),
                    options: roles,
                    onchange: move |v: String| {
                        if let Ok(r) = v.parse::<Role>() {
                            role.set(r);
                        }
                    },
                }
                TextField {
                    label: password_label.to_string(),
                    input_type: "password",
                    required: is_new,
                    value: password(),
                    oninput: move |v| password.set(v),
                }
                FormError { message: error() }
                div {
                    class: "modal__actions",
                    button { class: "btn btn--ghost", r#type: "button", onclick: move |_| on_close.call(()), "Batal" }
                    button {
                        class: "btn btn--primary",
                        r#type: "submit",
                        disabled: busy(),
                        if busy() { "Menyimpan..." } else { "Simpan" }
                    }
                }
            }
        }
    }
}
