use api::{Category, CategoryForm};
use dioxus::prelude::*;

use crate::forms::{FormError, TextAreaField, TextField};
use crate::icons::{FaPen, FaPlus, FaTrashCan};
use crate::lists::{apply_delete, upsert, use_remote_list};
use crate::notify::{use_notifier, Operation};
use crate::session::{use_api, use_request_scope};
use crate::views::{ConfirmDialog, Editing, ModalOverlay};
use crate::Icon;

#[component]
pub fn CategoriesView() -> Element {
    let api = use_api();
    let scope = use_request_scope();
    let notifier = use_notifier();
    let (mut categories, loading) =
        use_remote_list(Operation::LoadCategories, |api| async move { api.list_categories().await });
    let mut editing = use_signal(|| None::<Editing<Category>>);
    let mut deleting = use_signal(|| None::<Category>);
    let mut busy = use_signal(|| false);

    let confirm_delete = move |_: ()| {
        let Some(category) = deleting() else {
            return;
        };
        let api = api.clone();
        let scope = scope.clone();
        spawn(async move {
            busy.set(true);
            let outcome = scope.run(api.delete_category(category.id)).await;
            if let Some(notice) = apply_delete(
                &mut categories.write(),
                category.id,
                outcome,
                Operation::DeleteCategory,
            ) {
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
                h1 { "Kategori" }
                button {
                    class: "btn btn--primary",
                    onclick: move |_| editing.set(Some(Editing::New)),
                    Icon { icon: FaPlus, width: 12, height: 12 }
                    span { "Tambah kategori" }
                }
            }

            if loading() {
                p { class: "muted", "Memuat kategori..." }
            } else if categories.read().is_empty() {
                p { class: "muted", "Belum ada kategori." }
            } else {
                table {
                    class: "table",
                    thead {
                        tr {
                            th { "Nama" }
                            th { "Deskripsi" }
                            th { class: "table__actions", "" }
                        }
                    }
                    tbody {
                        for category in categories() {
                            tr {
                                key: "{category.id}",
                                td { "{category.name}" }
                                td { class: "muted", {category.description.clone().unwrap_or_default()} }
                                td {
                                    class: "table__actions",
                                    button {
                                        class: "btn btn--ghost",
                                        aria_label: "Ubah",
                                        onclick: {
                                            let category = category.clone();
                                            move |_| editing.set(Some(Editing::Existing(category.clone())))
                                        },
                                        Icon { icon: FaPen, width: 12, height: 12 }
                                    }
                                    button {
                                        class: "btn btn--ghost btn--danger-text",
                                        aria_label: "Hapus",
                                        onclick: {
                                            let category = category.clone();
                                            move |_| deleting.set(Some(category.clone()))
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
                CategoryDialog {
                    target: target,
                    on_saved: move |category: Category| {
                        upsert(&mut categories.write(), category);
                        notifier.success(Operation::SaveCategory);
                        editing.set(None);
                    },
                    on_close: move |_| editing.set(None),
                }
            }

            if let Some(category) = deleting() {
                ConfirmDialog {
                    title: "Hapus kategori",
                    message: format!("Hapus kategori \"{}\"?", category.name),
                    busy: busy(),
                    on_confirm: confirm_delete,
                    on_cancel: move |_| deleting.set(None),
                }
            }
        }
    }
}

#[component]
fn CategoryDialog(
    target: Editing<Category>,
    on_saved: EventHandler<Category>,
    on_close: EventHandler<()>,
) -> Element {
    let api = use_api();
    let scope = use_request_scope();
    let notifier = use_notifier();

    let existing = target.existing().cloned();
    let title = if existing.is_some() { "Ubah kategori" } else { "Tambah kategori" };

    let mut name = use_signal(|| existing.as_ref().map(|c| c.name.clone()).unwrap_or_default());
    let mut description = use_signal(|| {
        existing
            .as_ref()
            .and_then(|c| c.description.clone())
            .unwrap_or_default()
    });
    let mut error = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let api = api.clone();
        let scope = scope.clone();
        let existing = existing.clone();
        async move {
            let form = CategoryForm {
                name: name().trim().to_string(),
                description: Some(description().trim().to_string()).filter(|d| !d.is_empty()),
            };
            if form.name.is_empty() {
                error.set(Some("Nama kategori wajib diisi".to_string()));
                return;
            }
            busy.set(true);
            let outcome = match &existing {
                None => scope.run(api.create_category(&form)).await,
                Some(category) => scope.run(api.update_category(category.id, &form)).await,
            };
            busy.set(false);
            match outcome {
                Ok(category) => on_saved.call(category),
                Err(e) => {
                    error.set(Some(e.summary()));
                    notifier.failure(Operation::SaveCategory, &e);
                }
            }
        }
    };

    rsx! {
        ModalOverlay {
            title: title.to_string(),
            on_close: move |_| on_close.call(()),
            form {
                class: "form",
                onsubmit: onsubmit,
                TextField { label: "Nama", required: true, value: name(), oninput: move |v| name.set(v) }
                TextAreaField { label: "Deskripsi", value: description(), oninput: move |v| description.set(v) }
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
