use api::{Category, Course, CourseForm, FileUpload, Role, User};
use dioxus::prelude::*;

use crate::forms::{FileField, FormError, SelectField, TextAreaField, TextField};
use crate::icons::{FaPen, FaPlus, FaTrashCan};
use crate::lists::{apply_delete, upsert, use_remote_list};
use crate::notify::{use_notifier, Operation};
use crate::session::{use_api, use_request_scope};
use crate::views::{ConfirmDialog, Editing, ModalOverlay};
use crate::Icon;

const THUMBNAIL_ACCEPT: &str = "image/png,image/jpeg,image/webp";

fn id_options<T>(items: &[T], id: impl Fn(&T) -> i64, label: impl Fn(&T) -> String) -> Vec<(String, String)> {
    items.iter().map(|i| (id(i).to_string(), label(i))).collect()
}

fn parse_id(value: &str) -> Option<i64> {
    value.parse().ok()
}

#[component]
pub fn CoursesView() -> Element {
    let api = use_api();
    let scope = use_request_scope();
    let notifier = use_notifier();
    let (mut courses, loading) =
        use_remote_list(Operation::LoadCourses, |api| async move { api.list_courses().await });
    let (categories, _) =
        use_remote_list(Operation::LoadCategories, |api| async move { api.list_categories().await });
    let (users, _) = use_remote_list(Operation::LoadUsers, |api| async move { api.list_users().await });
    let mut editing = use_signal(|| None::<Editing<Course>>);
    let mut deleting = use_signal(|| None::<Course>);
    let mut busy = use_signal(|| false);

    let confirm_delete = move |_: ()| {
        let Some(course) = deleting() else {
            return;
        };
        let api = api.clone();
        let scope = scope.clone();
        spawn(async move {
            busy.set(true);
            let outcome = scope.run(api.delete_course(course.id)).await;
            if let Some(notice) =
                apply_delete(&mut courses.write(), course.id, outcome, Operation::DeleteCourse)
            {
                notifier.show(notice);
            }
            busy.set(false);
            deleting.set(None);
        });
    };

    let instructors: Vec<User> = users
        .read()
        .iter()
        .filter(|u| u.role == Role::Instruktur)
        .cloned()
        .collect();

    rsx! {
        div {
            class: "page",
            header {
                class: "page__header",
                h1 { "Kursus" }
                button {
                    class: "btn btn--primary",
                    onclick: move |_| editing.set(Some(Editing::New)),
                    Icon { icon: FaPlus, width: 12, height: 12 }
                    span { "Tambah kursus" }
                }
            }

            if loading() {
                p { class: "muted", "Memuat kursus..." }
            } else if courses.read().is_empty() {
                p { class: "muted", "Belum ada kursus." }
            } else {
                table {
                    class: "table",
                    thead {
                        tr {
                            th { "Judul" }
                            th { "Kategori" }
                            th { "Instruktur" }
                            th { class: "table__actions", "" }
                        }
                    }
                    tbody {
                        for course in courses() {
                            tr {
                                key: "{course.id}",
                                td { "{course.title}" }
                                td { {course.category_name().unwrap_or("-").to_string()} }
                                td { {course.instructor_name().unwrap_or("-").to_string()} }
                                td {
                                    class: "table__actions",
                                    button {
                                        class: "btn btn--ghost",
                                        aria_label: "Ubah",
                                        onclick: {
                                            let course = course.clone();
                                            move |_| editing.set(Some(Editing::Existing(course.clone())))
                                        },
                                        Icon { icon: FaPen, width: 12, height: 12 }
                                    }
                                    button {
                                        class: "btn btn--ghost btn--danger-text",
                                        aria_label: "Hapus",
                                        onclick: {
                                            let course = course.clone();
                                            move |_| deleting.set(Some(course.clone()))
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
                CourseDialog {
                    target: target,
                    categories: categories(),
                    instructors: instructors,
                    on_saved: move |course: Course| {
                        upsert(&mut courses.write(), course);
                        notifier.success(Operation::SaveCourse);
                        editing.set(None);
                    },
                    on_close: move |_| editing.set(None),
                }
            }

            if let Some(course) = deleting() {
                ConfirmDialog {
                    title: "Hapus kursus",
                    message: format!("Hapus kursus \"{}\" beserta seluruh materinya?", course.title),
                    busy: busy(),
                    on_confirm: confirm_delete,
                    on_cancel: move |_| deleting.set(None),
                }
            }
        }
    }
}

#[component]
fn CourseDialog(
    target: Editing<Course>,
    categories: Vec<Category>,
    instructors: Vec<User>,
    on_saved: EventHandler<Course>,
    on_close: EventHandler<()>,
) -> Element {
    let api = use_api();
    let scope = use_request_scope();
    let notifier = use_notifier();

    let existing = target.existing().cloned();
    let title = if existing.is_some() { "Ubah kursus" } else { "Tambah kursus" };
    let initial = existing.as_ref().map(CourseForm::from_course).unwrap_or_default();

    let mut course_title = use_signal(|| initial.title.clone());
    let mut description = use_signal(|| initial.description.clone().unwrap_or_default());
    let mut category_id = use_signal(|| initial.category_id);
    let mut instructor_id = use_signal(|| initial.instructor_id);
    let mut thumbnail = use_signal(|| None::<FileUpload>);
    let mut error = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let api = api.clone();
        let scope = scope.clone();
        let existing = existing.clone();
        async move {
            let form = CourseForm {
                title: course_title().trim().to_string(),
                description: Some(description().trim().to_string()).filter(|d| !d.is_empty()),
                category_id: category_id(),
                instructor_id: instructor_id(),
            };
            if form.title.is_empty() {
                error.set(Some("Judul kursus wajib diisi".to_string()));
                return;
            }
            busy.set(true);
            let outcome = match &existing {
                None => scope.run(api.create_course(&form, thumbnail())).await,
                Some(course) => scope.run(api.update_course(course.id, &form, thumbnail())).await,
            };
            busy.set(false);
            match outcome {
                Ok(course) => on_saved.call(course),
                Err(e) => {
                    error.set(Some(e.summary()));
                    notifier.failure(Operation::SaveCourse, &e);
                }
            }
        }
    };

    let category_options = id_options(&categories, |c| c.id, |c| c.name.clone());
    let instructor_options = id_options(&instructors, |u| u.id, |u| u.name.clone());

    rsx! {
        ModalOverlay {
            title: title.to_string(),
            wide: true,
            on_close: move |_| on_close.call(()),
            form {
                class: "form",
                onsubmit: onsubmit,
                TextField {
                    label: "Judul",
                    required: true,
                    value: course_title(),
                    oninput: move |v| course_title.set(v),
                }
                TextAreaField { label: "Deskripsi", value: description(), oninput: move |v| description.set(v) }
                SelectField {
                    label: "Kategori",
                    value: category_id().map(|id| id.to_string()).unwrap_or_default(),
                    options: category_options,
                    placeholder: "Pilih kategori".to_string(),
                    onchange: move |v: String| category_id.set(parse_id(&v)),
                }
                SelectField {
                    label: "Instruktur",
                    value: instructor_id().map(|id| id.to_string()).unwrap_or_default(),
                    options: instructor_options,
                    placeholder: "Pilih instruktur".to_string(),
                    onchange: move |v: String| instructor_id.set(parse_id(&v)),
                }
                FileField {
                    label: "Thumbnail",
                    accept: THUMBNAIL_ACCEPT.to_string(),
                    hint: "Kosongkan untuk mempertahankan gambar saat ini".to_string(),
                    on_pick: move |file| thumbnail.set(file),
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
