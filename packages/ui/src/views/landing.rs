//! Public landing page: hero section and the published course catalogue.

use api::{Course, Role};
use dioxus::prelude::*;

use crate::icons::{FaBookOpen, FaChalkboardUser};
use crate::lists::use_remote_list;
use crate::notify::Operation;
use crate::session::{use_api, use_session, LogoutButton};
use crate::Icon;

#[component]
pub fn LandingView() -> Element {
    let session = use_session();
    let (courses, loading) =
        use_remote_list(Operation::LoadCourses, |api| async move { api.list_public_courses().await });

    let cta = match session().role() {
        Some(Role::User) => rsx! {
            p { class: "muted", "Anda sudah masuk." }
            LogoutButton { class: "btn btn--ghost" }
        },
        Some(role) => rsx! {
            Link { class: "btn btn--primary", to: role.home_route(), "Buka dasbor" }
        },
        None => rsx! {
            Link { class: "btn btn--primary", to: "/register", "Mulai belajar" }
            Link { class: "btn btn--ghost", to: "/login", "Masuk" }
        },
    };

    rsx! {
        main {
            class: "landing",
            section {
                class: "hero",
                div {
                    class: "hero__text",
                    h1 { "Belajar dari instruktur terbaik, kapan saja." }
                    p {
                        "Materi kursus dalam bentuk PDF yang bisa dibaca langsung di peramban "
                        "atau diunduh untuk dipelajari nanti."
                    }
                    div { class: "hero__actions", {cta} }
                }
                div {
                    class: "hero__art",
                    Icon { icon: FaChalkboardUser, width: 120, height: 120 }
                }
            }

            section {
                class: "catalogue",
                h2 { "Kursus tersedia" }
                if loading() {
                    p { class: "muted", "Memuat kursus..." }
                } else if courses.read().is_empty() {
                    p { class: "muted", "Belum ada kursus yang diterbitkan." }
                } else {
                    div {
                        class: "course-grid",
                        for course in courses() {
                            CourseCard { key: "{course.id}", course: course }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn CourseCard(course: Course) -> Element {
    let api = use_api();
    let thumbnail = course
        .thumbnail
        .as_deref()
        .filter(|t| !t.is_empty())
        .map(|t| api.config().storage_url(t));

    rsx! {
        article {
            class: "course-card",
            if let Some(src) = thumbnail {
                img { class: "course-card__thumb", src: "{src}", alt: "{course.title}" }
            } else {
                div {
                    class: "course-card__thumb course-card__thumb--empty",
                    Icon { icon: FaBookOpen, width: 32, height: 32 }
                }
            }
            div {
                class: "course-card__body",
                if let Some(category) = course.category_name() {
                    span { class: "badge", "{category}" }
                }
                h3 { "{course.title}" }
                if let Some(description) = course.description.as_deref() {
                    p { class: "course-card__desc", "{description}" }
                }
                if let Some(instructor) = course.instructor_name() {
                    p { class: "muted", "Instruktur: {instructor}" }
                }
            }
        }
    }
}
