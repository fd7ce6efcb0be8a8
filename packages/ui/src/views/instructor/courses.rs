use dioxus::prelude::*;

use crate::icons::{FaBookOpen, FaFilePdf};
use crate::lists::use_remote_list;
use crate::notify::Operation;
use crate::session::use_api;
use crate::Icon;

/// Courses assigned to the logged-in instructor.
#[component]
pub fn InstructorCourses() -> Element {
    let api = use_api();
    let (courses, loading) = use_remote_list(Operation::LoadCourses, |api| async move {
        api.list_instructor_courses().await
    });

    rsx! {
        div {
            class: "page",
            header { class: "page__header", h1 { "Kursus saya" } }
            if loading() {
                p { class: "muted", "Memuat kursus..." }
            } else if courses.read().is_empty() {
                p { class: "muted", "Anda belum memiliki kursus." }
            } else {
                div {
                    class: "course-grid",
                    for course in courses() {
                        Link {
                            key: "{course.id}",
                            class: "course-card course-card--link",
                            to: format!("/instruktur/courses/{}", course.id),
                            if let Some(thumb) = course.thumbnail.as_deref().filter(|t| !t.is_empty()) {
                                img {
                                    class: "course-card__thumb",
                                    src: api.config().storage_url(thumb),
                                    alt: "{course.title}",
                                }
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
                                span {
                                    class: "muted",
                                    Icon { icon: FaFilePdf, width: 12, height: 12 }
                                    " Kelola materi"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
