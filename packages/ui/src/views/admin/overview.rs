use dioxus::prelude::*;

use crate::icons::{FaBook, FaTags, FaUsers};
use crate::lists::use_remote_list;
use crate::notify::Operation;
use crate::Icon;

/// Admin home: headline counts with links into each management page.
#[component]
pub fn AdminOverview() -> Element {
    let (users, users_loading) =
        use_remote_list(Operation::LoadUsers, |api| async move { api.list_users().await });
    let (categories, categories_loading) =
        use_remote_list(Operation::LoadCategories, |api| async move { api.list_categories().await });
    let (courses, courses_loading) =
        use_remote_list(Operation::LoadCourses, |api| async move { api.list_courses().await });

    let count = |loading: bool, n: usize| if loading { "…".to_string() } else { n.to_string() };

    rsx! {
        div {
            class: "page",
            header { class: "page__header", h1 { "Dasbor admin" } }
            div {
                class: "stat-grid",
                Link {
                    class: "stat-card",
                    to: "/admin/users",
                    Icon { icon: FaUsers, width: 20, height: 20 }
                    strong { {count(users_loading(), users.read().len())} }
                    span { "Pengguna" }
                }
                Link {
                    class: "stat-card",
                    to: "/admin/categories",
                    Icon { icon: FaTags, width: 20, height: 20 }
                    strong { {count(categories_loading(), categories.read().len())} }
                    span { "Kategori" }
                }
                Link {
                    class: "stat-card",
                    to: "/admin/courses",
                    Icon { icon: FaBook, width: 20, height: 20 }
                    strong { {count(courses_loading(), courses.read().len())} }
                    span { "Kursus" }
                }
            }
        }
    }
}
