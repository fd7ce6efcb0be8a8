//! Dashboard shells for the two protected areas. Each one gates its whole
//! subtree on the session role before rendering the nested route.

use dioxus::prelude::*;
use store::Role;
use ui::icons::{FaBook, FaChalkboardUser, FaGauge, FaTags, FaUsers};
use ui::{use_session, Icon, LogoutButton, RequireRole};

use crate::Route;

#[derive(Clone, PartialEq)]
struct NavItem {
    label: &'static str,
    to: Route,
    icon: NavIcon,
}

#[derive(Clone, Copy, PartialEq)]
enum NavIcon {
    Overview,
    Users,
    Categories,
    Courses,
    Teaching,
}

#[component]
fn NavIconView(icon: NavIcon) -> Element {
    match icon {
        NavIcon::Overview => rsx! { Icon { icon: FaGauge, width: 14, height: 14 } },
        NavIcon::Users => rsx! { Icon { icon: FaUsers, width: 14, height: 14 } },
        NavIcon::Categories => rsx! { Icon { icon: FaTags, width: 14, height: 14 } },
        NavIcon::Courses => rsx! { Icon { icon: FaBook, width: 14, height: 14 } },
        NavIcon::Teaching => rsx! { Icon { icon: FaChalkboardUser, width: 14, height: 14 } },
    }
}

#[component]
fn DashboardShell(title: String, items: Vec<NavItem>) -> Element {
    let session = use_session();
    let role_label = session().role().map(|r| r.label()).unwrap_or_default();

    rsx! {
        div {
            class: "dashboard",
            nav {
                class: "dashboard__nav",
                div { class: "dashboard__brand", "{title}" }
                for item in items {
                    Link {
                        key: "{item.label}",
                        class: "dashboard__link",
                        active_class: "active",
                        to: item.to.clone(),
                        NavIconView { icon: item.icon }
                        span { "{item.label}" }
                    }
                }
                div {
                    class: "dashboard__footer",
                    p { class: "muted", "Masuk sebagai {role_label}" }
                    LogoutButton { class: "btn btn--ghost btn--block" }
                }
            }
            main {
                class: "dashboard__main",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
pub fn AdminLayout() -> Element {
    let items = vec![
        NavItem { label: "Ringkasan", to: Route::AdminOverview {}, icon: NavIcon::Overview },
        NavItem { label: "Pengguna", to: Route::UsersView {}, icon: NavIcon::Users },
        NavItem { label: "Kategori", to: Route::CategoriesView {}, icon: NavIcon::Categories },
        NavItem { label: "Kursus", to: Route::CoursesView {}, icon: NavIcon::Courses },
    ];

    rsx! {
        RequireRole {
            roles: vec![Role::Admin],
            DashboardShell { title: "Admin", items: items }
        }
    }
}

#[component]
pub fn InstructorLayout() -> Element {
    let items = vec![NavItem {
        label: "Kursus saya",
        to: Route::InstructorCourses {},
        icon: NavIcon::Teaching,
    }];

    rsx! {
        RequireRole {
            roles: vec![Role::Instruktur],
            DashboardShell { title: "Instruktur", items: items }
        }
    }
}
