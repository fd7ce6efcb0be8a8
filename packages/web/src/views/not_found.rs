use dioxus::prelude::*;

use crate::Route;

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! {
        div {
            class: "auth-page",
            div {
                class: "auth-card",
                h1 { "Halaman tidak ditemukan" }
                p { class: "muted", "Tidak ada halaman di /{path}." }
                Link { class: "btn btn--primary btn--block", to: Route::LandingView {}, "Kembali ke beranda" }
            }
        }
    }
}
