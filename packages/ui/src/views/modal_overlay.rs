use dioxus::prelude::*;

use crate::icons::FaXmark;
use crate::Icon;

/// A full-screen overlay that centers a titled dialog card.
/// Clicking outside the card triggers `on_close`.
#[component]
pub fn ModalOverlay(
    title: String,
    #[props(default)] wide: bool,
    on_close: EventHandler<()>,
    children: Element,
) -> Element {
    rsx! {
        div {
            class: "modal-backdrop",
            onclick: move |_| on_close.call(()),
            div {
                class: if wide { "modal modal--wide" } else { "modal" },
                role: "dialog",
                aria_modal: "true",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                header {
                    class: "modal__header",
                    h2 { "{title}" }
                    button {
                        class: "btn btn--ghost",
                        aria_label: "Tutup",
                        onclick: move |_| on_close.call(()),
                        Icon { icon: FaXmark, width: 14, height: 14 }
                    }
                }
                div { class: "modal__body", {children} }
            }
        }
    }
}

/// Yes/no dialog guarding destructive actions.
#[component]
pub fn ConfirmDialog(
    title: String,
    message: String,
    #[props(default = "Hapus".to_string())] confirm_label: String,
    #[props(default)] busy: bool,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    rsx! {
        ModalOverlay {
            title: title,
            on_close: move |_| on_cancel.call(()),
            p { class: "modal__message", "{message}" }
            div {
                class: "modal__actions",
                button {
                    class: "btn btn--ghost",
                    onclick: move |_| on_cancel.call(()),
                    "Batal"
                }
                button {
                    class: "btn btn--danger",
                    disabled: busy,
                    onclick: move |_| on_confirm.call(()),
                    if busy { "Memproses..." } else { "{confirm_label}" }
                }
            }
        }
    }
}
