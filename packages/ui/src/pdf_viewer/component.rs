use api::{PdfSource, RequestScope};
use dioxus::prelude::*;

use super::lifecycle::{AssetLifecycle, FetchTicket, Resolution, ViewerState};
use super::object_url::PlatformUrls;
use crate::icons::{FaDownload, FaRotateRight, FaXmark};
use crate::notify::{use_notifier, Notifier, Operation};
use crate::session::{use_api, use_request_scope, AppClient};
use crate::Icon;

type Lifecycle = Signal<AssetLifecycle<PlatformUrls>>;

fn begin_fetch(
    api: AppClient,
    scope: RequestScope,
    notifier: Notifier,
    mut lifecycle: Lifecycle,
    ticket: FetchTicket,
) {
    spawn(async move {
        let result = scope.run(api.fetch_pdf(&ticket.source)).await;
        let resolution = match lifecycle.try_write() {
            Ok(mut viewer) => viewer.resolve(ticket, result),
            Err(_) => return,
        };
        if let Resolution::Failed(err) = resolution {
            notifier.failure(Operation::OpenPdf, &err);
        }
    });
}

/// Inline PDF viewer. Fetches `source` on mount and releases the document
/// when closed or unmounted. Key it by source to view another document.
#[component]
pub fn PdfViewer(
    source: PdfSource,
    title: String,
    #[props(default)] download_name: Option<String>,
    on_close: EventHandler<()>,
) -> Element {
    let api = use_api();
    let scope = use_request_scope();
    let notifier = use_notifier();

    let mut first_ticket = None;
    let mut lifecycle = use_signal(|| {
        let mut viewer = AssetLifecycle::new(PlatformUrls::default());
        first_ticket = Some(viewer.request(source.clone()));
        viewer
    });

    use_hook({
        let api = api.clone();
        let scope = scope.clone();
        move || {
            if let Some(ticket) = first_ticket {
                begin_fetch(api, scope, notifier, lifecycle, ticket);
            }
        }
    });

    use_drop(move || {
        if let Ok(mut viewer) = lifecycle.try_write() {
            viewer.close();
        }
    });

    let on_retry = move |_: MouseEvent| {
        let ticket = lifecycle.write().retry();
        if let Some(ticket) = ticket {
            begin_fetch(api.clone(), scope.clone(), notifier, lifecycle, ticket);
        }
    };

    let state = lifecycle.read().state().clone();
    let file_name = download_name.unwrap_or_else(|| format!("{title}.pdf"));

    rsx! {
        section {
            class: "pdf-viewer",
            header {
                class: "pdf-viewer__header",
                h3 { "{title}" }
                div {
                    class: "pdf-viewer__actions",
                    if let ViewerState::Ready { url } = &state {
                        a {
                            class: "btn btn--ghost",
                            href: "{url}",
                            download: "{file_name}",
                            Icon { icon: FaDownload, width: 14, height: 14 }
                            span { "Unduh" }
                        }
                    }
                    button {
                        class: "btn btn--ghost",
                        aria_label: "Tutup",
                        onclick: move |_| {
                            lifecycle.write().close();
                            on_close.call(());
                        },
                        Icon { icon: FaXmark, width: 14, height: 14 }
                    }
                }
            }
            div {
                class: "pdf-viewer__body",
                match state {
                    ViewerState::Idle => rsx! {
                        p { class: "muted", "Tidak ada dokumen yang dibuka" }
                    },
                    ViewerState::Loading => rsx! {
                        div { class: "spinner" }
                        p { class: "muted", "Memuat dokumen..." }
                    },
                    ViewerState::Ready { url } => rsx! {
                        iframe { class: "pdf-frame", src: "{url}", title: "{title}" }
                    },
                    ViewerState::Error { message, detail } => rsx! {
                        div {
                            class: "pdf-error",
                            p { "{message}" }
                            details {
                                summary { "Detail teknis" }
                                pre { "{detail}" }
                            }
                            button {
                                class: "btn",
                                onclick: on_retry,
                                Icon { icon: FaRotateRight, width: 14, height: 14 }
                                span { "Coba lagi" }
                            }
                        }
                    },
                }
            }
        }
    }
}
