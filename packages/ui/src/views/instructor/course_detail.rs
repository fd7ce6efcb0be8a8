//! One course's PDF materials: list, upload, rename/replace, delete, view
//! and download.

use api::{Course, CoursePdf, FileUpload, PdfSource};
use dioxus::prelude::*;

use crate::forms::{FileField, FormError, TextField};
use crate::icons::{FaDownload, FaEye, FaPen, FaTrashCan, FaUpload};
use crate::lists::{apply_delete, upsert, use_remote_list};
use crate::notify::{use_notifier, Operation};
use crate::pdf_viewer::{is_pdf_like, save_pdf, PdfViewer, PlatformUrls};
use crate::session::{use_api, use_request_scope};
use crate::views::{ConfirmDialog, ModalOverlay};
use crate::Icon;

const PDF_ACCEPT: &str = ".pdf,application/pdf";

/// Checks a picked file before it is uploaded.
pub fn validate_pdf_upload(title: &str, file: Option<&FileUpload>, required: bool) -> Result<(), &'static str> {
    if title.trim().is_empty() {
        return Err("Judul materi wajib diisi");
    }
    match file {
        None if required => Err("Pilih berkas PDF terlebih dahulu"),
        Some(f) if !is_pdf_like(Some(&f.mime), &f.bytes) => Err("Berkas harus berupa PDF"),
        _ => Ok(()),
    }
}

/// The material shown in the side viewer.
///
/// `revision` moves whenever the open document's file is replaced, and the
/// viewer is keyed on it so the old object URL is released and the new file
/// fetched.
#[derive(Clone, Debug, PartialEq)]
pub struct OpenPdf {
    pub pdf: CoursePdf,
    revision: u32,
}

impl OpenPdf {
    pub fn new(pdf: CoursePdf) -> Self {
        Self { pdf, revision: 0 }
    }

    pub fn key(&self) -> String {
        format!("{}-{}", self.pdf.id, self.revision)
    }

    /// Take in a saved version of a material. Returns `false` when `saved`
    /// is a different document.
    pub fn apply_saved(&mut self, saved: CoursePdf, file_replaced: bool) -> bool {
        if saved.id != self.pdf.id {
            return false;
        }
        if file_replaced || saved.file_path != self.pdf.file_path {
            self.revision += 1;
        }
        self.pdf = saved;
        true
    }
}

#[component]
pub fn InstructorCourseDetail(course_id: i64) -> Element {
    let api = use_api();
    let scope = use_request_scope();
    let notifier = use_notifier();

    let mut course = use_signal(|| None::<Course>);
    use_hook({
        let api = api.clone();
        let scope = scope.clone();
        move || {
            spawn(async move {
                match scope.run(api.get_course(course_id)).await {
                    Ok(c) => course.set(Some(c)),
                    Err(e) => notifier.failure(Operation::LoadCourses, &e),
                }
            });
        }
    });

    let (mut pdfs, loading) = use_remote_list(Operation::LoadPdfs, move |api| async move {
        api.list_pdfs(course_id).await
    });
    let mut viewing = use_signal(|| None::<OpenPdf>);
    let mut renaming = use_signal(|| None::<CoursePdf>);
    let mut deleting = use_signal(|| None::<CoursePdf>);
    let mut busy = use_signal(|| false);
    let mut upload_round = use_signal(|| 0u32);

    let confirm_delete = {
        let api = api.clone();
        let scope = scope.clone();
        move |_: ()| {
            let Some(pdf) = deleting() else {
                return;
            };
            let api = api.clone();
            let scope = scope.clone();
            spawn(async move {
                busy.set(true);
                let outcome = scope.run(api.delete_pdf(pdf.id)).await;
                if outcome.is_ok() && viewing().is_some_and(|v| v.pdf.id == pdf.id) {
                    viewing.set(None);
                }
                if let Some(notice) = apply_delete(&mut pdfs.write(), pdf.id, outcome, Operation::DeletePdf) {
                    notifier.show(notice);
                }
                busy.set(false);
                deleting.set(None);
            });
        }
    };

    let download = move |pdf: CoursePdf| {
        let api = api.clone();
        let scope = scope.clone();
        spawn(async move {
            let outcome = match scope.run(api.fetch_pdf(&PdfSource::Api { pdf_id: pdf.id })).await {
                Ok(payload) => save_pdf(&PlatformUrls::default(), &payload, &pdf.download_name()).await,
                Err(e) => Err(e),
            };
            match outcome {
                Ok(()) => notifier.success(Operation::DownloadPdf),
                Err(e) => notifier.failure(Operation::DownloadPdf, &e),
            }
        });
    };

    let heading = course
        .read()
        .as_ref()
        .map(|c| c.title.clone())
        .unwrap_or_else(|| "Materi kursus".to_string());

    rsx! {
        div {
            class: "page",
            header {
                class: "page__header",
                div {
                    Link { class: "muted", to: "/instruktur", "← Kursus saya" }
                    h1 { "{heading}" }
                    if let Some(description) = course.read().as_ref().and_then(|c| c.description.clone()) {
                        p { class: "muted", "{description}" }
                    }
                }
            }

            div {
                class: "split",
                div {
                    class: "split__main",
                    PdfUploadForm {
                        key: "{upload_round}",
                        course_id: course_id,
                        on_uploaded: move |pdf: CoursePdf| {
                            upsert(&mut pdfs.write(), pdf);
                            notifier.success(Operation::UploadPdf);
                            upload_round += 1;
                        },
                    }

                    if loading() {
                        p { class: "muted", "Memuat materi..." }
                    } else if pdfs.read().is_empty() {
                        p { class: "muted", "Belum ada materi PDF untuk kursus ini." }
                    } else {
                        ul {
                            class: "pdf-list",
                            for pdf in pdfs() {
                                li {
                                    key: "{pdf.id}",
                                    class: if viewing().is_some_and(|v| v.pdf.id == pdf.id) { "pdf-list__item pdf-list__item--active" } else { "pdf-list__item" },
                                    div {
                                        class: "pdf-list__title",
                                        strong { "{pdf.title}" }
                                        if let Some(created) = pdf.created_at.as_deref() {
                                            span { class: "muted", "{created}" }
                                        }
                                    }
                                    div {
                                        class: "pdf-list__actions",
                                        button {
                                            class: "btn btn--ghost",
                                            aria_label: "Lihat",
                                            onclick: {
                                                let pdf = pdf.clone();
                                                move |_| viewing.set(Some(OpenPdf::new(pdf.clone())))
                                            },
                                            Icon { icon: FaEye, width: 12, height: 12 }
                                        }
                                        button {
                                            class: "btn btn--ghost",
                                            aria_label: "Unduh",
                                            onclick: {
                                                let pdf = pdf.clone();
                                                let download = download.clone();
                                                move |_| download(pdf.clone())
                                            },
                                            Icon { icon: FaDownload, width: 12, height: 12 }
                                        }
                                        button {
                                            class: "btn btn--ghost",
                                            aria_label: "Ubah",
                                            onclick: {
                                                let pdf = pdf.clone();
                                                move |_| renaming.set(Some(pdf.clone()))
                                            },
                                            Icon { icon: FaPen, width: 12, height: 12 }
                                        }
                                        button {
                                            class: "btn btn--ghost btn--danger-text",
                                            aria_label: "Hapus",
                                            onclick: {
                                                let pdf = pdf.clone();
                                                move |_| deleting.set(Some(pdf.clone()))
                                            },
                                            Icon { icon: FaTrashCan, width: 12, height: 12 }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }

                if let Some(open) = viewing() {
                    div {
                        key: "{open.key()}",
                        class: "split__side",
                        PdfViewer {
                            source: PdfSource::Api { pdf_id: open.pdf.id },
                            title: open.pdf.title.clone(),
                            download_name: open.pdf.download_name(),
                            on_close: move |_| viewing.set(None),
                        }
                    }
                }
            }

            if let Some(pdf) = renaming() {
                PdfEditDialog {
                    pdf: pdf,
                    on_saved: move |saved: SavedPdf| {
                        upsert(&mut pdfs.write(), saved.pdf.clone());
                        if let Some(open) = viewing.write().as_mut() {
                            open.apply_saved(saved.pdf, saved.file_replaced);
                        }
                        notifier.success(Operation::UpdatePdf);
                        renaming.set(None);
                    },
                    on_close: move |_| renaming.set(None),
                }
            }

            if let Some(pdf) = deleting() {
                ConfirmDialog {
                    title: "Hapus materi",
                    message: format!("Hapus materi \"{}\"?", pdf.title),
                    busy: busy(),
                    on_confirm: confirm_delete,
                    on_cancel: move |_| deleting.set(None),
                }
            }
        }
    }
}

#[component]
fn PdfUploadForm(course_id: i64, on_uploaded: EventHandler<CoursePdf>) -> Element {
    let api = use_api();
    let scope = use_request_scope();
    let notifier = use_notifier();

    let mut title = use_signal(String::new);
    let mut file = use_signal(|| None::<FileUpload>);
    let mut error = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let api = api.clone();
        let scope = scope.clone();
        async move {
            if let Err(message) = validate_pdf_upload(&title(), file.read().as_ref(), true) {
                error.set(Some(message.to_string()));
                return;
            }
            let Some(upload) = file() else {
                return;
            };
            busy.set(true);
            error.set(None);
            let outcome = scope.run(api.upload_pdf(course_id, title().trim(), upload)).await;
            busy.set(false);
            match outcome {
                Ok(pdf) => on_uploaded.call(pdf),
                Err(e) => {
                    error.set(Some(e.summary()));
                    notifier.failure(Operation::UploadPdf, &e);
                }
            }
        }
    };

    rsx! {
        form {
            class: "form form--card",
            onsubmit: onsubmit,
            h2 { "Unggah materi" }
            TextField { label: "Judul materi", required: true, value: title(), oninput: move |v| title.set(v) }
            FileField {
                label: "Berkas PDF",
                accept: PDF_ACCEPT.to_string(),
                on_pick: move |picked| file.set(picked),
            }
            FormError { message: error() }
            button {
                class: "btn btn--primary",
                r#type: "submit",
                disabled: busy(),
                Icon { icon: FaUpload, width: 12, height: 12 }
                span { if busy() { "Mengunggah..." } else { "Unggah" } }
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct SavedPdf {
    pdf: CoursePdf,
    file_replaced: bool,
}

#[component]
fn PdfEditDialog(pdf: CoursePdf, on_saved: EventHandler<SavedPdf>, on_close: EventHandler<()>) -> Element {
    let api = use_api();
    let scope = use_request_scope();
    let notifier = use_notifier();

    let pdf_id = pdf.id;
    let mut title = use_signal(|| pdf.title.clone());
    let mut file = use_signal(|| None::<FileUpload>);
    let mut error = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let api = api.clone();
        let scope = scope.clone();
        async move {
            if let Err(message) = validate_pdf_upload(&title(), file.read().as_ref(), false) {
                error.set(Some(message.to_string()));
                return;
            }
            busy.set(true);
            let replacement = file();
            let file_replaced = replacement.is_some();
            let outcome = scope.run(api.update_pdf(pdf_id, title().trim(), replacement)).await;
            busy.set(false);
            match outcome {
                Ok(pdf) => on_saved.call(SavedPdf { pdf, file_replaced }),
                Err(e) => {
                    error.set(Some(e.summary()));
                    notifier.failure(Operation::UpdatePdf, &e);
                }
            }
        }
    };

    rsx! {
        ModalOverlay {
            title: "Ubah materi",
            on_close: move |_| on_close.call(()),
            form {
                class: "form",
                onsubmit: onsubmit,
                TextField { label: "Judul materi", required: true, value: title(), oninput: move |v| title.set(v) }
                FileField {
                    label: "Ganti berkas (opsional)",
                    accept: PDF_ACCEPT.to_string(),
                    hint: "Kosongkan untuk mempertahankan berkas saat ini".to_string(),
                    on_pick: move |picked| file.set(picked),
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
