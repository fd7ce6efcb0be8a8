//! Transient notifications.
//!
//! Every failed request ends up here as a [`Notice`]: an Indonesian title
//! naming the operation ("Gagal memuat kategori") and a short description of
//! the cause. Raw error text never reaches a toast.

use api::ApiError;
use dioxus::core::spawn_forever;
use dioxus::prelude::*;

const TOAST_LIFETIME_MS: u64 = 5_000;

/// User-facing operations, used to title notifications.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Login,
    Register,
    LoadUsers,
    SaveUser,
    DeleteUser,
    LoadCategories,
    SaveCategory,
    DeleteCategory,
    LoadCourses,
    SaveCourse,
    DeleteCourse,
    LoadPdfs,
    UploadPdf,
    UpdatePdf,
    DeletePdf,
    OpenPdf,
    DownloadPdf,
}

impl Operation {
    pub fn failure_title(&self) -> &'static str {
        match self {
            Operation::Login => "Gagal masuk",
            Operation::Register => "Gagal mendaftar",
            Operation::LoadUsers => "Gagal memuat pengguna",
            Operation::SaveUser => "Gagal menyimpan pengguna",
            Operation::DeleteUser => "Gagal menghapus pengguna",
            Operation::LoadCategories => "Gagal memuat kategori",
            Operation::SaveCategory => "Gagal menyimpan kategori",
            Operation::DeleteCategory => "Gagal menghapus kategori",
            Operation::LoadCourses => "Gagal memuat kursus",
            Operation::SaveCourse => "Gagal menyimpan kursus",
            Operation::DeleteCourse => "Gagal menghapus kursus",
            Operation::LoadPdfs => "Gagal memuat materi PDF",
            Operation::UploadPdf => "Gagal mengunggah PDF",
            Operation::UpdatePdf => "Gagal memperbarui PDF",
            Operation::DeletePdf => "Gagal menghapus PDF",
            Operation::OpenPdf => "Gagal membuka PDF",
            Operation::DownloadPdf => "Gagal mengunduh PDF",
        }
    }

    pub fn success_title(&self) -> &'static str {
        match self {
            Operation::Login => "Berhasil masuk",
            Operation::Register => "Pendaftaran berhasil",
            Operation::SaveUser => "Pengguna disimpan",
            Operation::DeleteUser => "Pengguna dihapus",
            Operation::SaveCategory => "Kategori disimpan",
            Operation::DeleteCategory => "Kategori dihapus",
            Operation::SaveCourse => "Kursus disimpan",
            Operation::DeleteCourse => "Kursus dihapus",
            Operation::UploadPdf => "PDF diunggah",
            Operation::UpdatePdf => "PDF diperbarui",
            Operation::DeletePdf => "PDF dihapus",
            Operation::DownloadPdf => "Unduhan dimulai",
            Operation::LoadUsers
            | Operation::LoadCategories
            | Operation::LoadCourses
            | Operation::LoadPdfs
            | Operation::OpenPdf => "Data dimuat",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Failure,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub description: Option<String>,
}

impl Notice {
    pub fn success(op: Operation) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: op.success_title().to_string(),
            description: None,
        }
    }

    /// `None` for cancelled requests: the view that asked is gone.
    pub fn failure(op: Operation, err: &ApiError) -> Option<Self> {
        if err.is_cancelled() {
            return None;
        }
        Some(Self {
            kind: NoticeKind::Failure,
            title: op.failure_title().to_string(),
            description: Some(err.summary()),
        })
    }

    pub fn session_expired() -> Self {
        Self {
            kind: NoticeKind::Failure,
            title: "Sesi berakhir".to_string(),
            description: Some(ApiError::Unauthorized.summary()),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct ActiveNotice {
    id: u64,
    notice: Notice,
}

#[derive(Clone, Debug, Default, PartialEq)]
struct NoticeQueue {
    next_id: u64,
    active: Vec<ActiveNotice>,
}

/// Handle for raising notifications from any component under
/// [`NotificationHost`].
#[derive(Clone, Copy, PartialEq)]
pub struct Notifier {
    queue: Signal<NoticeQueue>,
}

pub fn use_notifier() -> Notifier {
    use_context::<Notifier>()
}

impl Notifier {
    pub fn show(&self, notice: Notice) {
        let mut queue = self.queue;
        let id = {
            let mut q = queue.write();
            let id = q.next_id;
            q.next_id += 1;
            q.active.push(ActiveNotice { id, notice });
            id
        };
        // Outlives the component that raised the notice.
        spawn_forever(async move {
            crate::sleep(std::time::Duration::from_millis(TOAST_LIFETIME_MS)).await;
            queue.write().active.retain(|n| n.id != id);
        });
    }

    pub fn success(&self, op: Operation) {
        self.show(Notice::success(op));
    }

    pub fn failure(&self, op: Operation, err: &ApiError) {
        if let Some(notice) = Notice::failure(op, err) {
            tracing::warn!(op = ?op, error = %err, "operation failed");
            self.show(notice);
        }
    }

    fn dismiss(&self, id: u64) {
        let mut queue = self.queue;
        queue.write().active.retain(|n| n.id != id);
    }
}

/// Provides [`Notifier`] to its children and renders the toast stack.
#[component]
pub fn NotificationHost(children: Element) -> Element {
    let queue = use_signal(NoticeQueue::default);
    let notifier = use_context_provider(|| Notifier { queue });

    let active = queue().active;

    rsx! {
        {children}

        div {
            class: "toast-stack",
            for entry in active {
                div {
                    key: "{entry.id}",
                    class: match entry.notice.kind {
                        NoticeKind::Success => "toast toast--success",
                        NoticeKind::Failure => "toast toast--failure",
                    },
                    role: "status",
                    div {
                        class: "toast-body",
                        strong { "{entry.notice.title}" }
                        if let Some(description) = entry.notice.description.clone() {
                            p { "{description}" }
                        }
                    }
                    button {
                        class: "toast-close",
                        aria_label: "Tutup",
                        onclick: move |_| notifier.dismiss(entry.id),
                        "×"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::testing::{html, settle};

    #[component]
    fn Announcer() -> Element {
        let notifier = use_notifier();
        use_effect(move || notifier.success(Operation::SaveCategory));
        rsx! {}
    }

    fn toast_app() -> Element {
        rsx! {
            NotificationHost { Announcer {} }
        }
    }

    #[test]
    fn test_failure_notice_names_operation_and_cause() {
        let notice = Notice::failure(Operation::LoadCategories, &ApiError::Transport("dns".into()))
            .unwrap();
        assert_eq!(notice.kind, NoticeKind::Failure);
        assert_eq!(notice.title, "Gagal memuat kategori");
        assert_eq!(notice.description.as_deref(), Some("Tidak dapat terhubung ke server"));
    }

    #[test]
    fn test_cancelled_requests_are_silent() {
        assert_eq!(Notice::failure(Operation::OpenPdf, &ApiError::Cancelled), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_toasts_expire_after_their_lifetime() {
        let mut dom = VirtualDom::new(toast_app);
        dom.rebuild_in_place();
        settle(&mut dom).await;
        assert!(html(&dom).contains("Kategori disimpan"));

        tokio::time::advance(Duration::from_millis(TOAST_LIFETIME_MS)).await;
        settle(&mut dom).await;
        assert!(!html(&dom).contains("Kategori disimpan"));
    }
}
