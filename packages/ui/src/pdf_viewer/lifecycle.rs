//! Fetch, display and release of one PDF document.
//!
//! ```text
//! Idle --request--> Loading --ok--> Ready { url }
//!                           \--err--> Error { message, detail }
//! Ready | Error --retry--> Loading
//! any --close--> Idle
//! ```
//!
//! Each request is stamped with a generation. A result whose generation is
//! no longer current (the viewer was closed, retried or pointed elsewhere in
//! the meantime) is dropped without touching the object URL pool.

use api::{ApiError, PdfPayload, PdfSource};

use super::object_url::{save_bytes, ObjectUrls};

const PDF_MIME: &str = "application/pdf";
const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Clone, Debug, Default, PartialEq)]
pub enum ViewerState {
    #[default]
    Idle,
    Loading,
    Ready {
        url: String,
    },
    Error {
        message: String,
        detail: String,
    },
}

/// Proof that a fetch was started; hand it back to [`AssetLifecycle::resolve`].
#[derive(Clone, Debug, PartialEq)]
pub struct FetchTicket {
    generation: u64,
    pub source: PdfSource,
}

#[derive(Debug, PartialEq)]
pub enum Resolution {
    Ready(String),
    Failed(ApiError),
    /// The ticket was superseded; nothing changed.
    Stale,
}

pub struct AssetLifecycle<U: ObjectUrls> {
    urls: U,
    state: ViewerState,
    source: Option<PdfSource>,
    generation: u64,
}

/// Whether a response can be shown as a PDF. Generic binary or untyped
/// responses are accepted only when the bytes carry the PDF header.
pub fn is_pdf_like(mime: Option<&str>, bytes: &[u8]) -> bool {
    let essence = mime
        .and_then(|m| m.split(';').next())
        .map(|m| m.trim().to_ascii_lowercase())
        .unwrap_or_default();
    match essence.as_str() {
        "application/pdf" | "application/x-pdf" | "application/acrobat" => true,
        "" | "application/octet-stream" => bytes.starts_with(PDF_MAGIC),
        _ => false,
    }
}

/// Save a fetched document as a file download through a temporary URL.
pub async fn save_pdf<U: ObjectUrls>(urls: &U, payload: &PdfPayload, file_name: &str) -> Result<(), ApiError> {
    if !is_pdf_like(payload.mime.as_deref(), &payload.bytes) {
        return Err(ApiError::NotPdf {
            mime: payload.mime.clone().unwrap_or_else(|| "unknown".to_string()),
        });
    }
    save_bytes(urls, &payload.bytes, PDF_MIME, file_name)
        .await
        .map_err(|detail| ApiError::Decode(format!("download: {detail}")))
}

impl<U: ObjectUrls> AssetLifecycle<U> {
    pub fn new(urls: U) -> Self {
        Self {
            urls,
            state: ViewerState::Idle,
            source: None,
            generation: 0,
        }
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn source(&self) -> Option<&PdfSource> {
        self.source.as_ref()
    }

    pub fn object_url(&self) -> Option<&str> {
        match &self.state {
            ViewerState::Ready { url } => Some(url),
            _ => None,
        }
    }

    pub fn request(&mut self, source: PdfSource) -> FetchTicket {
        self.release();
        self.generation += 1;
        self.source = Some(source.clone());
        self.state = ViewerState::Loading;
        FetchTicket {
            generation: self.generation,
            source,
        }
    }

    /// Restart the last request. `None` when nothing was ever requested.
    pub fn retry(&mut self) -> Option<FetchTicket> {
        let source = self.source.clone()?;
        Some(self.request(source))
    }

    pub fn resolve(
        &mut self,
        ticket: FetchTicket,
        result: Result<PdfPayload, ApiError>,
    ) -> Resolution {
        if ticket.generation != self.generation || self.state != ViewerState::Loading {
            tracing::debug!(source = ?ticket.source, "discarding superseded PDF response");
            return Resolution::Stale;
        }

        let payload = match result {
            Ok(payload) if is_pdf_like(payload.mime.as_deref(), &payload.bytes) => payload,
            Ok(payload) => {
                return self.fail(ApiError::NotPdf {
                    mime: payload.mime.unwrap_or_else(|| "unknown".to_string()),
                })
            }
            Err(e) => return self.fail(e),
        };

        self.release();
        match self.urls.create(&payload.bytes, PDF_MIME) {
            Ok(url) => {
                self.state = ViewerState::Ready { url: url.clone() };
                Resolution::Ready(url)
            }
            Err(detail) => self.fail(ApiError::Decode(format!("object URL: {detail}"))),
        }
    }

    pub fn close(&mut self) {
        self.release();
        self.generation += 1;
        self.source = None;
        self.state = ViewerState::Idle;
    }

    fn fail(&mut self, error: ApiError) -> Resolution {
        self.state = ViewerState::Error {
            message: error.summary(),
            detail: error.to_string(),
        };
        Resolution::Failed(error)
    }

    fn release(&mut self) {
        if let ViewerState::Ready { url } = &self.state {
            self.urls.revoke(url);
            self.state = ViewerState::Idle;
        }
    }
}

impl<U: ObjectUrls> Drop for AssetLifecycle<U> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf_viewer::MemoryObjectUrls;

    fn pdf() -> Result<PdfPayload, ApiError> {
        Ok(PdfPayload {
            bytes: b"%PDF-1.7 body".to_vec(),
            mime: Some("application/pdf".into()),
        })
    }

    fn source() -> PdfSource {
        PdfSource::Api { pdf_id: 7 }
    }

    #[test]
    fn test_success_creates_exactly_one_url() {
        let urls = MemoryObjectUrls::new();
        let mut viewer = AssetLifecycle::new(urls.clone());

        let ticket = viewer.request(source());
        assert_eq!(viewer.state(), &ViewerState::Loading);

        let Resolution::Ready(url) = viewer.resolve(ticket, pdf()) else {
            panic!("expected ready");
        };
        assert_eq!(urls.live(), 1);
        assert_eq!(viewer.object_url(), Some(url.as_str()));

        viewer.close();
        assert_eq!(urls.live(), 0);
        assert_eq!(viewer.state(), &ViewerState::Idle);
    }

    #[test]
    fn test_no_leak_across_cycles() {
        let urls = MemoryObjectUrls::new();
        let mut viewer = AssetLifecycle::new(urls.clone());

        for _ in 0..25 {
            let ticket = viewer.request(source());
            viewer.resolve(ticket, pdf());
            assert_eq!(urls.live(), 1);
            let ticket = viewer.retry().unwrap();
            assert_eq!(urls.live(), 0);
            viewer.resolve(ticket, pdf());
            viewer.close();
            assert_eq!(urls.live(), 0);
        }
        assert_eq!(urls.created(), 50);
    }

    #[test]
    fn test_late_response_after_close_is_discarded() {
        let urls = MemoryObjectUrls::new();
        let mut viewer = AssetLifecycle::new(urls.clone());

        let ticket = viewer.request(source());
        viewer.close();
        assert_eq!(viewer.resolve(ticket, pdf()), Resolution::Stale);
        assert_eq!(urls.created(), 0);
        assert_eq!(viewer.state(), &ViewerState::Idle);
    }

    #[test]
    fn test_superseded_request_is_discarded() {
        let urls = MemoryObjectUrls::new();
        let mut viewer = AssetLifecycle::new(urls.clone());

        let first = viewer.request(source());
        let second = viewer.request(PdfSource::Static {
            path: "pdfs/b.pdf".into(),
        });
        assert_eq!(viewer.resolve(first, pdf()), Resolution::Stale);
        assert!(matches!(viewer.resolve(second, pdf()), Resolution::Ready(_)));
        assert_eq!(urls.live(), 1);
    }

    #[test]
    fn test_non_pdf_response_is_an_error() {
        let urls = MemoryObjectUrls::new();
        let mut viewer = AssetLifecycle::new(urls.clone());

        let ticket = viewer.request(source());
        let html = Ok(PdfPayload {
            bytes: b"<html>login</html>".to_vec(),
            mime: Some("text/html; charset=utf-8".into()),
        });
        let resolution = viewer.resolve(ticket, html);

        assert!(matches!(resolution, Resolution::Failed(ApiError::NotPdf { .. })));
        assert!(matches!(viewer.state(), ViewerState::Error { .. }));
        assert_eq!(urls.created(), 0);
    }

    #[test]
    fn test_failure_keeps_source_for_retry() {
        let urls = MemoryObjectUrls::new();
        let mut viewer = AssetLifecycle::new(urls.clone());

        let ticket = viewer.request(source());
        viewer.resolve(ticket, Err(ApiError::Transport("reset".into())));
        let ViewerState::Error { message, detail } = viewer.state().clone() else {
            panic!("expected error");
        };
        assert_eq!(message, "Tidak dapat terhubung ke server");
        assert!(detail.contains("reset"));

        let ticket = viewer.retry().unwrap();
        assert_eq!(ticket.source, source());
        assert_eq!(viewer.state(), &ViewerState::Loading);
    }

    #[test]
    fn test_drop_releases_url() {
        let urls = MemoryObjectUrls::new();
        {
            let mut viewer = AssetLifecycle::new(urls.clone());
            let ticket = viewer.request(source());
            viewer.resolve(ticket, pdf());
            assert_eq!(urls.live(), 1);
        }
        assert_eq!(urls.live(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_save_pdf_leaves_no_url_behind() {
        let urls = MemoryObjectUrls::new();
        let payload = pdf().unwrap();
        save_pdf(&urls, &payload, "modul.pdf").await.unwrap();
        assert_eq!(urls.created(), 1);
        assert_eq!(urls.live(), 0);

        let html = PdfPayload {
            bytes: b"<html>".to_vec(),
            mime: Some("text/html".into()),
        };
        assert!(matches!(save_pdf(&urls, &html, "x.pdf").await, Err(ApiError::NotPdf { .. })));
        assert_eq!(urls.created(), 1);
    }

    #[test]
    fn test_pdf_detection() {
        assert!(is_pdf_like(Some("application/pdf"), b""));
        assert!(is_pdf_like(Some("Application/PDF; charset=binary"), b""));
        assert!(is_pdf_like(Some("application/x-pdf"), b""));
        assert!(is_pdf_like(Some("application/octet-stream"), b"%PDF-1.4"));
        assert!(is_pdf_like(None, b"%PDF-1.4"));
        assert!(!is_pdf_like(Some("application/octet-stream"), b"PK\x03\x04"));
        assert!(!is_pdf_like(None, b""));
        assert!(!is_pdf_like(Some("text/html"), b"%PDF-1.4"));
    }
}
