//! PDF materials: the retrieval lifecycle and the viewer built on it.

mod component;
mod lifecycle;
mod object_url;

pub use component::PdfViewer;
pub use lifecycle::{is_pdf_like, save_pdf, AssetLifecycle, FetchTicket, Resolution, ViewerState};
pub use object_url::{save_bytes, MemoryObjectUrls, ObjectUrls, PlatformUrls};
#[cfg(target_arch = "wasm32")]
pub use object_url::BlobObjectUrls;
