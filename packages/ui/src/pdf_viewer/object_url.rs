//! Object URLs: browser handles to in-memory bytes.
//!
//! Every URL handed out by [`ObjectUrls::create`] pins its bytes until
//! [`ObjectUrls::revoke`] is called, so whoever creates one owns its release.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;
use std::time::Duration;

pub trait ObjectUrls {
    fn create(&self, bytes: &[u8], mime: &str) -> Result<String, String>;
    fn revoke(&self, url: &str);
}

/// In-memory stand-in that tracks which URLs are still live.
#[derive(Clone, Debug, Default)]
pub struct MemoryObjectUrls {
    live: Rc<RefCell<HashSet<String>>>,
    created: Rc<Cell<u64>>,
}

impl MemoryObjectUrls {
    pub fn new() -> Self {
        Self::default()
    }

    /// URLs created and not yet revoked.
    pub fn live(&self) -> usize {
        self.live.borrow().len()
    }

    pub fn created(&self) -> u64 {
        self.created.get()
    }

    pub fn is_live(&self, url: &str) -> bool {
        self.live.borrow().contains(url)
    }
}

impl ObjectUrls for MemoryObjectUrls {
    fn create(&self, _bytes: &[u8], _mime: &str) -> Result<String, String> {
        let n = self.created.get() + 1;
        self.created.set(n);
        let url = format!("blob:memory/{n}");
        self.live.borrow_mut().insert(url.clone());
        Ok(url)
    }

    fn revoke(&self, url: &str) {
        self.live.borrow_mut().remove(url);
    }
}

/// `URL.createObjectURL` over a `Blob`.
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BlobObjectUrls;

#[cfg(target_arch = "wasm32")]
impl ObjectUrls for BlobObjectUrls {
    fn create(&self, bytes: &[u8], mime: &str) -> Result<String, String> {
        let array = js_sys::Uint8Array::from(bytes);
        let parts = js_sys::Array::new();
        parts.push(&array);

        let options = web_sys::BlobPropertyBag::new();
        options.set_type(mime);
        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(|e| format!("{e:?}"))?;
        web_sys::Url::create_object_url_with_blob(&blob).map_err(|e| format!("{e:?}"))
    }

    fn revoke(&self, url: &str) {
        if let Err(e) = web_sys::Url::revoke_object_url(url) {
            tracing::warn!(url, "failed to revoke object URL: {:?}", e);
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub type PlatformUrls = BlobObjectUrls;
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformUrls = MemoryObjectUrls;

/// How long a download URL stays live after its click. Some browsers read
/// the blob only once the click handler has returned.
pub const DOWNLOAD_URL_GRACE: Duration = Duration::from_secs(1);

/// Hand `bytes` to the browser as a file download. The temporary URL is
/// revoked [`DOWNLOAD_URL_GRACE`] after the click has been dispatched.
pub async fn save_bytes<U: ObjectUrls>(
    urls: &U,
    bytes: &[u8],
    mime: &str,
    file_name: &str,
) -> Result<(), String> {
    let url = urls.create(bytes, mime)?;
    let clicked = trigger_download(&url, file_name);
    if clicked.is_ok() {
        crate::sleep(DOWNLOAD_URL_GRACE).await;
    }
    urls.revoke(&url);
    clicked
}

#[cfg(target_arch = "wasm32")]
fn trigger_download(url: &str, file_name: &str) -> Result<(), String> {
    use wasm_bindgen::JsCast;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| "no document".to_string())?;
    let anchor = document
        .create_element("a")
        .map_err(|e| format!("{e:?}"))?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| "not an anchor element".to_string())?;
    anchor.set_href(url);
    anchor.set_download(file_name);

    let body = document.body().ok_or_else(|| "no body".to_string())?;
    body.append_child(&anchor).map_err(|e| format!("{e:?}"))?;
    anchor.click();
    anchor.remove();
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn trigger_download(url: &str, file_name: &str) -> Result<(), String> {
    tracing::debug!(url, file_name, "download requested outside the browser");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_urls_are_unique_and_tracked() {
        let urls = MemoryObjectUrls::new();
        let a = urls.create(b"%PDF-", "application/pdf").unwrap();
        let b = urls.create(b"%PDF-", "application/pdf").unwrap();
        assert_ne!(a, b);
        assert_eq!(urls.live(), 2);

        urls.revoke(&a);
        assert!(!urls.is_live(&a));
        assert!(urls.is_live(&b));
        assert_eq!(urls.created(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_download_url_outlives_the_click() {
        let urls = MemoryObjectUrls::new();
        let saving = save_bytes(&urls, b"%PDF-1.7", "application/pdf", "modul.pdf");
        tokio::pin!(saving);

        let early = tokio::time::timeout(Duration::from_millis(10), &mut saving).await;
        assert!(early.is_err());
        assert_eq!(urls.live(), 1);

        saving.await.unwrap();
        assert_eq!(urls.created(), 1);
        assert_eq!(urls.live(), 0);
    }
}
