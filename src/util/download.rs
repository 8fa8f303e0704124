//! Client-side file downloads for exported reports.
//!
//! The backend returns report bytes; the browser turns them into a file by
//! pointing a temporary `<a download>` at an object URL. The anchor is
//! attached for the click and the URL is revoked after [`REVOKE_DELAY`].

#[cfg(test)]
#[path = "download_test.rs"]
mod download_test;

use std::time::Duration;

use crate::net::types::ReportFormat;

/// How long the object URL outlives the click. Browsers start reading the
/// blob only after the clicking task yields.
pub const REVOKE_DELAY: Duration = Duration::from_secs(1);

/// Bytes returned by a download endpoint, ready to save.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Download {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// File name for an exported report, e.g. `protocol-3f2a.pdf`.
pub fn report_filename(prefix: &str, id: &str, format: ReportFormat) -> String {
    let stem: String = format!("{prefix}-{id}")
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    format!("{stem}.{}", format.as_str())
}

/// Save `download` through the browser. No-op outside the browser.
///
/// # Errors
///
/// Returns an error string if the DOM rejects blob or anchor creation.
pub fn save(download: &Download) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen::JsCast;

        let js_err = |e: wasm_bindgen::JsValue| format!("download failed: {e:?}");
        let bytes = js_sys::Uint8Array::from(download.bytes.as_slice());
        let sequence = js_sys::Array::of1(&bytes);
        let options = web_sys::BlobPropertyBag::new();
        options.set_type(&download.content_type);
        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&sequence, &options).map_err(js_err)?;
        let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(js_err)?;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| "download failed: no document".to_owned())?;
        let anchor = document
            .create_element("a")
            .map_err(js_err)?
            .dyn_into::<web_sys::HtmlAnchorElement>()
            .map_err(|_| "download failed: anchor element unavailable".to_owned())?;
        anchor.set_href(&url);
        anchor.set_download(&download.filename);
        let body = document.body().ok_or_else(|| "download failed: no document body".to_owned())?;
        body.append_child(&anchor).map_err(js_err)?;
        anchor.click();
        anchor.remove();
        crate::util::task::spawn(async move {
            crate::util::task::sleep(REVOKE_DELAY).await;
            if let Err(e) = web_sys::Url::revoke_object_url(&url) {
                log::warn!("download: revoking {url} failed: {e:?}");
            }
        });
        log::debug!("download: saved {} ({} bytes)", download.filename, download.bytes.len());
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = download;
        Ok(())
    }
}
