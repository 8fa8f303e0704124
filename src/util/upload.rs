//! Reading a user-picked file into an upload part.

#[cfg(test)]
#[path = "upload_test.rs"]
mod upload_test;

use crate::net::request::FilePart;

/// Upload content type for `filename`, by extension.
pub fn content_type_for(filename: &str) -> &'static str {
    let ext = filename.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase());
    match ext.as_deref() {
        Some("csv") => "text/csv",
        Some("tsv" | "tab") => "text/tab-separated-values",
        Some("txt") => "text/plain",
        Some("json") => "application/json",
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        Some("xls") => "application/vnd.ms-excel",
        Some("sav") => "application/x-spss-sav",
        Some("dta") => "application/x-stata-dta",
        _ => "application/octet-stream",
    }
}

/// Read the first file selected in a file `<input>` change event.
///
/// # Errors
///
/// Returns a message when no file is selected or it cannot be read.
pub async fn read_selected_file(ev: &leptos::ev::Event) -> Result<FilePart, String> {
    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen::JsCast;

        let input = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            .ok_or_else(|| "no file input".to_owned())?;
        let file = input
            .files()
            .and_then(|files| files.get(0))
            .ok_or_else(|| "no file selected".to_owned())?;
        let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
            .await
            .map_err(|e| format!("could not read {}: {e:?}", file.name()))?;
        let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
        // Let the same file be picked again after a failed upload.
        input.set_value("");
        let filename = file.name();
        let content_type = if file.type_().is_empty() {
            content_type_for(&filename).to_owned()
        } else {
            file.type_()
        };
        Ok(FilePart { filename, content_type, bytes })
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = ev;
        Err("not available outside the browser".to_owned())
    }
}
