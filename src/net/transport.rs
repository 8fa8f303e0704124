//! HTTP transport seam.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side and native tests: [`HttpTransport`] reports the call as
//! unavailable; tests substitute their own [`Transport`].

use super::error::ApiError;
use super::request::ApiRequest;
#[cfg(feature = "hydrate")]
use super::request::{Body, FormPart, Method};

/// Status line, content type and body of a completed HTTP exchange.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RawResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one [`ApiRequest`] and returns whatever came back, success or not.
///
/// Implementations only fail for transport-level problems; non-2xx statuses
/// are returned as responses and turned into errors by the caller.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse, ApiError>;
}

/// Browser `fetch` transport rooted at the API base URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpTransport {
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            send_fetch(&self.base_url, request).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = request;
            Err(ApiError::unavailable())
        }
    }
}

#[cfg(feature = "hydrate")]
async fn send_fetch(base_url: &str, request: &ApiRequest) -> Result<RawResponse, ApiError> {
    use gloo_net::http::Request;

    let url = request.url(base_url);
    let builder = match request.method {
        Method::Get => Request::get(&url),
        Method::Post => Request::post(&url),
        Method::Put => Request::put(&url),
        Method::Delete => Request::delete(&url),
    }
    .query(request.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));

    log::debug!("api: {} {}", request.method.as_str(), url);
    let sent = match &request.body {
        Body::Empty => builder.send().await,
        Body::Json(value) => builder.json(value).map_err(ApiError::network)?.send().await,
        Body::Multipart(parts) => {
            let form = build_form_data(parts)?;
            builder.body(form).map_err(ApiError::network)?.send().await
        }
    };
    let resp = sent.map_err(ApiError::network)?;

    let status = resp.status();
    let status_text = resp.status_text();
    let content_type = resp.headers().get("content-type");
    let body = resp.binary().await.map_err(ApiError::network)?;
    Ok(RawResponse { status, status_text, content_type, body })
}

#[cfg(feature = "hydrate")]
fn build_form_data(parts: &[FormPart]) -> Result<web_sys::FormData, ApiError> {
    let js_err = |e: wasm_bindgen::JsValue| ApiError::new(format!("could not build upload: {e:?}"));
    let form = web_sys::FormData::new().map_err(js_err)?;
    for part in parts {
        match part {
            FormPart::Text { name, value } => form.append_with_str(name, value).map_err(js_err)?,
            FormPart::File { name, file } => {
                let bytes = js_sys::Uint8Array::from(file.bytes.as_slice());
                let sequence = js_sys::Array::of1(&bytes);
                let options = web_sys::BlobPropertyBag::new();
                options.set_type(&file.content_type);
                let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&sequence, &options)
                    .map_err(js_err)?;
                form.append_with_blob_and_filename(name, &blob, &file.filename)
                    .map_err(js_err)?;
            }
        }
    }
    Ok(form)
}
