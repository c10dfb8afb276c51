use crate::request::{Body, FormPart, HttpRequest};

/// Encoded photo ready for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub file_name: String,
    pub mime_type: String,
    /// Base64 of the raw file bytes, no data-URI prefix.
    pub base64: String,
}

/// Builds the ingredient-detection call.
///
/// Only the fields that are present go into the form. No Content-Type header is
/// set here so the runtime can pick the multipart boundary.
pub fn build_detection_request(
    endpoint: &str,
    image: Option<&ImagePayload>,
    prompt: Option<&str>,
) -> HttpRequest {
    let mut parts = Vec::new();

    if let Some(image) = image {
        parts.push(FormPart::file(
            "image",
            &image.file_name,
            &image.mime_type,
            &image.base64,
        ));
    }

    if let Some(prompt) = prompt.filter(|s| !s.trim().is_empty()) {
        parts.push(FormPart::text("prompt", prompt));
    }

    HttpRequest {
        method: "POST".into(),
        url: endpoint.to_string(),
        headers: vec![("Accept".into(), "application/json".into())],
        body: Body::Multipart(parts),
    }
}
