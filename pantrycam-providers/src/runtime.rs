use crate::request::{Body, FormPart, HttpRequest, PartValue};
use anyhow::{Context, anyhow};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::{Form, Part};

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    /// Canonical reason phrase for `status`, empty when unknown.
    pub status_text: String,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }
}

/// Shared client for all calls of a process.
///
/// No request timeout is configured; calls wait as long as the transport does.
pub fn build_client() -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .build()
        .context("build http client")
}

pub async fn execute(client: &reqwest::Client, req: &HttpRequest) -> anyhow::Result<HttpResponse> {
    let mut headers = HeaderMap::new();
    for (k, v) in &req.headers {
        let name = HeaderName::from_bytes(k.as_bytes())
            .with_context(|| format!("invalid header name: {k}"))?;
        let value =
            HeaderValue::from_str(v).with_context(|| format!("invalid header value for {k}"))?;
        headers.insert(name, value);
    }

    let builder = match req.method.as_str() {
        "GET" => client.get(&req.url),
        "POST" => client.post(&req.url),
        "PUT" => client.put(&req.url),
        "DELETE" => client.delete(&req.url),
        other => return Err(anyhow!("unsupported method: {other}")),
    }
    .headers(headers);

    let builder = match &req.body {
        Body::Empty => builder,
        Body::Json(s) => builder.body(s.clone()),
        Body::Multipart(parts) => builder.multipart(build_form(parts)?),
    };

    let resp = builder.send().await.context("http request failed")?;
    let status = resp.status();
    let status_text = status.canonical_reason().unwrap_or_default().to_string();
    let body = resp
        .bytes()
        .await
        .context("failed reading response body")?
        .to_vec();

    Ok(HttpResponse {
        status: status.as_u16(),
        status_text,
        body,
    })
}

fn build_form(parts: &[FormPart]) -> anyhow::Result<Form> {
    let mut form = Form::new();
    for p in parts {
        let part = match &p.value {
            PartValue::Text(t) => Part::text(t.clone()),
            PartValue::File {
                file_name,
                mime_type,
                content,
            } => Part::text(content.clone())
                .file_name(file_name.clone())
                .mime_str(mime_type)
                .with_context(|| format!("invalid mime type for part {}", p.name))?,
        };
        form = form.part(p.name.clone(), part);
    }
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_range_is_2xx() {
        let resp = |status| HttpResponse {
            status,
            status_text: String::new(),
            body: vec![],
        };
        assert!(resp(200).is_success());
        assert!(resp(204).is_success());
        assert!(!resp(302).is_success());
        assert!(!resp(500).is_success());
    }

    #[test]
    fn form_rejects_bad_mime() {
        let parts = vec![FormPart::file("image", "a.png", "not a mime", "AAAA")];
        assert!(build_form(&parts).is_err());
    }
}
