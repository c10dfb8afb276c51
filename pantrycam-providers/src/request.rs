use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpRequest {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Body,
}

impl std::fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Image payloads can be megabytes of base64; log their shape only.
        let body_summary = match &self.body {
            Body::Empty => "Empty".to_string(),
            Body::Json(s) => format!("Json(len={})", s.len()),
            Body::Multipart(parts) => {
                let parts: Vec<String> = parts
                    .iter()
                    .map(|p| match &p.value {
                        PartValue::Text(t) => format!("{}(text, len={})", p.name, t.len()),
                        PartValue::File {
                            file_name,
                            mime_type,
                            content,
                        } => format!(
                            "{}(file={}, type={}, len={})",
                            p.name,
                            file_name,
                            mime_type,
                            content.len()
                        ),
                    })
                    .collect();
                format!("Multipart[{}]", parts.join(", "))
            }
        };

        f.debug_struct("HttpRequest")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("headers", &self.headers)
            .field("body", &body_summary)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Body {
    Empty,
    Json(String),
    /// Form fields only. The runtime picks the boundary and sets Content-Type.
    Multipart(Vec<FormPart>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormPart {
    pub name: String,
    pub value: PartValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartValue {
    Text(String),
    File {
        file_name: String,
        mime_type: String,
        content: String,
    },
}

impl FormPart {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: PartValue::Text(value.into()),
        }
    }

    pub fn file(
        name: impl Into<String>,
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            value: PartValue::File {
                file_name: file_name.into(),
                mime_type: mime_type.into(),
                content: content.into(),
            },
        }
    }
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn part(&self, name: &str) -> Option<&FormPart> {
        match &self.body {
            Body::Multipart(parts) => parts.iter().find(|p| p.name == name),
            _ => None,
        }
    }
}
