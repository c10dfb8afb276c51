use async_trait::async_trait;
use pantrycam_providers::request::HttpRequest;
use pantrycam_providers::runtime::{self, HttpResponse};

/// Sends one request and returns whatever status came back.
///
/// Implementations only fail on transport problems; non-2xx statuses are
/// returned as responses so the pipeline can interpret them.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, req: &HttpRequest) -> anyhow::Result<HttpResponse>;
}

/// The live display the pipeline writes into.
pub trait OutputSurface: Send + Sync {
    fn show(&self, markup: &str);
    fn set_submit_enabled(&self, enabled: bool);
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            client: runtime::build_client()?,
        })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, req: &HttpRequest) -> anyhow::Result<HttpResponse> {
        log::debug!("dispatch {req:?}");
        runtime::execute(&self.client, req).await
    }
}
