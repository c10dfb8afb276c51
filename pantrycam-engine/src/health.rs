use crate::traits::HttpTransport;
use anyhow::anyhow;
use pantrycam_core::config::PipelineConfig;
use pantrycam_providers::health::build_health_request;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// One GET against the health URL. Any non-2xx status is an error.
pub async fn probe_health(transport: &dyn HttpTransport, url: &str) -> anyhow::Result<()> {
    let resp = transport.execute(&build_health_request(url)).await?;
    if !resp.is_success() {
        return Err(anyhow!(
            "health check returned {} {}",
            resp.status,
            resp.status_text
        ));
    }
    Ok(())
}

/// Fire-and-forget startup probe. Results are only logged.
pub fn spawn_health_probe(
    transport: Arc<dyn HttpTransport>,
    cfg: &PipelineConfig,
) -> Option<JoinHandle<()>> {
    let url = match cfg.health_url() {
        Ok(url) => url.to_string(),
        Err(e) => {
            log::warn!("skipping health probe: {e}");
            return None;
        }
    };

    Some(tokio::spawn(async move {
        match probe_health(transport.as_ref(), &url).await {
            Ok(()) => log::debug!("backend healthy at {url}"),
            Err(e) => log::warn!("backend health probe failed for {url}: {e:#}"),
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pantrycam_providers::request::HttpRequest;
    use pantrycam_providers::runtime::HttpResponse;
    use std::sync::Mutex;
    use url::Url;

    struct FixedStatus {
        status: u16,
        urls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl HttpTransport for FixedStatus {
        async fn execute(&self, req: &HttpRequest) -> anyhow::Result<HttpResponse> {
            self.urls.lock().unwrap().push(req.url.clone());
            Ok(HttpResponse {
                status: self.status,
                status_text: String::new(),
                body: br#"{"status":"ok"}"#.to_vec(),
            })
        }
    }

    fn fixed(status: u16) -> Arc<FixedStatus> {
        Arc::new(FixedStatus {
            status,
            urls: Mutex::new(vec![]),
        })
    }

    #[tokio::test]
    async fn probe_reports_status() {
        assert!(probe_health(fixed(200).as_ref(), "http://x/health").await.is_ok());
        assert!(probe_health(fixed(503).as_ref(), "http://x/health").await.is_err());
    }

    #[tokio::test]
    async fn spawned_probe_hits_derived_url_and_never_panics() {
        let transport = fixed(500);
        let cfg = PipelineConfig {
            detection_endpoint: Url::parse("http://localhost:5000/api/analyze").unwrap(),
            ..Default::default()
        };

        let handle = spawn_health_probe(transport.clone(), &cfg).unwrap();
        handle.await.unwrap();

        assert_eq!(
            *transport.urls.lock().unwrap(),
            vec!["http://localhost:5000/api/health".to_string()]
        );
    }

    #[tokio::test]
    async fn underivable_url_skips_probe() {
        let cfg = PipelineConfig {
            detection_endpoint: Url::parse("mailto:chef@example.com").unwrap(),
            ..Default::default()
        };
        assert!(spawn_health_probe(fixed(200), &cfg).is_none());
    }
}
