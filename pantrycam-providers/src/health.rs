use crate::request::{Body, HttpRequest};

pub fn build_health_request(url: &str) -> HttpRequest {
    HttpRequest {
        method: "GET".into(),
        url: url.to_string(),
        headers: vec![("Accept".into(), "application/json".into())],
        body: Body::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_is_a_bodiless_get() {
        let req = build_health_request("http://localhost:5000/health");
        assert_eq!(req.method, "GET");
        assert_eq!(req.body, Body::Empty);
    }
}
