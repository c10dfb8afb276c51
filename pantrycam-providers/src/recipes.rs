use crate::request::{Body, HttpRequest};
use serde_json::json;

/// Builds the recipe-lookup call.
///
/// The body is an empty object: the recipe service works from the ingredients
/// it stored during detection, not from anything the client sends.
pub fn build_recipe_request(endpoint: &str) -> HttpRequest {
    HttpRequest {
        method: "POST".into(),
        url: endpoint.to_string(),
        headers: vec![
            ("Content-Type".into(), "application/json".into()),
            ("Accept".into(), "application/json".into()),
        ],
        body: Body::Json(json!({}).to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn posts_empty_json_object() {
        let req = build_recipe_request("http://localhost/get_recipes");
        assert_eq!(req.method, "POST");
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.body, Body::Json("{}".into()));
    }
}
