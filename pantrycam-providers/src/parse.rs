use anyhow::Context;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DetectionResponse {
    #[serde(default)]
    pub success: bool,
    pub ingredients: Option<Vec<String>>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RecipeEntry {
    pub title: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
}

/// Recipe answer with its envelope read leniently.
///
/// Any JSON document decodes; `recipes` stays raw until `entries` is called, so
/// a malformed list never hides the `success`/`error` fields.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeResponse {
    pub success: bool,
    pub recipes: Option<Value>,
    pub total_found: Option<usize>,
    pub error: Option<String>,
    pub message: Option<String>,
}

impl RecipeResponse {
    /// Typed recipe list; `None` when the field is absent or null.
    pub fn entries(&self) -> anyhow::Result<Option<Vec<RecipeEntry>>> {
        self.recipes
            .as_ref()
            .map(|v| serde_json::from_value(v.clone()).context("decode recipe entries"))
            .transpose()
    }
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

pub fn parse_detection_response(body: &[u8]) -> anyhow::Result<DetectionResponse> {
    serde_json::from_slice(body).context("decode detection JSON")
}

/// Fails only when the body is not JSON at all.
pub fn parse_recipe_response(body: &[u8]) -> anyhow::Result<RecipeResponse> {
    let v: Value = serde_json::from_slice(body).context("decode recipe JSON")?;
    let text = |key: &str| v.get(key).and_then(Value::as_str).map(str::to_string);
    Ok(RecipeResponse {
        success: v.get("success").and_then(Value::as_bool).unwrap_or(false),
        recipes: v.get("recipes").filter(|r| !r.is_null()).cloned(),
        total_found: v
            .get("total_found")
            .and_then(Value::as_u64)
            .and_then(|n| usize::try_from(n).ok()),
        error: text("error"),
        message: text("message"),
    })
}

/// Best-effort `error` field from a failed response. Unparseable bodies count as `{}`.
pub fn error_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBody>(body)
        .unwrap_or_default()
        .error
        .filter(|e| !e.trim().is_empty())
}
