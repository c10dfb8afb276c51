use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(pub Uuid);

impl RunId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Short form is enough to correlate log lines of one run.
        let s = self.0.simple().to_string();
        f.write_str(&s[..8])
    }
}

/// A user-selected image file. Reading it is the Encoder's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageFile {
    pub path: PathBuf,
    pub mime_type: String,
}

impl ImageFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mime_type = mime_type_for(&path).to_string();
        Self { path, mime_type }
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".into())
    }
}

fn mime_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        _ => "application/octet-stream",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub prompt_text: Option<String>,
    pub image: Option<ImageFile>,
}

impl AnalysisRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt_text = Some(prompt.into());
        self
    }

    pub fn with_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.image = Some(ImageFile::new(path));
        self
    }

    /// Prompt text with surrounding whitespace removed; `None` if nothing is left.
    pub fn prompt(&self) -> Option<&str> {
        self.prompt_text
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.prompt().is_none() && self.image.is_none()
    }
}

/// Ingredient names in detection order. Duplicates are kept as received.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IngredientList(Vec<String>);

impl IngredientList {
    pub fn new(items: Vec<String>) -> Self {
        Self(items)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub title: String,
    pub ingredients: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub instructions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeResultSet {
    pub recipes: Vec<RecipeSummary>,
    pub total_found: usize,
}

impl RecipeResultSet {
    /// Keeps `total_found >= recipes.len()` even when the server under-reports.
    pub fn new(recipes: Vec<RecipeSummary>, total_found: Option<usize>) -> Self {
        let total_found = total_found.unwrap_or(recipes.len()).max(recipes.len());
        Self {
            recipes,
            total_found,
        }
    }
}

/// Terminal value of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PipelineOutcome {
    ValidationFailed,
    IngredientsEmpty,
    RecipesEmpty {
        ingredients: IngredientList,
    },
    Success {
        ingredients: IngredientList,
        recipes: RecipeResultSet,
    },
    Failed {
        reason: String,
    },
}

impl PipelineOutcome {
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::ValidationFailed => "validation_failed",
            Self::IngredientsEmpty => "ingredients_empty",
            Self::RecipesEmpty { .. } => "recipes_empty",
            Self::Success { .. } => "success",
            Self::Failed { .. } => "failed",
        }
    }
}
