use anyhow::Context;
use pantrycam_core::config::PipelineConfig;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Pipeline settings persisted as pretty JSON. Both directions validate, so a
/// stored file is always one the controller accepts.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> anyhow::Result<PipelineConfig> {
        let bytes = fs::read(&self.path)
            .with_context(|| format!("read config: {}", self.path.display()))?;
        let cfg: PipelineConfig = serde_json::from_slice(&bytes)
            .with_context(|| format!("decode config: {}", self.path.display()))?;
        cfg.validate()
            .with_context(|| format!("invalid config: {}", self.path.display()))?;
        Ok(cfg)
    }

    pub fn save(&self, cfg: &PipelineConfig) -> anyhow::Result<()> {
        cfg.validate().context("refusing to save invalid config")?;
        let json = serde_json::to_vec_pretty(cfg).context("encode config JSON")?;

        let dir = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                fs::create_dir_all(parent)
                    .with_context(|| format!("create config directory: {}", parent.display()))?;
                parent
            }
            None => Path::new("."),
        };

        // Temp file lives beside the target; persist is a rename.
        let mut tmp = NamedTempFile::new_in(dir)
            .with_context(|| format!("create temp file in {}", dir.display()))?;
        tmp.write_all(&json).context("write temp config")?;
        tmp.persist(&self.path)
            .map_err(|e| e.error)
            .with_context(|| format!("replace file: {}", self.path.display()))?;
        Ok(())
    }
}
