use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use pantrycam_core::types::ImageFile;
use pantrycam_providers::detection::ImagePayload;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("could not read image {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Reads the selected file and base64-encodes its raw bytes.
///
/// The result carries no `data:` prefix. Reading is the only side effect.
pub async fn encode_image(image: &ImageFile) -> Result<ImagePayload, EncodeError> {
    let bytes = tokio::fs::read(&image.path)
        .await
        .map_err(|source| EncodeError::Read {
            path: image.path.clone(),
            source,
        })?;

    log::debug!("encoded {} ({} bytes)", image.path.display(), bytes.len());

    Ok(ImagePayload {
        file_name: image.file_name(),
        mime_type: image.mime_type.clone(),
        base64: STANDARD.encode(&bytes),
    })
}
