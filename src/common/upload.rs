use anyhow::{anyhow, Result};
use axum::extract::multipart::Field;
use futures_util::StreamExt;
use std::path::Path;
use time::OffsetDateTime;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{error, info};

const UPLOAD_DIR: &str = "uploads";

/// Streams an uploaded logo image to `{asset_root}/uploads/{millis}-{name}`
/// and returns the asset-root-relative path stored in the overlay record.
pub async fn save_logo_upload(asset_root: &str, mut field: Field<'_>) -> Result<String> {
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();

    if !content_type.starts_with("image/") {
        return Err(anyhow!("Invalid content type: only image/* allowed"));
    }

    let original_name = field
        .file_name()
        .map(sanitize_file_name)
        .unwrap_or_else(|| "logo".to_string());

    let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    let file_name = format!("{}-{}", millis, original_name);

    let dir = Path::new(asset_root).join(UPLOAD_DIR);
    fs::create_dir_all(&dir).await?;

    let dest = dir.join(&file_name);
    let mut file = fs::File::create(&dest).await?;

    while let Some(chunk) = field.next().await {
        let chunk = match chunk {
            Ok(c) => c,
            Err(e) => {
                error!("Upload stream error: {}", e);
                let _ = fs::remove_file(&dest).await;
                return Err(anyhow!("Stream interrupted"));
            }
        };
        file.write_all(&chunk).await?;
    }
    file.flush().await?;

    info!("Stored logo upload at {}", dest.display());
    Ok(format!("/{}/{}", UPLOAD_DIR, file_name))
}

fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::sanitize_file_name;

    #[test]
    fn sanitize_strips_path_separators() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), ".._.._etc_passwd");
        assert_eq!(sanitize_file_name("logo v2.png"), "logo_v2.png");
    }
}
