//! Single-image multipart uploads shared by the blog and service routes.

use actix_multipart::{Field, Multipart, MultipartError};
use actix_web::HttpResponse;
use futures::TryStreamExt;

use cms_core::ports::{ImageUpload, ObjectStore};
use cms_shared::UploadResponse;

use crate::middleware::{AppError, AppResult};

/// Multipart part carrying the image.
pub const FILE_FIELD: &str = "file";
/// Largest accepted image.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Read exactly one `file` part and hand it to `store` under `folder`.
///
/// Text parts are ignored. A second file, a file under another field name or
/// no file at all is a 400.
pub async fn store_single_file(
    store: &dyn ObjectStore,
    mut payload: Multipart,
    folder: &str,
) -> AppResult<HttpResponse> {
    let mut upload: Option<ImageUpload> = None;

    while let Some(mut field) = payload.try_next().await.map_err(malformed)? {
        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string);
        let Some(file_name) = file_name else {
            drain(&mut field).await?;
            continue;
        };

        let name = field.name().unwrap_or_default().to_string();
        if name != FILE_FIELD {
            return Err(AppError::BadRequest(format!("Unexpected field: {name}")));
        }
        if upload.is_some() {
            return Err(AppError::BadRequest(
                "Only one file may be uploaded per request".to_string(),
            ));
        }

        let content_type = field.content_type().map(|m| m.to_string());
        let bytes = read_limited(&mut field).await?;
        upload = Some(ImageUpload {
            folder: folder.to_string(),
            file_name,
            content_type,
            bytes,
        });
    }

    let upload = upload.ok_or_else(|| AppError::BadRequest("No file uploaded".to_string()))?;
    let size = upload.bytes.len();
    let stored = store.store(upload).await?;

    tracing::info!(folder, size, public_id = %stored.public_id, "Image uploaded");
    Ok(HttpResponse::Ok().json(UploadResponse::new(stored.url)))
}

async fn read_limited(field: &mut Field) -> AppResult<Vec<u8>> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.try_next().await.map_err(malformed)? {
        if bytes.len() + chunk.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::BadRequest(format!(
                "File too large (max {} MB)",
                MAX_UPLOAD_BYTES / (1024 * 1024)
            )));
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

async fn drain(field: &mut Field) -> AppResult<()> {
    while field.try_next().await.map_err(malformed)?.is_some() {}
    Ok(())
}

fn malformed(err: MultipartError) -> AppError {
    AppError::BadRequest(format!("Invalid multipart body: {err}"))
}
