//! PDF upload validation, text extraction and object storage.

use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Rejects empty uploads, non-PDF content types and bodies without a PDF header.
pub fn validate_pdf_upload(content_type: Option<&str>, data: &[u8]) -> Result<(), AppError> {
    if data.is_empty() {
        return Err(AppError::Validation("File is empty".to_string()));
    }

    let is_pdf_type = content_type
        .and_then(|ct| ct.split(';').next())
        .map(|ct| ct.trim().eq_ignore_ascii_case(PDF_CONTENT_TYPE))
        .unwrap_or(false);
    if !is_pdf_type {
        return Err(AppError::Validation("Only PDF files are allowed".to_string()));
    }

    if !data.starts_with(PDF_MAGIC) {
        return Err(AppError::UnprocessableEntity(
            "Uploaded file is not a valid PDF".to_string(),
        ));
    }
    Ok(())
}

/// Extracts the PDF's text on the blocking pool. Unreadable PDFs are a 422.
pub async fn extract_pdf_text(data: Bytes) -> Result<String, AppError> {
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data))
        .await
        .map_err(|e| {
            // the parser panics on some malformed documents
            if e.is_panic() {
                AppError::UnprocessableEntity("Could not read PDF".to_string())
            } else {
                AppError::Internal(anyhow::anyhow!("PDF extraction task failed: {e}"))
            }
        })?
        .map_err(|e| AppError::UnprocessableEntity(format!("Could not read PDF: {e}")))?;
    Ok(text.trim().to_string())
}

/// Object key for a student's uploaded résumé.
pub fn resume_object_key(student_id: Uuid) -> String {
    format!("resumes/{}/{}.pdf", student_id, Uuid::new_v4())
}

/// Uploads the PDF and returns its object key.
pub async fn upload_resume_pdf(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    student_id: Uuid,
    data: Bytes,
) -> Result<String, AppError> {
    let key = resume_object_key(student_id);
    let size = data.len();

    s3.put_object()
        .bucket(bucket)
        .key(&key)
        .body(ByteStream::from(data))
        .content_type(PDF_CONTENT_TYPE)
        .send()
        .await
        .map_err(|e| AppError::Storage(format!("S3 upload failed: {e}")))?;

    info!("Uploaded resume PDF ({size} bytes) to s3://{bucket}/{key}");
    Ok(key)
}
