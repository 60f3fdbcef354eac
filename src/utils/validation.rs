use anyhow::{Result, anyhow};

/// PDF magic bytes: `%PDF`
const PDF_SIGNATURE: &[u8] = &[0x25, 0x50, 0x44, 0x46];

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub code: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validates file size against the configured maximum
pub fn validate_file_size(size: usize, max_size: usize) -> Result<()> {
    if size == 0 {
        return Err(anyhow!(ValidationError {
            code: "EMPTY_FILE",
            message: "File appears to be empty".to_string(),
        }));
    }
    if size > max_size {
        return Err(anyhow!(ValidationError {
            code: "FILE_TOO_LARGE",
            message: format!(
                "File size {} bytes exceeds maximum allowed {} bytes ({} MB)",
                size,
                max_size,
                max_size / 1024 / 1024
            ),
        }));
    }
    Ok(())
}

/// Validates that the upload is a PDF: the declared content type (when
/// present) must be `application/pdf`, and the bytes must start with `%PDF`.
pub fn validate_pdf(content_type: Option<&str>, header: &[u8]) -> Result<()> {
    if let Some(declared) = content_type {
        let normalized = declared.split(';').next().unwrap_or("").trim().to_lowercase();
        if normalized != mime::APPLICATION_PDF.essence_str() {
            return Err(anyhow!(ValidationError {
                code: "INVALID_MIME_TYPE",
                message: format!("Content type '{}' is not allowed. Only PDF files are accepted.", declared),
            }));
        }
    }

    if !header.starts_with(PDF_SIGNATURE) {
        return Err(anyhow!(ValidationError {
            code: "NOT_A_PDF",
            message: "File content is not a PDF".to_string(),
        }));
    }

    Ok(())
}

/// Validates the document title: 3 to 255 characters after trimming
pub fn validate_title(title: &str) -> Result<String> {
    let trimmed = title.trim();
    let len = trimmed.chars().count();
    if !(3..=255).contains(&len) {
        return Err(anyhow!(ValidationError {
            code: "INVALID_TITLE",
            message: "Title must be between 3 and 255 characters".to_string(),
        }));
    }
    Ok(trimmed.to_string())
}

/// Validates the optional description: at most 2000 characters
pub fn validate_description(description: Option<&str>) -> Result<Option<String>> {
    match description {
        None => Ok(None),
        Some(d) => {
            let trimmed = d.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            if trimmed.chars().count() > 2000 {
                return Err(anyhow!(ValidationError {
                    code: "DESCRIPTION_TOO_LONG",
                    message: "Description cannot exceed 2000 characters".to_string(),
                }));
            }
            Ok(Some(trimmed.to_string()))
        }
    }
}

/// Full validation pipeline for an uploaded document
pub fn validate_upload(
    title: &str,
    description: Option<&str>,
    content_type: Option<&str>,
    bytes: &[u8],
    max_size: usize,
) -> Result<(String, Option<String>)> {
    validate_file_size(bytes.len(), max_size)?;
    validate_pdf(content_type, bytes)?;
    let title = validate_title(title)?;
    let description = validate_description(description)?;
    Ok((title, description))
}
