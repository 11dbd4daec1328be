use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum size of a single secret document (64 KiB)
pub const MAX_SECRET_FILE_SIZE: u64 = 64 * 1024;

/// Maximum size of the tenant configuration file (10 MiB)
pub const MAX_TENANT_CONFIG_SIZE: u64 = 10 * 1024 * 1024;

/// Maximum length of a secret reference
const MAX_SECRET_REF_LENGTH: usize = 512;

/// Validates that a path exists and is a regular file (not a directory or symlink)
///
/// # Security
/// Uses `symlink_metadata()` so the link itself is inspected, not its target.
///
/// # Errors
/// Returns an error if:
/// - The path doesn't exist
/// - The path is a symbolic link
/// - The path is not a regular file
/// - The file is larger than `max_size` bytes
pub fn validate_regular_file(path: &Path, file_description: &str, max_size: u64) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to read {} metadata for {}: {}",
            file_description,
            path.display(),
            e
        )
    })?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, symbolic links are not allowed.",
            path.display()
        );
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    validate_file_size(metadata.len(), path, max_size)
}

/// Validates file size is within acceptable limits
///
/// # Errors
/// Returns an error if the file size exceeds the maximum
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            file_size,
            max_size
        );
    }
    Ok(())
}

/// Validates a secret reference before it is turned into a file name
///
/// References are looked up relative to the secrets directory, so anything
/// that could escape it is rejected.
///
/// # Errors
/// Returns an error if the reference is empty, too long, or contains path
/// separators, `..`, or control characters
pub fn validate_secret_ref(secret_ref: &str) -> Result<()> {
    if secret_ref.trim().is_empty() {
        anyhow::bail!("Secret reference cannot be empty");
    }

    if secret_ref.len() > MAX_SECRET_REF_LENGTH {
        anyhow::bail!(
            "Secret reference is too long ({} bytes). Maximum allowed: {} bytes",
            secret_ref.len(),
            MAX_SECRET_REF_LENGTH
        );
    }

    if secret_ref.contains('/') || secret_ref.contains('\\') {
        anyhow::bail!("Security: secret reference contains path separators which are not allowed");
    }

    if secret_ref.contains("..") {
        anyhow::bail!("Security: secret reference contains '..' which is not allowed");
    }

    if secret_ref.chars().any(char::is_control) {
        anyhow::bail!("Security: secret reference contains control characters");
    }

    Ok(())
}
