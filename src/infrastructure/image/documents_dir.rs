//! Resolution of the public documents directory.

use std::path::{Path, PathBuf};

use directories::UserDirs;

/// Returns the directory images are saved to.
///
/// Order: explicit override, the platform documents directory, then
/// `<home>/Documents`.
#[must_use]
pub fn resolve_documents_dir(override_dir: Option<&Path>) -> Option<PathBuf> {
    if let Some(dir) = override_dir {
        return Some(dir.to_path_buf());
    }

    let user_dirs = UserDirs::new()?;
    Some(user_dirs.document_dir().map_or_else(
        || user_dirs.home_dir().join("Documents"),
        Path::to_path_buf,
    ))
}
