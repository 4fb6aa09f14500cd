//! Small filesystem helpers shared by the config and inventory stores.

use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::{Error, Result};

/// Write `content` to `path` by writing a sibling temp file and renaming it over.
///
/// Creates parent directories as needed. Readers never see a half-written file.
pub async fn write_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await.map_err(|e| persistence(parent, e))?;
    }

    let temp_path = temp_path_for(path);

    let mut file = fs::File::create(&temp_path)
        .await
        .map_err(|e| persistence(&temp_path, e))?;
    file.write_all(content.as_bytes())
        .await
        .map_err(|e| persistence(&temp_path, e))?;
    file.sync_all()
        .await
        .map_err(|e| persistence(&temp_path, e))?;
    drop(file);

    fs::rename(&temp_path, path)
        .await
        .map_err(|e| persistence(path, e))
}

/// Expand a leading `~/` to the home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

pub(crate) fn persistence(path: &Path, source: std::io::Error) -> Error {
    Error::Persistence {
        path: path.to_path_buf(),
        source,
    }
}
