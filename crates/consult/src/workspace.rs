use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Local;

use crate::errors::RenderError;

/// Handle over the directory artifacts are persisted into.
///
/// Constructed explicitly by the caller and injected into the renderer;
/// there is no process-global working directory. Artifact names carry a
/// monotonic sequence suffix so two documents can never collide, even for
/// the same agent within the same second.
#[derive(Debug)]
pub struct Workspace {
    root: PathBuf,
    seq: AtomicU64,
}

impl Workspace {
    /// Create the workspace directory if needed and return a handle to it.
    pub fn create(root: impl Into<PathBuf>) -> Result<Self, RenderError> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|e| RenderError::Workspace {
            path: root.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            root,
            seq: AtomicU64::new(0),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Next unique artifact path for the given agent and file extension.
    pub fn next_artifact_path(&self, agent_name: &str, extension: &str) -> PathBuf {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        self.root.join(format!(
            "{}_{}_{:03}.{}",
            agent_name.replace(' ', "_"),
            timestamp,
            seq,
            extension
        ))
    }
}
