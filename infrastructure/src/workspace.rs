//! Workspace directory bootstrap
//!
//! The domain's [`WorkspaceLayout`] is pure path arithmetic; this is the one
//! place the directories actually get created, once at startup.

use maestro_domain::WorkspaceLayout;
use tracing::debug;

/// Create the workspace directory tree (inputs, separated, midi, outputs).
///
/// Idempotent; existing directories are left untouched.
pub fn bootstrap(layout: &WorkspaceLayout) -> std::io::Result<()> {
    for dir in layout.all_dirs() {
        std::fs::create_dir_all(&dir)?;
        debug!(dir = %dir.display(), "Workspace directory ready");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bootstrap_creates_all_directories() {
        let dir = tempfile::tempdir().unwrap();
        let layout = WorkspaceLayout::new(dir.path().join("workspace"));

        bootstrap(&layout).unwrap();

        assert!(layout.inputs_dir().is_dir());
        assert!(layout.separated_dir().is_dir());
        assert!(layout.midi_dir().is_dir());
        assert!(layout.outputs_dir().is_dir());
    }

    #[test]
    fn test_bootstrap_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let layout = WorkspaceLayout::new(dir.path());

        bootstrap(&layout).unwrap();
        bootstrap(&layout).unwrap();
    }
}
