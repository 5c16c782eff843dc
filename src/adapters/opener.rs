use crate::domain::ports::FolderOpener;
use std::io;
use std::path::Path;
use std::process::Command;

/// Opens folders with the platform's file browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemOpener;

impl SystemOpener {
    fn program() -> &'static str {
        if cfg!(target_os = "windows") {
            "explorer"
        } else if cfg!(target_os = "macos") {
            "open"
        } else {
            "xdg-open"
        }
    }
}

impl FolderOpener for SystemOpener {
    fn open(&self, dir: &Path) -> io::Result<()> {
        let program = Self::program();
        tracing::debug!("Opening {} with {}", dir.display(), program);

        // explorer exits non-zero even on success, so only a failed spawn counts
        Command::new(program).arg(dir).spawn()?;
        Ok(())
    }
}

/// Does nothing. For embedding the workflow where no file browser exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopOpener;

impl FolderOpener for NoopOpener {
    fn open(&self, _dir: &Path) -> io::Result<()> {
        Ok(())
    }
}
