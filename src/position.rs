use anyhow::Result;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const FILE_NAME: &str = "window_position.txt";

/// Outer position of the main window, in logical points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowPosition {
    pub x: i32,
    pub y: i32,
}

impl Default for WindowPosition {
    fn default() -> Self {
        Self { x: 100, y: 100 }
    }
}

impl fmt::Display for WindowPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl WindowPosition {
    pub fn path() -> PathBuf {
        crate::config::exe_dir().join(FILE_NAME)
    }

    pub fn parse(s: &str) -> Option<Self> {
        let line = s.lines().next()?.trim();
        let (x, y) = line.split_once(',')?;
        Some(Self { x: x.trim().parse().ok()?, y: y.trim().parse().ok()? })
    }

    /// Missing and malformed files both yield `None`.
    pub fn load(path: &Path) -> Option<Self> {
        let s = fs::read_to_string(path).ok()?;
        match Self::parse(&s) {
            Some(pos) => {
                info!("Restored window position {} from {}", pos, path.display());
                Some(pos)
            }
            None => {
                warn!("Ignoring malformed position file {}: {:?}", path.display(), s);
                None
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_string())?;
        info!("Saved window position {} to {}", self, path.display());
        Ok(())
    }
}
