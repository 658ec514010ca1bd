use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Chrome user-data directory for a marketplace session
///
/// Named profiles persist under `~/.relister/profiles/<name>` so the seller
/// only signs in once. Temporary profiles are removed on drop.
pub struct ProfileManager {
    path: PathBuf,
    is_temporary: bool,
}

impl ProfileManager {
    /// Directory holding every named profile
    pub fn profiles_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(Error::NoHomeDir)?;
        Ok(home.join(".relister").join("profiles"))
    }

    /// Persistent profile `name` under [`ProfileManager::profiles_dir`]
    pub fn named(name: &str) -> Result<Self> {
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(Error::Browser(format!("Invalid profile name: '{}'", name)));
        }
        Self::persistent(Self::profiles_dir()?.join(name))
    }

    pub fn temporary() -> Result<Self> {
        let path = tempfile::Builder::new()
            .prefix("relister-profile-")
            .tempdir()?
            .keep();

        Ok(Self {
            path,
            is_temporary: true,
        })
    }

    /// Profile at `path`, created if missing and kept after drop
    pub fn persistent(path: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&path)?;
        Ok(Self {
            path,
            is_temporary: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_temporary(&self) -> bool {
        self.is_temporary
    }
}

impl Drop for ProfileManager {
    fn drop(&mut self) {
        if self.is_temporary && self.path.exists() {
            if let Err(e) = std::fs::remove_dir_all(&self.path) {
                tracing::debug!("Could not remove {}: {}", self.path.display(), e);
            }
        }
    }
}
