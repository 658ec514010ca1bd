//! Manage the Chrome profiles that hold signed-in marketplace sessions.
//!
//! ```bash
//! relister profile list
//! relister profile delete old-seller
//! ```

use anyhow::{Result, anyhow};
use relister_browser::ProfileManager;
use std::fs;

/// List all saved profiles
pub fn list() -> Result<()> {
    let profiles_dir = ProfileManager::profiles_dir()?;

    if !profiles_dir.exists() {
        println!(
            "No profiles found. Profiles will be created in: {}",
            profiles_dir.display()
        );
        return Ok(());
    }

    let mut names = Vec::new();
    for entry in fs::read_dir(&profiles_dir)? {
        let path = entry?.path();
        if path.is_dir() {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                names.push(name.to_string());
            }
        }
    }

    if names.is_empty() {
        println!("No profiles found.");
        return Ok(());
    }

    names.sort();
    println!("Saved profiles in {}:", profiles_dir.display());
    for name in names {
        let marker = if name == "default" { "* " } else { "  " };
        println!("{}{}", marker, name);
    }

    Ok(())
}

/// Delete a saved profile and its signed-in session
pub fn delete(name: &str) -> Result<()> {
    let profile_path = ProfileManager::profiles_dir()?.join(name);
    if name.contains(['/', '\\']) || !profile_path.is_dir() {
        return Err(anyhow!("Profile '{}' not found", name));
    }

    fs::remove_dir_all(&profile_path)?;
    println!("🗑️  Deleted profile '{}'", name);
    Ok(())
}
