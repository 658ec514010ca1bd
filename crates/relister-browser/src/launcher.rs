use crate::{Error, Result};
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};

pub const DEFAULT_DEBUGGING_PORT: u16 = 9222;

/// Starts Chrome with remote debugging on a given profile
pub struct ChromeLauncher {
    chrome_path: PathBuf,
    profile_path: PathBuf,
    start_url: String,
    debugging_port: u16,
    headless: bool,
}

impl ChromeLauncher {
    pub fn new(chrome_path: PathBuf, profile_path: PathBuf, start_url: impl Into<String>) -> Self {
        Self {
            chrome_path,
            profile_path,
            start_url: start_url.into(),
            debugging_port: DEFAULT_DEBUGGING_PORT,
            headless: false,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.debugging_port = port;
        self
    }

    /// Run without a window. Only useful once the profile is signed in.
    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    pub fn launch(&self) -> Result<Child> {
        tracing::debug!(
            "Launching {} on port {}",
            self.chrome_path.display(),
            self.debugging_port
        );

        Command::new(&self.chrome_path)
            .args(self.build_args())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| Error::Browser(format!("Failed to launch Chrome: {}", e)))
    }

    fn build_args(&self) -> Vec<String> {
        let mut args = vec![
            format!("--remote-debugging-port={}", self.debugging_port),
            format!("--user-data-dir={}", self.profile_path.display()),
            "--no-first-run".to_string(),
            "--no-default-browser-check".to_string(),
            "--disable-notifications".to_string(),
        ];
        if self.headless {
            args.push("--headless=new".to_string());
            args.push("--window-size=1920,1080".to_string());
        }
        args.push(self.start_url.clone());
        args
    }

    pub fn debugging_port(&self) -> u16 {
        self.debugging_port
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn launcher() -> ChromeLauncher {
        ChromeLauncher::new(
            PathBuf::from("/usr/bin/google-chrome"),
            PathBuf::from("/tmp/profile"),
            "https://www.facebook.com",
        )
    }

    #[test]
    fn test_args_point_at_profile_and_port() {
        let args = launcher().with_port(9333).build_args();

        assert!(args.contains(&"--remote-debugging-port=9333".to_string()));
        assert!(args.contains(&"--user-data-dir=/tmp/profile".to_string()));
        assert!(args.contains(&"--no-first-run".to_string()));
        assert_eq!(args.last().unwrap(), "https://www.facebook.com");
        assert!(!args.iter().any(|a| a.starts_with("--headless")));
    }

    #[test]
    fn test_headless_args() {
        let args = launcher().headless(true).build_args();
        assert!(args.contains(&"--headless=new".to_string()));
        assert_eq!(launcher().debugging_port(), DEFAULT_DEBUGGING_PORT);
    }
}
