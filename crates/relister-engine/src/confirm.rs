use crate::selectors;
use relister_core::{AutomationSurface, Error, Locator, Result};
use std::time::Duration;

/// The "confirm deletion" button, reachable through different paths
/// depending on the dialog layout
///
/// Candidates are probed in order with a short wait each; the first one
/// present is clicked. If none shows up the deletion cannot be confirmed.
#[derive(Debug, Clone)]
pub struct ConfirmDeletion {
    candidates: Vec<Locator>,
}

impl ConfirmDeletion {
    pub fn new(candidates: Vec<Locator>) -> Self {
        Self { candidates }
    }

    /// Known layouts: the tabbable Delete div, then the Delete label text
    pub fn standard() -> Self {
        Self::new(vec![
            Locator::css(selectors::CONFIRM_DELETE),
            Locator::xpath(selectors::CONFIRM_DELETE_BUTTON_TEXT),
        ])
    }

    /// Click the first candidate present, returning the one that matched
    pub async fn confirm<S>(&self, surface: &S, probe: Duration) -> Result<Locator>
    where
        S: AutomationSurface + ?Sized,
    {
        for candidate in &self.candidates {
            if surface.find_element(candidate, false, probe).await? {
                tracing::debug!("Confirming deletion via {}", candidate);
                surface.click(candidate).await?;
                return Ok(candidate.clone());
            }
        }

        Err(Error::ElementNotFound {
            locator: self
                .candidates
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(" | "),
            waited: probe * self.candidates.len() as u32,
        })
    }
}

impl Default for ConfirmDeletion {
    fn default() -> Self {
        Self::standard()
    }
}
