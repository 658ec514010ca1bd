use crate::search::find_listing_by_title;
use crate::selectors;
use relister_core::{AutomationSurface, Error, Locator, Result, Timeouts};
use serde::Serialize;

/// Longest group-search query the share dialog accepts
pub const GROUP_SEARCH_LIMIT: usize = 51;

/// Text typed into the group search box for `group`
pub fn group_search_query(group: &str) -> String {
    group.chars().take(GROUP_SEARCH_LIMIT).collect()
}

/// Outcome of sharing one listing into its groups
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DistributionReport {
    /// Groups that showed the share confirmation
    pub shared: Vec<String>,
    /// Groups posted to without a confirmation showing up in time
    pub unconfirmed: Vec<String>,
}

/// Shares a listing into audience groups
///
/// Groups are handled one at a time and independently: an unconfirmed share
/// does not undo earlier ones.
pub struct GroupDistributor<'a, S: ?Sized> {
    surface: &'a S,
    timeouts: &'a Timeouts,
}

impl<'a, S> GroupDistributor<'a, S>
where
    S: AutomationSurface + ?Sized,
{
    pub fn new(surface: &'a S, timeouts: &'a Timeouts) -> Self {
        Self { surface, timeouts }
    }

    /// Tick each group in the create flow's group picker
    pub async fn in_flow(&self, groups: &[String]) -> Result<Vec<String>> {
        for group in groups {
            tracing::debug!("Selecting group '{}' in the listing form", group);
            self.surface.click(&Locator::span_text(group)).await?;
        }
        Ok(groups.to_vec())
    }

    /// Share an already published listing into each group from "Your listings"
    pub async fn post_flow(
        &self,
        title: &str,
        groups: &[String],
        caption: &str,
    ) -> Result<DistributionReport> {
        let mut report = DistributionReport::default();
        if groups.is_empty() {
            return Ok(report);
        }

        if find_listing_by_title(self.surface, title, self.timeouts)
            .await?
            .is_none()
        {
            return Err(Error::ElementNotFound {
                locator: Locator::span_text(title).to_string(),
                waited: self.timeouts.search_result,
            });
        }

        for group in groups {
            if self.share_to_group(title, group, caption).await? {
                tracing::info!("Shared '{}' to '{}'", title, group);
                report.shared.push(group.clone());
            } else {
                tracing::warn!(
                    "No share confirmation for '{}' in '{}' after {:?}",
                    title,
                    group,
                    self.timeouts.share_confirmation
                );
                report.unconfirmed.push(group.clone());
            }
        }

        Ok(report)
    }

    async fn share_to_group(&self, title: &str, group: &str, caption: &str) -> Result<bool> {
        let surface = self.surface;

        surface.click(&selectors::share_button(title)).await?;
        surface
            .click(&Locator::span_text(selectors::SHARE_TO_GROUP))
            .await?;

        let search = Locator::css(selectors::GROUP_SEARCH);
        surface.clear_text(&search).await?;
        surface.send_keys(&search, &group_search_query(group)).await?;
        surface.click(&Locator::span_text(group)).await?;

        self.write_caption(caption).await?;

        surface.click(&Locator::css(selectors::POST_BUTTON)).await?;

        let wait = self.timeouts.share_confirmation;
        if !surface
            .wait_until_invisible(&Locator::css(selectors::DIALOG), wait)
            .await?
        {
            tracing::warn!("Share dialog still open after {:?}", wait);
        }
        if !surface
            .wait_until_invisible(&Locator::css(selectors::LOADING), wait)
            .await?
        {
            tracing::warn!("Share still loading after {:?}", wait);
        }

        surface
            .find_element(&Locator::span_text(selectors::SHARED_CONFIRMATION), false, wait)
            .await
    }

    /// The caption box moves between layouts; write into whichever shows
    async fn write_caption(&self, caption: &str) -> Result<()> {
        for candidate in selectors::caption_candidates() {
            if self
                .surface
                .find_element(&candidate, false, self.timeouts.probe)
                .await?
            {
                return self.surface.send_keys(&candidate, caption).await;
            }
        }
        tracing::debug!("No caption box in the share dialog");
        Ok(())
    }
}
