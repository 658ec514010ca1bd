use crate::composer::Composers;
use crate::confirm::ConfirmDeletion;
use crate::error::{Result, Stage, StageContext};
use crate::groups::{DistributionReport, GroupDistributor};
use crate::search::find_listing_by_title;
use crate::selectors;
use chrono::{DateTime, Utc};
use relister_core::{AutomationSurface, Category, ListingRecord, Locator, Timeouts};
use serde::Serialize;

/// Which create-listing layout the marketplace served
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishFlow {
    /// Publish straight from the form; groups are shared afterwards
    SingleStep,
    /// Form, then a details page with location and group picker
    MultiStep,
}

/// What happened to one record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublishOutcome {
    pub title: String,
    /// A live listing with the same title was deleted first
    pub removed_prior: bool,
    pub flow: PublishFlow,
    pub groups: DistributionReport,
}

/// Result of one publish pass
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub category: Category,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub outcomes: Vec<PublishOutcome>,
}

impl BatchSummary {
    fn start(category: Category) -> Self {
        let now = Utc::now();
        Self {
            category,
            started_at: now,
            finished_at: now,
            outcomes: Vec::new(),
        }
    }

    pub fn published(&self) -> usize {
        self.outcomes.len()
    }

    pub fn removed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.removed_prior).count()
    }

    pub fn shared(&self) -> usize {
        self.outcomes.iter().map(|o| o.groups.shared.len()).sum()
    }

    pub fn unconfirmed(&self) -> usize {
        self.outcomes.iter().map(|o| o.groups.unconfirmed.len()).sum()
    }
}

/// Removes, republishes and shares listings through an automation surface
///
/// Every publish is preceded by a delete of any live listing with the same
/// derived title, so running a batch twice leaves one listing per record.
/// Records are processed strictly in order; the first fatal failure stops
/// the batch.
pub struct LifecycleEngine<S> {
    surface: S,
    composers: Composers,
    confirm: ConfirmDeletion,
    timeouts: Timeouts,
}

impl<S: AutomationSurface> LifecycleEngine<S> {
    pub fn new(surface: S, timeouts: Timeouts) -> Self {
        Self {
            surface,
            composers: Composers::standard(),
            confirm: ConfirmDeletion::standard(),
            timeouts,
        }
    }

    pub fn with_composers(mut self, composers: Composers) -> Self {
        self.composers = composers;
        self
    }

    pub fn with_confirm_deletion(mut self, confirm: ConfirmDeletion) -> Self {
        self.confirm = confirm;
        self
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn timeouts(&self) -> &Timeouts {
        &self.timeouts
    }

    /// Remove then publish every record, in order
    ///
    /// An empty batch is a no-op. The whole batch is checked before the first
    /// UI call: every record must match `category` and derive a distinct title.
    pub async fn update_listings(
        &self,
        records: &[ListingRecord],
        category: Category,
    ) -> Result<BatchSummary> {
        let mut summary = BatchSummary::start(category);
        if records.is_empty() {
            tracing::info!("No {} listings to update", category);
            return Ok(summary);
        }

        self.composers.check_batch(records, category)?;

        for (index, record) in records.iter().enumerate() {
            tracing::info!(
                "[{}/{}] Updating '{}'",
                index + 1,
                records.len(),
                record.derived_title()
            );

            let removed = self.remove_listing(record, category).await?;
            let mut outcome = self.publish_listing(record, category).await?;
            outcome.removed_prior = removed;
            summary.outcomes.push(outcome);
        }

        summary.finished_at = Utc::now();
        tracing::info!(
            "Published {} {} listings ({} replaced, {} group shares)",
            summary.published(),
            category,
            summary.removed(),
            summary.shared()
        );
        Ok(summary)
    }

    /// Delete the live listing with this record's title, if there is one
    ///
    /// Returns whether a listing was deleted.
    pub async fn remove_listing(&self, record: &ListingRecord, category: Category) -> Result<bool> {
        self.composers.for_record(record, category)?;
        let title = record.derived_title();

        let found = find_listing_by_title(&self.surface, &title, &self.timeouts)
            .await
            .at(Stage::Remove, &title)?;

        let Some(listing) = found else {
            tracing::debug!("No live listing titled '{}'", title);
            return Ok(false);
        };

        tracing::info!("Removing live listing '{}'", title);
        self.delete(&listing).await.at(Stage::Remove, &title)?;
        Ok(true)
    }

    async fn delete(&self, listing: &Locator) -> relister_core::Result<()> {
        let surface = &self.surface;

        surface.click(listing).await?;
        surface.click(&Locator::css(selectors::DELETE_BUTTON)).await?;
        self.confirm.confirm(surface, self.timeouts.probe).await?;

        if !surface
            .wait_until_invisible(&Locator::css(selectors::LISTING_OVERLAY), self.timeouts.deletion)
            .await?
        {
            tracing::warn!(
                "Listing overlay still open {:?} after confirming deletion",
                self.timeouts.deletion
            );
        }
        Ok(())
    }

    /// Fill the create form for `record`, publish it and share it to its groups
    pub async fn publish_listing(
        &self,
        record: &ListingRecord,
        category: Category,
    ) -> Result<PublishOutcome> {
        let plan = self.composers.form_plan(record, category)?;
        let title = record.derived_title();
        let surface = &self.surface;

        surface
            .click(&Locator::css(selectors::CREATE_LISTING))
            .await
            .at(Stage::OpenForm, &title)?;
        surface
            .click(&selectors::create_form(category))
            .await
            .at(Stage::OpenForm, &title)?;

        plan.execute(surface).await.at(Stage::FillForm, &title)?;

        if self.click_next().await.at(Stage::Details, &title)? {
            tracing::debug!("Multi-step publish flow for '{}'", title);

            surface
                .send_keys(&Locator::css(selectors::LOCATION_INPUT), &record.location)
                .await
                .at(Stage::Details, &title)?;
            surface
                .click(&Locator::css(selectors::FIRST_LOCATION_SUGGESTION))
                .await
                .at(Stage::Details, &title)?;

            self.click_next().await.at(Stage::Details, &title)?;
            let groups = self
                .distribute_to_groups(record, category, PublishFlow::MultiStep)
                .await?;
            self.publish(&title).await?;

            Ok(PublishOutcome {
                title,
                removed_prior: false,
                flow: PublishFlow::MultiStep,
                groups,
            })
        } else {
            tracing::debug!("Single-step publish flow for '{}'", title);

            self.publish(&title).await?;
            let groups = self
                .distribute_to_groups(record, category, PublishFlow::SingleStep)
                .await?;

            Ok(PublishOutcome {
                title,
                removed_prior: false,
                flow: PublishFlow::SingleStep,
                groups,
            })
        }
    }

    /// Share `record` into its groups the way `flow` allows
    ///
    /// The multi-step form ends on a group picker, so groups are ticked
    /// after the last "Next" and before publishing. After a single-step publish the listing is found again by
    /// title and shared group by group. No groups is a no-op either way.
    pub async fn distribute_to_groups(
        &self,
        record: &ListingRecord,
        category: Category,
        flow: PublishFlow,
    ) -> Result<DistributionReport> {
        self.composers.for_record(record, category)?;
        let title = record.derived_title();
        let groups = record.group_names();
        if groups.is_empty() {
            return Ok(DistributionReport::default());
        }

        let distributor = GroupDistributor::new(&self.surface, &self.timeouts);
        match flow {
            PublishFlow::MultiStep => {
                let shared = distributor
                    .in_flow(&groups)
                    .await
                    .at(Stage::DistributeGroups, &title)?;
                Ok(DistributionReport {
                    shared,
                    unconfirmed: Vec::new(),
                })
            }
            PublishFlow::SingleStep => distributor
                .post_flow(&title, &groups, &record.description)
                .await
                .at(Stage::DistributeGroups, &title),
        }
    }

    /// Click "Next" if this layout has one
    async fn click_next(&self) -> relister_core::Result<bool> {
        let next = Locator::css(selectors::NEXT_BUTTON);
        if self
            .surface
            .find_element(&next, false, self.timeouts.probe)
            .await?
        {
            self.surface.click(&next).await?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn publish(&self, title: &str) -> Result<()> {
        self.surface
            .click(&Locator::css(selectors::PUBLISH_BUTTON))
            .await
            .at(Stage::Publish, title)?;

        let settled = self
            .surface
            .wait_until_invisible(&Locator::css(selectors::PUBLISH_CONTROL), self.timeouts.publish)
            .await
            .at(Stage::Publish, title)?;
        if !settled {
            tracing::warn!("Publish control for '{}' still showing after {:?}", title, self.timeouts.publish);
        }

        tracing::info!("Published '{}'", title);
        Ok(())
    }
}
