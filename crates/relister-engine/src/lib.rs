//! The listing lifecycle engine.
//!
//! For every record the engine removes any live listing with the same
//! derived title, fills the create-listing form for the record's category,
//! publishes it, and shares it into the record's groups. All UI work goes
//! through a [`relister_core::AutomationSurface`].

mod composer;
mod confirm;
mod error;
mod groups;
mod lifecycle;
mod navigation;
mod plan;
mod search;
pub mod selectors;

#[cfg(test)]
mod testing;

pub use composer::{Composers, FieldComposer, ItemComposer, VehicleComposer};
pub use confirm::ConfirmDeletion;
pub use error::{Error, Result, Stage};
pub use groups::{DistributionReport, GROUP_SEARCH_LIMIT, GroupDistributor, group_search_query};
pub use lifecycle::{BatchSummary, LifecycleEngine, PublishFlow, PublishOutcome};
pub use navigation::open_selling_page;
pub use plan::{FormStep, InputKind, OptionMatch, StepPlan};
pub use search::find_listing_by_title;
