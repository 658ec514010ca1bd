pub mod config;
pub mod error;
pub mod listing;
pub mod surface;

pub use config::{Settings, Timeouts};
pub use error::{Error, Result};
pub use listing::{Category, ListingDetails, ListingRecord};
pub use surface::{AutomationSurface, Locator};
