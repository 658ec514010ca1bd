mod generate;
mod raw;
mod reader;
mod template;
mod types;

pub use generate::{Catalog, City, Equipment, Project};
pub use raw::RawListing;
pub use reader::{ListingSource, LoadOptions};
pub use template::render;
pub use types::*;
