use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Category label that makes the marketplace form show a Brand field
pub const SPORTS_AND_OUTDOORS: &str = "Sports & Outdoors";

/// Listing type, selecting which field set applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Simple item for sale
    Item,
    /// Vehicle-like asset
    Vehicle,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Item, Category::Vehicle];

    /// Path segment used by the marketplace create flow
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Item => "item",
            Category::Vehicle => "vehicle",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "item" => Ok(Category::Item),
            "vehicle" => Ok(Category::Vehicle),
            _ => Err(Error::UnsupportedCategory(s.to_string())),
        }
    }
}

/// Fields specific to simple items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemFields {
    pub title: String,
    pub category: String,
    pub condition: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
}

impl ItemFields {
    /// Whether the form for this item shows the Brand field
    pub fn needs_brand(&self) -> bool {
        self.category == SPORTS_AND_OUTDOORS
    }
}

/// Fields specific to vehicle-like assets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleFields {
    pub vehicle_type: String,
    pub year: String,
    pub make: String,
    pub model: String,
    pub mileage: String,
    pub fuel_type: String,
}

/// The category-specific half of a listing. Exactly one variant is populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ListingDetails {
    Item(ItemFields),
    Vehicle(VehicleFields),
}

impl ListingDetails {
    pub fn category(&self) -> Category {
        match self {
            ListingDetails::Item(_) => Category::Item,
            ListingDetails::Vehicle(_) => Category::Vehicle,
        }
    }
}

/// One validated listing to publish
///
/// Records are built right before a publish pass and are never mutated
/// while the engine works on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub photos_folder: PathBuf,
    pub photos_names: Vec<String>,
    pub price: String,
    pub description: String,
    pub location: String,
    pub delivery: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub equipment: Vec<String>,
    pub details: ListingDetails,
}

impl ListingRecord {
    pub fn category(&self) -> Category {
        self.details.category()
    }

    /// Title used to find this listing again through the marketplace search
    ///
    /// Items use their title verbatim, vehicles use `"{year} {make} {model}"`.
    pub fn derived_title(&self) -> String {
        match &self.details {
            ListingDetails::Item(item) => item.title.clone(),
            ListingDetails::Vehicle(vehicle) => {
                format!("{} {} {}", vehicle.year, vehicle.make, vehicle.model)
            }
        }
    }

    /// Absolute photo paths joined by newlines, the form a multi-file input accepts
    pub fn photo_paths(&self) -> Result<String> {
        let folder = std::path::absolute(&self.photos_folder)?;
        Ok(join_photo_paths(&folder, &self.photos_names))
    }

    /// Target group names, split on `;` and trimmed
    pub fn group_names(&self) -> Vec<String> {
        self.groups.as_deref().map(parse_groups).unwrap_or_default()
    }
}

/// Split a `;`-delimited group list, trimming each entry and dropping empties
pub fn parse_groups(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn join_photo_paths(folder: &Path, names: &[String]) -> String {
    names
        .iter()
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .map(|name| folder.join(name).display().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
