use super::raw::RawListing;
use super::template::render;
use super::types::{Category, ListingRecord};
use crate::Result;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct ListingsFile {
    #[serde(default)]
    listings: Vec<RawListing>,
}

/// How a listings file is turned into records
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Keep only listings tagged with at least one of these equipment names.
    /// Empty means keep everything.
    pub equipment: Vec<String>,
    /// Resolve `{Field}` placeholders in descriptions against the listing itself
    pub templated: bool,
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_equipment(mut self, equipment: Vec<String>) -> Self {
        self.equipment = equipment;
        self
    }

    pub fn templated(mut self, templated: bool) -> Self {
        self.templated = templated;
        self
    }
}

pub struct ListingSource;

impl ListingSource {
    /// Read the raw `listings` array from a listings file
    pub fn read_raw(path: &Path) -> Result<Vec<RawListing>> {
        tracing::debug!("Reading listings file from: {}", path.display());

        let file = File::open(path)?;
        let parsed: ListingsFile = serde_json::from_reader(BufReader::new(file))?;

        tracing::info!(
            "Read {} listings from {}",
            parsed.listings.len(),
            path.display()
        );

        Ok(parsed.listings)
    }

    /// Parse the raw `listings` array from a JSON string
    pub fn raw_from_str(content: &str) -> Result<Vec<RawListing>> {
        let parsed: ListingsFile = serde_json::from_str(content)?;
        Ok(parsed.listings)
    }

    /// Load a listings file into validated records for `category`
    pub fn load(path: &Path, category: Category, options: &LoadOptions) -> Result<Vec<ListingRecord>> {
        let raw = Self::read_raw(path)?;
        Self::into_records(raw, category, options)
    }

    /// Filter, optionally templatize, and validate raw listings
    pub fn into_records(
        raw: Vec<RawListing>,
        category: Category,
        options: &LoadOptions,
    ) -> Result<Vec<ListingRecord>> {
        let total = raw.len();

        let records = raw
            .into_iter()
            .filter(|listing| {
                options.equipment.is_empty() || listing.matches_equipment(&options.equipment)
            })
            .map(|mut listing| {
                if options.templated {
                    listing.description = render(&listing.description, &listing.field_values())?;
                }
                listing.into_record(category)
            })
            .collect::<Result<Vec<_>>>()?;

        if records.len() < total {
            tracing::info!(
                "Equipment filter kept {} of {} listings",
                records.len(),
                total
            );
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::ListingDetails;
    use std::io::Write;

    const LISTINGS: &str = r#"{
        "listings": [
            {
                "Photos_Folder": "photos/excavator",
                "Photos_Names": ["1.jpg", "2.jpg"],
                "Price": 150,
                "Description": "{Title} available in {Location}, delivery ${Delivery}",
                "Location": "Austin, TX",
                "Delivery": 75,
                "Groups": "Austin Equipment; Texas Rentals",
                "Title": "Mini Excavator",
                "Category": "Miscellaneous",
                "Condition": "Used - Like New",
                "Equipment": ["excavator"]
            },
            {
                "Photos_Folder": "photos/trailer",
                "Photos_Names": ["t.jpg"],
                "Price": "60",
                "Description": "Trailer",
                "Location": "Dallas, TX",
                "Delivery": 0,
                "Title": "Dump Trailer",
                "Category": "Miscellaneous",
                "Condition": "Used - Good",
                "Equipment": ["trailer"]
            }
        ]
    }"#;

    fn write_fixture() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(LISTINGS.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_all_listings() {
        let file = write_fixture();
        let records = ListingSource::load(file.path(), Category::Item, &LoadOptions::new()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].derived_title(), "Mini Excavator");
        assert_eq!(records[0].price, "150");
        assert_eq!(
            records[0].group_names(),
            vec!["Austin Equipment", "Texas Rentals"]
        );
        // Placeholders stay untouched without templating
        assert!(records[0].description.contains("{Title}"));
    }

    #[test]
    fn test_load_with_equipment_filter() {
        let file = write_fixture();
        let options = LoadOptions::new().with_equipment(vec!["trailer".to_string()]);
        let records = ListingSource::load(file.path(), Category::Item, &options).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].derived_title(), "Dump Trailer");
    }

    #[test]
    fn test_load_templated_descriptions() {
        let file = write_fixture();
        let options = LoadOptions::new().templated(true);
        let records = ListingSource::load(file.path(), Category::Item, &options).unwrap();

        assert_eq!(
            records[0].description,
            "Mini Excavator available in Austin, TX, delivery $75"
        );
        assert_eq!(records[1].description, "Trailer");
    }

    #[test]
    fn test_load_for_wrong_category_fails() {
        let file = write_fixture();
        let result = ListingSource::load(file.path(), Category::Vehicle, &LoadOptions::new());
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_listings_key_is_empty() {
        let raw = ListingSource::raw_from_str("{}").unwrap();
        assert!(raw.is_empty());
    }

    #[test]
    fn test_vehicle_listing_from_str() {
        let raw = ListingSource::raw_from_str(
            r#"{"listings": [{"Vehicle_Type": "Car/Truck", "Year": 2019, "Make": "Toyota",
                "Model": "Camry", "Mileage": 42000, "Fuel_Type": "Gasoline", "Price": "9000"}]}"#,
        )
        .unwrap();
        let records =
            ListingSource::into_records(raw, Category::Vehicle, &LoadOptions::new()).unwrap();

        assert_eq!(records[0].derived_title(), "2019 Toyota Camry");
        assert!(matches!(records[0].details, ListingDetails::Vehicle(_)));
    }
}
