use super::types::{
    Category, ItemFields, ListingDetails, ListingRecord, SPORTS_AND_OUTDOORS, VehicleFields,
};
use crate::{Error, Result};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// A listing object exactly as it appears in a listings file
///
/// Every category-specific field is optional here; [`RawListing::into_record`]
/// checks that the active category's fields are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawListing {
    #[serde(rename = "Photos_Folder", default)]
    pub photos_folder: String,
    #[serde(rename = "Photos_Names", default)]
    pub photos_names: Vec<String>,
    #[serde(rename = "Price", default, deserialize_with = "text_or_number")]
    pub price: String,
    #[serde(rename = "Description", default)]
    pub description: String,
    #[serde(rename = "Location", default)]
    pub location: String,
    #[serde(rename = "Delivery", default, deserialize_with = "lenient_number")]
    pub delivery: f64,
    #[serde(
        rename = "Groups",
        default,
        deserialize_with = "group_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub groups: Option<String>,

    #[serde(rename = "Title", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "Category", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "Condition", default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(rename = "Brand", default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,

    #[serde(rename = "Vehicle_Type", default, skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<String>,
    #[serde(
        rename = "Year",
        default,
        deserialize_with = "optional_text_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub year: Option<String>,
    #[serde(rename = "Make", default, skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    #[serde(rename = "Model", default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(
        rename = "Mileage",
        default,
        deserialize_with = "optional_text_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub mileage: Option<String>,
    #[serde(rename = "Fuel_Type", default, skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<String>,

    #[serde(rename = "Equipment", default, skip_serializing_if = "Option::is_none")]
    pub equipment: Option<Vec<String>>,
}

impl RawListing {
    /// Validate this raw listing for `category` and build a record from it
    ///
    /// Fields belonging to the other category are dropped.
    pub fn into_record(self, category: Category) -> Result<ListingRecord> {
        let details = match category {
            Category::Item => {
                let item = ItemFields {
                    title: required(self.title, "Title", category)?,
                    category: required(self.category, "Category", category)?,
                    condition: required(self.condition, "Condition", category)?,
                    brand: self.brand.filter(|b| !b.trim().is_empty()),
                };
                if item.needs_brand() && item.brand.is_none() {
                    return Err(Error::InvalidRecord(format!(
                        "'{}' is in category '{}' and needs a Brand",
                        item.title, SPORTS_AND_OUTDOORS
                    )));
                }
                ListingDetails::Item(item)
            }
            Category::Vehicle => ListingDetails::Vehicle(VehicleFields {
                vehicle_type: required(self.vehicle_type, "Vehicle_Type", category)?,
                year: required(self.year, "Year", category)?,
                make: required(self.make, "Make", category)?,
                model: required(self.model, "Model", category)?,
                mileage: required(self.mileage, "Mileage", category)?,
                fuel_type: required(self.fuel_type, "Fuel_Type", category)?,
            }),
        };

        Ok(ListingRecord {
            photos_folder: PathBuf::from(self.photos_folder),
            photos_names: self.photos_names,
            price: self.price,
            description: self.description,
            location: self.location,
            delivery: self.delivery,
            groups: self.groups,
            equipment: self.equipment.unwrap_or_default(),
            details,
        })
    }

    /// Whether any of this listing's equipment tags appear in `filter`
    pub fn matches_equipment(&self, filter: &[String]) -> bool {
        self.equipment
            .as_ref()
            .is_some_and(|tags| tags.iter().any(|tag| filter.contains(tag)))
    }

    /// Field values by file key, used to resolve description placeholders
    pub fn field_values(&self) -> BTreeMap<String, String> {
        let opt = |v: &Option<String>| v.clone().unwrap_or_default();

        let mut values = BTreeMap::new();
        values.insert("Photos_Folder".to_string(), self.photos_folder.clone());
        values.insert("Photos_Names".to_string(), self.photos_names.join(", "));
        values.insert("Price".to_string(), self.price.clone());
        values.insert("Description".to_string(), self.description.clone());
        values.insert("Location".to_string(), self.location.clone());
        values.insert("Delivery".to_string(), format_number(self.delivery));
        values.insert("Groups".to_string(), opt(&self.groups));
        values.insert("Title".to_string(), opt(&self.title));
        values.insert("Category".to_string(), opt(&self.category));
        values.insert("Condition".to_string(), opt(&self.condition));
        values.insert("Brand".to_string(), opt(&self.brand));
        values.insert("Vehicle_Type".to_string(), opt(&self.vehicle_type));
        values.insert("Year".to_string(), opt(&self.year));
        values.insert("Make".to_string(), opt(&self.make));
        values.insert("Model".to_string(), opt(&self.model));
        values.insert("Mileage".to_string(), opt(&self.mileage));
        values.insert("Fuel_Type".to_string(), opt(&self.fuel_type));
        values.insert(
            "Equipment".to_string(),
            self.equipment.clone().unwrap_or_default().join(", "),
        );
        values
    }
}

fn required(value: Option<String>, field: &str, category: Category) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(Error::InvalidRecord(format!(
            "{} is required for {} listings",
            field, category
        ))),
    }
}

/// Render whole numbers without a trailing `.0`
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

fn value_to_text<E: de::Error>(value: Value) -> std::result::Result<Option<String>, E> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(E::custom(format!("expected a string or number, got {}", other))),
    }
}

pub(crate) fn text_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_to_text::<D::Error>(Value::deserialize(deserializer)?)?.unwrap_or_default())
}

pub(crate) fn optional_text_or_number<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    value_to_text::<D::Error>(Value::deserialize(deserializer)?)
}

pub(crate) fn lenient_number<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(0.0),
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| de::Error::custom(format!("number out of range: {}", n))),
        Value::String(s) if s.trim().is_empty() => Ok(0.0),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| de::Error::custom(format!("expected a number, got '{}'", s))),
        other => Err(de::Error::custom(format!("expected a number, got {}", other))),
    }
}

/// Accept `Groups` either as a `;`-delimited string or as a list of names
fn group_list<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Array(items) => {
            let names = items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s),
                    other => Err(de::Error::custom(format!(
                        "group names must be strings, got {}",
                        other
                    ))),
                })
                .collect::<std::result::Result<Vec<_>, D::Error>>()?;
            Ok(Some(names.join(";")))
        }
        other => Err(de::Error::custom(format!(
            "expected a group string or list, got {}",
            other
        ))),
    }
}
