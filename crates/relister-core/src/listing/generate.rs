//! Record generation from independent data sources.
//!
//! Rental listings are produced as the cross product of projects, equipment
//! and cities: every project is advertised for every piece of equipment in
//! every city.

use super::raw::{RawListing, lenient_number, text_or_number};
use super::template::render;
use crate::Result;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// A kind of job the equipment is advertised for
#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    /// Title pattern; `{equipment_title}` is replaced with the equipment's title
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Equipment {
    #[serde(rename = "Photos_Folder", default)]
    pub photos_folder: String,
    #[serde(rename = "Photos_Names", default)]
    pub photos_names: Vec<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub daily_cost: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct City {
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub estimated_cost: f64,
}

/// The three sources rental listings are generated from
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub projects: Vec<Project>,
    pub equipment: Vec<Equipment>,
    pub cities: Vec<City>,
}

impl Catalog {
    /// Read projects, equipment and cities from three JSON array files
    pub fn from_files(projects: &Path, equipment: &Path, cities: &Path) -> Result<Self> {
        Ok(Self {
            projects: read_array(projects)?,
            equipment: read_array(equipment)?,
            cities: read_array(cities)?,
        })
    }

    /// Number of listings [`Catalog::generate`] will produce
    pub fn len(&self) -> usize {
        self.projects.len() * self.equipment.len() * self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Build one raw item listing per project × equipment × city
    pub fn generate(&self) -> Result<Vec<RawListing>> {
        let mut listings = Vec::with_capacity(self.len());

        for project in &self.projects {
            for equipment in &self.equipment {
                let mut values = BTreeMap::new();
                values.insert("equipment_title".to_string(), equipment.title.clone());
                let headline = render(&project.kind, &values)?;

                for city in &self.cities {
                    let place = format!("{}, {}", city.city, city.state);
                    listings.push(RawListing {
                        photos_folder: equipment.photos_folder.clone(),
                        photos_names: equipment.photos_names.clone(),
                        price: equipment.daily_cost.clone(),
                        description: project.description.clone(),
                        location: place.clone(),
                        delivery: city.estimated_cost,
                        title: Some(format!("{} in {}", headline, place)),
                        category: Some("Miscellaneous".to_string()),
                        condition: Some("Used - Like New".to_string()),
                        make: Some(equipment.make.clone()),
                        model: Some(equipment.model.clone()),
                        vehicle_type: Some(equipment.title.clone()),
                        equipment: Some(vec![equipment.title.clone()]),
                        ..RawListing::default()
                    });
                }
            }
        }

        tracing::debug!("Generated {} listings from catalog", listings.len());
        Ok(listings)
    }
}

fn read_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    tracing::debug!("Reading catalog file from: {}", path.display());
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::Category;

    #[test]
    fn test_catalog_generates_titles_per_city() {
        let catalog = Catalog {
            projects: vec![Project {
                kind: "{equipment_title} Rental".to_string(),
                description: "Great for landscaping".to_string(),
            }],
            equipment: vec![Equipment {
                photos_folder: "photos/excavator".to_string(),
                photos_names: vec!["1.jpg".to_string()],
                daily_cost: "150".to_string(),
                title: "Mini Excavator".to_string(),
                make: "Kubota".to_string(),
                model: "U17".to_string(),
            }],
            cities: vec![
                City {
                    city: "Austin".to_string(),
                    state: "TX".to_string(),
                    estimated_cost: 75.0,
                },
                City {
                    city: "Dallas".to_string(),
                    state: "TX".to_string(),
                    estimated_cost: 90.0,
                },
            ],
        };

        let listings = catalog.generate().unwrap();
        assert_eq!(listings.len(), catalog.len());
        assert_eq!(
            listings[1].title.as_deref(),
            Some("Mini Excavator Rental in Dallas, TX")
        );
        assert_eq!(listings[1].location, "Dallas, TX");
        assert_eq!(listings[1].delivery, 90.0);

        let record = listings[0].clone().into_record(Category::Item).unwrap();
        assert_eq!(record.derived_title(), "Mini Excavator Rental in Austin, TX");
        assert_eq!(record.price, "150");
        assert_eq!(record.equipment, vec!["Mini Excavator"]);
    }
}
