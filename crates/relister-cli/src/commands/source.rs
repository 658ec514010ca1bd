use anyhow::{Context, Result};
use clap::Args;
use relister_core::listing::{Catalog, ListingSource, LoadOptions};
use relister_core::{Category, ListingRecord};
use std::path::PathBuf;

/// Where listing records come from: a listings file or a rental catalog
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Listings file ({"listings": [...]})
    #[arg(short, long, value_name = "FILE", required_unless_present = "projects")]
    pub listings: Option<PathBuf>,

    /// Generate listings from a projects catalog (needs --equipment and --cities)
    #[arg(
        long,
        value_name = "FILE",
        conflicts_with = "listings",
        requires_all = ["equipment", "cities"]
    )]
    pub projects: Option<PathBuf>,

    /// Equipment catalog used with --projects
    #[arg(long, value_name = "FILE", requires = "projects")]
    pub equipment: Option<PathBuf>,

    /// Cities catalog used with --projects
    #[arg(long, value_name = "FILE", requires = "projects")]
    pub cities: Option<PathBuf>,

    /// Only keep listings tagged with one of these equipment names
    #[arg(long = "only-equipment", value_name = "NAME", value_delimiter = ',')]
    pub only_equipment: Vec<String>,

    /// Fill {Field} placeholders in descriptions from each listing's fields
    #[arg(long)]
    pub templated: bool,
}

impl SourceArgs {
    fn options(&self) -> LoadOptions {
        LoadOptions::new()
            .with_equipment(self.only_equipment.clone())
            .templated(self.templated)
    }

    /// Read and validate every record for `category`
    pub fn load(&self, category: Category) -> Result<Vec<ListingRecord>> {
        let options = self.options();

        if let Some(path) = &self.listings {
            tracing::debug!("Loading {} listings from {}", category, path.display());
            return ListingSource::load(path, category, &options)
                .with_context(|| format!("Failed to load listings from {}", path.display()));
        }

        match (&self.projects, &self.equipment, &self.cities) {
            (Some(projects), Some(equipment), Some(cities)) => {
                let catalog = Catalog::from_files(projects, equipment, cities)
                    .context("Failed to read catalog files")?;
                tracing::debug!("Generating {} listings from catalog", catalog.len());
                let raw = catalog.generate()?;
                Ok(ListingSource::into_records(raw, category, &options)?)
            }
            _ => anyhow::bail!("Provide --listings or --projects, --equipment and --cities"),
        }
    }
}
