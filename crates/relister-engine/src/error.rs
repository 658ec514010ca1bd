use relister_core::Category;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Point in the lifecycle where a record failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Remove,
    OpenForm,
    FillForm,
    Details,
    Publish,
    DistributeGroups,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Remove => "removing the previous listing",
            Stage::OpenForm => "opening the listing form",
            Stage::FillForm => "filling the listing form",
            Stage::Details => "filling listing details",
            Stage::Publish => "publishing",
            Stage::DistributeGroups => "sharing to groups",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed while {stage} for '{title}': {source}")]
    Step {
        stage: Stage,
        title: String,
        #[source]
        source: relister_core::Error,
    },

    #[error("'{title}' is a {actual} listing but the batch is for {expected} listings")]
    CategoryMismatch {
        title: String,
        expected: Category,
        actual: Category,
    },

    #[error("No field composer registered for {0} listings")]
    UnsupportedCategory(Category),

    #[error("More than one listing in the batch derives the title '{0}'")]
    DuplicateTitle(String),

    #[error(transparent)]
    Core(#[from] relister_core::Error),
}

impl Error {
    /// Stage that failed, for step failures
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Error::Step { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Tag a core failure with the stage and listing it belongs to
pub(crate) trait StageContext<T> {
    fn at(self, stage: Stage, title: &str) -> Result<T>;
}

impl<T> StageContext<T> for relister_core::Result<T> {
    fn at(self, stage: Stage, title: &str) -> Result<T> {
        self.map_err(|source| Error::Step {
            stage,
            title: title.to_string(),
            source,
        })
    }
}
