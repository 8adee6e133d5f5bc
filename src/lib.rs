pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, toml_config::GuideConfig};
pub use crate::core::dataset::{Dataset, DatasetSource, DatasetStore};
pub use crate::core::dishes::DishCatalog;
pub use crate::core::lookup::{LookupEngine, LookupOptions};
pub use crate::core::matcher::{find, select};
pub use crate::core::preferences::apply_preferences;
pub use domain::model::{DiseaseRecord, FilteredRecord, LookupOutcome, PreferenceSet};
pub use utils::error::{GuideError, Result};
