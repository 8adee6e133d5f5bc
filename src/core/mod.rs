pub mod dataset;
pub mod dishes;
pub mod lookup;
pub mod matcher;
pub mod preferences;

pub use crate::domain::model::{DiseaseRecord, Dish, FilteredRecord, LookupOutcome, PreferenceSet};
pub use crate::domain::ports::{ConfigProvider, Storage};
pub use crate::utils::error::Result;
pub use dataset::Dataset;
