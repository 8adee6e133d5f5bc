use crate::core::{DiseaseRecord, Storage};
use crate::utils::error::{GuideError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Built-in reference table, same format as an external dataset file.
const EMBEDDED_CSV: &str = include_str!("../../data/diseases.csv");

const ITEM_SEPARATOR: char = ',';

/// Column layout of the tabular format.
#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    #[serde(rename = "Disease")]
    disease: String,
    #[serde(rename = "Foods_to_Eat", default)]
    foods_to_eat: String,
    #[serde(rename = "Foods_to_Avoid", default)]
    foods_to_avoid: String,
    #[serde(rename = "Nutritional_Note", default)]
    nutritional_note: Option<String>,
}

async fn read_dataset_file<S: Storage>(storage: &S, path: &str) -> Result<Vec<u8>> {
    storage.read_file(path).await.map_err(|e| match e {
        GuideError::IoError(io) if io.kind() == std::io::ErrorKind::NotFound => {
            GuideError::DatasetNotFound {
                path: path.to_string(),
            }
        }
        other => other,
    })
}

fn split_items(text: &str) -> Vec<String> {
    text.split(ITEM_SEPARATOR)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

impl From<CsvRow> for DiseaseRecord {
    fn from(row: CsvRow) -> Self {
        DiseaseRecord {
            name: row.disease.trim().to_string(),
            foods_to_eat: split_items(&row.foods_to_eat),
            foods_to_avoid: split_items(&row.foods_to_avoid),
            note: row
                .nutritional_note
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
        }
    }
}

impl From<&DiseaseRecord> for CsvRow {
    fn from(record: &DiseaseRecord) -> Self {
        CsvRow {
            disease: record.name.clone(),
            foods_to_eat: record.eat_text(),
            foods_to_avoid: record.avoid_text(),
            nutritional_note: record.note.clone(),
        }
    }
}

/// Immutable, ordered collection of disease records.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<DiseaseRecord>,
}

impl Dataset {
    /// Builds a dataset, rejecting empty or duplicate (case-insensitive) names.
    pub fn new(records: Vec<DiseaseRecord>) -> Result<Self> {
        let mut seen = HashSet::new();
        for (index, record) in records.iter().enumerate() {
            if record.name.trim().is_empty() {
                return Err(GuideError::DatasetParseError {
                    message: format!("row {} has an empty disease name", index + 1),
                });
            }
            if !seen.insert(record.name.to_lowercase()) {
                return Err(GuideError::DatasetParseError {
                    message: format!("duplicate disease name '{}'", record.name),
                });
            }
        }
        Ok(Self { records })
    }

    pub fn embedded() -> Result<Self> {
        Self::from_csv_bytes(EMBEDDED_CSV.as_bytes())
    }

    pub fn from_csv_bytes(data: &[u8]) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(data);

        let headers = reader.headers()?.clone();
        if !headers.iter().any(|h| h == "Disease") {
            return Err(GuideError::DatasetParseError {
                message: "missing required column 'Disease'".to_string(),
            });
        }

        let mut records = Vec::new();
        for row in reader.deserialize::<CsvRow>() {
            records.push(DiseaseRecord::from(row?));
        }

        tracing::debug!("Parsed {} disease records", records.len());
        Self::new(records)
    }

    /// Loads a dataset file through the given storage.
    pub async fn load<S: Storage>(storage: &S, path: &str) -> Result<Self> {
        let data = read_dataset_file(storage, path).await?;
        Self::from_csv_bytes(&data)
    }

    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for record in &self.records {
            writer.serialize(CsvRow::from(record))?;
        }
        let bytes = writer.into_inner().map_err(|e| GuideError::IoError(e.into_error()))?;
        String::from_utf8(bytes).map_err(|e| GuideError::DatasetParseError {
            message: e.to_string(),
        })
    }

    /// Writes the CSV export through storage and returns where it landed.
    pub async fn export<S: Storage>(&self, storage: &S, file_name: &str) -> Result<String> {
        let csv = self.to_csv()?;
        tracing::debug!("Exporting {} records ({} bytes)", self.len(), csv.len());
        storage.write_file(file_name, csv.as_bytes()).await
    }

    pub fn records(&self) -> &[DiseaseRecord] {
        &self.records
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    Embedded,
    File(String),
}

impl DatasetSource {
    pub fn from_option(path: Option<&str>) -> Self {
        match path {
            Some(p) => DatasetSource::File(p.to_string()),
            None => DatasetSource::Embedded,
        }
    }
}

/// An uploaded dataset waiting to be promoted.
#[derive(Debug, Clone)]
pub struct StagedDataset {
    pub label: String,
    pub staged_at: DateTime<Utc>,
    pub dataset: Dataset,
}

/// Active dataset plus a separate staging slot for uploads.
#[derive(Debug)]
pub struct DatasetStore {
    active: Dataset,
    staged: Option<StagedDataset>,
}

impl DatasetStore {
    pub fn new(active: Dataset) -> Self {
        Self {
            active,
            staged: None,
        }
    }

    pub async fn open<S: Storage>(storage: &S, source: &DatasetSource) -> Result<Self> {
        let dataset = match source {
            DatasetSource::Embedded => Dataset::embedded()?,
            DatasetSource::File(path) => Dataset::load(storage, path).await?,
        };
        tracing::info!("📚 Loaded {} disease records", dataset.len());
        Ok(Self::new(dataset))
    }

    pub fn active(&self) -> &Dataset {
        &self.active
    }

    pub fn staged(&self) -> Option<&StagedDataset> {
        self.staged.as_ref()
    }

    /// Parses an upload into the staging slot. On failure nothing changes.
    pub fn stage_upload(&mut self, label: &str, data: &[u8]) -> Result<&StagedDataset> {
        let dataset = Dataset::from_csv_bytes(data).inspect_err(|e| {
            tracing::warn!("Rejected upload '{}': {}", label, e);
        })?;

        tracing::info!("📥 Staged '{}' with {} records", label, dataset.len());
        Ok(&*self.staged.insert(StagedDataset {
            label: label.to_string(),
            staged_at: Utc::now(),
            dataset,
        }))
    }

    /// Reads an uploaded file through storage and stages it.
    pub async fn stage_file<S: Storage>(&mut self, storage: &S, path: &str) -> Result<&StagedDataset> {
        let data = read_dataset_file(storage, path).await?;
        self.stage_upload(path, &data)
    }

    /// Swaps the staged dataset in. Returns false when nothing is staged.
    pub fn promote_staged(&mut self) -> bool {
        match self.staged.take() {
            Some(staged) => {
                tracing::info!("Promoting staged dataset '{}'", staged.label);
                self.active = staged.dataset;
                true
            }
            None => false,
        }
    }

    pub fn discard_staged(&mut self) -> Option<StagedDataset> {
        self.staged.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> DiseaseRecord {
        DiseaseRecord {
            name: name.to_string(),
            foods_to_eat: vec!["Oats".to_string()],
            foods_to_avoid: vec!["Sugar".to_string()],
            note: None,
        }
    }

    #[test]
    fn test_embedded_dataset_loads() {
        let dataset = Dataset::embedded().unwrap();
        assert!(dataset.len() >= 10);
        assert!(dataset.names().any(|n| n == "Hypertension"));
        assert!(dataset.names().any(|n| n == "Diabetes"));
    }

    #[test]
    fn test_items_are_split_and_note_optional() {
        let csv = "Disease,Foods_to_Eat,Foods_to_Avoid,Nutritional_Note\n\
                   Gout,\"Cherries, Water ,\",Beer,\n";
        let dataset = Dataset::from_csv_bytes(csv.as_bytes()).unwrap();
        let gout = &dataset.records()[0];
        assert_eq!(gout.foods_to_eat, vec!["Cherries", "Water"]);
        assert_eq!(gout.foods_to_avoid, vec!["Beer"]);
        assert_eq!(gout.note, None);
    }

    #[test]
    fn test_note_column_may_be_missing() {
        let csv = "Disease,Foods_to_Eat,Foods_to_Avoid\nGout,Cherries,Beer\n";
        let dataset = Dataset::from_csv_bytes(csv.as_bytes()).unwrap();
        assert_eq!(dataset.records()[0].note, None);
    }

    #[test]
    fn test_rejects_duplicate_names_case_insensitive() {
        let err = Dataset::new(vec![record("Gout"), record("GOUT")]).unwrap_err();
        assert!(matches!(err, GuideError::DatasetParseError { .. }));
    }

    #[test]
    fn test_rejects_empty_name() {
        let csv = "Disease,Foods_to_Eat,Foods_to_Avoid,Nutritional_Note\n ,Oats,Sugar,\n";
        assert!(Dataset::from_csv_bytes(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_rejects_missing_disease_column() {
        let csv = "Name,Foods_to_Eat\nGout,Cherries\n";
        let err = Dataset::from_csv_bytes(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Disease"));
    }

    #[test]
    fn test_export_reparses_to_same_dataset() {
        let dataset = Dataset::embedded().unwrap();
        let csv = dataset.to_csv().unwrap();
        assert!(csv.starts_with("Disease,Foods_to_Eat,Foods_to_Avoid,Nutritional_Note"));
        assert_eq!(Dataset::from_csv_bytes(csv.as_bytes()).unwrap(), dataset);
    }

    #[test]
    fn test_failed_upload_keeps_active_and_staged() {
        let mut store = DatasetStore::new(Dataset::new(vec![record("Gout")]).unwrap());
        let good = "Disease,Foods_to_Eat,Foods_to_Avoid\nAnemia,Spinach,Tea\n";
        store.stage_upload("good.csv", good.as_bytes()).unwrap();

        let bad = "Disease,Foods_to_Eat\nGout,Oats,Extra\n";
        assert!(store.stage_upload("bad.csv", bad.as_bytes()).is_err());

        assert_eq!(store.active().records()[0].name, "Gout");
        assert_eq!(store.staged().unwrap().label, "good.csv");
    }

    #[test]
    fn test_promote_and_discard() {
        let mut store = DatasetStore::new(Dataset::new(vec![record("Gout")]).unwrap());
        assert!(!store.promote_staged());

        let upload = "Disease,Foods_to_Eat,Foods_to_Avoid\nAnemia,Spinach,Tea\n";
        store.stage_upload("upload.csv", upload.as_bytes()).unwrap();
        assert_eq!(store.active().records()[0].name, "Gout");

        assert!(store.promote_staged());
        assert_eq!(store.active().records()[0].name, "Anemia");
        assert!(store.staged().is_none());

        store.stage_upload("again.csv", upload.as_bytes()).unwrap();
        assert!(store.discard_staged().is_some());
        assert!(store.staged().is_none());
    }
}
