use anyhow::Result;
use diet_guide::{Dataset, DatasetSource, DatasetStore, GuideError, LocalStorage};
use tempfile::TempDir;

const CUSTOM_CSV: &str = "Disease,Foods_to_Eat,Foods_to_Avoid,Nutritional_Note
Migraine,\"Ginger tea, Almonds, Water\",\"Aged cheese, Processed meat\",Keep a regular sleep schedule.
Asthma,\"Apples, Spinach\",\"Sulphite-rich pickles\",
";

fn storage_for(temp_dir: &TempDir) -> LocalStorage {
    LocalStorage::new(temp_dir.path().to_str().unwrap().to_string())
}

#[tokio::test]
async fn test_missing_dataset_file_is_not_found() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage = storage_for(&temp_dir);

    let source = DatasetSource::File("does-not-exist.csv".to_string());
    let err = DatasetStore::open(&storage, &source).await.unwrap_err();
    assert!(matches!(err, GuideError::DatasetNotFound { ref path } if path == "does-not-exist.csv"));
    Ok(())
}

#[tokio::test]
async fn test_open_external_dataset() -> Result<()> {
    let temp_dir = TempDir::new()?;
    tokio::fs::write(temp_dir.path().join("custom.csv"), CUSTOM_CSV).await?;
    let storage = storage_for(&temp_dir);

    let store = DatasetStore::open(&storage, &DatasetSource::File("custom.csv".to_string())).await?;
    let names: Vec<&str> = store.active().names().collect();
    assert_eq!(names, vec!["Migraine", "Asthma"]);
    assert_eq!(store.active().records()[1].note, None);
    Ok(())
}

#[tokio::test]
async fn test_embedded_source() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage = storage_for(&temp_dir);
    let store = DatasetStore::open(&storage, &DatasetSource::from_option(None)).await?;
    assert_eq!(store.active(), &Dataset::embedded()?);
    Ok(())
}

#[tokio::test]
async fn test_export_writes_same_tabular_format() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage = storage_for(&temp_dir);
    let dataset = Dataset::embedded()?;

    let path = dataset.export(&storage, "exports/guide.csv").await?;
    assert!(path.ends_with("guide.csv"));

    let written = tokio::fs::read(temp_dir.path().join("exports/guide.csv")).await?;
    assert_eq!(Dataset::from_csv_bytes(&written)?, dataset);
    Ok(())
}

#[tokio::test]
async fn test_bad_upload_leaves_active_dataset() -> Result<()> {
    let temp_dir = TempDir::new()?;
    tokio::fs::write(temp_dir.path().join("bad.csv"), "Disease,Foods_to_Eat\nGout\n").await?;
    tokio::fs::write(temp_dir.path().join("dupes.csv"), "Disease\nGout\ngout\n").await?;
    tokio::fs::write(temp_dir.path().join("custom.csv"), CUSTOM_CSV).await?;
    let storage = storage_for(&temp_dir);

    let mut store = DatasetStore::new(Dataset::embedded()?);
    let before = store.active().clone();

    let err = store.stage_file(&storage, "bad.csv").await.unwrap_err();
    assert!(matches!(err, GuideError::DatasetParseError { .. }));
    let err = store.stage_file(&storage, "dupes.csv").await.unwrap_err();
    assert!(matches!(err, GuideError::DatasetParseError { .. }));
    let err = store.stage_file(&storage, "missing.csv").await.unwrap_err();
    assert!(matches!(err, GuideError::DatasetNotFound { .. }));
    assert!(store.staged().is_none());
    assert_eq!(store.active(), &before);

    // 成功的上傳只放進暫存區，需明確啟用
    store.stage_file(&storage, "custom.csv").await?;
    assert_eq!(store.active(), &before);
    assert!(store.promote_staged());
    assert_eq!(store.active().len(), 2);
    Ok(())
}
