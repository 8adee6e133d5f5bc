use clap::Parser;
use diet_guide::config::Command;
use diet_guide::core::ConfigProvider;
use diet_guide::utils::error::{ErrorSeverity, GuideError};
use diet_guide::utils::{logger, validation::Validate};
use diet_guide::{
    CliConfig, DatasetSource, DatasetStore, DishCatalog, FilteredRecord, GuideConfig,
    LocalStorage, LookupEngine, LookupOptions, LookupOutcome,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 載入設定檔（可省略）
    let mut config = match &cli.config {
        Some(path) => match GuideConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => GuideConfig::default(),
    };
    cli.apply_overrides(&mut config);

    // 初始化日誌
    if config.logging.json {
        logger::init_json_logger(config.logging.verbose);
    } else {
        logger::init_cli_logger(config.logging.verbose);
    }
    tracing::debug!("Effective config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        fail(&e);
    }

    let storage = LocalStorage::current_dir();
    let source = DatasetSource::from_option(config.dataset_path());
    let mut store = match DatasetStore::open(&storage, &source).await {
        Ok(store) => store,
        Err(e) => fail(&e),
    };

    let result = match &cli.command {
        Command::Search { query, json, .. } => {
            let engine = LookupEngine::new(store.active(), LookupOptions::from_provider(&config));
            let outcome = engine.search(&query.join(" "));
            print_outcome(&outcome, *json)
        }
        Command::Show { name, json, .. } => {
            let engine = LookupEngine::new(store.active(), LookupOptions::from_provider(&config));
            engine
                .select(name)
                .and_then(|record| print_outcome(&LookupOutcome::Found(vec![record]), *json))
        }
        Command::List => {
            for name in store.active().names() {
                println!("{}", name);
            }
            Ok(())
        }
        Command::Dishes { condition, .. } => {
            let catalog = DishCatalog::embedded();
            let dishes = catalog.recommend(condition.as_deref(), &config.preferences());
            match condition.as_deref().filter(|c| !c.eq_ignore_ascii_case("none")) {
                Some(condition) => println!("Recommended Indian foods for {}:", condition),
                None => println!("Recommended healthy Indian foods:"),
            }
            if dishes.is_empty() {
                println!("  (none) Known conditions: {}", catalog.conditions().join(", "));
            }
            for dish in dishes {
                println!("  • {}", dish.name);
            }
            Ok(())
        }
        Command::Export { .. } => {
            let output = LocalStorage::new(config.output_path().to_string());
            store
                .active()
                .export(&output, &config.export.file_name)
                .await
                .map(|path| {
                    tracing::info!("📁 Dataset exported to: {}", path);
                    println!("✅ Exported {} records to {}", store.active().len(), path);
                })
        }
        Command::Validate { file } => validate_upload(&storage, &mut store, file).await,
    };

    if let Err(e) = result {
        fail(&e);
    }

    Ok(())
}

async fn validate_upload(
    storage: &LocalStorage,
    store: &mut DatasetStore,
    file: &str,
) -> diet_guide::Result<()> {
    match store.stage_file(storage, file).await {
        Ok(staged) => {
            println!(
                "✅ '{}' is valid: {} records (staged at {})",
                staged.label,
                staged.dataset.len(),
                staged.staged_at.format("%Y-%m-%d %H:%M:%S UTC")
            );
            for name in staged.dataset.names() {
                println!("  • {}", name);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!(
                "❌ Upload rejected, current dataset ({} records) left unchanged",
                store.active().len()
            );
            Err(e)
        }
    }
}

fn print_outcome(outcome: &LookupOutcome, json: bool) -> diet_guide::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }

    match outcome {
        LookupOutcome::EmptyQuery => println!("Enter a disease name to search."),
        LookupOutcome::NoMatch => println!("No matching disease found."),
        LookupOutcome::Found(records) => {
            for record in records {
                print_record(record);
            }
        }
    }
    Ok(())
}

fn print_record(record: &FilteredRecord) {
    match record.score {
        Some(score) => println!("🩺 {} (match {:.0})", record.name, score),
        None => println!("🩺 {}", record.name),
    }
    println!("  ✅ Foods to eat:   {}", record.foods_to_eat);
    println!("  ❌ Foods to avoid: {}", record.foods_to_avoid);
    if let Some(note) = &record.note {
        println!("  📝 {}", note);
    }
    println!();
}

fn fail(e: &GuideError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
