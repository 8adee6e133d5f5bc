pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use self::args::{CliConfig, Command, PreferenceArgs};

#[cfg(feature = "cli")]
mod args {
    use super::toml_config::GuideConfig;
    use crate::core::PreferenceSet;
    use clap::{Args, Parser, Subcommand};

    #[derive(Debug, Clone, Parser)]
    #[command(name = "diet-guide")]
    #[command(about = "Look up foods to eat and avoid for a disease")]
    pub struct CliConfig {
        /// Path to TOML configuration file
        #[arg(short, long, global = true)]
        pub config: Option<String>,

        /// External dataset CSV (defaults to the built-in table)
        #[arg(long, global = true)]
        pub dataset: Option<String>,

        #[arg(short, long, global = true, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, global = true, help = "Emit logs as JSON")]
        pub log_json: bool,

        #[command(subcommand)]
        pub command: Command,
    }

    #[derive(Debug, Clone, Copy, Default, Args)]
    pub struct PreferenceArgs {
        /// Redact meat, fish and egg items
        #[arg(long)]
        pub vegetarian: bool,

        /// Redact sugary items
        #[arg(long)]
        pub low_sugar: bool,

        /// Redact salty and processed items
        #[arg(long)]
        pub low_sodium: bool,
    }

    impl PreferenceArgs {
        /// Flags can only switch a preference on, never off.
        pub fn merged_with(&self, base: PreferenceSet) -> PreferenceSet {
            PreferenceSet {
                vegetarian: base.vegetarian || self.vegetarian,
                low_sugar: base.low_sugar || self.low_sugar,
                low_sodium: base.low_sodium || self.low_sodium,
            }
        }
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// Search diseases by name (substring, or fuzzy with --fuzzy)
        Search {
            /// Disease name; may be misspelled when --fuzzy is set
            query: Vec<String>,

            #[arg(long)]
            fuzzy: bool,

            /// Maximum number of fuzzy results
            #[arg(long)]
            limit: Option<usize>,

            #[command(flatten)]
            prefs: PreferenceArgs,

            #[arg(long)]
            json: bool,
        },
        /// Show one disease picked from the list by its exact name
        Show {
            name: String,

            #[command(flatten)]
            prefs: PreferenceArgs,

            #[arg(long)]
            json: bool,
        },
        /// List the available disease names
        List,
        /// Recommend Indian dishes, optionally for one condition
        Dishes {
            #[arg(long)]
            condition: Option<String>,

            #[command(flatten)]
            prefs: PreferenceArgs,
        },
        /// Export the loaded dataset as CSV
        Export {
            /// Output directory
            #[arg(long)]
            output: Option<String>,

            #[arg(long)]
            file_name: Option<String>,
        },
        /// Check a replacement dataset without activating it
        Validate { file: String },
    }

    impl CliConfig {
        /// 命令列參數覆蓋設定檔
        pub fn apply_overrides(&self, config: &mut GuideConfig) {
            if let Some(dataset) = &self.dataset {
                config.dataset.path = Some(dataset.clone());
            }
            config.logging.verbose |= self.verbose;
            config.logging.json |= self.log_json;

            match &self.command {
                Command::Search {
                    fuzzy,
                    limit,
                    prefs,
                    ..
                } => {
                    config.search.fuzzy |= *fuzzy;
                    if let Some(limit) = limit {
                        config.search.limit = *limit;
                    }
                    config.preferences = prefs.merged_with(config.preferences);
                }
                Command::Show { prefs, .. } | Command::Dishes { prefs, .. } => {
                    config.preferences = prefs.merged_with(config.preferences);
                }
                Command::Export { output, file_name } => {
                    if let Some(output) = output {
                        config.export.output_path = output.clone();
                    }
                    if let Some(file_name) = file_name {
                        config.export.file_name = file_name.clone();
                    }
                }
                Command::List | Command::Validate { .. } => {}
            }
        }
    }

}
