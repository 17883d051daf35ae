use clap::Parser;
use hero_combiner::core::plan::CombinePlan;
use hero_combiner::domain::ports::ConfigProvider;
use hero_combiner::utils::{logger, validation::Validate};
use hero_combiner::{CombineEngine, CombinePipeline, LocalStorage, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-combine")]
#[command(about = "Hero combiner driven by a TOML job file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "combine.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Override the max group size from config
    #[arg(short = 'k', long)]
    max_group_size: Option<usize>,

    /// Show what would be generated without reading or writing files
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting TOML-based hero combiner");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 應用命令列覆蓋設定
    if let Some(max_group_size) = args.max_group_size {
        config.set_max_group_size(max_group_size);
        tracing::info!("🔧 Max group size overridden to: {}", max_group_size);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.severity().exit_code());
    }

    tracing::info!(
        "✅ Job '{}' loaded: {} hero files, max group size {}",
        config.job.name,
        config.input_files().len(),
        config.max_group_size()
    );

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No files will be read or written");
        if let Some(description) = &config.job.description {
            println!("{}", description);
        }
        println!("{}", CombinePlan::from_config(&config));
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::current_dir();
    let pipeline = CombinePipeline::new(storage, config);
    let engine = CombineEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(output_path) => {
            println!("✅ Combinations generated successfully!");
            println!("📁 Archive saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Combination run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            std::process::exit(e.severity().exit_code());
        }
    }

    Ok(())
}
