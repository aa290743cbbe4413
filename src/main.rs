use clap::Parser;
use fraudshield::config::Command;
use fraudshield::core::{CatalogProvider, HistoryStore, ScanRecord, ScanRequest, Scanner};
use fraudshield::utils::error::ErrorSeverity;
use fraudshield::utils::{logger, validation::Validate};
use fraudshield::{
    BundledCatalog, CliConfig, EducationLibrary, FileCatalog, LocalStorage, MemoryHistory,
    RemoteCatalog, ReportExporter, RuleScanner, ScanEngine,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting fraudshield CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    // Catalogue source priority: remote endpoint, then file override, then
    // the bundled rules.
    let provider: Box<dyn CatalogProvider> = if let Some(endpoint) = &config.rules_endpoint {
        tracing::info!("🌐 Using remote rule catalogue: {}", endpoint);
        Box::new(RemoteCatalog::new(endpoint.clone()))
    } else if let Some(path) = &config.catalog_file {
        tracing::info!("📄 Using rule catalogue file: {}", path);
        Box::new(FileCatalog::new(path))
    } else {
        Box::new(BundledCatalog)
    };

    let scanner = RuleScanner::new(provider);
    let engine = ScanEngine::new_with_monitoring(scanner, MemoryHistory::new(), config.monitor);

    if let Err(e) = run(&config, &engine).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run(
    config: &CliConfig,
    engine: &ScanEngine<impl Scanner, impl HistoryStore>,
) -> fraudshield::Result<()> {
    match &config.command {
        Command::ScanCall { number, name } => {
            let record = engine.analyze_call(number.clone(), name.clone()).await?;
            print_verdict(&record);
        }
        Command::ScanSms { message, sender } => {
            let record = engine.analyze_sms(message.clone(), sender.clone()).await?;
            print_verdict(&record);
        }
        Command::ScanLink { url } => {
            let record = engine.analyze_link(url.clone()).await?;
            print_verdict(&record);
        }
        Command::ScanQr { content } => {
            let record = engine.analyze_qr(content.clone()).await?;
            print_verdict(&record);
        }
        Command::Report { input } => {
            let content = std::fs::read_to_string(input)?;
            let requests: Vec<ScanRequest> = serde_json::from_str(&content)?;
            tracing::info!("📨 Scanning batch of {} items", requests.len());

            for request in requests {
                engine.scan(request).await?;
            }

            let records = engine.history().await?;
            let storage = LocalStorage::new(config.output_path.clone());
            let exporter = ReportExporter::new(storage, config.output_path.clone());
            let report_path = exporter.export(&records).await?;

            let stats = engine.stats().await?;
            println!(
                "✅ Scanned {} items: {} threats, {} clean",
                stats.total_scans, stats.threats_detected, stats.safe_count
            );
            println!("📁 Report saved to: {}", report_path);
        }
        Command::Lessons => {
            let library = EducationLibrary::bundled()?;
            for lesson in library.lessons() {
                println!(
                    "{}  {} ({} min, {})",
                    lesson.id, lesson.title, lesson.duration_minutes, lesson.level
                );
            }
        }
    }

    Ok(())
}

fn print_verdict(record: &ScanRecord) {
    if record.verdict.matched {
        println!(
            "⚠️ THREAT DETECTED [{}] {}",
            record.verdict.risk_level.as_str().to_uppercase(),
            record.verdict.category
        );
    } else {
        println!("✅ No threat found");
    }
    println!("Reason: {}", record.verdict.reason);
    println!("Advice: {}", record.verdict.recommendation);
}
