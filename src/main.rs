use clap::Parser;
use titanic_predictor::app::bootstrap;
use titanic_predictor::utils::error::ErrorSeverity;
use titanic_predictor::utils::{logger, validation::Validate};
use titanic_predictor::CliConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let settings = match cli.resolve() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    logger::init_logger(settings.verbose, settings.json_logs);

    tracing::info!("Starting titanic-predictor");
    tracing::debug!("Resolved settings: {:?}", settings);

    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = bootstrap::serve(&settings).await {
        tracing::error!(
            "❌ Server stopped: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());

        let exit_code = exit_code_for(e.severity());
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

fn exit_code_for(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Low => 0, // warning only
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_severity_exits_successfully() {
        assert_eq!(exit_code_for(ErrorSeverity::Low), 0);
        assert_eq!(exit_code_for(ErrorSeverity::Medium), 2);
        assert_eq!(exit_code_for(ErrorSeverity::High), 1);
        assert_eq!(exit_code_for(ErrorSeverity::Critical), 3);
    }
}
