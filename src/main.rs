use anyhow::Context;
use clap::Parser;
use mail_merge::domain::model::MergeReport;
use mail_merge::domain::ports::Prompt;
use mail_merge::utils::error::{ErrorSeverity, MergeError};
use mail_merge::utils::{logger, validation::Validate};
use mail_merge::{
    CliConfig, LocalStorage, ScriptedPrompt, Settings, SystemOpener, TerminalPrompt, Workflow,
};
use std::path::Path;

const EXIT_PARTIAL_FAILURE: i32 = 2;
const EXIT_INTERRUPTED: i32 = 130;

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_logger(config.verbose, config.log_json);

    tracing::info!("Starting mail-merge");
    tracing::debug!("CLI config: {:?}", config);

    let settings = config
        .load_settings()
        .and_then(|s| s.validate().map(|()| s))
        .unwrap_or_else(|e| exit_on_config_error(e));

    let outcome = match &config.script {
        Some(path) => {
            tracing::info!("Replaying answers from {}", path.display());
            let prompt = load_script(path).unwrap_or_else(|e| exit_on_config_error(e));
            run(prompt, settings)
        }
        None => run(TerminalPrompt::stdio(), settings),
    };

    match outcome {
        Ok(report) => {
            println!("{}", report.summary());
            if let Some(path) = &config.report {
                write_report(path, &report)
                    .with_context(|| format!("writing report to {}", path.display()))?;
                tracing::info!("Report saved to {}", path.display());
            }
            if !report.is_success() {
                std::process::exit(EXIT_PARTIAL_FAILURE);
            }
        }
        Err(MergeError::Aborted) => {
            tracing::info!("Mail merge cancelled by user");
            std::process::exit(EXIT_INTERRUPTED);
        }
        Err(e) => {
            tracing::error!("Mail merge failed: {} (severity: {:?})", e, e.severity());
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
    }

    Ok(())
}

fn exit_on_config_error(e: MergeError) -> ! {
    tracing::error!("Configuration failed: {}", e);
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(1);
}

/// A script that cannot be loaded is a configuration error.
fn load_script(path: &Path) -> mail_merge::Result<ScriptedPrompt> {
    ScriptedPrompt::from_file(path).map_err(|e| MergeError::ConfigError {
        message: format!("cannot read script {}: {}", path.display(), e),
    })
}

fn run<P: Prompt>(prompt: P, settings: Settings) -> mail_merge::Result<MergeReport> {
    let mut workflow = Workflow::new(prompt, LocalStorage::default(), SystemOpener, settings);
    workflow.run()
}

fn write_report(path: &Path, report: &MergeReport) -> mail_merge::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)?;
    Ok(())
}
