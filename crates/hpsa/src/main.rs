mod report;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use hpsa_common::Fixtures;
use hpsa_engine::config::{ConfigLoader, HpsaConfig};
use hpsa_engine::device::VpdCommand;
use hpsa_engine::scenario::{Scenario, ScenarioRunner};
use hpsa_h::HeadlessDriver;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hpsa", version, about = "HP Support Assistant UI test harness")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Configuration file (defaults to ./hpsa.yaml, then ~/.hpsa/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the element and profile fixtures
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Directory screenshots are written to
    #[arg(long, global = true)]
    screenshot_dir: Option<PathBuf>,

    /// Launch the browser in visible mode (not headless)
    #[arg(long, global = true)]
    visible: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Run one or more scenarios
    Run {
        /// Scenario names, see `hpsa list`
        #[arg(required_unless_present = "all", conflicts_with = "all")]
        scenarios: Vec<Scenario>,

        /// Run every scenario
        #[arg(long)]
        all: bool,

        /// Print one JSON report per scenario on stdout
        #[arg(long)]
        json: bool,

        /// Continue with the next scenario after a failure
        #[arg(long)]
        keep_going: bool,
    },
    /// List the available scenarios
    List,
}

impl Args {
    async fn config(&self) -> anyhow::Result<HpsaConfig> {
        let mut config = match &self.config {
            Some(path) => ConfigLoader::load_from(path).await?,
            None => ConfigLoader::load_default().await?,
        };
        if let Some(dir) = &self.data_dir {
            config.paths.data_dir = dir.clone();
        }
        if let Some(dir) = &self.screenshot_dir {
            config.paths.screenshot_dir = dir.clone();
        }
        if self.visible {
            config.browser.visible = true;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries reports.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match &args.command {
        Command::List => {
            for scenario in Scenario::ALL {
                println!("{:<30} {}", scenario.name(), scenario.description());
            }
            Ok(())
        }
        Command::Run {
            scenarios,
            all,
            json,
            keep_going,
        } => {
            let scenarios = if *all {
                Scenario::ALL.to_vec()
            } else {
                scenarios.clone()
            };
            let config = args.config().await?;
            run(&config, &scenarios, *json, *keep_going).await
        }
    }
}

async fn run(
    config: &HpsaConfig,
    scenarios: &[Scenario],
    json: bool,
    keep_going: bool,
) -> anyhow::Result<()> {
    let fixtures = Fixtures::load_from_dir(&config.paths.data_dir).with_context(|| {
        format!(
            "loading fixtures from {}",
            config.paths.data_dir.display()
        )
    })?;
    let device = VpdCommand::new();
    let runner = ScenarioRunner::new(config, &fixtures, &device);
    let mut driver = HeadlessDriver::new(config.browser.clone());

    info!("Running {} scenario(s)", scenarios.len());
    let mut failed = Vec::new();
    for &scenario in scenarios {
        match runner.run(&mut driver, scenario).await {
            Ok(outcome) => report::passed(&outcome, json)?,
            Err(e) => {
                error!(scenario = scenario.name(), code = e.code(), "Scenario failed: {}", e);
                report::failed(&e, json)?;
                failed.push(scenario);
                if !keep_going {
                    info!("Stopping after the first failure");
                    break;
                }
            }
        }
    }

    if failed.is_empty() {
        info!("All scenarios passed");
        Ok(())
    } else {
        let names: Vec<_> = failed.iter().map(Scenario::name).collect();
        error!(failed = failed.len(), "Failed scenarios: {}", names.join(", "));
        bail!("{} scenario(s) failed: {}", failed.len(), names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_parses_scenario_names() {
        let args = Args::try_parse_from(["hpsa", "run", "cpu-check", "stress-cpu", "--json"]).unwrap();
        match args.command {
            Command::Run {
                scenarios, json, ..
            } => {
                assert_eq!(scenarios, vec![Scenario::CpuCheck, Scenario::StressCpu]);
                assert!(json);
            }
            Command::List => panic!("expected run"),
        }
    }

    #[test]
    fn test_run_rejects_unknown_scenario() {
        assert!(Args::try_parse_from(["hpsa", "run", "cpu-chek"]).is_err());
    }

    #[test]
    fn test_run_needs_a_scenario_or_all() {
        assert!(Args::try_parse_from(["hpsa", "run"]).is_err());
        assert!(Args::try_parse_from(["hpsa", "run", "--all", "walkthrough"]).is_err());
        assert!(Args::try_parse_from(["hpsa", "run", "--all"]).is_ok());
    }

    #[tokio::test]
    async fn test_flags_override_config_file() {
        let args = Args::try_parse_from([
            "hpsa",
            "--config",
            "/nonexistent/hpsa.yaml",
            "list",
        ])
        .unwrap();
        assert!(args.config().await.is_err());

        let args = Args::try_parse_from([
            "hpsa",
            "run",
            "--all",
            "--visible",
            "--screenshot-dir",
            "/tmp/shots",
        ])
        .unwrap();
        let config = args.config().await.unwrap();
        assert!(config.browser.visible);
        assert_eq!(config.paths.screenshot_dir, PathBuf::from("/tmp/shots"));
    }
}
