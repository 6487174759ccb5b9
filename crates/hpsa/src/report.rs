use hpsa_engine::scenario::{ScenarioError, ScenarioReport};
use serde_json::json;

pub fn passed(report: &ScenarioReport, as_json: bool) -> anyhow::Result<()> {
    if as_json {
        let mut value = serde_json::to_value(report)?;
        value["status"] = json!("passed");
        println!("{}", value);
        return Ok(());
    }

    println!(
        "PASS {} ({} steps, {} screenshots, {:.1}s)",
        report.scenario,
        report.steps.len(),
        report.screenshots.len(),
        report.elapsed.as_secs_f64()
    );
    for step in report.failed_steps() {
        println!(
            "  tolerated: {} after {} attempt(s): {}",
            step.name,
            step.attempts,
            step.status.as_deref().unwrap_or("failed")
        );
    }
    Ok(())
}

pub fn failed(error: &ScenarioError, as_json: bool) -> anyhow::Result<()> {
    let steps = error.steps();

    if as_json {
        let value = json!({
            "scenario": error.scenario(),
            "status": "failed",
            "code": error.code(),
            "error": error.to_string(),
            "steps": steps,
        });
        println!("{}", value);
        return Ok(());
    }

    println!("FAIL {} [{}]: {}", error.scenario(), error.code(), error);
    if let Some(last) = steps.last() {
        println!("  last step: {} after {} attempt(s)", last.name, last.attempts);
    }
    Ok(())
}
