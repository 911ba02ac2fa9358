/*!
 * Lock Contention Benchmark - Driver
 *
 * Runs the read-heavy, write-heavy and balanced scenarios against the
 * exclusive and read/write lock strategies and prints one report per case.
 */

use lock_contention::harness::{DriverConfig, OutputFormat};
use lock_contention::{init_tracing, ContentionHarness, RunReport, ScenarioMatrix};
use miette::IntoDiagnostic;
use tracing::{info, warn};

fn main() -> miette::Result<()> {
    init_tracing();

    let config = DriverConfig::from_env()?;
    info!(
        scale = config.scale,
        repetitions = config.repetitions,
        task_mode = ?config.harness.task_mode,
        "Lock contention benchmark starting"
    );

    let harness = ContentionHarness::new(config.harness.clone())?;
    let matrix = ScenarioMatrix::standard(config.scale, config.repetitions);

    if config.output == OutputFormat::Table {
        println!("{}", RunReport::table_header());
    }

    for (kind, scenario) in matrix.cases() {
        let report = harness.run_kind(kind, scenario)?;

        if !report.is_consistent() {
            warn!(
                strategy = %report.strategy,
                scenario = %report.scenario.name,
                expected = report.scenario.expected_count(),
                actual = report.final_count,
                "Final counter does not match issued writes"
            );
        }

        match config.output {
            OutputFormat::Table => println!("{}", report.summary_line()),
            OutputFormat::Json => println!("{}", serde_json::to_string(&report).into_diagnostic()?),
        }
    }

    info!("Benchmark complete");
    Ok(())
}
