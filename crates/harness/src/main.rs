use anyhow::Context;

use rolegate_harness::{HarnessConfig, run_full_test_suite};

fn main() -> anyhow::Result<()> {
    rolegate_observability::init();

    let config = HarnessConfig::from_env().context("invalid harness configuration")?;
    let summary = run_full_test_suite(&config);

    println!("{}", serde_json::to_string_pretty(&summary)?);

    if !summary.is_success() {
        for issue in &summary.issues {
            tracing::error!("{issue}");
        }
        anyhow::bail!("{} of {} checks failed", summary.failed, summary.total_tests);
    }
    Ok(())
}
