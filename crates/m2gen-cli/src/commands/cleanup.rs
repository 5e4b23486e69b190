use console::style;
use miette::Result;

use m2gen_core::{cleanup, CleanupOutcome, Reporter};

use super::{home_dir, load_inputs, log_format, reporter, run_state};
use crate::cli::CommonArgs;

/// Cleanup only reports problems; the post step must not fail the job.
pub fn run(common: CommonArgs) -> Result<()> {
    let mut reporter = reporter(log_format(&common));
    cleanup_or_warn(&common, reporter.as_mut());
    Ok(())
}

fn cleanup_or_warn(common: &CommonArgs, reporter: &mut dyn Reporter) {
    if let Err(e) = cleanup_settings(common, reporter) {
        reporter.warning(&format!("Cleanup maven settings skipped: {e}"));
    }
}

fn cleanup_settings(common: &CommonArgs, reporter: &mut dyn Reporter) -> Result<()> {
    let inputs = load_inputs(common)?;
    let mut state = run_state(common)?;
    let home = home_dir(&inputs)?;

    if cleanup(&inputs, &home, state.as_mut(), reporter) == CleanupOutcome::Removed {
        eprintln!("{} Settings removed", style("✓").green().bold());
    }
    Ok(())
}
