use std::path::PathBuf;

use console::style;
use miette::Result;

use m2gen_core::{generate, GenerateOptions, Reporter, TemplateLibrary, WriteOutcome};

use super::{home_dir, load_inputs, log_format, report_fatal, reporter, run_state};
use crate::cli::CommonArgs;

pub fn run(common: CommonArgs, override_existing: bool, templates: Option<PathBuf>) -> Result<()> {
    let format = log_format(&common);
    let mut reporter = reporter(format);
    let result = generate_settings(&common, override_existing, templates, reporter.as_mut());
    if let Err(e) = &result {
        report_fatal(format, reporter.as_mut(), &e.to_string());
    }
    result
}

fn generate_settings(
    common: &CommonArgs,
    override_existing: bool,
    templates: Option<PathBuf>,
    reporter: &mut dyn Reporter,
) -> Result<()> {
    let mut inputs = load_inputs(common)?;
    if override_existing {
        inputs.insert("override", "true");
    }
    let mut state = run_state(common)?;

    let options = GenerateOptions {
        home: home_dir(&inputs)?,
        inputs,
        templates: templates
            .map(TemplateLibrary::from_dir)
            .unwrap_or_default(),
    };

    let generated = generate(&options, state.as_mut(), reporter)?;
    if generated.outcome == WriteOutcome::Skipped {
        return Ok(());
    }

    if let Some(summary) = &generated.summary {
        eprintln!(
            "\n{} Settings {} at {}",
            style("✓").green().bold(),
            generated.outcome,
            style(generated.path.display()).cyan()
        );
        eprintln!("  {summary}");
        if !summary.profiles.is_empty() {
            eprintln!("  Profiles: {}", summary.profiles.join(", "));
        }
        if summary.rejected > 0 {
            eprintln!(
                "  {} {} record(s) skipped",
                style("⚠").yellow(),
                summary.rejected
            );
        }
    }

    Ok(())
}
