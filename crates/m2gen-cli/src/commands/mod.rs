pub mod cleanup;
pub mod generate;

use std::path::PathBuf;

use miette::{miette, Result};

use m2gen_core::input::keys;
use m2gen_core::{
    ActionsReporter, ActionsState, ConsoleReporter, FileState, Inputs, M2genError, Reporter,
    RunState,
};

use crate::cli::{CommonArgs, LogFormat};

pub fn load_inputs(args: &CommonArgs) -> Result<Inputs> {
    layer_inputs(Inputs::from_env(), args)
}

/// Layer the inputs file, then `--input` pairs, then `--path` over `base`;
/// later sources win.
fn layer_inputs(mut inputs: Inputs, args: &CommonArgs) -> Result<Inputs> {
    if let Some(file) = &args.inputs_file {
        inputs.merge(Inputs::from_toml_file(file)?);
    }
    for pair in &args.input {
        let (name, value) = pair
            .split_once('=')
            .ok_or_else(|| miette!("Invalid input '{pair}': expected NAME=VALUE"))?;
        inputs.insert(name.trim(), value);
    }
    if let Some(path) = &args.path {
        inputs.insert(keys::PATH, path.as_str());
    }
    Ok(inputs)
}

/// Home is only needed when no settings path was given.
pub fn home_dir(inputs: &Inputs) -> Result<PathBuf> {
    resolve_home(dirs::home_dir(), inputs)
}

fn resolve_home(home: Option<PathBuf>, inputs: &Inputs) -> Result<PathBuf> {
    match home {
        Some(home) => Ok(home),
        None if inputs.get(keys::PATH).is_some() => Ok(PathBuf::new()),
        None => Err(M2genError::HomeNotFound.into()),
    }
}

fn on_actions_runner() -> bool {
    std::env::var("GITHUB_ACTIONS").is_ok_and(|v| v == "true")
}

pub fn log_format(args: &CommonArgs) -> LogFormat {
    args.log_format.unwrap_or(if on_actions_runner() {
        LogFormat::Actions
    } else {
        LogFormat::Console
    })
}

pub fn reporter(format: LogFormat) -> Box<dyn Reporter> {
    match format {
        LogFormat::Console => Box::new(ConsoleReporter),
        LogFormat::Actions => Box::new(ActionsReporter::new(std::io::stdout())),
    }
}

/// Mirror a fatal error into the workflow log so the runner annotates it.
/// On the console miette already prints it.
pub fn report_fatal(format: LogFormat, reporter: &mut dyn Reporter, message: &str) {
    if format == LogFormat::Actions {
        reporter.error(message);
    }
}

/// The runner's step state when available, a TOML state file otherwise.
pub fn run_state(args: &CommonArgs) -> Result<Box<dyn RunState>> {
    if let Some(state) = ActionsState::from_env() {
        return Ok(Box::new(state));
    }
    let path = args
        .state_file
        .clone()
        .or_else(FileState::default_path)
        .ok_or_else(|| miette!("No cache directory found; pass --state-file"))?;
    Ok(Box::new(FileState::new(path)))
}
