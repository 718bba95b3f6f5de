use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;
use std::thread;
use std::time::{Duration, Instant as WallInstant};

use thiserror::Error;

use dataehora::configuration::Configuration;
use dataehora::display::dashboard::Dashboard;
use dataehora::display::displaysink::{DisplaySink, TerminalDisplay};
use dataehora::logging::minimaltracer::MinimalTracer;
use dataehora::scheduler::scheduler::Scheduler;
use dataehora::theme::preferencestore::{MemoryPreferenceStore, PreferenceStore};
use dataehora::time::timesource::TimeSource;

const LOOP_TICK: Duration = Duration::from_millis(250);

const USAGE: &'static str = "usage: dataehora [--once] [config.json]";

#[derive(Debug, Default, PartialEq)]
struct Args {
    config_path: Option<PathBuf>,
    once: bool,
    help: bool
}

#[derive(Debug, PartialEq, Error)]
enum ArgsError {
    #[error("unknown option '{0}'")]
    UnknownOption(String),
    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String)
}

fn parse_args<I>(args: I) -> Result<Args, ArgsError>
    where I: IntoIterator<Item = String> {
    let mut parsed = Args::default();
    for arg in args {
        match arg.as_str() {
            "--once" => parsed.once = true,
            "-h" | "--help" => parsed.help = true,
            option if option.starts_with('-') => return Err(ArgsError::UnknownOption(option.to_owned())),
            extra if parsed.config_path.is_some() => return Err(ArgsError::UnexpectedArgument(extra.to_owned())),
            path => parsed.config_path = Some(PathBuf::from(path))
        }
    }
    Ok(parsed)
}

fn main() -> ExitCode {
    if let Err(error) = MinimalTracer::register() {
        eprintln!("failed to install tracer: {}", error);
    }

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(error) => {
            eprintln!("{}\n{}", error, USAGE);
            return ExitCode::FAILURE;
        }
    };
    if args.help {
        println!("{}", USAGE);
        return ExitCode::SUCCESS;
    }
    let config = match &args.config_path {
        Some(path) => Configuration::from_reader(path),
        None => Ok(Configuration::new())
    };
    let config = match config {
        Ok(config) => config,
        Err(error) => {
            eprintln!("invalid configuration: {}", error);
            return ExitCode::FAILURE;
        }
    };

    let calculator = match config.holiday_calculator() {
        Ok(calculator) => calculator,
        Err(error) => {
            eprintln!("invalid configuration: {}", error);
            return ExitCode::FAILURE;
        }
    };
    let store: Box<dyn PreferenceStore> = match config.preference_store() {
        Ok(store) => store,
        Err(error) => {
            tracing::warn!(%error, "preference store unavailable; using defaults");
            Box::new(MemoryPreferenceStore::new())
        }
    };
    let settings = config.theme_settings(store.as_ref());

    let source: Rc<dyn TimeSource> = Rc::new(config.time_source());
    let sink: Rc<dyn DisplaySink> = Rc::new(TerminalDisplay::stdout());
    let mut scheduler = Scheduler::new();
    let dashboard = match Dashboard::install(
        &mut scheduler,
        source,
        sink,
        calculator,
        settings,
        config.refresh_intervals()
    ) {
        Ok(dashboard) => dashboard,
        Err(error) => {
            eprintln!("cannot start display: {}", error);
            return ExitCode::FAILURE;
        }
    };

    if args.once {
        dashboard.teardown();
        return ExitCode::SUCCESS;
    }

    let mut last = WallInstant::now();
    while dashboard.is_running() {
        thread::sleep(LOOP_TICK);
        let now = WallInstant::now();
        scheduler.advance(now.duration_since(last));
        last = now;
    }
    ExitCode::SUCCESS
}
