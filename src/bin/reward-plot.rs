use std::{path::PathBuf, process::ExitCode};

use clap::{ArgAction, Parser};
use log::LevelFilter;
use reward_plot::{
    config::{ConfigOverrides, PlotConfig},
    report::{self, Report},
    Result,
};

/// Plot cumulative reward curves from training status files
///
/// Reads `<base-dir>/<run>/run_logs/training_status.json` for every run and draws one curve per run
/// for the selected behavior.
#[derive(Parser, Debug)]
#[command(name = "reward-plot", version, about)]
struct Args {
    /// Runs to compare, subdirectories of the base directory [default: ultimate_run10 ultimate_run9 bc_run_4]
    runs: Vec<String>,

    /// Directory holding the run directories [default: results]
    #[arg(long)]
    base_dir: Option<PathBuf>,

    /// Behavior whose rewards are plotted [default: RunnerBehavior]
    #[arg(long)]
    behavior: Option<String>,

    /// JSON file with `runs`, `base_dir` and `behavior`, overridden by the flags above
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print a summary table instead of opening the terminal chart
    #[arg(long)]
    no_tui: bool,

    /// Also save the chart as a PNG image
    #[arg(long, value_name = "FILE")]
    save: Option<PathBuf>,

    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    fn interactive(&self) -> bool {
        cfg!(feature = "viz") && !self.no_tui
    }

    fn config(&self) -> Result<PlotConfig> {
        let mut config = PlotConfig::default();
        if let Some(path) = &self.config {
            config = config.merge(ConfigOverrides::from_file(path)?);
        }
        config
            .merge(ConfigOverrides {
                runs: (!self.runs.is_empty()).then(|| self.runs.clone()),
                base_dir: self.base_dir.clone(),
                behavior: self.behavior.clone(),
            })
            .validate()
    }
}

fn init_logging(args: &Args) -> Result<()> {
    let level = args.log_level();
    #[cfg(feature = "viz")]
    {
        if args.interactive() {
            return reward_plot::viz::init_logger(level);
        }
    }

    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .parse_default_env()
        .try_init()?;
    Ok(())
}

#[cfg(feature = "png")]
fn save(report: &Report, path: &std::path::Path) -> Result<()> {
    reward_plot::export::save_png(report, path)
}

#[cfg(not(feature = "png"))]
fn save(_report: &Report, _path: &std::path::Path) -> Result<()> {
    Err(reward_plot::Error::Export(String::from(
        "built without PNG support, enable the `png` feature",
    )))
}

#[cfg_attr(not(feature = "viz"), allow(unused_variables))]
fn display(args: &Args, report: &Report) -> Result<()> {
    #[cfg(feature = "viz")]
    {
        if args.interactive() {
            return reward_plot::viz::show(report, args.log_level());
        }
    }

    print!("{report}");
    Ok(())
}

/// Collect, export and show, filling `report` as far as it gets
fn plot(args: &Args, config: &PlotConfig, report: &mut Report) -> Result<()> {
    report::collect_into(config, report)?;

    if let Some(path) = &args.save {
        save(report, path)?;
    }

    display(args, report)
}

fn run(args: &Args) -> Result<()> {
    init_logging(args)?;
    let config = args.config()?;
    let mut report = Report::new(config.behavior.as_str());
    let result = plot(args, &config, &mut report);

    // the Logs tab closes with the TUI, so repeat the skips on the console on any outcome
    if args.interactive() {
        for skip in &report.skipped {
            eprintln!("{skip}");
        }
    }
    result
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::parse_from([
            "reward-plot",
            "run_a",
            "run_b",
            "--behavior",
            "TaggerBehavior",
            "-vv",
        ]);
        let config = args.config().unwrap();
        assert_eq!(config.runs, ["run_a", "run_b"]);
        assert_eq!(config.behavior, "TaggerBehavior");
        assert_eq!(config.base_dir, PathBuf::from("results"));
        assert_eq!(args.log_level(), LevelFilter::Debug);
    }

    #[test]
    fn skips_survive_a_failed_run() {
        let dir = tempfile::TempDir::new().unwrap();
        let broken = reward_plot::status::status_path(dir.path(), "broken");
        std::fs::create_dir_all(broken.parent().unwrap()).unwrap();
        std::fs::write(&broken, "{ not json").unwrap();

        let base_dir = dir.path().to_str().unwrap();
        let args = Args::parse_from(["reward-plot", "missing", "broken", "--base-dir", base_dir]);
        assert_eq!(args.interactive(), cfg!(feature = "viz"));

        let config = args.config().unwrap();
        let mut report = Report::new(config.behavior.as_str());
        let result = plot(&args, &config, &mut report);

        assert!(matches!(result, Err(reward_plot::Error::Parse { .. })));
        assert_eq!(report.skipped.len(), 1, "missing run still reported");
        assert_eq!(report.skipped[0].run(), "missing");
    }

    #[test]
    fn defaults_without_flags() {
        let args = Args::parse_from(["reward-plot", "--no-tui"]);
        assert_eq!(args.config().unwrap(), PlotConfig::default());
        assert!(!args.interactive());
        assert_eq!(args.log_level(), LevelFilter::Warn);
    }
}
