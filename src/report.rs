use std::{fmt, path::PathBuf};

use log::{debug, info, warn};

use crate::{
    config::PlotConfig,
    error::{Error, Result},
    series::RewardSeries,
    status::{status_path, TrainingStatus},
};

/// Why a run contributed nothing to the chart
#[derive(Debug, Clone, PartialEq)]
pub enum Skip {
    /// The run has no status file
    MissingFile { run: String, path: PathBuf },
    /// The behavior, or its checkpoint list, is absent from the status file
    NoCheckpoints { run: String, behavior: String },
    /// Every checkpoint of the behavior has a null reward
    NoRewards { run: String, behavior: String },
}

impl Skip {
    /// The run this skip refers to
    pub fn run(&self) -> &str {
        match self {
            Skip::MissingFile { run, .. }
            | Skip::NoCheckpoints { run, .. }
            | Skip::NoRewards { run, .. } => run,
        }
    }
}

impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Skip::MissingFile { path, .. } => {
                write!(f, "Skipping missing file: {}", path.display())
            }
            Skip::NoCheckpoints { run, behavior } => {
                write!(f, "No checkpoints found in {run} for behavior {behavior}")
            }
            Skip::NoRewards { run, behavior } => {
                write!(f, "No rewards recorded in {run} for behavior {behavior}")
            }
        }
    }
}

/// Everything needed to draw the chart
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    /// Behavior the series belong to
    pub behavior: String,
    /// One non-empty series per plotted run, in run order
    pub series: Vec<RewardSeries>,
    /// Runs that were left out, in run order
    pub skipped: Vec<Skip>,
}

impl Report {
    /// A report with nothing collected yet
    pub fn new(behavior: impl Into<String>) -> Self {
        Self {
            behavior: behavior.into(),
            ..Default::default()
        }
    }

    pub fn title(&self) -> String {
        format!("{} - Cumulative Reward Over Time", self.behavior)
    }

    /// `true` if there is nothing to plot
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Plain-text summary, one row per plotted run
impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title())?;
        if self.series.is_empty() {
            return writeln!(f, "no runs with recorded rewards");
        }

        let width = self
            .series
            .iter()
            .map(|s| s.label().len())
            .max()
            .unwrap_or_default()
            .max("run".len());
        writeln!(
            f,
            "{:<width$}  {:>6}  {:>12}  {:>12}  {:>12}  {:>12}",
            "run", "points", "first step", "last step", "last reward", "best reward"
        )?;
        for s in &self.series {
            let first = s.steps().first().copied().unwrap_or_default();
            let (last_step, last_reward) = s.last().unwrap_or_default();
            let (_, best) = s.best().unwrap_or_default();
            writeln!(
                f,
                "{:<width$}  {:>6}  {:>12}  {:>12}  {:>12.3}  {:>12.3}",
                s.label(),
                s.len(),
                first,
                last_step,
                last_reward,
                best
            )?;
        }
        Ok(())
    }
}

/// Outcome of loading a single run
enum Loaded {
    Series(RewardSeries),
    Skipped(Skip),
}

/// Load every configured run, in order
///
/// Expected absences are logged and recorded in [`Report::skipped`]. Any read or parse failure
/// stops processing and is returned, no partial report is produced.
pub fn collect(config: &PlotConfig) -> Result<Report> {
    let mut report = Report::new(config.behavior.as_str());
    collect_into(config, &mut report)?;
    Ok(report)
}

/// Like [`collect`], but fills `report` as runs are loaded
///
/// On failure `report` keeps everything collected before the failing run, so the skips seen so far
/// can still be shown.
pub fn collect_into(config: &PlotConfig, report: &mut Report) -> Result<()> {
    for run in &config.runs {
        match load_run(config, run)? {
            Loaded::Series(series) => {
                info!(
                    "{run}: {} checkpoints with rewards, last {:?}",
                    series.len(),
                    series.last()
                );
                report.series.push(series);
            }
            Loaded::Skipped(skip) => {
                warn!("{skip}");
                report.skipped.push(skip);
            }
        }
    }

    debug!(
        "collected {} series, skipped {} runs",
        report.series.len(),
        report.skipped.len()
    );
    Ok(())
}

fn load_run(config: &PlotConfig, run: &str) -> Result<Loaded> {
    let path = status_path(&config.base_dir, run);
    if !path.exists() {
        return Ok(Loaded::Skipped(Skip::MissingFile {
            run: run.to_owned(),
            path,
        }));
    }

    debug!("reading {}", path.display());
    let status = TrainingStatus::read(&path)?;
    debug!(
        "{run} has behaviors: {}",
        status.behaviors().collect::<Vec<_>>().join(", ")
    );

    let behavior = config.behavior.as_str();
    let checkpoints = status
        .checkpoints(behavior)
        .map_err(|source| Error::Parse {
            path: path.clone(),
            source,
        })?;
    let Some(checkpoints) = checkpoints else {
        return Ok(Loaded::Skipped(Skip::NoCheckpoints {
            run: run.to_owned(),
            behavior: behavior.to_owned(),
        }));
    };

    let series = RewardSeries::from_checkpoints(run, &checkpoints);
    if series.is_empty() {
        return Ok(Loaded::Skipped(Skip::NoRewards {
            run: run.to_owned(),
            behavior: behavior.to_owned(),
        }));
    }

    Ok(Loaded::Series(series))
}

#[cfg(test)]
mod tests {
    use std::{fs, path::Path};

    use tempfile::TempDir;

    use super::*;
    use crate::status::Checkpoint;

    const BEHAVIOR: &str = "RunnerBehavior";

    fn write_status(base: &Path, run: &str, contents: &str) {
        let path = status_path(base, run);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn config(base: &Path, runs: &[&str]) -> PlotConfig {
        PlotConfig {
            runs: runs.iter().map(|r| String::from(*r)).collect(),
            base_dir: base.to_path_buf(),
            behavior: String::from(BEHAVIOR),
        }
    }

    #[test]
    fn missing_file_skipped() {
        let dir = TempDir::new().unwrap();
        let report = collect(&config(dir.path(), &["gone"])).unwrap();

        assert!(report.is_empty());
        assert_eq!(
            report.skipped,
            vec![Skip::MissingFile {
                run: String::from("gone"),
                path: status_path(dir.path(), "gone")
            }]
        );
        assert!(report.skipped[0]
            .to_string()
            .contains(&status_path(dir.path(), "gone").display().to_string()));
    }

    #[test]
    fn missing_behavior_or_checkpoints_skipped() {
        let dir = TempDir::new().unwrap();
        write_status(dir.path(), "other", r#"{ "TaggerBehavior": { "checkpoints": [] } }"#);
        write_status(dir.path(), "bare", r#"{ "RunnerBehavior": { "elo": 1200.0 } }"#);

        let report = collect(&config(dir.path(), &["other", "bare"])).unwrap();
        assert!(report.is_empty());
        assert_eq!(
            report.skipped,
            vec![
                Skip::NoCheckpoints {
                    run: String::from("other"),
                    behavior: String::from(BEHAVIOR)
                },
                Skip::NoCheckpoints {
                    run: String::from("bare"),
                    behavior: String::from(BEHAVIOR)
                },
            ]
        );
        assert_eq!(
            report.skipped[0].to_string(),
            "No checkpoints found in other for behavior RunnerBehavior"
        );
    }

    #[test]
    fn null_rewards_filtered() {
        let dir = TempDir::new().unwrap();
        write_status(
            dir.path(),
            "run",
            r#"{ "RunnerBehavior": { "checkpoints": [
                { "steps": 10, "reward": 1.0 },
                { "steps": 20, "reward": null },
                { "steps": 30, "reward": 2.5 }
            ] } }"#,
        );

        let report = collect(&config(dir.path(), &["run"])).unwrap();
        assert_eq!(report.series.len(), 1);
        assert_eq!(report.series[0].steps(), [10, 30]);
        assert_eq!(report.series[0].rewards(), [1.0, 2.5]);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn mixed_runs() {
        let dir = TempDir::new().unwrap();
        write_status(
            dir.path(),
            "good",
            r#"{ "RunnerBehavior": { "checkpoints": [
                { "steps": 100, "reward": 0.5 },
                { "steps": 200, "reward": 0.9 }
            ] } }"#,
        );
        write_status(
            dir.path(),
            "untrained",
            r#"{ "RunnerBehavior": { "checkpoints": [
                { "steps": 100, "reward": null },
                { "steps": 200, "reward": null }
            ] } }"#,
        );

        let report = collect(&config(dir.path(), &["missing", "good", "untrained"])).unwrap();
        assert_eq!(report.series.len(), 1, "exactly one line");
        assert_eq!(report.series[0].label(), "good");
        assert_eq!(report.skipped.len(), 2, "one diagnostic per skipped run");
        assert!(matches!(report.skipped[0], Skip::MissingFile { .. }));
        assert_eq!(report.skipped[1].run(), "untrained");
    }

    #[test]
    fn behavior_absent_everywhere() {
        let dir = TempDir::new().unwrap();
        for run in ["a", "b", "c"] {
            write_status(
                dir.path(),
                run,
                r#"{ "TaggerBehavior": { "checkpoints": [ { "steps": 1, "reward": 1.0 } ] } }"#,
            );
        }

        let report = collect(&config(dir.path(), &["a", "b", "c"])).unwrap();
        assert!(report.is_empty(), "zero lines");
        assert_eq!(report.skipped.len(), 3, "one diagnostic per run");
        let runs = report.skipped.iter().map(Skip::run).collect::<Vec<_>>();
        assert_eq!(runs, ["a", "b", "c"]);
    }

    #[test]
    fn malformed_json_aborts() {
        let dir = TempDir::new().unwrap();
        write_status(dir.path(), "broken", r#"{ "RunnerBehavior": { "checkpoints": [ "#);
        write_status(
            dir.path(),
            "good",
            r#"{ "RunnerBehavior": { "checkpoints": [ { "steps": 1, "reward": 1.0 } ] } }"#,
        );

        let err = collect(&config(dir.path(), &["broken", "good"])).unwrap_err();
        match err {
            Error::Parse { path, .. } => assert_eq!(path, status_path(dir.path(), "broken")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn skips_kept_when_a_later_run_aborts() {
        let dir = TempDir::new().unwrap();
        write_status(dir.path(), "broken", "not json");

        let mut report = Report::new(BEHAVIOR);
        let result = collect_into(&config(dir.path(), &["missing", "broken"]), &mut report);

        assert!(matches!(result, Err(Error::Parse { .. })));
        assert_eq!(
            report.skipped,
            vec![Skip::MissingFile {
                run: String::from("missing"),
                path: status_path(dir.path(), "missing")
            }],
            "skip before the failure is kept"
        );
    }

    #[test]
    fn list_document_skipped_null_behavior_aborts() {
        let dir = TempDir::new().unwrap();
        write_status(dir.path(), "listed", "[]");
        write_status(dir.path(), "nulled", r#"{ "RunnerBehavior": null }"#);

        let report = collect(&config(dir.path(), &["listed"])).unwrap();
        assert!(matches!(report.skipped[..], [Skip::NoCheckpoints { .. }]));

        assert!(matches!(
            collect(&config(dir.path(), &["nulled"])),
            Err(Error::Parse { .. })
        ));
    }

    #[test]
    fn missing_checkpoint_field_aborts() {
        let dir = TempDir::new().unwrap();
        write_status(
            dir.path(),
            "run",
            r#"{ "RunnerBehavior": { "checkpoints": [ { "steps": 1 } ] } }"#,
        );

        assert!(matches!(
            collect(&config(dir.path(), &["run"])),
            Err(Error::Parse { .. })
        ));
    }

    #[test]
    fn run_order_preserved() {
        let dir = TempDir::new().unwrap();
        for run in ["z", "a", "m"] {
            write_status(
                dir.path(),
                run,
                r#"{ "RunnerBehavior": { "checkpoints": [ { "steps": 1, "reward": 1.0 } ] } }"#,
            );
        }

        let report = collect(&config(dir.path(), &["z", "a", "m"])).unwrap();
        let labels = report.series.iter().map(RewardSeries::label).collect::<Vec<_>>();
        assert_eq!(labels, ["z", "a", "m"]);
        assert_eq!(report.title(), "RunnerBehavior - Cumulative Reward Over Time");
    }

    #[test]
    fn summary_table() {
        let report = Report {
            behavior: String::from(BEHAVIOR),
            series: vec![RewardSeries::from_checkpoints(
                "run_a",
                &[
                    Checkpoint {
                        steps: 500,
                        reward: Some(3.0),
                    },
                    Checkpoint {
                        steps: 1000,
                        reward: Some(1.25),
                    },
                ],
            )],
            skipped: vec![],
        };

        let text = report.to_string();
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "RunnerBehavior - Cumulative Reward Over Time");
        assert!(lines[1].starts_with("run  "), "header row");
        assert!(lines[2].starts_with("run_a"));
        assert!(lines[2].contains("1.250"), "last reward");
        assert!(lines[2].contains("3.000"), "best reward");

        let empty = Report {
            behavior: String::from(BEHAVIOR),
            ..Default::default()
        };
        assert!(empty.to_string().contains("no runs with recorded rewards"));
    }
}
