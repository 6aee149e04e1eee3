use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::error::{Error, Result};

pub const DEFAULT_RUNS: [&str; 3] = ["ultimate_run10", "ultimate_run9", "bc_run_4"];
pub const DEFAULT_BASE_DIR: &str = "results";
pub const DEFAULT_BEHAVIOR: &str = "RunnerBehavior";

/// Which runs to plot and where to find them
#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    /// Run identifiers, in legend order
    pub runs: Vec<String>,
    /// Directory containing one subdirectory per run
    pub base_dir: PathBuf,
    /// Behavior whose checkpoints are plotted
    pub behavior: String,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            runs: DEFAULT_RUNS.iter().map(|r| String::from(*r)).collect(),
            base_dir: PathBuf::from(DEFAULT_BASE_DIR),
            behavior: String::from(DEFAULT_BEHAVIOR),
        }
    }
}

/// Partial configuration, as read from a config file or the command line
///
/// Fields left as `None` keep the value they override.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigOverrides {
    pub runs: Option<Vec<String>>,
    pub base_dir: Option<PathBuf>,
    pub behavior: Option<String>,
}

impl ConfigOverrides {
    /// Read overrides from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        serde_json::from_str(&text)
            .map_err(|e| Error::Config(format!("cannot parse {}: {e}", path.display())))
    }
}

impl PlotConfig {
    /// Apply `overrides` on top of this config
    pub fn merge(mut self, overrides: ConfigOverrides) -> Self {
        let ConfigOverrides {
            runs,
            base_dir,
            behavior,
        } = overrides;
        if let Some(runs) = runs {
            self.runs = runs;
        }
        if let Some(base_dir) = base_dir {
            self.base_dir = base_dir;
        }
        if let Some(behavior) = behavior {
            self.behavior = behavior;
        }
        self
    }

    /// Reject configurations that cannot produce a chart
    pub fn validate(self) -> Result<Self> {
        if self.runs.is_empty() {
            return Err(Error::Config(String::from("no runs to plot")));
        }
        if let Some(run) = self.runs.iter().find(|r| r.trim().is_empty()) {
            return Err(Error::Config(format!("invalid run identifier {run:?}")));
        }
        if self.behavior.trim().is_empty() {
            return Err(Error::Config(String::from("behavior name is empty")));
        }
        Ok(self)
    }
}
