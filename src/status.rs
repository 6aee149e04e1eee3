use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::{de::Error as _, Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Directory inside a run holding the status file
pub const STATUS_DIR: &str = "run_logs";

/// Name of the status file written by the trainer
pub const STATUS_FILE: &str = "training_status.json";

/// Location of the status file for `run` under `base_dir`
pub fn status_path(base_dir: &Path, run: &str) -> PathBuf {
    base_dir.join(run).join(STATUS_DIR).join(STATUS_FILE)
}

/// A recorded training snapshot
///
/// Both fields must be present in the document. A `null` reward means no evaluation was recorded
/// at that checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Checkpoint {
    pub steps: u64,
    #[serde(deserialize_with = "nullable")]
    pub reward: Option<f64>,
}

// Using `deserialize_with` keeps the field required, a plain `Option` would default to `None`
fn nullable<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<f64>::deserialize(deserializer)
}

/// A parsed `training_status.json`, keyed by behavior name
///
/// Only the checkpoint list of a requested behavior is ever interpreted, everything else in the
/// document is carried along untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingStatus {
    behaviors: Map<String, Value>,
}

impl TrainingStatus {
    /// Read and parse the status file at `path`
    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        text.parse().map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Names of all top-level entries, in document order
    pub fn behaviors(&self) -> impl Iterator<Item = &str> {
        self.behaviors.keys().map(String::as_str)
    }

    /// Checkpoints recorded for `behavior`
    ///
    /// ### Returns
    /// - `Ok(None)` if the behavior is absent or has no `checkpoints` field
    /// - `Err` if the behavior is not an object, or the checkpoint list is malformed
    pub fn checkpoints(&self, behavior: &str) -> serde_json::Result<Option<Vec<Checkpoint>>> {
        let Some(record) = self.behaviors.get(behavior) else {
            return Ok(None);
        };
        let Some(record) = record.as_object() else {
            return Err(serde_json::Error::custom(format!(
                "behavior `{behavior}` is {record}, expected an object"
            )));
        };
        let Some(checkpoints) = record.get("checkpoints") else {
            return Ok(None);
        };

        Vec::<Checkpoint>::deserialize(checkpoints).map(Some)
    }
}

impl FromStr for TrainingStatus {
    type Err = serde_json::Error;

    fn from_str(s: &str) -> serde_json::Result<Self> {
        let behaviors = match serde_json::from_str(s)? {
            Value::Object(behaviors) => behaviors,
            // a list has no behavior keys, every lookup comes up empty
            Value::Array(_) => Map::new(),
            other => {
                return Err(serde_json::Error::custom(format!(
                    "expected a map of behaviors, found {other}"
                )))
            }
        };
        Ok(Self { behaviors })
    }
}
