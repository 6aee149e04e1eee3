use crate::status::Checkpoint;

/// Reward curve of a single run
///
/// `steps` and `rewards` are parallel and always have the same length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RewardSeries {
    label: String,
    steps: Vec<u64>,
    rewards: Vec<f64>,
}

impl RewardSeries {
    /// Build a series from checkpoints, dropping those without a recorded reward
    pub fn from_checkpoints<'a>(
        label: impl Into<String>,
        checkpoints: impl IntoIterator<Item = &'a Checkpoint>,
    ) -> Self {
        let (steps, rewards) = checkpoints
            .into_iter()
            .filter_map(|cp| cp.reward.map(|reward| (cp.steps, reward)))
            .unzip();

        Self {
            label: label.into(),
            steps,
            rewards,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn steps(&self) -> &[u64] {
        &self.steps
    }

    pub fn rewards(&self) -> &[f64] {
        &self.rewards
    }

    /// Number of plotted points
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The series as `(step, reward)` chart coordinates
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.steps
            .iter()
            .zip(&self.rewards)
            .map(|(&s, &r)| (s as f64, r))
            .collect()
    }

    /// The last recorded `(step, reward)`
    pub fn last(&self) -> Option<(u64, f64)> {
        Some((*self.steps.last()?, *self.rewards.last()?))
    }

    /// The highest reward and the step it was recorded at
    pub fn best(&self) -> Option<(u64, f64)> {
        self.steps
            .iter()
            .copied()
            .zip(self.rewards.iter().copied())
            .fold(None, |best, (s, r)| match best {
                Some((_, b)) if b >= r => best,
                _ => Some((s, r)),
            })
    }
}

/// Smallest rectangle `([x_min, x_max], [y_min, y_max])` containing every point of every series
///
/// Returns `None` when there are no points at all. Degenerate ranges are widened so the chart
/// always has a non-zero extent.
pub fn bounds<'a>(
    series: impl IntoIterator<Item = &'a RewardSeries>,
) -> Option<([f64; 2], [f64; 2])> {
    let mut x = [f64::MAX, f64::MIN];
    let mut y = [f64::MAX, f64::MIN];
    let mut any = false;

    for s in series {
        for (px, py) in s.points() {
            any = true;
            x = [x[0].min(px), x[1].max(px)];
            y = [y[0].min(py), y[1].max(py)];
        }
    }

    any.then(|| (widen(x), widen(y)))
}

fn widen([lo, hi]: [f64; 2]) -> [f64; 2] {
    if hi > lo {
        [lo, hi]
    } else {
        let pad = (lo.abs() * 0.1).max(1.0);
        [lo - pad, hi + pad]
    }
}
