use crate::{Break, Combination, SwitchBoard, SwitchId};
use std::fmt::{Debug, Formatter};

impl Combination {
    /// Combine the current states of all switches of a board.
    pub fn apply(&self, states: &[bool]) -> bool {
        match self {
            Combination::And => states.iter().all(|it| *it),
            Combination::Or => states.iter().any(|it| *it),
            Combination::Custom(function) => function(states),
        }
    }

    /// Name of the combination as used in the model format (`None` for custom rules).
    pub fn name(&self) -> Option<&'static str> {
        match self {
            Combination::And => Some("and"),
            Combination::Or => Some("or"),
            Combination::Custom(_) => None,
        }
    }
}

impl Debug for Combination {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Combination::And => write!(f, "And"),
            Combination::Or => write!(f, "Or"),
            Combination::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

impl SwitchBoard {
    pub(crate) fn new(switches: Vec<SwitchId>, combination: Combination) -> SwitchBoard {
        SwitchBoard {
            switches,
            combination,
            breaks: None,
        }
    }

    pub fn switches(&self) -> &[SwitchId] {
        &self.switches
    }

    pub fn combination(&self) -> Combination {
        self.combination
    }

    pub fn is_solved(&self) -> bool {
        self.breaks.is_some()
    }

    /// The merged timeline of this board, or an empty list if it is not solved yet.
    ///
    /// Use `LogicNetwork::board_breaks` to solve the board on demand.
    pub fn get_breaks(&self) -> Vec<Break> {
        self.breaks.clone().unwrap_or_default()
    }
}

/// Merge several sorted break streams into one timeline using `combination`.
///
/// The result contains one break per distinct time present in any of the streams, with
/// the combined state of all streams right after that time. Before its first break, a
/// stream is in the opposite state of that break. An empty stream is always active.
pub(crate) fn merge_breaks(streams: &[Vec<Break>], combination: Combination) -> Vec<Break> {
    let mut states: Vec<bool> = streams
        .iter()
        .map(|stream| stream.first().map(|b| !b.is_active()).unwrap_or(true))
        .collect();
    let mut cursors = vec![0usize; streams.len()];

    let mut times: Vec<f64> = streams.iter().flatten().map(|b| b.time()).collect();
    times.sort_by(|a, b| a.total_cmp(b));
    times.dedup();

    let mut merged = Vec::with_capacity(times.len());
    for time in times {
        for (i, stream) in streams.iter().enumerate() {
            // A stream can toggle more than once at the same time, the last toggle wins.
            while let Some(brk) = stream.get(cursors[i]) {
                if brk.time() > time {
                    break;
                }
                states[i] = brk.is_active();
                cursors[i] += 1;
            }
        }
        merged.push(Break::new(time, combination.apply(&states)));
    }
    merged
}
