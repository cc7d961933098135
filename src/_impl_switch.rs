use crate::{Break, Monotonicity, NodeId, Segment, Switch, Trajectory};

impl Switch {
    /// **(internal)** A switch driven by the trajectory of `regulator`. It is unsolved
    /// until the solver computes its crossing times.
    pub(crate) fn regulated(
        regulator: NodeId,
        threshold: f64,
        monotonicity: Monotonicity,
    ) -> Switch {
        Switch {
            regulator: Some(regulator),
            target: None,
            threshold,
            monotonicity,
            times: None,
        }
    }

    /// **(internal)** A root switch which toggles at explicitly given `times`.
    pub(crate) fn root(threshold: f64, monotonicity: Monotonicity, times: Vec<f64>) -> Switch {
        Switch {
            regulator: None,
            target: None,
            threshold,
            monotonicity,
            times: Some(times),
        }
    }

    pub fn regulator(&self) -> Option<NodeId> {
        self.regulator
    }

    pub fn target(&self) -> Option<NodeId> {
        self.target
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn monotonicity(&self) -> Monotonicity {
        self.monotonicity
    }

    pub fn is_root(&self) -> bool {
        self.regulator.is_none()
    }

    pub fn is_solved(&self) -> bool {
        self.times.is_some()
    }

    /// Toggle times of this switch, or `None` if it is not solved yet.
    pub fn times(&self) -> Option<&[f64]> {
        self.times.as_deref()
    }

    /// The toggles of this switch. The first toggle turns the target on for an activation
    /// and off for an inhibition, each subsequent toggle flips the state.
    ///
    /// An unsolved switch has no breaks. Use `LogicNetwork::switch_breaks` to solve the
    /// switch on demand.
    pub fn get_breaks(&self) -> Vec<Break> {
        let first = self.monotonicity == Monotonicity::Activation;
        Break::alternating(self.times().unwrap_or(&[]), first)
    }
}

/// Compute the times at which `trajectory` crosses `threshold`.
///
/// The first returned time is always a rising crossing, then falling and rising crossings
/// alternate. When the trajectory starts at or above the threshold, the start of its
/// first switched segment is reported as the first (rising) crossing.
///
/// Every segment of a trajectory is monotonous, hence it crosses the threshold at most
/// once, at the time given by the inverted segment formula. When the trajectory meets
/// the threshold exactly at a segment boundary, the crossing is reported at the boundary.
pub(crate) fn threshold_crossings(trajectory: &Trajectory, threshold: f64) -> Vec<f64> {
    let mut times = Vec::new();
    let mut above = false;
    for (index, segment) in trajectory.segments().iter().enumerate().skip(1) {
        let (start, end) = trajectory.segment_range(index);
        if is_above(segment, start, threshold) != above {
            times.push(start);
            above = !above;
        }
        if let Some(time) = segment.crossing_time(threshold) {
            if time > start && time < end {
                times.push(time);
                above = !above;
            }
        }
    }
    times
}

/// **(internal)** Decide on which side of the `threshold` the `segment` is at time `t`.
///
/// Exactly at the threshold, the direction in which the segment is heading decides.
fn is_above(segment: &Segment, t: f64, threshold: f64) -> bool {
    let value = segment.value_at(t);
    if value == threshold {
        segment.slope_at(t) >= 0.0
    } else {
        value > threshold
    }
}

#[cfg(test)]
mod tests {
    use super::threshold_crossings;
    use crate::Monotonicity::{Activation, Inhibition};
    use crate::{Break, Kinetics, Switch, Trajectory};
    use pretty_assertions::assert_eq;

    #[test]
    fn root_switch_breaks() {
        let switch = Switch::root(0.0, Activation, vec![0.5, 0.7, 1.3]);
        assert!(switch.is_root());
        assert!(switch.is_solved());
        assert_eq!(
            vec![
                Break::new(0.5, true),
                Break::new(0.7, false),
                Break::new(1.3, true)
            ],
            switch.get_breaks()
        );

        let switch = Switch::root(0.0, Inhibition, vec![0.2, 0.4, 0.8]);
        assert_eq!(
            vec![
                Break::new(0.2, false),
                Break::new(0.4, true),
                Break::new(0.8, false)
            ],
            switch.get_breaks()
        );
    }

    #[test]
    fn rising_and_falling_crossings() {
        let kinetics = Kinetics::new(2.0, -0.5);
        let breaks = Break::alternating(&[0.0, 5.0], true);
        let trajectory = Trajectory::build(&kinetics, 0.0, breaks);
        let times = threshold_crossings(&trajectory, 2.0);
        assert_eq!(2, times.len());
        assert!((times[0] - 2.0 * std::f64::consts::LN_2).abs() < 1e-12);
        assert!(times[1] > 5.0);
        for t in times {
            assert!((trajectory.value_at(t) - 2.0).abs() < 1e-9);
        }
        // The steady state is never crossed.
        assert!(threshold_crossings(&trajectory, 4.5).is_empty());
    }

    #[test]
    fn crossing_at_segment_start() {
        let kinetics = Kinetics::new(2.0, -0.5);
        // Starts above the threshold: active immediately.
        let trajectory = Trajectory::build(&kinetics, 5.0, Vec::new());
        assert_eq!(vec![0.0], threshold_crossings(&trajectory, 2.0));
        // Starts exactly at the threshold and rises: active immediately.
        let trajectory = Trajectory::build(&kinetics, 2.0, Vec::new());
        assert_eq!(vec![0.0], threshold_crossings(&trajectory, 2.0));
        // Starts exactly at the threshold and decays: never active.
        let breaks = vec![Break::new(0.0, false)];
        let trajectory = Trajectory::build(&kinetics, 2.0, breaks);
        assert!(threshold_crossings(&trajectory, 2.0).is_empty());
    }

    #[test]
    fn linear_crossing() {
        let trajectory = Trajectory::build(&Kinetics::new(0.5, 0.0), 0.0, Vec::new());
        assert_eq!(vec![4.0], threshold_crossings(&trajectory, 2.0));
        let trajectory = Trajectory::build(&Kinetics::new(-0.5, 0.0), 0.0, Vec::new());
        assert!(threshold_crossings(&trajectory, 2.0).is_empty());
    }
}
