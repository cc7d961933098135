use crate::Segment;

impl Segment {
    /// The value of this segment's closed-form formula at time `t`.
    pub fn value_at(&self, t: f64) -> f64 {
        match *self {
            Segment::Constant { value } => value,
            Segment::Active {
                start,
                initial,
                steady,
                rate,
            } => steady + (initial - steady) * (rate * (t - start)).exp(),
            Segment::Inactive {
                start,
                initial,
                rate,
            } => initial * (rate * (t - start)).exp(),
            Segment::Linear { slope } => slope * t,
        }
    }

    /// The time derivative of this segment at time `t`.
    pub fn slope_at(&self, t: f64) -> f64 {
        match *self {
            Segment::Constant { .. } => 0.0,
            Segment::Active { steady, rate, .. } => rate * (self.value_at(t) - steady),
            Segment::Inactive { rate, .. } => rate * self.value_at(t),
            Segment::Linear { slope } => slope,
        }
    }

    /// True if the segment is produced while its product is switched on.
    ///
    /// Linear and constant segments do not depend on regulation.
    pub fn is_active(&self) -> bool {
        matches!(self, Segment::Active { .. })
    }

    /// Analytically invert the segment formula: find the time `t` such that
    /// `value_at(t) == threshold`.
    ///
    /// Every segment is monotonous, so there is at most one such time. Returns `None`
    /// when the threshold is never reached (the logarithm argument is not positive, or
    /// the segment is flat). The result is not restricted to the segment's time range.
    pub fn crossing_time(&self, threshold: f64) -> Option<f64> {
        let time = match *self {
            Segment::Constant { .. } => return None,
            Segment::Active {
                start,
                initial,
                steady,
                rate,
            } => log_ratio(threshold - steady, initial - steady)? / rate + start,
            Segment::Inactive {
                start,
                initial,
                rate,
            } => log_ratio(threshold, initial)? / rate + start,
            Segment::Linear { slope } => {
                if slope == 0.0 {
                    return None;
                }
                threshold / slope
            }
        };
        if time.is_finite() {
            Some(time)
        } else {
            None
        }
    }
}

/// **(internal)** `ln(numerator / denominator)`, or `None` if the ratio is not positive.
fn log_ratio(numerator: f64, denominator: f64) -> Option<f64> {
    let ratio = numerator / denominator;
    if ratio > 0.0 && ratio.is_finite() {
        Some(ratio.ln())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use crate::Segment;

    #[test]
    fn active_segment_inversion() {
        let segment = Segment::Active {
            start: 1.0,
            initial: 0.0,
            steady: 4.0,
            rate: -0.5,
        };
        assert_eq!(0.0, segment.value_at(1.0));
        assert!(segment.slope_at(1.0) > 0.0);
        let t = segment.crossing_time(2.0).unwrap();
        assert!((t - (1.0 + 2.0 * std::f64::consts::LN_2)).abs() < 1e-12);
        assert!((segment.value_at(t) - 2.0).abs() < 1e-9);
        // The steady state itself and anything beyond it is never reached.
        assert_eq!(None, segment.crossing_time(4.0));
        assert_eq!(None, segment.crossing_time(5.0));
    }

    #[test]
    fn inactive_segment_inversion() {
        let segment = Segment::Inactive {
            start: 2.0,
            initial: 3.0,
            rate: -0.5,
        };
        assert!(segment.slope_at(2.0) < 0.0);
        let t = segment.crossing_time(1.5).unwrap();
        assert!((t - (2.0 + 2.0 * std::f64::consts::LN_2)).abs() < 1e-12);
        assert!((segment.value_at(t) - 1.5).abs() < 1e-9);
        // Zero (and below) is never reached by a decaying segment.
        assert_eq!(None, segment.crossing_time(0.0));
        assert_eq!(None, segment.crossing_time(-1.0));
        // An inversion into the past is reported, range checks are left to the caller.
        assert!(segment.crossing_time(6.0).unwrap() < 2.0);
    }

    #[test]
    fn degenerate_segments() {
        let zero = Segment::Inactive {
            start: 0.0,
            initial: 0.0,
            rate: -1.0,
        };
        assert_eq!(None, zero.crossing_time(1.0));
        assert_eq!(None, Segment::Constant { value: 1.0 }.crossing_time(1.0));
        assert_eq!(None, Segment::Linear { slope: 0.0 }.crossing_time(1.0));
        assert_eq!(Some(0.5), Segment::Linear { slope: 2.0 }.crossing_time(1.0));
        assert!(!Segment::Linear { slope: 2.0 }.is_active());
    }
}
