use crate::{Break, Kinetics, Samples, Segment, Trajectory};

/// Methods for building and querying a solved `Trajectory`.
impl Trajectory {
    /// Build the piecewise trajectory of a product with the given `kinetics`,
    /// starting at `initial_value`, switched according to `breaks`.
    ///
    /// Without breaks, the product is considered active from time zero. Each segment
    /// starts from the value where the previous segment ended, so the trajectory is
    /// continuous at every break.
    pub fn build(kinetics: &Kinetics, initial_value: f64, breaks: Vec<Break>) -> Trajectory {
        let breaks = if breaks.is_empty() {
            vec![Break::new(0.0, true)]
        } else {
            breaks
        };

        let steady = match kinetics.steady_rate() {
            Some(steady) => steady,
            None => {
                let slope = kinetics.const_rate();
                return Trajectory {
                    segments: vec![Segment::Linear { slope }; breaks.len() + 1],
                    breaks,
                };
            }
        };

        let rate = kinetics.self_rate();
        let mut segments = Vec::with_capacity(breaks.len() + 1);
        segments.push(Segment::Constant {
            value: initial_value,
        });
        let mut last_value = initial_value;
        for (i, brk) in breaks.iter().enumerate() {
            let segment = if brk.is_active() {
                Segment::Active {
                    start: brk.time(),
                    initial: last_value,
                    steady,
                    rate,
                }
            } else {
                Segment::Inactive {
                    start: brk.time(),
                    initial: last_value,
                    rate,
                }
            };
            if let Some(next) = breaks.get(i + 1) {
                last_value = segment.value_at(next.time());
            }
            segments.push(segment);
        }

        Trajectory { breaks, segments }
    }

    pub fn breaks(&self) -> &[Break] {
        &self.breaks
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Index of the segment that contains time `t`.
    ///
    /// Segment `i` covers `[breaks[i - 1], breaks[i])`, the first segment extends to
    /// minus infinity and the last one to plus infinity.
    pub fn segment_index(&self, t: f64) -> usize {
        self.breaks.partition_point(|b| b.time() <= t)
    }

    /// The time range `[start, end)` of the segment with the given index.
    pub fn segment_range(&self, index: usize) -> (f64, f64) {
        let start = if index == 0 {
            f64::NEG_INFINITY
        } else {
            self.breaks[index - 1].time()
        };
        let end = self
            .breaks
            .get(index)
            .map(|b| b.time())
            .unwrap_or(f64::INFINITY);
        (start, end)
    }

    /// Value of the trajectory at time `t`.
    pub fn value_at(&self, t: f64) -> f64 {
        self.segments[self.segment_index(t)].value_at(t)
    }

    /// Sample this trajectory over `[t0, t1)` with a fixed `step`.
    ///
    /// A non-positive step, or any non-finite argument, produces no samples.
    pub fn samples(&self, t0: f64, t1: f64, step: f64) -> Samples<'_> {
        Samples {
            trajectory: self,
            t0,
            t1,
            step,
            index: 0,
        }
    }
}

impl<'a> Iterator for Samples<'a> {
    type Item = (f64, f64);

    fn next(&mut self) -> Option<Self::Item> {
        if !self.is_bounded() {
            return None;
        }
        // Derived from the index, never accumulated.
        let t = self.t0 + (self.index as f64) * self.step;
        if t >= self.t1 {
            return None;
        }
        self.index += 1;
        Some((t, self.trajectory.value_at(t)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if !self.is_bounded() || self.t1 <= self.t0 {
            return (0, Some(0));
        }
        let total = ((self.t1 - self.t0) / self.step).ceil();
        if total >= usize::MAX as f64 {
            return (0, None);
        }
        let remaining = (total as usize).saturating_sub(self.index);
        // Rounding can make the estimate off by one in both directions.
        (remaining.saturating_sub(1), remaining.checked_add(1))
    }
}

impl<'a> Samples<'a> {
    /// **(internal)** Only finite windows with a positive finite step produce samples.
    fn is_bounded(&self) -> bool {
        self.t0.is_finite() && self.t1.is_finite() && self.step.is_finite() && self.step > 0.0
    }
}
