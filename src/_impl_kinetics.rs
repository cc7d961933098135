use crate::{Kinetics, KineticsReport, LINEAR_RATE_EPSILON};
use std::fmt::{Display, Error, Formatter};

impl Kinetics {
    pub fn new(const_rate: f64, self_rate: f64) -> Kinetics {
        Kinetics {
            const_rate,
            self_rate,
        }
    }

    pub fn const_rate(&self) -> f64 {
        self.const_rate
    }

    pub fn self_rate(&self) -> f64 {
        self.self_rate
    }

    /// True if the self rate is within `LINEAR_RATE_EPSILON` of zero. In such case, the
    /// product grows as `const_rate * t` and there is no steady state.
    pub fn is_linear(&self) -> bool {
        self.self_rate.abs() <= LINEAR_RATE_EPSILON
    }

    /// The value `-const_rate / self_rate` towards which an active product converges.
    pub fn steady_rate(&self) -> Option<f64> {
        if self.is_linear() {
            None
        } else {
            Some(-self.const_rate / self.self_rate)
        }
    }

    /// The characteristic time `-ln(2) / self_rate` of the exponential response.
    ///
    /// For decaying products, this is the time needed to get halfway to the steady state.
    pub fn reaction_time(&self) -> Option<f64> {
        if self.is_linear() {
            None
        } else {
            Some(-std::f64::consts::LN_2 / self.self_rate)
        }
    }

    /// A sampling window `(start, end, step)` that captures the interesting part of
    /// the response: eight reaction times in fifty steps, or `[0, 10)` with step `0.1`
    /// in the linear mode.
    pub fn sample_window(&self) -> (f64, f64, f64) {
        match self.reaction_time() {
            Some(reaction_time) => {
                let duration = reaction_time.abs() * 8.0;
                (0.0, duration, duration / 50.0)
            }
            None => (0.0, 10.0, 0.1),
        }
    }
}

impl KineticsReport {
    pub fn new(name: &str, kind: &str, initial_value: f64, kinetics: &Kinetics) -> KineticsReport {
        KineticsReport {
            name: name.to_string(),
            kind: kind.to_string(),
            initial_value,
            const_rate: kinetics.const_rate,
            self_rate: kinetics.self_rate,
            steady_rate: kinetics.steady_rate(),
            reaction_time: kinetics.reaction_time(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn initial_value(&self) -> f64 {
        self.initial_value
    }

    pub fn const_rate(&self) -> f64 {
        self.const_rate
    }

    pub fn self_rate(&self) -> f64 {
        self.self_rate
    }

    pub fn steady_rate(&self) -> Option<f64> {
        self.steady_rate
    }

    pub fn reaction_time(&self) -> Option<f64> {
        self.reaction_time
    }
}

impl Display for KineticsReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        writeln!(f, "{} {}", self.kind, self.name)?;
        writeln!(f, "  initial value: {:.2}", self.initial_value)?;
        match (self.steady_rate, self.reaction_time) {
            (Some(steady_rate), Some(reaction_time)) => {
                if self.self_rate > 0.0 {
                    writeln!(f, "  dX(t)/dt = {:.2} + {:.2}X", self.const_rate, self.self_rate)?;
                } else {
                    writeln!(f, "  dX(t)/dt = {:.2} - {:.2}X", self.const_rate, -self.self_rate)?;
                }
                writeln!(f, "  steady state = {:.2}", steady_rate)?;
                writeln!(f, "  reaction time = {:.2}", reaction_time)
            }
            _ => writeln!(f, "  dX(t)/dt = {:.2}", self.const_rate),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Kinetics, KineticsReport};

    #[test]
    fn kinetics_derived_quantities() {
        let kinetics = Kinetics::new(2.0, -0.5);
        assert!(!kinetics.is_linear());
        assert_eq!(Some(4.0), kinetics.steady_rate());
        let reaction_time = kinetics.reaction_time().unwrap();
        assert!((reaction_time - 1.386_294_361).abs() < 1e-6);
        let (start, end, step) = kinetics.sample_window();
        assert_eq!(0.0, start);
        assert!((end - 8.0 * reaction_time).abs() < 1e-12);
        assert!((step - end / 50.0).abs() < 1e-12);

        let linear = Kinetics::new(2.0, 0.000_001);
        assert!(linear.is_linear());
        assert_eq!(None, linear.steady_rate());
        assert_eq!(None, linear.reaction_time());
        assert_eq!((0.0, 10.0, 0.1), linear.sample_window());
    }

    #[test]
    fn kinetics_report_text() {
        let report = KineticsReport::new("Y", "protein", 0.0, &Kinetics::new(2.0, -0.5));
        assert_eq!(
            "protein Y\n  initial value: 0.00\n  dX(t)/dt = 2.00 - 0.50X\n  steady state = 4.00\n  reaction time = 1.39\n",
            report.to_string()
        );

        let report = KineticsReport::new("Y", "RNA", 1.0, &Kinetics::new(2.0, 0.0));
        assert_eq!(None, report.steady_rate());
        assert_eq!(
            "RNA Y\n  initial value: 1.00\n  dX(t)/dt = 2.00\n",
            report.to_string()
        );

        let report = KineticsReport::new("Y", "RNA", 0.0, &Kinetics::new(1.0, 0.5));
        assert!(report.to_string().contains("dX(t)/dt = 1.00 + 0.50X"));
        assert!(report.to_string().contains("steady state = -2.00"));
    }
}
