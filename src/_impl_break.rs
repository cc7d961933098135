use crate::Break;

impl Break {
    pub fn new(time: f64, active: bool) -> Break {
        Break { time, active }
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Build breaks from a sorted list of toggle times, where the first toggle
    /// has the given state and every subsequent toggle flips it.
    pub fn alternating(times: &[f64], first: bool) -> Vec<Break> {
        let mut active = first;
        times
            .iter()
            .map(|time| {
                let result = Break::new(*time, active);
                active = !active;
                result
            })
            .collect()
    }
}

impl From<(f64, bool)> for Break {
    fn from(value: (f64, bool)) -> Self {
        Break::new(value.0, value.1)
    }
}

impl From<Break> for (f64, bool) {
    fn from(value: Break) -> Self {
        (value.time, value.active)
    }
}
