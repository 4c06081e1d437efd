use super::Error;

/// An interval `[lower, upper]` with the function values at its ends, and
/// the point with the smallest `|f|` seen so far.
#[derive(Debug, Clone, Copy)]
pub(super) struct Bracket {
    lower: f64,
    f_lower: f64,
    upper: f64,
    f_upper: f64,
    best: (f64, f64),
}

impl Bracket {
    /// Orders and evaluates the two ends.
    #[allow(clippy::float_cmp)]
    pub(super) fn new(
        ends: [f64; 2],
        evaluate: &mut impl FnMut(f64) -> Result<f64, Error>,
    ) -> Result<Self, Error> {
        let [a, b] = ends;
        if !a.is_finite() || !b.is_finite() || a == b {
            return Err(Error::InvalidBracket { lower: a, upper: b });
        }
        let (lower, upper) = if a < b { (a, b) } else { (b, a) };

        let f_lower = evaluate(lower)?;
        let f_upper = evaluate(upper)?;
        let best = if f_lower.abs() <= f_upper.abs() {
            (lower, f_lower)
        } else {
            (upper, f_upper)
        };

        Ok(Self {
            lower,
            f_lower,
            upper,
            f_upper,
            best,
        })
    }

    pub(super) fn check_sign_change(&self) -> Result<(), Error> {
        #[allow(clippy::float_cmp)]
        if self.f_lower.signum() == self.f_upper.signum() {
            Err(Error::SameSign {
                lower: self.lower,
                upper: self.upper,
                f_lower: self.f_lower,
                f_upper: self.f_upper,
            })
        } else {
            Ok(())
        }
    }

    pub(super) fn ends(&self) -> [f64; 2] {
        [self.lower, self.upper]
    }

    pub(super) fn midpoint(&self) -> f64 {
        0.5 * (self.lower + self.upper)
    }

    /// Point with the smallest `|f|` evaluated so far, as `(x, f(x))`.
    pub(super) fn best(&self) -> (f64, f64) {
        self.best
    }

    /// Replaces the end whose value has the same sign as `value` with `x`.
    pub(super) fn split(&mut self, x: f64, value: f64) {
        if value.abs() < self.best.1.abs() {
            self.best = (x, value);
        }

        #[allow(clippy::float_cmp)]
        if value.signum() == self.f_lower.signum() {
            self.lower = x;
            self.f_lower = value;
        } else {
            self.upper = x;
            self.f_upper = value;
        }
    }
}
