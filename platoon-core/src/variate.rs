use rand_chacha::ChaChaRng;
use rand_core::{Rng, SeedableRng as _};
use rand_distr::{Distribution as _, Exp};

/// Source of the random durations drawn by the trucks.
///
/// Every draw of a trial goes through one [`VariateSource`] so that the
/// whole trial is reproducible once the source is seeded. Draws happen in
/// a strict order: truck by truck, and within a truck packet by packet
/// (inter-arrival jitter first, then service time).
pub trait VariateSource {
    /// Draw a duration from an exponential distribution of the given
    /// `rate` (mean `1 / rate`).
    ///
    /// An infinite `rate` always yields `0.0`.
    fn exponential(&mut self, rate: f64) -> f64;
}

/// Exponential sampling over a random generator, with [`rand_distr::Exp`].
///
/// The default generator is [`ChaChaRng`].
///
/// # Example
///
/// ```
/// use platoon_core::{Exponential, VariateSource as _};
///
/// let mut a = Exponential::seeded(42);
/// let mut b = Exponential::seeded(42);
/// assert_eq!(a.exponential(3.0), b.exponential(3.0));
/// ```
#[derive(Debug, Clone)]
pub struct Exponential<R = ChaChaRng> {
    rng: R,
}

/// Degenerate source: every draw is exactly the mean `1 / rate`.
///
/// Useful to reason about the queueing recurrences without variance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fixed;

impl Exponential<ChaChaRng> {
    /// Create a [`ChaChaRng`] backed source with the given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaChaRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Exponential<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> VariateSource for Exponential<R> {
    /// Rates the distribution rejects (negative or NaN, which a validated
    /// [`SimConfig`](crate::SimConfig) never holds) draw `0.0`.
    fn exponential(&mut self, rate: f64) -> f64 {
        if rate.is_infinite() {
            return 0.0;
        }
        match Exp::new(rate) {
            Ok(exp) => exp.sample(&mut self.rng),
            Err(_) => 0.0,
        }
    }
}

impl VariateSource for Fixed {
    fn exponential(&mut self, rate: f64) -> f64 {
        if rate.is_infinite() {
            return 0.0;
        }
        1.0 / rate
    }
}

impl<V: VariateSource + ?Sized> VariateSource for &mut V {
    fn exponential(&mut self, rate: f64) -> f64 {
        (**self).exponential(rate)
    }
}
