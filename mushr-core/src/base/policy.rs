//! Policies acting on environments.
use super::Env;

/// Chooses actions of `E` from its observations.
///
/// Policies may keep state between calls, e.g., a random number generator
/// or the previous action of a controller.
pub trait Policy<E: Env> {
    /// Returns the action for `obs`.
    fn sample(&mut self, obs: &E::Obs) -> E::Act;
}
