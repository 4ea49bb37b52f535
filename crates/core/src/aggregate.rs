//! Aggregate root traits for in-memory domain models driven by typed updates.

/// Aggregate root marker + minimal interface.
pub trait AggregateRoot {
    /// Monotonically increasing version of the aggregate's state.
    ///
    /// Incremented once per successfully applied update.
    fn version(&self) -> u64;
}

/// Aggregate execution semantics (pure, deterministic).
///
/// - **Decision logic**: `check(&self, update)` rejects updates that would
///   break an invariant.
/// - **State mutation**: `evolve(&mut self, update)` changes state and cannot fail.
///
/// Aggregates must not perform IO or side effects.
pub trait Aggregate: AggregateRoot {
    type Update: Clone + core::fmt::Debug;
    type Error: core::fmt::Debug;

    /// Decide whether `update` may be applied to the current state.
    ///
    /// This must not mutate state.
    fn check(&self, update: &Self::Update) -> Result<(), Self::Error>;

    /// Evolve in-memory state with an update that already passed `check`.
    fn evolve(&mut self, update: &Self::Update);

    /// Check, then evolve. On error the aggregate is left untouched.
    fn apply(&mut self, update: &Self::Update) -> Result<(), Self::Error> {
        self.check(update)?;
        self.evolve(update);
        Ok(())
    }
}
