//! Decision and behavior queues.
//!
//! Both are a [`LayeredQueue`]: one-shot entries consumed in registration
//! order, over a persistent fallback that is replaced but never consumed.

mod behavior;
mod gate;
mod layered;

pub use behavior::Behavior;
pub use gate::Gate;
pub use layered::LayeredQueue;

/// "Should this call be mocked" queue. Fallback: mock everything.
pub type DecisionQueue = LayeredQueue<Gate>;

/// "What should this call return" queue. Fallback: empty-body response.
pub type BehaviorQueue = LayeredQueue<Behavior>;
