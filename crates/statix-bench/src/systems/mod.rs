//! Synthetic mechanical systems.
//!
//! Small, fully analytic systems implementing
//! [`MechanicalSystem`](statix_solver::MechanicalSystem). They exist to
//! exercise and benchmark the solver, not to model real structures.

pub mod linear_spring;
pub mod runaway;
pub mod spring_chain;

pub use linear_spring::LinearSpring;
pub use runaway::RunawayLoad;
pub use spring_chain::SpringChain;
