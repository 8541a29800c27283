//! Benchmark scenarios: a synthetic system plus the config to solve it with.
//!
//! 1. **Linear spring**: one DOF, converges on the first Newton step
//! 2. **Hanging chain**: taut spring chain sagging under its own weight
//! 3. **Slack cable**: tension-only chain longer than its span
//! 4. **Runaway load**: unresisted load, always runs out of iterations

use serde::{Deserialize, Serialize};

use statix_solver::{MechanicalSystem, SolverConfig};

use crate::systems::{LinearSpring, RunawayLoad, SpringChain};

/// Which benchmark scenario to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenarioKind {
    LinearSpring,
    HangingChain,
    SlackCable,
    RunawayLoad,
}

impl ScenarioKind {
    /// Returns all scenario kinds.
    pub fn all() -> &'static [ScenarioKind] {
        &[
            ScenarioKind::LinearSpring,
            ScenarioKind::HangingChain,
            ScenarioKind::SlackCable,
            ScenarioKind::RunawayLoad,
        ]
    }

    /// Returns a human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::LinearSpring => "linear_spring",
            ScenarioKind::HangingChain => "hanging_chain",
            ScenarioKind::SlackCable => "slack_cable",
            ScenarioKind::RunawayLoad => "runaway_load",
        }
    }

    /// Parses a name produced by [`ScenarioKind::name`].
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|kind| kind.name() == name)
    }
}

/// A fully specified benchmark scenario.
pub struct Scenario {
    pub kind: ScenarioKind,
    /// System in its initial state.
    pub system: Box<dyn MechanicalSystem>,
    pub config: SolverConfig,
}

impl Scenario {
    /// `E(x) = 10x − 5` from `x = 0`.
    pub fn linear_spring() -> Self {
        Self {
            kind: ScenarioKind::LinearSpring,
            system: Box::new(LinearSpring::default()),
            config: SolverConfig::default(),
        }
    }

    /// Nine free nodes on a span of 10, starting on the chord.
    pub fn hanging_chain() -> Self {
        Self {
            kind: ScenarioKind::HangingChain,
            system: Box::new(SpringChain::taut()),
            config: SolverConfig::default(),
        }
    }

    /// Nine free nodes of a tension-only cable on a span of 6.
    ///
    /// Starts fully slack; the parabolic robust step gives the solver a
    /// shape to work from.
    pub fn slack_cable() -> Self {
        Self {
            kind: ScenarioKind::SlackCable,
            system: Box::new(SpringChain::slack_cable()),
            config: SolverConfig {
                max_iterations: 100,
                ..Default::default()
            },
        }
    }

    /// Three DOFs pushed by a unit load with nothing holding them.
    pub fn runaway_load() -> Self {
        Self {
            kind: ScenarioKind::RunawayLoad,
            system: Box::new(RunawayLoad::new(3, 1.0)),
            config: SolverConfig::debug(),
        }
    }

    /// Creates a scenario from its kind.
    pub fn from_kind(kind: ScenarioKind) -> Self {
        match kind {
            ScenarioKind::LinearSpring => Self::linear_spring(),
            ScenarioKind::HangingChain => Self::hanging_chain(),
            ScenarioKind::SlackCable => Self::slack_cable(),
            ScenarioKind::RunawayLoad => Self::runaway_load(),
        }
    }

    /// Replaces the solver configuration.
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }
}
