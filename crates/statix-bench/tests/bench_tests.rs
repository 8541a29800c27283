//! Integration tests for statix-bench.

use statix_bench::metrics::BenchmarkMetrics;
use statix_bench::runner::BenchmarkRunner;
use statix_bench::scenarios::{Scenario, ScenarioKind};
use statix_bench::systems::{LinearSpring, RunawayLoad, SpringChain};
use statix_solver::hooks::HistoryHook;
use statix_solver::{HybridSolver, MechanicalSystem, SolveOutcome, SolverConfig};

/// A taut chain pulled off its chord so every segment has a distinct direction.
fn perturbed_chain() -> SpringChain {
    let mut chain = SpringChain::taut();
    let mut dofs = chain.get_dofs();
    for (i, v) in dofs.iter_mut().enumerate() {
        *v += 0.05 * ((i as f64) * 1.7).sin();
    }
    chain.set_dofs(&dofs);
    chain.state_update_forces();
    chain
}

fn energy_at(chain: &mut SpringChain, dofs: &[f64]) -> f64 {
    chain.set_dofs(dofs);
    chain.state_update_forces();
    chain.energy()
}

fn residual_at(chain: &mut SpringChain, dofs: &[f64]) -> Vec<f64> {
    chain.set_dofs(dofs);
    chain.state_update_forces();
    chain.residual()
}

// ─── System Tests ─────────────────────────────────────────────

#[test]
fn linear_spring_forces() {
    let mut spring = LinearSpring::default();
    spring.state_update_forces();
    assert_eq!(spring.residual(), vec![-5.0]);
    assert_eq!(spring.stiffness()[(0, 0)], -10.0);
    assert!((spring.energy() - 1.25).abs() < 1e-12);
}

#[test]
fn chain_residual_is_energy_gradient() {
    let mut chain = perturbed_chain();
    let base = chain.get_dofs();
    let residual = chain.residual();
    let h = 1e-6;

    for i in 0..base.len() {
        let mut plus = base.clone();
        let mut minus = base.clone();
        plus[i] += h;
        minus[i] -= h;
        let fd = (energy_at(&mut chain, &plus) - energy_at(&mut chain, &minus)) / (2.0 * h);
        assert!(
            (fd - residual[i]).abs() < 1e-5,
            "dof {i}: finite difference {fd}, residual {}",
            residual[i]
        );
    }
}

#[test]
fn chain_stiffness_is_negated_residual_jacobian() {
    let mut chain = perturbed_chain();
    let base = chain.get_dofs();
    let stiffness = chain.stiffness();
    let h = 1e-6;

    for j in 0..base.len() {
        let mut plus = base.clone();
        let mut minus = base.clone();
        plus[j] += h;
        minus[j] -= h;
        let e_plus = residual_at(&mut chain, &plus);
        let e_minus = residual_at(&mut chain, &minus);
        for i in 0..base.len() {
            let fd = -(e_plus[i] - e_minus[i]) / (2.0 * h);
            assert!(
                (fd - stiffness[(i, j)]).abs() < 1e-4,
                "K[{i}][{j}]: finite difference {fd}, stiffness {}",
                stiffness[(i, j)]
            );
        }
    }
}

#[test]
fn taut_chain_restrains_every_dof() {
    let mut chain = SpringChain::taut();
    chain.state_update_forces();
    let k = chain.stiffness();
    for i in 0..chain.n_dofs() {
        assert!(k[(i, i)] < 0.0, "dof {i} should be restrained");
    }
}

#[test]
fn slack_segments_carry_nothing() {
    let mut cable = SpringChain::slack_cable();
    cable.state_update_forces();

    // On the chord every segment is shorter than its rest length.
    for s in 0..cable.segments() {
        assert!(cable.segment_length(s) < cable.rest_length);
    }
    let residual = cable.residual();
    for node in 0..cable.free_nodes() {
        assert_eq!(residual[2 * node], 0.0);
        assert_eq!(residual[2 * node + 1], cable.weight);
    }
    let k = cable.stiffness();
    for i in 0..cable.n_dofs() {
        assert_eq!(k[(i, i)], 0.0);
    }
}

#[test]
fn robust_step_hangs_slack_cable_on_parabola() {
    let mut cable = SpringChain::slack_cable();
    cable.robust_step();

    // Span 6, total rest length 9.
    let expected_sag = (3.0f64 * 6.0 * 3.0 / 8.0).sqrt();
    let middle = cable.node(5);
    assert!((middle[0] - 3.0).abs() < 1e-12);
    assert!((middle[1] + expected_sag).abs() < 1e-12);
}

#[test]
fn robust_step_keeps_taut_chain_on_chord() {
    let mut chain = SpringChain::taut();
    let before = chain.get_dofs();
    chain.robust_step();
    assert_eq!(chain.get_dofs(), before);
}

#[test]
fn runaway_load_never_balances() {
    let mut load = RunawayLoad::new(2, 3.0);
    load.change_dof(1, -2.0);
    load.state_update_forces();
    assert_eq!(load.residual(), vec![3.0, 3.0]);
    assert_eq!(load.energy(), -6.0);
}

// ─── Scenario Tests ───────────────────────────────────────────

#[test]
fn all_scenarios() {
    assert_eq!(ScenarioKind::all().len(), 4);
}

#[test]
fn scenario_names_parse_back() {
    for &kind in ScenarioKind::all() {
        assert_eq!(ScenarioKind::from_name(kind.name()), Some(kind));
    }
    assert_eq!(ScenarioKind::from_name("hanging_sheet"), None);
}

#[test]
fn hanging_chain_setup() {
    let s = Scenario::hanging_chain();
    assert_eq!(s.kind, ScenarioKind::HangingChain);
    assert_eq!(s.system.n_dofs(), 18);
    assert_eq!(s.config, SolverConfig::default());
}

#[test]
fn with_config_replaces_config() {
    let s = Scenario::linear_spring().with_config(SolverConfig::debug());
    assert_eq!(s.config.max_iterations, 5);
}

// ─── Solve Tests ──────────────────────────────────────────────

#[test]
fn hanging_chain_converges_to_symmetric_sag() {
    let mut chain = SpringChain::taut();
    let report = HybridSolver::default().solve(&mut chain).unwrap();

    assert!(report.is_converged(), "outcome: {:?}", report.outcome);
    assert!(report.final_residual < 1e-3);

    let n = chain.free_nodes();
    for i in 1..=n {
        let left = chain.node(i);
        let right = chain.node(n + 1 - i);
        assert!(left[1] < 0.0, "node {i} should hang below the anchors");
        assert!((left[1] - right[1]).abs() < 1e-2);
        assert!((left[0] + right[0] - 10.0).abs() < 1e-2);
    }
    // Every segment ends up in tension.
    for s in 0..chain.segments() {
        assert!(chain.segment_length(s) > chain.rest_length);
    }
}

#[test]
fn slack_cable_energy_never_rises() {
    let mut cable = SpringChain::slack_cable();
    let config = SolverConfig {
        max_iterations: 30,
        ..Default::default()
    };
    let mut history = HistoryHook::new();
    let report = HybridSolver::new(config)
        .solve_with_hook(&mut cable, &mut history)
        .unwrap();

    assert!(!history.samples.is_empty());
    for pair in history.samples.windows(2) {
        assert!(
            pair[1].energy <= pair[0].energy + 1e-12,
            "energy rose from {} to {}",
            pair[0].energy,
            pair[1].energy
        );
    }
    assert_eq!(history.outcome, Some(report.outcome));
}

// ─── Runner Tests ─────────────────────────────────────────────

#[test]
fn run_linear_spring() {
    let mut scenario = Scenario::linear_spring();
    let metrics = BenchmarkRunner::run(&mut scenario).unwrap();

    assert_eq!(metrics.scenario, "linear_spring");
    assert_eq!(metrics.dofs, 1);
    assert_eq!(metrics.outcome, "converged");
    assert!(metrics.converged);
    assert_eq!(metrics.iterations, 1);
    assert_eq!(metrics.newton_accepted, 1);
    assert!((metrics.initial_residual - 5.0).abs() < 1e-12);
    assert!(metrics.final_residual < 1e-3);
    assert!(metrics.wall_time >= 0.0);

    let x = scenario.system.get_dofs()[0];
    assert!((x - 0.5).abs() < 1e-12);
}

#[test]
fn run_runaway_load() {
    let mut scenario = Scenario::runaway_load();
    let metrics = BenchmarkRunner::run(&mut scenario).unwrap();

    assert_eq!(metrics.outcome, "max_iterations_exceeded");
    assert!(!metrics.converged);
    assert_eq!(metrics.iterations, 5);
    assert_eq!(metrics.newton_accepted, 0);
    assert_eq!(metrics.dofs_refined, 15);
    assert_eq!(metrics.final_residual, 1.0);
}

#[test]
fn runaway_load_outcome() {
    let mut scenario = Scenario::runaway_load();
    let report = HybridSolver::new(scenario.config.clone())
        .solve(scenario.system.as_mut())
        .unwrap();
    assert_eq!(report.outcome, SolveOutcome::MaxIterationsExceeded);
}

#[test]
fn run_all_scenarios() {
    let results = BenchmarkRunner::run_all().unwrap();
    assert_eq!(results.len(), ScenarioKind::all().len());
    for (metrics, kind) in results.iter().zip(ScenarioKind::all()) {
        assert_eq!(metrics.scenario, kind.name());
        assert!(metrics.final_residual.is_finite());
    }
}

// ─── Metrics Tests ────────────────────────────────────────────

fn sample_metrics() -> BenchmarkMetrics {
    BenchmarkMetrics {
        scenario: "hanging_chain".into(),
        dofs: 18,
        outcome: "converged".into(),
        converged: true,
        iterations: 4,
        newton_accepted: 4,
        line_search_retries: 0,
        dofs_refined: 0,
        initial_residual: 1.0,
        final_residual: 1e-7,
        final_energy: -12.5,
        wall_time: 0.002,
    }
}

#[test]
fn csv_row_matches_header() {
    let header_cols = BenchmarkMetrics::to_csv_header().split(',').count();
    let row_cols = sample_metrics().to_csv_row().split(',').count();
    assert_eq!(header_cols, row_cols);
}

#[test]
fn csv_has_one_line_per_run() {
    let csv = BenchmarkMetrics::to_csv(&[sample_metrics(), sample_metrics()]);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("hanging_chain,18,converged,true,4,"));
}

#[test]
fn metrics_serialize_to_json() {
    let json = serde_json::to_string(&sample_metrics()).unwrap();
    assert!(json.contains("\"scenario\":\"hanging_chain\""));
    let back: BenchmarkMetrics = serde_json::from_str(&json).unwrap();
    assert_eq!(back.iterations, 4);
}
