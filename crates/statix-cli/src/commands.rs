//! CLI command implementations.

use statix_bench::metrics::BenchmarkMetrics;
use statix_bench::runner::BenchmarkRunner;
use statix_bench::scenarios::{Scenario, ScenarioKind};
use statix_solver::hooks::TracingHook;
use statix_solver::{HybridSolver, SolverConfig};
use statix_types::StatixError;

type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Reads a TOML solver config.
fn load_config(path: &str) -> Result<SolverConfig, StatixError> {
    let text = std::fs::read_to_string(path)?;
    toml::from_str(&text).map_err(|e| StatixError::Serialization(format!("{path}: {e}")))
}

fn parse_scenario(name: &str) -> Result<ScenarioKind, Box<dyn std::error::Error>> {
    ScenarioKind::from_name(name).ok_or_else(|| {
        let available: Vec<&str> = ScenarioKind::all().iter().map(|k| k.name()).collect();
        format!("Unknown scenario: '{name}'. Available: {}", available.join(", ")).into()
    })
}

/// Solve one scenario and print the report.
pub fn solve(scenario_name: &str, config_path: Option<&str>, show_trace: bool, json: bool) -> CommandResult {
    let kind = parse_scenario(scenario_name)?;
    let mut scenario = Scenario::from_kind(kind);
    if let Some(path) = config_path {
        scenario = scenario.with_config(load_config(path)?);
    }

    let solver = HybridSolver::new(scenario.config.clone());
    let report = solver.solve_with_hook(scenario.system.as_mut(), &mut TracingHook)?;

    if json {
        let text = serde_json::to_string_pretty(&report)
            .map_err(|e| StatixError::Serialization(e.to_string()))?;
        println!("{text}");
        return Ok(());
    }

    println!("Statix Solve");
    println!("────────────");
    println!("Scenario:       {} ({} DOFs)", kind.name(), scenario.system.n_dofs());
    println!("Outcome:        {:?}", report.outcome);
    println!("Iterations:     {}", report.iterations);
    println!("Final residual: {:.6e}", report.final_residual);
    println!("Final energy:   {:.6e}", report.final_energy);
    println!("Newton steps:   {}", report.trace.newton_accepted());
    println!("LS retries:     {}", report.trace.line_search_retries());
    println!("DOFs refined:   {}", report.trace.dofs_refined());
    println!("Wall time:      {:.3}ms", report.wall_time * 1000.0);

    let dofs = scenario.system.get_dofs();
    let shown: Vec<String> = dofs.iter().take(12).map(|v| format!("{v:.6}")).collect();
    let ellipsis = if dofs.len() > shown.len() { ", ..." } else { "" };
    println!("DOFs:           [{}{ellipsis}]", shown.join(", "));

    if show_trace {
        println!();
        println!("Trace:");
        print!("{}", report.trace);
    }

    Ok(())
}

/// Run benchmark suite.
pub fn benchmark(scenario_name: &str, output_path: Option<&str>) -> CommandResult {
    println!("Statix Benchmark Suite");
    println!("══════════════════════");
    println!();

    let scenarios: Vec<ScenarioKind> = if scenario_name == "all" {
        ScenarioKind::all().to_vec()
    } else {
        vec![parse_scenario(scenario_name)?]
    };

    let mut all_metrics = Vec::new();
    for &kind in &scenarios {
        let mut scenario = Scenario::from_kind(kind);
        println!(
            "Running: {} ({} DOFs, max {} iterations)",
            kind.name(),
            scenario.system.n_dofs(),
            scenario.config.max_iterations,
        );

        let metrics = BenchmarkRunner::run(&mut scenario)
            .map_err(|e| format!("Benchmark failed: {e}"))?;

        println!("  Outcome:       {}", metrics.outcome);
        println!("  Iterations:    {}", metrics.iterations);
        println!("  Residual:      {:.3e} -> {:.3e}", metrics.initial_residual, metrics.final_residual);
        println!("  Wall time:     {:.3}ms", metrics.wall_time * 1000.0);
        println!();

        all_metrics.push(metrics);
    }

    if let Some(path) = output_path {
        let csv = BenchmarkMetrics::to_csv(&all_metrics);
        std::fs::write(path, &csv)?;
        println!("Results written to: {path}");
    } else {
        println!("CSV Output:");
        println!("{}", BenchmarkMetrics::to_csv(&all_metrics));
    }

    Ok(())
}

/// Validate a solver config file.
pub fn validate(path: &str) -> CommandResult {
    println!("Statix Config Validator");
    println!("───────────────────────");
    println!();

    let config = load_config(path)?;
    config.validate()?;

    println!("✓ Valid solver config: {path}");
    println!("  max_iterations:   {}", config.max_iterations);
    println!("  tolerance:        {:e}", config.tolerance);
    println!("  energy_tolerance: {:e}", config.energy_tolerance);
    println!("  step_limit:       {}", config.step_limit);
    println!("  refine_step:      {:e}", config.refine_step);
    println!("  backtracking:     {:?}", config.backtrack_factors());
    println!("  robust step:      {}", config.use_robust_step);
    match config.timeout_s {
        Some(t) => println!("  timeout:          {t}s"),
        None => println!("  timeout:          none"),
    }

    Ok(())
}
