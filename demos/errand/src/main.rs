//! Errand Example
//!
//! Get from home to the store and buy milk. The car keys have to be picked
//! up first, and driving away means no longer being at home.
//!
//! The second problem asks to be at home with the milk, which this domain
//! cannot do because nothing drives back.

use std::sync::Arc;

use planforge::console;
use planforge::prelude::*;
use planforge::DomainError;

fn errand_domain() -> Result<Arc<Domain>, DomainError> {
    let domain = DomainBuilder::new("errand")
        .propositions(["at_home", "have_keys", "at_store", "have_milk"])
        .action(ActionDef::new("grab_keys").requires("at_home").adds("have_keys"))
        .action(
            ActionDef::new("drive_to_store")
                .requires("at_home")
                .requires("have_keys")
                .adds("at_store")
                .deletes("at_home"),
        )
        .action(ActionDef::new("buy_milk").requires("at_store").adds("have_milk"))
        .build()?;
    Ok(Arc::new(domain))
}

/// Prints each step with the state it leads to.
fn print_plan(problem: &Problem, plan: &Plan<'_>) {
    let domain = problem.domain();
    println!("\nPlan ({} steps, cost {}):", plan.len(), plan.cost());
    println!("  {:<16} {}", "(initial)", domain.mask_str(problem.initial()));

    // Plans returned by the solver always replay.
    let Ok(states) = plan.replay(problem.initial()) else {
        return;
    };
    for (action, state) in plan.iter().zip(states.iter().skip(1)) {
        println!(
            "  {:<16} {}  {}",
            action.name(),
            domain.mask_str(state),
            domain.true_propositions(state).join(", ")
        );
    }
}

fn run(solver: &Solver, problem: &Problem) {
    let result = solver.solve(problem);
    match &result.outcome {
        Ok(plan) => print_plan(problem, plan),
        Err(e) => println!("\nNo plan: {}", e),
    }
    println!(
        "  expansions {}, generated {}, duplicates {}, {:.0} nodes/sec",
        result.stats.expansions,
        result.stats.generated,
        result.stats.duplicates,
        result.stats.nodes_per_second()
    );
}

fn main() -> Result<(), DomainError> {
    console::init();

    let config = PlannerConfig::load("planner.toml").unwrap_or_default();
    let solver = Solver::from_config(config);
    let domain = errand_domain()?;

    run(&solver, &domain.problem(["at_home"], ["have_milk"])?);
    run(&solver, &domain.problem(["at_home"], ["at_home", "have_milk"])?);

    Ok(())
}
