//! Strategy tests against the shared fixtures.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use planforge_core::{ActionId, Goal, Problem, State};
use planforge_test::{chain, errand, lights, route, switches, tyre};
use rayon::ThreadPoolBuilder;

use super::*;
use crate::heuristic::{
    FnHeuristic, GoalCountHeuristic, Heuristic, MaxCostHeuristic, ZeroHeuristic,
};
use crate::plan::Plan;
use crate::stats::SearchStats;
use crate::termination::{ExternalTermination, NoTermination, NodeCountTermination};

fn context<'a>(
    problem: &'a Problem,
    depth_limit: Option<usize>,
    termination: &'a dyn Termination,
) -> SearchContext<'a> {
    SearchContext {
        actions: problem.actions(),
        goal: problem.goal(),
        depth_limit,
        termination,
    }
}

fn names<'a>(problem: &'a Problem, steps: &[ActionId]) -> Vec<&'a str> {
    Plan::new(problem.actions(), steps.to_vec()).names()
}

fn assert_valid(problem: &Problem, steps: &[ActionId]) {
    let plan = Plan::new(problem.actions(), steps.to_vec());
    assert_eq!(plan.validate(problem.initial(), problem.goal()), Ok(()));
}

fn run_bfs(problem: &Problem, depth_limit: Option<usize>) -> (SearchOutcome, SearchStats) {
    let ctx = context(problem, depth_limit, &NoTermination);
    let mut scope = SearchScope::new();
    let outcome = breadth_first(&ctx, problem.initial(), &mut scope);
    (outcome, scope.finish())
}

fn run_parallel(
    problem: &Problem,
    depth_limit: Option<usize>,
    threads: usize,
) -> (SearchOutcome, SearchStats) {
    let pool = ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .unwrap();
    let ctx = context(problem, depth_limit, &NoTermination);
    let mut scope = SearchScope::new();
    let outcome = parallel_breadth_first(&ctx, problem.initial(), &mut scope, &pool);
    (outcome, scope.finish())
}

fn run_bfs_until(
    problem: &Problem,
    termination: &dyn Termination,
    threads: Option<usize>,
) -> (SearchOutcome, SearchStats) {
    let ctx = context(problem, None, termination);
    let mut scope = SearchScope::new();
    let outcome = match threads {
        None => breadth_first(&ctx, problem.initial(), &mut scope),
        Some(threads) => {
            let pool = ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .unwrap();
            parallel_breadth_first(&ctx, problem.initial(), &mut scope, &pool)
        }
    };
    (outcome, scope.finish())
}

fn run_best_first(
    problem: &Problem,
    heuristic: &dyn Heuristic,
    mode: PriorityMode,
) -> (SearchOutcome, SearchStats) {
    let ctx = context(problem, None, &NoTermination);
    let mut scope = SearchScope::new();
    let outcome = best_first(&ctx, problem.initial(), heuristic, mode, &mut scope);
    (outcome, scope.finish())
}

fn without_clock(mut stats: SearchStats) -> SearchStats {
    stats.elapsed = Default::default();
    stats
}

#[test]
fn test_breadth_first_errand() {
    let problem = errand::problem();
    let (outcome, stats) = run_bfs(&problem, None);
    let steps = outcome.unwrap();

    assert_eq!(
        names(&problem, &steps),
        vec!["grab_keys", "drive_to_store", "buy_milk"]
    );
    assert_eq!(stats.expansions, 3);
    assert_eq!(stats.generated, 4);
    assert_eq!(stats.duplicates, 1);
    assert_eq!(stats.max_depth, 3);
}

#[test]
fn test_breadth_first_exhausts_reachable_states() {
    let problem = errand::unreachable_problem();
    let (outcome, stats) = run_bfs(&problem, None);

    assert_eq!(outcome, Err(SolveError::NoPlanFound));
    // {home}, {home, keys}, {keys, store}, {keys, store, milk}
    assert_eq!(stats.expansions, 4);
    assert_eq!(stats.depth_pruned, 0);
}

#[test]
fn test_breadth_first_cyclic_domain_terminates() {
    let problem = lights::problem();
    let (outcome, _) = run_bfs(&problem, None);
    let steps = outcome.unwrap();

    assert_eq!(names(&problem, &steps), vec!["on_a", "off_b", "on_c"]);
    assert_valid(&problem, &steps);
}

#[test]
fn test_breadth_first_shortest_on_chain() {
    for n in 1..=6 {
        let problem = chain::problem(n);
        let (outcome, _) = run_bfs(&problem, None);
        let steps = outcome.unwrap();
        assert_eq!(steps.len(), n);
        assert_valid(&problem, &steps);
    }
}

#[test]
fn test_breadth_first_tyre() {
    let problem = tyre::problem();
    let (outcome, _) = run_bfs(&problem, None);
    let steps = outcome.unwrap();

    assert_eq!(steps.len(), 4);
    assert_valid(&problem, &steps);

    let tidy = tyre::tidy_problem();
    let (outcome, _) = run_bfs(&tidy, None);
    let steps = outcome.unwrap();
    assert_eq!(steps.len(), 5);
    assert_valid(&tidy, &steps);
}

#[test]
fn test_depth_limit_reports_budget() {
    let problem = chain::problem(4);

    let (outcome, stats) = run_bfs(&problem, Some(2));
    assert_eq!(outcome, Err(SolveError::BudgetExceeded(BudgetKind::DepthLimit)));
    assert!(stats.depth_pruned > 0);

    let (outcome, _) = run_bfs(&problem, Some(3));
    assert_eq!(outcome, Err(SolveError::BudgetExceeded(BudgetKind::DepthLimit)));

    // Goal nodes are tested on generation, so the limit itself suffices.
    let (outcome, _) = run_bfs(&problem, Some(4));
    assert_eq!(outcome.unwrap().len(), 4);
}

#[test]
fn test_unused_depth_limit_keeps_no_plan_found() {
    let problem = errand::unreachable_problem();
    let (outcome, stats) = run_bfs(&problem, Some(10));

    assert_eq!(outcome, Err(SolveError::NoPlanFound));
    assert_eq!(stats.depth_pruned, 0);
}

#[test]
fn test_node_limit_checked_before_expansion() {
    let problem = chain::problem(5);
    let limit = NodeCountTermination::new(2);
    let ctx = context(&problem, None, &limit);
    let mut scope = SearchScope::new();

    let outcome = breadth_first(&ctx, problem.initial(), &mut scope);

    assert_eq!(outcome, Err(SolveError::BudgetExceeded(BudgetKind::NodeLimit)));
    assert_eq!(scope.expansions(), 2);
}

#[test]
fn test_parallel_matches_sequential() {
    let problems = [
        errand::problem(),
        errand::unreachable_problem(),
        lights::problem(),
        chain::problem(7),
        switches::problem(6),
        tyre::problem(),
        tyre::tidy_problem(),
    ];

    for problem in &problems {
        for threads in [1, 4] {
            let (seq_outcome, seq_stats) = run_bfs(problem, None);
            let (par_outcome, par_stats) = run_parallel(problem, None, threads);
            assert_eq!(seq_outcome, par_outcome);
            assert_eq!(without_clock(seq_stats), without_clock(par_stats));
        }
    }
}

#[test]
fn test_duplicates_counted_once_per_generation() {
    let problem = switches::problem(3);
    let (outcome, stats) = run_bfs(&problem, None);

    assert_eq!(outcome.unwrap().len(), 3);
    assert_eq!(stats.expansions, 5);
    assert_eq!(stats.generated, 10);
    // each two-switch state is reached from both of its one-switch parents
    assert_eq!(stats.duplicates, 3);
}

#[test]
fn test_parallel_stops_inside_wide_layer() {
    let problem = switches::problem(40);

    for limit in [1, 2, 7] {
        let term = NodeCountTermination::new(limit);
        let (seq_outcome, seq_stats) = run_bfs_until(&problem, &term, None);
        let (par_outcome, par_stats) = run_bfs_until(&problem, &term, Some(4));

        assert_eq!(par_outcome, Err(SolveError::BudgetExceeded(BudgetKind::NodeLimit)));
        assert_eq!(seq_outcome, par_outcome);
        assert_eq!(par_stats.expansions, limit);
        assert_eq!(without_clock(seq_stats), without_clock(par_stats));
    }
}

#[test]
fn test_parallel_cancelled_before_first_batch() {
    let problem = switches::problem(40);
    let term = ExternalTermination::new(Arc::new(AtomicBool::new(true)));
    let (outcome, stats) = run_bfs_until(&problem, &term, Some(4));

    assert_eq!(outcome, Err(SolveError::BudgetExceeded(BudgetKind::Cancelled)));
    assert_eq!(stats.expansions, 0);
    assert_eq!(stats.generated, 0);
}

#[test]
fn test_parallel_matches_sequential_under_depth_limit() {
    let problem = chain::problem(6);
    for limit in [0, 2, 6] {
        let (seq_outcome, seq_stats) = run_bfs(&problem, Some(limit));
        let (par_outcome, par_stats) = run_parallel(&problem, Some(limit), 2);
        assert_eq!(seq_outcome, par_outcome);
        assert_eq!(without_clock(seq_stats), without_clock(par_stats));
    }
}

#[test]
fn test_uniform_cost_finds_cheapest_route() {
    let problem = route::problem();
    let (outcome, _) = run_best_first(&problem, &ZeroHeuristic, PriorityMode::CostPlusEstimate);
    let steps = outcome.unwrap();
    let plan = Plan::new(problem.actions(), steps);

    assert_eq!(plan.names(), route::CHEAPEST_PLAN.to_vec());
    assert_eq!(plan.cost(), route::CHEAPEST_COST);
}

#[test]
fn test_max_cost_astar_finds_cheapest_route() {
    let problem = route::problem();
    let heuristic = MaxCostHeuristic::new(problem.actions());
    let (outcome, _) = run_best_first(&problem, &heuristic, PriorityMode::CostPlusEstimate);
    let plan = Plan::new(problem.actions(), outcome.unwrap());

    assert_eq!(plan.cost(), route::CHEAPEST_COST);
}

#[test]
fn test_breadth_first_ignores_cost() {
    let problem = route::problem();
    let (outcome, _) = run_bfs(&problem, None);

    assert_eq!(names(&problem, &outcome.unwrap()), vec!["drive_direct"]);
}

#[test]
fn test_greedy_follows_estimate() {
    let problem = route::problem();
    let (outcome, _) = run_best_first(&problem, &GoalCountHeuristic, PriorityMode::EstimateOnly);
    let steps = outcome.unwrap();

    assert_eq!(names(&problem, &steps), vec!["drive_direct"]);
    assert_valid(&problem, &steps);
}

#[test]
fn test_best_first_on_tyre() {
    let problem = tyre::problem();
    let heuristic = MaxCostHeuristic::new(problem.actions());
    let (outcome, _) = run_best_first(&problem, &heuristic, PriorityMode::CostPlusEstimate);
    let steps = outcome.unwrap();

    assert_eq!(steps.len(), 4);
    assert_valid(&problem, &steps);
}

#[test]
fn test_root_dead_end() {
    let problem = errand::problem();
    let heuristic = FnHeuristic::new(|_: &State, _: &Goal| None);
    let (outcome, stats) = run_best_first(&problem, &heuristic, PriorityMode::CostPlusEstimate);

    assert_eq!(outcome, Err(SolveError::NoPlanFound));
    assert_eq!(stats.expansions, 0);
    assert_eq!(stats.dead_ends, 1);
}

#[test]
fn test_dead_ends_are_dropped() {
    let problem = errand::problem();
    let root = problem.initial().clone();
    let heuristic = FnHeuristic::new(move |state: &State, _: &Goal| {
        if *state == root {
            Some(3)
        } else {
            None
        }
    });
    let (outcome, stats) = run_best_first(&problem, &heuristic, PriorityMode::EstimateOnly);

    assert_eq!(outcome, Err(SolveError::NoPlanFound));
    assert_eq!(stats.expansions, 1);
    assert_eq!(stats.dead_ends, 1);
}

#[test]
fn test_best_first_unreachable() {
    let problem = errand::unreachable_problem();
    for mode in [PriorityMode::CostPlusEstimate, PriorityMode::EstimateOnly] {
        let (outcome, _) = run_best_first(&problem, &GoalCountHeuristic, mode);
        assert_eq!(outcome, Err(SolveError::NoPlanFound));
    }
}

#[test]
fn test_best_first_depth_limit() {
    let problem = chain::problem(4);
    let ctx = context(&problem, Some(2), &NoTermination);
    let mut scope = SearchScope::new();

    let outcome = best_first(
        &ctx,
        problem.initial(),
        &ZeroHeuristic,
        PriorityMode::CostPlusEstimate,
        &mut scope,
    );

    assert_eq!(outcome, Err(SolveError::BudgetExceeded(BudgetKind::DepthLimit)));
}
