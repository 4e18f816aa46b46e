//! Solver entry points.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use planforge_config::{PlannerConfig, SearchStrategy, ThreadCount};
use planforge_core::{Action, BitSet, Domain, DomainError, Goal, Problem, State};
use rayon::ThreadPoolBuilder;
use tracing::info;

use crate::error::SolveError;
use crate::heuristic::{self, Heuristic};
use crate::plan::Plan;
use crate::scope::SearchScope;
use crate::search::{self, PriorityMode, SearchContext, SearchOutcome};
use crate::stats::SearchStats;
use crate::termination::{
    ExternalTermination, NodeCountTermination, OrTermination, TimeTermination,
};

/// The outcome of one search together with its statistics.
#[derive(Debug)]
pub struct SolveResult<'a> {
    pub outcome: Result<Plan<'a>, SolveError>,
    pub stats: SearchStats,
}

impl<'a> SolveResult<'a> {
    pub fn plan(&self) -> Option<&Plan<'a>> {
        self.outcome.as_ref().ok()
    }

    pub fn is_solved(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn into_result(self) -> Result<Plan<'a>, SolveError> {
        self.outcome
    }
}

/// Configurable forward planner.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use planforge_core::{ActionDef, DomainBuilder};
/// use planforge_solver::{SearchStrategy, Solver};
///
/// let domain = Arc::new(
///     DomainBuilder::new("errand")
///         .propositions(["at_home", "have_keys", "at_store", "have_milk"])
///         .action(ActionDef::new("grab_keys").requires("at_home").adds("have_keys"))
///         .action(
///             ActionDef::new("drive_to_store")
///                 .requires("at_home")
///                 .requires("have_keys")
///                 .adds("at_store")
///                 .deletes("at_home"),
///         )
///         .action(ActionDef::new("buy_milk").requires("at_store").adds("have_milk"))
///         .build()
///         .unwrap(),
/// );
/// let problem = domain.problem(["at_home"], ["have_milk"]).unwrap();
///
/// let result = Solver::new()
///     .with_strategy(SearchStrategy::BreadthFirst)
///     .solve(&problem);
///
/// let plan = result.plan().unwrap();
/// assert_eq!(plan.names(), vec!["grab_keys", "drive_to_store", "buy_milk"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: PlannerConfig,
    heuristic: Option<Arc<dyn Heuristic>>,
    terminate_flag: Option<Arc<AtomicBool>>,
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: PlannerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.config.strategy = strategy;
        self
    }

    /// Uses `heuristic` instead of the configured kind.
    pub fn with_heuristic(mut self, heuristic: impl Heuristic + 'static) -> Self {
        self.heuristic = Some(Arc::new(heuristic));
        self
    }

    pub fn with_node_limit(mut self, limit: u64) -> Self {
        self.config = self.config.with_node_limit(limit);
        self
    }

    pub fn with_depth_limit(mut self, limit: usize) -> Self {
        self.config = self.config.with_depth_limit(limit);
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        let millis = u64::try_from(limit.as_millis()).unwrap_or(u64::MAX);
        self.config = self.config.with_time_limit_millis(millis);
        self
    }

    pub fn with_thread_count(mut self, thread_count: ThreadCount) -> Self {
        self.config.thread_count = thread_count;
        self
    }

    /// Stops the search with `BudgetExceeded(Cancelled)` once `flag` is set.
    pub fn with_termination_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.terminate_flag = Some(flag);
        self
    }

    /// Solves a problem built from a [`Domain`].
    pub fn solve<'a>(&self, problem: &'a Problem) -> SolveResult<'a> {
        self.run(
            problem.initial(),
            problem.actions(),
            problem.goal(),
            Some(problem.domain()),
        )
    }

    /// Solves from raw masks.
    ///
    /// All inputs must share one bit width; otherwise the outcome is
    /// `SolveError::Domain(DomainError::WidthMismatch { .. })`.
    pub fn solve_from<'a>(
        &self,
        initial: &State,
        actions: &'a [Action],
        goal: &Goal,
    ) -> SolveResult<'a> {
        self.run(initial, actions, goal, None)
    }

    fn run<'a>(
        &self,
        initial: &State,
        actions: &'a [Action],
        goal: &Goal,
        domain: Option<&Domain>,
    ) -> SolveResult<'a> {
        info!(
            event = "solve_start",
            strategy = %self.config.strategy,
            domain = domain.map_or("", |d| d.name()),
            propositions = domain.map_or(0, |d| d.width()),
            actions = actions.len(),
        );

        let mut scope = SearchScope::new();
        let outcome = self
            .search(initial, actions, goal, &mut scope)
            .map(|steps| Plan::new(actions, steps));
        let stats = scope.finish();

        match &outcome {
            Ok(plan) => info!(
                event = "solve_end",
                outcome = "plan_found",
                plan_length = plan.len(),
                plan_cost = plan.cost(),
                expansions = stats.expansions,
                generated = stats.generated,
                duration_ms = stats.elapsed.as_millis() as u64,
            ),
            Err(e) => info!(
                event = "solve_end",
                outcome = %e,
                expansions = stats.expansions,
                generated = stats.generated,
                duration_ms = stats.elapsed.as_millis() as u64,
            ),
        }

        SolveResult { outcome, stats }
    }

    fn search(
        &self,
        initial: &State,
        actions: &[Action],
        goal: &Goal,
        scope: &mut SearchScope,
    ) -> SearchOutcome {
        check_widths(initial, actions, goal)?;
        if goal.is_contradictory() {
            return Err(SolveError::Unsatisfiable);
        }
        scope.stats_mut().record_goal_test();
        if goal.satisfied(initial) {
            return Ok(Vec::new());
        }

        let termination = OrTermination((
            self.terminate_flag.clone().map(ExternalTermination::new),
            self.config.time_limit().map(TimeTermination::new),
            self.config.node_limit().map(NodeCountTermination::new),
        ));
        let ctx = SearchContext {
            actions,
            goal,
            depth_limit: self.config.depth_limit(),
            termination: &termination,
        };

        match self.config.strategy {
            SearchStrategy::BreadthFirst => match self.config.thread_count.resolve() {
                None => search::breadth_first(&ctx, initial, scope),
                Some(0) => Err(SolveError::ThreadPool(
                    "thread count must be at least 1".to_string(),
                )),
                Some(threads) => {
                    let pool = ThreadPoolBuilder::new()
                        .num_threads(threads)
                        .build()
                        .map_err(|e| SolveError::ThreadPool(e.to_string()))?;
                    search::parallel_breadth_first(&ctx, initial, scope, &pool)
                }
            },
            SearchStrategy::BestFirst | SearchStrategy::GreedyBestFirst => {
                let mode = if self.config.strategy == SearchStrategy::BestFirst {
                    PriorityMode::CostPlusEstimate
                } else {
                    PriorityMode::EstimateOnly
                };
                match &self.heuristic {
                    Some(h) => search::best_first(&ctx, initial, h.as_ref(), mode, scope),
                    None => {
                        let built = heuristic::for_kind(self.config.heuristic, actions);
                        search::best_first(&ctx, initial, built.as_ref(), mode, scope)
                    }
                }
            }
        }
    }
}

/// Rejects masks whose word count differs from the initial state's.
fn check_widths(initial: &State, actions: &[Action], goal: &Goal) -> Result<(), DomainError> {
    let expected = initial.bits().word_count();
    let check = |mask: &BitSet| {
        if mask.word_count() == expected {
            Ok(())
        } else {
            Err(DomainError::WidthMismatch {
                expected,
                found: mask.word_count(),
            })
        }
    };

    check(goal.positive())?;
    check(goal.negative())?;
    for action in actions {
        // Action::new already keeps its four masks at one width.
        check(action.pre_pos())?;
    }
    Ok(())
}

/// Searches for a plan from `initial` to `goal`.
///
/// # Example
///
/// ```
/// use planforge_core::{Action, BitSet, Goal, State};
/// use planforge_solver::{solve, PlannerConfig, SolveError};
///
/// let light_on = Action::new(
///     "switch_on",
///     BitSet::empty(2),
///     BitSet::from_indices(2, [0]),
///     BitSet::from_indices(2, [0]),
///     BitSet::empty(2),
/// )
/// .unwrap();
/// let actions = [light_on];
///
/// let initial = State::empty(2);
/// let lit = Goal::positive_only(BitSet::from_indices(2, [0]));
/// let plan = solve(&initial, &actions, &lit, &PlannerConfig::default()).unwrap();
/// assert_eq!(plan.names(), vec!["switch_on"]);
///
/// let impossible = Goal::positive_only(BitSet::from_indices(2, [1]));
/// assert_eq!(
///     solve(&initial, &actions, &impossible, &PlannerConfig::default()),
///     Err(SolveError::NoPlanFound)
/// );
/// ```
pub fn solve<'a>(
    initial: &State,
    actions: &'a [Action],
    goal: &Goal,
    config: &PlannerConfig,
) -> Result<Plan<'a>, SolveError> {
    Solver::from_config(config.clone())
        .solve_from(initial, actions, goal)
        .into_result()
}
