//! Integration tests for termination conditions.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::*;

fn scope_with_expansions(n: u64) -> SearchScope {
    let mut scope = SearchScope::new();
    for _ in 0..n {
        scope.stats_mut().record_expansion();
    }
    scope
}

#[test]
fn test_node_count_termination() {
    let term = NodeCountTermination::new(3);

    assert_eq!(term.check(&scope_with_expansions(2)), None);
    assert_eq!(
        term.check(&scope_with_expansions(3)),
        Some(BudgetKind::NodeLimit)
    );
}

#[test]
fn test_zero_node_limit_terminates_immediately() {
    let term = NodeCountTermination::new(0);
    assert_eq!(
        term.check(&SearchScope::new()),
        Some(BudgetKind::NodeLimit)
    );
}

#[test]
fn test_time_termination() {
    let scope = SearchScope::new();
    assert_eq!(TimeTermination::seconds(3600).check(&scope), None);
    assert_eq!(
        TimeTermination::new(Duration::ZERO).check(&scope),
        Some(BudgetKind::TimeLimit)
    );
}

#[test]
fn test_external_termination() {
    let flag = Arc::new(AtomicBool::new(false));
    let term = ExternalTermination::new(Arc::clone(&flag));
    let scope = SearchScope::new();

    assert_eq!(term.check(&scope), None);
    flag.store(true, Ordering::SeqCst);
    assert_eq!(term.check(&scope), Some(BudgetKind::Cancelled));
}

#[test]
fn test_optional_termination() {
    let scope = scope_with_expansions(5);
    let none: Option<NodeCountTermination> = None;
    assert_eq!(none.check(&scope), None);
    assert_eq!(
        Some(NodeCountTermination::new(5)).check(&scope),
        Some(BudgetKind::NodeLimit)
    );
}

#[test]
fn test_or_termination_reports_first_in_order() {
    let scope = scope_with_expansions(10);
    let term = OrTermination((
        TimeTermination::new(Duration::ZERO),
        NodeCountTermination::new(1),
    ));
    assert_eq!(term.check(&scope), Some(BudgetKind::TimeLimit));

    let term = OrTermination::new((
        None::<TimeTermination>,
        NodeCountTermination::new(100),
        NoTermination,
    ));
    assert_eq!(term.check(&scope), None);
}

#[test]
fn test_expansions_left() {
    let scope = scope_with_expansions(3);
    assert_eq!(NodeCountTermination::new(5).expansions_left(&scope), Some(2));
    assert_eq!(NodeCountTermination::new(2).expansions_left(&scope), Some(0));
    assert_eq!(TimeTermination::seconds(1).expansions_left(&scope), None);

    let term = OrTermination((
        None::<ExternalTermination>,
        Some(NodeCountTermination::new(10)),
        NodeCountTermination::new(4),
    ));
    assert_eq!(term.expansions_left(&scope), Some(1));

    let unbounded = OrTermination((TimeTermination::seconds(1), NoTermination));
    assert_eq!(unbounded.expansions_left(&scope), None);
}
