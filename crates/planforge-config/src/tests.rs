//! Tests for planner configuration.

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        strategy = "greedy_best_first"
        heuristic = "zero"
        thread_count = { count = 4 }

        [termination]
        node_limit = 5000
        depth_limit = 12
        millis_spent_limit = 250
    "#;

    let config = PlannerConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.strategy, SearchStrategy::GreedyBestFirst);
    assert_eq!(config.heuristic, HeuristicType::Zero);
    assert_eq!(config.thread_count, ThreadCount::Count(4));
    assert_eq!(config.node_limit(), Some(5000));
    assert_eq!(config.depth_limit(), Some(12));
    assert_eq!(config.time_limit(), Some(Duration::from_millis(250)));
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        strategy: best_first
        heuristic: max_cost
        thread_count: auto
        termination:
          seconds_spent_limit: 2
          millis_spent_limit: 500
    "#;

    let config = PlannerConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.strategy, SearchStrategy::BestFirst);
    assert_eq!(config.heuristic, HeuristicType::MaxCost);
    assert_eq!(config.thread_count, ThreadCount::Auto);
    assert_eq!(config.time_limit(), Some(Duration::from_millis(2500)));
}

#[test]
fn test_defaults() {
    let config = PlannerConfig::from_toml_str("").unwrap();
    assert_eq!(config, PlannerConfig::default());
    assert_eq!(config.strategy, SearchStrategy::BreadthFirst);
    assert_eq!(config.heuristic, HeuristicType::GoalCount);
    assert_eq!(config.thread_count, ThreadCount::None);
    assert_eq!(config.node_limit(), None);
    assert_eq!(config.time_limit(), None);
}

#[test]
fn test_builder() {
    let config = PlannerConfig::new()
        .with_strategy(SearchStrategy::BestFirst)
        .with_heuristic(HeuristicType::MaxCost)
        .with_node_limit(100)
        .with_depth_limit(7)
        .with_time_limit_millis(0)
        .with_thread_count(ThreadCount::Count(2));

    assert_eq!(config.strategy, SearchStrategy::BestFirst);
    assert_eq!(config.node_limit(), Some(100));
    assert_eq!(config.depth_limit(), Some(7));
    assert_eq!(config.time_limit(), Some(Duration::ZERO));
    assert_eq!(config.thread_count.resolve(), Some(2));
}

#[test]
fn test_zero_threads_rejected() {
    let err = PlannerConfig::from_toml_str("thread_count = { count = 0 }").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_unknown_strategy_rejected() {
    let err = PlannerConfig::from_toml_str(r#"strategy = "depth_first""#).unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn test_thread_count_resolve() {
    assert_eq!(ThreadCount::None.resolve(), None);
    assert!(ThreadCount::Auto.resolve().unwrap() >= 1);
}

#[test]
fn test_missing_file() {
    let err = PlannerConfig::load("/nonexistent/planner.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_budget_aliases() {
    let config = PlannerConfig::from_toml_str(
        r#"
        [termination]
        max_nodes = 500
        max_depth = 12
        "#,
    )
    .unwrap();
    assert_eq!(config.node_limit(), Some(500));
    assert_eq!(config.depth_limit(), Some(12));
}
