//! Weighted routes from `at_start` to `at_goal`.
//!
//! | route | actions | cost |
//! |---|---|---|
//! | direct | `drive_direct` | 10 |
//! | via far | `ride_to_far`, `far_to_goal` | 8 |
//! | via mid | `walk_to_mid`, `mid_to_goal` | 5 |
//!
//! Breadth-first returns the one-step route, cost-aware search the cheapest.

use std::sync::Arc;

use planforge_core::{ActionDef, Domain, DomainBuilder, Problem};

pub const CHEAPEST_COST: u64 = 5;
pub const CHEAPEST_PLAN: [&str; 2] = ["walk_to_mid", "mid_to_goal"];

fn leg(name: &str, from: &str, to: &str, cost: u32) -> ActionDef {
    ActionDef::new(name).requires(from).adds(to).deletes(from).cost(cost)
}

pub fn domain() -> Arc<Domain> {
    let domain = DomainBuilder::new("route")
        .propositions(["at_start", "at_mid", "at_far", "at_goal"])
        .action(leg("drive_direct", "at_start", "at_goal", 10))
        .action(leg("walk_to_mid", "at_start", "at_mid", 2))
        .action(leg("mid_to_goal", "at_mid", "at_goal", 3))
        .action(leg("ride_to_far", "at_start", "at_far", 1))
        .action(leg("far_to_goal", "at_far", "at_goal", 7))
        .build()
        .expect("route domain is valid");
    Arc::new(domain)
}

pub fn problem() -> Problem {
    domain()
        .problem(["at_start"], ["at_goal"])
        .expect("route problem is valid")
}
