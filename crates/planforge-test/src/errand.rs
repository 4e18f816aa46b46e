//! Errand fixture.
//!
//! Four propositions `{at_home, have_keys, at_store, have_milk}` and three
//! actions. From `{at_home}` the only way to `have_milk` is
//! `grab_keys -> drive_to_store -> buy_milk`. Nothing re-adds `at_home`, so
//! `{at_home, have_milk}` is unreachable.

use std::sync::Arc;

use planforge_core::{ActionDef, Domain, DomainBuilder, Problem};

/// Length of the shortest plan for [`problem`].
pub const SHORTEST_PLAN: usize = 3;

pub fn domain() -> Arc<Domain> {
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
        .build()
        .expect("errand domain is valid");
    Arc::new(domain)
}

/// From `{at_home}` to `have_milk`.
pub fn problem() -> Problem {
    domain()
        .problem(["at_home"], ["have_milk"])
        .expect("errand problem is valid")
}

/// From `{at_home}` to `at_home` and `have_milk` together.
pub fn unreachable_problem() -> Problem {
    domain()
        .problem(["at_home"], ["at_home", "have_milk"])
        .expect("errand problem is valid")
}

/// A goal requiring `at_home` to be both true and false.
pub fn contradictory_problem() -> Problem {
    domain()
        .problem(["at_home"], ["at_home", "not at_home"])
        .expect("errand problem is valid")
}
