//! Loosening a wheel nut with tools kept in the boot.
//!
//! Every action and constraint is a schema grounded over [`bindings`]:
//! containers are opened and closed, objects fetched and put away, and nuts
//! loosened or tightened on a hub with the wrench in hand. Uses literal
//! syntax (`"not (closed c)"`), negative preconditions and constraint
//! closure.

use std::sync::Arc;

use planforge_core::{ActionDef, Bindings, ConstraintDef, Domain, DomainBuilder, Problem};

/// Number of grounded actions.
pub const ACTIONS: usize = 8;

/// Number of grounded constraints.
pub const CONSTRAINTS: usize = 6;

pub const INITIAL: [&str; 5] = [
    "(closed boot)",
    "(in wrench boot)",
    "(in jack boot)",
    "(tight nuts the-hub)",
    "(on-ground the-hub)",
];

pub fn bindings() -> Bindings {
    let mut bindings = Bindings::new();
    bindings.bind("container", ["boot"]);
    bindings.bind("object", ["wrench", "jack"]);
    bindings.bind("nut", ["nuts"]);
    bindings.bind("hub", ["the-hub"]);
    bindings
}

fn stored(when: &str, then: &str) -> ConstraintDef {
    ConstraintDef::new(when)
        .param("o", "object")
        .param("c", "container")
        .then(then)
}

fn fastened(when: &str, then: &str) -> ConstraintDef {
    ConstraintDef::new(when)
        .param("n", "nut")
        .param("h", "hub")
        .then(then)
}

pub fn domain() -> Arc<Domain> {
    let domain = DomainBuilder::new("tyre")
        .with_bindings(&bindings())
        .constraint_def(stored("(have o)", "not (in o c)"))
        .constraint_def(stored("(in o c)", "not (have o)"))
        .constraint_def(fastened("(loose n h)", "not (tight n h)"))
        .constraint_def(fastened("(tight n h)", "not (loose n h)"))
        .action(
            ActionDef::new("(open c)")
                .param("c", "container")
                .must("(closed c)")
                .then("not (closed c)"),
        )
        .action(
            ActionDef::new("(close c)")
                .param("c", "container")
                .must("not (closed c)")
                .then("(closed c)"),
        )
        .action(
            ActionDef::new("(fetch o c)")
                .param("o", "object")
                .param("c", "container")
                .must("(in o c)")
                .must("not (closed c)")
                .then("not (in o c)")
                .then("(have o)"),
        )
        .action(
            ActionDef::new("(put-away o c)")
                .param("o", "object")
                .param("c", "container")
                .must("(have o)")
                .must("not (closed c)")
                .then("(in o c)")
                .then("not (have o)"),
        )
        .action(
            ActionDef::new("(loosen n h)")
                .param("n", "nut")
                .param("h", "hub")
                .must("(have wrench)")
                .must("(tight n h)")
                .must("(on-ground h)")
                .then("(loose n h)"),
        )
        .action(
            ActionDef::new("(tighten n h)")
                .param("n", "nut")
                .param("h", "hub")
                .must("(have wrench)")
                .must("(loose n h)")
                .must("(on-ground h)")
                .then("(tight n h)"),
        )
        .build()
        .expect("tyre domain is valid");
    Arc::new(domain)
}

/// Loosen the nut and leave the boot closed: four steps.
pub fn problem() -> Problem {
    domain()
        .problem(INITIAL, ["(loose nuts the-hub)", "(closed boot)"])
        .expect("tyre problem is valid")
}

/// As [`problem`], with the wrench put back: five steps.
pub fn tidy_problem() -> Problem {
    domain()
        .problem(
            INITIAL,
            ["(loose nuts the-hub)", "(in wrench boot)", "(closed boot)"],
        )
        .expect("tyre problem is valid")
}
