//! Switchable lights.
//!
//! Three lights `a`, `b`, `c`, each with an `on_*` action that forbids the
//! light being on and an `off_*` action that requires it. Every state can be
//! reached from every other, so the visited set is what keeps search finite.

use std::sync::Arc;

use planforge_core::{ActionDef, Domain, DomainBuilder, Problem};

pub const LIGHTS: [&str; 3] = ["a", "b", "c"];

pub fn domain() -> Arc<Domain> {
    let mut builder = DomainBuilder::new("lights").propositions(LIGHTS);
    for light in LIGHTS {
        builder = builder
            .action(ActionDef::new(format!("on_{light}")).forbids(light).adds(light))
            .action(ActionDef::new(format!("off_{light}")).requires(light).deletes(light));
    }
    Arc::new(builder.build().expect("lights domain is valid"))
}

/// From `{b}` to `a`, `not b`, `c`. Every shortest plan has three steps.
pub fn problem() -> Problem {
    domain()
        .problem(["b"], ["a", "not b", "c"])
        .expect("lights problem is valid")
}
