//! `n` independent switches `s0 .. s{n-1}`, all off at the start.
//!
//! Every switch can be turned on from the initial state, so the first
//! search layer is `n` nodes wide. Turning all of them on takes `n` steps.

use std::sync::Arc;

use planforge_core::{ActionDef, Domain, DomainBuilder, Problem};

fn switch(i: usize) -> String {
    format!("s{i}")
}

pub fn domain(n: usize) -> Arc<Domain> {
    let mut builder = DomainBuilder::new(format!("switches_{n}")).propositions((0..n).map(switch));
    for i in 0..n {
        builder = builder.action(
            ActionDef::new(format!("on_{i}"))
                .forbids(switch(i))
                .adds(switch(i)),
        );
    }
    Arc::new(builder.build().expect("switches domain is valid"))
}

/// From everything off to everything on.
pub fn problem(n: usize) -> Problem {
    domain(n)
        .problem(Vec::<String>::new(), (0..n).map(switch))
        .expect("switches problem is valid")
}
