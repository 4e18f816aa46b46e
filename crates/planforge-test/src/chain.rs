//! A line of positions `p0 .. pn`.
//!
//! `forward_i` moves from `p{i}` to `p{i+1}` and `back_i` moves the other
//! way. The shortest plan from `p0` to `pn` is `n` forward steps.

use std::sync::Arc;

use planforge_core::{ActionDef, Domain, DomainBuilder, Problem};

fn position(i: usize) -> String {
    format!("p{i}")
}

pub fn domain(n: usize) -> Arc<Domain> {
    let mut builder = DomainBuilder::new(format!("chain_{n}")).propositions((0..=n).map(position));
    for i in 0..n {
        builder = builder
            .action(
                ActionDef::new(format!("forward_{i}"))
                    .requires(position(i))
                    .adds(position(i + 1))
                    .deletes(position(i)),
            )
            .action(
                ActionDef::new(format!("back_{i}"))
                    .requires(position(i + 1))
                    .adds(position(i))
                    .deletes(position(i + 1)),
            );
    }
    Arc::new(builder.build().expect("chain domain is valid"))
}

/// From `p0` to `pn`.
pub fn problem(n: usize) -> Problem {
    domain(n)
        .problem([position(0)], [position(n)])
        .expect("chain problem is valid")
}
