//! Two-phase domain construction.
//!
//! A [`DomainBuilder`] collects proposition names, action definitions and
//! constraints by name. Definitions may be schemas over typed variables;
//! [`DomainBuilder::build`] grounds them against the builder's [`Bindings`],
//! freezes the registry, fixes the bit width and translates everything into
//! masks. After that the [`Domain`] is read-only and is shared by reference
//! with the search engine.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use crate::action::{Action, ActionId};
use crate::bits::BitSet;
use crate::constraint::{self, Constraint};
use crate::error::{DomainError, Result};
use crate::goal::Goal;
use crate::literal::{Literal, LiteralSet};
use crate::proposition::{PropositionId, PropositionRegistry};
use crate::schema::{Assignment, Bindings, Parameters};
use crate::state::State;

const ON_NAMES: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const OFF_NAMES: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// An action described by proposition names.
///
/// Literals are written `"name"` or `"not name"`. `must` lists the
/// preconditions and `then` the effects; a negative effect deletes.
///
/// With [`param`](ActionDef::param) the definition becomes a schema: it is
/// grounded once per assignment of bound objects to its variables, and
/// each variable is replaced wherever it appears as a whole word in the
/// name and the literals.
///
/// # Example
///
/// ```
/// use planforge_core::ActionDef;
///
/// let fetch = ActionDef::new("(fetch o c)")
///     .param("o", "object")
///     .param("c", "container")
///     .must("(in o c)")
///     .must("not (closed c)")
///     .then("not (in o c)")
///     .then("(have o)");
/// assert_eq!(fetch.name(), "(fetch o c)");
/// ```
#[derive(Debug, Clone)]
pub struct ActionDef {
    name: String,
    params: Parameters,
    must: Vec<Literal>,
    then: Vec<Literal>,
    cost: u32,
    invalid: Option<DomainError>,
}

impl ActionDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Parameters::default(),
            must: Vec::new(),
            then: Vec::new(),
            cost: 1,
            invalid: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declares `var is kind`.
    pub fn param(mut self, var: impl Into<String>, kind: impl Into<String>) -> Self {
        self.params.push(var.into(), kind.into());
        self
    }

    /// Keeps only groundings where `a` and `b` are different objects.
    pub fn distinct(mut self, a: impl Into<String>, b: impl Into<String>) -> Self {
        self.params.push_distinct(a.into(), b.into());
        self
    }

    /// Adds a precondition literal.
    pub fn must(mut self, literal: &str) -> Self {
        match Literal::parse(literal) {
            Ok(lit) => self.must.push(lit),
            Err(e) => {
                self.invalid.get_or_insert(e);
            }
        }
        self
    }

    /// Adds an effect literal.
    pub fn then(mut self, literal: &str) -> Self {
        match Literal::parse(literal) {
            Ok(lit) => self.then.push(lit),
            Err(e) => {
                self.invalid.get_or_insert(e);
            }
        }
        self
    }

    pub fn requires(mut self, name: impl Into<String>) -> Self {
        self.must.push(Literal::positive(name));
        self
    }

    pub fn forbids(mut self, name: impl Into<String>) -> Self {
        self.must.push(Literal::negative(name));
        self
    }

    pub fn adds(mut self, name: impl Into<String>) -> Self {
        self.then.push(Literal::positive(name));
        self
    }

    pub fn deletes(mut self, name: impl Into<String>) -> Self {
        self.then.push(Literal::negative(name));
        self
    }

    pub fn cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }

    fn ground(&self, assignment: &Assignment) -> ActionDef {
        ActionDef {
            name: assignment.sub(&self.name),
            params: Parameters::default(),
            must: self.must.iter().map(|l| assignment.sub_literal(l)).collect(),
            then: self.then.iter().map(|l| assignment.sub_literal(l)).collect(),
            cost: self.cost,
            invalid: None,
        }
    }
}

/// A constraint described by proposition names: whenever `when` holds,
/// every `then` literal holds too.
///
/// Takes the same `param`/`distinct` clauses as [`ActionDef`].
///
/// # Example
///
/// ```
/// use planforge_core::ConstraintDef;
///
/// let stowed = ConstraintDef::new("(in o c)")
///     .param("o", "object")
///     .param("c", "container")
///     .then("not (have o)");
/// assert_eq!(stowed.when(), "(in o c)");
/// ```
#[derive(Debug, Clone)]
pub struct ConstraintDef {
    text: String,
    when: Option<Literal>,
    params: Parameters,
    then: Vec<Literal>,
    invalid: Option<DomainError>,
}

impl ConstraintDef {
    pub fn new(when: &str) -> Self {
        let text = when.trim().to_string();
        let (when, invalid) = match Literal::parse(when) {
            Ok(lit) => (Some(lit), None),
            Err(e) => (None, Some(e)),
        };
        Self {
            text,
            when,
            params: Parameters::default(),
            then: Vec::new(),
            invalid,
        }
    }

    pub fn when(&self) -> &str {
        &self.text
    }

    pub fn then(mut self, literal: &str) -> Self {
        match Literal::parse(literal) {
            Ok(lit) => self.then.push(lit),
            Err(e) => {
                self.invalid.get_or_insert(e);
            }
        }
        self
    }

    pub fn param(mut self, var: impl Into<String>, kind: impl Into<String>) -> Self {
        self.params.push(var.into(), kind.into());
        self
    }

    pub fn distinct(mut self, a: impl Into<String>, b: impl Into<String>) -> Self {
        self.params.push_distinct(a.into(), b.into());
        self
    }
}

/// Collects a domain definition by name.
///
/// If no proposition is declared explicitly, every name mentioned by an
/// action or constraint is registered in first-seen order, after schemas
/// are grounded. Once any proposition is declared, undeclared names are an
/// error.
///
/// # Example
///
/// ```
/// use planforge_core::{ActionDef, DomainBuilder};
///
/// let domain = DomainBuilder::new("errand")
///     .propositions(["at_home", "have_keys", "at_store", "have_milk"])
///     .action(ActionDef::new("grab_keys").requires("at_home").adds("have_keys"))
///     .action(
///         ActionDef::new("drive_to_store")
///             .requires("at_home")
///             .requires("have_keys")
///             .adds("at_store")
///             .deletes("at_home"),
///     )
///     .action(ActionDef::new("buy_milk").requires("at_store").adds("have_milk"))
///     .build()
///     .unwrap();
///
/// assert_eq!(domain.width(), 4);
/// assert_eq!(domain.actions().len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DomainBuilder {
    name: String,
    propositions: Vec<String>,
    bindings: Bindings,
    actions: Vec<ActionDef>,
    constraints: Vec<ConstraintDef>,
}

impl DomainBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            propositions: Vec::new(),
            bindings: Bindings::new(),
            actions: Vec::new(),
            constraints: Vec::new(),
        }
    }

    pub fn proposition(mut self, name: impl Into<String>) -> Self {
        self.propositions.push(name.into());
        self
    }

    pub fn propositions<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.propositions.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn action(mut self, action: ActionDef) -> Self {
        self.actions.push(action);
        self
    }

    /// Binds `objects` to the type `kind` for grounding schemas.
    pub fn bindings<I, S>(mut self, kind: impl Into<String>, objects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bindings.bind(kind, objects);
        self
    }

    /// Adds every type in `bindings`, e.g. from [`Bindings::parse`].
    pub fn with_bindings(mut self, bindings: &Bindings) -> Self {
        for (kind, objects) in bindings.iter() {
            self.bindings.bind(kind, objects.iter().cloned());
        }
        self
    }

    /// Declares that whenever `when` holds, every literal in `then` holds too.
    pub fn constraint<I, S>(self, when: &str, then: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let def = then
            .into_iter()
            .fold(ConstraintDef::new(when), |def, t| def.then(t.as_ref()));
        self.constraint_def(def)
    }

    pub fn constraint_def(mut self, def: ConstraintDef) -> Self {
        self.constraints.push(def);
        self
    }

    /// Freezes the registry and translates every definition into masks.
    pub fn build(self) -> Result<Domain> {
        let mut registry = PropositionRegistry::new();
        for name in &self.propositions {
            registry.register(name.clone())?;
        }
        let implied = self.propositions.is_empty();

        let mut constraint_defs = Vec::with_capacity(self.constraints.len());
        for def in &self.constraints {
            if let Some(e) = &def.invalid {
                return Err(e.clone());
            }
            let Some(when) = &def.when else { continue };
            for assignment in def.params.expand(&def.text, &self.bindings)? {
                let then: Vec<Literal> =
                    def.then.iter().map(|l| assignment.sub_literal(l)).collect();
                constraint_defs.push((assignment.sub_literal(when), then));
            }
        }

        for def in &self.actions {
            if let Some(e) = &def.invalid {
                return Err(e.clone());
            }
        }
        let mut action_defs = Vec::with_capacity(self.actions.len());
        for def in &self.actions {
            for assignment in def.params.expand(&def.name, &self.bindings)? {
                action_defs.push(def.ground(&assignment));
            }
        }

        if implied {
            let action_names = action_defs
                .iter()
                .flat_map(|a| a.must.iter().chain(&a.then));
            let constraint_names = constraint_defs
                .iter()
                .flat_map(|(when, then)| std::iter::once(when).chain(then));
            for lit in action_names.chain(constraint_names) {
                registry.get_or_register(&lit.name);
            }
        }

        let constraints = constraint_defs
            .iter()
            .map(|(when, then)| Constraint::new(&registry, when, then))
            .collect::<Result<Vec<_>>>()?;

        let mut seen = HashSet::new();
        let mut actions = Vec::with_capacity(action_defs.len());
        for def in &action_defs {
            if !seen.insert(def.name.as_str()) {
                return Err(DomainError::DuplicateAction(def.name.clone()));
            }
            actions.push(build_action(def, &registry, &constraints)?);
        }

        debug!(
            event = "domain_built",
            domain = %self.name,
            propositions = registry.len(),
            schemas = self.actions.len() + self.constraints.len(),
            actions = actions.len(),
            constraints = constraints.len(),
        );

        Ok(Domain {
            name: self.name,
            registry,
            actions,
            constraints,
        })
    }
}

fn build_action(
    def: &ActionDef,
    registry: &PropositionRegistry,
    constraints: &[Constraint],
) -> Result<Action> {
    let (pre_pos, pre_neg) = masks(registry, &def.must)?;
    if pre_pos.intersects(&pre_neg) {
        return Err(DomainError::ContradictoryPrecondition {
            action: def.name.clone(),
            overlapping: names(registry, &pre_pos.intersection(&pre_neg)),
        });
    }
    let (add, del) = masks(registry, &def.then)?;
    if add.intersects(&del) {
        return Err(DomainError::InvalidAction {
            action: def.name.clone(),
            overlapping: names(registry, &add.intersection(&del)),
        });
    }

    let mut preconditions = LiteralSet::from_masks(pre_pos, pre_neg);
    constraint::close(constraints, registry, &mut preconditions)?;
    let mut effects = LiteralSet::from_masks(add, del);
    constraint::close(constraints, registry, &mut effects)?;

    let (pre_pos, pre_neg) = preconditions.into_masks();
    let (add, del) = effects.into_masks();
    Ok(Action::new(def.name.clone(), pre_pos, pre_neg, add, del)?.with_cost(def.cost))
}

fn masks(registry: &PropositionRegistry, literals: &[Literal]) -> Result<(BitSet, BitSet)> {
    let mut pos = BitSet::empty(registry.len());
    let mut neg = BitSet::empty(registry.len());
    for lit in literals {
        let id = registry.resolve(&lit.name)?;
        if lit.positive {
            pos.insert(id.index());
        } else {
            neg.insert(id.index());
        }
    }
    Ok((pos, neg))
}

fn names(registry: &PropositionRegistry, bits: &BitSet) -> Vec<String> {
    bits.iter_ones()
        .map(|i| registry.name(PropositionId::new(i)).to_string())
        .collect()
}

/// A frozen planning domain: propositions, actions and constraints.
#[derive(Debug, Clone)]
pub struct Domain {
    name: String,
    registry: PropositionRegistry,
    actions: Vec<Action>,
    constraints: Vec<Constraint>,
}

impl Domain {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn registry(&self) -> &PropositionRegistry {
        &self.registry
    }

    /// Bit width of every state in this domain.
    pub fn width(&self) -> usize {
        self.registry.len()
    }

    /// Actions in declaration order; [`ActionId`] indexes this slice.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn action(&self, id: ActionId) -> Option<&Action> {
        self.actions.get(id.index())
    }

    pub fn action_by_name(&self, name: &str) -> Option<ActionId> {
        self.actions
            .iter()
            .position(|a| a.name() == name)
            .map(ActionId::new)
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn proposition(&self, name: &str) -> Result<PropositionId> {
        self.registry.resolve(name)
    }

    /// Mask with the named propositions set.
    pub fn mask<I, S>(&self, names: I) -> Result<BitSet>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut mask = BitSet::empty(self.width());
        for name in names {
            mask.insert(self.registry.resolve(name.as_ref())?.index());
        }
        Ok(mask)
    }

    /// Closed-world state in which exactly the named propositions hold.
    pub fn state<I, S>(&self, true_names: I) -> Result<State>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(State::new(self.mask(true_names)?))
    }

    pub fn goal<I, S, J, T>(&self, required_true: I, required_false: J) -> Result<Goal>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        J: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        Ok(Goal::new(self.mask(required_true)?, self.mask(required_false)?))
    }

    /// Builds a goal from literal strings such as `"have_milk"` and
    /// `"not at_home"`.
    pub fn goal_from_literals<I, S>(&self, literals: I) -> Result<Goal>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let literals = literals
            .into_iter()
            .map(|text| Literal::parse(text.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        let (pos, neg) = masks(&self.registry, &literals)?;
        Ok(Goal::new(pos, neg))
    }

    /// Checks `state` against every constraint.
    pub fn check_state(&self, state: &State) -> Result<()> {
        match self.constraints.iter().find(|c| !c.holds_in(state)) {
            Some(c) => Err(DomainError::InitialStateViolatesConstraint {
                constraint: c.label().to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Creates a problem from the names that hold initially and goal
    /// literals.
    pub fn problem<I, S, J, T>(self: &Arc<Self>, initially_true: I, goal: J) -> Result<Problem>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        J: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let initial = self.state(initially_true)?;
        let goal = self.goal_from_literals(goal)?;
        Problem::new(Arc::clone(self), initial, goal)
    }

    /// Names of the propositions that hold in `state`, in index order.
    pub fn true_propositions(&self, state: &State) -> Vec<&str> {
        state
            .true_propositions()
            .filter(|id| id.index() < self.width())
            .map(|id| self.registry.name(id))
            .collect()
    }

    /// One letter per proposition: upper-case if it holds, lower-case if not.
    /// Letters repeat every 26 positions.
    pub fn mask_str(&self, state: &State) -> String {
        (0..self.width())
            .map(|i| {
                let table = if state.bits().contains(i) {
                    ON_NAMES
                } else {
                    OFF_NAMES
                };
                table[i % table.len()] as char
            })
            .collect()
    }
}

/// A domain together with an initial state and a goal.
#[derive(Debug, Clone)]
pub struct Problem {
    domain: Arc<Domain>,
    initial: State,
    goal: Goal,
}

impl Problem {
    /// # Errors
    ///
    /// - [`DomainError::WidthMismatch`] if the state or goal was built for
    ///   another width
    /// - [`DomainError::InitialStateViolatesConstraint`] if the initial state
    ///   breaks a domain constraint
    pub fn new(domain: Arc<Domain>, initial: State, goal: Goal) -> Result<Self> {
        let expected = BitSet::empty(domain.width()).word_count();
        for found in [
            initial.bits().word_count(),
            goal.positive().word_count(),
            goal.negative().word_count(),
        ] {
            if found != expected {
                return Err(DomainError::WidthMismatch { expected, found });
            }
        }
        domain.check_state(&initial)?;
        Ok(Self {
            domain,
            initial,
            goal,
        })
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn shared_domain(&self) -> &Arc<Domain> {
        &self.domain
    }

    pub fn initial(&self) -> &State {
        &self.initial
    }

    pub fn goal(&self) -> &Goal {
        &self.goal
    }

    pub fn actions(&self) -> &[Action] {
        self.domain.actions()
    }
}
