//! Parameterised schemas and the object bindings that ground them.
//!
//! A schema names its variables with `var is type` clauses and may require
//! pairs of variables to differ. Grounding takes the cross product of the
//! objects bound to each type, in clause order with the last variable
//! varying fastest, drops assignments that break an inequality and
//! substitutes every whole-word occurrence of a variable in the schema's
//! text.

use std::collections::HashMap;

use crate::error::{DomainError, Result};
use crate::literal::Literal;

/// Objects available for each type name.
///
/// # Example
///
/// ```
/// use planforge_core::Bindings;
///
/// let bindings = Bindings::parse(
///     "object: wrench jack
///              pump
///      container: boot   # only one",
/// )
/// .unwrap();
///
/// assert_eq!(bindings.objects("object").unwrap(), ["wrench", "jack", "pump"]);
/// assert_eq!(bindings.objects("container").unwrap(), ["boot"]);
/// assert!(bindings.objects("wheel").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    types: HashMap<String, Vec<String>>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `objects` to those already bound to `kind`.
    pub fn bind<I, S>(&mut self, kind: impl Into<String>, objects: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types
            .entry(kind.into())
            .or_default()
            .extend(objects.into_iter().map(Into::into));
    }

    /// Parses `type: obj obj ...` lines.
    ///
    /// Lines without a `type:` prefix continue the previous type. `#`
    /// starts a comment, and trailing `,` or `;` on an object is ignored.
    pub fn parse(text: &str) -> Result<Self> {
        let mut bindings = Self::new();
        let mut current: Option<String> = None;

        for raw in text.lines() {
            let line = raw.split('#').next().unwrap_or_default().trim();
            if line.is_empty() {
                continue;
            }
            let rest = match line.split_once(':') {
                Some((kind, rest)) if is_word(kind) => {
                    current = Some(kind.to_string());
                    rest
                }
                _ => line,
            };
            let Some(kind) = &current else {
                return Err(DomainError::InvalidBinding(line.to_string()));
            };
            let objects = rest
                .split_whitespace()
                .map(|o| o.trim_matches(|c| c == ',' || c == ';'))
                .filter(|o| !o.is_empty());
            bindings.bind(kind.clone(), objects);
        }
        Ok(bindings)
    }

    pub fn objects(&self, kind: &str) -> Option<&[String]> {
        self.types.get(kind).map(Vec::as_slice)
    }

    /// Types and their objects, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> + '_ {
        self.types.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// The `where` part of a schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Parameters {
    vars: Vec<(String, String)>,
    distinct: Vec<(String, String)>,
}

impl Parameters {
    pub fn push(&mut self, var: String, kind: String) {
        self.vars.push((var, kind));
    }

    pub fn push_distinct(&mut self, a: String, b: String) {
        self.distinct.push((a, b));
    }

    /// Every assignment that satisfies the inequalities.
    ///
    /// A schema without variables has exactly one, empty assignment.
    pub fn expand(&self, schema: &str, bindings: &Bindings) -> Result<Vec<Assignment>> {
        let mut domains = Vec::with_capacity(self.vars.len());
        for (i, (var, kind)) in self.vars.iter().enumerate() {
            if self.vars[..i].iter().any(|(v, _)| v == var) {
                return Err(DomainError::DuplicateVariable {
                    schema: schema.to_string(),
                    var: var.clone(),
                });
            }
            let objects = bindings
                .objects(kind)
                .ok_or_else(|| DomainError::UnknownType {
                    schema: schema.to_string(),
                    kind: kind.clone(),
                })?;
            domains.push(objects);
        }

        let position = |name: &str| {
            self.vars
                .iter()
                .position(|(v, _)| v == name)
                .ok_or_else(|| DomainError::UnknownVariable {
                    schema: schema.to_string(),
                    var: name.to_string(),
                })
        };
        let distinct = self
            .distinct
            .iter()
            .map(|(a, b)| Ok((position(a)?, position(b)?)))
            .collect::<Result<Vec<_>>>()?;

        let mut assignments = Vec::new();
        if domains.iter().any(|objects| objects.is_empty()) {
            return Ok(assignments);
        }

        // Odometer over the object lists, last variable fastest.
        let mut digits = vec![0usize; domains.len()];
        loop {
            if distinct
                .iter()
                .all(|&(a, b)| domains[a][digits[a]] != domains[b][digits[b]])
            {
                assignments.push(Assignment(
                    self.vars
                        .iter()
                        .zip(&digits)
                        .zip(&domains)
                        .map(|(((var, _), &d), objects)| (var.clone(), objects[d].clone()))
                        .collect(),
                ));
            }

            let mut slot = digits.len();
            loop {
                if slot == 0 {
                    return Ok(assignments);
                }
                slot -= 1;
                digits[slot] += 1;
                if digits[slot] < domains[slot].len() {
                    break;
                }
                digits[slot] = 0;
            }
        }
    }
}

/// Objects chosen for each variable of one grounded schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Assignment(Vec<(String, String)>);

impl Assignment {
    /// Replaces whole-word variable names in `template` in a single pass.
    pub fn sub(&self, template: &str) -> String {
        if self.0.is_empty() {
            return template.to_string();
        }
        let mut out = String::with_capacity(template.len());
        let mut word_start: Option<usize> = None;
        for (i, c) in template.char_indices() {
            if is_word_char(c) {
                word_start.get_or_insert(i);
            } else {
                if let Some(start) = word_start.take() {
                    out.push_str(self.lookup(&template[start..i]));
                }
                out.push(c);
            }
        }
        if let Some(start) = word_start {
            out.push_str(self.lookup(&template[start..]));
        }
        out
    }

    pub fn sub_literal(&self, literal: &Literal) -> Literal {
        Literal {
            name: self.sub(&literal.name),
            positive: literal.positive,
        }
    }

    fn lookup<'a>(&'a self, word: &'a str) -> &'a str {
        self.0
            .iter()
            .find(|(var, _)| var == word)
            .map_or(word, |(_, object)| object.as_str())
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_word(text: &str) -> bool {
    !text.is_empty() && text.chars().all(is_word_char)
}
