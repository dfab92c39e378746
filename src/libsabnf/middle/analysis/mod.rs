// Copyright 2016 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at

//     http://www.apache.org/licenses/LICENSE-2.0

// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Attribute analysis of the reduced grammar: left recursion and rules that can never match a finite phrase.

pub use self::fixpoint::{RuleAttributes, rule_attributes};

use crate::ast::*;
use crate::diagnostic::*;
use crate::front::ast::{FGrammar, Definition};
use crate::front::input::LineMap;
use crate::middle::analysis::left_recursion::*;
use std::collections::HashMap;

mod fixpoint;
mod left_recursion;

/// Source location (line, char) of the definition of each rule, indexed by rule index.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct RuleLineMap
{
  locations: Vec<(usize, usize)>
}

impl RuleLineMap
{
  pub fn new(fgrammar: &FGrammar, lines: &LineMap, grammar: &Grammar) -> RuleLineMap {
    let mut first_definition = HashMap::new();
    for frule in fgrammar.rules.iter().filter(|r| r.kind == Definition::Basic) {
      first_definition.entry(frule.lower()).or_insert(frule.span.lo);
    }
    let locations = grammar.rules.iter()
      .map(|rule| match first_definition.get(&rule.lower) {
        Some(&offset) => (lines.line_number(offset), offset),
        None => (0, 0)
      })
      .collect();
    RuleLineMap { locations }
  }

  pub fn from_locations(locations: Vec<(usize, usize)>) -> RuleLineMap {
    RuleLineMap { locations }
  }

  pub fn location(&self, rule: usize) -> (usize, usize) {
    self.locations.get(rule).cloned().unwrap_or((0, 0))
  }

  pub fn diagnostic(&self, rule: usize, msg: String) -> Diagnostic {
    let (line, char) = self.location(rule);
    Diagnostic::new(line, char, msg)
  }
}

/// The attribute stage of the compiler. An empty result means the grammar is well formed.
pub trait AttributeCheck
{
  fn check(&self, grammar: &Grammar, rules: &RuleLineMap) -> Vec<Diagnostic>;
}

/// Rejects left-recursive rules and rules that cannot match any finite phrase.
#[derive(Clone, Copy, Debug, Default)]
pub struct Attributes;

impl AttributeCheck for Attributes
{
  fn check(&self, grammar: &Grammar, rules: &RuleLineMap) -> Vec<Diagnostic> {
    let attributes = rule_attributes(grammar);
    let empty: Vec<_> = attributes.iter().map(|a| a.empty).collect();
    let calls = left_calls(grammar, &empty);
    let mut errors = vec![];
    for (index, attribute) in attributes.iter().enumerate() {
      if attribute.left {
        if let Some(cycle) = left_cycle(&calls, index) {
          errors.push(rules.diagnostic(index, left_recursion_message(grammar, &cycle)));
        }
      }
      if !attribute.finite {
        errors.push(rules.diagnostic(index, format!(
          "rule `{}` is infinite, it can never match a finite phrase", grammar.rules[index].name)));
      }
    }
    errors
  }
}

/// Runs `checker` and records its errors. Returns `false` if the grammar is rejected.
pub fn analyse<C: AttributeCheck + ?Sized>(checker: &C, grammar: &Grammar, rules: &RuleLineMap,
  diagnostics: &mut Diagnostics) -> bool
{
  let errors = checker.check(grammar, rules);
  debug!("attribute analysis of {} rules: {} error(s).", grammar.rules.len(), errors.len());
  let well_formed = errors.is_empty();
  diagnostics.extend(errors);
  well_formed
}
