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

use crate::ast::*;
use crate::visitor::*;
use crate::middle::analysis::left_recursion::*;

/// Attributes of a rule, computed on the reduced opcodes.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct RuleAttributes
{
  /// The rule can match the empty string.
  pub empty: bool,
  /// The rule can match at least one finite phrase.
  pub finite: bool,
  /// The rule can call itself before consuming any input.
  pub left: bool
}

pub fn rule_attributes(grammar: &Grammar) -> Vec<RuleAttributes> {
  let empty = least_fixpoint(grammar, |grammar, known, rule| {
    Nullable { grammar, known }.visit_rule(rule)
  });
  let finite = least_fixpoint(grammar, |grammar, known, rule| {
    Finite { grammar, known }.visit_rule(rule)
  });
  let calls = left_calls(grammar, &empty);
  (0..grammar.rules.len())
    .map(|rule| RuleAttributes {
      empty: empty[rule],
      finite: finite[rule],
      left: left_cycle(&calls, rule).is_some()
    })
    .collect()
}

/// Starts with every rule at `false` and re-evaluates the rules until no value changes.
fn least_fixpoint<F>(grammar: &Grammar, eval: F) -> Vec<bool> where
 F: Fn(&Grammar, &[bool], usize) -> bool
{
  let mut known = vec![false; grammar.rules.len()];
  let mut reached_fixpoint = false;
  while !reached_fixpoint {
    reached_fixpoint = true;
    for rule in 0..known.len() {
      if !known[rule] && eval(grammar, &known, rule) {
        known[rule] = true;
        reached_fixpoint = false;
      }
    }
  }
  known
}

/// Whether the opcode `this` of `rule` can match the empty string, `known` being the current value of each rule.
pub fn opcode_is_empty(grammar: &Grammar, known: &[bool], rule: usize, this: usize) -> bool {
  Nullable { grammar, known }.visit_opcode(rule, this)
}

struct Nullable<'a>
{
  grammar: &'a Grammar,
  known: &'a [bool]
}

impl<'a> Visitor<'a, bool> for Nullable<'a>
{
  fn grammar(&self) -> &'a Grammar {
    self.grammar
  }

  fn visit_alt(&mut self, rule: usize, _this: usize, children: &'a [usize]) -> bool {
    children.iter().any(|&child| self.visit_opcode(rule, child))
  }

  fn visit_cat(&mut self, rule: usize, _this: usize, children: &'a [usize]) -> bool {
    children.iter().all(|&child| self.visit_opcode(rule, child))
  }

  fn visit_rep(&mut self, rule: usize, this: usize, min: usize, _max: Option<usize>) -> bool {
    min == 0 || self.visit_opcode(rule, this + 1)
  }

  fn visit_predicate(&mut self, _rule: usize, _this: usize) -> bool {
    true
  }

  fn visit_rnm(&mut self, _rule: usize, _this: usize, index: usize) -> bool {
    self.known.get(index).cloned().unwrap_or(false)
  }

  fn visit_udt(&mut self, _rule: usize, _this: usize, _index: usize, empty: bool) -> bool {
    empty
  }

  fn visit_tls(&mut self, _rule: usize, _this: usize, string: &'a [u32]) -> bool {
    string.is_empty()
  }

  fn visit_tbs(&mut self, _rule: usize, _this: usize, string: &'a [u32]) -> bool {
    string.is_empty()
  }
}

struct Finite<'a>
{
  grammar: &'a Grammar,
  known: &'a [bool]
}

impl<'a> Visitor<'a, bool> for Finite<'a>
{
  fn grammar(&self) -> &'a Grammar {
    self.grammar
  }

  fn visit_alt(&mut self, rule: usize, _this: usize, children: &'a [usize]) -> bool {
    children.iter().any(|&child| self.visit_opcode(rule, child))
  }

  fn visit_cat(&mut self, rule: usize, _this: usize, children: &'a [usize]) -> bool {
    children.iter().all(|&child| self.visit_opcode(rule, child))
  }

  fn visit_rep(&mut self, rule: usize, this: usize, min: usize, _max: Option<usize>) -> bool {
    min == 0 || self.visit_opcode(rule, this + 1)
  }

  fn visit_not(&mut self, _rule: usize, _this: usize) -> bool {
    true
  }

  fn visit_rnm(&mut self, _rule: usize, _this: usize, index: usize) -> bool {
    self.known.get(index).cloned().unwrap_or(false)
  }

  fn visit_udt(&mut self, _rule: usize, _this: usize, _index: usize, _empty: bool) -> bool {
    true
  }

  fn visit_terminal(&mut self, _rule: usize, _this: usize) -> bool {
    true
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::ast::Opcode::*;

  fn grammar(rules: Vec<Vec<Opcode>>) -> Grammar {
    let mut grammar = Grammar::new();
    for (index, opcodes) in rules.into_iter().enumerate() {
      let mut rule = Rule::new(&format!("r{}", index), index);
      rule.opcodes = opcodes;
      grammar.rules.push(rule);
    }
    grammar
  }

  #[test]
  fn test_empty_through_references() {
    // r0 = r1 "x", r1 = *"y", r2 = r0 / e_sp
    let grammar = grammar(vec![
      vec![Cat { children: vec![1, 2] }, Rnm { index: 1 }, Tls { string: vec![120] }],
      vec![Rep { min: 0, max: None }, Tls { string: vec![121] }],
      vec![Alt { children: vec![1, 2] }, Rnm { index: 0 }, Opcode::Udt { index: 0, empty: true }]
    ]);
    let empty: Vec<_> = rule_attributes(&grammar).iter().map(|a| a.empty).collect();
    assert_eq!(empty, vec![false, true, true]);
  }

  #[test]
  fn test_infinite_rules() {
    // r0 = "a" r0, r1 = "b" / r1, r2 = !r0 "c", r3 = &r0
    let grammar = grammar(vec![
      vec![Cat { children: vec![1, 2] }, Tls { string: vec![97] }, Rnm { index: 0 }],
      vec![Alt { children: vec![1, 2] }, Tls { string: vec![98] }, Rnm { index: 1 }],
      vec![Cat { children: vec![1, 3] }, Not, Rnm { index: 0 }, Tls { string: vec![99] }],
      vec![And, Rnm { index: 0 }]
    ]);
    let finite: Vec<_> = rule_attributes(&grammar).iter().map(|a| a.finite).collect();
    assert_eq!(finite, vec![false, true, true, false]);
  }

  #[test]
  fn test_left_recursion_through_nullable_prefix() {
    // r0 = *"a" r1, r1 = r0 "b" / "c", r2 = "d" *r2
    let grammar = grammar(vec![
      vec![Cat { children: vec![1, 3] }, Rep { min: 0, max: None }, Tls { string: vec![97] }, Rnm { index: 1 }],
      vec![Alt { children: vec![1, 4] }, Cat { children: vec![2, 3] }, Rnm { index: 0 }, Tls { string: vec![98] }, Tls { string: vec![99] }],
      vec![Cat { children: vec![1, 2] }, Tls { string: vec![100] }, Rep { min: 0, max: None }, Rnm { index: 2 }]
    ]);
    let attributes = rule_attributes(&grammar);
    let left: Vec<_> = attributes.iter().map(|a| a.left).collect();
    assert_eq!(left, vec![true, true, false]);
    assert!(attributes.iter().all(|a| a.finite));
    assert!(!attributes[2].empty);
  }
}
