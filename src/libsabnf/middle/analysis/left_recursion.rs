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

//! A rule is left recursive when it can call itself before consuming any input. The rules called in "left position" are the `Rnm` reachable through `Alt` children, `Cat` children up to the first one that cannot match the empty string, and the children of `Rep`, `And` and `Not`.

use crate::ast::*;
use crate::visitor::*;
use crate::middle::analysis::fixpoint::opcode_is_empty;
use std::collections::HashSet;

/// For each rule, the rules it calls in left position. `empty` tells which rules can match the empty string.
pub fn left_calls(grammar: &Grammar, empty: &[bool]) -> Vec<Vec<usize>> {
  (0..grammar.rules.len())
    .map(|rule| {
      let mut visitor = LeftCalls { grammar, empty, calls: vec![] };
      visitor.visit_rule(rule);
      visitor.calls
    })
    .collect()
}

/// A path `rule -> ... -> callee` such that `callee` calls `rule` in left position.
pub fn left_cycle(calls: &[Vec<usize>], rule: usize) -> Option<Vec<usize>> {
  let mut search = CycleSearch {
    calls: calls,
    target: rule,
    recursion_path: vec![],
    visited: HashSet::new()
  };
  if search.search(rule) {
    Some(search.recursion_path)
  } else {
    None
  }
}

struct LeftCalls<'a>
{
  grammar: &'a Grammar,
  empty: &'a [bool],
  calls: Vec<usize>
}

impl<'a> Visitor<'a, ()> for LeftCalls<'a>
{
  unit_visitor_impl!(alt);

  fn grammar(&self) -> &'a Grammar {
    self.grammar
  }

  fn visit_cat(&mut self, rule: usize, _this: usize, children: &'a [usize]) {
    for &child in children {
      self.visit_opcode(rule, child);
      if !opcode_is_empty(self.grammar, self.empty, rule, child) {
        break;
      }
    }
  }

  fn visit_rnm(&mut self, _rule: usize, _this: usize, index: usize) {
    if !self.calls.contains(&index) {
      self.calls.push(index);
    }
  }
}

struct CycleSearch<'a>
{
  calls: &'a [Vec<usize>],
  target: usize,
  recursion_path: Vec<usize>,
  visited: HashSet<usize>
}

impl<'a> CycleSearch<'a>
{
  fn search(&mut self, rule: usize) -> bool {
    let calls = self.calls;
    self.recursion_path.push(rule);
    for &callee in &calls[rule] {
      if callee == self.target {
        return true;
      }
      if callee < calls.len() && self.visited.insert(callee) && self.search(callee) {
        return true;
      }
    }
    self.recursion_path.pop();
    false
  }
}

pub fn left_recursion_message(grammar: &Grammar, cycle: &[usize]) -> String {
  let path: Vec<String> = cycle.iter()
    .map(|&rule| grammar.rules[rule].name.clone())
    .collect();
  format!("rule `{}` is left recursive, detected cycle: {}",
    path[0], display_path_cycle(&path))
}
