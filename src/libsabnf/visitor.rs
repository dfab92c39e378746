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

#![macro_use]

//! Traversal of the opcode graph of one rule. `Rep`, `And` and `Not` visit the opcode following them, `Alt` and `Cat` their explicit children.

use std::default::Default;
use crate::ast::*;

pub trait Visitor<'a, R: Default>
{
  fn grammar(&self) -> &'a Grammar;

  fn visit_rule(&mut self, rule: usize) -> R {
    if self.grammar().rules[rule].opcodes.is_empty() {
      R::default()
    } else {
      self.visit_opcode(rule, 0)
    }
  }

  fn visit_opcode(&mut self, rule: usize, this: usize) -> R {
    walk_opcode(self, rule, this)
  }

  fn visit_alt(&mut self, rule: usize, this: usize, children: &'a [usize]) -> R;
  fn visit_cat(&mut self, rule: usize, this: usize, children: &'a [usize]) -> R;

  fn visit_rep(&mut self, rule: usize, this: usize, _min: usize, _max: Option<usize>) -> R {
    self.visit_opcode(rule, this + 1)
  }

  fn visit_predicate(&mut self, rule: usize, this: usize) -> R {
    self.visit_opcode(rule, this + 1)
  }

  fn visit_and(&mut self, rule: usize, this: usize) -> R {
    self.visit_predicate(rule, this)
  }

  fn visit_not(&mut self, rule: usize, this: usize) -> R {
    self.visit_predicate(rule, this)
  }

  fn visit_rnm(&mut self, _rule: usize, _this: usize, _index: usize) -> R { R::default() }
  fn visit_udt(&mut self, _rule: usize, _this: usize, _index: usize, _empty: bool) -> R { R::default() }
  fn visit_terminal(&mut self, _rule: usize, _this: usize) -> R { R::default() }

  fn visit_tls(&mut self, rule: usize, this: usize, _string: &'a [u32]) -> R {
    self.visit_terminal(rule, this)
  }

  fn visit_tbs(&mut self, rule: usize, this: usize, _string: &'a [u32]) -> R {
    self.visit_terminal(rule, this)
  }

  fn visit_trg(&mut self, rule: usize, this: usize, _min: u32, _max: u32) -> R {
    self.visit_terminal(rule, this)
  }
}

/// We need this macro for factorizing the code since we can not specialize a trait on specific type parameter (we would need to specialize on `()` here).
macro_rules! unit_visitor_impl {
  (alt) => (
    fn visit_alt(&mut self, rule: usize, _this: usize, children: &'a [usize]) -> () {
      walk_opcodes(self, rule, children);
    }
  );
  (cat) => (
    fn visit_cat(&mut self, rule: usize, _this: usize, children: &'a [usize]) -> () {
      walk_opcodes(self, rule, children);
    }
  );
}

pub fn walk_opcode<'a, R: Default, V: ?Sized>(visitor: &mut V, rule: usize, this: usize) -> R where
  V: Visitor<'a, R>
{
  let grammar = visitor.grammar();
  match &grammar.rules[rule].opcodes[this] {
    Opcode::Alt { children } => visitor.visit_alt(rule, this, children),
    Opcode::Cat { children } => visitor.visit_cat(rule, this, children),
    &Opcode::Rep { min, max } => visitor.visit_rep(rule, this, min, max),
    Opcode::And => visitor.visit_and(rule, this),
    Opcode::Not => visitor.visit_not(rule, this),
    &Opcode::Rnm { index } => visitor.visit_rnm(rule, this, index),
    &Opcode::Udt { index, empty } => visitor.visit_udt(rule, this, index, empty),
    Opcode::Tls { string } => visitor.visit_tls(rule, this, string),
    Opcode::Tbs { string } => visitor.visit_tbs(rule, this, string),
    &Opcode::Trg { min, max } => visitor.visit_trg(rule, this, min, max)
  }
}

pub fn walk_opcodes<'a, R: Default, V: ?Sized>(visitor: &mut V, rule: usize, children: &'a [usize]) where
  V: Visitor<'a, R>
{
  for &child in children {
    visitor.visit_opcode(rule, child);
  }
}
