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

use std::marker::PhantomData;

/// Implemented by the `RuleId` and `UdtId` enumerations of a generated module. `index` is the position in the rule (or UDT) table and `lower` the case-folded name.
pub trait Identifier: Copy
{
  fn index(self) -> usize;
  fn lower(self) -> &'static str;
}

/// Semantic callbacks attached to rules and UDTs. Entries are resolved by identifier when the table is built, never by name while parsing.
pub struct Callbacks<R, U, H>
{
  rules: Vec<Option<H>>,
  udts: Vec<Option<H>>,
  phantom: PhantomData<fn() -> (R, U)>
}

impl<R, U, H> Callbacks<R, U, H> where
 R: Identifier,
 U: Identifier
{
  /// One disabled entry per rule and per UDT.
  pub fn disabled(rule_count: usize, udt_count: usize) -> Self {
    Callbacks {
      rules: (0..rule_count).map(|_| None).collect(),
      udts: (0..udt_count).map(|_| None).collect(),
      phantom: PhantomData
    }
  }

  /// Attaches `handler` to `rule` and returns the handler previously attached. An identifier outside the table is ignored.
  pub fn enable_rule(&mut self, rule: R, handler: H) -> Option<H> {
    self.rules.get_mut(rule.index()).and_then(|h| h.replace(handler))
  }

  pub fn disable_rule(&mut self, rule: R) -> Option<H> {
    self.rules.get_mut(rule.index()).and_then(Option::take)
  }

  pub fn rule(&self, rule: R) -> Option<&H> {
    self.rule_at(rule.index())
  }

  pub fn enable_udt(&mut self, udt: U, handler: H) -> Option<H> {
    self.udts.get_mut(udt.index()).and_then(|h| h.replace(handler))
  }

  pub fn disable_udt(&mut self, udt: U) -> Option<H> {
    self.udts.get_mut(udt.index()).and_then(Option::take)
  }

  pub fn udt(&self, udt: U) -> Option<&H> {
    self.udt_at(udt.index())
  }

  /// Lookup by the index stored in an `Rnm` opcode.
  pub fn rule_at(&self, index: usize) -> Option<&H> {
    self.rules.get(index).and_then(|h| h.as_ref())
  }

  /// Lookup by the index stored in an `Udt` opcode.
  pub fn udt_at(&self, index: usize) -> Option<&H> {
    self.udts.get(index).and_then(|h| h.as_ref())
  }

  pub fn rule_count(&self) -> usize {
    self.rules.len()
  }

  pub fn udt_count(&self) -> usize {
    self.udts.len()
  }
}
