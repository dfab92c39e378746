// Copyright 2014 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at

//     http://www.apache.org/licenses/LICENSE-2.0

// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::opcode::*;

/// Names are compared case-insensitively, `lower` is the folded form used as identity.
pub fn fold_case(name: &str) -> String {
  name.to_ascii_lowercase()
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Rule
{
  pub name: String,
  pub lower: String,
  pub index: usize,
  pub opcodes: Vec<Opcode>
}

impl Rule
{
  pub fn new(name: &str, index: usize) -> Rule {
    Rule {
      name: String::from(name),
      lower: fold_case(name),
      index: index,
      opcodes: vec![]
    }
  }
}

/// A user-defined terminal. Names starting with `e_` may match the empty string, names starting with `u_` may not.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Udt
{
  pub name: String,
  pub lower: String,
  pub empty: bool,
  pub index: usize
}

impl Udt
{
  pub fn new(name: &str, index: usize) -> Udt {
    let lower = fold_case(name);
    Udt {
      name: String::from(name),
      empty: lower.starts_with("e_"),
      lower: lower,
      index: index
    }
  }
}

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Grammar
{
  pub rules: Vec<Rule>,
  pub udts: Vec<Udt>
}

impl Grammar
{
  pub fn new() -> Grammar {
    Grammar::default()
  }

  pub fn rule_by_name(&self, name: &str) -> Option<&Rule> {
    let lower = fold_case(name);
    self.rules.iter().find(|r| r.lower == lower)
  }

  pub fn udt_by_name(&self, name: &str) -> Option<&Udt> {
    let lower = fold_case(name);
    self.udts.iter().find(|u| u.lower == lower)
  }

  pub fn opcode_count(&self) -> usize {
    self.rules.iter().map(|r| r.opcodes.len()).sum()
  }
}
