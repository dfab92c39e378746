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
use std::fmt::{Formatter, Display, Error};

/// Statistics of a compiled grammar, written at the top of the generated module.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Summary
{
  pub rules: usize,
  pub udts: usize,
  pub opcodes: usize,
  /// Number of opcodes of each kind, in the order of `OpcodeKind::ALL`.
  pub kinds: [usize; 10],
  /// Smallest and largest character codes of the `Tls`, `Tbs` and `Trg` opcodes.
  pub char_range: Option<(u32, u32)>,
  /// Sorted case-folded names of the rules then of the UDTs.
  pub rule_names: Vec<String>,
  pub udt_names: Vec<String>
}

impl Summary
{
  pub fn new(grammar: &Grammar) -> Summary {
    let mut summary = Summary {
      rules: grammar.rules.len(),
      udts: grammar.udts.len(),
      opcodes: grammar.opcode_count(),
      .. Summary::default()
    };
    for op in grammar.rules.iter().flat_map(|rule| rule.opcodes.iter()) {
      summary.kinds[op.kind().ordinal()] += 1;
      if let Some((min, max)) = op.char_range() {
        summary.char_range = Some(match summary.char_range {
          Some((lo, hi)) => (lo.min(min), hi.max(max)),
          None => (min, max)
        });
      }
    }
    summary.rule_names = grammar.rules.iter().map(|r| r.lower.clone()).collect();
    summary.rule_names.sort();
    summary.udt_names = grammar.udts.iter().map(|u| u.lower.clone()).collect();
    summary.udt_names.sort();
    summary
  }

  pub fn count(&self, kind: OpcodeKind) -> usize {
    self.kinds[kind.ordinal()]
  }

  /// `[min - max]`, `[ none defined ]` without character opcodes, followed by `+ user defined` when UDT opcodes are present.
  pub fn characters(&self) -> String {
    let mut characters = match self.char_range {
      Some((min, max)) => format!("[{} - {}]", min, max),
      None => format!("[ none defined ]")
    };
    if self.count(OpcodeKind::Udt) > 0 {
      characters.push_str(" + user defined");
    }
    characters
  }

  pub fn lines(&self) -> Vec<String> {
    let mut lines = vec![
      format!("{:>10} = {}", "rules", self.rules),
      format!("{:>10} = {}", "udts", self.udts),
      format!("{:>10} = {}", "opcodes", self.opcodes)
    ];
    for &kind in OpcodeKind::ALL.iter() {
      lines.push(format!("{:>10} = {}", kind.name(), self.count(kind)));
    }
    lines.push(format!("characters = {}", self.characters()));
    lines
  }
}

impl Display for Summary
{
  fn fmt(&self, formatter: &mut Formatter) -> Result<(), Error> {
    formatter.write_str(&self.lines().join("\n"))
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::ast::Opcode::*;

  #[test]
  fn test_counts_and_characters() {
    let mut grammar = Grammar::new();
    let mut expr = Rule::new("Expr", 0);
    expr.opcodes = vec![
      Alt { children: vec![1, 2] },
      Tls { string: vec![97, 122] },
      Trg { min: 48, max: 57 }
    ];
    let mut blank = Rule::new("blank", 1);
    blank.opcodes = vec![Opcode::Udt { index: 0, empty: true }];
    grammar.rules = vec![expr, blank];
    grammar.udts.push(Udt::new("e_space", 0));
    let summary = Summary::new(&grammar);
    assert_eq!(summary.opcodes, 4);
    assert_eq!(summary.count(OpcodeKind::Alt), 1);
    assert_eq!(summary.count(OpcodeKind::Trg), 1);
    assert_eq!(summary.count(OpcodeKind::Cat), 0);
    assert_eq!(summary.characters(), "[48 - 122] + user defined");
    assert_eq!(summary.rule_names, vec!["blank", "expr"]);
    let lines = summary.lines();
    assert_eq!(lines[0], "     rules = 2");
    assert_eq!(lines[3], "       ALT = 1");
    assert_eq!(lines[13], "characters = [48 - 122] + user defined");
  }

  #[test]
  fn test_no_character_opcodes() {
    let mut grammar = Grammar::new();
    let mut rule = Rule::new("a", 0);
    rule.opcodes = vec![Rnm { index: 0 }];
    grammar.rules.push(rule);
    assert_eq!(Summary::new(&grammar).characters(), "[ none defined ]");
  }
}
