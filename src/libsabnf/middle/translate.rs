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

//! Translation of the syntax tree into one raw opcode array per rule.
//!
//! Every construct gives exactly one opcode, emitted before the opcodes of its sub-expressions: alternations always give an `Alt` and concatenations a `Cat` even with a single child, and a repetition without prefix gives `Rep(1,1)`. These wrappers are removed later by the reduction.

use crate::front::ast::*;
use crate::front::ast::Expression::*;
use crate::front::input::LineMap;
use crate::diagnostic::*;
use partial::Partial::*;
use std::collections::HashMap;

pub struct Translator<'a, 'b>
{
  fgrammar: &'a FGrammar,
  lines: &'a LineMap,
  diagnostics: &'b mut Diagnostics,
  rule_index: HashMap<String, usize>,
  udt_index: HashMap<String, usize>,
  /// For each rule of the syntax tree, the index of the rule it defines (`None` if the definition is rejected).
  defines: Vec<Option<usize>>,
  grammar: Grammar
}

pub fn translate(fgrammar: &FGrammar, lines: &LineMap, diagnostics: &mut Diagnostics) -> Partial<Grammar> {
  let mark = diagnostics.len();
  let grammar = Translator::new(fgrammar, lines, diagnostics).translate();
  diagnostics.sort_since(mark);
  if diagnostics.len() > mark {
    Fake(grammar)
  } else {
    Value(grammar)
  }
}

impl<'a, 'b> Translator<'a, 'b>
{
  fn new(fgrammar: &'a FGrammar, lines: &'a LineMap, diagnostics: &'b mut Diagnostics) -> Self {
    Translator {
      fgrammar: fgrammar,
      lines: lines,
      diagnostics: diagnostics,
      rule_index: HashMap::new(),
      udt_index: HashMap::new(),
      defines: vec![],
      grammar: Grammar::new()
    }
  }

  fn translate(mut self) -> Grammar {
    self.declare_rules();
    self.declare_udts();
    let fgrammar = self.fgrammar;
    for (i, frule) in fgrammar.rules.iter().enumerate() {
      if frule.kind == Definition::Basic {
        let mut opcodes = vec![];
        self.translate_expr(frule.expr_idx, &mut opcodes);
        if let Some(index) = self.defines[i] {
          self.grammar.rules[index].opcodes = opcodes;
        }
      }
    }
    for frule in fgrammar.rules.iter().filter(|r| r.kind == Definition::Incremental) {
      self.translate_incremental(frule);
    }
    self.grammar
  }

  fn error(&mut self, offset: usize, msg: String) {
    let diagnostic = self.lines.diagnostic(offset, msg);
    self.diagnostics.push(diagnostic);
  }

  fn expr_err(&mut self, expr_idx: usize, msg: String) {
    let lo = self.fgrammar.span_of(expr_idx).lo;
    self.error(lo, msg);
  }

  /// Rule indices are assigned in declaration order before any expression is translated so forward references resolve.
  fn declare_rules(&mut self) {
    let fgrammar = self.fgrammar;
    let mut first_definition: HashMap<String, usize> = HashMap::new();
    for (i, frule) in fgrammar.rules.iter().enumerate() {
      if frule.kind == Definition::Incremental {
        self.defines.push(None);
        continue;
      }
      let lower = frule.lower();
      match first_definition.get(&lower).cloned() {
        Some(first) => {
          let previous = &fgrammar.rules[first];
          let msg = format!("rule `{}` is already defined as `{}` on line {}, rule names are case-insensitive",
            frule.name, previous.name, self.lines.line_number(previous.span.lo));
          self.error(frule.span.lo, msg);
          self.defines.push(None);
        }
        None => {
          let index = self.grammar.rules.len();
          self.grammar.rules.push(Rule::new(&frule.name, index));
          self.rule_index.insert(lower.clone(), index);
          first_definition.insert(lower, i);
          self.defines.push(Some(index));
        }
      }
    }
  }

  /// UDT indices follow the source order, whether a UDT is first named in a basic or an incremental definition.
  fn declare_udts(&mut self) {
    let fgrammar = self.fgrammar;
    let mut names = vec![];
    for frule in &fgrammar.rules {
      udt_names(fgrammar, frule.expr_idx, &mut names);
    }
    for name in names {
      self.udt(name);
    }
  }

  /// `name =/ alternation` appends the alternatives to the root `Alt` of the basic definition.
  fn translate_incremental(&mut self, frule: &FRule) {
    let index = match self.rule_index.get(&frule.lower()).cloned() {
      Some(index) => index,
      None => {
        self.error(frule.span.lo, format!(
          "incremental alternative `{} =/` has no basic definition `{} =`", frule.name, frule.name));
        let mut scratch = vec![];
        self.translate_expr(frule.expr_idx, &mut scratch);
        return;
      }
    };
    let fgrammar = self.fgrammar;
    let alternatives = match fgrammar.expr_by_index(frule.expr_idx) {
      Alternation(children) => children.clone(),
      _ => vec![frule.expr_idx]
    };
    let mut opcodes = std::mem::replace(&mut self.grammar.rules[index].opcodes, vec![]);
    let added: Vec<usize> = alternatives.into_iter()
      .map(|child| self.translate_expr(child, &mut opcodes))
      .collect();
    if let Some(Opcode::Alt { children }) = opcodes.first_mut() {
      children.extend(added);
    }
    self.grammar.rules[index].opcodes = opcodes;
  }

  fn translate_expr(&mut self, expr_idx: usize, ops: &mut Vec<Opcode>) -> usize {
    let this = ops.len();
    let fgrammar = self.fgrammar;
    match fgrammar.expr_by_index(expr_idx) {
      Alternation(children) => {
        ops.push(Opcode::Alt { children: vec![] });
        let children = children.iter().map(|&child| self.translate_expr(child, ops)).collect();
        ops[this] = Opcode::Alt { children };
      }
      Concatenation(children) => {
        ops.push(Opcode::Cat { children: vec![] });
        let children = children.iter().map(|&child| self.translate_expr(child, ops)).collect();
        ops[this] = Opcode::Cat { children };
      }
      &Repetition(repeat, child) => {
        let Repeat { min, max } = repeat.unwrap_or(Repeat::once());
        if let Some(max) = max {
          if min > max {
            self.expr_err(expr_idx, format!(
              "repetition minimum {} is greater than its maximum {}", min, max));
          }
        }
        ops.push(Opcode::Rep { min, max });
        self.translate_expr(child, ops);
      }
      &Optional(child) => {
        ops.push(Opcode::Rep { min: 0, max: Some(1) });
        self.translate_expr(child, ops);
      }
      &Group(child) => {
        return self.translate_expr(child, ops);
      }
      &AndPredicate(child) => {
        ops.push(Opcode::And);
        self.translate_expr(child, ops);
      }
      &NotPredicate(child) => {
        ops.push(Opcode::Not);
        self.translate_expr(child, ops);
      }
      RuleName(name) => {
        let index = match self.rule_index.get(&fold_case(name)).cloned() {
          Some(index) => index,
          None => {
            self.expr_err(expr_idx, format!("rule `{}` is used but not defined", name));
            usize::max_value()
          }
        };
        ops.push(Opcode::Rnm { index });
      }
      UdtName(name) => {
        let udt = self.udt(name);
        ops.push(Opcode::Udt { index: udt.index, empty: udt.empty });
      }
      CaseInsensitive(text) => {
        let string = text.bytes().map(|c| u32::from(c.to_ascii_lowercase())).collect();
        ops.push(Opcode::Tls { string });
      }
      CaseSensitive(text) => {
        let string = text.bytes().map(u32::from).collect();
        ops.push(Opcode::Tbs { string });
      }
      &NumberString(radix, ref values) => {
        let string = values.iter()
          .map(|value| self.char_code(expr_idx, radix, value))
          .collect();
        ops.push(Opcode::Tbs { string });
      }
      &NumberRange(radix, ref lo, ref hi) => {
        let min = self.char_code(expr_idx, radix, lo);
        let max = self.char_code(expr_idx, radix, hi);
        if min > max {
          self.expr_err(expr_idx, format!(
            "range minimum {} is greater than its maximum {}", min, max));
        }
        ops.push(Opcode::Trg { min, max });
      }
    }
    this
  }

  fn udt(&mut self, name: &str) -> Udt {
    let lower = fold_case(name);
    if let Some(&index) = self.udt_index.get(&lower) {
      return self.grammar.udts[index].clone();
    }
    let index = self.grammar.udts.len();
    let udt = Udt::new(name, index);
    self.udt_index.insert(lower, index);
    self.grammar.udts.push(udt.clone());
    udt
  }

  fn char_code(&mut self, expr_idx: usize, radix: Radix, digits: &str) -> u32 {
    match u32::from_str_radix(digits, radix.base()) {
      Ok(code) if code <= std::char::MAX as u32 => code,
      _ => {
        self.expr_err(expr_idx, format!(
          "number value `{}` (base {}) is not a valid character code", digits, radix.base()));
        0
      }
    }
  }
}

/// UDT names of the expression `expr_idx`, from left to right.
fn udt_names<'a>(fgrammar: &'a FGrammar, expr_idx: usize, names: &mut Vec<&'a str>) {
  match fgrammar.expr_by_index(expr_idx) {
    Alternation(children) | Concatenation(children) => {
      for &child in children {
        udt_names(fgrammar, child, names);
      }
    }
    &Repetition(_, child) | &Optional(child) | &Group(child)
  | &AndPredicate(child) | &NotPredicate(child) => udt_names(fgrammar, child, names),
    UdtName(name) => names.push(name),
    _ => ()
  }
}
