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

//! Syntax tree of a SABNF grammar. Expressions live in one arena and reference each other by index.

pub use crate::ast::*;

#[derive(Clone, PartialEq, Debug, Default)]
pub struct FGrammar
{
  pub rules: Vec<FRule>,
  pub exprs: Vec<Expression>,
  pub exprs_info: Vec<Span>
}

impl FGrammar
{
  pub fn new() -> FGrammar {
    FGrammar::default()
  }

  pub fn alloc_expr(&mut self, lo: usize, hi: usize, expr: Expression) -> usize {
    self.exprs.push(expr);
    self.exprs_info.push(Span::new(lo, hi));
    self.exprs.len() - 1
  }

  pub fn expr_by_index(&self, index: usize) -> &Expression {
    &self.exprs[index]
  }

  pub fn span_of(&self, index: usize) -> Span {
    self.exprs_info[index]
  }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Definition
{
  /// `name = ...`
  Basic,
  /// `name =/ ...`, adds alternatives to a rule defined elsewhere.
  Incremental
}

#[derive(Clone, PartialEq, Debug)]
pub struct FRule
{
  pub name: String,
  pub span: Span,
  pub kind: Definition,
  pub expr_idx: usize
}

impl ItemIdent for FRule
{
  fn ident(&self) -> &str {
    &self.name
  }
}

/// `n*m`, `max` is `None` when unbounded.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Repeat
{
  pub min: usize,
  pub max: Option<usize>
}

impl Repeat
{
  pub fn once() -> Repeat {
    Repeat { min: 1, max: Some(1) }
  }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Radix
{
  Binary,
  Decimal,
  Hexadecimal
}

impl Radix
{
  pub fn base(self) -> u32 {
    match self {
      Radix::Binary => 2,
      Radix::Decimal => 10,
      Radix::Hexadecimal => 16
    }
  }

  pub fn accepts(self, c: u8) -> bool {
    match self {
      Radix::Binary => c == b'0' || c == b'1',
      Radix::Decimal => c.is_ascii_digit(),
      Radix::Hexadecimal => c.is_ascii_hexdigit()
    }
  }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Expression
{
  Alternation(Vec<usize>), // a / b
  Concatenation(Vec<usize>), // a b
  Repetition(Option<Repeat>, usize), // n*m e
  Optional(usize), // [ alternation ]
  Group(usize), // ( alternation )
  AndPredicate(usize), // &e
  NotPredicate(usize), // !e
  RuleName(String),
  UdtName(String),
  CaseInsensitive(String), // "abc" or %i"abc"
  CaseSensitive(String), // 'abc' or %s"abc"
  NumberString(Radix, Vec<String>), // %d65.66.67
  NumberRange(Radix, String, String) // %x30-39
}
