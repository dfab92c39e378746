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

//! Recursive descent parser of SABNF. A syntax error abandons the current rule and parsing resumes at the next line starting in the first column.

use crate::front::ast::*;
use crate::front::ast::Expression::*;
use crate::front::input::*;
use crate::diagnostic::*;
use partial::Partial::*;

type PResult<T> = Result<T, Diagnostic>;

pub struct Parser<'a>
{
  source: &'a str,
  lines: &'a LineMap,
  pos: usize,
  strict: bool,
  grammar: FGrammar
}

fn is_wsp(c: u8) -> bool {
  c == b' ' || c == b'\t'
}

fn starts_repetition(c: u8) -> bool {
  c.is_ascii_alphanumeric() || b"*&!([\"'%<".contains(&c)
}

impl<'a> Parser<'a>
{
  pub fn new(input: &'a Input, strict: bool) -> Parser<'a> {
    Parser {
      source: input.source(),
      lines: input.lines(),
      pos: 0,
      strict: strict,
      grammar: FGrammar::new()
    }
  }

  fn alloc_expr(&mut self, lo: usize, hi: usize, expr: Expression) -> usize {
    self.grammar.alloc_expr(lo, hi, expr)
  }

  pub fn parse_grammar(mut self, diagnostics: &mut Diagnostics) -> Partial<FGrammar> {
    let mark = diagnostics.len();
    loop {
      let result = match self.next_rule() {
        Ok(true) => self.parse_rule(),
        Ok(false) => break,
        Err(err) => Err(err)
      };
      if let Err(err) = result {
        diagnostics.push(err);
        self.recover();
      }
    }
    if diagnostics.len() > mark {
      Nothing
    }
    else if self.grammar.rules.is_empty() {
      diagnostics.global_err(format!("At least one rule must be declared."));
      Nothing
    }
    else {
      Value(self.grammar)
    }
  }

  fn peek(&self) -> Option<u8> {
    self.source.as_bytes().get(self.pos).cloned()
  }

  fn eof(&self) -> bool {
    self.pos >= self.source.len()
  }

  fn eat(&mut self, c: u8) -> bool {
    if self.peek() == Some(c) {
      self.pos += 1;
      true
    } else {
      false
    }
  }

  fn expect(&mut self, c: u8) -> PResult<()> {
    if self.eat(c) { Ok(()) }
    else { Err(self.unexpected(&format!("`{}`", c as char))) }
  }

  fn at_newline(&self) -> bool {
    match self.peek() {
      Some(b'\r') | Some(b'\n') => true,
      _ => false
    }
  }

  fn eat_newline(&mut self) -> bool {
    if self.source[self.pos..].starts_with("\r\n") {
      self.pos += 2;
      true
    } else if self.at_newline() {
      self.pos += 1;
      true
    } else {
      false
    }
  }

  fn skip_wsp(&mut self) {
    while self.peek().map_or(false, is_wsp) {
      self.pos += 1;
    }
  }

  fn skip_comment(&mut self) {
    if self.peek() == Some(b';') {
      while !self.eof() && !self.at_newline() {
        self.pos += 1;
      }
    }
  }

  /// Whitespace, comments and line ends followed by whitespace (continuation lines).
  fn skip_c_wsp(&mut self) {
    loop {
      self.skip_wsp();
      let save = self.pos;
      self.skip_comment();
      if self.eat_newline() && self.peek().map_or(false, is_wsp) {
        continue;
      }
      self.pos = save;
      break;
    }
  }

  fn error_at(&self, offset: usize, msg: String) -> Diagnostic {
    self.lines.diagnostic(offset, msg)
  }

  fn unexpected(&self, expected: &str) -> Diagnostic {
    let found = match self.peek() {
      None => format!("end of input"),
      Some(c) => format!("`{}`", (c as char).escape_default())
    };
    self.error_at(self.pos, format!("expected {}, found {}", expected, found))
  }

  /// Skips blank and comment lines. Returns `false` at the end of the source.
  fn next_rule(&mut self) -> PResult<bool> {
    loop {
      let line_start = self.pos;
      self.skip_wsp();
      self.skip_comment();
      if self.eof() {
        return Ok(false);
      }
      if self.eat_newline() {
        continue;
      }
      if self.pos != line_start {
        return Err(self.error_at(self.pos,
          format!("a rule definition must begin in the first column")));
      }
      return Ok(true);
    }
  }

  fn recover(&mut self) {
    loop {
      while !self.eof() && !self.at_newline() {
        self.pos += 1;
      }
      if !self.eat_newline() || !self.peek().map_or(false, is_wsp) {
        return;
      }
    }
  }

  fn parse_rule(&mut self) -> PResult<()> {
    let lo = self.pos;
    let name = self.parse_name()?;
    let span = Span::new(lo, self.pos);
    if is_udt_name(&name) {
      return Err(self.error_at(lo, format!(
        "rule name `{}` is reserved for user-defined terminals, rule names must not begin with `u_` or `e_`", name)));
    }
    self.skip_c_wsp();
    if !self.eat(b'=') {
      return Err(self.unexpected("`=` or `=/` after the rule name"));
    }
    let kind = if self.eat(b'/') { Definition::Incremental } else { Definition::Basic };
    self.skip_c_wsp();
    let expr_idx = self.parse_alternation()?;
    self.skip_c_wsp();
    self.skip_comment();
    if !self.eof() && !self.eat_newline() {
      return Err(self.unexpected("a line end"));
    }
    self.grammar.rules.push(FRule { name, span, kind, expr_idx });
    Ok(())
  }

  fn parse_name(&mut self) -> PResult<String> {
    let lo = self.pos;
    match self.peek() {
      Some(c) if c.is_ascii_alphabetic() => (),
      _ => return Err(self.unexpected("a rule name"))
    }
    while let Some(c) = self.peek() {
      if c.is_ascii_alphanumeric() || c == b'-' || c == b'_' {
        self.pos += 1;
      } else {
        break;
      }
    }
    Ok(String::from(&self.source[lo..self.pos]))
  }

  fn parse_alternation(&mut self) -> PResult<usize> {
    let lo = self.pos;
    let mut children = vec![self.parse_concatenation()?];
    loop {
      let save = self.pos;
      self.skip_c_wsp();
      if self.eat(b'/') {
        self.skip_c_wsp();
        children.push(self.parse_concatenation()?);
      } else {
        self.pos = save;
        break;
      }
    }
    let hi = self.pos;
    Ok(self.alloc_expr(lo, hi, Alternation(children)))
  }

  fn parse_concatenation(&mut self) -> PResult<usize> {
    let lo = self.pos;
    let mut children = vec![self.parse_repetition()?];
    loop {
      let save = self.pos;
      self.skip_c_wsp();
      if self.pos > save && self.peek().map_or(false, starts_repetition) {
        children.push(self.parse_repetition()?);
      } else {
        self.pos = save;
        break;
      }
    }
    let hi = self.pos;
    Ok(self.alloc_expr(lo, hi, Concatenation(children)))
  }

  /// `[&|!] [repeat] element`, the predicate applies to the whole repetition.
  fn parse_repetition(&mut self) -> PResult<usize> {
    let lo = self.pos;
    let predicate = match self.peek() {
      Some(c) if c == b'&' || c == b'!' => {
        if self.strict {
          return Err(self.error_at(lo, format!("syntactic predicates (`&`, `!`) are not allowed in strict ABNF")));
        }
        self.pos += 1;
        Some(c)
      }
      _ => None
    };
    let inner_lo = self.pos;
    let repeat = self.parse_repeat()?;
    let element = self.parse_element()?;
    let hi = self.pos;
    let repetition = self.alloc_expr(inner_lo, hi, Repetition(repeat, element));
    Ok(match predicate {
      Some(b'&') => self.alloc_expr(lo, hi, AndPredicate(repetition)),
      Some(_) => self.alloc_expr(lo, hi, NotPredicate(repetition)),
      None => repetition
    })
  }

  fn parse_repeat(&mut self) -> PResult<Option<Repeat>> {
    let min = self.parse_count()?;
    if self.eat(b'*') {
      let max = self.parse_count()?;
      Ok(Some(Repeat { min: min.unwrap_or(0), max }))
    }
    else {
      Ok(min.map(|n| Repeat { min: n, max: Some(n) }))
    }
  }

  fn parse_count(&mut self) -> PResult<Option<usize>> {
    let lo = self.pos;
    while self.peek().map_or(false, |c| c.is_ascii_digit()) {
      self.pos += 1;
    }
    if lo == self.pos {
      return Ok(None);
    }
    let digits = &self.source[lo..self.pos];
    digits.parse::<usize>()
      .map(Some)
      .map_err(|_| self.error_at(lo, format!("repetition count `{}` is too large", digits)))
  }

  fn parse_element(&mut self) -> PResult<usize> {
    let lo = self.pos;
    let expr = match self.peek() {
      Some(c) if c.is_ascii_alphabetic() => {
        let name = self.parse_name()?;
        if is_udt_name(&name) {
          if self.strict {
            return Err(self.error_at(lo, format!("user-defined terminal `{}` is not allowed in strict ABNF", name)));
          }
          UdtName(name)
        } else {
          RuleName(name)
        }
      }
      Some(b'(') => Group(self.parse_bracketed(b')')?),
      Some(b'[') => Optional(self.parse_bracketed(b']')?),
      Some(b'"') => CaseInsensitive(self.parse_quoted(b'"')?),
      Some(b'\'') => {
        if self.strict {
          return Err(self.error_at(lo, format!("single-quoted case-sensitive strings are not allowed in strict ABNF, use `%s\"...\"`")));
        }
        CaseSensitive(self.parse_quoted(b'\'')?)
      }
      Some(b'%') => self.parse_percent()?,
      Some(b'<') => return Err(self.error_at(lo, format!("prose values `<...>` are not supported"))),
      _ => return Err(self.unexpected("an element"))
    };
    let hi = self.pos;
    Ok(self.alloc_expr(lo, hi, expr))
  }

  fn parse_bracketed(&mut self, close: u8) -> PResult<usize> {
    self.pos += 1;
    self.skip_c_wsp();
    let alternation = self.parse_alternation()?;
    self.skip_c_wsp();
    self.expect(close)?;
    Ok(alternation)
  }

  fn parse_quoted(&mut self, delim: u8) -> PResult<String> {
    let lo = self.pos;
    self.pos += 1;
    let start = self.pos;
    loop {
      match self.peek() {
        Some(c) if c == delim => break,
        Some(c) if c >= 0x20 && c <= 0x7E => self.pos += 1,
        _ => return Err(self.error_at(lo, format!("unterminated string, expected a closing `{}`", delim as char)))
      }
    }
    let text = String::from(&self.source[start..self.pos]);
    self.pos += 1;
    Ok(text)
  }

  fn parse_percent(&mut self) -> PResult<Expression> {
    self.pos += 1;
    let radix = match self.peek().map(|c| c.to_ascii_lowercase()) {
      Some(b'i') | Some(b's') => {
        let sensitive = self.peek().map(|c| c.to_ascii_lowercase()) == Some(b's');
        self.pos += 1;
        if self.peek() != Some(b'"') {
          return Err(self.unexpected("`\"` after `%i` or `%s`"));
        }
        let text = self.parse_quoted(b'"')?;
        return Ok(if sensitive { CaseSensitive(text) } else { CaseInsensitive(text) });
      }
      Some(b'd') => Radix::Decimal,
      Some(b'x') => Radix::Hexadecimal,
      Some(b'b') => Radix::Binary,
      _ => return Err(self.unexpected("`d`, `x`, `b`, `i` or `s` after `%`"))
    };
    self.pos += 1;
    let first = self.parse_digits(radix)?;
    if self.eat(b'-') {
      let last = self.parse_digits(radix)?;
      Ok(NumberRange(radix, first, last))
    }
    else {
      let mut values = vec![first];
      while self.eat(b'.') {
        values.push(self.parse_digits(radix)?);
      }
      Ok(NumberString(radix, values))
    }
  }

  fn parse_digits(&mut self, radix: Radix) -> PResult<String> {
    let lo = self.pos;
    while self.peek().map_or(false, |c| radix.accepts(c)) {
      self.pos += 1;
    }
    if lo == self.pos {
      let expected = format!("base {} digits", radix.base());
      return Err(self.unexpected(&expected));
    }
    Ok(String::from(&self.source[lo..self.pos]))
  }
}
