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

//! Input analysis: the line map of the grammar source and the verification of its character set.

use crate::diagnostic::*;
use std::fs;
use std::io;
use std::path::Path;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LineEnd
{
  CrLf,
  Lf,
  Cr,
  /// Last line of a source not terminated by a line end.
  Missing
}

impl LineEnd
{
  pub fn len(self) -> usize {
    match self {
      LineEnd::CrLf => 2,
      LineEnd::Lf | LineEnd::Cr => 1,
      LineEnd::Missing => 0
    }
  }
}

/// `length` includes the line end, `text_length` does not.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Line
{
  pub begin_char: usize,
  pub length: usize,
  pub text_length: usize,
  pub end: LineEnd
}

impl Line
{
  pub fn text<'a>(&self, source: &'a str) -> &'a str {
    &source[self.begin_char..self.begin_char + self.text_length]
  }

  fn contains(&self, offset: usize) -> bool {
    offset >= self.begin_char && offset < self.begin_char + self.length
  }
}

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct LineMap
{
  lines: Vec<Line>
}

impl LineMap
{
  pub fn new(source: &str) -> LineMap {
    let bytes = source.as_bytes();
    let mut lines = vec![];
    let mut begin = 0;
    let mut i = 0;
    while i < bytes.len() {
      let end = match bytes[i] {
        b'\r' if bytes.get(i + 1) == Some(&b'\n') => Some(LineEnd::CrLf),
        b'\r' => Some(LineEnd::Cr),
        b'\n' => Some(LineEnd::Lf),
        _ => None
      };
      match end {
        Some(end) => {
          let text_length = i - begin;
          i += end.len();
          lines.push(Line { begin_char: begin, length: i - begin, text_length, end });
          begin = i;
        }
        None => i += 1
      }
    }
    if begin < bytes.len() {
      let text_length = bytes.len() - begin;
      lines.push(Line { begin_char: begin, length: text_length, text_length, end: LineEnd::Missing });
    }
    LineMap { lines }
  }

  pub fn lines(&self) -> &[Line] {
    self.lines.as_slice()
  }

  pub fn len(&self) -> usize {
    self.lines.len()
  }

  pub fn is_empty(&self) -> bool {
    self.lines.is_empty()
  }

  /// Index of the line containing `offset`. Offsets past the end belong to the last line.
  pub fn find_line(&self, offset: usize) -> Option<usize> {
    if self.lines.is_empty() {
      return None;
    }
    let found = self.lines.binary_search_by(|line| {
      if line.contains(offset) { std::cmp::Ordering::Equal }
      else if line.begin_char > offset { std::cmp::Ordering::Greater }
      else { std::cmp::Ordering::Less }
    });
    match found {
      Ok(index) => Some(index),
      Err(_) => Some(self.lines.len() - 1)
    }
  }

  /// One-based line number of `offset`, 0 for an empty source.
  pub fn line_number(&self, offset: usize) -> usize {
    self.find_line(offset).map_or(0, |index| index + 1)
  }

  pub fn diagnostic(&self, offset: usize, msg: String) -> Diagnostic {
    Diagnostic::new(self.line_number(offset), offset, msg)
  }
}

/// The grammar source and its line map, built once and consulted by every stage.
#[derive(Clone, Debug)]
pub struct Input
{
  source: String,
  lines: LineMap
}

impl Input
{
  pub fn new<S: Into<String>>(source: S) -> Input {
    let source = source.into();
    let lines = LineMap::new(&source);
    Input { source, lines }
  }

  pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Input> {
    fs::read_to_string(path).map(Input::new)
  }

  pub fn source(&self) -> &str {
    &self.source
  }

  pub fn lines(&self) -> &LineMap {
    &self.lines
  }

  pub fn line_text(&self, index: usize) -> &str {
    self.lines.lines()[index].text(&self.source)
  }

  /// Checks the character set and, in strict mode, the CRLF line ends. Returns `false` if an error was recorded.
  pub fn analyse(&self, strict: bool, diagnostics: &mut Diagnostics) -> bool {
    let mark = diagnostics.len();
    for (offset, c) in self.source.char_indices() {
      let valid = c == '\t' || c == '\n' || c == '\r' || (c >= ' ' && c <= '~');
      if !valid {
        diagnostics.push(self.lines.diagnostic(offset,
          format!("invalid character 0x{:02X}, only TAB, LF, CR and 0x20-0x7E are allowed", c as u32)));
      }
    }
    if strict {
      for line in self.lines.lines() {
        let end = line.begin_char + line.text_length;
        match line.end {
          LineEnd::CrLf => (),
          LineEnd::Missing => diagnostics.push(self.lines.diagnostic(end,
            format!("the last line has no line end, strict ABNF requires CRLF"))),
          _ => diagnostics.push(self.lines.diagnostic(end,
            format!("strict ABNF requires CRLF line ends")))
        }
      }
    }
    diagnostics.len() == mark
  }
}
