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

use std::fmt::{Formatter, Display, Error};
use std::slice::Iter;

/// An error located in the grammar source: `line` starts at 1 and `char` is the absolute offset in the source. Errors that do not belong to a line (e.g. an out-of-order stage) are reported at line 0, char 0.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Diagnostic
{
  pub line: usize,
  pub char: usize,
  pub msg: String
}

impl Diagnostic
{
  pub fn new(line: usize, char: usize, msg: String) -> Diagnostic {
    Diagnostic { line, char, msg }
  }

  pub fn global(msg: String) -> Diagnostic {
    Diagnostic::new(0, 0, msg)
  }
}

impl Display for Diagnostic
{
  fn fmt(&self, formatter: &mut Formatter) -> Result<(), Error> {
    formatter.write_fmt(format_args!("line: {}: char: {}: msg: {}", self.line, self.char, self.msg))
  }
}

/// The ordered errors of one compilation attempt. Every stage appends to it, nothing is ever removed.
#[derive(Clone, Debug, Default)]
pub struct Diagnostics
{
  errors: Vec<Diagnostic>
}

impl Diagnostics
{
  pub fn new() -> Diagnostics {
    Diagnostics::default()
  }

  pub fn push(&mut self, diagnostic: Diagnostic) {
    self.errors.push(diagnostic);
  }

  pub fn global_err(&mut self, msg: String) {
    self.push(Diagnostic::global(msg));
  }

  pub fn len(&self) -> usize {
    self.errors.len()
  }

  pub fn is_empty(&self) -> bool {
    self.errors.is_empty()
  }

  pub fn iter(&self) -> Iter<Diagnostic> {
    self.errors.iter()
  }

  pub fn as_slice(&self) -> &[Diagnostic] {
    self.errors.as_slice()
  }

  /// Errors pushed since `mark`, a value previously returned by `len`.
  pub fn since(&self, mark: usize) -> &[Diagnostic] {
    &self.errors[mark..]
  }

  /// Orders the errors pushed since `mark` by their position in the source. Errors at the same position keep their order.
  pub fn sort_since(&mut self, mark: usize) {
    self.errors[mark..].sort_by_key(|d| (d.line, d.char));
  }

  pub fn into_vec(self) -> Vec<Diagnostic> {
    self.errors
  }
}

impl Extend<Diagnostic> for Diagnostics
{
  fn extend<T: IntoIterator<Item=Diagnostic>>(&mut self, iter: T) {
    self.errors.extend(iter);
  }
}
