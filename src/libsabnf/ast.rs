// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at

//     http://www.apache.org/licenses/LICENSE-2.0

// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Definitions shared across all the compiling steps.

pub use crate::identifier::*;
pub use partial::Partial;
pub use sabnf_runtime::{Grammar, Rule, Udt, Opcode, OpcodeKind};

use std::default::Default;

/// Options of one compilation.
#[derive(Clone, Copy, Debug, Default)]
pub struct Config
{
  /// Only accept RFC 5234 ABNF: CRLF line ends, no predicates, no UDT, no single-quoted literals.
  pub strict: bool,
  pub print_code: PrintLevel
}

impl Config
{
  pub fn strict() -> Config {
    Config {
      strict: true,
      .. Config::default()
    }
  }

  pub fn print_code(self, print_code: PrintLevel) -> Config {
    Config {
      print_code: self.print_code.merge(print_code),
      .. self
    }
  }
}

/// `Debug` logs the whole generated module, `Show` logs its summary.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PrintLevel
{
  Debug,
  Show,
  Nothing
}

impl PrintLevel
{
  pub fn merge(self, other: PrintLevel) -> PrintLevel {
    use self::PrintLevel::*;
    match (self, other) {
        (Nothing, Debug)
      | (Show, Debug) => Debug,
      (Nothing, Show) => Show,
      (level, _) => level
    }
  }

  pub fn debug(self) -> bool {
    self == PrintLevel::Debug
  }

  pub fn show(self) -> bool {
    self == PrintLevel::Show
  }
}

impl Default for PrintLevel
{
  fn default() -> PrintLevel {
    PrintLevel::Nothing
  }
}

/// Byte offsets `[lo, hi)` in the grammar source. Once input analysis succeeded the source is ASCII, so these are also character offsets.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Span
{
  pub lo: usize,
  pub hi: usize
}

impl Span
{
  pub fn new(lo: usize, hi: usize) -> Span {
    Span { lo, hi }
  }
}

pub fn display_path_cycle(path: &[String]) -> String {
  let mut path_desc = String::new();
  for rule in path {
    path_desc.push_str(&format!("{} -> ", rule));
  }
  if let Some(first) = path.first() {
    path_desc.push_str(first);
  }
  path_desc
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn test_print_level_merge() {
    use super::PrintLevel::*;
    assert_eq!(Nothing.merge(Debug), Debug);
    assert_eq!(Show.merge(Debug), Debug);
    assert_eq!(Nothing.merge(Show), Show);
    assert_eq!(Debug.merge(Show), Debug);
    assert_eq!(Show.merge(Nothing), Show);
    assert_eq!(Config::strict().print_code(Show).print_code, Show);
    assert!(Config::strict().strict);
  }

  #[test]
  fn test_display_path_cycle() {
    let path = vec![String::from("a"), String::from("b")];
    assert_eq!(display_path_cycle(&path), "a -> b -> a");
    assert_eq!(display_path_cycle(&[String::from("a")]), "a -> a");
  }
}
