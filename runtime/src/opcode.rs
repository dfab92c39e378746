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

use std::fmt::{Formatter, Display, Error};

/// One node of a rule's operation graph.
///
/// `Alt` and `Cat` reference their children by index in the opcode array of the same rule. `Rep`, `And` and `Not` apply to the opcode immediately following them.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Opcode
{
  Alt { children: Vec<usize> }, // a / b
  Cat { children: Vec<usize> }, // a b
  Rnm { index: usize }, // rule-name
  Udt { index: usize, empty: bool }, // u_name or e_name
  Rep { min: usize, max: Option<usize> }, // n*m element
  And, // &element
  Not, // !element
  Tls { string: Vec<u32> }, // "case-insensitive"
  Tbs { string: Vec<u32> }, // 'case-sensitive' or %d65.66
  Trg { min: u32, max: u32 }, // %d48-57
}

impl Opcode
{
  pub fn kind(&self) -> OpcodeKind {
    use self::Opcode::*;
    match self {
      Alt{..} => OpcodeKind::Alt,
      Cat{..} => OpcodeKind::Cat,
      Rnm{..} => OpcodeKind::Rnm,
      Udt{..} => OpcodeKind::Udt,
      Rep{..} => OpcodeKind::Rep,
      And => OpcodeKind::And,
      Not => OpcodeKind::Not,
      Tls{..} => OpcodeKind::Tls,
      Tbs{..} => OpcodeKind::Tbs,
      Trg{..} => OpcodeKind::Trg
    }
  }

  /// Explicit children of `Alt` and `Cat`, empty for every other opcode.
  pub fn children(&self) -> &[usize] {
    match self {
      Opcode::Alt { children }
    | Opcode::Cat { children } => children.as_slice(),
      _ => &[]
    }
  }

  /// The smallest and largest character codes this opcode can match, if it matches characters at all.
  pub fn char_range(&self) -> Option<(u32, u32)> {
    match self {
      Opcode::Tls { string }
    | Opcode::Tbs { string } => {
        let min = string.iter().cloned().min()?;
        let max = string.iter().cloned().max()?;
        Some((min, max))
      }
      &Opcode::Trg { min, max } => Some((min, max)),
      _ => None
    }
  }
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum OpcodeKind
{
  Alt,
  Cat,
  Rnm,
  Udt,
  Rep,
  And,
  Not,
  Tls,
  Tbs,
  Trg
}

impl OpcodeKind
{
  pub const ALL: [OpcodeKind; 10] = [
    OpcodeKind::Alt, OpcodeKind::Cat, OpcodeKind::Rnm, OpcodeKind::Udt, OpcodeKind::Rep,
    OpcodeKind::And, OpcodeKind::Not, OpcodeKind::Tls, OpcodeKind::Tbs, OpcodeKind::Trg
  ];

  pub fn name(self) -> &'static str {
    use self::OpcodeKind::*;
    match self {
      Alt => "ALT",
      Cat => "CAT",
      Rnm => "RNM",
      Udt => "UDT",
      Rep => "REP",
      And => "AND",
      Not => "NOT",
      Tls => "TLS",
      Tbs => "TBS",
      Trg => "TRG"
    }
  }

  /// Position of this kind in `OpcodeKind::ALL`.
  pub fn ordinal(self) -> usize {
    self as usize
  }
}

impl Display for OpcodeKind
{
  fn fmt(&self, formatter: &mut Formatter) -> Result<(), Error> {
    formatter.write_str(self.name())
  }
}
