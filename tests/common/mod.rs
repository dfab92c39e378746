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

//! A small opcode interpreter with ordered choice and greedy repetitions, enough to compare two opcode arrays on the same inputs. UDTs never match.

use sabnf::*;

pub struct Interpreter<'a>
{
  grammar: &'a Grammar,
  input: &'a [u8]
}

impl<'a> Interpreter<'a>
{
  pub fn new(grammar: &'a Grammar, input: &'a [u8]) -> Interpreter<'a> {
    Interpreter { grammar, input }
  }

  /// Length of the prefix of the input matched by `rule`, `None` if it does not match.
  pub fn run(&self, rule: usize) -> Option<usize> {
    self.rule(rule, 0)
  }

  fn rule(&self, rule: usize, pos: usize) -> Option<usize> {
    self.opcode(rule, 0, pos)
  }

  fn opcode(&self, rule: usize, this: usize, pos: usize) -> Option<usize> {
    let op = &self.grammar.rules[rule].opcodes[this];
    match op {
      Opcode::Alt { children } => {
        children.iter().filter_map(|&child| self.opcode(rule, child, pos)).next()
      }
      Opcode::Cat { children } => {
        children.iter().try_fold(pos, |pos, &child| self.opcode(rule, child, pos))
      }
      &Opcode::Rep { min, max } => {
        let mut count = 0;
        let mut pos = pos;
        while max.map_or(true, |max| count < max) {
          match self.opcode(rule, this + 1, pos) {
            // An empty match can be repeated up to the minimum.
            Some(next) if next == pos => {
              count = min.max(count + 1);
              break;
            }
            Some(next) => {
              count += 1;
              pos = next;
            }
            None => break
          }
        }
        if count >= min { Some(pos) } else { None }
      }
      Opcode::And => self.opcode(rule, this + 1, pos).map(|_| pos),
      Opcode::Not => match self.opcode(rule, this + 1, pos) {
        Some(_) => None,
        None => Some(pos)
      },
      &Opcode::Rnm { index } => self.rule(index, pos),
      Opcode::Udt { .. } => None,
      Opcode::Tls { string } => self.literal(string, pos, true),
      Opcode::Tbs { string } => self.literal(string, pos, false),
      &Opcode::Trg { min, max } => {
        let c = *self.input.get(pos)? as u32;
        if min <= c && c <= max { Some(pos + 1) } else { None }
      }
    }
  }

  fn literal(&self, string: &[u32], pos: usize, fold: bool) -> Option<usize> {
    let end = pos + string.len();
    let text = self.input.get(pos..end)?;
    let matched = text.iter().zip(string.iter()).all(|(&c, &expected)| {
      let c = if fold { c.to_ascii_lowercase() } else { c };
      c as u32 == expected
    });
    if matched { Some(end) } else { None }
  }
}
