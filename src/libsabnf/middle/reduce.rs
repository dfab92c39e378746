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

//! Removal of the `Alt` and `Cat` opcodes with a single child and of the `Rep(1,1)` opcodes.
//!
//! Each of them is immediately followed by its only child, so a removed opcode is replaced by the nearest retained opcode at or after its position.

use crate::ast::*;

fn is_redundant(op: &Opcode) -> bool {
  match op {
    Opcode::Alt { children }
  | Opcode::Cat { children } => children.len() == 1,
    Opcode::Rep { min: 1, max: Some(1) } => true,
    _ => false
  }
}

pub fn reduce_opcodes(opcodes: &[Opcode]) -> Vec<Opcode> {
  let mut reduced: Vec<Opcode> = vec![];
  let mut retained = Vec::with_capacity(opcodes.len());
  for op in opcodes {
    if is_redundant(op) {
      retained.push(None);
    } else {
      retained.push(Some(reduced.len()));
      reduced.push(op.clone());
    }
  }
  // The last entry is the one-past-end sentinel.
  let mut remap = vec![reduced.len(); opcodes.len() + 1];
  let mut next = reduced.len();
  for (i, new_index) in retained.into_iter().enumerate().rev() {
    if let Some(new_index) = new_index {
      next = new_index;
    }
    remap[i] = next;
  }
  let sentinel = reduced.len();
  for op in reduced.iter_mut() {
    match op {
      Opcode::Alt { children }
    | Opcode::Cat { children } => {
        for child in children.iter_mut() {
          *child = remap.get(*child).cloned().unwrap_or(sentinel);
        }
      }
      _ => ()
    }
  }
  reduced
}

pub fn reduce_rules(mut grammar: Grammar) -> Grammar {
  for rule in grammar.rules.iter_mut() {
    let reduced = reduce_opcodes(&rule.opcodes);
    debug!("rule `{}` reduced from {} to {} opcodes.", rule.name, rule.opcodes.len(), reduced.len());
    rule.opcodes = reduced;
  }
  grammar
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::ast::Opcode::*;

  #[test]
  fn test_single_terminal() {
    let raw = vec![
      Alt { children: vec![1] },
      Cat { children: vec![2] },
      Rep { min: 1, max: Some(1) },
      Tls { string: vec![120] }
    ];
    assert_eq!(reduce_opcodes(&raw), vec![Tls { string: vec![120] }]);
  }

  #[test]
  fn test_children_are_relinked() {
    // s = "a" / 2"b" ("c" "d")
    let raw = vec![
      Alt { children: vec![1, 4] },
      Cat { children: vec![2] },
      Rep { min: 1, max: Some(1) },
      Tls { string: vec![97] },
      Cat { children: vec![5, 7] },
      Rep { min: 2, max: Some(2) },
      Tls { string: vec![98] },
      Rep { min: 1, max: Some(1) },
      Alt { children: vec![9] },
      Cat { children: vec![10, 12] },
      Rep { min: 1, max: Some(1) },
      Tls { string: vec![99] },
      Rep { min: 1, max: Some(1) },
      Tls { string: vec![100] }
    ];
    let reduced = reduce_opcodes(&raw);
    assert_eq!(reduced, vec![
      Alt { children: vec![1, 2] },
      Tls { string: vec![97] },
      Cat { children: vec![3, 5] },
      Rep { min: 2, max: Some(2) },
      Tls { string: vec![98] },
      Cat { children: vec![6, 7] },
      Tls { string: vec![99] },
      Tls { string: vec![100] }
    ]);
    assert_eq!(reduce_opcodes(&reduced), reduced);
  }

  #[test]
  fn test_predicate_keeps_its_following_child() {
    // s = !"a"
    let raw = vec![
      Alt { children: vec![1] },
      Cat { children: vec![2] },
      Not,
      Rep { min: 1, max: Some(1) },
      Tls { string: vec![97] }
    ];
    assert_eq!(reduce_opcodes(&raw), vec![Not, Tls { string: vec![97] }]);
  }
}
