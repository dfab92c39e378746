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

//! The reduction of random grammars keeps the matched language and is idempotent.

mod common;

use common::Interpreter;
use proptest::prelude::*;
use proptest::sample::select;
use sabnf::*;
use sabnf::middle::reduce::{reduce_opcodes, reduce_rules};
use sabnf::middle::translate::translate;

/// Every generated expression is an element, so it can be prefixed by a repeat or a predicate.
fn expression(refs: &'static [&'static str]) -> BoxedStrategy<String> {
  let mut leaves: Vec<String> = vec!["\"a\"", "\"Ab\"", "\"\"", "'B'", "%d97-98", "%x61.62", "%s\"b\""]
    .into_iter().map(String::from).collect();
  leaves.extend(refs.iter().map(|r| String::from(*r)));
  select(leaves).prop_recursive(4, 24, 3, |inner| prop_oneof![
    prop::collection::vec(inner.clone(), 1..4).prop_map(|es| format!("({})", es.join(" / "))),
    prop::collection::vec(inner.clone(), 1..4).prop_map(|es| format!("({})", es.join(" "))),
    (0usize..3, 0usize..3, inner.clone()).prop_map(|(min, extra, e)| format!("({}*{}{})", min, min + extra, e)),
    inner.clone().prop_map(|e| format!("(*{})", e)),
    inner.clone().prop_map(|e| format!("[{}]", e)),
    inner.clone().prop_map(|e| format!("(&{})", e)),
    inner.clone().prop_map(|e| format!("(!{})", e))
  ]).boxed()
}

/// Three rules, each one only referencing the following ones.
fn grammar_source() -> impl Strategy<Value = String> {
  (expression(&["r1", "r2"]), expression(&["r2"]), expression(&[]))
    .prop_map(|(r0, r1, r2)| format!("r0 = {}\nr1 = {}\nr2 = {}\n", r0, r1, r2))
}

fn raw_grammar(source: &str) -> Grammar {
  let input = Input::new(source);
  let mut diagnostics = Diagnostics::new();
  let fgrammar = sabnf::front::syntax(&input, false, &mut diagnostics)
    .unwrap_or_else(|| panic!("syntax errors in `{}`: {:?}", source, diagnostics));
  translate(&fgrammar, input.lines(), &mut diagnostics)
    .unwrap_or_else(|| panic!("semantic errors in `{}`: {:?}", source, diagnostics))
}

proptest! {
  #[test]
  fn reduction_preserves_the_language(source in grammar_source(), inputs in prop::collection::vec("[abAB]{0,6}", 1..8)) {
    let raw = raw_grammar(&source);
    let reduced = reduce_rules(raw.clone());
    for text in &inputs {
      for rule in 0..raw.rules.len() {
        let expected = Interpreter::new(&raw, text.as_bytes()).run(rule);
        let obtained = Interpreter::new(&reduced, text.as_bytes()).run(rule);
        prop_assert_eq!(expected, obtained, "rule r{} on `{}` of\n{}", rule, text, source);
      }
    }
  }

  #[test]
  fn reduction_is_idempotent_and_closed(source in grammar_source()) {
    let reduced = reduce_rules(raw_grammar(&source));
    for rule in &reduced.rules {
      prop_assert_eq!(&reduce_opcodes(&rule.opcodes), &rule.opcodes);
      prop_assert!(rule.opcodes.len() >= 1);
      for op in &rule.opcodes {
        for &child in op.children() {
          prop_assert!(child < rule.opcodes.len(), "child {} of `{}` in\n{}", child, rule.name, source);
        }
      }
    }
  }
}
