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

//! End-to-end compilations through the public `Compiler` API.

use sabnf::*;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::PathBuf;

fn compiler(source: &str) -> Compiler {
  let _ = env_logger::try_init();
  Compiler::new(Input::new(source), Config::default())
}

fn messages(compiler: &Compiler) -> Vec<(usize, usize, String)> {
  compiler.diagnostics().iter().map(|d| (d.line, d.char, d.msg.clone())).collect()
}

fn scratch_dir(name: &str) -> PathBuf {
  let dir = std::env::temp_dir().join(format!("sabnf-{}-{}", name, std::process::id()));
  fs::create_dir_all(&dir).unwrap();
  dir
}

#[test]
fn single_repetition_reduces_to_its_terminal() {
  let mut compiler = compiler("s = 1*1\"x\"\n");
  assert!(compiler.check(), "{}", compiler.errors_to_string("errors"));
  let grammar = compiler.grammar().unwrap();
  assert_eq!(grammar.rules[0].opcodes, vec![Opcode::Tls { string: vec![120] }]);
}

#[test]
fn undefined_rule_is_one_semantic_error() {
  let mut compiler = compiler("a = b\n");
  assert!(compiler.syntax());
  assert!(!compiler.semantic());
  assert_eq!(compiler.stage(), Stage::SemanticFailed);
  assert_eq!(messages(&compiler), vec![(1, 4, format!("rule `b` is used but not defined"))]);
  assert!(!compiler.attributes());
  match compiler.artifact() {
    Err(GenerateError::NotReady(Stage::SemanticFailed)) => (),
    other => panic!("unexpected result {:?}", other)
  }
}

#[test]
fn case_insensitive_name_collision() {
  let mut compiler = compiler("Foo = \"x\"\nfoo = \"y\"\n");
  assert!(!compiler.check());
  assert_eq!(messages(&compiler), vec![(2, 10,
    format!("rule `foo` is already defined as `Foo` on line 1, rule names are case-insensitive"))]);
}

#[test]
fn references_only_grammar_has_no_characters() {
  let mut compiler = compiler("a = b\nb = c / \"\"\nc = b a\n");
  assert!(compiler.syntax());
  assert!(compiler.semantic());
  let summary = Summary::new(compiler.grammar().unwrap());
  assert_eq!(summary.characters(), "[ none defined ]");
  assert_eq!(summary.count(OpcodeKind::Rnm), 4);
  // `c` calls `b` which calls `c` before consuming anything.
  assert!(!compiler.attributes());
  let errors = messages(&compiler);
  assert!(errors.iter().any(|e| e.2.starts_with("rule `b` is left recursive")), "{:?}", errors);
}

#[test]
fn regeneration_is_byte_identical() {
  let source = "; json-like values\nvalue = object / number / u_string\nobject = \"{\" [member *(\",\" member)] \"}\"\nmember = u_string \":\" value\nnumber = 1*%d48-57\n";
  let dir = scratch_dir("regeneration");
  let first = compiler(source).run(dir.join("first")).unwrap();
  let second = compiler(source).run(dir.join("second")).unwrap();
  assert_eq!(first, dir.join("first.rs"));
  let first = fs::read(first).unwrap();
  let second = fs::read(second).unwrap();
  assert!(first == second);
  let text = String::from_utf8(first).unwrap();
  assert!(text.contains("//     u_string\n"));
  assert!(text.ends_with("// number = 1*%d48-57\n"));
  let _ = fs::remove_dir_all(dir);
}

#[test]
fn stable_case_folded_indexing() {
  let mut compiler = compiler("Zeta = alpha u_Id\nalpha = \"a\" e_Sp u_id\n");
  assert!(compiler.check(), "{}", compiler.errors_to_string("errors"));
  let grammar = compiler.grammar().unwrap();
  let rules: Vec<_> = grammar.rules.iter().map(|r| (r.index, r.name.as_str(), r.lower.as_str())).collect();
  assert_eq!(rules, vec![(0, "Zeta", "zeta"), (1, "alpha", "alpha")]);
  let udts: Vec<_> = grammar.udts.iter().map(|u| (u.index, u.lower.as_str(), u.empty)).collect();
  assert_eq!(udts, vec![(0, "u_id", false), (1, "e_sp", true)]);
  assert_eq!(grammar.rule_by_name("ZETA").map(|r| r.index), Some(0));
  assert_eq!(grammar.rules[0].opcodes, vec![
    Opcode::Cat { children: vec![1, 2] },
    Opcode::Rnm { index: 1 },
    Opcode::Udt { index: 0, empty: false }
  ]);
}

#[test]
fn every_undeclared_reference_is_reported() {
  let mut compiler = compiler("s = x y x\nt = z s\n");
  assert!(compiler.syntax());
  assert!(!compiler.semantic());
  let errors = messages(&compiler);
  assert_eq!(errors.len(), 4);
  let lines: Vec<_> = errors.iter().map(|e| e.0).collect();
  assert_eq!(lines, vec![1, 1, 1, 2]);
}

#[test]
fn syntax_errors_recover_at_the_next_rule() {
  let mut compiler = compiler("a = \"x\" <prose>\nb = \"y\"\n c = (\"z\"\nd = \"w\"\n");
  assert!(!compiler.check());
  assert_eq!(compiler.stage(), Stage::SyntaxFailed);
  assert!(compiler.diagnostics().len() >= 3, "{:?}", compiler.diagnostics());
  assert_eq!(compiler.diagnostics().last().map(|d| (d.line, d.char)), Some((0, 0)));
  let html = compiler.errors_to_html("syntax");
  assert!(html.starts_with("<h3>syntax</h3>\n"));
  assert!(html.contains("<span class=\"sabnf-error\">"));
}

#[test]
fn strict_mode_requires_crlf() {
  let mut compiler = Compiler::new(Input::new("a = \"x\"\r\nb = a\n"), Config::strict());
  assert!(!compiler.check());
  assert_eq!(messages(&compiler), vec![
    (2, 14, format!("strict ABNF requires CRLF line ends")),
    (0, 0, format!("syntax analysis of input grammar failed"))
  ]);
  let mut compiler = Compiler::new(Input::new("a = \"x\"\r\nb = a\r\n"), Config::strict());
  assert!(compiler.check());
}
