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

//! Compile the reduced grammar into a Rust module.

pub use crate::back::summary::Summary;

use crate::ast::*;
use crate::compiler::Stage;
use crate::back::code_gen::generate_code;
use crate::back::code_printer::print_code;
use crate::front::input::Input;
use std::ffi::OsString;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

mod summary;
mod code_printer;
mod code_gen;

#[derive(Debug, Error)]
pub enum GenerateError
{
  #[error("cannot write the generated module `{}`: {source}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: io::Error
  },
  #[error("the generated module is not valid Rust: {0}")]
  Malformed(String),
  #[error("cannot generate code until attribute analysis has completed without errors (current stage: {0:?})")]
  NotReady(Stage)
}

/// The file written for `name`: `.rs` is appended, never substituted, so `dir/my.grammar` gives `dir/my.grammar.rs`.
pub fn output_path<P: AsRef<Path>>(name: P) -> PathBuf {
  let mut path = OsString::from(name.as_ref().as_os_str());
  path.push(".rs");
  PathBuf::from(path)
}

/// The source of the generated module, checked to be a well-formed Rust file.
pub fn generate(grammar: &Grammar, input: &Input, print_level: PrintLevel) -> Result<String, GenerateError> {
  let summary = Summary::new(grammar);
  let code = generate_code(grammar, input, &summary);
  syn::parse_file(&code).map_err(|err| GenerateError::Malformed(err.to_string()))?;
  print_code(print_level, &summary, &code);
  Ok(code)
}

pub fn generate_file<P: AsRef<Path>>(grammar: &Grammar, input: &Input, print_level: PrintLevel, name: P)
  -> Result<PathBuf, GenerateError>
{
  let code = generate(grammar, input, print_level)?;
  let path = output_path(name);
  write_artifact(&path, &code)?;
  info!("generated `{}` ({} rules, {} opcodes).", path.display(), grammar.rules.len(), grammar.opcode_count());
  Ok(path)
}

/// The file is closed when this function returns, whatever the outcome.
pub(crate) fn write_artifact(path: &Path, code: &str) -> Result<(), GenerateError> {
  let io_err = |source| GenerateError::Io { path: path.to_path_buf(), source };
  let mut file = File::create(path).map_err(io_err)?;
  file.write_all(code.as_bytes()).map_err(io_err)?;
  file.flush().map_err(io_err)
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::compiler::Compiler;
  use pretty_assertions::assert_eq;

  fn compile(source: &str) -> (Grammar, Input) {
    let mut compiler = Compiler::new(Input::new(source), Config::default());
    assert!(compiler.check(), "{:?}", compiler.diagnostics());
    let grammar = compiler.grammar().cloned().unwrap_or_default();
    (grammar, compiler.input().clone())
  }

  #[test]
  fn test_output_path() {
    assert_eq!(output_path("parsers/expr"), PathBuf::from("parsers/expr.rs"));
    assert_eq!(output_path("my.grammar"), PathBuf::from("my.grammar.rs"));
  }

  #[test]
  fn test_generated_module() {
    let (grammar, input) = compile("Expr = term *(\"+\" term)\nterm = %d48-57 / u_id\n");
    let code = generate(&grammar, &input, PrintLevel::Nothing).unwrap();
    let expected = "\
// SUMMARY
//      rules = 2
//       udts = 1
//    opcodes = 9
//        ALT = 1
//        CAT = 2
//        RNM = 2
//        UDT = 1
//        REP = 1
//        AND = 0
//        NOT = 0
//        TLS = 1
//        TBS = 0
//        TRG = 1
// characters = [43 - 57] + user defined
//
// CALLBACK NAMES
//     expr
//     term
//     u_id

use sabnf_runtime::{Callbacks, Grammar, Identifier, Opcode, Rule, Udt};

/// Identifiers of the rules of the grammar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RuleId {
    Expr,
    Term,
}

impl Identifier for RuleId {
    fn index(self) -> usize {
        match self {
            RuleId::Expr => 0,
            RuleId::Term => 1,
        }
    }

    fn lower(self) -> &'static str {
        match self {
            RuleId::Expr => \"expr\",
            RuleId::Term => \"term\",
        }
    }
}

/// Identifiers of the user-defined terminals of the grammar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UdtId {
    UId,
}

impl Identifier for UdtId {
    fn index(self) -> usize {
        match self {
            UdtId::UId => 0,
        }
    }

    fn lower(self) -> &'static str {
        match self {
            UdtId::UId => \"u_id\",
        }
    }
}

/// One disabled callback per rule and per user-defined terminal.
pub fn callbacks<H>() -> Callbacks<RuleId, UdtId, H> {
    Callbacks::disabled(2, 1)
}

pub fn grammar() -> Grammar {
    let rules = vec![
        Rule {
            name: String::from(\"Expr\"),
            lower: String::from(\"expr\"),
            index: 0,
            opcodes: vec![
                Opcode::Cat { children: vec![1, 2] }, // CAT
                Opcode::Rnm { index: 1 }, // RNM(term)
                Opcode::Rep { min: 0, max: None }, // REP
                Opcode::Cat { children: vec![4, 5] }, // CAT
                Opcode::Tls { string: vec![43] }, // TLS
                Opcode::Rnm { index: 1 }, // RNM(term)
            ],
        },
        Rule {
            name: String::from(\"term\"),
            lower: String::from(\"term\"),
            index: 1,
            opcodes: vec![
                Opcode::Alt { children: vec![1, 2] }, // ALT
                Opcode::Trg { min: 48, max: 57 }, // TRG
                Opcode::Udt { index: 0, empty: false }, // UDT(u_id)
            ],
        },
    ];
    let udts = vec![
        Udt { name: String::from(\"u_id\"), lower: String::from(\"u_id\"), empty: false, index: 0 },
    ];
    Grammar { rules, udts }
}

// INPUT GRAMMAR FILE(s)
//
// Expr = term *(\"+\" term)
// term = %d48-57 / u_id
";
    assert_eq!(code, expected);
  }

  #[test]
  fn test_empty_udt_enum() {
    let (grammar, input) = compile("a = b\n\nb = \"\"\n");
    let code = generate(&grammar, &input, PrintLevel::Debug).unwrap();
    assert!(code.contains("// characters = [ none defined ]\n"));
    assert!(code.contains("pub enum UdtId {}\n"));
    assert!(code.contains("        match self {}\n"));
    assert!(code.contains("use sabnf_runtime::{Callbacks, Grammar, Identifier, Opcode, Rule};\n"));
    assert!(code.contains("    let udts = vec![];\n"));
    assert!(code.ends_with("// a = b\n//\n// b = \"\"\n"));
  }

  #[test]
  fn test_write_error_names_the_path() {
    let (grammar, input) = compile("a = \"x\"\n");
    let name = std::env::temp_dir().join("sabnf-missing-dir").join("nested").join("a");
    match generate_file(&grammar, &input, PrintLevel::Nothing, &name) {
      Err(GenerateError::Io { path, .. }) => assert_eq!(path, output_path(&name)),
      other => panic!("expected an I/O error, got {:?}", other)
    }
  }
}
