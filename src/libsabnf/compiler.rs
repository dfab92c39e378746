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

//! The compilation driver. Each stage runs at most once and only after the previous one succeeded, a stage called out of order records a global diagnostic instead of running.

use crate::ast::*;
use crate::back::{self, GenerateError};
use crate::diagnostic::*;
use crate::front;
use crate::front::ast::FGrammar;
use crate::front::input::Input;
use crate::middle;
use crate::middle::analysis::{self, AttributeCheck, Attributes, RuleLineMap};
use crate::report;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Stage
{
  SyntaxPending,
  SyntaxOk,
  SyntaxFailed,
  SemanticOk,
  SemanticFailed,
  AttrOk,
  AttrFailed,
  Generated
}

const STAGE_NAMES: [&str; 4] = [
  "syntax analysis", "semantic analysis", "attribute analysis", "code generation"
];

impl Stage
{
  /// Number of stages completed without errors.
  pub fn passed(self) -> usize {
    use self::Stage::*;
    match self {
        SyntaxPending
      | SyntaxFailed => 0,
        SyntaxOk
      | SemanticFailed => 1,
        SemanticOk
      | AttrFailed => 2,
      AttrOk => 3,
      Generated => 4
    }
  }

  pub fn is_failed(self) -> bool {
    use self::Stage::*;
    match self {
      SyntaxFailed | SemanticFailed | AttrFailed => true,
      _ => false
    }
  }
}

enum Gate
{
  Done,
  Run,
  Failed,
  Blocked
}

pub struct Compiler<C = Attributes>
{
  config: Config,
  input: Input,
  checker: C,
  stage: Stage,
  diagnostics: Diagnostics,
  syntax_tree: Option<FGrammar>,
  grammar: Option<Grammar>,
  rule_lines: RuleLineMap
}

impl Compiler<Attributes>
{
  pub fn new(input: Input, config: Config) -> Compiler<Attributes> {
    Compiler::with_checker(input, config, Attributes)
  }
}

impl<C> Compiler<C> where
 C: AttributeCheck
{
  /// A compiler delegating the attribute stage to `checker`.
  pub fn with_checker(input: Input, config: Config, checker: C) -> Compiler<C> {
    Compiler {
      config: config,
      input: input,
      checker: checker,
      stage: Stage::SyntaxPending,
      diagnostics: Diagnostics::new(),
      syntax_tree: None,
      grammar: None,
      rule_lines: RuleLineMap::default()
    }
  }

  fn gate(&mut self, stage: usize) -> Gate {
    let passed = self.stage.passed();
    if passed > stage {
      Gate::Done
    }
    else if passed == stage {
      if self.stage.is_failed() { Gate::Failed } else { Gate::Run }
    }
    else {
      self.diagnostics.global_err(format!("cannot do {} until {} has completed without errors",
        STAGE_NAMES[stage], STAGE_NAMES[stage - 1]));
      Gate::Blocked
    }
  }

  /// Input analysis and parsing of the grammar source.
  pub fn syntax(&mut self) -> bool {
    match self.gate(0) {
      Gate::Run => (),
      Gate::Done => return true,
      _ => return false
    }
    let mark = self.diagnostics.len();
    match front::syntax(&self.input, self.config.strict, &mut self.diagnostics) {
      Partial::Value(fgrammar) if self.diagnostics.len() == mark => {
        info!("syntax analysis: {} rule definition(s).", fgrammar.rules.len());
        self.syntax_tree = Some(fgrammar);
        self.stage = Stage::SyntaxOk;
      }
      _ => {
        info!("syntax analysis failed with {} error(s).", self.diagnostics.len() - mark);
        self.diagnostics.global_err(format!("syntax analysis of input grammar failed"));
        self.stage = Stage::SyntaxFailed;
      }
    }
    self.stage == Stage::SyntaxOk
  }

  /// Translation of the syntax tree into opcodes, then reduction.
  pub fn semantic(&mut self) -> bool {
    match self.gate(1) {
      Gate::Run => (),
      Gate::Done => return true,
      _ => return false
    }
    let mark = self.diagnostics.len();
    let lines = self.input.lines();
    let result = match self.syntax_tree {
      Some(ref fgrammar) => middle::semantic(fgrammar, lines, &mut self.diagnostics)
        .map(|grammar| (RuleLineMap::new(fgrammar, lines, &grammar), grammar)),
      None => Partial::Nothing
    };
    match result {
      Partial::Value((rule_lines, grammar)) if self.diagnostics.len() == mark => {
        info!("semantic analysis: {} rule(s), {} UDT(s), {} opcode(s).",
          grammar.rules.len(), grammar.udts.len(), grammar.opcode_count());
        self.rule_lines = rule_lines;
        self.grammar = Some(grammar);
        self.stage = Stage::SemanticOk;
      }
      _ => {
        info!("semantic analysis failed with {} error(s).", self.diagnostics.len() - mark);
        self.stage = Stage::SemanticFailed;
      }
    }
    self.stage == Stage::SemanticOk
  }

  /// Attribute analysis of the reduced grammar by the checker of this compiler.
  pub fn attributes(&mut self) -> bool {
    match self.gate(2) {
      Gate::Run => (),
      Gate::Done => return true,
      _ => return false
    }
    let well_formed = match self.grammar {
      Some(ref grammar) => analysis::analyse(&self.checker, grammar, &self.rule_lines, &mut self.diagnostics),
      None => false
    };
    self.stage = if well_formed { Stage::AttrOk } else { Stage::AttrFailed };
    info!("attribute analysis: {:?}.", self.stage);
    well_formed
  }

  /// The source of the generated module. Can be called again once generated.
  pub fn artifact(&mut self) -> Result<String, GenerateError> {
    match self.gate(3) {
      Gate::Run | Gate::Done => (),
      _ => return Err(GenerateError::NotReady(self.stage))
    }
    let code = match self.grammar {
      Some(ref grammar) => back::generate(grammar, &self.input, self.config.print_code)?,
      None => return Err(GenerateError::NotReady(self.stage))
    };
    self.stage = Stage::Generated;
    Ok(code)
  }

  /// Writes the generated module to `name` with the `.rs` extension appended.
  pub fn generate<P: AsRef<Path>>(&mut self, name: P) -> Result<PathBuf, GenerateError> {
    let code = self.artifact()?;
    let path = back::output_path(name);
    back::write_artifact(&path, &code)?;
    info!("generated `{}`.", path.display());
    Ok(path)
  }

  /// Runs the three analysis stages. Returns `false` as soon as one of them fails.
  pub fn check(&mut self) -> bool {
    self.syntax() && self.semantic() && self.attributes()
  }

  /// Runs every stage and writes the module. The diagnostics explain a `NotReady` error.
  pub fn run<P: AsRef<Path>>(&mut self, name: P) -> Result<PathBuf, GenerateError> {
    if self.check() {
      self.generate(name)
    }
    else {
      Err(GenerateError::NotReady(self.stage))
    }
  }

  pub fn stage(&self) -> Stage {
    self.stage
  }

  pub fn config(&self) -> Config {
    self.config
  }

  pub fn input(&self) -> &Input {
    &self.input
  }

  pub fn diagnostics(&self) -> &[Diagnostic] {
    self.diagnostics.as_slice()
  }

  pub fn syntax_tree(&self) -> Option<&FGrammar> {
    self.syntax_tree.as_ref()
  }

  /// The reduced grammar, available once the semantic analysis succeeded.
  pub fn grammar(&self) -> Option<&Grammar> {
    self.grammar.as_ref()
  }

  pub fn rule_lines(&self) -> &RuleLineMap {
    &self.rule_lines
  }

  pub fn errors_to_string(&self, title: &str) -> String {
    report::errors_to_string(title, self.diagnostics())
  }

  pub fn errors_to_html(&self, title: &str) -> String {
    report::errors_to_html(title, &self.input, self.diagnostics())
  }
}
