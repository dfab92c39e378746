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

//! The front end checks the grammar source and builds its syntax tree.

use crate::diagnostic::Diagnostics;
use crate::front::ast::FGrammar;
use crate::front::input::Input;
use crate::front::parser::Parser;
use partial::Partial;

pub mod ast;
pub mod input;
pub mod parser;

/// Input analysis then syntax analysis. The parser never sees a source with invalid characters.
pub fn syntax(input: &Input, strict: bool, diagnostics: &mut Diagnostics) -> Partial<FGrammar> {
  if input.analyse(strict, diagnostics) {
    Parser::new(input, strict).parse_grammar(diagnostics)
  }
  else {
    Partial::Nothing
  }
}
