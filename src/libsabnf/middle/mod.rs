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

//! The `translate` module turns the syntax tree into opcodes, `reduce` removes the redundant ones and `analysis` checks the attributes of the reduced rules.

use crate::ast::*;
use crate::diagnostic::Diagnostics;
use crate::front::ast::FGrammar;
use crate::front::input::LineMap;

pub mod analysis;
pub mod translate;
pub mod reduce;

/// Semantic analysis. The reduction only runs on a grammar translated without errors.
pub fn semantic(fgrammar: &FGrammar, lines: &LineMap, diagnostics: &mut Diagnostics) -> Partial<Grammar> {
  translate::translate(fgrammar, lines, diagnostics)
    .and_next(|grammar| Partial::Value(reduce::reduce_rules(grammar)))
}
