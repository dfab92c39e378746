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

//! This is the developer documentation of sabnf, a compiler for grammars written in SABNF: the Augmented Backus-Naur Form of RFC 5234 extended with syntactic predicates (`&e`, `!e`) and user-defined terminals (`u_name`, `e_name`).
//!
//! A grammar goes through four stages, each one gated by the success of the previous one:
//!
//! * `front`: input analysis (line map, character set) and syntax analysis, producing the syntax tree.
//! * `middle`: translation of the syntax tree into one opcode array per rule, followed by the reduction of redundant `ALT`, `CAT` and `REP` opcodes.
//! * `middle::analysis`: attribute analysis of the rule-reference graph (left recursion, infinite rules).
//! * `back`: generation of a Rust module describing the grammar with the types of `sabnf_runtime`.
//!
//! Errors of the first three stages are accumulated in a `Diagnostics` list owned by the `Compiler`, I/O errors of the last stage are returned immediately.

#[macro_use]
extern crate log;

pub use sabnf_runtime as runtime;

pub use crate::ast::*;
pub use crate::compiler::*;
pub use crate::diagnostic::*;
pub use crate::front::input::{Input, LineMap, Line, LineEnd};
pub use crate::middle::analysis::{AttributeCheck, Attributes, RuleAttributes, RuleLineMap, rule_attributes};
pub use crate::back::{GenerateError, Summary, generate, generate_file, output_path};
pub use crate::report::{errors_to_string, errors_to_html};

mod ast;
mod identifier;
mod diagnostic;
mod visitor;
mod report;
mod compiler;
pub mod front;
pub mod middle;
pub mod back;
