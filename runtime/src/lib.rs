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

//! This is the data model shared by the `sabnf` grammar compiler and the modules it generates.
//!
//! A compiled grammar is a table of rules and a table of user-defined terminals (UDT). Each rule owns a flat array of opcodes where structural edges are indices into that same array. A generated module exposes a `grammar()` function building a `Grammar`, and a `callbacks()` function building a `Callbacks` table keyed by the generated `RuleId` and `UdtId` enumerations.
//!
//! This crate does not match input against a grammar, it only describes what a matching engine consumes.

pub use opcode::*;
pub use grammar::*;
pub use callbacks::*;

mod opcode;
mod grammar;
mod callbacks;
