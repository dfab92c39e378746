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

//! Generates a Rust module describing the grammar with the types of `sabnf_runtime`: the `RuleId` and `UdtId` enumerations, a `callbacks` constructor returning a disabled callback table and a `grammar` function building the rules, the UDTs and their opcodes. The summary of the grammar is written at the top of the module and the grammar source at the bottom, both as comments.

use crate::ast::*;
use crate::back::code_printer::*;
use crate::back::summary::Summary;
use crate::front::input::Input;
use proc_macro2::{Ident, Literal, Span as RSpan, TokenStream};
use quote::quote;
use std::collections::HashSet;

pub struct CodeGenerator<'a>
{
  grammar: &'a Grammar,
  input: &'a Input,
  printer: CodePrinter,
  rule_variants: Vec<Ident>,
  udt_variants: Vec<Ident>
}

pub fn generate_code(grammar: &Grammar, input: &Input, summary: &Summary) -> String {
  CodeGenerator::new(grammar, input).compile(summary)
}

fn variants<'b, I>(names: I) -> Vec<Ident> where
 I: Iterator<Item=&'b String>
{
  let mut taken = HashSet::new();
  names
    .map(|name| Ident::new(&variant_name(name, &mut taken), RSpan::call_site()))
    .collect()
}

fn usize_lit(n: usize) -> Literal {
  Literal::usize_unsuffixed(n)
}

fn u32_lits(string: &[u32]) -> Vec<Literal> {
  string.iter().cloned().map(Literal::u32_unsuffixed).collect()
}

impl<'a> CodeGenerator<'a>
{
  fn new(grammar: &'a Grammar, input: &'a Input) -> CodeGenerator<'a> {
    CodeGenerator {
      grammar: grammar,
      input: input,
      printer: CodePrinter::new(),
      rule_variants: variants(grammar.rules.iter().map(|r| &r.name)),
      udt_variants: variants(grammar.udts.iter().map(|u| &u.name))
    }
  }

  fn compile(mut self, summary: &Summary) -> String {
    self.compile_summary(summary);
    self.compile_imports();
    let grammar = self.grammar;
    let rule_variants = self.rule_variants.clone();
    let udt_variants = self.udt_variants.clone();
    self.compile_identifier("RuleId", "rules",
      rule_variants, grammar.rules.iter().map(|r| r.lower.clone()).collect());
    self.compile_identifier("UdtId", "user-defined terminals",
      udt_variants, grammar.udts.iter().map(|u| u.lower.clone()).collect());
    self.compile_callbacks();
    self.compile_grammar();
    self.compile_input_echo();
    self.printer.finish()
  }

  fn compile_summary(&mut self, summary: &Summary) {
    self.printer.comment("SUMMARY");
    for line in summary.lines() {
      self.printer.comment(&line);
    }
    self.printer.comment("");
    self.printer.comment("CALLBACK NAMES");
    for name in summary.rule_names.iter().chain(summary.udt_names.iter()) {
      self.printer.comment(&format!("    {}", name));
    }
    self.printer.blank();
  }

  fn compile_imports(&mut self) {
    let mut types = vec![
      quote!(Callbacks), quote!(Grammar), quote!(Identifier), quote!(Opcode), quote!(Rule)
    ];
    if !self.grammar.udts.is_empty() {
      types.push(quote!(Udt));
    }
    self.printer.tokens(quote!(use sabnf_runtime::{#(#types),*};));
    self.printer.blank();
  }

  fn compile_identifier(&mut self, enum_name: &str, what: &str, variants: Vec<Ident>, lowers: Vec<String>) {
    let enum_ident = Ident::new(enum_name, RSpan::call_site());
    self.printer.line(&format!("/// Identifiers of the {} of the grammar.", what));
    self.printer.tokens(quote!(#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]));
    if variants.is_empty() {
      self.printer.tokens(quote!(pub enum #enum_ident {}));
    }
    else {
      self.printer.open(&format!("pub enum {} {{", enum_name));
      for variant in &variants {
        self.printer.tokens(quote!(#variant,));
      }
      self.printer.close("}");
    }
    self.printer.blank();
    self.printer.open(&format!("impl Identifier for {} {{", enum_name));
    let indices: Vec<_> = (0..variants.len()).map(|i| {
      let index = usize_lit(i);
      quote!(#index)
    }).collect();
    self.compile_match(quote!(fn index(self) -> usize), &enum_ident, &variants, indices);
    self.printer.blank();
    let lowers: Vec<_> = lowers.iter().map(|lower| {
      let lower = Literal::string(lower);
      quote!(#lower)
    }).collect();
    self.compile_match(quote!(fn lower(self) -> &'static str), &enum_ident, &variants, lowers);
    self.printer.close("}");
    self.printer.blank();
  }

  fn compile_match(&mut self, signature: TokenStream, enum_ident: &Ident, variants: &[Ident], values: Vec<TokenStream>) {
    self.printer.open(&format!("{} {{", render(signature)));
    if variants.is_empty() {
      self.printer.tokens(quote!(match self {}));
    }
    else {
      self.printer.open("match self {");
      for (variant, value) in variants.iter().zip(values.into_iter()) {
        self.printer.tokens(quote!(#enum_ident::#variant => #value,));
      }
      self.printer.close("}");
    }
    self.printer.close("}");
  }

  fn compile_callbacks(&mut self) {
    let rules = usize_lit(self.grammar.rules.len());
    let udts = usize_lit(self.grammar.udts.len());
    self.printer.line("/// One disabled callback per rule and per user-defined terminal.");
    let signature = render(quote!(pub fn callbacks<H>() -> Callbacks<RuleId, UdtId, H>));
    self.printer.open(&format!("{} {{", signature));
    self.printer.tokens(quote!(Callbacks::disabled(#rules, #udts)));
    self.printer.close("}");
    self.printer.blank();
  }

  fn compile_grammar(&mut self) {
    let grammar = self.grammar;
    self.printer.open("pub fn grammar() -> Grammar {");
    self.printer.open("let rules = vec![");
    for rule in &grammar.rules {
      self.compile_rule(rule);
    }
    self.printer.close("];");
    if grammar.udts.is_empty() {
      self.printer.tokens(quote!(let udts = vec![];));
    }
    else {
      self.printer.open("let udts = vec![");
      for udt in &grammar.udts {
        let name = Literal::string(&udt.name);
        let lower = Literal::string(&udt.lower);
        let empty = udt.empty;
        let index = usize_lit(udt.index);
        self.printer.tokens(quote!(
          Udt { name: String::from(#name), lower: String::from(#lower), empty: #empty, index: #index },
        ));
      }
      self.printer.close("];");
    }
    self.printer.tokens(quote!(Grammar { rules, udts }));
    self.printer.close("}");
  }

  fn compile_rule(&mut self, rule: &Rule) {
    let name = Literal::string(&rule.name);
    let lower = Literal::string(&rule.lower);
    let index = usize_lit(rule.index);
    self.printer.open("Rule {");
    self.printer.tokens(quote!(name: String::from(#name),));
    self.printer.tokens(quote!(lower: String::from(#lower),));
    self.printer.tokens(quote!(index: #index,));
    self.printer.open("opcodes: vec![");
    for op in &rule.opcodes {
      let tokens = self.compile_opcode(op);
      let comment = self.opcode_comment(op);
      self.printer.tokens_with_comment(tokens, &comment);
    }
    self.printer.close("],");
    self.printer.close("},");
  }

  fn compile_opcode(&self, op: &Opcode) -> TokenStream {
    match op {
      Opcode::Alt { children } => {
        let children = children.iter().cloned().map(usize_lit);
        quote!(Opcode::Alt { children: vec![#(#children),*] },)
      }
      Opcode::Cat { children } => {
        let children = children.iter().cloned().map(usize_lit);
        quote!(Opcode::Cat { children: vec![#(#children),*] },)
      }
      &Opcode::Rnm { index } => {
        let index = usize_lit(index);
        quote!(Opcode::Rnm { index: #index },)
      }
      &Opcode::Udt { index, empty } => {
        let index = usize_lit(index);
        quote!(Opcode::Udt { index: #index, empty: #empty },)
      }
      &Opcode::Rep { min, max } => {
        let min = usize_lit(min);
        let max = match max {
          Some(max) => {
            let max = usize_lit(max);
            quote!(Some(#max))
          }
          None => quote!(None)
        };
        quote!(Opcode::Rep { min: #min, max: #max },)
      }
      Opcode::And => quote!(Opcode::And,),
      Opcode::Not => quote!(Opcode::Not,),
      Opcode::Tls { string } => {
        let string = u32_lits(string);
        quote!(Opcode::Tls { string: vec![#(#string),*] },)
      }
      Opcode::Tbs { string } => {
        let string = u32_lits(string);
        quote!(Opcode::Tbs { string: vec![#(#string),*] },)
      }
      &Opcode::Trg { min, max } => {
        let min = Literal::u32_unsuffixed(min);
        let max = Literal::u32_unsuffixed(max);
        quote!(Opcode::Trg { min: #min, max: #max },)
      }
    }
  }

  /// `RNM(name)` and `UDT(name)` name their target, other opcodes only their kind.
  fn opcode_comment(&self, op: &Opcode) -> String {
    match op {
      &Opcode::Rnm { index } => {
        let name = self.grammar.rules.get(index).map_or("?", |r| r.name.as_str());
        format!("{}({})", op.kind(), name)
      }
      &Opcode::Udt { index, .. } => {
        let name = self.grammar.udts.get(index).map_or("?", |u| u.name.as_str());
        format!("{}({})", op.kind(), name)
      }
      _ => op.kind().to_string()
    }
  }

  fn compile_input_echo(&mut self) {
    self.printer.blank();
    self.printer.comment("INPUT GRAMMAR FILE(s)");
    self.printer.comment("");
    let input = self.input;
    for index in 0..input.lines().len() {
      self.printer.comment(input.line_text(index));
    }
  }
}
