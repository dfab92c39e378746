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

//! Layout of the generated module. Balanced fragments (one opcode, one match arm) are built with `quote!` and rendered on a single line by `render`, the enclosing blocks are written line by line by `CodePrinter`.

use crate::ast::*;
use crate::back::summary::Summary;
use proc_macro2::{Delimiter, Spacing, TokenStream, TokenTree};

const INDENT: &str = "    ";

pub fn print_code(print_code: PrintLevel, summary: &Summary, code: &str) {
  if print_code.debug() {
    debug!("generated module:\n{}", code);
  }
  else if print_code.show() {
    info!("generated module summary:\n{}", summary);
  }
}

#[derive(Default)]
pub struct CodePrinter
{
  code: String,
  indent: usize
}

impl CodePrinter
{
  pub fn new() -> CodePrinter {
    CodePrinter::default()
  }

  pub fn line(&mut self, text: &str) {
    if !text.is_empty() {
      for _ in 0..self.indent {
        self.code.push_str(INDENT);
      }
      self.code.push_str(text);
    }
    self.code.push('\n');
  }

  pub fn blank(&mut self) {
    self.line("");
  }

  pub fn comment(&mut self, text: &str) {
    if text.is_empty() {
      self.line("//");
    } else {
      self.line(&format!("// {}", text));
    }
  }

  pub fn tokens(&mut self, tokens: TokenStream) {
    self.line(&render(tokens));
  }

  pub fn tokens_with_comment(&mut self, tokens: TokenStream, comment: &str) {
    self.line(&format!("{} // {}", render(tokens), comment));
  }

  /// Writes `text` and indents the following lines.
  pub fn open(&mut self, text: &str) {
    self.line(text);
    self.indent += 1;
  }

  pub fn close(&mut self, text: &str) {
    self.indent = self.indent.saturating_sub(1);
    self.line(text);
  }

  pub fn finish(self) -> String {
    self.code
  }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Prev
{
  /// Start of a group or after a separator that already wrote its space.
  Open,
  /// Identifier, literal or closed group.
  Word,
  /// `::`, `!`, `&`, `#`, `.`, `'` and `<`, glued to what follows.
  Tight
}

/// Renders `tokens` on one line with the spacing of hand-written Rust.
pub fn render(tokens: TokenStream) -> String {
  let mut out = String::new();
  render_into(&mut out, tokens);
  out.trim_end().to_string()
}

fn render_into(out: &mut String, tokens: TokenStream) {
  let mut prev = Prev::Open;
  let mut iter = tokens.into_iter().peekable();
  while let Some(token) = iter.next() {
    match token {
      TokenTree::Ident(ident) => {
        word(out, prev, &ident.to_string());
        prev = Prev::Word;
      }
      TokenTree::Literal(literal) => {
        word(out, prev, &literal.to_string());
        prev = Prev::Word;
      }
      TokenTree::Group(group) => {
        let inner = render(group.stream());
        match group.delimiter() {
          Delimiter::Parenthesis => out.push_str(&format!("({})", inner)),
          Delimiter::Bracket => out.push_str(&format!("[{}]", inner)),
          Delimiter::Brace => {
            if prev == Prev::Word {
              out.push(' ');
            }
            if inner.is_empty() {
              out.push_str("{}");
            } else if prev == Prev::Tight {
              out.push_str(&format!("{{{}}}", inner));
            } else {
              out.push_str(&format!("{{ {} }}", inner));
            }
          }
          Delimiter::None => word(out, prev, &inner)
        }
        prev = Prev::Word;
      }
      TokenTree::Punct(punct) => {
        let mut op = punct.as_char().to_string();
        let mut spacing = punct.spacing();
        while spacing == Spacing::Joint {
          match iter.peek() {
            Some(TokenTree::Punct(next)) => {
              op.push(next.as_char());
              spacing = next.spacing();
              iter.next();
            }
            _ => break
          }
        }
        prev = operator(out, prev, &op);
      }
    }
  }
}

fn word(out: &mut String, prev: Prev, text: &str) {
  if prev == Prev::Word {
    out.push(' ');
  }
  out.push_str(text);
}

fn operator(out: &mut String, prev: Prev, op: &str) -> Prev {
  match op {
    "::" | "!" | "&" | "&'" | "#" | "." | "'" | "<" => {
      out.push_str(op);
      Prev::Tight
    }
    ">" => {
      out.push_str(op);
      Prev::Word
    }
    "," | ":" | ";" => {
      out.push_str(op);
      out.push(' ');
      Prev::Open
    }
    _ => {
      if prev != Prev::Open && !out.ends_with(' ') {
        out.push(' ');
      }
      out.push_str(op);
      out.push(' ');
      Prev::Open
    }
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use proc_macro2::Literal;
  use quote::quote;

  #[test]
  fn test_render_fragments() {
    let children: Vec<_> = vec![1usize, 2].into_iter().map(Literal::usize_unsuffixed).collect();
    assert_eq!(render(quote!(Opcode::Alt { children: vec![#(#children),*] },)),
      "Opcode::Alt { children: vec![1, 2] },");
    assert_eq!(render(quote!(Opcode::Rep { min: 0, max: None },)),
      "Opcode::Rep { min: 0, max: None },");
    assert_eq!(render(quote!(Opcode::Tbs { string: vec![] },)), "Opcode::Tbs { string: vec![] },");
    assert_eq!(render(quote!(RuleId::Expr => "expr",)), "RuleId::Expr => \"expr\",");
    assert_eq!(render(quote!(#[derive(Clone, Copy)])), "#[derive(Clone, Copy)]");
    assert_eq!(render(quote!(pub fn callbacks<H>() -> Callbacks<RuleId, UdtId, H>)),
      "pub fn callbacks<H>() -> Callbacks<RuleId, UdtId, H>");
    assert_eq!(render(quote!(fn lower(self) -> &'static str)), "fn lower(self) -> &'static str");
    assert_eq!(render(quote!(Grammar { rules, udts })), "Grammar { rules, udts }");
    assert_eq!(render(quote!(use sabnf_runtime::{Grammar, Rule};)), "use sabnf_runtime::{Grammar, Rule};");
  }

  #[test]
  fn test_printer_indentation() {
    let mut printer = CodePrinter::new();
    printer.open("fn f() {");
    printer.tokens_with_comment(quote!(Opcode::And,), "AND");
    printer.blank();
    printer.comment("");
    printer.close("}");
    assert_eq!(printer.finish(), "fn f() {\n    Opcode::And, // AND\n\n    //\n}\n");
  }
}
