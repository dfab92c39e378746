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

//! Text and HTML renderings of the diagnostics of a compilation.

use crate::diagnostic::Diagnostic;
use crate::front::input::Input;

/// `title` followed by one `error: i: line: l: char: c: msg: m` line per diagnostic.
pub fn errors_to_string(title: &str, errors: &[Diagnostic]) -> String {
  let mut text = format!("{}\n", title);
  for (i, error) in errors.iter().enumerate() {
    text.push_str(&format!("error: {}: {}\n", i, error));
  }
  text
}

/// An `<h3>` title and a table with, for each diagnostic, its line number, the source line with the offending character highlighted and the message.
pub fn errors_to_html(title: &str, input: &Input, errors: &[Diagnostic]) -> String {
  let mut html = format!("<h3>{}</h3>\n", escape(title));
  html.push_str("<table class=\"sabnf-errors\">\n");
  html.push_str("<tr><th>line</th><th>source</th><th>message</th></tr>\n");
  for error in errors {
    html.push_str(&format!("<tr><td>{}</td><td><code>{}</code></td><td>{}</td></tr>\n",
      error.line, highlighted_line(input, error), escape(&error.msg)));
  }
  html.push_str("</table>\n");
  html
}

/// The escaped text of the line of `error`, empty for a global error.
fn highlighted_line(input: &Input, error: &Diagnostic) -> String {
  let line = match error.line.checked_sub(1).and_then(|index| input.lines().lines().get(index)) {
    Some(line) => line,
    None => return String::new()
  };
  let text = line.text(input.source());
  let column = error.char.saturating_sub(line.begin_char);
  let mut html = String::new();
  for (i, c) in text.char_indices() {
    if i == column {
      html.push_str(&format!("<span class=\"sabnf-error\">{}</span>", escape_char(c)));
    }
    else {
      html.push_str(&escape_char(c));
    }
  }
  // Errors at the line end, e.g. a missing CRLF.
  if column >= text.len() {
    html.push_str("<span class=\"sabnf-error\">&#9166;</span>");
  }
  html
}

fn escape(text: &str) -> String {
  text.chars().map(escape_char).collect()
}

fn escape_char(c: char) -> String {
  match c {
    '&' => String::from("&amp;"),
    '<' => String::from("&lt;"),
    '>' => String::from("&gt;"),
    '"' => String::from("&quot;"),
    '\'' => String::from("&#39;"),
    '\t' => String::from("&nbsp;&nbsp;"),
    c => c.to_string()
  }
}
