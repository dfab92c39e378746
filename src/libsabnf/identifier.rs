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

pub use sabnf_runtime::fold_case;

use std::collections::HashSet;

pub trait ItemIdent
{
  fn ident(&self) -> &str;

  fn lower(&self) -> String {
    fold_case(self.ident())
  }
}

/// `u_name` and `e_name` reference user-defined terminals.
pub fn is_udt_name(name: &str) -> bool {
  let lower = fold_case(name);
  (lower.starts_with("u_") || lower.starts_with("e_")) && lower.len() > 2
}

/// Rust enumeration variant for a grammar name: `rule-name` becomes `RuleName`. Names already in `taken` get a numeric suffix.
pub fn variant_name(name: &str, taken: &mut HashSet<String>) -> String {
  let mut base = String::with_capacity(name.len());
  let mut upper_next = true;
  for c in name.chars() {
    if c == '-' || c == '_' {
      upper_next = true;
    }
    else if upper_next {
      base.push(c.to_ascii_uppercase());
      upper_next = false;
    }
    else {
      base.push(c.to_ascii_lowercase());
    }
  }
  if base.is_empty() || base.starts_with(|c: char| c.is_ascii_digit()) {
    base.insert(0, 'R');
  }
  if base == "Self" {
    base.push('_');
  }
  let mut variant = base.clone();
  let mut suffix = 1;
  while taken.contains(&variant) {
    suffix += 1;
    variant = format!("{}{}", base, suffix);
  }
  taken.insert(variant.clone());
  variant
}
