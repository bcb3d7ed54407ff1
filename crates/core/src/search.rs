// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Cache search: case-insensitive name/SKU patterns plus exact field filters.

use regex::{Regex, RegexBuilder};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::payload::{first_variation_sku, item_name, FieldPath};

/// Search criteria for the cache store.
///
/// Name and SKU patterns are regular expressions matched case-insensitively
/// anywhere in the value. When both are given a record matches if either
/// does. Filters require the value at a field path to equal the given JSON
/// value exactly; all filters must hold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQuery {
    pub name_pattern: Option<String>,
    pub sku_pattern: Option<String>,
    pub filters: Vec<(FieldPath, Value)>,
}

impl SearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, pattern: impl Into<String>) -> Self {
        self.name_pattern = Some(pattern.into());
        self
    }

    pub fn sku(mut self, pattern: impl Into<String>) -> Self {
        self.sku_pattern = Some(pattern.into());
        self
    }

    pub fn filter(mut self, path: FieldPath, value: Value) -> Self {
        self.filters.push((path, value));
        self
    }

    /// Compile the patterns. Fails on an invalid regular expression.
    pub fn compile(&self) -> Result<Matcher<'_>> {
        Ok(Matcher {
            name: self.name_pattern.as_deref().map(compile_pattern).transpose()?,
            sku: self.sku_pattern.as_deref().map(compile_pattern).transpose()?,
            filters: &self.filters,
        })
    }
}

fn compile_pattern(pattern: &str) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| Error::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })
}

/// A compiled [`SearchQuery`].
#[derive(Debug)]
pub struct Matcher<'a> {
    name: Option<Regex>,
    sku: Option<Regex>,
    filters: &'a [(FieldPath, Value)],
}

impl Matcher<'_> {
    /// Returns true if the payload satisfies the query.
    pub fn matches(&self, payload: &Value) -> bool {
        let name_hit = self
            .name
            .as_ref()
            .map(|re| item_name(payload).is_some_and(|n| re.is_match(n)));
        let sku_hit = self
            .sku
            .as_ref()
            .map(|re| first_variation_sku(payload).is_some_and(|s| re.is_match(s)));

        let pattern_ok = match (name_hit, sku_hit) {
            (None, None) => true,
            (Some(a), None) | (None, Some(a)) => a,
            (Some(a), Some(b)) => a || b,
        };

        pattern_ok
            && self
                .filters
                .iter()
                .all(|(path, expected)| path.lookup(payload) == Some(expected))
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
