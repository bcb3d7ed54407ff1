// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal color utilities for help and table output.
//!
//! `NO_COLOR=1` disables colors; otherwise they are used only on a TTY.

use std::io::IsTerminal;

use crate::env;

/// ANSI 256-color codes
pub mod codes {
    /// Section headers: pastel cyan/steel blue
    pub const HEADER: u8 = 74;
    /// Commands/literals: light grey
    pub const LITERAL: u8 = 250;
    /// Secondary values: medium grey
    pub const CONTEXT: u8 = 245;
}

/// Check if colors should be enabled based on TTY and environment variables.
pub fn should_colorize() -> bool {
    if env::no_color() {
        return false;
    }
    std::io::stdout().is_terminal()
}

fn paint(code: u8, text: &str) -> String {
    format!("\x1b[38;5;{code}m{text}\x1b[0m")
}

/// Apply header color to text when colors are enabled.
pub fn header(text: &str) -> String {
    if should_colorize() {
        paint(codes::HEADER, text)
    } else {
        text.to_string()
    }
}

/// Apply context color to text when colors are enabled.
pub fn context(text: &str) -> String {
    if should_colorize() {
        paint(codes::CONTEXT, text)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
#[path = "colors_tests.rs"]
mod tests;
