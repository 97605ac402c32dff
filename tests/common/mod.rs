//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod builders;

/// Index of the first script line containing `needle`.
pub fn line_of(script: &str, needle: &str) -> usize {
    script
        .lines()
        .position(|line| line.contains(needle))
        .unwrap_or_else(|| panic!("no line containing {:?} in:\n{}", needle, script))
}

/// Variable assigned on the first line containing `needle`.
pub fn assigned_var(script: &str, needle: &str) -> String {
    let line = script.lines().nth(line_of(script, needle)).unwrap_or_default();
    line.split(" = ")
        .next()
        .unwrap_or_default()
        .to_string()
}
