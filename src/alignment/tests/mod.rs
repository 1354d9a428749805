//! Tests for the alignment module

#[cfg(test)]
mod chainage_tests;
