//! Tests for the coordinate module

#[cfg(test)]
mod unit_tests;
#[cfg(test)]
mod distance_tests;
