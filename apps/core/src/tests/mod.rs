//! Test Module
//!
//! Cross-module tests for the evaluator.
//!
//! ## Test Categories
//! - `controller_tests`: submit flow, busy guard, notifications, result retention
//! - `integration_tests`: controller + Gemini client against a mock HTTP server, CLI output

pub mod integration_tests;
