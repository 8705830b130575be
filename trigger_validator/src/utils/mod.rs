//! Shared utilities for the expression lexer and validator

pub mod span;

pub use span::Span;
