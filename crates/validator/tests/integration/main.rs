//! Integration tests for dtokit-validator.

mod common;
mod enums;
mod executor;
mod object;
