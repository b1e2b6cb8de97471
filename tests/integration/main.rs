//! Integration tests for cuemark.

mod cli_test;
mod document_test;
mod helpers;
