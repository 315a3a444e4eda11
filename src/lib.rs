//! # mini-lang - front-end of a small expression and statement language
//!
//! The language has integer literals, variables, the arithmetic operators
//! `+ - * /`, comparisons, the logical operators `&& || !`, parentheses and
//! `;`-terminated statements, plus a handful of keywords (`var`, `function`,
//! `if`, `else`, `while`).
//!
//! This crate provides the two pieces every later phase builds on:
//!
//! - The [lexer](minilang::token::lexer), a pull-based tokenizer with a
//!   bounded lookahead buffer that tracks a [`Location`](minilang::types::Location)
//!   for every token.
//! - The [environment](minilang::environment), a chain of lexically nested
//!   scopes that an evaluator defines, reads and assigns variables through.
//!
//! Both report failures as values carrying the source name, line and column,
//! and never attempt recovery: the first error ends the current attempt.
#![deny(
    future_incompatible,
    keyword_idents,
    let_underscore,
    nonstandard_style,
)]
#![deny(
    clippy::all,
    clippy::pedantic,
)]
#![deny(
    clippy::absolute_paths,
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::as_conversions,
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::default_numeric_fallback,
    clippy::else_if_without_else,
    clippy::empty_structs_with_brackets,
    clippy::exhaustive_enums,
    clippy::exhaustive_structs,
    clippy::exit,
    clippy::get_unwrap,
    clippy::if_then_some_else_none,
    clippy::impl_trait_in_params,
    clippy::indexing_slicing,
    clippy::let_underscore_must_use,
    clippy::let_underscore_untyped,
    clippy::map_err_ignore,
    clippy::missing_docs_in_private_items,
    clippy::mixed_read_write_in_expression,
    clippy::panic,
    clippy::panic_in_result_fn,
    clippy::pattern_type_mismatch,
    clippy::rc_buffer,
    clippy::redundant_type_annotations,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::same_name_method,
    clippy::semicolon_inside_block,
    clippy::std_instead_of_core,
    clippy::str_to_string,
    clippy::string_add,
    clippy::string_slice,
    clippy::tests_outside_test_module,
    clippy::todo,
    clippy::try_err,
    clippy::unimplemented,
    clippy::unreachable,
    clippy::unwrap_in_result,
    clippy::unwrap_used,
    clippy::verbose_file_reads,
    clippy::wildcard_enum_match_arm
)]
#![warn(unused)]
pub mod minilang;
