//! This is the Lexing or Tokenization module, split into two submodules.
//!
//! - [tokens] specifies the data types making up the tokens of the language.
//! - [lexer] contains the code for tokenizing source code, alongside with the error
//!   definitions that can occur during this phase.
pub mod lexer;
pub mod tokens;
