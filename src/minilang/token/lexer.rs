//! Encapsulates all behaviour necessary to turn source text into tokens.
//!
//! The [Lexer] is pull-based: a parser asks for tokens one at a time with
//! [`Lexer::next`] and looks ahead with [`Lexer::peek`]. Tokens produced for
//! a peek are parked in a small FIFO buffer and handed out by later calls to
//! `next` before any new input is read.
//!
//! ```rust
//! use mini_lang::minilang::token::lexer::Lexer;
//! use mini_lang::minilang::token::tokens::TokenKind;
//!
//! let mut lexer = Lexer::new("x1 = 42;".as_bytes(), "<doc>");
//! assert_eq!(lexer.peek(2).unwrap().map(|t| t.kind()), Some(TokenKind::Equal));
//! assert_eq!(lexer.next().unwrap().lexeme(), "x1");
//! ```

use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufReader, Bytes, Read};
use std::path::Path;
use std::rc::Rc;

use thiserror::Error;
use tracing::{debug, trace};

use crate::minilang::token::tokens::{KEYWORDS, Token, TokenKind};
use crate::minilang::types::Location;

/// Errors that can happen during lexing. All of them are fatal to the
/// current lexing attempt; no resynchronization is attempted.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LexingError {
    /// A token was required, but the input has been exhausted.
    #[error("{location}: Syntax error: Unexpected end of input")]
    UnexpectedEndOfInput {
        /// Position at which the input ended.
        location: Location,
    },
    /// A character that cannot start any token.
    #[error("{location}: Syntax error: Unrecognized character {character:?}")]
    UnrecognizedCharacter {
        /// The offending character.
        character: char,
        /// Where the character was found.
        location: Location,
    },
    /// A lone `&` or `|`; only the doubled forms are operators.
    #[error(
        "{location}: Syntax error: Unexpected character {character:?} (expected \"{character}{character}\")"
    )]
    MalformedOperator {
        /// The character that was not doubled.
        character: char,
        /// Where the lone character was found.
        location: Location,
    },
    /// Reading from the underlying input failed.
    #[error("{location}: Error reading input")]
    Input {
        /// The I/O error reported by the input.
        source: io::Error,
        /// Position of the character that could not be read.
        location: Location,
    },
}

impl LexingError {
    /// Location this error is reported at.
    #[must_use]
    pub const fn location(&self) -> &Location {
        match *self {
            LexingError::UnexpectedEndOfInput { ref location }
            | LexingError::UnrecognizedCharacter { ref location, .. }
            | LexingError::MalformedOperator { ref location, .. }
            | LexingError::Input { ref location, .. } => location,
        }
    }
}

/// Tokenizes the given source code completely into a [Vec] of [`Tokens`](Token),
/// stopping at the first [`LexingError`].
///
/// # Errors
///
/// The first error raised while lexing `source`.
pub fn tokenize<S: AsRef<str>>(source: S, source_name: &str) -> Result<Vec<Token>, LexingError> {
    Lexer::new(source.as_ref().as_bytes(), source_name).tokenize_all()
}

/// A single-pass lexer over a byte-oriented input.
///
/// The lexer exclusively owns its input; dropping the lexer, including after
/// an error, releases it.
#[derive(Debug)]
pub struct Lexer<R> {
    /// Bytes of the input, read on demand.
    input: Bytes<BufReader<R>>,
    /// Name of the input, attached to every produced location.
    source_name: Rc<str>,
    /// Line of the next unread character.
    line: usize,
    /// Column of the next unread character.
    col: usize,
    /// Column the current line started from before its newline was read,
    /// so that unreading that newline restores it.
    col_before_newline: usize,
    /// Once set, the input is never touched again.
    at_end: bool,
    /// A character handed back by [`Lexer::unread`].
    pushed_back: Option<u8>,
    /// Tokens produced for a peek, but not yet consumed.
    lookahead: VecDeque<Token>,
}

impl Lexer<File> {
    /// Opens the file at `path` for lexing, naming it by its path.
    ///
    /// # Errors
    ///
    /// If the file cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        Ok(Lexer::new(file, path.display().to_string().as_str()))
    }
}

impl<R: Read> Lexer<R> {
    /// Creates a lexer reading from `input`, reporting locations in `source_name`.
    pub fn new(input: R, source_name: &str) -> Self {
        Lexer {
            input: BufReader::new(input).bytes(),
            source_name: Rc::from(source_name),
            line: 1,
            col: 1,
            col_before_newline: 1,
            at_end: false,
            pushed_back: None,
            lookahead: VecDeque::new(),
        }
    }

    /// Returns and removes the next token.
    ///
    /// # Errors
    ///
    /// [`LexingError::UnexpectedEndOfInput`] if the input holds no further
    /// token, or any error raised while lexing it.
    #[expect(
        clippy::should_implement_trait,
        reason = "a token is mandatory here, running out is an error and not the end of an iteration."
    )]
    pub fn next(&mut self) -> Result<Token, LexingError> {
        self.fill(1)?;
        self.lookahead
            .pop_front()
            .ok_or_else(|| LexingError::UnexpectedEndOfInput {
                location: self.current_location(),
            })
    }

    /// Returns the `how_many`-th upcoming token (1 being the very next one)
    /// without consuming it.
    ///
    /// Running past the end of input is not an error here: `Ok(None)` is
    /// returned if fewer than `how_many` tokens remain, and also for `peek(0)`.
    ///
    /// # Errors
    ///
    /// Any error raised while lexing the tokens up to the requested one.
    pub fn peek(&mut self, how_many: usize) -> Result<Option<&Token>, LexingError> {
        let Some(index) = how_many.checked_sub(1) else {
            return Ok(None);
        };
        self.fill(how_many)?;
        Ok(self.lookahead.get(index))
    }

    /// The location of the next character to be read.
    #[must_use]
    pub fn current_location(&self) -> Location {
        Location::new(Rc::clone(&self.source_name), self.line, self.col)
    }

    /// Consumes the lexer, collecting every remaining token.
    ///
    /// # Errors
    ///
    /// The first error raised while lexing the remaining input.
    pub fn tokenize_all(mut self) -> Result<Vec<Token>, LexingError> {
        let mut tokens = vec![];
        while self.peek(1)?.is_some() {
            tokens.push(self.next()?);
        }
        Ok(tokens)
    }

    /// Lexes tokens until at least `how_many` are buffered, or the input ends.
    fn fill(&mut self, how_many: usize) -> Result<(), LexingError> {
        if self.lookahead.len() < how_many && !self.at_end {
            debug!(
                buffered = self.lookahead.len(),
                wanted = how_many,
                "filling lookahead"
            );
        }
        while !self.at_end && self.lookahead.len() < how_many {
            if let Some(token) = self.read_token()? {
                self.lookahead.push_back(token);
            }
        }
        Ok(())
    }

    /// Reads the next character, or `None` once the input is exhausted.
    fn read(&mut self) -> Result<Option<u8>, LexingError> {
        if self.at_end {
            return Ok(None);
        }
        let next = match self.pushed_back.take() {
            Some(byte) => Some(byte),
            None => self
                .input
                .next()
                .transpose()
                .map_err(|source| LexingError::Input {
                    source,
                    location: self.current_location(),
                })?,
        };
        match next {
            None => self.at_end = true,
            Some(b'\n') => {
                self.col_before_newline = self.col;
                self.col = 1;
                self.line = self.line.saturating_add(1);
            }
            Some(_) => self.col = self.col.saturating_add(1),
        }
        Ok(next)
    }

    /// Hands a just-read character back, undoing its effect on the position.
    fn unread(&mut self, byte: u8) {
        self.pushed_back = Some(byte);
        if byte == b'\n' {
            self.line = self.line.saturating_sub(1);
            self.col = self.col_before_newline;
        } else {
            self.col = self.col.saturating_sub(1);
        }
    }

    /// Lexes one token, or returns `None` if only whitespace remained.
    fn read_token(&mut self) -> Result<Option<Token>, LexingError> {
        let (line, col, first) = loop {
            let (line, col) = (self.line, self.col);
            match self.read()? {
                None => return Ok(None),
                Some(byte) if is_space(byte) => {}
                Some(byte) => break (line, col, byte),
            }
        };
        let start = Location::new(Rc::clone(&self.source_name), line, col);
        let mut lexeme = String::from(char::from(first));

        let kind = if first.is_ascii_alphabetic() {
            self.read_while(&mut lexeme, u8::is_ascii_alphanumeric)?;
            KEYWORDS
                .get(lexeme.as_str())
                .map_or(TokenKind::Identifier, |kw| TokenKind::Keyword(*kw))
        } else if first.is_ascii_digit() {
            self.read_while(&mut lexeme, u8::is_ascii_digit)?;
            TokenKind::IntegerLiteral
        } else {
            self.operator(first, &mut lexeme, &start)?
        };

        let token = Token::new(kind, lexeme, start);
        trace!(token = %token, "lexed token");
        Ok(Some(token))
    }

    /// Extends `lexeme` with the maximal run of characters satisfying `continues`.
    fn read_while<F>(&mut self, lexeme: &mut String, continues: F) -> Result<(), LexingError>
    where
        F: Fn(&u8) -> bool,
    {
        loop {
            match self.read()? {
                Some(byte) if continues(&byte) => lexeme.push(char::from(byte)),
                Some(byte) => {
                    self.unread(byte);
                    return Ok(());
                }
                None => return Ok(()),
            }
        }
    }

    /// Classifies an operator or punctuation character, reading a second
    /// character where the token might be a compound one.
    fn operator(
        &mut self,
        first: u8,
        lexeme: &mut String,
        start: &Location,
    ) -> Result<TokenKind, LexingError> {
        let kind = match first {
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Times,
            b'/' => TokenKind::Divide,
            b'(' => TokenKind::LeftParen,
            b')' => TokenKind::RightParen,
            b';' => TokenKind::Semicolon,

            b'&' | b'|' => {
                if !self.next_is(first, lexeme)? {
                    return Err(LexingError::MalformedOperator {
                        character: char::from(first),
                        location: start.clone(),
                    });
                }
                if first == b'&' {
                    TokenKind::DoubleAmpersand
                } else {
                    TokenKind::DoublePipe
                }
            }

            b'=' if self.next_is(b'=', lexeme)? => TokenKind::DoubleEqual,
            b'=' => TokenKind::Equal,
            b'<' if self.next_is(b'=', lexeme)? => TokenKind::LessEqual,
            b'<' => TokenKind::Less,
            b'>' if self.next_is(b'=', lexeme)? => TokenKind::GreaterEqual,
            b'>' => TokenKind::Greater,
            b'!' if self.next_is(b'=', lexeme)? => TokenKind::NotEqual,
            b'!' => TokenKind::Exclamation,

            _ => {
                let character = if first.is_ascii() {
                    char::from(first)
                } else {
                    self.decode_multibyte(first)?
                };
                return Err(LexingError::UnrecognizedCharacter {
                    character,
                    location: start.clone(),
                });
            }
        };
        Ok(kind)
    }

    /// Reads the rest of the UTF-8 sequence started by `lead`, so that errors
    /// can name the character as written. Malformed sequences decode to
    /// [`char::REPLACEMENT_CHARACTER`].
    fn decode_multibyte(&mut self, lead: u8) -> Result<char, LexingError> {
        let width = match lead {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => return Ok(char::REPLACEMENT_CHARACTER),
        };
        let mut encoded = vec![lead];
        while encoded.len() < width {
            match self.read()? {
                Some(byte @ 0x80..=0xBF) => encoded.push(byte),
                Some(byte) => {
                    self.unread(byte);
                    break;
                }
                None => break,
            }
        }
        Ok(core::str::from_utf8(&encoded)
            .ok()
            .and_then(|decoded| decoded.chars().next())
            .unwrap_or(char::REPLACEMENT_CHARACTER))
    }

    /// Consumes the next character into `lexeme` only if it is exactly
    /// `expected`; any other character is handed back.
    fn next_is(&mut self, expected: u8, lexeme: &mut String) -> Result<bool, LexingError> {
        match self.read()? {
            Some(byte) if byte == expected => {
                lexeme.push(char::from(byte));
                Ok(true)
            }
            Some(byte) => {
                self.unread(byte);
                Ok(false)
            }
            None => Ok(false),
        }
    }
}

/// Whitespace as C's `isspace` sees it, which includes vertical tab and form feed.
#[inline]
const fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\x0B' | b'\x0C' | b'\r')
}
