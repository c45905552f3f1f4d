//! Lexer for Vela source code.
//!
//! Tokens are scanned on demand from a [`CharacterSource`]; the parser pulls
//! one token at a time with [`Lexer::advance`]. The lexer buffers exactly
//! one character of lookahead and supports save/replay bookmarking so the
//! parser can speculate over a span of tokens and fall back to it.
//!
//! # States
//!
//! ```text
//! Uninitialized ──initialize──▶ Running ◀──────────────┐
//!       │                        │  ▲                  │
//!       │ advance (misuse)       │  │ clear_bookmark   │ queue drained
//!       ▼                        ▼  │                  │
//!     Error                  Recording ──load_bookmark──▶ Restoring
//! ```
//!
//! `End` and `Error` are terminal for forward scanning: every later
//! `advance` repeats `EndOfSource`/`Illegal` without consuming input.

use std::collections::VecDeque;

use crate::ast::SourceLocation;
use crate::chars;
use crate::source::CharacterSource;
use crate::token::TokenKind;

/// Lexer state; exactly one holds at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexerState {
    Uninitialized,
    Running,
    Recording,
    Restoring,
    End,
    Error,
}

/// Streaming lexer with single-buffered bookmark support.
pub struct Lexer<S> {
    source: Option<S>,
    state: LexerState,
    /// One character of lookahead; `None` is the end-of-source sentinel.
    peek: Option<char>,
    /// Decoded text of the most recently returned token, or the error
    /// message once the lexer is in the `Error` state.
    literal: String,
    /// Tokens recorded while `Recording`, replayed in order while
    /// `Restoring`. At most one bookmark cycle is active at a time.
    records: VecDeque<(TokenKind, String, SourceLocation)>,
    line: u32,
    column: u32,
    token_location: SourceLocation,
}

impl<S: CharacterSource> Lexer<S> {
    /// Creates an uninitialized lexer; [`Lexer::initialize`] must be called
    /// exactly once before [`Lexer::advance`].
    pub fn new() -> Self {
        Self {
            source: None,
            state: LexerState::Uninitialized,
            peek: None,
            literal: String::new(),
            records: VecDeque::new(),
            line: 1,
            column: 1,
            token_location: SourceLocation::default(),
        }
    }

    /// Creates a lexer already bound to `source`.
    pub fn with_source(source: S) -> Self {
        let mut lexer = Self::new();
        lexer.initialize(source);
        lexer
    }

    /// Binds the character source and primes one character of lookahead.
    pub fn initialize(&mut self, mut source: S) {
        self.peek = source.advance();
        self.source = Some(source);
        self.state = LexerState::Running;
        self.line = 1;
        self.column = 1;
    }

    pub fn state(&self) -> LexerState {
        self.state
    }

    /// Decoded text of the most recently returned token; valid immediately
    /// after [`Lexer::advance`]. Holds the error message after a scan error.
    pub fn token_literal(&self) -> &str {
        &self.literal
    }

    /// Source position where the most recently returned token starts.
    pub fn token_location(&self) -> SourceLocation {
        self.token_location
    }

    /// Produces the next token, dispatching on the current state.
    pub fn advance(&mut self) -> TokenKind {
        match self.state {
            LexerState::Uninitialized => {
                self.report_error("the lexer has not been initialized")
            }
            LexerState::Running => self.scan(),
            LexerState::Recording => {
                let token = self.scan();
                self.records.push_back((
                    token,
                    self.literal.clone(),
                    self.token_location,
                ));
                token
            }
            LexerState::Restoring => match self.records.pop_front() {
                Some((token, literal, location)) => {
                    self.literal = literal;
                    self.token_location = location;
                    if self.records.is_empty() {
                        self.state = LexerState::Running;
                    }
                    token
                }
                // Nothing was recorded before the rollback; resume live.
                None => {
                    self.state = LexerState::Running;
                    self.scan()
                }
            },
            LexerState::End => TokenKind::EndOfSource,
            LexerState::Error => TokenKind::Illegal,
        }
    }

    /// Starts recording tokens for a later replay. Any stale queue content
    /// from a previous bookmark is discarded; nesting is unsupported.
    pub fn save_bookmark(&mut self) {
        self.records.clear();
        self.state = LexerState::Recording;
    }

    /// Replays the tokens recorded since the matching
    /// [`Lexer::save_bookmark`], in order, before resuming live scanning.
    pub fn load_bookmark(&mut self) {
        self.state = LexerState::Restoring;
    }

    /// Discards the recorded tokens and resumes live scanning, committing
    /// to everything consumed while recording.
    pub fn clear_bookmark(&mut self) {
        self.records.clear();
        self.state = LexerState::Running;
    }

    // ===== Character handling =====

    /// Consumes and returns the lookahead character, refilling it from the
    /// source and tracking line/column.
    fn next(&mut self) -> Option<char> {
        let current = self.peek;
        self.peek = match self.source.as_mut() {
            Some(source) => source.advance(),
            None => None,
        };
        match current {
            Some(ch) if chars::is_line_terminator(ch) => {
                self.line += 1;
                self.column = 1;
            }
            Some(_) => self.column += 1,
            None => {}
        }
        current
    }

    /// Consumes the lookahead character only if it equals `expected`.
    fn matches(&mut self, expected: char) -> bool {
        if self.peek == Some(expected) {
            self.next();
            true
        } else {
            false
        }
    }

    /// Records a lexical error: the message replaces the literal text and
    /// every subsequent `advance` yields `Illegal`.
    fn report_error(&mut self, message: &str) -> TokenKind {
        self.state = LexerState::Error;
        self.literal.clear();
        self.literal.push_str(message);
        TokenKind::Illegal
    }

    // ===== Scanning =====

    /// One scan step: skips whitespace and comments, then classifies the
    /// next run of characters into a token.
    fn scan(&mut self) -> TokenKind {
        self.literal.clear();
        loop {
            self.token_location = SourceLocation::new(self.line, self.column);
            let ch = match self.next() {
                Some(ch) => ch,
                None => {
                    self.state = LexerState::End;
                    return TokenKind::EndOfSource;
                }
            };
            match ch {
                ' ' | '\t' | '\r' | '\n' => continue,
                '(' => return TokenKind::LeftParenthesis,
                ')' => return TokenKind::RightParenthesis,
                '[' => return TokenKind::LeftBracket,
                ']' => return TokenKind::RightBracket,
                '{' => return TokenKind::LeftBrace,
                '}' => return TokenKind::RightBrace,
                ':' => return TokenKind::Colon,
                ';' => return TokenKind::Semicolon,
                '~' => return TokenKind::BitwiseNot,
                '?' => return TokenKind::Conditional,
                ',' => return TokenKind::Comma,
                '.' => {
                    // . ...  (two dots is malformed)
                    if self.matches('.') {
                        if self.matches('.') {
                            return TokenKind::Ellipsis;
                        }
                        return self.report_error("malformed ellipsis");
                    }
                    return TokenKind::Period;
                }
                '&' => {
                    // & && &=
                    if self.matches('&') {
                        return TokenKind::LogicalAnd;
                    } else if self.matches('=') {
                        return TokenKind::AssignmentBitwiseAnd;
                    }
                    return TokenKind::BitwiseAnd;
                }
                '|' => {
                    // | || |=
                    if self.matches('|') {
                        return TokenKind::LogicalOr;
                    } else if self.matches('=') {
                        return TokenKind::AssignmentBitwiseOr;
                    }
                    return TokenKind::BitwiseOr;
                }
                '^' => {
                    // ^ ^=
                    return if self.matches('=') {
                        TokenKind::AssignmentBitwiseXor
                    } else {
                        TokenKind::BitwiseXor
                    };
                }
                '<' => {
                    // < << <= <<=
                    if self.matches('<') {
                        return if self.matches('=') {
                            TokenKind::AssignmentShiftLeft
                        } else {
                            TokenKind::ShiftLeft
                        };
                    } else if self.matches('=') {
                        return TokenKind::LessThanOrEqual;
                    }
                    return TokenKind::LessThan;
                }
                '>' => {
                    // > >> >= >>=
                    if self.matches('>') {
                        return if self.matches('=') {
                            TokenKind::AssignmentShiftRight
                        } else {
                            TokenKind::ShiftRight
                        };
                    } else if self.matches('=') {
                        return TokenKind::GreaterThanOrEqual;
                    }
                    return TokenKind::GreaterThan;
                }
                '!' => {
                    // ! !=
                    return if self.matches('=') {
                        TokenKind::NotEqual
                    } else {
                        TokenKind::LogicalNot
                    };
                }
                '=' => {
                    // = == =>
                    if self.matches('>') {
                        return TokenKind::Arrow;
                    } else if self.matches('=') {
                        return TokenKind::Equal;
                    }
                    return TokenKind::Assignment;
                }
                '+' => {
                    // + ++ +=
                    if self.matches('+') {
                        return TokenKind::Increment;
                    } else if self.matches('=') {
                        return TokenKind::AssignmentAddition;
                    }
                    return TokenKind::Addition;
                }
                '-' => {
                    // - -- -=
                    if self.matches('-') {
                        return TokenKind::Decrement;
                    } else if self.matches('=') {
                        return TokenKind::AssignmentSubtraction;
                    }
                    return TokenKind::Subtraction;
                }
                '*' => {
                    // * *=
                    return if self.matches('=') {
                        TokenKind::AssignmentMultiplication
                    } else {
                        TokenKind::Multiplication
                    };
                }
                '/' => {
                    // / /= /* block comment */ // line comment
                    if self.matches('=') {
                        return TokenKind::AssignmentDivision;
                    } else if self.matches('*') {
                        if !self.skip_block_comment() {
                            return TokenKind::Illegal;
                        }
                        continue;
                    } else if self.matches('/') {
                        self.skip_line_comment();
                        continue;
                    }
                    return TokenKind::Division;
                }
                '%' => {
                    // % %=
                    return if self.matches('=') {
                        TokenKind::AssignmentModulus
                    } else {
                        TokenKind::Modulus
                    };
                }
                '"' => return self.scan_string_literal(),
                '\'' => return self.scan_character_literal(),
                _ => {
                    if chars::is_identifier_start(ch) {
                        return self.scan_identifier_or_keyword(ch);
                    } else if chars::is_decimal_digit(ch) {
                        return self.scan_number(ch);
                    }
                    return self.report_error("unrecognized character");
                }
            }
        }
    }

    /// Skips a `/* ... */` comment; these nest, so a depth counter tracks
    /// inner `/*` and `*/` pairs. Returns false on an unterminated comment.
    fn skip_block_comment(&mut self) -> bool {
        let mut depth = 1u32;
        loop {
            match self.next() {
                None => {
                    self.report_error(
                        "unexpected end of source in block comment",
                    );
                    return false;
                }
                Some('/') if self.peek == Some('*') => {
                    self.next();
                    depth += 1;
                }
                Some('*') if self.peek == Some('/') => {
                    self.next();
                    depth -= 1;
                    if depth == 0 {
                        return true;
                    }
                }
                Some(_) => {}
            }
        }
    }

    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek {
            if chars::is_line_terminator(ch) {
                break;
            }
            self.next();
        }
    }

    fn scan_string_literal(&mut self) -> TokenKind {
        let mut text = String::new();
        loop {
            match self.next() {
                None => {
                    return self.report_error(
                        "unexpected end of source in string literal",
                    );
                }
                Some('"') => break,
                Some('\\') => match self.scan_character_escape() {
                    Some(ch) => text.push(ch),
                    None => return TokenKind::Illegal,
                },
                Some(ch) if chars::is_line_terminator(ch) => {
                    return self.report_error(
                        "unexpected line terminator in string literal",
                    );
                }
                Some(ch) => text.push(ch),
            }
        }
        self.literal = text;
        TokenKind::String
    }

    fn scan_character_literal(&mut self) -> TokenKind {
        let decoded = match self.next() {
            None => {
                return self.report_error(
                    "unexpected end of source in character literal",
                );
            }
            Some('\\') => match self.scan_character_escape() {
                Some(ch) => ch,
                None => return TokenKind::Illegal,
            },
            Some(ch) if chars::is_line_terminator(ch) => {
                return self.report_error(
                    "unexpected line terminator in character literal",
                );
            }
            Some(ch) => ch,
        };
        // Exactly one closing quote must follow.
        match self.next() {
            Some('\'') => {}
            Some(_) => {
                return self
                    .report_error("too many characters in character literal");
            }
            None => {
                return self.report_error(
                    "unexpected end of source in character literal",
                );
            }
        }
        self.literal.clear();
        self.literal.push(decoded);
        TokenKind::Character
    }

    /// Decodes the escape after a `\`. On failure the error is already
    /// reported and `None` is returned.
    fn scan_character_escape(&mut self) -> Option<char> {
        match self.peek {
            Some('n') => {
                self.next();
                Some('\n')
            }
            Some('r') => {
                self.next();
                Some('\r')
            }
            Some('t') => {
                self.next();
                Some('\t')
            }
            Some('\\') => {
                self.next();
                Some('\\')
            }
            Some('\'') => {
                self.next();
                Some('\'')
            }
            Some('"') => {
                self.next();
                Some('"')
            }
            Some('u') => {
                self.next();
                let mut code_point = 0u32;
                while let Some(ch) = self.peek {
                    if !chars::is_decimal_digit(ch) {
                        break;
                    }
                    code_point = code_point
                        .saturating_mul(10)
                        .saturating_add(ch as u32 - '0' as u32);
                    self.next();
                }
                self.decode_code_point(code_point)
            }
            Some('x') => {
                self.next();
                let mut code_point = 0u32;
                while let Some(ch) = self.peek {
                    if !chars::is_hex_digit(ch) {
                        break;
                    }
                    code_point = code_point
                        .saturating_mul(16)
                        .saturating_add(chars::hex_digit_value(ch));
                    self.next();
                }
                self.decode_code_point(code_point)
            }
            _ => {
                self.report_error("illegal character escape");
                None
            }
        }
    }

    fn decode_code_point(&mut self, code_point: u32) -> Option<char> {
        match char::from_u32(code_point) {
            Some(ch) => Some(ch),
            None => {
                self.report_error("invalid code point in character escape");
                None
            }
        }
    }

    fn scan_identifier_or_keyword(&mut self, first: char) -> TokenKind {
        let mut identifier = String::new();
        identifier.push(first);
        while let Some(ch) = self.peek {
            if !chars::is_identifier_body(ch) {
                break;
            }
            identifier.push(ch);
            self.next();
        }
        let token = TokenKind::lookup_keyword(&identifier);
        if token == TokenKind::Identifier {
            self.literal = identifier;
        }
        token
    }

    /// Scans an integer or real number. A leading `0x`/`0o`/`0b` switches
    /// base; the literal text excludes the prefix. A decimal run promotes
    /// to a real number on `.` or an exponent marker.
    fn scan_number(&mut self, first: char) -> TokenKind {
        if first == '0' {
            match self.peek {
                Some('x') => {
                    self.next();
                    return self.scan_prefixed_integer(chars::is_hex_digit);
                }
                Some('o') => {
                    self.next();
                    return self.scan_prefixed_integer(chars::is_octal_digit);
                }
                Some('b') => {
                    self.next();
                    return self.scan_prefixed_integer(chars::is_binary_digit);
                }
                _ => {}
            }
        }
        let mut digits = String::new();
        digits.push(first);
        while let Some(ch) = self.peek {
            if !chars::is_decimal_digit(ch) {
                break;
            }
            digits.push(ch);
            self.next();
        }
        match self.peek {
            Some(ch) if ch == '.' || chars::ascii_to_lower(ch) == 'e' => {
                self.scan_real_number(digits)
            }
            _ => {
                self.literal = digits;
                TokenKind::Integer
            }
        }
    }

    fn scan_prefixed_integer(
        &mut self,
        is_digit: fn(char) -> bool,
    ) -> TokenKind {
        match self.peek {
            Some(ch) if is_digit(ch) => {}
            _ => {
                return self
                    .report_error("missing digits after integer base prefix");
            }
        }
        let mut digits = String::new();
        while let Some(ch) = self.peek {
            if !is_digit(ch) {
                break;
            }
            digits.push(ch);
            self.next();
        }
        self.literal = digits;
        TokenKind::Integer
    }

    /// Continues a decimal run as a real number: optional fraction digits
    /// after `.`, optional signed exponent. An exponent marker with no
    /// following digit is an error.
    fn scan_real_number(&mut self, mut digits: String) -> TokenKind {
        if self.matches('.') {
            digits.push('.');
            while let Some(ch) = self.peek {
                if !chars::is_decimal_digit(ch) {
                    break;
                }
                digits.push(ch);
                self.next();
            }
        }
        if let Some(marker) = self.peek {
            if chars::ascii_to_lower(marker) == 'e' {
                digits.push(marker);
                self.next();
                if let Some(sign) = self.peek {
                    if sign == '+' || sign == '-' {
                        digits.push(sign);
                        self.next();
                    }
                }
                match self.peek {
                    Some(ch) if chars::is_decimal_digit(ch) => {}
                    _ => {
                        return self.report_error(
                            "missing digits in real number exponent",
                        );
                    }
                }
                while let Some(ch) = self.peek {
                    if !chars::is_decimal_digit(ch) {
                        break;
                    }
                    digits.push(ch);
                    self.next();
                }
            }
        }
        self.literal = digits;
        TokenKind::RealNumber
    }
}

impl<S: CharacterSource> Default for Lexer<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StringSource;
    use rstest::rstest;

    fn lexer(text: &str) -> Lexer<StringSource<'_>> {
        Lexer::with_source(StringSource::new(text))
    }

    fn kinds(text: &str) -> Vec<TokenKind> {
        let mut lexer = lexer(text);
        let mut out = Vec::new();
        loop {
            let token = lexer.advance();
            out.push(token);
            if token == TokenKind::EndOfSource || token == TokenKind::Illegal {
                break;
            }
        }
        out
    }

    #[rstest]
    #[case("(", TokenKind::LeftParenthesis)]
    #[case("...", TokenKind::Ellipsis)]
    #[case("?", TokenKind::Conditional)]
    #[case("=>", TokenKind::Arrow)]
    #[case("<<=", TokenKind::AssignmentShiftLeft)]
    #[case(">>=", TokenKind::AssignmentShiftRight)]
    #[case("<<", TokenKind::ShiftLeft)]
    #[case("<=", TokenKind::LessThanOrEqual)]
    #[case("<", TokenKind::LessThan)]
    #[case("&&", TokenKind::LogicalAnd)]
    #[case("&=", TokenKind::AssignmentBitwiseAnd)]
    #[case("&", TokenKind::BitwiseAnd)]
    #[case("||", TokenKind::LogicalOr)]
    #[case("^=", TokenKind::AssignmentBitwiseXor)]
    #[case("==", TokenKind::Equal)]
    #[case("!=", TokenKind::NotEqual)]
    #[case("=", TokenKind::Assignment)]
    #[case("++", TokenKind::Increment)]
    #[case("--", TokenKind::Decrement)]
    #[case("+=", TokenKind::AssignmentAddition)]
    #[case("%=", TokenKind::AssignmentModulus)]
    #[case("while", TokenKind::While)]
    #[case("namespace", TokenKind::Namespace)]
    #[case("bool", TokenKind::Bool)]
    #[case("true", TokenKind::True)]
    #[case("null", TokenKind::Null)]
    fn canonical_spelling_round_trips(
        #[case] spelling: &str,
        #[case] expected: TokenKind,
    ) {
        assert_eq!(kinds(spelling), vec![expected, TokenKind::EndOfSource]);
    }

    #[test]
    fn whitespace_and_comments_scan_to_end_of_source() {
        let text = "  \t\n  // a line comment\n/* multi\nline */  ";
        assert_eq!(kinds(text), vec![TokenKind::EndOfSource]);
    }

    #[test]
    fn block_comments_nest() {
        let text = "/* outer /* inner /* deeper */ */ still outer */";
        assert_eq!(kinds(text), vec![TokenKind::EndOfSource]);
    }

    #[test]
    fn unterminated_nested_comment_is_an_error() {
        let mut lexer = lexer("/* outer /* inner */");
        assert_eq!(lexer.advance(), TokenKind::Illegal);
        assert_eq!(lexer.state(), LexerState::Error);
        // Terminal: repeats Illegal without consuming more input.
        assert_eq!(lexer.advance(), TokenKind::Illegal);
    }

    #[test]
    fn two_dots_are_malformed() {
        let mut lexer = lexer("..");
        assert_eq!(lexer.advance(), TokenKind::Illegal);
        assert_eq!(lexer.state(), LexerState::Error);
    }

    #[rstest]
    #[case("0x")]
    #[case("0o")]
    #[case("0b")]
    #[case("0xzz")]
    #[case("0o9")]
    #[case("0b2")]
    fn base_prefix_without_digits_is_an_error(#[case] text: &str) {
        let mut lexer = lexer(text);
        assert_eq!(lexer.advance(), TokenKind::Illegal);
        assert_eq!(lexer.state(), LexerState::Error);
    }

    #[rstest]
    #[case("0xFF", "FF")]
    #[case("0o17", "17")]
    #[case("0b1010", "1010")]
    #[case("42", "42")]
    #[case("0", "0")]
    fn integer_literal_text_excludes_base_prefix(
        #[case] text: &str,
        #[case] expected: &str,
    ) {
        let mut lexer = lexer(text);
        assert_eq!(lexer.advance(), TokenKind::Integer);
        assert_eq!(lexer.token_literal(), expected);
        assert_eq!(lexer.advance(), TokenKind::EndOfSource);
    }

    #[rstest]
    #[case("3.14", "3.14")]
    #[case("1.", "1.")]
    #[case("2e10", "2e10")]
    #[case("1.5e+3", "1.5e+3")]
    #[case("1.5E-3", "1.5E-3")]
    fn real_number_literals(#[case] text: &str, #[case] expected: &str) {
        let mut lexer = lexer(text);
        assert_eq!(lexer.advance(), TokenKind::RealNumber);
        assert_eq!(lexer.token_literal(), expected);
    }

    #[test]
    fn exponent_without_digits_is_an_error() {
        let mut lexer = lexer("1.234E");
        assert_eq!(lexer.advance(), TokenKind::Illegal);
        assert_eq!(lexer.state(), LexerState::Error);
    }

    #[test]
    fn string_literal_decodes_escapes() {
        let mut lexer = lexer(r#""a\tb\n\"q\" \u65\x41""#);
        assert_eq!(lexer.advance(), TokenKind::String);
        assert_eq!(lexer.token_literal(), "a\tb\n\"q\" AA");
    }

    #[test]
    fn unterminated_string_is_an_error_forever() {
        let mut lexer = lexer("\"unterminated");
        assert_eq!(lexer.advance(), TokenKind::Illegal);
        assert_eq!(lexer.state(), LexerState::Error);
        assert_eq!(lexer.advance(), TokenKind::Illegal);
        assert_eq!(lexer.advance(), TokenKind::Illegal);
    }

    #[test]
    fn string_literal_rejects_raw_line_terminator() {
        let mut lexer = lexer("\"split\nline\"");
        assert_eq!(lexer.advance(), TokenKind::Illegal);
        assert_eq!(lexer.state(), LexerState::Error);
    }

    #[test]
    fn character_literals() {
        let mut lexer = lexer(r"'a' '\n' '\x41'");
        assert_eq!(lexer.advance(), TokenKind::Character);
        assert_eq!(lexer.token_literal(), "a");
        assert_eq!(lexer.advance(), TokenKind::Character);
        assert_eq!(lexer.token_literal(), "\n");
        assert_eq!(lexer.advance(), TokenKind::Character);
        assert_eq!(lexer.token_literal(), "A");
    }

    #[test]
    fn character_literal_with_two_characters_is_an_error() {
        let mut lexer = lexer("'ab'");
        assert_eq!(lexer.advance(), TokenKind::Illegal);
        assert_eq!(lexer.state(), LexerState::Error);
    }

    #[test]
    fn unknown_escape_is_an_error() {
        let mut lexer = lexer(r#""\q""#);
        assert_eq!(lexer.advance(), TokenKind::Illegal);
        assert_eq!(lexer.state(), LexerState::Error);
    }

    #[test]
    fn identifiers_and_keywords() {
        let mut lexer = lexer("while whilst _x1");
        assert_eq!(lexer.advance(), TokenKind::While);
        assert_eq!(lexer.advance(), TokenKind::Identifier);
        assert_eq!(lexer.token_literal(), "whilst");
        assert_eq!(lexer.advance(), TokenKind::Identifier);
        assert_eq!(lexer.token_literal(), "_x1");
        assert_eq!(lexer.advance(), TokenKind::EndOfSource);
    }

    #[test]
    fn token_locations_track_lines_and_columns() {
        let mut lexer = lexer("a\n  bc");
        lexer.advance();
        assert_eq!(lexer.token_location(), SourceLocation::new(1, 1));
        lexer.advance();
        assert_eq!(lexer.token_location(), SourceLocation::new(2, 3));
    }

    #[test]
    fn advance_before_initialize_is_a_misuse_error() {
        let mut lexer: Lexer<StringSource<'_>> = Lexer::new();
        assert_eq!(lexer.advance(), TokenKind::Illegal);
        assert_eq!(lexer.state(), LexerState::Error);
        assert_eq!(lexer.advance(), TokenKind::Illegal);
    }

    #[test]
    fn end_of_source_is_idempotent() {
        let mut lexer = lexer("x");
        assert_eq!(lexer.advance(), TokenKind::Identifier);
        assert_eq!(lexer.advance(), TokenKind::EndOfSource);
        assert_eq!(lexer.state(), LexerState::End);
        assert_eq!(lexer.advance(), TokenKind::EndOfSource);
        assert_eq!(lexer.advance(), TokenKind::EndOfSource);
    }

    #[test]
    fn bookmark_replays_recorded_tokens_verbatim() {
        let mut lexer = lexer("alpha 42 + beta");
        lexer.save_bookmark();
        assert_eq!(lexer.advance(), TokenKind::Identifier);
        assert_eq!(lexer.token_literal(), "alpha");
        assert_eq!(lexer.advance(), TokenKind::Integer);
        assert_eq!(lexer.token_literal(), "42");
        assert_eq!(lexer.advance(), TokenKind::Addition);

        lexer.load_bookmark();
        assert_eq!(lexer.state(), LexerState::Restoring);
        assert_eq!(lexer.advance(), TokenKind::Identifier);
        assert_eq!(lexer.token_literal(), "alpha");
        assert_eq!(lexer.advance(), TokenKind::Integer);
        assert_eq!(lexer.token_literal(), "42");
        assert_eq!(lexer.advance(), TokenKind::Addition);
        // Queue drained: scanning resumes live right after the replay.
        assert_eq!(lexer.state(), LexerState::Running);
        assert_eq!(lexer.advance(), TokenKind::Identifier);
        assert_eq!(lexer.token_literal(), "beta");
        assert_eq!(lexer.advance(), TokenKind::EndOfSource);
    }

    #[test]
    fn clear_bookmark_commits_consumed_tokens() {
        let mut lexer = lexer("a b c");
        lexer.save_bookmark();
        assert_eq!(lexer.advance(), TokenKind::Identifier);
        assert_eq!(lexer.token_literal(), "a");
        lexer.clear_bookmark();
        assert_eq!(lexer.state(), LexerState::Running);
        // No replay: the next token is scanned live.
        assert_eq!(lexer.advance(), TokenKind::Identifier);
        assert_eq!(lexer.token_literal(), "b");
    }

    #[test]
    fn save_bookmark_discards_previous_recording() {
        let mut lexer = lexer("a b c d");
        lexer.save_bookmark();
        lexer.advance(); // a
        lexer.advance(); // b
        // Second save while the first is unresolved silently overwrites.
        lexer.save_bookmark();
        lexer.advance(); // c
        lexer.load_bookmark();
        assert_eq!(lexer.advance(), TokenKind::Identifier);
        assert_eq!(lexer.token_literal(), "c");
        assert_eq!(lexer.advance(), TokenKind::Identifier);
        assert_eq!(lexer.token_literal(), "d");
    }

    #[test]
    fn load_bookmark_with_empty_queue_resumes_live_scanning() {
        let mut lexer = lexer("x y");
        lexer.save_bookmark();
        lexer.load_bookmark();
        assert_eq!(lexer.advance(), TokenKind::Identifier);
        assert_eq!(lexer.token_literal(), "x");
        assert_eq!(lexer.state(), LexerState::Running);
    }

    #[test]
    fn end_of_source_can_be_recorded_and_replayed() {
        let mut lexer = lexer("x");
        lexer.save_bookmark();
        assert_eq!(lexer.advance(), TokenKind::Identifier);
        assert_eq!(lexer.advance(), TokenKind::EndOfSource);
        lexer.load_bookmark();
        assert_eq!(lexer.advance(), TokenKind::Identifier);
        assert_eq!(lexer.advance(), TokenKind::EndOfSource);
    }

    #[test]
    fn keywords_leave_literal_text_empty() {
        let mut lexer = lexer("return x");
        assert_eq!(lexer.advance(), TokenKind::Return);
        assert_eq!(lexer.token_literal(), "");
        assert_eq!(lexer.advance(), TokenKind::Identifier);
        assert_eq!(lexer.token_literal(), "x");
    }
}
