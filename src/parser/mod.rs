//! Parser for Vela source code.
//!
//! A single-token-lookahead recursive descent parser: `peek` mirrors the
//! lexer's current token at all times and [`Parser::parse_program`] pulls
//! tokens on demand. Statements and declarations are parsed by recursive
//! descent, expressions by operator-precedence (Pratt) parsing.
//!
//! Parser methods are split across files using `impl Parser` blocks, one
//! per grammar layer:
//! - this module: parser state, helper methods, and the program entry point
//! - `declarations`: using clauses, namespaces, classes, constants,
//!   variables, and functions
//! - `statements`: blocks and control-flow statements
//! - `expressions`: Pratt expression parsing
//!
//! Every parsing method returns `Result`; the first lexical or syntax
//! error anywhere aborts the whole parse with no recovery.

mod declarations;
mod expressions;
mod statements;

use std::fmt;

use crate::ast::{Declaration, SourceLocation, TranslationUnit};
use crate::lexer::Lexer;
use crate::scope::{ScopeArena, ScopeId, ScopeKind};
use crate::source::CharacterSource;
use crate::token::TokenKind;

/// Parse error: message plus the source position of the offending token.
#[derive(Debug)]
pub struct ParseError {
    pub message: String,
    pub location: SourceLocation,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "parse error at line {}, column {}: {}",
            self.location.line, self.location.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}

/// Recursive descent parser over a streaming [`Lexer`].
pub struct Parser<S> {
    lexer: Lexer<S>,
    /// Current token; mirrors the lexer at all times.
    peek: TokenKind,
    /// Literal text of `peek`.
    literal: String,
    /// Location of `peek`.
    location: SourceLocation,
    /// Lookahead saved at the start of a speculation, restored on rollback.
    saved_lookahead: Option<(TokenKind, String, SourceLocation)>,
    scopes: ScopeArena,
    global_scope: ScopeId,
    current_scope: ScopeId,
}

impl<S: CharacterSource> Parser<S> {
    pub fn new(source: S) -> Self {
        let mut scopes = ScopeArena::new();
        let global_scope = scopes.insert(ScopeKind::Global, None, None);
        Self {
            lexer: Lexer::with_source(source),
            peek: TokenKind::EndOfSource,
            literal: String::new(),
            location: SourceLocation::default(),
            saved_lookahead: None,
            scopes,
            global_scope,
            current_scope: global_scope,
        }
    }

    /// Parses a whole program: a sequence of using clauses and top-level
    /// declarations terminated by end of source. On success the caller
    /// receives the scope tree and the declaration sequence; on failure no
    /// usable tree is produced.
    pub fn parse_program(mut self) -> Result<TranslationUnit, ParseError> {
        self.advance_token()?;
        let mut declarations: Vec<Declaration> = Vec::new();
        loop {
            match self.peek {
                TokenKind::EndOfSource => break,
                TokenKind::Using => declarations.push(self.parse_using_clause()?),
                TokenKind::Namespace => {
                    declarations.push(self.parse_namespace_declaration()?)
                }
                TokenKind::Class => {
                    declarations.push(self.parse_class_declaration()?)
                }
                TokenKind::Const => {
                    declarations.push(self.parse_constant_declaration()?)
                }
                _ => declarations
                    .push(self.parse_variable_or_function_declaration()?),
            }
        }
        Ok(TranslationUnit {
            scopes: self.scopes,
            global_scope: self.global_scope,
            declarations,
        })
    }

    // ===== Token helpers =====

    /// Refreshes `peek` from the lexer. A scan error surfaces here: the
    /// `Illegal` token becomes a [`ParseError`] carrying the lexer's
    /// message, aborting the parse through the usual `?` chain.
    pub(crate) fn advance_token(&mut self) -> Result<(), ParseError> {
        let token = self.lexer.advance();
        self.location = self.lexer.token_location();
        if token == TokenKind::Illegal {
            return Err(ParseError {
                message: self.lexer.token_literal().to_string(),
                location: self.location,
            });
        }
        self.peek = token;
        self.literal.clear();
        self.literal.push_str(self.lexer.token_literal());
        Ok(())
    }

    /// Consumes the current token if it matches; never fails on a
    /// mismatch, only on a scan error while refilling the lookahead.
    pub(crate) fn match_token(
        &mut self,
        expected: TokenKind,
    ) -> Result<bool, ParseError> {
        if self.peek == expected {
            self.advance_token()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Consumes the current token or reports a syntax error.
    pub(crate) fn expect(&mut self, expected: TokenKind) -> Result<(), ParseError> {
        if self.peek == expected {
            self.advance_token()
        } else {
            Err(self.syntax_error(format!(
                "expected {}, found {}",
                expected, self.peek
            )))
        }
    }

    pub(crate) fn expect_identifier(&mut self) -> Result<String, ParseError> {
        if self.peek == TokenKind::Identifier {
            let name = std::mem::take(&mut self.literal);
            self.advance_token()?;
            Ok(name)
        } else {
            Err(self.syntax_error(format!(
                "expected identifier, found {}",
                self.peek
            )))
        }
    }

    pub(crate) fn syntax_error(&self, message: impl Into<String>) -> ParseError {
        ParseError {
            message: message.into(),
            location: self.location,
        }
    }

    // ===== Speculation =====
    //
    // Speculative parsing records tokens through the lexer bookmark and
    // additionally saves the parser's own lookahead, which was scanned
    // before the bookmark was set. Single-buffered: one speculation at a
    // time, a nested one overwrites the outer record.

    pub(crate) fn begin_speculation(&mut self) {
        self.saved_lookahead =
            Some((self.peek, self.literal.clone(), self.location));
        self.lexer.save_bookmark();
    }

    /// Keeps the tokens consumed while speculating and drops the record.
    pub(crate) fn commit_speculation(&mut self) {
        self.saved_lookahead = None;
        self.lexer.clear_bookmark();
    }

    /// Rewinds to the matching [`Parser::begin_speculation`]: the saved
    /// lookahead becomes current again and the recorded tokens replay.
    pub(crate) fn rollback_speculation(&mut self) {
        self.lexer.load_bookmark();
        if let Some((peek, literal, location)) = self.saved_lookahead.take() {
            self.peek = peek;
            self.literal = literal;
            self.location = location;
        }
    }

    // ===== Scope helpers =====

    /// Creates a child scope of the current scope and enters it.
    pub(crate) fn open_scope(
        &mut self,
        kind: ScopeKind,
        name: Option<String>,
    ) -> ScopeId {
        let scope = self.scopes.insert(kind, name, Some(self.current_scope));
        self.current_scope = scope;
        scope
    }

    /// Returns to the parent of the current scope.
    pub(crate) fn close_scope(&mut self) {
        if let Some(parent) = self.scopes[self.current_scope].parent {
            self.current_scope = parent;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Statement, TypeName};
    use crate::source::StringSource;

    fn parse(source: &str) -> TranslationUnit {
        Parser::new(StringSource::new(source))
            .parse_program()
            .expect("parse failed")
    }

    fn parse_error(source: &str) -> ParseError {
        match Parser::new(StringSource::new(source)).parse_program() {
            Ok(_) => panic!("expected a parse error"),
            Err(error) => error,
        }
    }

    #[test]
    fn parses_empty_program() {
        let unit = parse("");
        assert!(unit.declarations.is_empty());
        assert_eq!(unit.scopes.len(), 1);
        assert!(unit.scopes[unit.global_scope].children.is_empty());
    }

    #[test]
    fn parses_simple_function() {
        let unit = parse("double half(double x) { return x / 2; }");
        assert_eq!(unit.declarations.len(), 1);
        match &unit.declarations[0] {
            Declaration::Function {
                name,
                return_type,
                parameters,
                variadic,
                body,
                ..
            } => {
                assert_eq!(name, "half");
                assert_eq!(return_type.name, TypeName::Double);
                assert_eq!(parameters.len(), 1);
                assert_eq!(parameters[0].name, "x");
                assert!(!variadic);
                assert_eq!(body.statements.len(), 1);
                assert!(matches!(body.statements[0], Statement::Return { .. }));
            }
            other => panic!("expected function declaration, got {:?}", other),
        }
    }

    #[test]
    fn parses_global_variable() {
        let unit = parse("float ratio = 0.5;");
        match &unit.declarations[0] {
            Declaration::Variable {
                name, initializer, ..
            } => {
                assert_eq!(name, "ratio");
                assert!(initializer.is_some());
            }
            other => panic!("expected variable declaration, got {:?}", other),
        }
    }

    #[test]
    fn lexical_error_aborts_the_parse() {
        let error = parse_error("float x = \"unterminated");
        assert!(error.message.contains("string literal"));
    }

    #[test]
    fn syntax_error_reports_expected_token() {
        let error = parse_error("float x = 1");
        assert!(error.message.contains("';'"), "message: {}", error.message);
    }

    #[test]
    fn first_error_aborts_without_recovery() {
        // The second declaration is fine, but parsing never reaches it.
        let error = parse_error("float x = ;\nfloat y = 1;");
        assert_eq!(error.location.line, 1);
    }
}
