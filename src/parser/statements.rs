//! Statement parsing.
//!
//! ```text
//! statement ::= block | if_stmt | while_stmt | do_while_stmt | for_stmt
//!             | switch_stmt | return_stmt | break_stmt | continue_stmt
//!             | const_decl | var_decl | expr_stmt
//! ```
//!
//! A statement that starts with neither a keyword nor `{` is either a
//! variable declaration or an expression statement. The two cannot be
//! told apart with one token of lookahead (`x = 0;` and `x[] items;`
//! both start with an identifier), so the parser speculates: it tries a
//! declaration under a lexer bookmark and rewinds to parse an expression
//! if that fails.

use crate::ast::{Block, CaseClause, ForInitializer, Statement};
use crate::parser::{ParseError, Parser};
use crate::scope::{ScopeId, ScopeKind};
use crate::source::CharacterSource;
use crate::token::TokenKind;

impl<S: CharacterSource> Parser<S> {
    pub(crate) fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        match self.peek {
            TokenKind::LeftBrace => Ok(Statement::Block(self.parse_block(None)?)),
            TokenKind::If => self.parse_if_statement(),
            TokenKind::While => self.parse_while_statement(),
            TokenKind::Do => self.parse_do_while_statement(),
            TokenKind::For => self.parse_for_statement(),
            TokenKind::Switch => self.parse_switch_statement(),
            TokenKind::Return => self.parse_return_statement(),
            TokenKind::Break => {
                let location = self.location;
                self.advance_token()?;
                self.expect(TokenKind::Semicolon)?;
                Ok(Statement::Break { location })
            }
            TokenKind::Continue => {
                let location = self.location;
                self.advance_token()?;
                self.expect(TokenKind::Semicolon)?;
                Ok(Statement::Continue { location })
            }
            TokenKind::Const => {
                let declaration = self.parse_constant_declaration()?;
                Ok(Statement::Declaration(Box::new(declaration)))
            }
            _ => self.parse_declaration_or_expression_statement(),
        }
    }

    /// Parses `{ statement* }`. Opens a fresh block scope unless the
    /// caller already opened one (for-loops open theirs early so the
    /// initializer lands in it).
    pub(crate) fn parse_block(
        &mut self,
        scope: Option<ScopeId>,
    ) -> Result<Block, ParseError> {
        let location = self.location;
        let opened_here = scope.is_none();
        let scope = match scope {
            Some(scope) => scope,
            None => self.open_scope(ScopeKind::Block, None),
        };
        self.expect(TokenKind::LeftBrace)?;

        let mut statements = Vec::new();
        while self.peek != TokenKind::RightBrace {
            if self.peek == TokenKind::EndOfSource {
                return Err(self.syntax_error("unexpected end of source in block"));
            }
            statements.push(self.parse_statement()?);
        }
        self.expect(TokenKind::RightBrace)?;
        if opened_here {
            self.close_scope();
        }

        Ok(Block {
            scope,
            statements,
            location,
        })
    }

    fn parse_if_statement(&mut self) -> Result<Statement, ParseError> {
        let location = self.location;
        self.expect(TokenKind::If)?;
        self.expect(TokenKind::LeftParenthesis)?;
        let condition = self.parse_single_expression()?;
        self.expect(TokenKind::RightParenthesis)?;
        let then_branch = Box::new(self.parse_statement()?);
        let else_branch = if self.match_token(TokenKind::Else)? {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };
        Ok(Statement::If {
            condition,
            then_branch,
            else_branch,
            location,
        })
    }

    fn parse_while_statement(&mut self) -> Result<Statement, ParseError> {
        let location = self.location;
        self.expect(TokenKind::While)?;
        self.expect(TokenKind::LeftParenthesis)?;
        let condition = self.parse_single_expression()?;
        self.expect(TokenKind::RightParenthesis)?;
        let body = Box::new(self.parse_statement()?);
        Ok(Statement::While {
            condition,
            body,
            location,
        })
    }

    fn parse_do_while_statement(&mut self) -> Result<Statement, ParseError> {
        let location = self.location;
        self.expect(TokenKind::Do)?;
        let body = Box::new(self.parse_statement()?);
        self.expect(TokenKind::While)?;
        self.expect(TokenKind::LeftParenthesis)?;
        let condition = self.parse_single_expression()?;
        self.expect(TokenKind::RightParenthesis)?;
        self.expect(TokenKind::Semicolon)?;
        Ok(Statement::DoWhile {
            body,
            condition,
            location,
        })
    }

    /// Parses `for (initializer? ; condition? ; step?) body`. The loop
    /// header and body share one scope so a declared loop variable is
    /// visible in both.
    fn parse_for_statement(&mut self) -> Result<Statement, ParseError> {
        let location = self.location;
        self.expect(TokenKind::For)?;
        let scope = self.open_scope(ScopeKind::Block, None);
        self.expect(TokenKind::LeftParenthesis)?;

        let initializer = if self.peek == TokenKind::Semicolon {
            None
        } else {
            Some(self.parse_for_initializer()?)
        };
        self.expect(TokenKind::Semicolon)?;

        let condition = if self.peek == TokenKind::Semicolon {
            None
        } else {
            Some(self.parse_single_expression()?)
        };
        self.expect(TokenKind::Semicolon)?;

        let step = if self.peek == TokenKind::RightParenthesis {
            None
        } else {
            Some(self.parse_single_expression()?)
        };
        self.expect(TokenKind::RightParenthesis)?;

        let body = Box::new(if self.peek == TokenKind::LeftBrace {
            Statement::Block(self.parse_block(Some(scope))?)
        } else {
            self.parse_statement()?
        });
        self.close_scope();

        Ok(Statement::For {
            scope,
            initializer,
            condition,
            step,
            body,
            location,
        })
    }

    /// Disambiguates the for-loop initializer. `for (x = 0; ...)` and
    /// `for (float x = 0; ...)` both start with tokens a declaration
    /// could start with, so the declaration attempt runs under a lexer
    /// bookmark and a failure rewinds the token stream for the
    /// expression attempt.
    fn parse_for_initializer(&mut self) -> Result<ForInitializer, ParseError> {
        self.begin_speculation();
        match self.parse_variable_declaration() {
            Ok(declaration) => {
                self.commit_speculation();
                Ok(ForInitializer::Declaration(Box::new(declaration)))
            }
            Err(_) => {
                self.rollback_speculation();
                Ok(ForInitializer::Expression(self.parse_single_expression()?))
            }
        }
    }

    fn parse_switch_statement(&mut self) -> Result<Statement, ParseError> {
        let location = self.location;
        self.expect(TokenKind::Switch)?;
        self.expect(TokenKind::LeftParenthesis)?;
        let discriminant = self.parse_single_expression()?;
        self.expect(TokenKind::RightParenthesis)?;
        self.expect(TokenKind::LeftBrace)?;

        let mut cases = Vec::new();
        while self.peek != TokenKind::RightBrace {
            cases.push(self.parse_case_clause()?);
        }
        self.expect(TokenKind::RightBrace)?;

        Ok(Statement::Switch {
            discriminant,
            cases,
            location,
        })
    }

    /// Parses `case value:` or `default:` and the statements that run
    /// under it, up to the next clause or the end of the switch body.
    fn parse_case_clause(&mut self) -> Result<CaseClause, ParseError> {
        let location = self.location;
        let value = if self.match_token(TokenKind::Case)? {
            Some(self.parse_single_expression()?)
        } else {
            self.expect(TokenKind::Default)?;
            None
        };
        self.expect(TokenKind::Colon)?;

        let mut statements = Vec::new();
        loop {
            match self.peek {
                TokenKind::Case | TokenKind::Default | TokenKind::RightBrace => {
                    break
                }
                TokenKind::EndOfSource => {
                    return Err(
                        self.syntax_error("unexpected end of source in switch body")
                    )
                }
                _ => statements.push(self.parse_statement()?),
            }
        }

        Ok(CaseClause {
            value,
            statements,
            location,
        })
    }

    fn parse_return_statement(&mut self) -> Result<Statement, ParseError> {
        let location = self.location;
        self.expect(TokenKind::Return)?;
        let value = if self.peek == TokenKind::Semicolon {
            None
        } else {
            Some(self.parse_single_expression()?)
        };
        self.expect(TokenKind::Semicolon)?;
        Ok(Statement::Return { value, location })
    }

    /// Same ambiguity as the for-loop initializer, at statement level.
    fn parse_declaration_or_expression_statement(
        &mut self,
    ) -> Result<Statement, ParseError> {
        let location = self.location;
        self.begin_speculation();
        match self.parse_variable_declaration() {
            Ok(declaration) => {
                self.commit_speculation();
                self.expect(TokenKind::Semicolon)?;
                Ok(Statement::Declaration(Box::new(declaration)))
            }
            Err(_) => {
                self.rollback_speculation();
                let expression = self.parse_single_expression()?;
                self.expect(TokenKind::Semicolon)?;
                Ok(Statement::Expression {
                    expression,
                    location,
                })
            }
        }
    }
}
