//! Declaration parsing.
//!
//! Top-level and nested declarations:
//!
//! ```text
//! using       ::= "using" identifier ("." identifier)* ("as" identifier)? ";"
//! namespace   ::= "namespace" identifier "{" declaration* "}"
//! class       ::= "class" identifier ("<" identifier ("," identifier)*)?
//!                 "{" member* "}"
//! member      ::= visibility? "static"? (constant | variable | function)
//! constant    ::= "const" type identifier "=" expression ";"
//! variable    ::= type identifier ("=" expression)? ";"
//! function    ::= type identifier "(" parameters ")" block
//! type        ::= ("bool" | "char" | "double" | "float" | identifier)
//!                 ("[" "]")*
//! ```
//!
//! Variable and function declarations share a prefix (type then name) and
//! are told apart by the token that follows the name.

use crate::ast::{
    Declaration, Expression, Member, Parameter, TypeName, TypeSpecifier,
    Visibility,
};
use crate::parser::{ParseError, Parser};
use crate::scope::ScopeKind;
use crate::source::CharacterSource;
use crate::token::TokenKind;

impl<S: CharacterSource> Parser<S> {
    /// Parses `using a.b.c;` or `using a.b.c as alias;`.
    pub(crate) fn parse_using_clause(&mut self) -> Result<Declaration, ParseError> {
        let location = self.location;
        self.expect(TokenKind::Using)?;
        let mut path = vec![self.expect_identifier()?];
        while self.match_token(TokenKind::Period)? {
            path.push(self.expect_identifier()?);
        }
        let alias = if self.match_token(TokenKind::As)? {
            Some(self.expect_identifier()?)
        } else {
            None
        };
        self.expect(TokenKind::Semicolon)?;
        Ok(Declaration::Using {
            path,
            alias,
            location,
        })
    }

    /// Parses a namespace and the declarations inside it. The namespace
    /// body opens a named child scope.
    pub(crate) fn parse_namespace_declaration(
        &mut self,
    ) -> Result<Declaration, ParseError> {
        let location = self.location;
        self.expect(TokenKind::Namespace)?;
        let name = self.expect_identifier()?;
        let scope = self.open_scope(ScopeKind::Namespace, Some(name.clone()));
        self.expect(TokenKind::LeftBrace)?;

        let mut declarations = Vec::new();
        while self.peek != TokenKind::RightBrace {
            if self.peek == TokenKind::EndOfSource {
                return Err(self.syntax_error(format!(
                    "unexpected end of source in namespace '{}'",
                    name
                )));
            }
            let declaration = match self.peek {
                TokenKind::Using => self.parse_using_clause()?,
                TokenKind::Namespace => self.parse_namespace_declaration()?,
                TokenKind::Class => self.parse_class_declaration()?,
                TokenKind::Const => self.parse_constant_declaration()?,
                _ => self.parse_variable_or_function_declaration()?,
            };
            declarations.push(declaration);
        }
        self.expect(TokenKind::RightBrace)?;
        self.close_scope();

        Ok(Declaration::Namespace {
            name,
            scope,
            declarations,
            location,
        })
    }

    /// Parses a class, its optional parent list, and its members. The
    /// class body opens a named child scope.
    pub(crate) fn parse_class_declaration(
        &mut self,
    ) -> Result<Declaration, ParseError> {
        let location = self.location;
        self.expect(TokenKind::Class)?;
        let name = self.expect_identifier()?;

        let mut parents = Vec::new();
        if self.match_token(TokenKind::LessThan)? {
            parents.push(self.expect_identifier()?);
            while self.match_token(TokenKind::Comma)? {
                parents.push(self.expect_identifier()?);
            }
        }

        let scope = self.open_scope(ScopeKind::Class, Some(name.clone()));
        self.expect(TokenKind::LeftBrace)?;

        let mut members = Vec::new();
        while self.peek != TokenKind::RightBrace {
            if self.peek == TokenKind::EndOfSource {
                return Err(self.syntax_error(format!(
                    "unexpected end of source in class '{}'",
                    name
                )));
            }
            members.push(self.parse_member_declaration()?);
        }
        self.expect(TokenKind::RightBrace)?;
        self.close_scope();

        Ok(Declaration::Class {
            name,
            parents,
            scope,
            members,
            location,
        })
    }

    /// Parses one class member: optional visibility keyword, optional
    /// `static`, then a constant, variable, or function declaration.
    /// Members without a visibility keyword are private.
    fn parse_member_declaration(&mut self) -> Result<Member, ParseError> {
        let visibility = match Visibility::from_token(self.peek) {
            Some(visibility) => {
                self.advance_token()?;
                visibility
            }
            None => Visibility::Private,
        };
        let is_static = self.match_token(TokenKind::Static)?;
        let declaration = if self.peek == TokenKind::Const {
            self.parse_constant_declaration()?
        } else {
            self.parse_variable_or_function_declaration()?
        };
        Ok(Member {
            visibility,
            is_static,
            declaration,
        })
    }

    /// Parses `const type name = value;`. The initializer is mandatory.
    pub(crate) fn parse_constant_declaration(
        &mut self,
    ) -> Result<Declaration, ParseError> {
        let location = self.location;
        self.expect(TokenKind::Const)?;
        let type_specifier = self.parse_type_specifier()?;
        let name = self.expect_identifier()?;
        self.expect(TokenKind::Assignment)?;
        let value = self.parse_single_expression()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(Declaration::Constant {
            name,
            type_specifier,
            value,
            location,
        })
    }

    /// Parses a declaration that starts with a type and a name, then
    /// resolves to a function if `(` follows the name and to a variable
    /// otherwise.
    pub(crate) fn parse_variable_or_function_declaration(
        &mut self,
    ) -> Result<Declaration, ParseError> {
        let location = self.location;
        let type_specifier = self.parse_type_specifier()?;
        let name = self.expect_identifier()?;

        if self.peek == TokenKind::LeftParenthesis {
            let (parameters, variadic) = self.parse_parameter_list()?;
            let body = self.parse_block(None)?;
            return Ok(Declaration::Function {
                name,
                return_type: type_specifier,
                parameters,
                variadic,
                body,
                location,
            });
        }

        let initializer = self.parse_variable_initializer()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(Declaration::Variable {
            name,
            type_specifier,
            initializer,
            location,
        })
    }

    /// Parses a variable declaration without the trailing semicolon, for
    /// positions where the terminator belongs to the surrounding
    /// construct (statements, for-loop initializers).
    pub(crate) fn parse_variable_declaration(
        &mut self,
    ) -> Result<Declaration, ParseError> {
        let location = self.location;
        let type_specifier = self.parse_type_specifier()?;
        let name = self.expect_identifier()?;
        let initializer = self.parse_variable_initializer()?;
        Ok(Declaration::Variable {
            name,
            type_specifier,
            initializer,
            location,
        })
    }

    fn parse_variable_initializer(
        &mut self,
    ) -> Result<Option<Expression>, ParseError> {
        if self.match_token(TokenKind::Assignment)? {
            Ok(Some(self.parse_single_expression()?))
        } else {
            Ok(None)
        }
    }

    /// Parses `(type name, type name, ...)`. A trailing `...` in place of
    /// a parameter marks the function variadic.
    fn parse_parameter_list(
        &mut self,
    ) -> Result<(Vec<Parameter>, bool), ParseError> {
        self.expect(TokenKind::LeftParenthesis)?;
        let mut parameters = Vec::new();
        let mut variadic = false;

        if self.peek != TokenKind::RightParenthesis {
            loop {
                if self.match_token(TokenKind::Ellipsis)? {
                    variadic = true;
                    break;
                }
                let location = self.location;
                let type_specifier = self.parse_type_specifier()?;
                let name = self.expect_identifier()?;
                parameters.push(Parameter {
                    name,
                    type_specifier,
                    location,
                });
                if !self.match_token(TokenKind::Comma)? {
                    break;
                }
            }
        }

        self.expect(TokenKind::RightParenthesis)?;
        Ok((parameters, variadic))
    }

    /// Parses a type: a built-in type keyword or a type name, followed by
    /// zero or more `[]` array suffixes.
    pub(crate) fn parse_type_specifier(
        &mut self,
    ) -> Result<TypeSpecifier, ParseError> {
        let location = self.location;
        let name = match self.peek {
            TokenKind::Bool => {
                self.advance_token()?;
                TypeName::Bool
            }
            TokenKind::Char => {
                self.advance_token()?;
                TypeName::Char
            }
            TokenKind::Double => {
                self.advance_token()?;
                TypeName::Double
            }
            TokenKind::Float => {
                self.advance_token()?;
                TypeName::Float
            }
            TokenKind::Identifier => TypeName::Named(self.expect_identifier()?),
            found => {
                return Err(self.syntax_error(format!(
                    "expected a type specifier, found {}",
                    found
                )))
            }
        };

        let mut array_dimensions = 0;
        while self.match_token(TokenKind::LeftBracket)? {
            self.expect(TokenKind::RightBracket)?;
            array_dimensions += 1;
        }

        Ok(TypeSpecifier {
            name,
            array_dimensions,
            location,
        })
    }
}
