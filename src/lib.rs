//! # Introduction
//!
//! Vela is the front end of a compiler for a small class-based language:
//! a streaming lexer and a recursive descent parser that turn source text
//! into an abstract syntax tree and a scope tree.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser → TranslationUnit (AST + scope tree)
//! ```
//!
//! 1. [`source`] — character input abstraction; strings and files.
//! 2. [`lexer`] — streaming tokenizer that produces one token per call
//!    and supports bookmark-based rewinding for speculative parsing.
//! 3. [`token`] — the token kind table: spellings, keyword lookup, and
//!    operator binding powers.
//! 4. [`parser`] — recursive descent with Pratt expression parsing;
//!    builds the [`ast`] and the [`scope`] tree.
//!
//! ## Supported language
//!
//! Declarations: namespaces, classes with single-level visibility
//! modifiers, constants, variables, functions (optionally variadic),
//! `using` clauses. Control flow: `if/else`, `while`, `do-while`, `for`,
//! `switch/case`, `break`, `continue`, `return`. Expressions: the usual
//! arithmetic, comparison, logical, bitwise, and assignment operators,
//! the conditional operator, invocation, indexing, array and tuple
//! literals, and type conversions.

pub mod ast;
pub mod chars;
pub mod lexer;
pub mod parser;
pub mod scope;
pub mod source;
pub mod token;
