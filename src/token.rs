//! The token model: every token kind the lexer can produce, with its
//! diagnostic name, optional canonical spelling, and binding power.
//!
//! The whole set is declared once in the [`token_kinds!`] table below;
//! the name, spelling, and precedence accessors and the keyword lookup
//! table are all derived from that single declaration, so a kind cannot
//! drift out of sync with its metadata.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use std::fmt;

macro_rules! token_kinds {
    ($($kind:ident => $literal:expr, $precedence:expr;)*) => {
        /// Closed set of token kinds.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum TokenKind {
            $($kind,)*
        }

        impl TokenKind {
            /// Diagnostic name of the kind, e.g. `"AssignmentShiftLeft"`.
            pub fn name(self) -> &'static str {
                match self {
                    $(TokenKind::$kind => stringify!($kind),)*
                }
            }

            /// Canonical spelling, or `None` for kinds whose text is
            /// data-dependent (literals, identifiers, end of source).
            pub fn literal(self) -> Option<&'static str> {
                match self {
                    $(TokenKind::$kind => $literal,)*
                }
            }

            /// Binding power used by the expression parser; 0 for kinds
            /// that can never extend an expression.
            pub fn precedence(self) -> u8 {
                match self {
                    $(TokenKind::$kind => $precedence,)*
                }
            }
        }

        static KEYWORDS: Lazy<FxHashMap<&'static str, TokenKind>> =
            Lazy::new(|| {
                let mut table = FxHashMap::default();
                $(
                    if let Some(spelling) = $literal {
                        table.insert(spelling, TokenKind::$kind);
                    }
                )*
                table
            });
    };
}

token_kinds! {
    EndOfSource => None, 0;

    // Punctuation
    LeftParenthesis => Some("("), 14;
    RightParenthesis => Some(")"), 0;
    LeftBracket => Some("["), 14;
    RightBracket => Some("]"), 0;
    LeftBrace => Some("{"), 0;
    RightBrace => Some("}"), 0;
    Colon => Some(":"), 0;
    Semicolon => Some(";"), 0;
    Period => Some("."), 0;
    Ellipsis => Some("..."), 0;
    Conditional => Some("?"), 3;
    Increment => Some("++"), 0;
    Decrement => Some("--"), 0;
    Arrow => Some("=>"), 0;

    // Assignment operators
    Assignment => Some("="), 2;
    AssignmentBitwiseOr => Some("|="), 2;
    AssignmentBitwiseXor => Some("^="), 2;
    AssignmentBitwiseAnd => Some("&="), 2;
    AssignmentShiftLeft => Some("<<="), 2;
    AssignmentShiftRight => Some(">>="), 2;
    AssignmentAddition => Some("+="), 2;
    AssignmentSubtraction => Some("-="), 2;
    AssignmentMultiplication => Some("*="), 2;
    AssignmentDivision => Some("/="), 2;
    AssignmentModulus => Some("%="), 2;

    // Binary operators
    Comma => Some(","), 1;
    LogicalOr => Some("||"), 4;
    LogicalAnd => Some("&&"), 5;
    BitwiseOr => Some("|"), 6;
    BitwiseXor => Some("^"), 7;
    BitwiseAnd => Some("&"), 8;
    ShiftLeft => Some("<<"), 11;
    ShiftRight => Some(">>"), 11;
    Addition => Some("+"), 12;
    Subtraction => Some("-"), 12;
    Multiplication => Some("*"), 13;
    Division => Some("/"), 13;
    Modulus => Some("%"), 13;

    // Compare operators
    Equal => Some("=="), 9;
    NotEqual => Some("!="), 9;
    LessThan => Some("<"), 10;
    GreaterThan => Some(">"), 10;
    LessThanOrEqual => Some("<="), 10;
    GreaterThanOrEqual => Some(">="), 10;

    // Unary operators
    LogicalNot => Some("!"), 0;
    BitwiseNot => Some("~"), 0;

    // Keywords
    As => Some("as"), 0;
    Break => Some("break"), 0;
    Case => Some("case"), 0;
    Catch => Some("catch"), 0;
    Class => Some("class"), 0;
    Const => Some("const"), 0;
    Continue => Some("continue"), 0;
    Default => Some("default"), 0;
    Do => Some("do"), 0;
    Else => Some("else"), 0;
    Enum => Some("enum"), 0;
    Export => Some("export"), 0;
    Finally => Some("finally"), 0;
    For => Some("for"), 0;
    From => Some("from"), 0;
    If => Some("if"), 0;
    Import => Some("import"), 0;
    Internal => Some("internal"), 0;
    Namespace => Some("namespace"), 0;
    New => Some("new"), 0;
    Private => Some("private"), 0;
    Protected => Some("protected"), 0;
    Public => Some("public"), 0;
    Return => Some("return"), 0;
    Static => Some("static"), 0;
    Switch => Some("switch"), 0;
    This => Some("this"), 0;
    Throw => Some("throw"), 0;
    Try => Some("try"), 0;
    Using => Some("using"), 0;
    While => Some("while"), 0;

    // Built-in types
    Bool => Some("bool"), 0;
    Char => Some("char"), 0;
    Double => Some("double"), 0;
    Float => Some("float"), 0;

    // Literals
    Null => Some("null"), 0;
    True => Some("true"), 0;
    False => Some("false"), 0;
    Integer => None, 0;
    RealNumber => None, 0;
    Character => None, 0;
    String => None, 0;

    // Identifier
    Identifier => None, 0;

    // Illegal token
    Illegal => None, 0;
}

impl TokenKind {
    /// Resolves a spelling to its keyword or operator kind.
    ///
    /// Anything without a registered canonical spelling is an
    /// [`TokenKind::Identifier`]; an unknown spelling is not an error.
    pub fn lookup_keyword(spelling: &str) -> TokenKind {
        KEYWORDS
            .get(spelling)
            .copied()
            .unwrap_or(TokenKind::Identifier)
    }

    /// True for the assignment operator family.
    pub fn is_assignment_operator(self) -> bool {
        matches!(
            self,
            TokenKind::Assignment
                | TokenKind::AssignmentBitwiseOr
                | TokenKind::AssignmentBitwiseXor
                | TokenKind::AssignmentBitwiseAnd
                | TokenKind::AssignmentShiftLeft
                | TokenKind::AssignmentShiftRight
                | TokenKind::AssignmentAddition
                | TokenKind::AssignmentSubtraction
                | TokenKind::AssignmentMultiplication
                | TokenKind::AssignmentDivision
                | TokenKind::AssignmentModulus
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.literal() {
            Some(spelling) => write!(f, "'{}'", spelling),
            None => match self {
                TokenKind::EndOfSource => write!(f, "end of source"),
                TokenKind::Integer => write!(f, "integer literal"),
                TokenKind::RealNumber => write!(f, "real number literal"),
                TokenKind::Character => write!(f, "character literal"),
                TokenKind::String => write!(f, "string literal"),
                TokenKind::Identifier => write!(f, "identifier"),
                TokenKind::Illegal => write!(f, "illegal token"),
                _ => write!(f, "{}", self.name()),
            },
        }
    }
}
