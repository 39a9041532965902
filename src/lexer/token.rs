use std::fmt;

/// A single lexical token.
///
/// `Char` carries any punctuation or operator character the lexer does not
/// recognize as a dedicated token, including `+ - * / = < > ( ) , . :`.
/// The parser is expected to match on it directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    // Structural
    Newline,
    Indent,
    Dedent,
    Eof,

    // Valued
    Number(i64),
    Id(String),
    String(String),
    Char(char),

    // Two-character comparisons
    Eq,        // ==
    NotEq,     // !=
    LessOrEq,  // <=
    GreaterOrEq, // >=

    // Keywords
    Class,
    Return,
    If,
    Else,
    Def,
    Print,
    And,
    Or,
    Not,
    None,
    True,
    False,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(value) => write!(f, "Number{{{value}}}"),
            Token::Id(name) => write!(f, "Id{{{name}}}"),
            Token::String(value) => write!(f, "String{{{value}}}"),
            Token::Char(c) => write!(f, "Char{{{c}}}"),
            Token::Newline => f.write_str("Newline"),
            Token::Indent => f.write_str("Indent"),
            Token::Dedent => f.write_str("Dedent"),
            Token::Eof => f.write_str("Eof"),
            Token::Eq => f.write_str("Eq"),
            Token::NotEq => f.write_str("NotEq"),
            Token::LessOrEq => f.write_str("LessOrEq"),
            Token::GreaterOrEq => f.write_str("GreaterOrEq"),
            Token::Class => f.write_str("Class"),
            Token::Return => f.write_str("Return"),
            Token::If => f.write_str("If"),
            Token::Else => f.write_str("Else"),
            Token::Def => f.write_str("Def"),
            Token::Print => f.write_str("Print"),
            Token::And => f.write_str("And"),
            Token::Or => f.write_str("Or"),
            Token::Not => f.write_str("Not"),
            Token::None => f.write_str("None"),
            Token::True => f.write_str("True"),
            Token::False => f.write_str("False"),
        }
    }
}
