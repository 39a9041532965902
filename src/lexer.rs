//! Indentation-sensitive lexer.
//!
//! The whole token stream is produced eagerly at construction; the parser
//! then walks it through the `current`/`next` cursor. Indentation uses
//! exactly two spaces per level and is reported through synthetic
//! `Indent`/`Dedent` tokens, with `Newline` closing every logical line.

use std::io;

use thiserror::Error;

pub mod token;

pub use token::Token;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("invalid integer literal '{literal}'")]
    InvalidIntegerLiteral { literal: String },
    #[error("failed to read source input: {message}")]
    UnreadableInput { message: String },
}

pub type LexResult<T> = Result<T, LexError>;

pub struct Lexer {
    tokens: Vec<Token>,
    cursor: usize,
}

impl Lexer {
    pub fn new(input: &str) -> LexResult<Self> {
        Ok(Self {
            tokens: tokenize(input)?,
            cursor: 0,
        })
    }

    pub fn from_reader(mut input: impl io::Read) -> LexResult<Self> {
        let mut source = String::new();
        input
            .read_to_string(&mut source)
            .map_err(|error| LexError::UnreadableInput {
                message: error.to_string(),
            })?;
        Self::new(&source)
    }

    /// The token under the cursor.
    pub fn current(&self) -> &Token {
        &self.tokens[self.cursor]
    }

    /// Advances the cursor (unless already at `Eof`) and returns the new
    /// current token.
    pub fn next(&mut self) -> &Token {
        if self.cursor + 1 < self.tokens.len() {
            self.cursor += 1;
        }
        &self.tokens[self.cursor]
    }
}

/// Produces the full token sequence for `input`, ending with exactly one
/// `Eof`.
pub fn tokenize(input: &str) -> LexResult<Vec<Token>> {
    let mut scanner = Scanner::new(input);
    scanner.scan()?;
    Ok(scanner.tokens)
}

struct Scanner<'a> {
    input: &'a str,
    pos: usize,
    tokens: Vec<Token>,
    indent: usize,
    old_indent: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            tokens: Vec::new(),
            indent: 0,
            old_indent: 0,
        }
    }

    fn scan(&mut self) -> LexResult<()> {
        loop {
            if self.at_line_start() {
                self.handle_indentation();
            }

            let Some(c) = self.peek() else {
                self.finish();
                return Ok(());
            };

            match c {
                '#' => self.skip_comment(),
                '\n' => {
                    self.advance();
                    self.handle_newline();
                }
                '!' | '=' | '<' | '>' if self.peek_next() == Some('=') => {
                    self.advance();
                    self.advance();
                    self.tokens.push(match c {
                        '!' => Token::NotEq,
                        '=' => Token::Eq,
                        '<' => Token::LessOrEq,
                        _ => Token::GreaterOrEq,
                    });
                }
                '+' | '-' | '*' | '/' | '=' | '<' | '>' => {
                    self.advance();
                    self.tokens.push(Token::Char(c));
                }
                '0'..='9' => self.read_number()?,
                c if c.is_ascii_alphabetic() || c == '_' => self.read_identifier(),
                '\'' | '"' => self.read_string(c)?,
                ' ' => {
                    self.advance();
                }
                _ => {
                    self.advance();
                    self.tokens.push(Token::Char(c));
                }
            }
        }
    }

    fn at_line_start(&self) -> bool {
        matches!(self.tokens.last(), None | Some(Token::Newline))
    }

    /// Counts leading spaces at two spaces per level and emits the
    /// `Indent`/`Dedent` run for the delta. The previous level is kept so a
    /// line that turns out blank can be rolled back.
    fn handle_indentation(&mut self) {
        let mut spaces = 0;
        while self.peek() == Some(' ') {
            self.advance();
            spaces += 1;
        }
        let new_indent = spaces / 2;

        if new_indent > self.indent {
            for _ in 0..new_indent - self.indent {
                self.tokens.push(Token::Indent);
            }
        } else if new_indent < self.indent {
            for _ in 0..self.indent - new_indent {
                self.tokens.push(Token::Dedent);
            }
        }
        self.old_indent = self.indent;
        self.indent = new_indent;
    }

    fn handle_newline(&mut self) {
        if matches!(self.tokens.last(), Some(Token::Indent | Token::Dedent)) {
            // The line held nothing but indentation; blank lines must not
            // alter the indent state.
            self.discard_trailing_indentation();
        } else if !self.at_line_start() {
            self.tokens.push(Token::Newline);
        }
    }

    fn discard_trailing_indentation(&mut self) {
        while let Some(last) = self.tokens.last() {
            if matches!(last, Token::Newline) {
                break;
            }
            self.tokens.pop();
        }
        self.indent = self.old_indent;
    }

    fn finish(&mut self) {
        if matches!(self.tokens.last(), Some(Token::Indent | Token::Dedent)) {
            self.discard_trailing_indentation();
        }
        if !matches!(self.tokens.last(), None | Some(Token::Newline)) {
            self.tokens.push(Token::Newline);
        }
        for _ in 0..self.indent {
            self.tokens.push(Token::Dedent);
        }
        self.indent = 0;
        self.tokens.push(Token::Eof);
    }

    fn skip_comment(&mut self) {
        // Leaves the '\n' for the main loop.
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
    }

    fn read_number(&mut self) -> LexResult<()> {
        let start = self.pos;
        while matches!(self.peek(), Some('0'..='9')) {
            self.advance();
        }
        let literal = &self.input[start..self.pos];
        let value = literal
            .parse::<i64>()
            .map_err(|_| LexError::InvalidIntegerLiteral {
                literal: literal.to_string(),
            })?;
        self.tokens.push(Token::Number(value));
        Ok(())
    }

    /// Reads an identifier up to the first terminator. The terminator set is
    /// `( ) , . : \n # space` and end of input; a space is consumed, the
    /// rest are left for the main loop.
    fn read_identifier(&mut self) {
        let mut lexeme = String::new();
        while let Some(c) = self.peek() {
            match c {
                '(' | ')' | ',' | '.' | ':' | '\n' | '#' => break,
                ' ' => {
                    self.advance();
                    break;
                }
                _ => {
                    self.advance();
                    lexeme.push(c);
                }
            }
        }
        self.tokens.push(keyword(&lexeme).unwrap_or(Token::Id(lexeme)));
    }

    fn read_string(&mut self, quote: char) -> LexResult<()> {
        self.advance();
        let mut value = String::new();
        loop {
            match self.advance() {
                None => return Err(LexError::UnterminatedString),
                Some(c) if c == quote => break,
                Some('\\') => match self.advance() {
                    None => return Err(LexError::UnterminatedString),
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some(escaped) => value.push(escaped),
                },
                Some(c) => value.push(c),
            }
        }
        self.tokens.push(Token::String(value));
        Ok(())
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }
}

fn keyword(lexeme: &str) -> Option<Token> {
    let token = match lexeme {
        "class" => Token::Class,
        "return" => Token::Return,
        "if" => Token::If,
        "else" => Token::Else,
        "def" => Token::Def,
        "print" => Token::Print,
        "and" => Token::And,
        "or" => Token::Or,
        "not" => Token::Not,
        "None" => Token::None,
        "True" => Token::True,
        "False" => Token::False,
        _ => return None,
    };
    Some(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn id(name: &str) -> Token {
        Token::Id(name.to_string())
    }

    fn string(value: &str) -> Token {
        Token::String(value.to_string())
    }

    #[test]
    fn lexes_simple_program() {
        let input = indoc! {"
            if 1:
              x = 2
              print x
        "};
        let tokens = tokenize(input).expect("tokenize should succeed");
        let expected = vec![
            Token::If,
            Token::Number(1),
            Token::Char(':'),
            Token::Newline,
            Token::Indent,
            id("x"),
            Token::Char('='),
            Token::Number(2),
            Token::Newline,
            Token::Print,
            id("x"),
            Token::Newline,
            Token::Dedent,
            Token::Eof,
        ];
        assert_eq!(tokens, expected);
    }

    #[test]
    fn lexes_two_character_comparisons() {
        let tokens = tokenize("a == b != c <= d >= e\n").expect("tokenize should succeed");
        let expected = vec![
            id("a"),
            Token::Eq,
            id("b"),
            Token::NotEq,
            id("c"),
            Token::LessOrEq,
            id("d"),
            Token::GreaterOrEq,
            id("e"),
            Token::Newline,
            Token::Eof,
        ];
        assert_eq!(tokens, expected);
    }

    #[test]
    fn lexes_operators_and_punctuation_as_char_tokens() {
        let tokens = tokenize("x = 1 + 2 * (3 - 4) / 5\n").expect("tokenize should succeed");
        let expected = vec![
            id("x"),
            Token::Char('='),
            Token::Number(1),
            Token::Char('+'),
            Token::Number(2),
            Token::Char('*'),
            Token::Char('('),
            Token::Number(3),
            Token::Char('-'),
            Token::Number(4),
            Token::Char(')'),
            Token::Char('/'),
            Token::Number(5),
            Token::Newline,
            Token::Eof,
        ];
        assert_eq!(tokens, expected);
    }

    #[test]
    fn recognizes_all_keywords() {
        let tokens = tokenize("class return if else def print and or not None True False\n")
            .expect("tokenize should succeed");
        let expected = vec![
            Token::Class,
            Token::Return,
            Token::If,
            Token::Else,
            Token::Def,
            Token::Print,
            Token::And,
            Token::Or,
            Token::Not,
            Token::None,
            Token::True,
            Token::False,
            Token::Newline,
            Token::Eof,
        ];
        assert_eq!(tokens, expected);
    }

    #[test]
    fn identifier_runs_to_terminator() {
        // Only `( ) , . : space newline #` end an identifier, so an unspaced
        // operator is absorbed into the lexeme.
        let tokens = tokenize("a+b\n").expect("tokenize should succeed");
        assert_eq!(tokens, vec![id("a+b"), Token::Newline, Token::Eof]);

        let tokens = tokenize("value.field\n").expect("tokenize should succeed");
        assert_eq!(
            tokens,
            vec![
                id("value"),
                Token::Char('.'),
                id("field"),
                Token::Newline,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn lexes_method_call_punctuation() {
        let tokens = tokenize("obj.call(1, 2)\n").expect("tokenize should succeed");
        let expected = vec![
            id("obj"),
            Token::Char('.'),
            id("call"),
            Token::Char('('),
            Token::Number(1),
            Token::Char(','),
            Token::Number(2),
            Token::Char(')'),
            Token::Newline,
            Token::Eof,
        ];
        assert_eq!(tokens, expected);
    }

    #[test]
    fn lexes_string_literals_with_escapes() {
        let tokens =
            tokenize("x = 'ab\\ncd' + \"e\\tf\" + '\\\"\\'\\\\'\n").expect("tokenize should succeed");
        let expected = vec![
            id("x"),
            Token::Char('='),
            string("ab\ncd"),
            Token::Char('+'),
            string("e\tf"),
            Token::Char('+'),
            string("\"'\\"),
            Token::Newline,
            Token::Eof,
        ];
        assert_eq!(tokens, expected);
    }

    #[test]
    fn unknown_escape_passes_character_through() {
        let tokens = tokenize("'a\\qb'\n").expect("tokenize should succeed");
        assert_eq!(tokens, vec![string("aqb"), Token::Newline, Token::Eof]);
    }

    #[test]
    fn errors_on_unterminated_string() {
        assert_eq!(tokenize("x = 'abc"), Err(LexError::UnterminatedString));
        assert_eq!(tokenize("x = \"abc\\"), Err(LexError::UnterminatedString));
    }

    #[test]
    fn errors_on_integer_overflow() {
        let err = tokenize("n = 99999999999999999999999999\n").expect_err("expected overflow");
        assert_eq!(
            err,
            LexError::InvalidIntegerLiteral {
                literal: "99999999999999999999999999".to_string()
            }
        );
    }

    #[test]
    fn comment_only_input_yields_eof() {
        assert_eq!(tokenize("# nothing here\n"), Ok(vec![Token::Eof]));
        assert_eq!(tokenize("# one\n# two\n"), Ok(vec![Token::Eof]));
    }

    #[test]
    fn whitespace_only_input_yields_eof() {
        assert_eq!(tokenize(""), Ok(vec![Token::Eof]));
        assert_eq!(tokenize("   "), Ok(vec![Token::Eof]));
        assert_eq!(tokenize("\n\n  \n"), Ok(vec![Token::Eof]));
    }

    #[test]
    fn trailing_comment_does_not_produce_tokens() {
        let tokens = tokenize("x = 1 # set x\n").expect("tokenize should succeed");
        assert_eq!(
            tokens,
            vec![
                id("x"),
                Token::Char('='),
                Token::Number(1),
                Token::Newline,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn blank_and_comment_lines_keep_indent_state() {
        let input = indoc! {"
            if 1:
              x = 1

              # note
              y = 2
        "};
        let tokens = tokenize(input).expect("tokenize should succeed");
        let expected = vec![
            Token::If,
            Token::Number(1),
            Token::Char(':'),
            Token::Newline,
            Token::Indent,
            id("x"),
            Token::Char('='),
            Token::Number(1),
            Token::Newline,
            id("y"),
            Token::Char('='),
            Token::Number(2),
            Token::Newline,
            Token::Dedent,
            Token::Eof,
        ];
        assert_eq!(tokens, expected);
    }

    #[test]
    fn emits_final_newline_when_input_lacks_one() {
        let tokens = tokenize("print x").expect("tokenize should succeed");
        assert_eq!(
            tokens,
            vec![Token::Print, id("x"), Token::Newline, Token::Eof]
        );
    }

    #[test]
    fn emits_dedents_before_eof() {
        let tokens = tokenize("if 1:\n  x = 2").expect("tokenize should succeed");
        let expected = vec![
            Token::If,
            Token::Number(1),
            Token::Char(':'),
            Token::Newline,
            Token::Indent,
            id("x"),
            Token::Char('='),
            Token::Number(2),
            Token::Newline,
            Token::Dedent,
            Token::Eof,
        ];
        assert_eq!(tokens, expected);
    }

    #[test]
    fn dedents_two_levels_at_once() {
        let input = indoc! {"
            if 1:
              if 2:
                x = 3
            y = 4
        "};
        let tokens = tokenize(input).expect("tokenize should succeed");
        let expected = vec![
            Token::If,
            Token::Number(1),
            Token::Char(':'),
            Token::Newline,
            Token::Indent,
            Token::If,
            Token::Number(2),
            Token::Char(':'),
            Token::Newline,
            Token::Indent,
            id("x"),
            Token::Char('='),
            Token::Number(3),
            Token::Newline,
            Token::Dedent,
            Token::Dedent,
            id("y"),
            Token::Char('='),
            Token::Number(4),
            Token::Newline,
            Token::Eof,
        ];
        assert_eq!(tokens, expected);
    }

    #[test]
    fn indent_and_dedent_tokens_balance() {
        let input = indoc! {"
            class A:
              def f():
                if 1:
                  return 2
            a = A()
        "};
        let tokens = tokenize(input).expect("tokenize should succeed");
        let indents = tokens.iter().filter(|t| matches!(t, Token::Indent)).count();
        let dedents = tokens.iter().filter(|t| matches!(t, Token::Dedent)).count();
        assert_eq!(indents, dedents);
        assert_eq!(tokens.last(), Some(&Token::Eof));
        assert_eq!(
            tokens.iter().filter(|t| matches!(t, Token::Eof)).count(),
            1
        );
    }

    #[test]
    fn valued_payloads_round_trip() {
        let tokens = tokenize("foo 42 bar 7\n").expect("tokenize should succeed");
        let rebuilt = tokens
            .iter()
            .filter_map(|token| match token {
                Token::Id(name) => Some(name.clone()),
                Token::Number(value) => Some(value.to_string()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(rebuilt, "foo 42 bar 7");
    }

    #[test]
    fn cursor_starts_at_first_token_and_stops_at_eof() {
        let mut lexer = Lexer::new("x = 1\n").expect("lexer should build");
        assert_eq!(lexer.current(), &id("x"));
        assert_eq!(lexer.current(), &id("x"));
        assert_eq!(lexer.next(), &Token::Char('='));
        assert_eq!(lexer.next(), &Token::Number(1));
        assert_eq!(lexer.next(), &Token::Newline);
        assert_eq!(lexer.next(), &Token::Eof);
        assert_eq!(lexer.next(), &Token::Eof);
        assert_eq!(lexer.current(), &Token::Eof);
    }

    #[test]
    fn builds_from_reader() {
        let lexer = Lexer::from_reader("print 1\n".as_bytes()).expect("lexer should build");
        assert_eq!(lexer.current(), &Token::Print);
    }
}
