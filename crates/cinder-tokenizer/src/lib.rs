//! Lexer for C-family source text.
//!
//! Whitespace, comments and preprocessor lines are trivia and produce no
//! tokens. Every token produced here is spelled in the source, so all of them
//! are modifiable.

mod cursor;

pub use cinder_syntax::SyntaxKind;
use cinder_syntax::SyntaxKind::*;
use cinder_syntax::{Token, TokenBuffer};
use cursor::{Cursor, EOF_CHAR};
use text_size::{TextLen, TextRange, TextSize};

/// Lexes `text` into a buffer terminated by an `EOF` token.
pub fn tokenize(text: &str) -> TokenBuffer {
    let mut tokenizer = Tokenizer::new(text);
    let mut tokens = Vec::new();

    loop {
        let token = tokenizer.next_token();
        tokens.push(token);
        if token.kind == EOF {
            break;
        }
    }

    TokenBuffer::new(text, tokens)
}

pub struct Tokenizer<'a> {
    text: &'a str,
    cursor: Cursor<'a>,
    line_start: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, cursor: Cursor::new(text), line_start: true }
    }

    fn offset(&self) -> TextSize {
        self.text.text_len() - self.cursor.remaining()
    }

    fn range(&self) -> TextRange {
        let len = self.cursor.pos_within_token();
        TextRange::at(self.offset() - len, len)
    }

    fn text(&self) -> &'a str {
        &self.text[self.range()]
    }

    pub fn next_token(&mut self) -> Token {
        self.trivia();
        let kind = self.syntax_kind();
        let range = self.range();
        self.cursor.reset_pos_within_token();
        self.line_start = false;

        Token::new(kind, range)
    }

    fn trivia(&mut self) {
        loop {
            match self.cursor.peek() {
                '/' if self.cursor.second() == '/' => {
                    self.cursor.advance_while(|c| c != '\n');
                }
                '/' if self.cursor.second() == '*' => {
                    self.cursor.advance();
                    self.cursor.advance();
                    while !self.cursor.is_eof() {
                        if self.cursor.advance() == '*' && self.cursor.eat('/') {
                            break;
                        }
                    }
                }
                '#' if self.line_start => self.directive(),
                c if c.is_ascii_whitespace() && !self.cursor.is_eof() => {
                    if self.cursor.advance() == '\n' {
                        self.line_start = true;
                    }
                }
                _ => break,
            }
        }

        self.cursor.reset_pos_within_token();
    }

    /// Skips a preprocessor line, following backslash continuations.
    fn directive(&mut self) {
        while !self.cursor.is_eof() {
            match self.cursor.peek() {
                '\n' => break,
                '\\' if self.cursor.second() == '\n' => {
                    self.cursor.advance();
                    self.cursor.advance();
                }
                _ => {
                    self.cursor.advance();
                }
            }
        }
    }

    fn syntax_kind(&mut self) -> SyntaxKind {
        if self.cursor.is_eof() {
            return EOF;
        }

        match self.cursor.advance() {
            '(' => L_PAREN,
            ')' => R_PAREN,
            '[' => L_BRACK,
            ']' => R_BRACK,
            '{' => L_CURLY,
            '}' => R_CURLY,
            ';' => SEMICOLON,
            ',' => COMMA,
            '?' => QUESTION,
            '~' => TILDE,
            ':' => self.punct(COLON, &[(':', COLON2)]),
            '.' if self.cursor.peek().is_ascii_digit() => self.number('.'),
            '.' if self.cursor.peek() == '.' && self.cursor.second() == '.' => {
                self.cursor.advance();
                self.cursor.advance();
                ELLIPSIS
            }
            '.' => self.punct(DOT, &[('*', DOT_STAR)]),
            '-' => {
                if self.cursor.eat('>') {
                    self.punct(ARROW, &[('*', ARROW_STAR)])
                } else {
                    self.punct(MINUS, &[('-', MINUS2), ('=', MINUSEQ)])
                }
            }
            '+' => self.punct(PLUS, &[('+', PLUS2), ('=', PLUSEQ)]),
            '*' => self.punct(STAR, &[('=', STAREQ)]),
            '/' => self.punct(SLASH, &[('=', SLASHEQ)]),
            '%' => self.punct(PERCENT, &[('=', PERCENTEQ)]),
            '^' => self.punct(CARET, &[('=', CARETEQ)]),
            '&' => self.punct(AMP, &[('&', AMP2), ('=', AMPEQ)]),
            '|' => self.punct(PIPE, &[('|', PIPE2), ('=', PIPEEQ)]),
            '!' => self.punct(BANG, &[('=', NEQ)]),
            '=' => self.punct(EQ, &[('=', EQ2)]),
            '#' => self.punct(HASH, &[('#', HASH2)]),
            '<' => {
                if self.cursor.eat('<') {
                    self.punct(SHL, &[('=', SHLEQ)])
                } else if self.cursor.eat('=') {
                    self.punct(LTEQ, &[('>', SPACESHIP)])
                } else {
                    LT
                }
            }
            '>' => {
                if self.cursor.eat('>') {
                    self.punct(SHR, &[('=', SHREQ)])
                } else {
                    self.punct(GT, &[('=', GTEQ)])
                }
            }
            '\'' => self.quoted('\'', CHAR_LITERAL),
            '"' => self.quoted('"', STRING_LITERAL),
            first_char @ '0'..='9' => self.number(first_char),
            'A'..='Z' | 'a'..='z' | '_' | '$' => {
                self.cursor.advance_while(is_ident_continue);
                self.ident_or_literal()
            }
            EOF_CHAR => EOF,
            _ => UNKNOWN,
        }
    }

    fn punct(&mut self, single: SyntaxKind, compound: &[(char, SyntaxKind)]) -> SyntaxKind {
        for &(next, kind) in compound {
            if self.cursor.eat(next) {
                return kind;
            }
        }
        single
    }

    fn ident_or_literal(&mut self) -> SyntaxKind {
        let text = self.text();
        match self.cursor.peek() {
            '"' if matches!(text, "R" | "LR" | "uR" | "UR" | "u8R") => {
                self.cursor.advance();
                self.raw_string()
            }
            quote @ ('"' | '\'') if matches!(text, "L" | "u" | "U" | "u8") => {
                self.cursor.advance();
                let kind = if quote == '"' { STRING_LITERAL } else { CHAR_LITERAL };
                self.quoted(quote, kind)
            }
            _ => SyntaxKind::from_keyword(text).unwrap_or(IDENT),
        }
    }

    fn quoted(&mut self, quote: char, kind: SyntaxKind) -> SyntaxKind {
        while !self.cursor.is_eof() {
            match self.cursor.advance() {
                '\\' => {
                    self.cursor.advance();
                }
                '\n' => return UNKNOWN,
                c if c == quote => {
                    self.ud_suffix();
                    return kind;
                }
                _ => {}
            }
        }
        UNKNOWN
    }

    fn raw_string(&mut self) -> SyntaxKind {
        let delimiter_start = self.cursor.pos_within_token();
        self.cursor.advance_while(|c| c != '(' && c != '"' && !c.is_ascii_whitespace());
        if !self.cursor.eat('(') {
            return UNKNOWN;
        }
        let range = self.range();
        let delimiter = &self.text
            [TextRange::new(range.start() + delimiter_start, range.end() - TextSize::of('('))];

        while !self.cursor.is_eof() {
            if self.cursor.advance() == ')' {
                let rest = &self.text[usize::from(self.offset())..];
                if rest.strip_prefix(delimiter).is_some_and(|rest| rest.starts_with('"')) {
                    for _ in 0..delimiter.chars().count() + 1 {
                        self.cursor.advance();
                    }
                    self.ud_suffix();
                    return STRING_LITERAL;
                }
            }
        }
        UNKNOWN
    }

    fn ud_suffix(&mut self) {
        if is_ident_start(self.cursor.peek()) {
            self.cursor.advance_while(is_ident_continue);
        }
    }

    fn number(&mut self, first_char: char) -> SyntaxKind {
        let mut float = first_char == '.';
        let mut hex = false;

        if float {
            self.digits(false);
        } else {
            if first_char == '0' {
                match self.cursor.peek() {
                    'x' | 'X' => {
                        self.cursor.advance();
                        hex = true;
                    }
                    'b' | 'B' => {
                        self.cursor.advance();
                    }
                    _ => {}
                }
            }
            self.digits(hex);
            if self.cursor.matches('.') && self.cursor.second() != '.' {
                self.cursor.advance();
                self.digits(hex);
                float = true;
            }
        }

        let exponent = if hex { ['p', 'P'] } else { ['e', 'E'] };
        if exponent.contains(&self.cursor.peek()) {
            let signed = matches!(self.cursor.second(), '+' | '-');
            self.cursor.advance();
            if signed {
                self.cursor.advance();
            }
            self.digits(false);
            float = true;
        }

        self.cursor.advance_while(is_ident_continue);

        if float { FLOAT_NUMBER } else { INT_NUMBER }
    }

    fn digits(&mut self, allow_hex: bool) {
        loop {
            match self.cursor.peek() {
                '0'..='9' => {}
                'a'..='f' | 'A'..='F' if allow_hex => {}
                '\'' if self.cursor.second().is_ascii_hexdigit() => {}
                _ => return,
            }
            self.cursor.advance();
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(text: &str) -> Vec<(SyntaxKind, &str)> {
        let buffer = tokenize(text);
        buffer
            .tokens()
            .iter()
            .map(|token| (token.kind, &text[token.range]))
            .filter(|&(kind, _)| kind != EOF)
            .collect()
    }

    #[test]
    fn test_number_literals() {
        let inputs = vec![
            ("123", INT_NUMBER),
            ("0x1f", INT_NUMBER),
            ("0b1010", INT_NUMBER),
            ("1'000'000", INT_NUMBER),
            ("10ull", INT_NUMBER),
            ("12_km", INT_NUMBER),
            ("1.5", FLOAT_NUMBER),
            (".5f", FLOAT_NUMBER),
            ("1e10", FLOAT_NUMBER),
            ("1.0e-5", FLOAT_NUMBER),
            ("0x1p3", FLOAT_NUMBER),
            ("1.2_w", FLOAT_NUMBER),
        ];

        for (input, expected_kind) in inputs {
            assert_eq!(lex(input), [(expected_kind, input)], "Input: '{input}'");
        }
    }

    #[test]
    fn test_keywords_and_identifiers() {
        assert_eq!(
            lex("template <class T> int templated"),
            [
                (TEMPLATE_KW, "template"),
                (LT, "<"),
                (CLASS_KW, "class"),
                (IDENT, "T"),
                (GT, ">"),
                (INT_KW, "int"),
                (IDENT, "templated"),
            ]
        );
    }

    #[test]
    fn test_longest_match_punctuation() {
        assert_eq!(
            lex("a->*b ->c::d <=> ... <<= .*"),
            [
                (IDENT, "a"),
                (ARROW_STAR, "->*"),
                (IDENT, "b"),
                (ARROW, "->"),
                (IDENT, "c"),
                (COLON2, "::"),
                (IDENT, "d"),
                (SPACESHIP, "<=>"),
                (ELLIPSIS, "..."),
                (SHLEQ, "<<="),
                (DOT_STAR, ".*"),
            ]
        );
    }

    #[test]
    fn test_string_and_char_literals() {
        assert_eq!(
            lex(r#"u8"a\"b" L'x' 'y'_c "s"_w R"x(a)"b)x""#),
            [
                (STRING_LITERAL, r#"u8"a\"b""#),
                (CHAR_LITERAL, "L'x'"),
                (CHAR_LITERAL, "'y'_c"),
                (STRING_LITERAL, r#""s"_w"#),
                (STRING_LITERAL, r#"R"x(a)"b)x""#),
            ]
        );
    }

    #[test]
    fn test_trivia_is_skipped() {
        let text = "#include <x>\n// line\nint /* block */ a; # define\n";
        assert_eq!(
            lex(text),
            [(INT_KW, "int"), (IDENT, "a"), (SEMICOLON, ";"), (HASH, "#"), (IDENT, "define")]
        );
    }

    #[test]
    fn test_offsets_and_eof() {
        let buffer = tokenize("int  a;");
        let offsets: Vec<u32> = buffer.tokens().iter().map(|token| token.offset().into()).collect();

        assert_eq!(offsets, [0, 5, 6, 7]);
        assert!(buffer.ends_with_eof());
        assert!(buffer.tokens().iter().all(|token| token.modifiable));
    }
}
