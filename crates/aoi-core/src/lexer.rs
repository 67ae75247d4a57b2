//! Tokenizer for AOI source text.
//!
//! [`tokenize`] splits source text into classified [`Token`]s for syntax
//! highlighting. The scan is a single pass with one character of lookahead
//! and never fails: any character no rule recognizes becomes a one-character
//! [`TokenKind::Text`] token. Concatenating the token values in order always
//! reproduces the input.
//!
//! Identifier-shaped lexemes are classified against a [`Vocabulary`]
//! (keywords first, then builtin functions), so the reserved word lists are
//! data rather than code.

use std::collections::HashSet;
use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Classification of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenKind {
    Keyword,
    BuiltinFunction,
    String,
    Comment,
    Number,
    Operator,
    Identifier,
    /// Whitespace and any character no other rule matched.
    Text,
}

impl TokenKind {
    /// Convert to string representation.
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Keyword => "keyword",
            TokenKind::BuiltinFunction => "builtin-function",
            TokenKind::String => "string",
            TokenKind::Comment => "comment",
            TokenKind::Number => "number",
            TokenKind::Operator => "operator",
            TokenKind::Identifier => "identifier",
            TokenKind::Text => "text",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified slice of source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    /// The raw lexeme, exactly as it appears in the source.
    pub value: String,
    /// Byte range of the lexeme in the source.
    pub span: Range<usize>,
}

/// The closed sets of reserved identifiers.
///
/// Both sets are case-sensitive. A word present in both classifies as a
/// keyword.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    pub keywords: HashSet<String>,
    pub builtins: HashSet<String>,
}

impl Vocabulary {
    /// Build a vocabulary from keyword and builtin-function word lists.
    pub fn new<K, B>(keywords: K, builtins: B) -> Self
    where
        K: IntoIterator,
        K::Item: Into<String>,
        B: IntoIterator,
        B::Item: Into<String>,
    {
        Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
            builtins: builtins.into_iter().map(Into::into).collect(),
        }
    }

    /// Classify an identifier-shaped word.
    pub fn classify(&self, word: &str) -> TokenKind {
        if self.keywords.contains(word) {
            TokenKind::Keyword
        } else if self.builtins.contains(word) {
            TokenKind::BuiltinFunction
        } else {
            TokenKind::Identifier
        }
    }
}

/// Tokenize `source`, classifying identifiers against `vocabulary`.
pub fn tokenize(source: &str, vocabulary: &Vocabulary) -> Vec<Token> {
    Tokens::new(source, vocabulary).collect()
}

/// Streaming form of [`tokenize`].
pub struct Tokens<'a> {
    source: &'a str,
    vocabulary: &'a Vocabulary,
    pos: usize,
}

impl<'a> Tokens<'a> {
    pub fn new(source: &'a str, vocabulary: &'a Vocabulary) -> Self {
        Self {
            source,
            vocabulary,
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    /// Consume the rest of a string literal after its opening quote.
    ///
    /// A backslash swallows the following character whatever it is. An
    /// unterminated literal runs to end of input.
    fn eat_string_tail(&mut self) {
        while let Some(c) = self.bump() {
            match c {
                '"' => break,
                '\\' => {
                    self.bump();
                }
                _ => {}
            }
        }
    }

    fn token(&self, kind: TokenKind, start: usize) -> Token {
        Token {
            kind,
            value: self.source[start..self.pos].to_string(),
            span: start..self.pos,
        }
    }
}

impl Iterator for Tokens<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let start = self.pos;
        let c = self.bump()?;

        let kind = match c {
            '/' if self.peek() == Some('/') => {
                self.eat_while(|c| c != '\n');
                TokenKind::Comment
            }
            '"' => {
                self.eat_string_tail();
                TokenKind::String
            }
            c if c.is_ascii_digit() => {
                // No check for repeated dots: "1.2.3" is a single number.
                self.eat_while(|c| c.is_ascii_digit() || c == '.');
                TokenKind::Number
            }
            c if is_operator(c) => {
                if matches!(c, '=' | '<' | '>' | '!') && self.peek() == Some('=') {
                    self.bump();
                }
                TokenKind::Operator
            }
            c if is_ident_start(c) => {
                self.eat_while(is_ident_continue);
                self.vocabulary.classify(&self.source[start..self.pos])
            }
            _ => TokenKind::Text,
        };

        Some(self.token(kind, start))
    }
}

fn is_operator(c: char) -> bool {
    matches!(
        c,
        '+' | '-'
            | '*'
            | '/'
            | '%'
            | '='
            | '!'
            | '<'
            | '>'
            | '('
            | ')'
            | '{'
            | '}'
            | '['
            | ']'
            | ';'
            | ','
            | '.'
    )
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn vocabulary() -> Vocabulary {
        Vocabulary::new(
            [
                "var", "fun", "if", "else", "while", "for", "return", "true", "false", "nil",
                "and", "or", "not",
            ],
            ["write", "scan", "clock"],
        )
    }

    fn kinds_and_values(source: &str) -> Vec<(TokenKind, String)> {
        tokenize(source, &vocabulary())
            .into_iter()
            .map(|t| (t.kind, t.value))
            .collect()
    }

    fn tok(kind: TokenKind, value: &str) -> (TokenKind, String) {
        (kind, value.to_string())
    }

    #[test]
    fn test_variable_declaration() {
        use TokenKind::*;
        assert_eq!(
            kinds_and_values("var x = 5;"),
            vec![
                tok(Keyword, "var"),
                tok(Text, " "),
                tok(Identifier, "x"),
                tok(Text, " "),
                tok(Operator, "="),
                tok(Text, " "),
                tok(Number, "5"),
                tok(Operator, ";"),
            ]
        );
    }

    #[test]
    fn test_two_char_operators_merge() {
        for op in ["==", "!=", "<=", ">="] {
            let source = format!("a {op} b");
            let tokens = kinds_and_values(&source);
            assert_eq!(tokens[2], tok(TokenKind::Operator, op), "source: {source}");
            assert_eq!(tokens.len(), 5);
        }
    }

    #[test]
    fn test_operators_do_not_merge_otherwise() {
        assert_eq!(
            kinds_and_values("=<"),
            vec![tok(TokenKind::Operator, "="), tok(TokenKind::Operator, "<")]
        );
        // Only the pair is merged; a third '=' starts a new token.
        assert_eq!(
            kinds_and_values("==="),
            vec![tok(TokenKind::Operator, "=="), tok(TokenKind::Operator, "=")]
        );
    }

    #[test]
    fn test_comment_runs_to_end_of_line() {
        assert_eq!(
            kinds_and_values("x // note\ny"),
            vec![
                tok(TokenKind::Identifier, "x"),
                tok(TokenKind::Text, " "),
                tok(TokenKind::Comment, "// note"),
                tok(TokenKind::Text, "\n"),
                tok(TokenKind::Identifier, "y"),
            ]
        );
    }

    #[test]
    fn test_comment_at_end_of_input() {
        assert_eq!(
            kinds_and_values("// trailing"),
            vec![tok(TokenKind::Comment, "// trailing")]
        );
    }

    #[test]
    fn test_single_slash_is_operator() {
        assert_eq!(
            kinds_and_values("a/b"),
            vec![
                tok(TokenKind::Identifier, "a"),
                tok(TokenKind::Operator, "/"),
                tok(TokenKind::Identifier, "b"),
            ]
        );
    }

    #[test]
    fn test_string_with_escaped_quote() {
        let source = r#"write("say \"hi\"");"#;
        let tokens = kinds_and_values(source);
        assert_eq!(tokens[0], tok(TokenKind::BuiltinFunction, "write"));
        assert_eq!(tokens[2], tok(TokenKind::String, r#""say \"hi\"""#));
        assert_eq!(tokens.len(), 5);
    }

    #[test]
    fn test_unterminated_string_closes_at_eof() {
        assert_eq!(
            kinds_and_values("\"open // not a comment"),
            vec![tok(TokenKind::String, "\"open // not a comment")]
        );
    }

    #[test]
    fn test_trailing_backslash_in_string() {
        assert_eq!(
            kinds_and_values("\"abc\\"),
            vec![tok(TokenKind::String, "\"abc\\")]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            kinds_and_values("3.14"),
            vec![tok(TokenKind::Number, "3.14")]
        );
        // A leading dot is punctuation, not part of the number.
        assert_eq!(
            kinds_and_values(".5"),
            vec![tok(TokenKind::Operator, "."), tok(TokenKind::Number, "5")]
        );
    }

    #[test]
    fn test_multi_dot_number_is_one_token() {
        // Known boundary case: the number rule does not validate dots.
        assert_eq!(
            kinds_and_values("1.2.3"),
            vec![tok(TokenKind::Number, "1.2.3")]
        );
    }

    #[test]
    fn test_digits_then_letters_split() {
        assert_eq!(
            kinds_and_values("9lives"),
            vec![
                tok(TokenKind::Number, "9"),
                tok(TokenKind::Identifier, "lives"),
            ]
        );
    }

    #[test]
    fn test_keyword_closure() {
        let vocab = vocabulary();
        for keyword in &vocab.keywords {
            let tokens = tokenize(keyword, &vocab);
            assert_eq!(tokens.len(), 1, "keyword {keyword}");
            assert_eq!(tokens[0].kind, TokenKind::Keyword);
            assert_eq!(&tokens[0].value, keyword);
        }
    }

    #[test]
    fn test_builtins_and_identifiers() {
        assert_eq!(
            kinds_and_values("clock writer"),
            vec![
                tok(TokenKind::BuiltinFunction, "clock"),
                tok(TokenKind::Text, " "),
                tok(TokenKind::Identifier, "writer"),
            ]
        );
    }

    #[test]
    fn test_classification_is_case_sensitive() {
        assert_eq!(
            kinds_and_values("Var"),
            vec![tok(TokenKind::Identifier, "Var")]
        );
    }

    #[test]
    fn test_keyword_wins_over_builtin() {
        let vocab = Vocabulary::new(["print"], ["print"]);
        assert_eq!(vocab.classify("print"), TokenKind::Keyword);
    }

    #[test]
    fn test_classification_ignores_context() {
        let vocab = vocabulary();
        for source in ["if", "(if)", "x.if", "\"s\" if // c", "1if"] {
            let kinds: Vec<_> = tokenize(source, &vocab)
                .into_iter()
                .filter(|t| t.value == "if")
                .map(|t| t.kind)
                .collect();
            assert_eq!(kinds, vec![TokenKind::Keyword], "source: {source}");
        }
    }

    #[test]
    fn test_unrecognized_characters_become_text() {
        assert_eq!(
            kinds_and_values("a @ é"),
            vec![
                tok(TokenKind::Identifier, "a"),
                tok(TokenKind::Text, " "),
                tok(TokenKind::Text, "@"),
                tok(TokenKind::Text, " "),
                tok(TokenKind::Text, "é"),
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("", &vocabulary()).is_empty());
    }

    #[test]
    fn test_spans_are_contiguous() {
        let source = "fun f(n) {\n  return n * 2; // dbl ✓\n}";
        let tokens = tokenize(source, &vocabulary());
        let mut expected_start = 0;
        for token in &tokens {
            assert_eq!(token.span.start, expected_start);
            assert_eq!(&source[token.span.clone()], token.value);
            expected_start = token.span.end;
        }
        assert_eq!(expected_start, source.len());
    }

    #[test]
    fn test_token_kind_display() {
        assert_eq!(TokenKind::BuiltinFunction.to_string(), "builtin-function");
        assert_eq!(TokenKind::Text.as_str(), "text");
    }
}
