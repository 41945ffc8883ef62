//! Compact grammar notation for tests.
//!
//! Builds contract trees the way a front end would, trivia included:
//!
//! ```text
//! option root = Sum;
//! Sum = Num ("+" Num)*;
//! @raw Num = /[0-9]+/;
//! tm Keyword = "if" [scope = "keyword.control"];
//! ```

use crate::Compiler;
use crate::ir::Grammar;
use crate::reduce::reduce;
use crate::syntax::{SyntaxKind, SyntaxNode, TreeBuilder};

use SyntaxKind::*;

/// Parse test notation into a contract tree. Panics on malformed input.
pub(crate) fn parse_grammar(src: &str) -> SyntaxNode {
    let mut p = TestParser {
        tokens: lex(src),
        pos: 0,
        builder: TreeBuilder::new(),
    };
    p.builder.start_node(Root);
    p.trivia();
    while p.pos < p.tokens.len() {
        p.item();
    }
    p.builder.finish_node();
    p.builder.finish()
}

pub(crate) fn reduce_grammar(src: &str) -> Grammar {
    reduce(&parse_grammar(src)).unwrap()
}

pub(crate) fn compiler(src: &str) -> Compiler {
    Compiler::new(&parse_grammar(src)).unwrap()
}

fn lex(src: &str) -> Vec<(SyntaxKind, &str)> {
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < src.len() {
        let rest = &src[i..];
        let c = rest.chars().next().unwrap();
        let (kind, len) = match c {
            ' ' | '\t' | '\r' => (
                Whitespace,
                rest.find(|c: char| !matches!(c, ' ' | '\t' | '\r'))
                    .unwrap_or(rest.len()),
            ),
            '\n' => (Newline, 1),
            '/' if rest.starts_with("//") => (Comment, rest.find('\n').unwrap_or(rest.len())),
            '/' => (Regex, delimited(rest, '/')),
            '"' => (String, delimited(rest, '"')),
            '@' => {
                let len = 1 + word_len(&rest[1..]);
                let kind = match &rest[..len] {
                    "@drop" => KwDrop,
                    "@terminal" => KwTerminal,
                    "@raw" => KwRawTerminal,
                    "@inline" => KwInline,
                    "@promote" => KwPromoteError,
                    "@error" => KwNameAsError,
                    other => panic!("unknown marker {other}"),
                };
                (kind, len)
            }
            c if c.is_ascii_digit() => (
                Number,
                rest.find(|c: char| !c.is_ascii_digit())
                    .unwrap_or(rest.len()),
            ),
            c if c.is_alphabetic() || c == '_' => {
                let len = word_len(rest);
                let kind = match &rest[..len] {
                    "option" => KwOption,
                    "tm" => KwTm,
                    "true" => True,
                    "false" => False,
                    _ => Ident,
                };
                (kind, len)
            }
            '=' => (Equals, 1),
            ';' => (Semicolon, 1),
            ',' => (Comma, 1),
            '|' => (Pipe, 1),
            '!' => (Bang, 1),
            '?' => (Question, 1),
            '*' => (Star, 1),
            '+' => (Plus, 1),
            '(' => (ParenOpen, 1),
            ')' => (ParenClose, 1),
            '{' => (BraceOpen, 1),
            '}' => (BraceClose, 1),
            '[' => (BracketOpen, 1),
            ']' => (BracketClose, 1),
            other => panic!("unexpected character {other:?}"),
        };
        tokens.push((kind, &rest[..len]));
        i += len;
    }
    tokens
}

fn word_len(s: &str) -> usize {
    s.find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(s.len())
}

/// Length of a token running from `s[0]` to the next unescaped `delim`.
fn delimited(s: &str, delim: char) -> usize {
    let mut escaped = false;
    for (i, c) in s.char_indices().skip(1) {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == delim {
            return i + 1;
        }
    }
    panic!("unterminated {delim} in {s:?}")
}

struct TestParser<'s> {
    tokens: Vec<(SyntaxKind, &'s str)>,
    pos: usize,
    builder: TreeBuilder,
}

impl TestParser<'_> {
    fn peek(&self) -> Option<SyntaxKind> {
        self.tokens.get(self.pos).map(|(k, _)| *k)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.peek() == Some(kind)
    }

    fn trivia(&mut self) {
        while let Some(&(kind, text)) = self.tokens.get(self.pos) {
            if !kind.is_trivia() {
                break;
            }
            self.builder.token(kind, text);
            self.pos += 1;
        }
    }

    fn bump(&mut self) {
        let (kind, text) = self.tokens[self.pos];
        self.builder.token(kind, text);
        self.pos += 1;
        self.trivia();
    }

    fn expect(&mut self, kind: SyntaxKind) {
        assert!(
            self.at(kind),
            "expected {kind:?}, found {:?}",
            self.tokens.get(self.pos)
        );
        self.bump();
    }

    fn item(&mut self) {
        if self.at(KwOption) {
            self.builder.start_node(OptionDecl);
            self.bump();
            self.expect(Ident);
            self.expect(Equals);
            self.value();
            self.expect(Semicolon);
            self.builder.finish_node();
            return;
        }

        let tm = self.at(KwTm);
        self.builder
            .start_node(if tm { TmDefinition } else { Definition });
        if tm {
            self.bump();
        }
        while self.peek().is_some_and(SyntaxKind::is_marker_keyword) {
            self.marker();
        }
        self.expect(Ident);
        self.expect(Equals);
        self.choice();
        if self.at(BracketOpen) {
            self.bump();
            self.property();
            while self.at(Comma) {
                self.bump();
                self.property();
            }
            self.expect(BracketClose);
        }
        self.expect(Semicolon);
        self.builder.finish_node();
    }

    fn marker(&mut self) {
        self.builder.start_node(Marker);
        self.bump();
        self.builder.finish_node();
    }

    fn property(&mut self) {
        self.builder.start_node(Property);
        self.expect(Ident);
        self.expect(Equals);
        self.value();
        self.builder.finish_node();
    }

    fn value(&mut self) {
        let kind = self.peek();
        assert!(
            matches!(kind, Some(String | Number | True | False | Ident)),
            "expected a value, found {kind:?}"
        );
        self.bump();
    }

    fn choice(&mut self) {
        let checkpoint = self.builder.checkpoint();
        self.sequence();
        if self.at(Pipe) {
            self.builder.start_node_at(checkpoint, Choice);
            while self.at(Pipe) {
                self.bump();
                self.sequence();
            }
            self.builder.finish_node();
        }
    }

    fn sequence(&mut self) {
        let checkpoint = self.builder.checkpoint();
        self.prefix();
        let mut count = 1;
        while self.starts_prefix() {
            self.prefix();
            count += 1;
        }
        if count > 1 {
            self.builder.start_node_at(checkpoint, Sequence);
            self.builder.finish_node();
        }
    }

    fn starts_prefix(&self) -> bool {
        self.peek().is_some_and(|k| {
            k.is_marker_keyword()
                || matches!(
                    k,
                    Ident | String | Number | True | False | Regex | ParenOpen | Bang
                )
        })
    }

    fn prefix(&mut self) {
        match self.peek() {
            Some(Bang) => {
                self.builder.start_node(Not);
                self.bump();
                self.prefix();
                self.builder.finish_node();
            }
            Some(k) if k.is_marker_keyword() => {
                self.builder.start_node(Marked);
                while self.peek().is_some_and(SyntaxKind::is_marker_keyword) {
                    self.marker();
                }
                self.prefix();
                self.builder.finish_node();
            }
            _ => self.suffix(),
        }
    }

    fn suffix(&mut self) {
        let checkpoint = self.builder.checkpoint();
        self.primary();
        if self.peek().is_some_and(SyntaxKind::is_suffix_operator) {
            self.builder.start_node_at(checkpoint, Suffix);
            self.bump();
            self.builder.finish_node();
        }
    }

    fn primary(&mut self) {
        match self.peek() {
            Some(Ident | String | Number | True | False) => self.bump(),
            Some(Regex) => {
                self.builder.start_node(RegexTerm);
                self.bump();
                if self.at(BraceOpen) {
                    self.builder.start_node(RepeatCount);
                    self.bump();
                    self.expect(Number);
                    self.expect(BraceClose);
                    self.builder.finish_node();
                }
                self.builder.finish_node();
            }
            Some(ParenOpen) => {
                self.builder.start_node(Group);
                self.bump();
                self.choice();
                self.expect(ParenClose);
                self.builder.finish_node();
            }
            other => panic!("expected an element, found {other:?}"),
        }
    }
}
