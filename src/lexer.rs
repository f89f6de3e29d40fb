use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Text(String),
    Variable(String), // {{ name }}
    OpenBlock {
        name: String,         // e.g., "each"
        args: Option<String>, // e.g., "properties.items"
    },
    CloseBlock(String), // {{/each}}
    Else,               // {{else}}, {{^}}
    Comment(String),    // {{! ... }}, {{!-- ... --}}
    Unescaped(String),  // {{{ name }}}, {{& name}}
    Partial(String),    // {{> name}}
    Inverse(String),    // {{^name}}
}

/// A token plus its byte offset and `~` whitespace-control markers.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme {
    pub token: Token,
    pub offset: usize,
    pub strip_before: bool,
    pub strip_after: bool,
}

impl Lexeme {
    fn plain(token: Token, offset: usize) -> Self {
        Self {
            token,
            offset,
            strip_before: false,
            strip_after: false,
        }
    }
}

#[derive(Clone)]
pub struct Tokenizer<'a> {
    input: &'a str,
    cursor: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, cursor: 0 }
    }

    fn remaining(&self) -> &'a str {
        &self.input[self.cursor..]
    }

    fn advance(&mut self, n: usize) {
        self.cursor += n;
    }

    pub fn next_token(&mut self) -> Result<Option<Lexeme>> {
        let rest = self.remaining();
        if rest.is_empty() {
            return Ok(None);
        }

        let start = self.cursor;
        match rest.find("{{") {
            Some(0) => self.tag().map(Some),
            Some(idx) => {
                self.advance(idx);
                Ok(Some(Lexeme::plain(Token::Text(rest[..idx].to_string()), start)))
            }
            None => {
                self.advance(rest.len());
                Ok(Some(Lexeme::plain(Token::Text(rest.to_string()), start)))
            }
        }
    }

    /// Lexes the whole input, applying `~` whitespace control to the
    /// neighbouring text tokens.
    pub fn tokenize(mut self) -> Result<Vec<Lexeme>> {
        let mut lexemes: Vec<Lexeme> = Vec::new();
        let mut strip_next = false;

        while let Some(mut lexeme) = self.next_token()? {
            if let Token::Text(text) = &mut lexeme.token {
                if strip_next {
                    *text = text.trim_start().to_string();
                }
                strip_next = false;
                if text.is_empty() {
                    continue;
                }
            } else {
                if lexeme.strip_before {
                    if let Some(Lexeme {
                        token: Token::Text(prev),
                        ..
                    }) = lexemes.last_mut()
                    {
                        let trimmed = prev.trim_end().len();
                        prev.truncate(trimmed);
                        if prev.is_empty() {
                            lexemes.pop();
                        }
                    }
                }
                strip_next = lexeme.strip_after;
            }
            lexemes.push(lexeme);
        }

        Ok(lexemes)
    }

    fn tag(&mut self) -> Result<Lexeme> {
        let start = self.cursor;
        let rest = self.remaining();

        if rest.starts_with("{{!--") {
            let end = rest
                .find("--}}")
                .filter(|&end| end >= 5)
                .ok_or_else(|| Error::parse("unterminated comment", start))?;
            self.advance(end + 4);
            return Ok(Lexeme::plain(Token::Comment(rest[5..end].to_string()), start));
        }

        let (open, close) = if rest.starts_with("{{{") {
            ("{{{", "}}}")
        } else {
            ("{{", "}}")
        };
        let end = rest[open.len()..]
            .find(close)
            .map(|i| i + open.len())
            .ok_or_else(|| Error::parse("unterminated tag", start))?;
        self.advance(end + close.len());

        let mut inner = &rest[open.len()..end];
        let strip_before = inner.starts_with('~');
        if strip_before {
            inner = &inner[1..];
        }
        let strip_after = inner.ends_with('~');
        if strip_after {
            inner = &inner[..inner.len() - 1];
        }
        let inner = inner.trim();

        let token = if open == "{{{" {
            Token::Unescaped(inner.to_string())
        } else {
            classify(inner, start)?
        };

        Ok(Lexeme {
            token,
            offset: start,
            strip_before,
            strip_after,
        })
    }
}

fn classify(inner: &str, offset: usize) -> Result<Token> {
    let mut chars = inner.chars();
    let Some(sigil) = chars.next() else {
        return Err(Error::parse("empty tag", offset));
    };
    let body = chars.as_str().trim();

    let token = match sigil {
        '!' => Token::Comment(body.to_string()),
        '#' => {
            let (name, args) = match body.split_once(char::is_whitespace) {
                Some((name, args)) => (name, Some(args.trim())),
                None => (body, None),
            };
            if name.is_empty() {
                return Err(Error::parse("block tag without a helper name", offset));
            }
            Token::OpenBlock {
                name: name.to_string(),
                args: args.filter(|a| !a.is_empty()).map(str::to_string),
            }
        }
        '/' => {
            if body.is_empty() {
                return Err(Error::parse("close tag without a helper name", offset));
            }
            Token::CloseBlock(body.to_string())
        }
        '^' if body.is_empty() => Token::Else,
        '^' => Token::Inverse(body.to_string()),
        '>' => Token::Partial(body.to_string()),
        '&' => Token::Unescaped(body.to_string()),
        _ if inner == "else" || inner.starts_with("else ") => Token::Else,
        _ => Token::Variable(inner.to_string()),
    };
    Ok(token)
}
