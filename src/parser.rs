use crate::ast::*;
use crate::config::DEFAULT_MAX_DEPTH;
use crate::error::{Error, Result};
use crate::lexer::{Lexeme, Token, Tokenizer};
use std::collections::VecDeque;

/// Builds a node tree from Handlebars source.
///
/// Only the constructs the transpiler has emission rules for are accepted.
/// Anything else (partials, comments, `else`, other block helpers) fails
/// with `Error::UnsupportedNodeKind` so that no partial output is produced.
pub struct Parser {
    buffer: VecDeque<Lexeme>,
    depth: usize,
    max_depth: usize,
}

impl Parser {
    pub fn new(input: &str) -> Result<Self> {
        Ok(Self {
            buffer: Tokenizer::new(input).tokenize()?.into(),
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        })
    }

    /// Block nesting beyond `max_depth` fails with `Error::NestingTooDeep`.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn parse(&mut self) -> Result<Template> {
        self.parse_body(None)
    }

    /// Parses nodes until the close tag of `open` (name and offset of the
    /// enclosing block), or end of input at top level.
    fn parse_body(&mut self, open: Option<(&str, usize)>) -> Result<Vec<Node>> {
        let mut nodes = Vec::new();

        while let Some(lexeme) = self.buffer.pop_front() {
            let offset = lexeme.offset;
            match lexeme.token {
                Token::Text(value) => nodes.push(Node::Text { value }),
                Token::Variable(name) => nodes.push(Node::Variable { name }),
                Token::OpenBlock { name, args } => {
                    nodes.push(self.parse_block(name, args, offset)?);
                }
                Token::CloseBlock(name) => {
                    return match open {
                        Some((expected, _)) if expected == name => Ok(nodes),
                        Some((expected, _)) => Err(Error::parse(
                            format!("expected {{{{/{}}}}}, found {{{{/{}}}}}", expected, name),
                            offset,
                        )),
                        None => Err(Error::parse(
                            format!("{{{{/{}}}}} without a matching open tag", name),
                            offset,
                        )),
                    };
                }
                Token::Else => return Err(Error::UnsupportedNodeKind("else".to_string())),
                Token::Comment(_) => return Err(Error::UnsupportedNodeKind("!".to_string())),
                Token::Unescaped(_) => return Err(Error::UnsupportedNodeKind("&".to_string())),
                Token::Partial(_) => return Err(Error::UnsupportedNodeKind(">".to_string())),
                Token::Inverse(_) => return Err(Error::UnsupportedNodeKind("^".to_string())),
            }
        }

        match open {
            Some((name, offset)) => Err(Error::parse(
                format!("unclosed {{{{#{}}}}}", name),
                offset,
            )),
            None => Ok(nodes),
        }
    }

    fn parse_block(&mut self, name: String, args: Option<String>, offset: usize) -> Result<Node> {
        let kind = BlockKind::from_name(&name).ok_or_else(|| Error::UnsupportedNodeKind(name.clone()))?;
        if self.depth >= self.max_depth {
            return Err(Error::NestingTooDeep {
                limit: self.max_depth,
            });
        }

        self.depth += 1;
        let children = self.parse_body(Some((name.as_str(), offset)));
        self.depth -= 1;
        let children = children?;
        Ok(Node::Block {
            kind,
            args,
            children,
        })
    }
}

/// Parses Handlebars source into a node tree.
pub fn parse(input: &str) -> Result<Template> {
    Parser::new(input)?.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_blocks() {
        let tree = parse("{{#if show}}<ul>{{#each items}}<li>{{this}}</li>{{/each}}</ul>{{/if}}").unwrap();
        assert_eq!(
            tree,
            vec![Node::block(
                BlockKind::If,
                Some("show"),
                vec![
                    Node::text("<ul>"),
                    Node::block(
                        BlockKind::Each,
                        Some("items"),
                        vec![Node::text("<li>"), Node::variable("this"), Node::text("</li>")],
                    ),
                    Node::text("</ul>"),
                ],
            )]
        );
    }

    #[test]
    fn each_without_args_parses() {
        let tree = parse("{{#each}}x{{/each}}").unwrap();
        assert_eq!(tree, vec![Node::block(BlockKind::Each, None, vec![Node::text("x")])]);
    }

    #[test]
    fn mismatched_close() {
        let err = parse("{{#if a}}x{{/each}}").unwrap_err();
        match err {
            Error::Parse { message, offset } => {
                assert_eq!(message, "expected {{/if}}, found {{/each}}");
                assert_eq!(offset, 10);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unclosed_block_points_at_open_tag() {
        let err = parse("ab{{#each items}}x").unwrap_err();
        assert!(matches!(err, Error::Parse { offset: 2, .. }));
    }

    #[test]
    fn stray_close() {
        let err = parse("x{{/if}}").unwrap_err();
        assert!(matches!(err, Error::Parse { offset: 1, .. }));
    }

    #[test]
    fn deep_nesting_stops_at_limit() {
        let source = format!("{}x{}", "{{#if a}}".repeat(50_000), "{{/if}}".repeat(50_000));
        let err = parse(&source).unwrap_err();
        assert!(matches!(err, Error::NestingTooDeep { limit: DEFAULT_MAX_DEPTH }));
    }

    #[test]
    fn nesting_up_to_limit_parses() {
        let source = format!("{}x{}", "{{#if a}}".repeat(3), "{{/if}}".repeat(3));
        assert!(Parser::new(&source).unwrap().with_max_depth(3).parse().is_ok());

        let err = Parser::new(&source).unwrap().with_max_depth(2).parse().unwrap_err();
        assert!(matches!(err, Error::NestingTooDeep { limit: 2 }));
    }

    #[test]
    fn unknown_helper_is_unsupported() {
        let err = parse("{{#with person}}{{name}}{{/with}}").unwrap_err();
        assert!(matches!(err, Error::UnsupportedNodeKind(ref k) if k == "with"));
    }

    #[test]
    fn else_is_unsupported() {
        let err = parse("{{#if a}}x{{else}}y{{/if}}").unwrap_err();
        assert!(matches!(err, Error::UnsupportedNodeKind(ref k) if k == "else"));
    }

    #[test]
    fn other_sigils_are_unsupported() {
        for (src, kind) in [
            ("{{> card}}", ">"),
            ("{{! note}}", "!"),
            ("{{{html}}}", "&"),
            ("{{^items}}none{{/items}}", "^"),
        ] {
            let err = parse(src).unwrap_err();
            assert!(
                matches!(err, Error::UnsupportedNodeKind(ref k) if k == kind),
                "{src}: {err:?}"
            );
        }
    }
}
