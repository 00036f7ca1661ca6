//! Single-pass tokenizer for `.ehtml` sources.
//!
//! Recognised forms:
//!
//! ```text
//! <use-plugins>
//! <set name="title" value="Home">
//! <include partials/header.ehtml>      (path may also be quoted)
//! <Title>  <user.name>  <first name>   (placeholder)
//! ```
//!
//! A placeholder is any single-line `<...>` run that does not start with
//! whitespace, `/` or `!`. Unresolved placeholders are written back verbatim
//! by the engine, so regular markup passes through untouched. Anything else
//! is ordinary text.

use crate::template::RESERVED_NAMES;

/// A lexical unit of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Text(&'a str),
    UsePlugins,
    Set { name: &'a str, value: &'a str },
    Include(&'a str),
    Placeholder(&'a str),
}

/// Split a template source into tokens.
pub fn tokenize(src: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut text_start = 0;
    let mut pos = 0;

    while let Some(offset) = src[pos..].find('<') {
        let at = pos + offset;
        match parse_tag(&src[at..]) {
            Some((token, len)) => {
                if text_start < at {
                    tokens.push(Token::Text(&src[text_start..at]));
                }
                tokens.push(token);
                pos = at + len;
                text_start = pos;
            }
            None => pos = at + 1,
        }
    }

    if text_start < src.len() {
        tokens.push(Token::Text(&src[text_start..]));
    }
    tokens
}

fn parse_tag(src: &str) -> Option<(Token<'_>, usize)> {
    const USE_PLUGINS: &str = "<use-plugins>";

    if src.starts_with(USE_PLUGINS) {
        return Some((Token::UsePlugins, USE_PLUGINS.len()));
    }
    if src.starts_with("<set") {
        if let Some(found) = parse_set(src) {
            return Some(found);
        }
    }
    if src.starts_with("<include") {
        if let Some(found) = parse_include(src) {
            return Some(found);
        }
    }
    parse_placeholder(src)
}

fn parse_set(src: &str) -> Option<(Token<'_>, usize)> {
    let mut cur = Cursor::new(src);
    cur.eat("<set").then_some(())?;
    (cur.skip_ws() > 0).then_some(())?;

    let name = cur.attribute("name")?;
    (cur.skip_ws() > 0).then_some(())?;
    let value = cur.attribute("value")?;

    cur.skip_ws();
    cur.eat("/");
    cur.eat(">").then_some(())?;

    if name.is_empty() {
        return None;
    }
    Some((Token::Set { name, value }, cur.pos))
}

fn parse_include(src: &str) -> Option<(Token<'_>, usize)> {
    let mut cur = Cursor::new(src);
    cur.eat("<include").then_some(())?;
    (cur.skip_ws() > 0).then_some(())?;

    let path = match cur.quoted() {
        Some(path) => {
            cur.skip_ws();
            cur.eat("/");
            path
        }
        None => cur.take_while(|c| c != '>' && !c.is_whitespace()),
    };
    cur.skip_ws();
    cur.eat(">").then_some(())?;

    if path.is_empty() {
        return None;
    }
    Some((Token::Include(path), cur.pos))
}

fn parse_placeholder(src: &str) -> Option<(Token<'_>, usize)> {
    let mut cur = Cursor::new(src);
    cur.eat("<").then_some(())?;
    let name = cur.take_while(|c| !matches!(c, '<' | '>' | '\n' | '\r'));
    cur.eat(">").then_some(())?;

    let first = name.chars().next()?;
    if first.is_whitespace() || first == '/' || first == '!' {
        return None;
    }
    // Malformed directives such as `<set name="x">` stay text.
    let keyword = name.split_whitespace().next().unwrap_or(name);
    if RESERVED_NAMES.iter().any(|r| r.eq_ignore_ascii_case(keyword)) {
        return None;
    }
    Some((Token::Placeholder(name), cur.pos))
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn eat(&mut self, literal: &str) -> bool {
        if self.rest().starts_with(literal) {
            self.pos += literal.len();
            true
        } else {
            false
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let rest = self.rest();
        let len = rest.find(|c| !pred(c)).unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    fn skip_ws(&mut self) -> usize {
        self.take_while(char::is_whitespace).len()
    }

    /// `"..."` or `'...'`.
    fn quoted(&mut self) -> Option<&'a str> {
        let rest = self.rest();
        let quote = rest.chars().next().filter(|c| *c == '"' || *c == '\'')?;
        let end = rest[1..].find(quote)?;
        self.pos += end + 2;
        Some(&rest[1..end + 1])
    }

    /// `key = "value"`.
    fn attribute(&mut self, key: &str) -> Option<&'a str> {
        self.eat(key).then_some(())?;
        self.skip_ws();
        self.eat("=").then_some(())?;
        self.skip_ws();
        self.quoted()
    }
}
