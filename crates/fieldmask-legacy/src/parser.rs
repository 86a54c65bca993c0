//! Recursive-descent parser for the legacy bracket text format
//!
//! ```text
//! Value  := Object | Array | Scalar
//! Object := '{' (Pair (',' Pair)*)? '}'
//! Pair   := Key '=' Value
//! Array  := '[' (Item (',' Item)*)? ']'
//! Item   := Pair | Value
//! Scalar := text up to the next top-level ',' '}' ']' (trimmed)
//! ```
//!
//! Each container is first delimited as a whole by counting `{}` and `[]`
//! balance independently, then its body is split on top-level commas and
//! every piece is parsed recursively.

use fieldmask_core::{DEFAULT_MAX_DEPTH, DecodeErrorKind, Error, GenericNode, Result};

/// Parse legacy-format text with the default nesting limit.
///
/// Text that does not start with `{` or `[` parses as a bare scalar.
pub fn parse(input: &str) -> Result<GenericNode> {
    parse_with_limit(input, DEFAULT_MAX_DEPTH)
}

/// Parse legacy-format text, failing once containers nest deeper than `max_depth`
pub fn parse_with_limit(input: &str, max_depth: usize) -> Result<GenericNode> {
    Parser { max_depth }.parse_value(input, 0, 1)
}

struct Parser {
    max_depth: usize,
}

/// Running `{}` / `[]` balance
#[derive(Default)]
struct Balance {
    curly: usize,
    square: usize,
}

impl Balance {
    /// Account for `c`; fails on a closer with no matching opener
    fn update(&mut self, c: char, position: usize) -> Result<()> {
        let counter = match c {
            '{' => {
                self.curly += 1;
                return Ok(());
            }
            '[' => {
                self.square += 1;
                return Ok(());
            }
            '}' => &mut self.curly,
            ']' => &mut self.square,
            _ => return Ok(()),
        };

        *counter = counter
            .checked_sub(1)
            .ok_or_else(|| Error::decode(position, DecodeErrorKind::UnexpectedClose(c)))?;
        Ok(())
    }

    fn is_zero(&self) -> bool {
        self.curly == 0 && self.square == 0
    }

    /// Opener still waiting for its closer, if any
    fn unclosed(&self) -> Option<char> {
        if self.curly > 0 {
            Some('{')
        } else if self.square > 0 {
            Some('[')
        } else {
            None
        }
    }
}

impl Parser {
    /// `offset` is the byte position of `text` within the whole input
    fn parse_value(&self, text: &str, offset: usize, depth: usize) -> Result<GenericNode> {
        let trimmed = text.trim_start();
        let offset = offset + (text.len() - trimmed.len());
        let trimmed = trimmed.trim_end();

        match trimmed.chars().next() {
            Some('{') => self.parse_object(trimmed, offset, depth),
            Some('[') => self.parse_array(trimmed, offset, depth),
            _ => Ok(GenericNode::Scalar(trimmed.to_string())),
        }
    }

    fn parse_object(&self, text: &str, offset: usize, depth: usize) -> Result<GenericNode> {
        let body = self.container_body(text, offset, depth, '{', '}')?;
        let body_offset = offset + 1;

        let mut entries: Vec<(String, GenericNode)> = Vec::new();
        for (pair, pair_offset) in split_top_level(body, body_offset)? {
            let eq = pair
                .find('=')
                .ok_or_else(|| Error::decode(pair_offset, DecodeErrorKind::MissingEquals))?;

            let key = pair[..eq].trim();
            if key.is_empty() {
                return Err(Error::decode(pair_offset, DecodeErrorKind::EmptyKey));
            }
            if entries.iter().any(|(existing, _)| existing == key) {
                return Err(Error::decode(pair_offset, DecodeErrorKind::DuplicateKey));
            }

            let value = self.parse_value(&pair[eq + 1..], pair_offset + eq + 1, depth + 1)?;
            entries.push((key.to_string(), value));
        }

        Ok(GenericNode::Object(entries))
    }

    fn parse_array(&self, text: &str, offset: usize, depth: usize) -> Result<GenericNode> {
        let body = self.container_body(text, offset, depth, '[', ']')?;

        let elements = split_top_level(body, offset + 1)?
            .into_iter()
            .map(|(element, element_offset)| self.parse_element(element, element_offset, depth + 1))
            .collect::<Result<Vec<_>>>()?;

        Ok(GenericNode::Array(elements))
    }

    /// Array element: a bare `key=value` pair, or any value
    fn parse_element(&self, text: &str, offset: usize, depth: usize) -> Result<GenericNode> {
        match bare_field_key(text) {
            Some((key, eq)) => {
                let value = self.parse_value(&text[eq + 1..], offset + eq + 1, depth)?;
                Ok(GenericNode::field(key, value))
            }
            None => self.parse_value(text, offset, depth),
        }
    }

    /// Text between the opening bracket at index 0 and its matching closer,
    /// which must be the last character of `text`.
    fn container_body<'a>(
        &self,
        text: &'a str,
        offset: usize,
        depth: usize,
        open: char,
        close: char,
    ) -> Result<&'a str> {
        if depth > self.max_depth {
            return Err(Error::DepthExceeded {
                limit: self.max_depth,
            });
        }

        let end = find_matching(text, offset, open, close)?;
        if end + close.len_utf8() != text.len() {
            return Err(Error::decode(
                offset + end + 1,
                DecodeErrorKind::TrailingCharacters,
            ));
        }

        Ok(&text[open.len_utf8()..end])
    }
}

/// Key and `=` index of an element written as `key=value`.
///
/// The key must be non-empty and free of brackets, so containers and
/// text like `={x}` stay values.
fn bare_field_key(text: &str) -> Option<(&str, usize)> {
    let eq = text.find('=')?;
    let key = text[..eq].trim();
    if key.is_empty() || key.contains(['{', '}', '[', ']']) {
        return None;
    }
    Some((key, eq))
}

/// Index of the bracket closing the one at index 0 of `text`
fn find_matching(text: &str, offset: usize, open: char, close: char) -> Result<usize> {
    let mut balance = Balance::default();

    for (i, c) in text.char_indices() {
        balance.update(c, offset + i)?;

        if c == close {
            let own = if open == '{' {
                balance.curly
            } else {
                balance.square
            };
            if own == 0 {
                if let Some(inner) = balance.unclosed() {
                    return Err(Error::decode(
                        offset + i,
                        DecodeErrorKind::MismatchedClose { open: inner, close },
                    ));
                }
                return Ok(i);
            }
        }
    }

    Err(Error::decode(offset, DecodeErrorKind::Unclosed(open)))
}

/// Split a container body on commas outside any nested container.
///
/// Returns each piece with its byte offset. A blank body has no pieces.
fn split_top_level(body: &str, offset: usize) -> Result<Vec<(&str, usize)>> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut pieces = Vec::new();
    let mut balance = Balance::default();
    let mut start = 0;

    for (i, c) in body.char_indices() {
        balance.update(c, offset + i)?;

        if c == ',' && balance.is_zero() {
            pieces.push((&body[start..i], offset + start));
            start = i + 1;
        }
    }

    if let Some(open) = balance.unclosed() {
        return Err(Error::decode(offset + start, DecodeErrorKind::Unclosed(open)));
    }

    pieces.push((&body[start..], offset + start));
    Ok(pieces)
}
