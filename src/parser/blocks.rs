//! Block tokenizer shared by both file grammars.

use crate::parser::ParseError;

/// One `name { ... }` block with its raw fields in file order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Block {
    pub kind: String,
    /// Line number of the block header (1-based).
    pub line: usize,
    pub fields: Vec<(String, String)>,
}

impl Block {
    /// First raw value of `key`.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Line grammar of a snapshot file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Grammar {
    /// `status.dat`: `hoststatus {` headers, `key=value` fields.
    Status,
    /// `objects.cache`: `define host {` headers, `key<ws>value` fields.
    Objects,
}

impl Grammar {
    fn header(self, line: &str) -> Option<&str> {
        let head = line.strip_suffix('{')?.trim_end();
        let kind = match self {
            Grammar::Status => head,
            Grammar::Objects => head
                .strip_prefix("define")
                .filter(|rest| rest.starts_with(char::is_whitespace))?
                .trim_start(),
        };
        is_word(kind).then_some(kind)
    }

    fn field(self, line: &str) -> Option<(&str, &str)> {
        match self {
            Grammar::Status => {
                let (key, value) = line.split_once('=')?;
                let key = key.trim();
                is_word(key).then_some((key, value))
            }
            // Keys are any token: timeperiods carry `2024-12-25` or
            // `monday 3 - thursday 4`-style exception lines.
            Grammar::Objects => Some(match line.split_once(char::is_whitespace) {
                Some((key, value)) => (key, value.trim_start()),
                None => (line, ""),
            }),
        }
    }
}

fn is_word(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Split `input` into blocks.
pub(crate) fn parse_blocks(input: &str, grammar: Grammar) -> Result<Vec<Block>, ParseError> {
    let mut blocks = Vec::new();
    let mut current: Option<Block> = None;

    for (idx, raw) in input.lines().enumerate() {
        let lineno = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if let Some(block) = current.as_mut() {
            if line != "}" {
                let (key, value) = grammar.field(line).ok_or_else(|| {
                    ParseError::syntax(lineno, format!("malformed field `{line}`"))
                })?;
                block.fields.push((key.to_string(), value.to_string()));
                continue;
            }
        } else {
            let kind = grammar.header(line).ok_or_else(|| {
                ParseError::syntax(lineno, format!("expected block header, found `{line}`"))
            })?;
            current = Some(Block {
                kind: kind.to_string(),
                line: lineno,
                fields: Vec::new(),
            });
            continue;
        }

        if let Some(done) = current.take() {
            blocks.push(done);
        }
    }

    match current {
        Some(open) => Err(ParseError::syntax(
            open.line,
            format!("unterminated `{}` block", open.kind),
        )),
        None => Ok(blocks),
    }
}
