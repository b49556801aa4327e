//! Recursive-descent parser building an intermediate value tree.
//!
//! Grounded on `tomllib::toml`'s shape — one parser type with a private
//! method per grammar production (`parse_table_header`, `parse_keyval`,
//! `parse_inline_table`, ...), each unit tested in a `#[cfg(test)] mod
//! tests` block beside the production it exercises. The node-flag model
//! (`inlined`/`standard`/`explicit`) has no teacher precedent — `tomllib`'s
//! format-preserving AST tracks redefinition through its token stream
//! directly — and is grounded instead on spec.md §4.3's description of how
//! standard-table, array-of-tables, and dotted-key extension rules interact.
//!
//! The tree built here is an intermediate structure: `Rc<RefCell<Node>>`
//! nodes that are mutated in place while the document is parsed, then
//! walked once into the immutable, owned [`crate::value::Value`] tree the
//! public API returns. This mirrors `tomllib::types`'s own use of
//! `Rc<RefCell<Vec<ParseError>>>` for shared mutable parse state.

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::error::{Error, Position};
use crate::scanner::{Scanner, Token};
use crate::value::{Date, DateTime, Time, Value};

#[derive(Debug, Default, Clone, Copy)]
struct NodeFlags {
    /// Created by `{ ... }` inline-table syntax; can never be extended
    /// again, by a header or by a dotted key, anywhere in the document.
    inlined: bool,
    /// Created as the direct or ancestor target of a `[table]` /
    /// `[[array]]` header.
    standard: bool,
    /// This exact node was the direct target of a `[table]` header (not
    /// merely an ancestor of one); a second header targeting the same node
    /// is a redefinition.
    explicit: bool,
}

enum NodeKind {
    Leaf(Value),
    Array(Vec<NodeRef>),
    Table(IndexMap<String, NodeRef>),
    ArrayOfTables(Vec<NodeRef>),
}

struct Node {
    flags: NodeFlags,
    kind: NodeKind,
}

type NodeRef = Rc<RefCell<Node>>;

impl Node {
    fn leaf(value: Value) -> NodeRef {
        Rc::new(RefCell::new(Node { flags: NodeFlags::default(), kind: NodeKind::Leaf(value) }))
    }

    fn array(elems: Vec<NodeRef>) -> NodeRef {
        Rc::new(RefCell::new(Node { flags: NodeFlags::default(), kind: NodeKind::Array(elems) }))
    }

    fn table(flags: NodeFlags) -> NodeRef {
        Rc::new(RefCell::new(Node { flags, kind: NodeKind::Table(IndexMap::new()) }))
    }
}

/// Walks the intermediate tree into the owned, public [`Value`] tree.
pub(crate) fn node_into_value(node: &NodeRef) -> Value {
    match &node.borrow().kind {
        NodeKind::Leaf(v) => v.clone(),
        NodeKind::Array(elems) => Value::Array(elems.iter().map(node_into_value).collect()),
        NodeKind::Table(t) => Value::Table(t.iter().map(|(k, v)| (k.clone(), node_into_value(v))).collect()),
        NodeKind::ArrayOfTables(elems) => Value::Array(elems.iter().map(node_into_value).collect()),
    }
}

pub(crate) struct Parser<'a> {
    scanner: Scanner<'a>,
    root: NodeRef,
    current: NodeRef,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(input: &'a str) -> Parser<'a> {
        let root = Node::table(NodeFlags { standard: true, explicit: true, inlined: false });
        Parser { scanner: Scanner::new(input), root: root.clone(), current: root }
    }

    /// Parses the whole document and returns the root table node.
    pub(crate) fn parse(mut self) -> Result<NodeRef, Error> {
        loop {
            let tok = self.scanner.next_key_token()?;
            match tok {
                Token::Eof => break,
                Token::LineFeed => continue,
                Token::LDoubleBracket => self.parse_array_table_header()?,
                Token::LBracket => self.parse_standard_table_header()?,
                other => self.parse_keyval_line(other)?,
            }
        }
        Ok(self.root)
    }

    fn expect_key_token(&mut self, expected: Token<'a>) -> Result<(), Error> {
        let pos = self.scanner.position();
        let tok = self.scanner.next_key_token()?;
        if tok == expected {
            Ok(())
        } else {
            Err(Error::syntactic(pos, format!("expected {expected:?}, found {tok:?}")))
        }
    }

    fn expect_end_of_line(&mut self) -> Result<(), Error> {
        let pos = self.scanner.position();
        match self.scanner.next_key_token()? {
            Token::LineFeed | Token::Eof => Ok(()),
            other => Err(Error::syntactic(pos, format!("expected newline, found {other:?}"))),
        }
    }

    fn key_segment_text(&self, tok: Token<'a>) -> Result<String, Error> {
        let pos = self.scanner.position();
        match tok {
            Token::Literal(s) => Ok(s.to_string()),
            Token::LiteralString(s) => Ok(s.to_string()),
            Token::BasicString(s) => unescape_basic(s, pos),
            other => Err(Error::syntactic(pos, format!("expected a key, found {other:?}"))),
        }
    }

    fn parse_key_path_from(&mut self, first: Token<'a>) -> Result<Vec<String>, Error> {
        let mut parts = vec![self.key_segment_text(first)?];
        loop {
            let save = self.scanner.save();
            match self.scanner.next_key_token()? {
                Token::Dot => {
                    let seg = self.scanner.next_key_token()?;
                    parts.push(self.key_segment_text(seg)?);
                },
                _ => {
                    self.scanner.restore(save);
                    break;
                },
            }
        }
        Ok(parts)
    }

    fn parse_standard_table_header(&mut self) -> Result<(), Error> {
        let first = self.scanner.next_key_token()?;
        let path = self.parse_key_path_from(first)?;
        self.expect_key_token(Token::RBracket)?;
        self.expect_end_of_line()?;
        self.current = self.open_standard_table(&path)?;
        Ok(())
    }

    fn parse_array_table_header(&mut self) -> Result<(), Error> {
        let first = self.scanner.next_key_token()?;
        let path = self.parse_key_path_from(first)?;
        self.expect_key_token(Token::RDoubleBracket)?;
        self.expect_end_of_line()?;
        self.current = self.open_array_table(&path)?;
        Ok(())
    }

    fn parse_keyval_line(&mut self, first: Token<'a>) -> Result<(), Error> {
        let path = self.parse_key_path_from(first)?;
        self.expect_key_token(Token::Equals)?;
        let value_node = self.parse_value()?;
        let current = self.current.clone();
        self.assign_into(&current, &path, value_node, false)?;
        self.expect_end_of_line()?;
        Ok(())
    }

    fn parse_value(&mut self) -> Result<NodeRef, Error> {
        let pos = self.scanner.position();
        let tok = self.scanner.next_value_token()?;
        match tok {
            Token::BasicString(s) => Ok(Node::leaf(Value::String(unescape_basic(s, pos)?))),
            Token::MLBasicString(s) => Ok(Node::leaf(Value::String(unescape_multiline_basic(s, pos)?))),
            Token::LiteralString(s) => Ok(Node::leaf(Value::String(s.to_string()))),
            Token::MLLiteralString(s) => Ok(Node::leaf(Value::String(trim_leading_newline(s).to_string()))),
            Token::Integer(i) => Ok(Node::leaf(Value::Integer(i))),
            Token::Float(f) => Ok(Node::leaf(Value::Float(f))),
            Token::Bool(b) => Ok(Node::leaf(Value::Boolean(b))),
            Token::LocalDate(d) => {
                if !d.is_valid() {
                    return Err(Error::semantic(pos, "invalid calendar date"));
                }
                Ok(Node::leaf(Value::LocalDate(d)))
            },
            Token::LocalTime(t) => {
                if !t.is_valid() {
                    return Err(Error::semantic(pos, "invalid time of day"));
                }
                Ok(Node::leaf(Value::LocalTime(t)))
            },
            Token::LocalDateTime(d, t) => {
                let dt = DateTime { date: d, time: t, offset_minutes: None };
                if !dt.is_valid() {
                    return Err(Error::semantic(pos, "invalid local date-time"));
                }
                Ok(Node::leaf(Value::LocalDateTime(dt)))
            },
            Token::OffsetDateTime(d, t, off) => {
                let dt = DateTime { date: d, time: t, offset_minutes: Some(off) };
                if !dt.is_valid() {
                    return Err(Error::semantic(pos, "invalid offset date-time"));
                }
                Ok(Node::leaf(Value::OffsetDateTime(dt)))
            },
            Token::LBracket => self.parse_inline_array(),
            Token::LBrace => self.parse_inline_table(),
            other => Err(Error::syntactic(pos, format!("expected a value, found {other:?}"))),
        }
    }

    fn skip_newlines_in_value(&mut self) -> Result<(), Error> {
        loop {
            let save = self.scanner.save();
            if self.scanner.next_value_token()? != Token::LineFeed {
                self.scanner.restore(save);
                return Ok(());
            }
        }
    }

    fn parse_inline_array(&mut self) -> Result<NodeRef, Error> {
        let mut elems = vec![];
        self.skip_newlines_in_value()?;
        let save = self.scanner.save();
        if self.scanner.next_value_token()? == Token::RBracket {
            return Ok(Node::array(elems));
        }
        self.scanner.restore(save);
        loop {
            elems.push(self.parse_value()?);
            self.skip_newlines_in_value()?;
            let pos = self.scanner.position();
            match self.scanner.next_value_token()? {
                Token::Comma => {
                    self.skip_newlines_in_value()?;
                    let save2 = self.scanner.save();
                    if self.scanner.next_value_token()? == Token::RBracket {
                        break;
                    }
                    self.scanner.restore(save2);
                },
                Token::RBracket => break,
                other => return Err(Error::syntactic(pos, format!("expected ',' or ']', found {other:?}"))),
            }
        }
        Ok(Node::array(elems))
    }

    /// Inline tables forbid newlines and a trailing comma (spec.md §9):
    /// unlike [`Parser::parse_inline_array`], no line-feed skipping happens
    /// here, and a comma must always be followed by another key.
    fn parse_inline_table(&mut self) -> Result<NodeRef, Error> {
        let table_node = Node::table(NodeFlags { inlined: true, standard: false, explicit: false });
        let save = self.scanner.save();
        if self.scanner.next_key_token()? == Token::RBrace {
            return Ok(table_node);
        }
        self.scanner.restore(save);
        loop {
            let first = self.scanner.next_key_token()?;
            let path = self.parse_key_path_from(first)?;
            self.expect_key_token(Token::Equals)?;
            let value_node = self.parse_value()?;
            self.assign_into(&table_node, &path, value_node, true)?;
            let pos = self.scanner.position();
            match self.scanner.next_key_token()? {
                Token::Comma => continue,
                Token::RBrace => break,
                other => return Err(Error::syntactic(pos, format!("expected ',' or '}}', found {other:?}"))),
            }
        }
        Ok(table_node)
    }

    fn assign_into(&mut self, parent: &NodeRef, path: &[String], value_node: NodeRef, inline: bool) -> Result<(), Error> {
        let mut node = parent.clone();
        for (i, seg) in path.iter().enumerate() {
            if i + 1 == path.len() {
                self.insert_leaf(&node, seg, value_node.clone())?;
            } else {
                node = self.step_dotted_ancestor(&node, seg, inline)?;
            }
        }
        Ok(())
    }

    fn insert_leaf(&mut self, parent: &NodeRef, key: &str, value_node: NodeRef) -> Result<(), Error> {
        let pos = self.scanner.position();
        let mut parent_mut = parent.borrow_mut();
        match &mut parent_mut.kind {
            NodeKind::Table(t) => {
                if t.contains_key(key) {
                    return Err(Error::semantic(pos, format!("duplicate key '{key}'")));
                }
                t.insert(key.to_string(), value_node);
                Ok(())
            },
            _ => Err(Error::semantic(pos, format!("'{key}' is not a table"))),
        }
    }

    /// Descends into (creating if absent) the table named `seg` under
    /// `parent` for a dotted-key assignment. A table already closed by a
    /// header (`explicit`) or by inline-table syntax (`inlined`) cannot be
    /// extended this way (spec.md §9). As in [`Parser::step_header_ancestor`],
    /// an existing array of tables is descended into via its last element
    /// (spec.md §4.3 "Key path resolution" applies this rule to dotted-key
    /// resolution generally, not just to headers).
    fn step_dotted_ancestor(&mut self, parent: &NodeRef, seg: &str, inline: bool) -> Result<NodeRef, Error> {
        let pos = self.scanner.position();
        let existing = {
            let parent_ref = parent.borrow();
            match &parent_ref.kind {
                NodeKind::Table(t) => t.get(seg).cloned(),
                _ => return Err(Error::semantic(pos, format!("'{seg}' is not a table"))),
            }
        };
        if let Some(existing) = existing {
            let flags = existing.borrow().flags;
            if flags.inlined || flags.explicit {
                return Err(Error::semantic(pos, format!("cannot extend table '{seg}' via a dotted key")));
            }
            let is_array = matches!(existing.borrow().kind, NodeKind::ArrayOfTables(_));
            if is_array {
                let last = match &existing.borrow().kind {
                    NodeKind::ArrayOfTables(elems) => elems.last().cloned(),
                    _ => unreachable!(),
                };
                return last.ok_or_else(|| Error::semantic(pos, format!("array of tables '{seg}' is empty")));
            }
            let is_table = matches!(existing.borrow().kind, NodeKind::Table(_));
            if !is_table {
                return Err(Error::semantic(pos, format!("'{seg}' is not a table")));
            }
            return Ok(existing);
        }
        let child = Node::table(NodeFlags { standard: false, explicit: false, inlined: inline });
        let mut parent_mut = parent.borrow_mut();
        if let NodeKind::Table(t) = &mut parent_mut.kind {
            t.insert(seg.to_string(), child.clone());
        }
        Ok(child)
    }

    fn open_standard_table(&mut self, path: &[String]) -> Result<NodeRef, Error> {
        let mut node = self.root.clone();
        for (i, seg) in path.iter().enumerate() {
            let is_last = i + 1 == path.len();
            node = self.step_header_ancestor(&node, seg, is_last)?;
        }
        Ok(node)
    }

    fn open_array_table(&mut self, path: &[String]) -> Result<NodeRef, Error> {
        let mut node = self.root.clone();
        for (i, seg) in path.iter().enumerate() {
            let is_last = i + 1 == path.len();
            node = if is_last {
                self.step_array_of_tables_final(&node, seg)?
            } else {
                self.step_header_ancestor(&node, seg, false)?
            };
        }
        Ok(node)
    }

    /// Descends into, reuses, or creates the table named `seg` along a
    /// `[table]`/`[[array]]` header's path. `is_last` marks the header's own
    /// target rather than an ancestor segment: only the target's `explicit`
    /// and `standard` flags are checked for redefinition — a table created
    /// solely by a dotted key (`standard: false`) is not "a standard table
    /// that was created implicitly" and cannot be adopted by a header
    /// (spec.md §4.3). A non-final segment that names an existing array of
    /// tables descends into that array's last element, matching how
    /// `[[fruit]]` followed by `[fruit.variety]` nests.
    fn step_header_ancestor(&mut self, parent: &NodeRef, seg: &str, is_last: bool) -> Result<NodeRef, Error> {
        let pos = self.scanner.position();
        let existing = {
            let parent_ref = parent.borrow();
            match &parent_ref.kind {
                NodeKind::Table(t) => t.get(seg).cloned(),
                _ => return Err(Error::semantic(pos, format!("'{seg}' is not a table"))),
            }
        };
        if let Some(existing) = existing {
            if existing.borrow().flags.inlined {
                return Err(Error::semantic(pos, format!("cannot extend inline table '{seg}'")));
            }
            let is_array = matches!(existing.borrow().kind, NodeKind::ArrayOfTables(_));
            if is_array {
                if is_last {
                    return Err(Error::semantic(pos, format!("'{seg}' is already defined as an array of tables")));
                }
                let last = match &existing.borrow().kind {
                    NodeKind::ArrayOfTables(elems) => elems.last().cloned(),
                    _ => unreachable!(),
                };
                return last.ok_or_else(|| Error::semantic(pos, format!("array of tables '{seg}' is empty")));
            }
            let is_table = matches!(existing.borrow().kind, NodeKind::Table(_));
            if !is_table {
                return Err(Error::semantic(pos, format!("'{seg}' is not a table")));
            }
            if is_last {
                let flags = existing.borrow().flags;
                if flags.explicit {
                    return Err(Error::semantic(pos, format!("table '{seg}' redefined")));
                }
                if !flags.standard {
                    return Err(Error::semantic(
                        pos,
                        format!("table '{seg}' was already defined via a dotted key and cannot be redefined with a header"),
                    ));
                }
                existing.borrow_mut().flags.explicit = true;
            }
            return Ok(existing);
        }
        let child = Node::table(NodeFlags { standard: true, explicit: is_last, inlined: false });
        let mut parent_mut = parent.borrow_mut();
        if let NodeKind::Table(t) = &mut parent_mut.kind {
            t.insert(seg.to_string(), child.clone());
        }
        drop(parent_mut);
        Ok(child)
    }

    fn step_array_of_tables_final(&mut self, parent: &NodeRef, seg: &str) -> Result<NodeRef, Error> {
        let pos = self.scanner.position();
        let existing = {
            let parent_ref = parent.borrow();
            match &parent_ref.kind {
                NodeKind::Table(t) => t.get(seg).cloned(),
                _ => return Err(Error::semantic(pos, format!("'{seg}' is not a table"))),
            }
        };
        let new_table = Node::table(NodeFlags { standard: true, explicit: true, inlined: false });
        if let Some(existing) = existing {
            if existing.borrow().flags.inlined {
                return Err(Error::semantic(pos, format!("cannot extend inline table '{seg}'")));
            }
            match &mut existing.borrow_mut().kind {
                NodeKind::ArrayOfTables(elems) => elems.push(new_table.clone()),
                _ => return Err(Error::semantic(pos, format!("'{seg}' is already defined and is not an array of tables"))),
            }
            return Ok(new_table);
        }
        let array_node = Rc::new(RefCell::new(Node {
            flags: NodeFlags::default(),
            kind: NodeKind::ArrayOfTables(vec![new_table.clone()]),
        }));
        let mut parent_mut = parent.borrow_mut();
        if let NodeKind::Table(t) = &mut parent_mut.kind {
            t.insert(seg.to_string(), array_node);
        }
        drop(parent_mut);
        Ok(new_table)
    }
}

/// Strips a single leading newline, the way a multiline literal string's
/// opening delimiter does (spec.md §4.2); the scanner already trims this
/// for basic multiline strings during lexing, but literal multiline strings
/// are returned verbatim since they need no escape translation, so the trim
/// happens here instead.
fn trim_leading_newline(s: &str) -> &str {
    if let Some(rest) = s.strip_prefix("\r\n") {
        rest
    } else if let Some(rest) = s.strip_prefix('\n') {
        rest
    } else {
        s
    }
}

fn unescape_basic(s: &str, pos: Position) -> Result<String, Error> {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('u') => out.push(read_unicode_escape(&mut chars, 4, pos)?),
            Some('U') => out.push(read_unicode_escape(&mut chars, 8, pos)?),
            _ => return Err(Error::lexical(pos, "invalid escape sequence")),
        }
    }
    Ok(out)
}

/// As [`unescape_basic`], but also honors the line-continuation escape
/// (`\` followed by whitespace and a newline trims all following
/// whitespace, including further newlines, up to the next non-whitespace
/// character) that only multiline basic strings permit.
fn unescape_multiline_basic(s: &str, pos: Position) -> Result<String, Error> {
    let s = trim_leading_newline(s);
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.peek().copied() {
            Some('"') => {
                chars.next();
                out.push('"');
            },
            Some('\\') => {
                chars.next();
                out.push('\\');
            },
            Some('b') => {
                chars.next();
                out.push('\u{8}');
            },
            Some('f') => {
                chars.next();
                out.push('\u{c}');
            },
            Some('n') => {
                chars.next();
                out.push('\n');
            },
            Some('r') => {
                chars.next();
                out.push('\r');
            },
            Some('t') => {
                chars.next();
                out.push('\t');
            },
            Some('u') => {
                chars.next();
                out.push(read_unicode_escape(&mut chars, 4, pos)?);
            },
            Some('U') => {
                chars.next();
                out.push(read_unicode_escape(&mut chars, 8, pos)?);
            },
            Some(c2) if c2.is_whitespace() => {
                while matches!(chars.peek(), Some(c3) if c3.is_whitespace()) {
                    chars.next();
                }
            },
            _ => return Err(Error::lexical(pos, "invalid escape sequence")),
        }
    }
    Ok(out)
}

fn read_unicode_escape(chars: &mut std::iter::Peekable<std::str::Chars>, count: usize, pos: Position) -> Result<char, Error> {
    let mut hex = String::with_capacity(count);
    for _ in 0..count {
        match chars.next() {
            Some(c) if c.is_ascii_hexdigit() => hex.push(c),
            _ => return Err(Error::lexical(pos, "invalid unicode escape")),
        }
    }
    let cp = u32::from_str_radix(&hex, 16).map_err(|_| Error::lexical(pos, "invalid unicode escape"))?;
    char::from_u32(cp).ok_or_else(|| Error::lexical(pos, "escape does not form a valid unicode scalar value"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<Value, Error> {
        let root = Parser::new(input).parse()?;
        Ok(node_into_value(&root))
    }

    #[test]
    fn minimal_key_value() {
        let v = parse("a = 1\n").unwrap();
        assert_eq!(v.as_table().unwrap().get("a"), Some(&Value::Integer(1)));
    }

    #[test]
    fn dotted_keys_build_nested_tables() {
        let v = parse("physical.color = \"orange\"\nphysical.shape = \"round\"\n").unwrap();
        let physical = v.as_table().unwrap().get("physical").unwrap().as_table().unwrap();
        assert_eq!(physical.get("color"), Some(&Value::String("orange".to_string())));
        assert_eq!(physical.get("shape"), Some(&Value::String("round".to_string())));
    }

    #[test]
    fn standard_table_header_then_array_value() {
        let v = parse("[servers]\nalpha = [1, 2, 3]\n").unwrap();
        let servers = v.as_table().unwrap().get("servers").unwrap().as_table().unwrap();
        assert_eq!(
            servers.get("alpha"),
            Some(&Value::Array(vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)]))
        );
    }

    #[test]
    fn array_of_tables_accumulates_elements() {
        let v = parse("[[fruit]]\nname = \"apple\"\n\n[[fruit]]\nname = \"banana\"\n").unwrap();
        let fruit = v.as_table().unwrap().get("fruit").unwrap().as_array().unwrap();
        assert_eq!(fruit.len(), 2);
        assert_eq!(fruit[0].as_table().unwrap().get("name"), Some(&Value::String("apple".to_string())));
        assert_eq!(fruit[1].as_table().unwrap().get("name"), Some(&Value::String("banana".to_string())));
    }

    #[test]
    fn nested_table_under_array_of_tables() {
        let v = parse("[[fruit]]\nname = \"apple\"\n\n[fruit.physical]\ncolor = \"red\"\n").unwrap();
        let fruit = v.as_table().unwrap().get("fruit").unwrap().as_array().unwrap();
        let physical = fruit[0].as_table().unwrap().get("physical").unwrap().as_table().unwrap();
        assert_eq!(physical.get("color"), Some(&Value::String("red".to_string())));
    }

    #[test]
    fn duplicate_key_is_rejected() {
        assert!(parse("a = 1\na = 2\n").is_err());
    }

    #[test]
    fn dotted_key_cannot_extend_an_explicit_table() {
        assert!(parse("[a]\nb = 1\n\n[a.b]\nc = 2\n").is_err());
    }

    #[test]
    fn header_cannot_adopt_a_table_created_by_a_dotted_key() {
        assert!(parse("[fruit]\napple.color = \"red\"\n\n[fruit.apple]\ntexture = \"smooth\"\n").is_err());
    }

    #[test]
    fn dotted_key_descends_into_an_array_of_tables_last_element() {
        let v = parse("[[a.b]]\nx = 1\n\n[a]\nb.y = 2\n").unwrap();
        let arr = v.as_table().unwrap().get("a").unwrap().as_table().unwrap().get("b").unwrap().as_array().unwrap();
        assert_eq!(arr.len(), 1);
        assert_eq!(arr[0].as_table().unwrap().get("x"), Some(&Value::Integer(1)));
        assert_eq!(arr[0].as_table().unwrap().get("y"), Some(&Value::Integer(2)));
    }

    #[test]
    fn table_header_cannot_redefine() {
        assert!(parse("[a]\n[a]\n").is_err());
    }

    #[test]
    fn inline_table_forbids_later_extension() {
        assert!(parse("a = { b = 1 }\na.c = 2\n").is_err());
    }

    #[test]
    fn inline_array_allows_trailing_comma_inline_table_does_not() {
        assert!(parse("a = [1, 2,]\n").is_ok());
        assert!(parse("a = { b = 1, }\n").is_err());
    }

    #[test]
    fn multiline_basic_string_honors_line_continuation() {
        let v = parse("a = \"\"\"\nThe quick brown \\\n  fox\"\"\"\n").unwrap();
        assert_eq!(v.as_table().unwrap().get("a"), Some(&Value::String("The quick brown fox".to_string())));
    }

    #[test]
    fn offset_datetime_round_trips() {
        let v = parse("odt = 1979-05-27T07:32:00-08:00\n").unwrap();
        match v.as_table().unwrap().get("odt").unwrap() {
            Value::OffsetDateTime(dt) => assert_eq!(format!("{dt}"), "1979-05-27T07:32:00-08:00"),
            other => panic!("unexpected value {other:?}"),
        }
    }
}
