//! Building and parsing datastore paths
//!
//! Paths have the shape `/<module>:<node>/<node>[key='value']/<leaf>`. Key
//! values are quoted with `'`, or with `"` when they contain `'`. A value
//! containing both quote characters has no valid rendering.

use std::fmt;

use crate::error::{Error, Result};

/// Quote a predicate value.
///
/// # Example
/// ```
/// use status_datastore::quote_value;
///
/// assert_eq!(quote_value("radio0").unwrap(), "'radio0'");
/// assert_eq!(quote_value("Joe's").unwrap(), "\"Joe's\"");
/// assert!(quote_value("a'b\"c").is_err());
/// ```
pub fn quote_value(value: &str) -> Result<String> {
    match (value.contains('\''), value.contains('"')) {
        (false, _) => Ok(format!("'{}'", value)),
        (true, false) => Ok(format!("\"{}\"", value)),
        (true, true) => Err(Error::InvalidIdentifier {
            value: value.to_string(),
        }),
    }
}

/// Incremental path construction.
///
/// ```
/// use status_datastore::XPathBuilder;
///
/// let path = XPathBuilder::new("status", "wifi")
///     .entry("wifi-device", "name", "radio0")
///     .unwrap()
///     .child("channel")
///     .build();
/// assert_eq!(path, "/status:wifi/wifi-device[name='radio0']/channel");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XPathBuilder {
    buf: String,
}

impl XPathBuilder {
    /// Start at a module's top-level node.
    pub fn new(module: &str, root: &str) -> Self {
        Self {
            buf: format!("/{}:{}", module, root),
        }
    }

    pub fn child(mut self, name: &str) -> Self {
        self.buf.push('/');
        self.buf.push_str(name);
        self
    }

    /// Append a list entry selected by one key.
    pub fn entry(mut self, list: &str, key: &str, value: &str) -> Result<Self> {
        let quoted = quote_value(value)?;
        self.buf.push('/');
        self.buf.push_str(list);
        self.buf.push('[');
        self.buf.push_str(key);
        self.buf.push('=');
        self.buf.push_str(&quoted);
        self.buf.push(']');
        Ok(self)
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn build(self) -> String {
        self.buf
    }
}

/// One step of a parsed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSegment {
    pub name: String,
    pub predicates: Vec<(String, String)>,
}

impl PathSegment {
    pub fn predicate(&self, key: &str) -> Option<&str> {
        self.predicates
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// A parsed absolute path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPath {
    pub module: String,
    pub segments: Vec<PathSegment>,
}

impl DataPath {
    /// Parse an absolute path.
    ///
    /// # Example
    /// ```
    /// use status_datastore::DataPath;
    ///
    /// let path = DataPath::parse("/status:wifi/wifi-iface[name='lan']/ssid").unwrap();
    /// assert_eq!(path.module, "status");
    /// assert_eq!(path.segments[1].predicate("name"), Some("lan"));
    /// assert_eq!(path.leaf(), Some("ssid"));
    /// ```
    pub fn parse(path: &str) -> Result<Self> {
        let mut cursor = Cursor::new(path);
        cursor.expect('/')?;

        let first = cursor.take_name()?;
        let (module, root) = first
            .split_once(':')
            .ok_or_else(|| Error::invalid_path(path, "missing module prefix"))?;
        if module.is_empty() || root.is_empty() {
            return Err(Error::invalid_path(path, "empty module or node name"));
        }
        let module = module.to_string();

        let mut segments = Vec::new();
        let mut name = root.to_string();
        loop {
            let predicates = cursor.take_predicates()?;
            segments.push(PathSegment { name, predicates });
            if cursor.at_end() {
                break;
            }
            cursor.expect('/')?;
            name = cursor.take_name()?;
            if name.contains(':') {
                return Err(Error::invalid_path(path, "module prefix on inner node"));
            }
        }

        Ok(Self { module, segments })
    }

    /// Name of the last segment when it is not a list entry.
    pub fn leaf(&self) -> Option<&str> {
        self.segments
            .last()
            .filter(|s| s.predicates.is_empty() && self.segments.len() > 1)
            .map(|s| s.name.as_str())
    }

    /// The last list entry on the path: its list name and segment index.
    pub fn last_entry(&self) -> Option<(usize, &PathSegment)> {
        self.segments
            .iter()
            .enumerate()
            .rev()
            .find(|(_, s)| !s.predicates.is_empty())
    }

    /// True when the path addresses a list entry itself.
    pub fn is_entry(&self) -> bool {
        self.segments
            .last()
            .is_some_and(|s| !s.predicates.is_empty())
    }

    /// Rendered paths of every list entry the path passes through, outermost first.
    pub fn entry_paths(&self) -> Vec<String> {
        (0..self.segments.len())
            .filter(|&i| !self.segments[i].predicates.is_empty())
            .map(|i| self.render_prefix(i + 1))
            .collect()
    }

    fn render_prefix(&self, count: usize) -> String {
        let mut out = String::new();
        for (i, segment) in self.segments.iter().take(count).enumerate() {
            out.push('/');
            if i == 0 {
                out.push_str(&self.module);
                out.push(':');
            }
            out.push_str(&segment.name);
            for (key, value) in &segment.predicates {
                let quote = if value.contains('\'') { '"' } else { '\'' };
                out.push('[');
                out.push_str(key);
                out.push('=');
                out.push(quote);
                out.push_str(value);
                out.push(quote);
                out.push(']');
            }
        }
        out
    }
}

impl fmt::Display for DataPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_prefix(self.segments.len()))
    }
}

impl std::str::FromStr for DataPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

struct Cursor<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(source: &'a str) -> Self {
        Self { source, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn error(&self, reason: &str) -> Error {
        Error::invalid_path(self.source, format!("{} at offset {}", reason, self.pos))
    }

    fn expect(&mut self, c: char) -> Result<()> {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            Ok(())
        } else {
            Err(self.error(&format!("expected '{}'", c)))
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let rest = self.rest();
        let len = rest.find(|c: char| !pred(c)).unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    fn take_name(&mut self) -> Result<String> {
        let name = self.take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':'));
        if name.is_empty() {
            return Err(self.error("expected node name"));
        }
        Ok(name.to_string())
    }

    fn take_predicates(&mut self) -> Result<Vec<(String, String)>> {
        let mut predicates = Vec::new();
        while self.peek() == Some('[') {
            self.pos += 1;
            let key = self.take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'));
            if key.is_empty() {
                return Err(self.error("expected predicate key"));
            }
            self.expect('=')?;
            let quote = match self.peek() {
                Some(q @ ('\'' | '"')) => q,
                _ => return Err(self.error("expected quoted predicate value")),
            };
            self.pos += 1;
            let value = self.take_while(|c| c != quote);
            self.expect(quote)?;
            self.expect(']')?;
            predicates.push((key.to_string(), value.to_string()));
        }
        Ok(predicates)
    }
}
