//! Item query references: `/host/key[params]`
//!
//! An empty host refers to the current host. Calculated item formulas may
//! additionally use `*` wildcards and a trailing `?[filter]` group.

use crate::config::compile_time::parsing::MAX_KEY_NESTING_DEPTH;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryReference {
    pub host: String,
    pub key: String,
    /// Raw text of each top-level key parameter
    pub key_parameters: Vec<String>,
    pub filter: Option<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct QueryParser {
    calculated: bool,
}

impl QueryParser {
    pub fn new(calculated: bool) -> Self {
        Self { calculated }
    }

    /// Parse the whole text as a query reference
    pub fn parse(&self, text: &str) -> Option<QueryReference> {
        let bytes = text.as_bytes();
        if bytes.first() != Some(&b'/') {
            return None;
        }

        let host_end = 1 + text[1..].find('/')?;
        let host = &text[1..host_end];
        if !host.bytes().all(|b| self.is_host_byte(b)) {
            return None;
        }

        let key_start = host_end + 1;
        let key_len = bytes[key_start..]
            .iter()
            .take_while(|b| self.is_key_byte(**b))
            .count();
        if key_len == 0 {
            return None;
        }
        let mut pos = key_start + key_len;

        let mut key_parameters = Vec::new();
        if bytes.get(pos) == Some(&b'[') {
            let (params, next) = parse_key_parameters(bytes, pos, 1)?;
            key_parameters = params
                .into_iter()
                .map(|(start, end)| text[start..end].to_string())
                .collect();
            pos = next;
        }

        let mut filter = None;
        if self.calculated && bytes[pos..].starts_with(b"?[") {
            let end = find_group_end(bytes, pos + 1)?;
            if end == pos + 2 {
                return None;
            }
            filter = Some(text[pos + 2..end].to_string());
            pos = end + 1;
        }

        if pos != bytes.len() {
            return None;
        }

        Some(QueryReference {
            host: host.to_string(),
            key: text[key_start..key_start + key_len].to_string(),
            key_parameters,
            filter,
        })
    }

    fn is_host_byte(&self, b: u8) -> bool {
        b.is_ascii_alphanumeric()
            || matches!(b, b'_' | b'.' | b' ' | b'-')
            || (self.calculated && b == b'*')
    }

    fn is_key_byte(&self, b: u8) -> bool {
        b.is_ascii_alphanumeric() || matches!(b, b'_' | b'.' | b'-') || (self.calculated && b == b'*')
    }
}

/// Parse `[p1,p2,...]` starting at the opening bracket.
///
/// Returns the byte range of every top-level parameter and the position just
/// past the closing bracket.
fn parse_key_parameters(
    bytes: &[u8],
    open: usize,
    depth: usize,
) -> Option<(Vec<(usize, usize)>, usize)> {
    if depth > MAX_KEY_NESTING_DEPTH {
        return None;
    }

    let mut params = Vec::new();
    let mut pos = open + 1;

    loop {
        while bytes.get(pos) == Some(&b' ') {
            pos += 1;
        }

        let start = pos;
        match bytes.get(pos)? {
            b'"' => {
                pos = skip_quoted(bytes, pos)?;
                params.push((start, pos));
                while bytes.get(pos) == Some(&b' ') {
                    pos += 1;
                }
            }
            b'[' => {
                let (_, next) = parse_key_parameters(bytes, pos, depth + 1)?;
                pos = next;
                params.push((start, pos));
                while bytes.get(pos) == Some(&b' ') {
                    pos += 1;
                }
            }
            _ => {
                while let Some(b) = bytes.get(pos) {
                    if matches!(b, b',' | b']') {
                        break;
                    }
                    pos += 1;
                }
                params.push((start, pos));
            }
        }

        match bytes.get(pos)? {
            b',' => pos += 1,
            b']' => return Some((params, pos + 1)),
            _ => return None,
        }
    }
}

/// Position just past the closing quote of a string starting at `open`
pub(crate) fn skip_quoted(bytes: &[u8], open: usize) -> Option<usize> {
    let mut pos = open + 1;
    while let Some(b) = bytes.get(pos) {
        match b {
            b'\\' => pos += 2,
            b'"' => return Some(pos + 1),
            _ => pos += 1,
        }
    }
    None
}

/// Position of the bracket closing the group opened at `open`
fn find_group_end(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut pos = open;
    while let Some(b) = bytes.get(pos) {
        match b {
            b'"' => {
                pos = skip_quoted(bytes, pos)?;
                continue;
            }
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(pos);
                }
            }
            _ => {}
        }
        pos += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_references() {
        let parser = QueryParser::new(false);

        let q = parser.parse("/host/key").unwrap();
        assert_eq!(q.host, "host");
        assert_eq!(q.key, "key");
        assert!(q.key_parameters.is_empty());

        let q = parser.parse("//system.cpu.load").unwrap();
        assert_eq!(q.host, "");

        let q = parser.parse("/Zabbix server/vfs.fs.size[\"/var/log\",pfree]").unwrap();
        assert_eq!(q.key_parameters, vec!["\"/var/log\"", "pfree"]);

        let q = parser.parse("/h/net.if.in[eth0, [a,b] ,]").unwrap();
        assert_eq!(q.key_parameters.len(), 3);
        assert_eq!(q.key_parameters[1], "[a,b]");
    }

    #[test]
    fn test_rejected_references() {
        let parser = QueryParser::new(false);
        for bad in [
            "",
            "host/key",
            "/host",
            "/host/",
            "/ho$t/key",
            "/host/key[",
            "/host/key[\"unterminated]",
            "/host/key[a]b",
            "/host/key x",
            "/*/key",
            "/host/key?[tag=\"a\"]",
        ] {
            assert!(parser.parse(bad).is_none(), "{}", bad);
        }
    }

    #[test]
    fn test_calculated_extensions() {
        let parser = QueryParser::new(true);

        let q = parser.parse("/*/vfs.fs.size[*,free]").unwrap();
        assert_eq!(q.host, "*");

        let q = parser.parse("/*/key?[group=\"Linux [prod]\"]").unwrap();
        assert_eq!(q.filter.as_deref(), Some("group=\"Linux [prod]\""));

        assert!(parser.parse("/*/key?[]").is_none());
        assert!(parser.parse("/*/key?[a").is_none());
    }

    #[test]
    fn test_nesting_limit() {
        let parser = QueryParser::new(false);
        let deep = format!(
            "/h/k{}{}",
            "[".repeat(MAX_KEY_NESTING_DEPTH + 1),
            "]".repeat(MAX_KEY_NESTING_DEPTH + 1)
        );
        assert!(parser.parse(&deep).is_none());

        let ok = format!(
            "/h/k{}{}",
            "[".repeat(MAX_KEY_NESTING_DEPTH),
            "]".repeat(MAX_KEY_NESTING_DEPTH)
        );
        assert!(parser.parse(&ok).is_some());
    }
}
