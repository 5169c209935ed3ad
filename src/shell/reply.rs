use bytes::Bytes;
use std::fmt;

/// Result of a shell command, rendered the way `redis-cli` prints replies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Status(String),
    Integer(i64),
    Bulk(Option<Bytes>),
    Array(Vec<Bytes>),
    Error(String),
}

impl Reply {
    pub fn ok() -> Self {
        Reply::Status("OK".to_string())
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Reply::Error(_))
    }
}

/// Quote a payload, escaping anything that is not printable ASCII.
fn write_quoted(f: &mut fmt::Formatter<'_>, data: &[u8]) -> fmt::Result {
    write!(f, "\"")?;
    for &b in data {
        match b {
            b'"' => write!(f, "\\\"")?,
            b'\\' => write!(f, "\\\\")?,
            b'\n' => write!(f, "\\n")?,
            b'\r' => write!(f, "\\r")?,
            b'\t' => write!(f, "\\t")?,
            0x20..=0x7e => write!(f, "{}", b as char)?,
            _ => write!(f, "\\x{b:02x}")?,
        }
    }
    write!(f, "\"")
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Status(s) => write!(f, "{s}"),
            Reply::Integer(i) => write!(f, "(integer) {i}"),
            Reply::Bulk(None) => write!(f, "(nil)"),
            Reply::Bulk(Some(data)) => write_quoted(f, data),
            Reply::Array(items) if items.is_empty() => write!(f, "(empty array)"),
            Reply::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}) ", i + 1)?;
                    write_quoted(f, item)?;
                }
                Ok(())
            }
            Reply::Error(msg) => write!(f, "(error) {msg}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_scalars() {
        assert_eq!(Reply::ok().to_string(), "OK");
        assert_eq!(Reply::Integer(3).to_string(), "(integer) 3");
        assert_eq!(Reply::Bulk(None).to_string(), "(nil)");
        assert_eq!(Reply::Error("ERR boom".into()).to_string(), "(error) ERR boom");
    }

    #[test]
    fn test_render_bulk_escapes_bytes() {
        let reply = Reply::Bulk(Some(Bytes::from_static(b"a\"b\n\x00")));
        assert_eq!(reply.to_string(), r#""a\"b\n\x00""#);
    }

    #[test]
    fn test_render_array() {
        let reply = Reply::Array(vec![Bytes::from("a"), Bytes::from("b")]);
        assert_eq!(reply.to_string(), "1) \"a\"\n2) \"b\"");
        assert_eq!(Reply::Array(vec![]).to_string(), "(empty array)");
    }
}
