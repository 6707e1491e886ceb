//! Minimal zero-copy bencode reader, plus an encoder for building fixtures.

use thiserror::Error;

/// Maximum nesting of lists and dictionaries accepted by the parser.
pub const MAX_DEPTH: usize = 512;

/// A decoded bencode value borrowing from the input buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value<'a> {
    Int(i64),
    /// A well-formed integer outside the `i64` range, as its raw digits.
    BigInt(&'a [u8]),
    Bytes(&'a [u8]),
    List(Vec<Value<'a>>),
    /// Entries in file order. Duplicate keys are kept as-is.
    Dict(Vec<(&'a [u8], Value<'a>)>),
}

impl<'a> Value<'a> {
    /// Looks up a dictionary entry. When a key repeats, the last one wins.
    pub fn get(&self, key: &[u8]) -> Option<&Value<'a>> {
        match self {
            Value::Dict(entries) => entries
                .iter()
                .rev()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v),
            _ => None,
        }
    }

    /// Returns the raw bytes if this is a byte string.
    pub fn as_bytes(&self) -> Option<&'a [u8]> {
        match self {
            Value::Bytes(b) => Some(*b),
            _ => None,
        }
    }

    pub fn is_dict(&self) -> bool {
        matches!(self, Value::Dict(_))
    }
}

/// Structural errors in bencoded input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BencodeError {
    #[error("unexpected end of input at byte {pos}")]
    UnexpectedEof { pos: usize },

    #[error("invalid type tag 0x{byte:02x} at byte {pos}")]
    InvalidPrefix { byte: u8, pos: usize },

    #[error("invalid integer at byte {pos}")]
    InvalidInt { pos: usize },

    #[error("invalid byte string length at byte {pos}")]
    InvalidLength { pos: usize },

    #[error("dictionary key at byte {pos} is not a byte string")]
    InvalidDictKey { pos: usize },

    #[error("nesting deeper than {max} levels at byte {pos}")]
    TooDeep { max: usize, pos: usize },

    #[error("trailing data after byte {pos}")]
    TrailingData { pos: usize },
}

/// Parses a complete bencoded document. The root value must span the whole input.
pub fn parse(input: &[u8]) -> Result<Value<'_>, BencodeError> {
    let mut parser = Parser { input, pos: 0 };
    let value = parser.value(0)?;
    if parser.pos != input.len() {
        return Err(BencodeError::TrailingData { pos: parser.pos });
    }
    Ok(value)
}

struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Result<u8, BencodeError> {
        self.input
            .get(self.pos)
            .copied()
            .ok_or(BencodeError::UnexpectedEof { pos: self.pos })
    }

    /// Index of the first `needle` at or after `from`.
    fn find(&self, from: usize, needle: u8) -> Result<usize, BencodeError> {
        self.input[from..]
            .iter()
            .position(|&b| b == needle)
            .map(|offset| from + offset)
            .ok_or(BencodeError::UnexpectedEof {
                pos: self.input.len(),
            })
    }

    fn value(&mut self, depth: usize) -> Result<Value<'a>, BencodeError> {
        if depth > MAX_DEPTH {
            return Err(BencodeError::TooDeep {
                max: MAX_DEPTH,
                pos: self.pos,
            });
        }

        match self.peek()? {
            b'i' => self.int(),
            b'l' => {
                self.pos += 1;
                let mut items = Vec::new();
                while self.peek()? != b'e' {
                    items.push(self.value(depth + 1)?);
                }
                self.pos += 1;
                Ok(Value::List(items))
            }
            b'd' => {
                self.pos += 1;
                let mut entries = Vec::new();
                while self.peek()? != b'e' {
                    if !self.peek()?.is_ascii_digit() {
                        return Err(BencodeError::InvalidDictKey { pos: self.pos });
                    }
                    let key = self.bytes()?;
                    let value = self.value(depth + 1)?;
                    entries.push((key, value));
                }
                self.pos += 1;
                Ok(Value::Dict(entries))
            }
            b'0'..=b'9' => self.bytes().map(Value::Bytes),
            byte => Err(BencodeError::InvalidPrefix {
                byte,
                pos: self.pos,
            }),
        }
    }

    fn int(&mut self) -> Result<Value<'a>, BencodeError> {
        let start = self.pos;
        let digits_start = start + 1;
        let end = self.find(digits_start, b'e')?;
        let digits = &self.input[digits_start..end];

        let well_formed = match digits {
            [] | [b'-'] => false,
            [b'-', b'0', ..] => false,
            [b'0', _, ..] => false,
            [b'-', rest @ ..] => rest.iter().all(u8::is_ascii_digit),
            _ => digits.iter().all(u8::is_ascii_digit),
        };
        if !well_formed {
            return Err(BencodeError::InvalidInt { pos: start });
        }

        // digits are ASCII here, so only overflow can fail the parse
        let value = std::str::from_utf8(digits)
            .ok()
            .and_then(|s| s.parse::<i64>().ok())
            .map_or(Value::BigInt(digits), Value::Int);
        self.pos = end + 1;
        Ok(value)
    }

    fn bytes(&mut self) -> Result<&'a [u8], BencodeError> {
        let start = self.pos;
        let colon = self.find(start, b':')?;
        let digits = &self.input[start..colon];

        if digits.is_empty()
            || !digits.iter().all(u8::is_ascii_digit)
            || (digits.len() > 1 && digits[0] == b'0')
        {
            return Err(BencodeError::InvalidLength { pos: start });
        }

        let len = std::str::from_utf8(digits)
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .ok_or(BencodeError::InvalidLength { pos: start })?;

        let data_start = colon + 1;
        let data_end = data_start
            .checked_add(len)
            .filter(|&end| end <= self.input.len())
            .ok_or(BencodeError::UnexpectedEof {
                pos: self.input.len(),
            })?;

        self.pos = data_end;
        Ok(&self.input[data_start..data_end])
    }
}

/// Encodes a value. Dictionary keys are written in sorted order.
pub fn encode(value: &Value<'_>) -> Vec<u8> {
    let mut out = Vec::new();
    encode_into(value, &mut out);
    out
}

fn encode_into(value: &Value<'_>, out: &mut Vec<u8>) {
    match value {
        Value::Int(num) => {
            out.push(b'i');
            out.extend_from_slice(num.to_string().as_bytes());
            out.push(b'e');
        }
        Value::BigInt(digits) => {
            out.push(b'i');
            out.extend_from_slice(digits);
            out.push(b'e');
        }
        Value::Bytes(bytes) => encode_bytes(bytes, out),
        Value::List(items) => {
            out.push(b'l');
            for item in items {
                encode_into(item, out);
            }
            out.push(b'e');
        }
        Value::Dict(entries) => {
            out.push(b'd');
            let mut sorted: Vec<_> = entries.iter().collect();
            sorted.sort_by(|a, b| a.0.cmp(b.0));
            for (key, value) in sorted {
                encode_bytes(key, out);
                encode_into(value, out);
            }
            out.push(b'e');
        }
    }
}

fn encode_bytes(bytes: &[u8], out: &mut Vec<u8>) {
    out.extend_from_slice(bytes.len().to_string().as_bytes());
    out.push(b':');
    out.extend_from_slice(bytes);
}
