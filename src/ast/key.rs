use crate::lexer::{BACKSLASH, COLON, DOUBLE_QUOTE, SINGLE_QUOTE};
use serde::Serialize;
use thiserror::Error;

/// Errors produced while splitting a key into segments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("Key parsing error: Unterminated quoted segment starting at position {position}")]
    UnterminatedQuote { position: usize },

    #[error("Key parsing error: Incomplete escape sequence at position {position}")]
    IncompleteEscape { position: usize },
}

/// A possibly segmented key such as `user:name`.
///
/// `raw` keeps the text exactly as written in the query, quotes and escapes
/// included; `segments` holds the resolved components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Key {
    pub segments: Vec<String>,
    pub raw: String,
}

impl Key {
    /// Build a key from segments. Without a raw form the segments are joined
    /// with `:`.
    pub fn new(segments: Vec<String>, raw: Option<String>) -> Self {
        let raw = raw.unwrap_or_else(|| segments.join(":"));
        Key { segments, raw }
    }

    pub fn is_segmented(&self) -> bool {
        self.segments.len() > 1
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Splits raw key text into segments.
///
/// A bare `:` separates segments. Quotes may open anywhere inside a segment
/// and their content is copied into the same segment with escapes resolved,
/// so `"a:b":c` gives `["a:b", "c"]` and `x"y z"` gives `["xy z"]`.
pub struct KeyParser {
    input: Vec<char>,
    position: usize,
    segments: Vec<String>,
    current_segment: String,
}

impl KeyParser {
    pub fn new(input: &str) -> Self {
        KeyParser {
            input: input.chars().collect(),
            position: 0,
            segments: vec![],
            current_segment: String::new(),
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn read_escape(&mut self) -> Result<char, KeyError> {
        self.advance(); // Consume backslash

        let resolved = match self.current_char() {
            Some('n') => '\n',
            Some('t') => '\t',
            // Quotes, backslash and unknown escapes pass through unchanged
            Some(ch) => ch,
            None => {
                return Err(KeyError::IncompleteEscape {
                    position: self.position,
                });
            }
        };
        self.advance();
        Ok(resolved)
    }

    fn read_quoted(&mut self, quote: char) -> Result<(), KeyError> {
        let start = self.position;
        self.advance(); // Consume opening quote

        while let Some(ch) = self.current_char() {
            match ch {
                c if c == quote => {
                    self.advance();
                    return Ok(());
                }
                BACKSLASH => {
                    let resolved = self.read_escape()?;
                    self.current_segment.push(resolved);
                }
                _ => {
                    self.current_segment.push(ch);
                    self.advance();
                }
            }
        }

        Err(KeyError::UnterminatedQuote { position: start })
    }

    fn read_segment(&mut self) -> Result<(), KeyError> {
        while let Some(ch) = self.current_char() {
            match ch {
                COLON => return Ok(()),
                SINGLE_QUOTE | DOUBLE_QUOTE => self.read_quoted(ch)?,
                BACKSLASH => {
                    let resolved = self.read_escape()?;
                    self.current_segment.push(resolved);
                }
                _ => {
                    self.current_segment.push(ch);
                    self.advance();
                }
            }
        }
        Ok(())
    }

    pub fn parse(mut self) -> Result<Key, KeyError> {
        let raw: String = self.input.iter().collect();
        if self.input.is_empty() {
            return Ok(Key::new(vec![], Some(raw)));
        }

        while self.position < self.input.len() {
            self.read_segment()?;
            self.segments.push(std::mem::take(&mut self.current_segment));

            if self.current_char() == Some(COLON) {
                self.advance();
                // A trailing colon opens one last, empty segment
                if self.position >= self.input.len() {
                    self.segments.push(String::new());
                }
            }
        }

        Ok(Key::new(self.segments, Some(raw)))
    }
}

/// Parse raw key text into a [`Key`].
///
/// # Examples
///
/// ```
/// use flyql::parse_key;
///
/// let key = parse_key("a:b:c").unwrap();
/// assert_eq!(key.segments, vec!["a", "b", "c"]);
/// assert!(key.is_segmented());
/// ```
pub fn parse_key(input: &str) -> Result<Key, KeyError> {
    KeyParser::new(input).parse()
}
