//! Streaming byte tokenizer.
//!
//! Bytes arrive in arbitrary chunks; the tokenizer keeps its quote/escape
//! state between calls, so a token split across two reads comes out whole.
//!
//! Rules:
//! - blanks (space, tab) separate tokens;
//! - a `"` opening a token starts a quoted token in which blanks and line
//!   breaks are literal, and the next unescaped `"` ends it;
//! - `\` makes the next byte literal; it is dropped before `"` and before a
//!   line break outside quotes (which joins the two lines), and kept before
//!   anything else, so `C:\dir` survives;
//! - any other whitespace outside quotes ends the command.

/// What the tokenizer hands to the assembler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lexeme {
    /// A complete token. Quoted tokens may be empty.
    Token(String),
    /// The line (and with it the command) ended.
    EndOfLine,
}

/// Incremental tokenizer with a per-token byte limit.
#[derive(Debug)]
pub struct Tokenizer {
    buffer: Vec<u8>,
    limit: usize,
    started: bool,
    quoted: bool,
    escaped: bool,
}

impl Tokenizer {
    /// Create a tokenizer that truncates tokens at `limit` bytes.
    pub fn new(limit: usize) -> Self {
        Self {
            buffer: Vec::new(),
            limit,
            started: false,
            quoted: false,
            escaped: false,
        }
    }

    /// Feed a chunk of input, appending completed lexemes to `out`.
    pub fn feed(&mut self, bytes: &[u8], out: &mut Vec<Lexeme>) {
        for &byte in bytes {
            self.push(byte, out);
        }
    }

    /// End of input: flush a pending token and end the line.
    ///
    /// A dangling backslash is kept literally. The tokenizer is reset and can
    /// be fed again afterwards.
    pub fn finish(&mut self, out: &mut Vec<Lexeme>) {
        if self.escaped {
            self.escaped = false;
            self.append(b'\\');
        }
        self.quoted = false;
        self.flush(out);
        out.push(Lexeme::EndOfLine);
    }

    fn push(&mut self, byte: u8, out: &mut Vec<Lexeme>) {
        if self.escaped {
            self.escaped = false;
            if !self.quoted && is_line_break(byte) {
                return;
            }
            if byte != b'"' {
                self.append(b'\\');
            }
            self.append(byte);
            return;
        }

        match byte {
            b'\\' => self.escaped = true,
            b'"' if self.quoted => {
                self.quoted = false;
                self.flush(out);
            }
            b'"' if !self.started => {
                self.quoted = true;
                self.started = true;
            }
            b' ' | b'\t' if !self.quoted => self.flush(out),
            byte if !self.quoted && is_line_break(byte) => {
                self.flush(out);
                out.push(Lexeme::EndOfLine);
            }
            byte => self.append(byte),
        }
    }

    fn append(&mut self, byte: u8) {
        self.started = true;
        if self.buffer.len() < self.limit {
            self.buffer.push(byte);
        }
    }

    fn flush(&mut self, out: &mut Vec<Lexeme>) {
        if !self.started {
            return;
        }
        // The length limit may have cut a multibyte character short.
        if let Err(err) = std::str::from_utf8(&self.buffer) {
            if err.error_len().is_none() {
                self.buffer.truncate(err.valid_up_to());
            }
        }
        let token = String::from_utf8_lossy(&self.buffer).into_owned();
        tracing::trace!(token = %token, "token");
        out.push(Lexeme::Token(token));
        self.buffer.clear();
        self.started = false;
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(crate::app::DEFAULT_BUFFER_SIZE)
    }
}

/// Whitespace other than blanks: the bytes that end a command.
fn is_line_break(byte: u8) -> bool {
    matches!(byte, b'\n' | b'\r' | 0x0b | 0x0c)
}
