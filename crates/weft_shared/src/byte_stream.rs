use std::cell::Cell;
use std::fmt::{Debug, Formatter};
use std::io::Read;
use std::{fmt, io};

pub const CHAR_LF: char = '\u{000A}';
pub const CHAR_CR: char = '\u{000D}';
pub const CHAR_FF: char = '\u{000C}';
pub const CHAR_NUL: char = '\u{0000}';

/// Encoding defines how the raw bytes of the buffer are turned into characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Unknown encoding. The encoding is sniffed from the bytes when they are read
    UNKNOWN,
    /// Single byte characters (windows-1252, which is what "ascii" means on the web)
    ASCII,
    /// Stream is of UTF8 characters
    UTF8,
    /// Stream consists of 16-bit UTF characters (Little Endian)
    UTF16LE,
    /// Stream consists of 16-bit UTF characters (Big Endian)
    UTF16BE,
}

/// Defines a single character/element in the stream.
///
/// End of the stream is denoted as a separate element, so is Empty to indicate that the buffer
/// is empty but not yet closed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Character {
    /// Standard UTF character
    Ch(char),
    /// Stream buffer empty and closed
    StreamEnd,
    /// Stream buffer empty (but not closed)
    StreamEmpty,
}

use Character::{Ch, StreamEmpty, StreamEnd};

impl From<Character> for char {
    fn from(c: Character) -> Self {
        match c {
            Ch(c) => c,
            StreamEmpty | StreamEnd => CHAR_NUL,
        }
    }
}

impl From<&Character> for char {
    fn from(c: &Character) -> Self {
        char::from(*c)
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Ch(ch) => write!(f, "{ch}"),
            StreamEnd => write!(f, "StreamEnd"),
            StreamEmpty => write!(f, "StreamEmpty"),
        }
    }
}

impl Character {
    /// Returns true when the character is a whitespace
    pub fn is_whitespace(&self) -> bool {
        matches!(self, Ch(c) if c.is_whitespace())
    }

    /// Returns true when the character is an ascii digit
    pub fn is_numeric(&self) -> bool {
        matches!(self, Ch(c) if c.is_ascii_digit())
    }

    /// Converts a slice of characters into a string, dropping the stream markers
    pub fn slice_to_string(v: &[Character]) -> String {
        v.iter()
            .filter_map(|c| match c {
                Ch(c) => Some(*c),
                _ => None,
            })
            .collect()
    }
}

/// Configuration structure for a bytestream.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Treat CRLF pairs, lone CRs and form feeds as a single LF
    pub normalize_newlines: bool,
    /// Replace NUL characters with U+FFFD
    pub replace_nul: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            normalize_newlines: true,
            replace_nul: true,
        }
    }
}

/// Generic stream trait
pub trait Stream {
    /// Read current character
    fn read(&self) -> Character;
    /// Read current character and advance to next
    fn read_and_next(&self) -> Character;
    /// Look ahead in the stream
    fn look_ahead(&self, offset: usize) -> Character;
    /// Advance with 1 character
    fn next(&self);
    /// Advance with offset characters
    fn next_n(&self, offset: usize);
    /// Unread the current character
    fn prev(&self);
    /// Unread n characters
    fn prev_n(&self, n: usize);
    /// Seek to a specific character position
    fn seek(&self, offset: usize);
    /// Tell the current character position
    fn tell(&self) -> usize;
    /// Retrieves the characters between the two character positions
    fn get_slice(&self, start: usize, end: usize) -> Vec<Character>;
    /// Resets the stream back to the start position
    fn reset_stream(&self);
    /// Closes the stream (no more data can be added)
    fn close(&mut self);
    /// Returns true when the stream is closed
    fn closed(&self) -> bool;
    /// Returns true when the stream is empty (but still open)
    fn exhausted(&self) -> bool;
    /// Returns true when the stream is closed and empty
    fn eof(&self) -> bool;
}

/// A stream of characters decoded from bytes. Decoding happens when data is added, so looking
/// ahead and slicing are cheap index operations afterwards.
pub struct ByteStream {
    /// Decoded (and newline-normalized) characters
    chars: Vec<char>,
    /// Current position in the stream, in characters
    position: Cell<usize>,
    /// True when no more data will be added
    closed: bool,
    /// Encoding used to decode added bytes
    encoding: Encoding,
    /// Configuration for the stream
    config: Config,
}

impl Default for ByteStream {
    fn default() -> Self {
        Self::new(Encoding::UTF8, None)
    }
}

impl Stream for ByteStream {
    fn read(&self) -> Character {
        self.char_at(self.position.get())
    }

    fn read_and_next(&self) -> Character {
        let c = self.read();
        self.next();
        c
    }

    fn look_ahead(&self, offset: usize) -> Character {
        self.char_at(self.position.get() + offset)
    }

    fn next(&self) {
        self.next_n(1);
    }

    fn next_n(&self, offset: usize) {
        let pos = (self.position.get() + offset).min(self.chars.len());
        self.position.set(pos);
    }

    fn prev(&self) {
        self.prev_n(1);
    }

    fn prev_n(&self, n: usize) {
        self.position.set(self.position.get().saturating_sub(n));
    }

    fn seek(&self, offset: usize) {
        self.position.set(offset.min(self.chars.len()));
    }

    fn tell(&self) -> usize {
        self.position.get()
    }

    fn get_slice(&self, start: usize, end: usize) -> Vec<Character> {
        let end = end.min(self.chars.len());
        if start >= end {
            return Vec::new();
        }

        self.chars[start..end].iter().map(|c| Ch(*c)).collect()
    }

    fn reset_stream(&self) {
        self.position.set(0);
    }

    fn close(&mut self) {
        self.closed = true;
    }

    fn closed(&self) -> bool {
        self.closed
    }

    fn exhausted(&self) -> bool {
        self.position.get() >= self.chars.len()
    }

    fn eof(&self) -> bool {
        self.closed() && self.exhausted()
    }
}

impl ByteStream {
    /// Create a new empty input stream
    #[must_use]
    pub fn new(encoding: Encoding, config: Option<Config>) -> Self {
        Self {
            chars: Vec::new(),
            position: Cell::new(0),
            closed: false,
            encoding,
            config: config.unwrap_or_default(),
        }
    }

    fn char_at(&self, pos: usize) -> Character {
        match self.chars.get(pos) {
            Some(c) => Ch(*c),
            None if self.closed => StreamEnd,
            None => StreamEmpty,
        }
    }

    /// Populates the current buffer with the given string. Any previous content is replaced.
    pub fn read_from_str(&mut self, s: &str) {
        self.chars.clear();
        self.append_str(s);
        self.reset_stream();
    }

    /// Appends the given string to the buffer
    pub fn append_str(&mut self, s: &str) {
        let mut iter = s.chars().peekable();
        while let Some(c) = iter.next() {
            match c {
                CHAR_CR if self.config.normalize_newlines => {
                    if iter.peek() == Some(&CHAR_LF) {
                        iter.next();
                    }
                    self.chars.push(CHAR_LF);
                }
                CHAR_FF if self.config.normalize_newlines => self.chars.push(CHAR_LF),
                CHAR_NUL if self.config.replace_nul => self.chars.push(char::REPLACEMENT_CHARACTER),
                c => self.chars.push(c),
            }
        }
    }

    /// Populates the buffer with the given bytes, decoded with the current encoding. When the
    /// encoding is unknown, it is detected first.
    pub fn read_from_bytes(&mut self, bytes: &[u8]) {
        if self.encoding == Encoding::UNKNOWN {
            self.encoding = detect_encoding(bytes);
            log::debug!("detected stream encoding: {:?}", self.encoding);
        }

        let decoder = match self.encoding {
            Encoding::ASCII => encoding_rs::WINDOWS_1252,
            Encoding::UTF16LE => encoding_rs::UTF_16LE,
            Encoding::UTF16BE => encoding_rs::UTF_16BE,
            Encoding::UTF8 | Encoding::UNKNOWN => encoding_rs::UTF_8,
        };

        let (decoded, _, had_errors) = decoder.decode(bytes);
        if had_errors {
            log::warn!("stream contained malformed {} sequences", decoder.name());
        }

        self.read_from_str(&decoded);
        self.close();
    }

    /// Populates the buffer with the contents of the given reader and closes the stream
    pub fn read_from_file(&mut self, mut f: impl Read) -> io::Result<()> {
        let mut bytes = Vec::new();
        f.read_to_end(&mut bytes)?;
        self.read_from_bytes(&bytes);
        Ok(())
    }

    /// Returns the encoding that is used to decode bytes
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Changes the encoding that is used for the next `read_from_bytes` call
    pub fn set_encoding(&mut self, e: Encoding) {
        self.encoding = e;
    }
}

/// Detects the encoding of the given bytes. A byte order mark wins, otherwise the bytes are
/// sniffed. Anything that is not utf-8 or utf-16 is read as single byte characters.
pub fn detect_encoding(bytes: &[u8]) -> Encoding {
    if bytes.starts_with(b"\xEF\xBB\xBF") {
        return Encoding::UTF8;
    } else if bytes.starts_with(b"\xFF\xFE") {
        return Encoding::UTF16LE;
    } else if bytes.starts_with(b"\xFE\xFF") {
        return Encoding::UTF16BE;
    }

    // Cap the buffer size we will check to max 64KB
    const MAX_BUF_SIZE: usize = 64 * 1024;
    let (buf, complete) = if bytes.len() > MAX_BUF_SIZE {
        (&bytes[..MAX_BUF_SIZE], false)
    } else {
        (bytes, true)
    };

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(buf, complete);

    let encoding = detector.guess(None, true);
    if encoding == encoding_rs::UTF_8 {
        Encoding::UTF8
    } else if encoding == encoding_rs::UTF_16BE {
        Encoding::UTF16BE
    } else if encoding == encoding_rs::UTF_16LE {
        Encoding::UTF16LE
    } else {
        Encoding::ASCII
    }
}

/// Location holds the start position of the given element in the data source
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    /// Line number, starting with 1
    pub line: usize,
    /// Column number, starting with 1
    pub column: usize,
    /// Character offset, starting with 0
    pub offset: usize,
}

impl Default for Location {
    /// Default to line 1, column 1
    fn default() -> Self {
        Self::new(1, 1, 0)
    }
}

impl Location {
    /// Create a new Location
    #[must_use]
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self { line, column, offset }
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Moves the location over the given character
    pub fn advance(&mut self, c: char) {
        self.offset += 1;
        if c == CHAR_LF {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

impl Debug for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}:{})", self.line, self.column)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
