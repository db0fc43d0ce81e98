use std::fmt;
use weft_shared::byte_stream::Character::Ch;
use weft_shared::byte_stream::{ByteStream, Character, Location, Stream};

pub type Number = f32;

/// Highest code point that can be produced by an escape
const MAX_ALLOWED_CODE_POINT: u32 = 0x10FFFF;

#[derive(Debug, PartialEq, Clone)]
pub enum TokenType {
    /// A [`<at-keyword-token>`](https://drafts.csswg.org/css-syntax/#at-keyword-token-diagram)
    ///
    /// The value does not include the `@` marker.
    AtKeyword(String),
    Ident(String),
    /// A function name. The opening parenthesis is part of the token but not of the value.
    Function(String),
    Url(String),
    BadUrl(String),
    Dimension {
        value: Number,
        unit: String,
    },
    Percentage(Number),
    Number(Number),
    /// A [`<string-token>`](https://drafts.csswg.org/css-syntax/#string-token-diagram)
    ///
    /// The value does not include the quotes.
    QuotedString(String),
    /// A `<bad-string-token>`
    ///
    /// This token always indicates a parse error.
    BadString(String),
    /// A [`<whitespace-token>`](https://drafts.csswg.org/css-syntax/#whitespace-token-diagram)
    Whitespace,
    /// A [`<hash-token>`](https://drafts.csswg.org/css-syntax/#hash-token-diagram) with the type flag set to "unrestricted"
    ///
    /// The value does not include the `#` marker.
    Hash(String),
    /// A [`<hash-token>`](https://drafts.csswg.org/css-syntax/#hash-token-diagram) with the type flag set to "id"
    ///
    /// Hash that is a valid ID selector. The value does not include the `#` marker.
    IDHash(String),
    /// A `<delim-token>`
    Delim(char),
    /// A `<{-token>`
    LCurly,
    /// A `<}-token>`
    RCurly,
    /// A `<(-token>`
    LParen,
    /// A `<)-token>`
    RParen,
    /// A `<[-token>`
    LBracket,
    /// A `<]-token>`
    RBracket,
    /// A `<comma-token>`
    Comma,
    /// A `:` `<colon-token>`
    Colon,
    /// A `;` `<semicolon-token>`
    Semicolon,
    /// A `<!--` `<CDO-token>`
    Cdo,
    /// A `-->` `<CDC-token>`
    Cdc,
    /// A `<EOF-token>`
    Eof,
}

#[derive(Clone, PartialEq, Debug)]
pub struct Token {
    /// Type of the token
    pub token_type: TokenType,
    /// Location of the first character of the token
    pub location: Location,
    /// Location directly after the last character of the token
    pub end: Location,
}

impl Token {
    /// Returns a new token for the given type on the given location
    fn new(token_type: TokenType, location: Location) -> Token {
        Token {
            token_type,
            location,
            end: location,
        }
    }

    fn new_delim(c: char, location: Location) -> Token {
        Token::new(TokenType::Delim(c), location)
    }

    fn new_id_hash(value: &str, location: Location) -> Token {
        Token::new(TokenType::IDHash(value.to_string()), location)
    }

    fn new_hash(value: &str, location: Location) -> Token {
        Token::new(TokenType::Hash(value.to_string()), location)
    }

    fn new_atkeyword(keyword: &str, location: Location) -> Token {
        Token::new(TokenType::AtKeyword(keyword.to_string()), location)
    }

    fn new_number(value: Number, location: Location) -> Token {
        Token::new(TokenType::Number(value), location)
    }

    fn new_percentage(value: Number, location: Location) -> Token {
        Token::new(TokenType::Percentage(value), location)
    }

    fn new_dimension(value: Number, unit: &str, location: Location) -> Token {
        Token::new(
            TokenType::Dimension {
                value,
                unit: unit.to_string(),
            },
            location,
        )
    }

    fn new_ident(value: &str, location: Location) -> Token {
        Token::new(TokenType::Ident(value.to_string()), location)
    }

    fn new_function(value: &str, location: Location) -> Token {
        Token::new(TokenType::Function(value.to_string()), location)
    }

    fn new_quoted_string(value: &str, location: Location) -> Token {
        Token::new(TokenType::QuotedString(value.to_string()), location)
    }

    fn new_bad_string(value: &str, location: Location) -> Token {
        Token::new(TokenType::BadString(value.to_string()), location)
    }

    fn new_url(value: &str, location: Location) -> Token {
        Token::new(TokenType::Url(value.to_string()), location)
    }

    fn new_bad_url(value: &str, location: Location) -> Token {
        Token::new(TokenType::BadUrl(value.to_string()), location)
    }
}

impl Token {
    pub(crate) fn is_comma(&self) -> bool {
        matches!(self.token_type, TokenType::Comma)
    }

    pub(crate) fn is_string(&self) -> bool {
        matches!(self.token_type, TokenType::QuotedString(_))
    }

    pub(crate) fn is_ident(&self) -> bool {
        matches!(self.token_type, TokenType::Ident(_))
    }

    pub(crate) fn is_ident_ci(&self, ident: &str) -> bool {
        matches!(&self.token_type, TokenType::Ident(s) if s.eq_ignore_ascii_case(ident))
    }

    pub(crate) fn is_whitespace(&self) -> bool {
        matches!(self.token_type, TokenType::Whitespace)
    }

    pub(crate) fn is_colon(&self) -> bool {
        matches!(self.token_type, TokenType::Colon)
    }

    pub(crate) fn is_delim(&self, delim: char) -> bool {
        matches!(self.token_type, TokenType::Delim(c) if c == delim)
    }

    pub(crate) fn is_eof(&self) -> bool {
        matches!(self.token_type, TokenType::Eof)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let string = match &self.token_type {
            TokenType::AtKeyword(val) => format!("@{val}"),
            TokenType::Hash(val) | TokenType::IDHash(val) => format!("#{val}"),
            TokenType::Function(val) => format!("{val}("),
            TokenType::Url(val) | TokenType::BadUrl(val) => format!("url({val})"),
            TokenType::QuotedString(val) | TokenType::BadString(val) => format!("\"{val}\""),
            TokenType::Ident(val) => val.clone(),
            TokenType::Delim(val) => val.to_string(),
            TokenType::Number(val) => val.to_string(),
            TokenType::Percentage(val) => format!("{val}%"),
            TokenType::Dimension { unit, value } => format!("{value}{unit}"),
            TokenType::Cdc => "-->".into(),
            TokenType::Cdo => "<!--".into(),
            TokenType::Colon => ":".into(),
            TokenType::Semicolon => ";".into(),
            TokenType::Comma => ",".into(),
            TokenType::LBracket => "[".into(),
            TokenType::RBracket => "]".into(),
            TokenType::LCurly => "{".into(),
            TokenType::RCurly => "}".into(),
            TokenType::LParen => "(".into(),
            TokenType::RParen => ")".into(),
            TokenType::Whitespace => " ".into(),
            TokenType::Eof => "eof".into(),
        };

        write!(f, "{string}")
    }
}

/// CSS Tokenizer according to the [w3 specification](https://www.w3.org/TR/css-syntax-3/#tokenization)
///
/// Tokens are produced lazily: the parser pulls them with `consume()` and `lookahead()`. Every
/// produced token is kept, so the parser can step back with `reconsume()`.
pub struct Tokenizer<'stream> {
    stream: &'stream mut ByteStream,
    /// Position on the NEXT read to consume. If it's outside the vec list, it will return EOF
    position: usize,
    /// Full list of all tokens produced by the tokenizer
    tokens: Vec<Token>,
    /// Start position of the stream (this does not have to be 1/1)
    start_location: Location,
    /// Current position of the stream, relative to the start of the stream
    cur_location: Location,
}

impl<'stream> Tokenizer<'stream> {
    /// Creates a new tokenizer with the given stream that starts on the given location. This does not have
    /// to be 1/1, but can be any location.
    pub fn new(stream: &'stream mut ByteStream, location: Location) -> Self {
        Self {
            stream,
            position: 0,
            tokens: Vec::new(),
            start_location: location,
            cur_location: Location::default(),
        }
    }

    /// Returns the current location and takes the start location into account
    pub fn current_location(&self) -> Location {
        self.translate(self.cur_location)
    }

    fn translate(&self, loc: Location) -> Location {
        let column = if loc.line() == 1 {
            self.start_location.column() + loc.column() - 1
        } else {
            loc.column()
        };

        Location::new(
            self.start_location.line() + loc.line() - 1,
            column,
            loc.offset(),
        )
    }

    /// Returns true when there is no next token, and the stream is closed
    pub fn eof(&mut self) -> bool {
        self.lookahead(0).is_eof()
    }

    /// Location of the next token that will be consumed
    pub fn next_location(&mut self) -> Location {
        self.lookahead(0).location
    }

    /// Location directly after the last consumed token
    pub fn last_end_location(&self) -> Location {
        match self.position.checked_sub(1).and_then(|p| self.tokens.get(p)) {
            Some(t) => t.end,
            None => self.translate(Location::default()),
        }
    }

    /// Looks ahead at the next NON-WHITESPACE token.
    pub(crate) fn lookahead_sc(&mut self, offset: usize) -> Token {
        let mut i = offset;

        loop {
            let t = self.lookahead(i);
            match t.token_type {
                TokenType::Whitespace => {
                    i += 1;
                }
                _ => return t,
            }
        }
    }

    /// Looks ahead at the next token with offset. So lookahead(0) will look at the token that
    /// will be returned by the next consume()
    pub fn lookahead(&mut self, offset: usize) -> Token {
        while self.tokens.len() <= self.position + offset {
            let last_is_eof = self.tokens.last().is_some_and(|t| t.is_eof());
            if last_is_eof {
                break;
            }

            let token = self.produce_token();
            self.tokens.push(token);
        }

        match self.tokens.get(self.position + offset) {
            Some(t) => t.clone(),
            None => self.eof_token(),
        }
    }

    /// Consumes the next token and returns it
    pub fn consume(&mut self) -> Token {
        let token = self.lookahead(0);
        if self.position < self.tokens.len() {
            self.position += 1;
        }

        log::trace!("{:?}", token);

        token
    }

    /// Reconsumes will push the current position back so the next read will be the same token
    pub fn reconsume(&mut self) {
        if self.position > 0 {
            self.position -= 1;
        }
    }

    /// Returns the index of the next token to consume. Can be passed to `rewind()` later on.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Moves back to a position returned earlier by `position()`
    pub fn rewind(&mut self, position: usize) {
        self.position = position.min(self.tokens.len());
    }

    /// Returns the character offset of the next token to consume
    pub fn tell(&mut self) -> usize {
        self.lookahead(0).location.offset()
    }

    /// Returns the raw source between the given character offsets
    pub fn slice(&self, start: usize, end: usize) -> String {
        Character::slice_to_string(&self.stream.get_slice(start, end))
    }

    /// Returns all tokens until the end of the stream. The position of the tokenizer is not changed.
    pub fn get_tokens(&mut self) -> Vec<Token> {
        let mut offset = 0;
        loop {
            if self.lookahead(offset).is_eof() {
                break;
            }
            offset += 1;
        }

        self.tokens.clone()
    }

    fn eof_token(&self) -> Token {
        Token::new(TokenType::Eof, self.current_location())
    }

    fn produce_token(&mut self) -> Token {
        let mut token = self.consume_token();
        token.end = self.current_location();
        token
    }

    /// 4.3.1. [Consume a token](https://www.w3.org/TR/css-syntax-3/#consume-token)
    fn consume_token(&mut self) -> Token {
        while self.look_ahead_slice(2) == "/*" {
            self.consume_comment();
        }

        let current = self.current_char();
        let loc = self.current_location();

        match current {
            Character::StreamEnd | Character::StreamEmpty => Token::new(TokenType::Eof, loc),
            Ch(c) if c.is_whitespace() => {
                self.consume_whitespace();
                Token::new(TokenType::Whitespace, loc)
            }
            Ch('"' | '\'') => self.consume_string_token(),
            Ch(c @ '#') => {
                // consume '#'
                self.next_char();

                if self.is_ident_char(self.current_char().into()) || self.is_start_of_escape(0) {
                    return if self.is_next_3_points_starts_ident_seq(0) {
                        Token::new_id_hash(self.consume_ident().as_str(), loc)
                    } else {
                        Token::new_hash(self.consume_ident().as_str(), loc)
                    };
                }

                Token::new_delim(c, loc)
            }
            Ch(')') => {
                self.next_char();
                Token::new(TokenType::RParen, loc)
            }
            Ch('(') => {
                self.next_char();
                Token::new(TokenType::LParen, loc)
            }
            Ch('[') => {
                self.next_char();
                Token::new(TokenType::LBracket, loc)
            }
            Ch(']') => {
                self.next_char();
                Token::new(TokenType::RBracket, loc)
            }
            Ch('{') => {
                self.next_char();
                Token::new(TokenType::LCurly, loc)
            }
            Ch('}') => {
                self.next_char();
                Token::new(TokenType::RCurly, loc)
            }
            Ch(',') => {
                self.next_char();
                Token::new(TokenType::Comma, loc)
            }
            Ch(':') => {
                self.next_char();
                Token::new(TokenType::Colon, loc)
            }
            Ch(';') => {
                self.next_char();
                Token::new(TokenType::Semicolon, loc)
            }
            Ch(c @ '+') => {
                if self.is_signed_decimal(0) {
                    return self.consume_numeric_token();
                }

                // consume '+'
                self.next_char();
                Token::new_delim(c, loc)
            }
            Ch('.') => {
                if self.stream.look_ahead(1).is_numeric() {
                    return self.consume_numeric_token();
                }

                // consume '.'
                self.next_char();
                Token::new_delim('.', loc)
            }
            Ch(c @ '-') => {
                if self.is_signed_decimal(0) {
                    return self.consume_numeric_token();
                }

                let cdc_token = "-->";
                if self.look_ahead_slice(cdc_token.len()) == cdc_token {
                    self.consume_chars(cdc_token.len());
                    return Token::new(TokenType::Cdc, loc);
                }

                if self.is_next_3_points_starts_ident_seq(0) {
                    return self.consume_ident_like_seq();
                }

                // consume '-'
                self.next_char();
                Token::new_delim(c, loc)
            }
            Ch(c @ '<') => {
                let cdo_token = "<!--";
                if self.look_ahead_slice(cdo_token.len()) == cdo_token {
                    self.consume_chars(cdo_token.len());
                    return Token::new(TokenType::Cdo, loc);
                }

                // consume '<'
                self.next_char();
                Token::new_delim(c, loc)
            }
            Ch(c @ '@') => {
                // consume '@'
                self.next_char();

                if self.is_next_3_points_starts_ident_seq(0) {
                    return Token::new_atkeyword(self.consume_ident().as_str(), loc);
                }

                Token::new_delim(c, loc)
            }
            Ch(c @ '\\') => {
                if self.is_start_of_escape(0) {
                    return self.consume_ident_like_seq();
                }

                // parse error: a lone backslash
                self.next_char();
                Token::new_delim(c, loc)
            }
            Ch(c) if c.is_ascii_digit() => self.consume_numeric_token(),
            Ch(c) if self.is_ident_start(c) => self.consume_ident_like_seq(),
            Ch(c) => {
                self.next_char();
                Token::new_delim(c, loc)
            }
        }
    }

    /// 4.3.2. [Consume comments](https://www.w3.org/TR/css-syntax-3/#consume-comment)
    fn consume_comment(&mut self) {
        // consume '/*'
        self.consume_chars(2);

        while self.look_ahead_slice(2) != "*/" && !self.at_end() {
            self.next_char();
        }

        // consume '*/'
        self.consume_chars(2);
    }

    /// 4.3.3. [Consume a numeric token](https://www.w3.org/TR/css-syntax-3/#consume-numeric-token)
    ///
    /// Returns either a `<number-token>`, `<percentage-token>`, or `<dimension-token>`.
    fn consume_numeric_token(&mut self) -> Token {
        let loc = self.current_location();
        let number = self.consume_number();

        if self.is_next_3_points_starts_ident_seq(0) {
            let unit = self.consume_ident();
            return Token::new_dimension(number, unit.as_str(), loc);
        }

        if self.current_char() == Ch('%') {
            // consume '%'
            self.next_char();
            return Token::new_percentage(number, loc);
        }

        Token::new_number(number, loc)
    }

    /// 4.3.5. [Consume a string token](https://www.w3.org/TR/css-syntax-3/#consume-string-token)
    ///
    /// Returns either a `<string-token>` or `<bad-string-token>`.
    fn consume_string_token(&mut self) -> Token {
        let loc = self.current_location();

        // consume string starting: (') or (") ...
        let ending = self.next_char();
        let mut value = String::new();

        loop {
            // eof is a parse error, but the string is returned as-is
            if self.at_end() {
                return Token::new_quoted_string(value.as_str(), loc);
            }

            if self.current_char() == ending {
                self.next_char();
                return Token::new_quoted_string(value.as_str(), loc);
            }

            // newline: parse error. The newline is not consumed.
            if self.current_char() == Ch('\n') {
                return Token::new_bad_string(value.as_str(), loc);
            }

            if self.current_char() == Ch('\\') {
                match self.stream.look_ahead(1) {
                    Character::StreamEnd | Character::StreamEmpty => {
                        self.next_char();
                        continue;
                    }
                    Ch('\n') => {
                        // escaped newline is a line continuation
                        self.consume_chars(2);
                        continue;
                    }
                    _ => {
                        value.push(self.consume_escaped_token());
                        continue;
                    }
                }
            }

            value.push(self.next_char().into());
        }
    }

    /// 4.3.12. [Consume a number](https://www.w3.org/TR/css-syntax-3/#consume-number)
    fn consume_number(&mut self) -> Number {
        let mut value = String::new();

        if matches!(self.current_char(), Ch('+' | '-')) {
            value.push(self.next_char().into());
        }

        value.push_str(&self.consume_digits());

        if self.current_char() == Ch('.') && self.stream.look_ahead(1).is_numeric() {
            value.push_str(&self.consume_chars(2));
            value.push_str(&self.consume_digits());
        }

        let c1 = self.stream.look_ahead(0);
        let c2 = self.stream.look_ahead(1);
        let c3 = self.stream.look_ahead(2);
        if matches!(c1, Ch('e' | 'E'))
            && (c2.is_numeric() || (matches!(c2, Ch('+' | '-')) && c3.is_numeric()))
        {
            value.push(self.next_char().into());
            value.push(self.next_char().into());
            value.push_str(&self.consume_digits());
        }

        // "+.5" and friends are accepted by rust's float parser, anything else is a bug in the
        // checks above; fall back to zero instead of failing the whole token
        value.parse().unwrap_or(0.0)
    }

    /// 4.3.4. [Consume an ident-like token](https://www.w3.org/TR/css-syntax-3/#consume-ident-like-token)
    ///
    /// Returns: `<ident-token>`, `<function-token>`, `<url-token>`, or `<bad-url-token>`.
    fn consume_ident_like_seq(&mut self) -> Token {
        let loc = self.current_location();

        let value = self.consume_ident();

        if value.eq_ignore_ascii_case("url") && self.current_char() == Ch('(') {
            // consume '('
            self.next_char();

            let mut offset = 0;
            while self.stream.look_ahead(offset).is_whitespace() {
                offset += 1;
            }

            // url("...") is a regular function with a string argument
            if matches!(self.stream.look_ahead(offset), Ch('"' | '\'')) {
                return Token::new_function(value.as_str(), loc);
            }

            self.consume_whitespace();
            return self.consume_url(loc);
        }

        if self.current_char() == Ch('(') {
            // consume '('
            self.next_char();
            return Token::new_function(value.as_str(), loc);
        }

        Token::new_ident(value.as_str(), loc)
    }

    /// 4.3.6. [Consume a url token](https://www.w3.org/TR/css-syntax-3/#consume-a-url-token)
    ///
    /// Returns either a `<url-token>` or a `<bad-url-token>`
    fn consume_url(&mut self, loc: Location) -> Token {
        let mut url = String::new();

        loop {
            if self.current_char() == Ch(')') {
                // consume ')'
                self.next_char();
                break;
            }

            if self.at_end() {
                // parse error
                break;
            }

            if self.current_char().is_whitespace() {
                self.consume_whitespace();
                if self.current_char() == Ch(')') || self.at_end() {
                    continue;
                }

                self.consume_remnants_of_bad_url();
                return Token::new_bad_url(url.as_str(), loc);
            }

            if self.is_any_of(&['"', '\'', '(']) || self.is_non_printable_char() {
                // parse error
                self.consume_remnants_of_bad_url();
                return Token::new_bad_url(url.as_str(), loc);
            }

            if self.current_char() == Ch('\\') {
                if self.is_start_of_escape(0) {
                    url.push(self.consume_escaped_token());
                    continue;
                }

                self.consume_remnants_of_bad_url();
                return Token::new_bad_url(url.as_str(), loc);
            }

            url.push(self.next_char().into());
        }

        Token::new_url(url.as_str(), loc)
    }

    /// 4.3.14. [Consume the remnants of a bad url](https://www.w3.org/TR/css-syntax-3/#consume-remnants-of-bad-url)
    ///
    /// Consumes enough of the input stream to reach a recovery point where normal tokenizing can resume.
    fn consume_remnants_of_bad_url(&mut self) {
        loop {
            if self.at_end() {
                break;
            }

            if self.current_char() == Ch(')') {
                self.next_char();
                break;
            }

            if self.is_start_of_escape(0) {
                self.consume_escaped_token();
                continue;
            }

            self.next_char();
        }
    }

    /// 4.3.7. [Consume an escaped code point](https://www.w3.org/TR/css-syntax-3/#consume-an-escaped-code-point)
    fn consume_escaped_token(&mut self) -> char {
        // consume '\'
        self.next_char();

        if self.at_end() {
            return char::REPLACEMENT_CHARACTER;
        }

        if !matches!(self.current_char(), Ch(c) if c.is_ascii_hexdigit()) {
            return self.next_char().into();
        }

        let mut value = String::new();
        while matches!(self.current_char(), Ch(c) if c.is_ascii_hexdigit()) && value.len() < 6 {
            value.push(self.next_char().into());
        }

        // a single whitespace after a hex escape belongs to the escape
        if self.current_char().is_whitespace() {
            self.next_char();
        }

        match u32::from_str_radix(&value, 16) {
            Ok(0) => char::REPLACEMENT_CHARACTER,
            Ok(n) if n > MAX_ALLOWED_CODE_POINT => char::REPLACEMENT_CHARACTER,
            Ok(n) => char::from_u32(n).unwrap_or(char::REPLACEMENT_CHARACTER),
            Err(_) => char::REPLACEMENT_CHARACTER,
        }
    }

    /// 4.3.11. [Consume an ident sequence](https://www.w3.org/TR/css-syntax-3/#consume-name)
    ///
    /// Caller should ensure that the stream starts with an ident sequence before calling this.
    fn consume_ident(&mut self) -> String {
        let mut value = String::new();

        loop {
            if self.is_start_of_escape(0) {
                value.push(self.consume_escaped_token());
                continue;
            }

            let c = self.current_char();
            match c {
                Ch(c) if self.is_ident_char(c) => {
                    value.push(c);
                    self.next_char();
                }
                _ => break,
            }
        }

        value
    }

    fn consume_digits(&mut self) -> String {
        let mut value = String::new();

        while self.current_char().is_numeric() {
            value.push(self.next_char().into());
        }

        value
    }

    fn consume_chars(&mut self, len: usize) -> String {
        let mut value = String::new();

        for _ in 0..len {
            if self.at_end() {
                break;
            }
            value.push(self.next_char().into());
        }

        value
    }

    fn consume_whitespace(&mut self) {
        while self.current_char().is_whitespace() {
            self.next_char();
        }
    }

    /// [ident-start code point](https://www.w3.org/TR/css-syntax-3/#ident-start-code-point)
    fn is_ident_start(&self, c: char) -> bool {
        c.is_ascii_alphabetic() || !c.is_ascii() || c == '_'
    }

    /// [ident code point](https://www.w3.org/TR/css-syntax-3/#ident-code-point)
    fn is_ident_char(&self, c: char) -> bool {
        self.is_ident_start(c) || c.is_ascii_digit() || c == '-'
    }

    /// def: [non-printable code point](https://www.w3.org/TR/css-syntax-3/#non-printable-code-point)
    fn is_non_printable_char(&self) -> bool {
        match self.current_char() {
            Ch(c) => {
                ('\u{0000}'..='\u{0008}').contains(&c)
                    || c == '\u{000B}'
                    || ('\u{000E}'..='\u{001F}').contains(&c)
                    || c == '\u{007F}'
            }
            _ => false,
        }
    }

    /// 4.3.8. [Check if two code points are a valid escape](https://www.w3.org/TR/css-syntax-3/#starts-with-a-valid-escape)
    fn is_start_of_escape(&self, start: usize) -> bool {
        let current_char = self.stream.look_ahead(start);
        let next_char = self.stream.look_ahead(start + 1);

        current_char == Ch('\\') && matches!(next_char, Ch(c) if c != '\n')
    }

    /// [4.3.9. Check if three code points would start an ident sequence](https://www.w3.org/TR/css-syntax-3/#check-if-three-code-points-would-start-an-ident-sequence)
    fn is_next_3_points_starts_ident_seq(&self, start: usize) -> bool {
        let first = self.stream.look_ahead(start);
        let second = self.stream.look_ahead(start + 1);

        match first {
            Ch('-') => match second {
                Ch('-') => true,
                Ch(c) if self.is_ident_start(c) => true,
                _ => self.is_start_of_escape(start + 1),
            },
            Ch('\\') => self.is_start_of_escape(start),
            Ch(c) => self.is_ident_start(c),
            _ => false,
        }
    }

    /// e.g. +1, -1, +.1, -0.01
    fn is_signed_decimal(&self, start: usize) -> bool {
        let current = self.stream.look_ahead(start);
        let next = self.stream.look_ahead(start + 1);
        let last = self.stream.look_ahead(start + 2);

        matches!(current, Ch('+' | '-'))
            && ((next == Ch('.') && last.is_numeric()) || next.is_numeric())
    }

    fn is_any_of(&self, chars: &[char]) -> bool {
        matches!(self.current_char(), Ch(c) if chars.contains(&c))
    }

    fn current_char(&self) -> Character {
        self.stream.look_ahead(0)
    }

    fn at_end(&self) -> bool {
        !matches!(self.current_char(), Ch(_))
    }

    fn next_char(&mut self) -> Character {
        let c = self.stream.read();
        if let Ch(ch) = c {
            self.cur_location.advance(ch);
            self.stream.next();
        }

        c
    }

    fn look_ahead_slice(&self, len: usize) -> String {
        let mut s = String::new();

        for i in 0..len {
            match self.stream.look_ahead(i) {
                Ch(c) => s.push(c),
                _ => break,
            }
        }

        s
    }
}
