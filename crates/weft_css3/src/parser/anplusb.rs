use crate::node::{Node, NodeType};
use crate::tokenizer::TokenType;
use crate::Css3;
use weft_shared::errors::{CssError, CssResult};

/// Parses the `an+b` notation of the `:nth-*()` pseudo-classes. Whitespace is allowed around the
/// sign of `b`, but not inside the `an` part.
pub(crate) fn parse_an_plus_b(input: &str) -> Option<(i32, i32)> {
    let input = input.trim().to_ascii_lowercase();

    match input.as_str() {
        "odd" => return Some((2, 1)),
        "even" => return Some((2, 0)),
        "from" => return Some((0, 1)),
        "to" => return Some((0, -1)),
        "" => return None,
        _ => {}
    }

    let Some(n_pos) = input.find('n') else {
        let b = parse_signed_integer(&input)?;
        return Some((0, b));
    };

    let a = match &input[..n_pos] {
        "" | "+" => 1,
        "-" => -1,
        a => parse_signed_integer(a)?,
    };

    let rest = input[n_pos + 1..].trim_start();
    if rest.is_empty() {
        return Some((a, 0));
    }

    let (sign, digits) = match rest.as_bytes()[0] {
        b'+' => (1, rest[1..].trim_start()),
        b'-' => (-1, rest[1..].trim_start()),
        _ => return None,
    };
    if digits.is_empty() || !digits.bytes().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let b = digits.parse::<i32>().ok()?;
    Some((a, sign * b))
}

fn parse_signed_integer(input: &str) -> Option<i32> {
    let digits = input.strip_prefix(['+', '-']).unwrap_or(input);
    if digits.is_empty() || !digits.bytes().all(|c| c.is_ascii_digit()) {
        return None;
    }

    input.parse::<i32>().ok()
}

impl Css3<'_> {
    /// Parses the argument of an `:nth-*()` pseudo-class. The formula is taken from the raw
    /// source, as the tokenizer splits it in ways that are hard to reassemble (`2n-1` is a single
    /// dimension token).
    pub fn parse_nth(&mut self) -> CssResult<Node> {
        log::trace!("parse_nth");

        let loc = self.tokenizer.next_location();
        let start = self.tokenizer.tell();

        loop {
            let t = self.tokenizer.lookahead(0);
            match t.token_type {
                TokenType::RParen
                | TokenType::Eof
                | TokenType::LCurly
                | TokenType::RCurly
                | TokenType::Semicolon => break,
                _ => {
                    self.tokenizer.consume();
                }
            }
        }

        let end = self.tokenizer.tell();
        let formula = self.tokenizer.slice(start, end);

        let Some((a, b)) = parse_an_plus_b(&formula) else {
            return Err(CssError::with_location(
                &format!("Invalid nth formula '{}'", formula.trim()),
                loc,
            ));
        };

        let nth = Node::new(NodeType::AnPlusB { a, b }, loc);
        Ok(Node::new(NodeType::Nth { nth }, loc))
    }
}

#[cfg(test)]
mod tests {
    use super::parse_an_plus_b;
    use test_case::test_case;

    #[test_case("odd", Some((2, 1)))]
    #[test_case("EVEN", Some((2, 0)))]
    #[test_case("from", Some((0, 1)))]
    #[test_case("to", Some((0, -1)))]
    #[test_case("2n+1", Some((2, 1)))]
    #[test_case(" 2n + 1 ", Some((2, 1)))]
    #[test_case("-n+3", Some((-1, 3)))]
    #[test_case("+n", Some((1, 0)))]
    #[test_case("n- 2", Some((1, -2)))]
    #[test_case("3", Some((0, 3)))]
    #[test_case("-4", Some((0, -4)))]
    #[test_case("10n-10", Some((10, -10)))]
    #[test_case("2 n", None)]
    #[test_case("2n+", None)]
    #[test_case("2n 1", None)]
    #[test_case("n+-1", None)]
    #[test_case("x", None)]
    #[test_case("", None)]
    fn an_plus_b(input: &str, expected: Option<(i32, i32)>) {
        assert_eq!(parse_an_plus_b(input), expected);
    }
}
