use crate::cssom::stylesheet::RuleId;
use crate::cssom::{serialize_identifier, serialize_number, serialize_string};
use itertools::Itertools;
use std::fmt::{Display, Formatter};

/// Unit of a numeric value. Unitless numbers are `Number`, percentages are not scaled numbers
/// but carry their own unit.
#[derive(Debug, Clone, PartialEq)]
pub enum Unit {
    Number,
    Percentage,
    // absolute lengths
    Px,
    Cm,
    Mm,
    Q,
    In,
    Pt,
    Pc,
    // font relative lengths
    Em,
    Rem,
    Ex,
    Ch,
    Cap,
    Ic,
    Lh,
    Rlh,
    // viewport relative lengths
    Vw,
    Vh,
    Vmin,
    Vmax,
    Vi,
    Vb,
    // angles
    Deg,
    Rad,
    Grad,
    Turn,
    // time
    Ms,
    S,
    // frequency
    Hz,
    KHz,
    // resolution
    Dpi,
    Dpcm,
    Dppx,
    X,
    // flexible lengths
    Fr,
    /// Any unit that is not known. The name is kept as written.
    Dimension(String),
}

impl Unit {
    /// Returns the unit for the given (case-insensitive) unit name
    pub fn from_name(name: &str) -> Unit {
        match name.to_ascii_lowercase().as_str() {
            "px" => Unit::Px,
            "cm" => Unit::Cm,
            "mm" => Unit::Mm,
            "q" => Unit::Q,
            "in" => Unit::In,
            "pt" => Unit::Pt,
            "pc" => Unit::Pc,
            "em" => Unit::Em,
            "rem" => Unit::Rem,
            "ex" => Unit::Ex,
            "ch" => Unit::Ch,
            "cap" => Unit::Cap,
            "ic" => Unit::Ic,
            "lh" => Unit::Lh,
            "rlh" => Unit::Rlh,
            "vw" => Unit::Vw,
            "vh" => Unit::Vh,
            "vmin" => Unit::Vmin,
            "vmax" => Unit::Vmax,
            "vi" => Unit::Vi,
            "vb" => Unit::Vb,
            "deg" => Unit::Deg,
            "rad" => Unit::Rad,
            "grad" => Unit::Grad,
            "turn" => Unit::Turn,
            "ms" => Unit::Ms,
            "s" => Unit::S,
            "hz" => Unit::Hz,
            "khz" => Unit::KHz,
            "dpi" => Unit::Dpi,
            "dpcm" => Unit::Dpcm,
            "dppx" => Unit::Dppx,
            "x" => Unit::X,
            "fr" => Unit::Fr,
            _ => Unit::Dimension(name.to_string()),
        }
    }

    /// Returns true when the unit is one of the known units
    pub fn is_known(&self) -> bool {
        !matches!(self, Unit::Dimension(_))
    }

    /// Returns the canonical name of the unit as written after the number
    pub fn name(&self) -> &str {
        match self {
            Unit::Number => "",
            Unit::Percentage => "%",
            Unit::Px => "px",
            Unit::Cm => "cm",
            Unit::Mm => "mm",
            Unit::Q => "q",
            Unit::In => "in",
            Unit::Pt => "pt",
            Unit::Pc => "pc",
            Unit::Em => "em",
            Unit::Rem => "rem",
            Unit::Ex => "ex",
            Unit::Ch => "ch",
            Unit::Cap => "cap",
            Unit::Ic => "ic",
            Unit::Lh => "lh",
            Unit::Rlh => "rlh",
            Unit::Vw => "vw",
            Unit::Vh => "vh",
            Unit::Vmin => "vmin",
            Unit::Vmax => "vmax",
            Unit::Vi => "vi",
            Unit::Vb => "vb",
            Unit::Deg => "deg",
            Unit::Rad => "rad",
            Unit::Grad => "grad",
            Unit::Turn => "turn",
            Unit::Ms => "ms",
            Unit::S => "s",
            Unit::Hz => "hz",
            Unit::KHz => "khz",
            Unit::Dpi => "dpi",
            Unit::Dpcm => "dpcm",
            Unit::Dppx => "dppx",
            Unit::X => "x",
            Unit::Fr => "fr",
            Unit::Dimension(name) => name.as_str(),
        }
    }
}

/// A single component value
#[derive(Debug, Clone, PartialEq)]
pub enum CssValue {
    Numeric {
        value: f32,
        unit: Unit,
    },
    String(String),
    Ident(String),
    Uri(String),
    /// Hex colour without the leading `#`
    HexColor(String),
    Function {
        name: String,
        args: ValueList,
    },
    /// `var(--name, fallback)`
    Variable {
        name: String,
        fallback: Option<ValueList>,
    },
    /// `calc()`, `min()` and `max()`. The expression is kept as a tree and evaluated during
    /// style resolution. A parenthesized sub expression has an empty name.
    Calc {
        name: String,
        expr: ValueList,
    },
    /// Inline operator marker (`/`, `,` and the calc operators `+ - * /`)
    Operator(char),
}

impl CssValue {
    pub fn number(value: f32) -> Self {
        CssValue::Numeric {
            value,
            unit: Unit::Number,
        }
    }

    pub fn percentage(value: f32) -> Self {
        CssValue::Numeric {
            value,
            unit: Unit::Percentage,
        }
    }

    pub fn dimension(value: f32, unit: &str) -> Self {
        CssValue::Numeric {
            value,
            unit: Unit::from_name(unit),
        }
    }

    pub fn is_operator(&self) -> bool {
        matches!(self, CssValue::Operator(_))
    }

    /// Returns the serialized form of the value
    pub fn css_text(&self) -> String {
        match self {
            CssValue::Numeric { value, unit } => {
                format!("{}{}", serialize_number(*value), unit.name())
            }
            CssValue::String(s) => serialize_string(s),
            CssValue::Ident(s) => serialize_identifier(s),
            CssValue::Uri(s) => format!("url({})", serialize_string(s)),
            CssValue::HexColor(s) => format!("#{s}"),
            CssValue::Function { name, args } => format!("{name}({})", args.css_text()),
            CssValue::Variable { name, fallback } => match fallback {
                Some(fallback) => format!("var({name}, {})", fallback.css_text()),
                None => format!("var({name})"),
            },
            CssValue::Calc { name, expr } => format!("{name}({})", expr.css_text()),
            CssValue::Operator(c) => c.to_string(),
        }
    }
}

impl Display for CssValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.css_text())
    }
}

/// Ordered list of values. Operators are kept inline between the values they separate.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValueList(pub Vec<CssValue>);

impl ValueList {
    pub fn new(values: Vec<CssValue>) -> Self {
        Self(values)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CssValue> {
        self.0.iter()
    }

    pub fn css_text(&self) -> String {
        let mut out = String::new();

        for (idx, value) in self.0.iter().enumerate() {
            match value {
                CssValue::Operator(',') => out.push(','),
                CssValue::Operator(op) => {
                    if idx > 0 {
                        out.push(' ');
                    }
                    out.push(*op);
                }
                v => {
                    if idx > 0 {
                        out.push(' ');
                    }
                    out.push_str(&v.css_text());
                }
            }
        }

        out
    }
}

/// A single `property: value` pair
#[derive(Debug, Clone, PartialEq)]
pub struct CssDeclaration {
    pub property: String,
    pub value: ValueList,
    pub important: bool,
}

impl CssDeclaration {
    pub fn css_text(&self) -> String {
        let important = if self.important { " !important" } else { "" };
        format!("{}: {}{}", self.property, self.value.css_text(), important)
    }
}

/// A list of declarations. The owner is the rule that holds this block once it is stored in a
/// stylesheet.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CssDeclarationBlock {
    pub declarations: Vec<CssDeclaration>,
    pub owner: Option<RuleId>,
}

impl CssDeclarationBlock {
    pub fn new(declarations: Vec<CssDeclaration>) -> Self {
        Self {
            declarations,
            owner: None,
        }
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Returns the last declaration for the given property, as that is the one that wins
    pub fn get(&self, property: &str) -> Option<&CssDeclaration> {
        self.declarations
            .iter()
            .rev()
            .find(|d| d.property == property)
    }

    pub fn css_text(&self) -> String {
        self.declarations
            .iter()
            .map(|d| format!("{};", d.css_text()))
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("px", Unit::Px)]
    #[test_case("PX", Unit::Px)]
    #[test_case("kHz", Unit::KHz)]
    #[test_case("dppx", Unit::Dppx)]
    #[test_case("fr", Unit::Fr)]
    #[test_case("furlong", Unit::Dimension("furlong".into()))]
    fn unit_names(name: &str, expected: Unit) {
        assert_eq!(Unit::from_name(name), expected);
    }

    #[test]
    fn value_list_text() {
        let list = ValueList::new(vec![
            CssValue::dimension(12.0, "px"),
            CssValue::Operator('/'),
            CssValue::number(1.5),
            CssValue::Ident("Arial".into()),
            CssValue::Operator(','),
            CssValue::Ident("sans-serif".into()),
        ]);
        assert_eq!(list.css_text(), "12px / 1.5 Arial, sans-serif");

        let calc = CssValue::Calc {
            name: "calc".into(),
            expr: ValueList::new(vec![
                CssValue::percentage(100.0),
                CssValue::Operator('-'),
                CssValue::Calc {
                    name: String::new(),
                    expr: ValueList::new(vec![
                        CssValue::dimension(2.0, "em"),
                        CssValue::Operator('*'),
                        CssValue::number(3.0),
                    ]),
                },
            ]),
        };
        assert_eq!(calc.css_text(), "calc(100% - (2em * 3))");
    }

    #[test]
    fn declaration_block() {
        let block = CssDeclarationBlock::new(vec![
            CssDeclaration {
                property: "color".into(),
                value: ValueList::new(vec![CssValue::Ident("red".into())]),
                important: false,
            },
            CssDeclaration {
                property: "color".into(),
                value: ValueList::new(vec![CssValue::HexColor("00f".into())]),
                important: true,
            },
        ]);

        assert_eq!(block.len(), 2);
        assert!(block.get("color").is_some_and(|d| d.important));
        assert_eq!(block.css_text(), "color: red; color: #00f !important;");
    }
}
