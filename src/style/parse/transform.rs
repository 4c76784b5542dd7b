//! `transform` value parsing.
//!
//! A transform list such as `rotate(45deg) scale(1.2, 0.8)` becomes an
//! ordered list of primitive operations. Consumers apply them in order.

use super::values::{Value, convert, parse_number};

/// A single primitive transform operation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "operation", content = "value", rename_all = "camelCase")
)]
pub enum TransformOp {
    /// Angle kept with its unit, e.g. `"45deg"`.
    Rotate(String),
    Scale(f64),
    ScaleX(f64),
    ScaleY(f64),
    TranslateX(Value),
    TranslateY(Value),
    SkewX(String),
    SkewY(String),
    /// Row-major `[a, b, c, d, tx, ty]`.
    Matrix([f64; 6]),
}

/// Parse a transform list.
///
/// Unknown functions and functions with unusable arguments are skipped
/// without affecting the rest of the list. Returns `None` only when no
/// operation at all was produced.
pub fn parse_transform(raw: &str) -> Option<Vec<TransformOp>> {
    let mut ops = Vec::new();

    for (name, args) in FunctionCalls::new(raw) {
        let args: Vec<&str> = args
            .split(',')
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .collect();

        match (name.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("rotate", [angle]) => ops.push(TransformOp::Rotate((*angle).to_string())),
            ("scale", [s]) => {
                if let Some(s) = parse_number(s) {
                    ops.push(TransformOp::Scale(s));
                }
            }
            ("scale", [x, y]) => {
                if let (Some(x), Some(y)) = (parse_number(x), parse_number(y)) {
                    ops.push(TransformOp::ScaleX(x));
                    ops.push(TransformOp::ScaleY(y));
                }
            }
            ("scalex", [x]) => ops.extend(parse_number(x).map(TransformOp::ScaleX)),
            ("scaley", [y]) => ops.extend(parse_number(y).map(TransformOp::ScaleY)),
            ("translate", [x]) => ops.push(TransformOp::TranslateX(convert(x))),
            ("translate", [x, y]) => {
                ops.push(TransformOp::TranslateX(convert(x)));
                ops.push(TransformOp::TranslateY(convert(y)));
            }
            ("translatex", [x]) => ops.push(TransformOp::TranslateX(convert(x))),
            ("translatey", [y]) => ops.push(TransformOp::TranslateY(convert(y))),
            ("skew", [x]) => ops.push(TransformOp::SkewX((*x).to_string())),
            ("skew", [x, y]) => {
                ops.push(TransformOp::SkewX((*x).to_string()));
                ops.push(TransformOp::SkewY((*y).to_string()));
            }
            ("skewx", [x]) => ops.push(TransformOp::SkewX((*x).to_string())),
            ("skewy", [y]) => ops.push(TransformOp::SkewY((*y).to_string())),
            ("matrix", values) if values.len() == 6 => {
                let mut matrix = [0.0; 6];
                for (slot, v) in matrix.iter_mut().zip(values) {
                    *slot = parse_number(v).unwrap_or(0.0);
                }
                ops.push(TransformOp::Matrix(matrix));
            }
            (other, _) => {
                log::trace!("skipping transform function {other}({})", args.join(","));
            }
        }
    }

    if ops.is_empty() { None } else { Some(ops) }
}

/// Iterator over `name(args)` calls in a transform list.
struct FunctionCalls<'a> {
    rest: &'a str,
}

impl<'a> FunctionCalls<'a> {
    fn new(input: &'a str) -> Self {
        Self { rest: input }
    }
}

impl<'a> Iterator for FunctionCalls<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let open = self.rest.find('(')?;
            let close = open + self.rest[open..].find(')')?;

            // The name is the identifier run right before the parenthesis
            let head = &self.rest[..open];
            let name_start = head
                .rfind(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
                .map_or(0, |i| i + 1);
            let name = &head[name_start..];
            let args = &self.rest[open + 1..close];
            self.rest = &self.rest[close + 1..];

            if !name.is_empty() {
                return Some((name, args));
            }
        }
    }
}
