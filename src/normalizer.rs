use nom::{
    Parser,
    character::complete::multispace0,
    error::context,
    number::complete::double,
    sequence::preceded,
};
use crate::parser::tokens::ParseRes;

/// A leading floating point numeral, after optional whitespace. Anything after the
/// numeral is ignored.
fn leading_float<'a>(input: &'a str)
-> ParseRes<'a, f64> {
    context("leading float", preceded(multispace0, double))
        .parse(input)
}

/// Rewrite one line of program output. Integral values lose their decimals,
/// other numbers keep six of them, anything unparseable is echoed as is.
pub fn normalize_line(line: &str) -> String {
    match leading_float(line) {
        Ok((_, value)) if value.is_finite() => {
            if value.trunc() == value {
                // `-0.0` would otherwise print as "-0"
                let value = if value == 0.0 { 0.0 } else { value };
                format!("{:.0}", value)
            } else {
                format!("{:.6}", value)
            }
        },
        _ => line.to_string(),
    }
}

/// Normalize captured stdout line by line, preserving order.
pub fn normalize(output: &str) -> String {
    output.lines()
        .map(|line| {
            let mut out = normalize_line(line);
            out.push('\n');
            out
        })
        .collect()
}
