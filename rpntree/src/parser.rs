use crate::tree::{Op, Tree};
use thiserror::Error;

#[derive(Error, PartialEq, Debug)]
pub enum ParseError {
    #[error("Syntax Error: unbalanced parentheses in '{0}'")]
    UnbalancedParens(String),
}

// Stands in for anything nested inside parens. Must not be an operator.
const MASK: u8 = b'_';

// Drop one pair of wrapping parens, but only when the leading '(' is closed
// by the very last char. In `(1 + 2) * (3)` the first group closes early.
fn strip_outer(s: &str) -> &str {
    let bytes = s.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'(' || bytes[bytes.len() - 1] != b')' {
        return s;
    }
    let mut level = 0i64;
    for &c in &bytes[..bytes.len() - 1] {
        match c {
            b'(' => level += 1,
            b')' => level -= 1,
            _ => (),
        }
        if level == 0 {
            return s;
        }
    }
    &s[1..s.len() - 1]
}

// Same length copy of the input where everything at nesting level > 0,
// parens included, is hidden so that only top-level operators are visible.
fn mask(s: &str) -> Result<Vec<u8>, ParseError> {
    let mut level = 0i64;
    let mut masked = Vec::with_capacity(s.len());
    for &c in s.as_bytes() {
        if c == b'(' {
            level += 1;
        }
        masked.push(if level > 0 { MASK } else { c });
        if c == b')' {
            level -= 1;
        }
    }
    if level != 0 {
        return Err(ParseError::UnbalancedParens(s.to_string()));
    }
    Ok(masked)
}

// Top-level operator positions of one masked string, per split class.
// Cursors only move forward, so walking a long chain of operators visits
// every position once.
struct Splits {
    hits: [Vec<usize>; 5],
    cursors: [usize; 5],
}

impl Splits {
    fn new(s: &str) -> Result<Splits, ParseError> {
        let masked = mask(s)?;
        debug!("{:>40} => {}", s, String::from_utf8_lossy(&masked));
        let mut hits: [Vec<usize>; 5] = Default::default();
        for (class, op) in Op::SPLIT_ORDER.iter().enumerate() {
            let symbol = op.symbol() as u8;
            hits[class] = masked
                .iter()
                .enumerate()
                .filter(|&(_, &c)| c == symbol)
                .map(|(idx, _)| idx)
                .collect();
        }
        Ok(Splits { hits, cursors: [0; 5] })
    }

    // First split point of the operand starting at `lead`. An operator
    // right at `lead` has no left operand and is taken to be the sign of
    // a literal (eg: `-5`).
    fn next_after(&mut self, lead: usize) -> Option<(usize, Op)> {
        for (class, &op) in Op::SPLIT_ORDER.iter().enumerate() {
            let hits = &self.hits[class];
            let cursor = &mut self.cursors[class];
            while *cursor < hits.len() && hits[*cursor] <= lead {
                *cursor += 1;
            }
            if let Some(&idx) = hits.get(*cursor) {
                return Some((idx, op));
            }
        }
        None
    }
}

pub struct TreeParser;

impl TreeParser {
    // Splits are always leftmost, so chains like `1 + 1 + .. + 1` grow to the
    // right. That spine is walked in a loop; only left operands recurse.
    pub fn parse_str(expr: &str) -> Result<Tree, ParseError> {
        let mut s = strip_outer(expr.trim()).trim();
        let mut splits = Splits::new(s)?;
        let mut start = 0;
        let mut pending = Vec::new();
        let tail = loop {
            let rest = &s[start..];
            let lead = start + rest.len() - rest.trim_start().len();
            let (idx, op) = match splits.next_after(lead) {
                None => break Tree::leaf(rest),
                Some(split) => split,
            };
            pending.push((op, Self::parse_str(&s[start..idx])?));
            // A split seen below level zero leaves an unbalanced left operand
            // which already failed above, so the rest can keep this mask
            // unless its own outer parens come off.
            let rhs = s[idx + 1..].trim();
            let inner = strip_outer(rhs);
            if inner.len() < rhs.len() {
                s = inner.trim();
                splits = Splits::new(s)?;
                start = 0;
            } else {
                start = idx + 1;
            }
        };
        Ok(pending
            .into_iter()
            .rev()
            .fold(tail, |rhs, (op, lhs)| Tree::node(op, lhs, rhs)))
    }
}

#[cfg(test)]
mod tests {
    use super::{mask, strip_outer, Splits};
    use crate::tree::Op;

    #[test]
    fn strips_only_matching_outer_parens() {
        assert_eq!(strip_outer("(1 + 2)"), "1 + 2");
        assert_eq!(strip_outer("(1 + 2) * (3)"), "(1 + 2) * (3)");
        assert_eq!(strip_outer("((1 + 2) * 3)"), "(1 + 2) * 3");
        assert_eq!(strip_outer("((1))"), "(1)");
        assert_eq!(strip_outer("()"), "");
        assert_eq!(strip_outer("1 + 2"), "1 + 2");
    }

    #[test]
    fn masks_nested_content() {
        assert_eq!(mask("2 + (1 + 1)").unwrap(), b"2 + _______".to_vec());
        assert_eq!(mask("(1) * (2)").unwrap(), b"___ * ___".to_vec());
        assert_eq!(mask("1 + ((2))").unwrap(), b"1 + _____".to_vec());
        assert!(mask("(1 + 2").is_err());
        assert!(mask("1 + 2)").is_err());
    }

    fn first_split(s: &str) -> Option<(usize, crate::tree::Op)> {
        Splits::new(s).unwrap().next_after(0)
    }

    #[test]
    fn split_priority() {
        assert_eq!(first_split("1 - 2 + 3"), Some((6, Op::Add)));
        assert_eq!(first_split("1 / 2 * 3"), Some((6, Op::Mul)));
        assert_eq!(first_split("8 / 2 / 4"), Some((2, Op::Div)));
        assert_eq!(first_split("2 ^ 3 / 4"), Some((6, Op::Div)));
        assert_eq!(first_split("-5 - 3"), Some((3, Op::Sub)));
        assert_eq!(first_split("-5"), None);
        assert_eq!(first_split("(1 + 2)"), None);
    }

    #[test]
    fn split_cursors_walk_forward() {
        let mut splits = Splits::new("1 - 2 - 3 * 4").unwrap();
        assert_eq!(splits.next_after(0), Some((2, Op::Sub)));
        assert_eq!(splits.next_after(4), Some((6, Op::Sub)));
        assert_eq!(splits.next_after(8), Some((10, Op::Mul)));
        assert_eq!(splits.next_after(12), None);
    }
}
