#![deny(warnings)]

macro_rules! debug {
    ($($args:tt)*) => (if cfg!(feature="debug") { eprintln!($($args)*); })
}

mod tree;
pub use crate::tree::{Op, Tree};

mod parser;
pub use crate::parser::{ParseError, TreeParser};

mod visitor;
pub use crate::visitor::{traverse, RpnPrinter, TokenSink};

mod rpneval;
pub use crate::rpneval::{is_integer_literal, EvalErr, Executor};

pub mod selftest;

#[derive(thiserror::Error, PartialEq, Debug)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalErr),
}

pub type Result<T> = std::result::Result<T, Error>;

pub fn render_rpn(input: &str) -> std::result::Result<String, ParseError> {
    let tree = TreeParser::parse_str(input)?;
    Ok(traverse(&tree, None))
}

/// Parses `input` and runs it, returning the RPN rendering along with the
/// executor so callers can inspect every diagnostic it raised.
pub fn execute(input: &str) -> std::result::Result<(String, Executor), ParseError> {
    let tree = TreeParser::parse_str(input)?;
    let mut executor = Executor::new();
    let rpn = traverse(&tree, Some(&mut executor));
    Ok((rpn, executor))
}

pub fn evaluate(input: &str) -> Result<f64> {
    let (_, executor) = execute(input)?;
    Ok(executor.result()?)
}
