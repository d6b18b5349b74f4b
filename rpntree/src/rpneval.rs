use crate::tree::Op;
use crate::visitor::TokenSink;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Clone, PartialEq, Debug)]
pub enum EvalErr {
    #[error("Failed to execute {0}")]
    StackUnderflow(Op),
    #[error("Unrecognised symbol {0}")]
    UnrecognizedToken(String),
    #[error("Nothing left on the stack")]
    EmptyStack,
}

// [-+]?[0-9]+ and nothing else. No fractional part,
// so `1.5` is not a literal this machine understands.
pub fn is_integer_literal(token: &str) -> bool {
    let digits = token.strip_prefix(&['+', '-'][..]).unwrap_or(token);
    !digits.is_empty() && digits.bytes().all(|c| c.is_ascii_digit())
}

/// Stack machine fed one RPN token at a time. The first bad token flips it
/// into a failed state for good; later tokens still run but no result is
/// handed out.
#[derive(Default, Debug)]
pub struct Executor {
    stack: Vec<f64>,
    diagnostics: Vec<EvalErr>,
}

impl Executor {
    pub fn new() -> Executor {
        Executor::default()
    }

    pub fn failed(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn stack(&self) -> &[f64] {
        &self.stack
    }

    pub fn diagnostics(&self) -> &[EvalErr] {
        &self.diagnostics
    }

    fn fail(&mut self, err: EvalErr) {
        debug!("{}", err);
        self.diagnostics.push(err);
    }

    fn apply(&mut self, op: Op) {
        let one = self.stack.pop();
        let two = self.stack.pop();
        match (two, one) {
            (Some(lhs), Some(rhs)) => self.stack.push(op.apply(lhs, rhs)),
            _ => self.fail(EvalErr::StackUnderflow(op)),
        }
    }

    pub fn result(mut self) -> Result<f64, EvalErr> {
        if let Some(err) = self.diagnostics.first() {
            return Err(err.clone());
        }
        self.stack.pop().ok_or(EvalErr::EmptyStack)
    }

    /// Runs a whole token stream through a fresh executor.
    pub fn run<'a>(tokens: impl IntoIterator<Item = &'a str>) -> Result<f64, EvalErr> {
        let mut executor = Executor::new();
        for token in tokens {
            executor.submit(token);
        }
        executor.result()
    }
}

impl TokenSink for Executor {
    fn submit(&mut self, token: &str) {
        let token = token.trim();
        if let Some(op) = Op::from_token(token) {
            self.apply(op);
        } else if is_integer_literal(token) {
            match f64::from_str(token) {
                Ok(num) => self.stack.push(num),
                Err(_) => self.fail(EvalErr::UnrecognizedToken(token.to_string())),
            }
        } else {
            self.fail(EvalErr::UnrecognizedToken(token.to_string()));
        }
        debug!("{:>12} | stack: {:?}", token, self.stack);
    }
}
