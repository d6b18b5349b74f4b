use crate::render_rpn;
use std::fmt;

pub const CASES: &[(&str, &str)] = &[
    ("1 + 1", "1 1 +"),
    ("2 + (1 + 1)", "2 1 1 + +"),
    ("2 + (3 - 1)", "2 3 1 - +"),
    ("10000 / 10000", "10000 10000 /"),
    ("1 + (2 * 3) / 3", "1 2 3 * 3 / +"),
    ("2 ^ 2", "2 2 ^"),
    (
        "( 0 - 6 + ( 6 ^ 2 - 4 * 1 * 5 ) ^ (1 / 2) ) / ( 2 * 1)",
        "0 6 - 6 2 ^ 4 1 5 * * - 1 2 / ^ + 2 1 * /",
    ),
];

const PAD: usize = 60;

#[derive(PartialEq, Debug)]
pub enum UnitOutcome {
    Passed,
    // parse failed, nothing to compare
    Failed,
    Mismatch(String),
}

#[derive(Debug)]
pub struct UnitReport<'a> {
    pub input: &'a str,
    pub outcome: UnitOutcome,
}

impl<'a> UnitReport<'a> {
    pub fn passed(&self) -> bool {
        self.outcome == UnitOutcome::Passed
    }
}

impl<'a> fmt::Display for UnitReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:<width$}: ", self.input, width = PAD)?;
        match &self.outcome {
            UnitOutcome::Passed => write!(f, "PASSED"),
            UnitOutcome::Failed => write!(f, "FAILED"),
            UnitOutcome::Mismatch(actual) => write!(f, "FAILED, {}", actual),
        }
    }
}

pub fn unit<'a>(input: &'a str, expected: &str) -> UnitReport<'a> {
    let outcome = match render_rpn(input) {
        Err(_) => UnitOutcome::Failed,
        Ok(ref rpn) if rpn == expected => UnitOutcome::Passed,
        Ok(rpn) => UnitOutcome::Mismatch(rpn),
    };
    UnitReport { input, outcome }
}

pub fn run_all() -> Vec<UnitReport<'static>> {
    CASES.iter().map(|&(input, expected)| unit(input, expected)).collect()
}

#[cfg(test)]
mod tests {
    use super::{run_all, unit, UnitOutcome};

    #[test]
    fn builtin_cases_pass() {
        for report in run_all() {
            assert!(report.passed(), "{}", report);
        }
    }

    #[test]
    fn report_lines() {
        let report = unit("1 + 1", "1 1 +");
        assert_eq!(report.to_string(), format!("{:<60}: PASSED", "1 + 1"));

        let report = unit("1 - 1", "1 1 +");
        assert_eq!(report.outcome, UnitOutcome::Mismatch("1 1 -".to_string()));
        assert!(report.to_string().ends_with(": FAILED, 1 1 -"));

        let report = unit("(1 - 1", "1 1 -");
        assert_eq!(report.outcome, UnitOutcome::Failed);
        assert!(report.to_string().ends_with(": FAILED"));
    }
}
