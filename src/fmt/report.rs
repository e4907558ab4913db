use crate::batch::{Outcome, PairReport};
use crate::unify::{Substitution, UnifyError};

const INDENT: &str = "  ";

/// Render one unification result.
///
/// ```text
/// {y -> Apple, x -> Riya}
/// {} (empty substitution)
/// FAIL (no unifier)
/// ABORT (gave up after 10 unification steps)
/// ```
///
/// Bound terms are shown fully resolved.
pub fn format_result(result: &Result<Substitution, UnifyError>) -> String {
    match result {
        Ok(subst) if subst.is_empty() => "{} (empty substitution)".to_string(),
        Ok(subst) => subst.resolved().to_string(),
        Err(err) if err.is_no_unifier() => "FAIL (no unifier)".to_string(),
        Err(err) => format!("ABORT ({})", err),
    }
}

pub fn format_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Unified(result) => format_result(result),
        Outcome::Malformed(err) => format!("ERROR ({})", err),
    }
}

/// `left  =?=  right` followed by the indented result line.
pub fn format_pair(report: &PairReport) -> String {
    format!(
        "{}  =?=  {}\n{}=> {}",
        report.left,
        report.right,
        INDENT,
        format_outcome(&report.outcome)
    )
}

struct Formatter {
    buffer: String,
}

impl Formatter {
    fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    fn write_str(&mut self, s: &str) {
        self.buffer.push_str(s);
    }

    fn write_newline(&mut self) {
        self.buffer.push('\n');
    }

    fn finish(self) -> String {
        self.buffer
    }
}

/// Render a whole batch with a closing summary line.
pub fn format_report(title: &str, reports: &[PairReport]) -> String {
    let mut fmt = Formatter::new();

    fmt.write_str(title);
    fmt.write_newline();
    fmt.write_newline();

    for report in reports {
        fmt.write_str(&format_pair(report));
        fmt.write_newline();
        fmt.write_newline();
    }

    let unified = reports.iter().filter(|r| r.is_unified()).count();
    let malformed = reports
        .iter()
        .filter(|r| matches!(r.outcome, Outcome::Malformed(_)))
        .count();
    fmt.write_str(&format!(
        "{} pairs: {} unified, {} failed, {} malformed",
        reports.len(),
        unified,
        reports.len() - unified - malformed,
        malformed
    ));
    fmt.write_newline();

    fmt.finish()
}
