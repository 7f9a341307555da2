use colored::Colorize;
use serde::Serialize;
use tsexpect_solver::PropMap;

use crate::config::OutputFormat;
use crate::driver::{AssertionOutcome, CheckReport, Explanation};

pub struct Reporter {
    color: bool,
    format: OutputFormat,
}

impl Reporter {
    pub fn new(format: OutputFormat, color: bool) -> Self {
        Reporter { color, format }
    }

    pub fn render_check(&self, report: &CheckReport) -> serde_json::Result<String> {
        if self.format == OutputFormat::Json {
            return to_json(report);
        }
        let mut out = String::new();
        for outcome in &report.outcomes {
            out.push_str(&self.format_outcome(outcome));
        }
        if !report.outcomes.is_empty() {
            out.push('\n');
        }
        out.push_str(&self.format_summary(report));
        out.push('\n');
        Ok(out)
    }

    fn format_outcome(&self, outcome: &AssertionOutcome) -> String {
        let label = outcome.label();
        if outcome.passed {
            return format!("{} {label}\n", self.paint_pass("✓"));
        }

        let mut out = format!("{} {}\n", self.paint_fail("✗"), self.bold(&label));
        if let Some(message) = &outcome.message {
            out.push_str(&format!("    {message}\n"));
        }
        if let Some(mismatch) = &outcome.mismatch {
            for (path, expected, actual) in mismatch.differences() {
                let at = if path.is_empty() { "<root>" } else { path.as_str() };
                out.push_str(&format!(
                    "      at {}: expected {}, actual {}\n",
                    self.paint_key(at),
                    self.paint_pass(expected),
                    self.paint_fail(actual)
                ));
            }
        }
        out
    }

    fn format_summary(&self, report: &CheckReport) -> String {
        let mut summary = format!("{} passed", report.passed);
        if report.failed > 0 {
            summary.push_str(&format!(", {}", self.paint_fail(&format!("{} failed", report.failed))));
        }
        if report.skipped > 0 {
            summary.push_str(&format!(", {} skipped", report.skipped));
        }
        summary
    }

    pub fn render_props(&self, props: &PropMap) -> serde_json::Result<String> {
        if self.format == OutputFormat::Json {
            return to_json(props);
        }
        let mut out = String::new();
        for (key, labels) in props.iter() {
            let key = if key.is_empty() { "<root>" } else { key };
            out.push_str(&format!("{}: {labels}\n", self.paint_key(key)));
        }
        Ok(out)
    }

    pub fn render_explain(&self, explanation: &Explanation) -> serde_json::Result<String> {
        if self.format == OutputFormat::Json {
            return to_json(explanation);
        }
        let verdict = |holds: bool| {
            if holds {
                self.paint_pass("yes")
            } else {
                self.paint_fail("no")
            }
        };
        let mut out = format!(
            "actual:    {}\nexpected:  {}\nextends:   {}\nidentical: {}\n",
            explanation.actual,
            explanation.expected,
            verdict(explanation.extends),
            verdict(explanation.identical)
        );
        if !explanation.mismatch.is_same() {
            out.push_str(&format!("diff:      {}\n", explanation.mismatch));
        }
        Ok(out)
    }

    fn paint_pass(&self, text: &str) -> String {
        if self.color {
            text.green().to_string()
        } else {
            text.to_string()
        }
    }

    fn paint_fail(&self, text: &str) -> String {
        if self.color {
            text.red().to_string()
        } else {
            text.to_string()
        }
    }

    fn paint_key(&self, text: &str) -> String {
        if self.color {
            text.cyan().to_string()
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    Ok(text)
}

#[cfg(test)]
#[path = "tests/reporter_tests.rs"]
mod tests;
