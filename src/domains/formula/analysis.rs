//! Formula analysis: domain, range, derivative and critical points.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::compiled::RealFunction;
use super::error::AnalysisError;
use super::sets::RealSet;
use super::{Formula, VARIABLE, domain, range, solve};

/// How much of a formula to analyze.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisDepth {
    /// Domain only.
    #[default]
    Basic,
    /// Domain and range.
    Detailed,
    /// Derivative and critical points.
    CriticalPoints,
}

impl AnalysisDepth {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Detailed => "detailed",
            Self::CriticalPoints => "critical_points",
        }
    }
}

impl fmt::Display for AnalysisDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One labelled line of an analysis report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportField {
    pub label: &'static str,
    pub value: String,
}

impl ReportField {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

/// The structured result of [`analyze`].
///
/// Fields appear in computation order. `Display` renders the text shown to
/// clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub formula: String,
    pub depth: AnalysisDepth,
    pub fields: Vec<ReportField>,
}

impl AnalysisReport {
    /// Look up a field value by label.
    pub fn field(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.value.as_str())
    }
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Analysis for '{}' ('{}' type):", self.formula, self.depth)?;
        for field in &self.fields {
            write!(f, "\n- {}: {}", field.label, field.value)?;
        }
        Ok(())
    }
}

/// Analyze `text` at the requested depth.
///
/// | depth           | fields                        |
/// |-----------------|-------------------------------|
/// | basic           | Domain                        |
/// | detailed        | Domain, Range                 |
/// | critical_points | Derivative, Critical Points   |
///
/// The critical-point search runs over the whole real line and does not
/// report a domain.
pub fn analyze(text: &str, depth: AnalysisDepth) -> Result<AnalysisReport, AnalysisError> {
    let formula = Formula::parse(text)?;
    let function = formula.function()?;

    let mut fields = Vec::new();
    match depth {
        AnalysisDepth::Basic | AnalysisDepth::Detailed => {
            let domain = domain(&function);
            fields.push(ReportField::new("Domain", domain.to_string()));
            if depth == AnalysisDepth::Detailed {
                let derivative = derivative_of(&formula)?;
                let range = range(&function, &derivative, &domain);
                fields.push(ReportField::new("Range", range.to_string()));
            }
        }
        AnalysisDepth::CriticalPoints => {
            let derivative = derivative_of(&formula)?;
            fields.push(ReportField::new("Derivative", derivative.text()));
            let points = solve(&derivative, &RealSet::reals());
            fields.push(ReportField::new("Critical Points", points.describe(VARIABLE)));
        }
    }

    Ok(AnalysisReport {
        formula: text.to_string(),
        depth,
        fields,
    })
}

fn derivative_of(formula: &Formula) -> Result<RealFunction, AnalysisError> {
    let expr = formula.derivative()?;
    Ok(RealFunction::compile(&expr, expr.to_string())?)
}

/// The single-line text reported when analysis fails.
pub fn failure_message(text: &str, depth: AnalysisDepth, error: &AnalysisError) -> String {
    format!(
        "Error analyzing formula '{}' ('{}' analysis). Details: {}",
        text, depth, error
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_has_domain_only() {
        let report = analyze("x^2", AnalysisDepth::Basic).unwrap();
        assert_eq!(report.field("Domain"), Some("ℝ"));
        assert_eq!(report.field("Range"), None);
        assert_eq!(report.to_string(), "Analysis for 'x^2' ('basic' type):\n- Domain: ℝ");
    }

    #[test]
    fn test_detailed_adds_range() {
        let report = analyze("x^2", AnalysisDepth::Detailed).unwrap();
        let labels: Vec<_> = report.fields.iter().map(|f| f.label).collect();
        assert_eq!(labels, vec!["Domain", "Range"]);
        assert_eq!(report.field("Range"), Some("[0, ∞)"));
    }

    #[test]
    fn test_critical_points() {
        let report = analyze("x^2", AnalysisDepth::CriticalPoints).unwrap();
        assert_eq!(report.field("Derivative"), Some("2*x"));
        assert_eq!(report.field("Critical Points"), Some("x = 0"));
        assert_eq!(report.field("Domain"), None);

        let report = analyze("exp(x)", AnalysisDepth::CriticalPoints).unwrap();
        assert_eq!(report.field("Critical Points"), Some("None found."));

        let report = analyze("tanh(x)", AnalysisDepth::CriticalPoints).unwrap();
        assert_eq!(report.field("Critical Points"), Some("None found."));
    }

    #[test]
    fn test_detailed_handles_overflow() {
        let report = analyze("cosh(x)", AnalysisDepth::Detailed).unwrap();
        assert_eq!(report.field("Domain"), Some("ℝ"));
        assert_eq!(report.field("Range"), Some("[1, ∞)"));

        let report = analyze("x^1e308", AnalysisDepth::Basic).unwrap();
        assert_eq!(report.field("Domain"), Some("ℝ"));
    }

    #[test]
    fn test_errors_are_reported() {
        let err = analyze("x +", AnalysisDepth::Basic).unwrap_err();
        let message = failure_message("x +", AnalysisDepth::Basic, &err);
        assert!(message.starts_with("Error analyzing formula 'x +' ('basic' analysis). Details:"));
        assert!(!message.contains('\n'));

        let err = analyze("x*y", AnalysisDepth::Basic).unwrap_err();
        assert!(err.to_string().contains("'y'"));
    }

    #[test]
    fn test_depth_deserializes_from_snake_case() {
        let depth: AnalysisDepth = serde_json::from_str("\"critical_points\"").unwrap();
        assert_eq!(depth, AnalysisDepth::CriticalPoints);
        assert_eq!(AnalysisDepth::default(), AnalysisDepth::Basic);
    }
}
