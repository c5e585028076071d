//! Formula engine.
//!
//! Parsing, differentiation and evaluation go through `symb_anafis`. The real
//! domain, range and root finding built on top of the compiled evaluator live
//! here.
//!
//! ```text
//! Formula::parse(text)        -> Formula | FormulaError
//! formula.derivative()        -> Expr
//! formula.function()          -> RealFunction
//! domain(f)                   -> RealSet
//! range(f, f', set)           -> RealSet
//! solve(f, set)               -> SolutionSet
//! ```

pub mod analysis;
pub mod catalog;
pub mod compiled;
pub mod error;
pub mod numeric;
pub mod sets;
pub mod solver;
pub mod text;

use std::collections::HashSet;

use symb_anafis::{Diff, Expr, symb};

pub use analysis::{AnalysisDepth, AnalysisReport, ReportField, analyze};
pub use catalog::Function;
pub use compiled::RealFunction;
pub use error::{AnalysisError, FormulaError};
pub use sets::{RealSet, SolutionSet};
pub use solver::{domain, range, solve};

/// The only free variable allowed in plotted or analyzed formulas.
pub const VARIABLE: &str = "x";

/// A parsed formula: the expression text and the engine's tree.
#[derive(Debug, Clone)]
pub struct Formula {
    body: String,
    expr: Expr,
}

impl Formula {
    /// Parse formula text. A leading `y =` is accepted and ignored.
    pub fn parse(text: &str) -> Result<Self, FormulaError> {
        let body = text::strip_assignment(text);
        if body.is_empty() {
            return Err(FormulaError::parse("empty formula"));
        }
        let expr = symb_anafis::parse(&text::normalize(body), &HashSet::new(), &HashSet::new(), None)
            .map_err(FormulaError::parse)?;
        Ok(Self {
            body: body.to_string(),
            expr,
        })
    }

    /// The expression part of the text, without any `y =`.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Ensure [`VARIABLE`] is the only free symbol.
    pub fn require_univariate(&self) -> Result<(), FormulaError> {
        match text::free_names(&self.body).into_iter().find(|s| s != VARIABLE) {
            Some(other) => Err(FormulaError::unsupported_variable(other, VARIABLE)),
            None => Ok(()),
        }
    }

    /// Compile for numeric evaluation.
    pub fn function(&self) -> Result<RealFunction, FormulaError> {
        self.require_univariate()?;
        RealFunction::compile(&self.expr, self.body.as_str())
    }

    /// d/dx of the formula, simplified without changing its domain.
    pub fn derivative(&self) -> Result<Expr, FormulaError> {
        let x = symb(VARIABLE);
        Diff::new()
            .domain_safe(true)
            .differentiate(&self.expr, &x)
            .map_err(|e| FormulaError::Derivative(e.to_string()))
    }
}
