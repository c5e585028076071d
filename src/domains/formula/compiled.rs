//! Compiled single-variable functions for numeric work.

use std::fmt;
use std::sync::Arc;

use symb_anafis::{CompiledEvaluator, Expr, symb};

use super::VARIABLE;
use super::error::FormulaError;
use super::text::free_names;

/// A real function of [`VARIABLE`] compiled to bytecode.
///
/// Evaluation follows IEEE semantics: points outside the real domain give
/// NaN, poles and overflow give ±∞ and underflow gives 0. Cloning shares the
/// compiled program.
#[derive(Clone)]
pub struct RealFunction {
    evaluator: Arc<CompiledEvaluator>,
    text: String,
    constant: bool,
}

impl RealFunction {
    /// Compile `expr`, shown as `text` in reports.
    pub fn compile(expr: &Expr, text: impl Into<String>) -> Result<Self, FormulaError> {
        let x = symb(VARIABLE);
        let evaluator = CompiledEvaluator::compile(expr, &[&x], None)
            .map_err(|e| FormulaError::Evaluation(e.to_string()))?;
        Ok(Self {
            evaluator: Arc::new(evaluator),
            text: text.into(),
            constant: !free_names(&expr.to_string()).contains(VARIABLE),
        })
    }

    pub fn eval(&self, x: f64) -> f64 {
        self.evaluator.evaluate(&[x])
    }

    /// Evaluate, mapping non-finite results to `None`.
    pub fn eval_finite(&self, x: f64) -> Option<f64> {
        let v = self.eval(x);
        v.is_finite().then_some(v)
    }

    /// True when the expression does not mention the variable.
    pub fn is_constant(&self) -> bool {
        self.constant
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Debug for RealFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RealFunction")
            .field("text", &self.text)
            .field("constant", &self.constant)
            .finish()
    }
}

impl fmt::Display for RealFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl PartialEq for RealFunction {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}
