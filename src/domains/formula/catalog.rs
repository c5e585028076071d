//! Names formulas may use besides the variable itself.

/// Named constants accepted in formula text.
pub const CONSTANTS: [&str; 2] = ["pi", "e"];

/// Supported single-argument functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Exp,
    Log,
    Sqrt,
    Abs,
}

impl Function {
    /// Every supported function, in documentation order.
    pub const ALL: [Function; 13] = [
        Self::Sin,
        Self::Cos,
        Self::Tan,
        Self::Asin,
        Self::Acos,
        Self::Atan,
        Self::Sinh,
        Self::Cosh,
        Self::Tanh,
        Self::Exp,
        Self::Log,
        Self::Sqrt,
        Self::Abs,
    ];

    /// Look up a function by the name written in a formula. `ln` is an alias
    /// of `log`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ln" => Some(Self::Log),
            _ => Self::ALL.into_iter().find(|f| f.name() == name),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Sinh => "sinh",
            Self::Cosh => "cosh",
            Self::Tanh => "tanh",
            Self::Exp => "exp",
            Self::Log => "log",
            Self::Sqrt => "sqrt",
            Self::Abs => "abs",
        }
    }

    /// The name the symbolic engine knows this function by.
    pub fn engine_name(self) -> &'static str {
        match self {
            Self::Log => "ln",
            other => other.name(),
        }
    }

    /// Family name used when listing supported functions.
    pub fn family(self) -> &'static str {
        match self {
            Self::Sin | Self::Cos | Self::Tan => "Trigonometric",
            Self::Asin | Self::Acos | Self::Atan => "Inverse Trigonometric",
            Self::Sinh | Self::Cosh | Self::Tanh => "Hyperbolic",
            Self::Exp | Self::Log => "Exponential",
            Self::Sqrt | Self::Abs => "Other",
        }
    }
}

/// True for function and constant names.
pub fn is_reserved(name: &str) -> bool {
    CONSTANTS.contains(&name) || Function::from_name(name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_and_aliases() {
        assert_eq!(Function::from_name("ln"), Some(Function::Log));
        assert_eq!(Function::from_name("cosh"), Some(Function::Cosh));
        assert_eq!(Function::from_name("cot"), None);
        assert_eq!(Function::Log.engine_name(), "ln");
        assert!(is_reserved("pi"));
        assert!(!is_reserved("x"));
    }
}
