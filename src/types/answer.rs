use std::fmt;

/// A respondent's answer to a single question, or the expected value of a
/// condition.
///
/// Answers coming from different question types arrive in different shapes
/// (free text, numeric inputs, toggles, multi-select lists). Comparisons
/// deliberately go through the loose coercions below, [`Answer::coerce_str`]
/// and [`Answer::coerce_number`], so that `5` and `"5"` compare equal no
/// matter which question type produced them.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Answer {
    /// A boolean, e.g. from a yes/no toggle.
    Bool(bool),
    /// A 64-bit signed integer.
    Int(i64),
    /// A 64-bit floating-point number.
    Float(f64),
    /// Free text or a single selected option.
    Text(String),
    /// The selected options of a multi-select question.
    List(Vec<Answer>),
}

impl Answer {
    /// Loose string form used by `equals` / `not_equals`.
    ///
    /// Lists join their items with `,`; whole floats render without a
    /// fractional part, so `Float(5.0)` and `Int(5)` both become `"5"`.
    #[must_use]
    pub fn coerce_str(&self) -> String {
        match self {
            Answer::Bool(v) => v.to_string(),
            Answer::Int(v) => v.to_string(),
            // -0.0 would otherwise render as "-0"
            Answer::Float(v) if *v == 0.0 => "0".to_owned(),
            Answer::Float(v) => v.to_string(),
            Answer::Text(v) => v.clone(),
            Answer::List(items) => items
                .iter()
                .map(Answer::coerce_str)
                .collect::<Vec<_>>()
                .join(","),
        }
    }

    /// Numeric form used by `greater_than` / `less_than`.
    ///
    /// Returns `None` unless the answer is a finite number or text that parses
    /// (after trimming) to a finite number. Booleans and lists never coerce.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn coerce_number(&self) -> Option<f64> {
        let n = match self {
            Answer::Int(v) => *v as f64,
            Answer::Float(v) => *v,
            Answer::Text(v) => v.trim().parse::<f64>().ok()?,
            Answer::Bool(_) | Answer::List(_) => return None,
        };
        n.is_finite().then_some(n)
    }
}

impl From<i64> for Answer {
    fn from(v: i64) -> Self {
        Answer::Int(v)
    }
}

impl From<i32> for Answer {
    fn from(v: i32) -> Self {
        Answer::Int(i64::from(v))
    }
}

impl From<f64> for Answer {
    fn from(v: f64) -> Self {
        Answer::Float(v)
    }
}

impl From<bool> for Answer {
    fn from(v: bool) -> Self {
        Answer::Bool(v)
    }
}

impl From<&str> for Answer {
    fn from(v: &str) -> Self {
        Answer::Text(v.to_owned())
    }
}

impl From<String> for Answer {
    fn from(v: String) -> Self {
        Answer::Text(v)
    }
}

impl<T: Into<Answer>> From<Vec<T>> for Answer {
    fn from(v: Vec<T>) -> Self {
        Answer::List(v.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Bool(v) => write!(f, "{v}"),
            Answer::Int(v) => write!(f, "{v}"),
            Answer::Float(v) => write!(f, "{v}"),
            Answer::Text(v) => write!(f, "\"{v}\""),
            Answer::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}
