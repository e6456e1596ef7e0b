//! Structured WHERE predicates.
//!
//! A [`Condition`] is a list of column/operator/value terms joined by
//! `AND`. It renders to SQL with one `?` placeholder per term and hands
//! its values to the statement executor for positional binding, so no
//! caller-supplied value is ever interpolated into statement text.

use rusqlite::types::Value;

/// Comparison operator for a single condition term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Like,
}

impl CmpOp {
    fn as_sql(self) -> &'static str {
        match self {
            CmpOp::Eq => "=",
            CmpOp::Ne => "<>",
            CmpOp::Lt => "<",
            CmpOp::Le => "<=",
            CmpOp::Gt => ">",
            CmpOp::Ge => ">=",
            CmpOp::Like => "LIKE",
        }
    }
}

#[derive(Debug, Clone)]
struct Term {
    column: String,
    op: CmpOp,
    value: Value,
}

/// A WHERE predicate with at least one term.
///
/// # Examples
///
/// ```
/// use tablemap::{CmpOp, Condition};
///
/// let cond = Condition::eq("id", 1i64).and("score", CmpOp::Gt, 100i64);
/// assert_eq!(cond.to_sql(), "id = ? AND score > ?");
/// ```
#[derive(Debug, Clone)]
pub struct Condition {
    terms: Vec<Term>,
}

impl Condition {
    /// Creates a single-term condition.
    pub fn new(column: &str, op: CmpOp, value: impl Into<Value>) -> Self {
        Condition {
            terms: vec![Term {
                column: column.to_string(),
                op,
                value: value.into(),
            }],
        }
    }

    /// Shorthand for an equality condition.
    pub fn eq(column: &str, value: impl Into<Value>) -> Self {
        Condition::new(column, CmpOp::Eq, value)
    }

    /// Shorthand for addressing a row by its identifier column.
    pub fn by_id(id: i64) -> Self {
        Condition::eq(crate::fields::ID_COLUMN, id)
    }

    /// Appends another term, joined by `AND`.
    pub fn and(mut self, column: &str, op: CmpOp, value: impl Into<Value>) -> Self {
        self.terms.push(Term {
            column: column.to_string(),
            op,
            value: value.into(),
        });
        self
    }

    /// Renders the predicate as SQL text with one `?` per term.
    pub fn to_sql(&self) -> String {
        let rendered: Vec<String> = self
            .terms
            .iter()
            .map(|t| format!("{} {} ?", t.column, t.op.as_sql()))
            .collect();
        rendered.join(" AND ")
    }

    /// The term values, in the order their placeholders appear.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.terms.iter().map(|t| &t.value)
    }
}
