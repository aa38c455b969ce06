//! Filter builder: optional `(column, operator, value)` conditions folded into
//! a `WHERE` predicate plus the positional parameters it references.

use sea_orm::Value;

use super::domain::SubscriptionFilter;

/// Base predicate every query starts from.
pub const ALWAYS_TRUE: &str = "1=1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// `column = $n`
    Eq,
    /// Inclusive lower bound on the column's UTC year-month.
    MonthFrom,
    /// Inclusive upper bound on the column's UTC year-month.
    MonthTo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Condition<'a> {
    pub column: &'static str,
    pub op: Op,
    pub value: Option<&'a str>,
}

impl<'a> Condition<'a> {
    pub fn new(column: &'static str, op: Op, value: Option<&'a str>) -> Self {
        Self { column, op, value }
    }

    fn present_value(&self) -> Option<&'a str> {
        self.value.filter(|v| !v.is_empty())
    }

    fn render(&self, placeholder: usize) -> String {
        match self.op {
            Op::Eq => format!("{} = ${placeholder}", self.column),
            Op::MonthFrom => format!("to_char({} AT TIME ZONE 'UTC', 'YYYY-MM') >= ${placeholder}", self.column),
            Op::MonthTo => format!("to_char({} AT TIME ZONE 'UTC', 'YYYY-MM') <= ${placeholder}", self.column),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub sql: String,
    pub values: Vec<Value>,
}

/// Conjunction of the present conditions, placeholders numbered from `$1`.
pub fn build<'a, I>(conditions: I) -> Predicate
where
    I: IntoIterator<Item = Condition<'a>>,
{
    conditions
        .into_iter()
        .filter_map(|c| c.present_value().map(|v| (c, v)))
        .fold(
            Predicate { sql: ALWAYS_TRUE.to_string(), values: Vec::new() },
            |mut acc, (cond, value)| {
                acc.values.push(Value::from(value));
                acc.sql.push_str(" AND ");
                acc.sql.push_str(&cond.render(acc.values.len()));
                acc
            },
        )
}

impl SubscriptionFilter {
    /// Equality filters used by the list endpoint.
    pub fn equality_conditions(&self) -> Vec<Condition<'_>> {
        vec![
            Condition::new("user_id", Op::Eq, self.user_id.as_deref()),
            Condition::new("service_name", Op::Eq, self.service_name.as_deref()),
        ]
    }

    /// Equality filters plus the `start`/`end` month range, used by the summary.
    pub fn summary_conditions(&self) -> Vec<Condition<'_>> {
        let mut conds = self.equality_conditions();
        conds.push(Condition::new("start_date", Op::MonthFrom, self.start.as_deref()));
        conds.push(Condition::new("start_date", Op::MonthTo, self.end.as_deref()));
        conds
    }

    pub fn list_predicate(&self) -> Predicate {
        build(self.equality_conditions())
    }

    pub fn summary_predicate(&self) -> Predicate {
        build(self.summary_conditions())
    }
}
