//! Plain data record buffered by the aggregator.

use std::fmt::Write;

/// One row of a log stream: a timestamp, a label (patch id or compartment),
/// and the numeric fields.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub time:   f64,
    pub label:  String,
    pub values: Vec<f64>,
}

impl LogRecord {
    pub fn new(time: f64, label: impl Into<String>, values: Vec<f64>) -> Self {
        Self { time, label: label.into(), values }
    }

    /// Columns this record occupies.
    pub fn width(&self) -> usize {
        2 + self.values.len()
    }

    /// Field strings in column order.  Whole numbers print without a
    /// fractional part.
    pub fn fields(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.width());
        out.push(format_number(self.time));
        out.push(self.label.clone());
        out.extend(self.values.iter().map(|v| format_number(*v)));
        out
    }
}

fn format_number(v: f64) -> String {
    let mut s = String::new();
    // Writing into a String cannot fail.
    let _ = write!(s, "{v}");
    s
}
