//! Rating area identifiers

use serde::Serialize;
use std::fmt;

/// A rating area: a state plus the rate area number within that state.
///
/// This is the join key between the zip table and the plan catalog, so both
/// sides must build it with [`RateArea::new`]. Equality is field-wise, which
/// keeps e.g. `("KS", "12")` and `("KS1", "2")` distinct even though both
/// display as `KS12`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RateArea {
    pub state: String,
    pub code: String,
}

impl RateArea {
    pub fn new(state: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            code: code.into(),
        }
    }
}

impl fmt::Display for RateArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.state, self.code)
    }
}
