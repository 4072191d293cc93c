use std::fmt;

/// Classification outcome for a single candidate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Label {
    /// Not classified yet.
    #[default]
    Unset,
    /// Rejected candidate, stored as `0`.
    False,
    /// Accepted candidate, stored as `1`.
    True,
    /// Uncertain candidate, stored as `-1`.
    Maybe,
}

impl Label {
    /// Numeric code written to the history file. `Unset` has none.
    pub fn code(self) -> Option<i8> {
        match self {
            Label::Unset => None,
            Label::False => Some(0),
            Label::True => Some(1),
            Label::Maybe => Some(-1),
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Label::False),
            1 => Some(Label::True),
            -1 => Some(Label::Maybe),
            _ => None,
        }
    }

    /// Parse a history cell. Empty cells are `Some(Unset)`; anything that is not
    /// one of the known codes is `None` so the caller can decide how loud to be.
    pub fn parse_cell(cell: &str) -> Option<Self> {
        let cell = cell.trim();
        if cell.is_empty() {
            return Some(Label::Unset);
        }
        if let Ok(code) = cell.parse::<i64>() {
            return Label::from_code(code);
        }
        // spreadsheet tools write integer columns with gaps as floats
        match cell.parse::<f64>() {
            Ok(v) if v.is_finite() && v.fract() == 0.0 => Label::from_code(v as i64),
            _ => None,
        }
    }

    pub fn is_set(self) -> bool {
        self != Label::Unset
    }

    /// History cell text: the code, or empty for `Unset`.
    pub fn cell(self) -> String {
        self.code().map(|c| c.to_string()).unwrap_or_default()
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Unset => f.write_str("Unset"),
            Label::False => f.write_str("False"),
            Label::True => f.write_str("True"),
            Label::Maybe => f.write_str("Maybe"),
        }
    }
}
