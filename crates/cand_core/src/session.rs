//! Labeling session: the ordered candidates, their labels and the cursor.
//!
//! The session never renders anything. A presenter calls one operation per
//! user input and re-renders from [`LabelingSession::status`] afterwards.
//! Navigation that cannot proceed returns a [`Boundary`] and leaves the
//! session untouched.

use std::collections::HashSet;
use std::fmt;

use crate::error::SessionError;
use crate::history::History;
use crate::label::Label;

/// Direction of an unlabeled-item search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Backward,
    Forward,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Backward => f.write_str("previous"),
            Direction::Forward => f.write_str("next"),
        }
    }
}

/// A navigation request that could not move the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Boundary {
    #[error("Reached the first image")]
    AtStart,
    #[error("Reached the last image")]
    AtEnd,
    #[error("No more {0} unlabeled image")]
    NoMoreUnlabeled(Direction),
}

/// Per-label totals over the whole session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LabelCounts {
    pub false_count: usize,
    pub true_count: usize,
    pub maybe_count: usize,
    pub unset_count: usize,
}

impl LabelCounts {
    fn tally(labels: &[Label]) -> Self {
        let mut counts = Self::default();
        for label in labels {
            match label {
                Label::False => counts.false_count += 1,
                Label::True => counts.true_count += 1,
                Label::Maybe => counts.maybe_count += 1,
                Label::Unset => counts.unset_count += 1,
            }
        }
        counts
    }

    pub fn labeled(&self) -> usize {
        self.false_count + self.true_count + self.maybe_count
    }
}

/// Read-only snapshot for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status<'a> {
    /// 1-based position of the cursor.
    pub position: usize,
    pub total: usize,
    pub item: &'a str,
    pub label: Label,
    pub counts: LabelCounts,
}

impl Status<'_> {
    /// Position zero-padded to the number of digits in `total`.
    pub fn padded_position(&self) -> String {
        let width = digits(self.total);
        format!("{:0width$}", self.position)
    }
}

impl fmt::Display for Status<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}/{}) {}", self.padded_position(), self.total, self.item)
    }
}

fn digits(n: usize) -> usize {
    n.checked_ilog10().map_or(1, |d| d as usize + 1)
}

#[derive(Debug, Clone)]
pub struct LabelingSession {
    items: Vec<String>,
    labels: Vec<Label>,
    cursor: usize,
}

impl LabelingSession {
    /// Build a session over `items`, seeding labels from `history` when given.
    ///
    /// The cursor starts on the first unlabeled item, or on the last item when
    /// the history already covers everything.
    pub fn new(items: Vec<String>, history: Option<&History>) -> Result<Self, SessionError> {
        if items.is_empty() {
            return Err(SessionError::EmptyInput);
        }

        let labels: Vec<Label> = match history {
            Some(history) => items.iter().map(|item| history.get(item)).collect(),
            None => vec![Label::Unset; items.len()],
        };

        if let Some(history) = history {
            let applied = labels.iter().filter(|l| l.is_set()).count();
            let known: HashSet<&str> = items.iter().map(String::as_str).collect();
            let unknown = history.iter().filter(|(item, _)| !known.contains(item)).count();
            tracing::info!("Applied {applied} labels from history");
            if unknown > 0 {
                tracing::debug!("Ignored {unknown} history rows for images not in this session");
            }
        }

        let cursor = labels
            .iter()
            .position(|l| !l.is_set())
            .unwrap_or(items.len() - 1);

        Ok(Self {
            items,
            labels,
            cursor,
        })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false; a session holds at least one item.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current_item(&self) -> &str {
        &self.items[self.cursor]
    }

    pub fn label_at(&self, index: usize) -> Option<Label> {
        self.labels.get(index).copied()
    }

    /// Overwrite the label at `index`, returning the previous one.
    ///
    /// An out-of-range index changes nothing and returns `None`.
    pub fn label(&mut self, index: usize, label: Label) -> Option<Label> {
        let slot = self.labels.get_mut(index)?;
        Some(std::mem::replace(slot, label))
    }

    /// Label the current item, then move to the next one.
    ///
    /// On the last item the label still applies and `AtEnd` is reported.
    pub fn label_and_advance(&mut self, label: Label) -> Result<(), Boundary> {
        self.label(self.cursor, label);
        self.advance()
    }

    pub fn advance(&mut self) -> Result<(), Boundary> {
        if self.cursor + 1 >= self.items.len() {
            return Err(Boundary::AtEnd);
        }
        self.cursor += 1;
        Ok(())
    }

    pub fn retreat(&mut self) -> Result<(), Boundary> {
        if self.cursor == 0 {
            return Err(Boundary::AtStart);
        }
        self.cursor -= 1;
        Ok(())
    }

    /// Jump to the nearest unlabeled item after the cursor.
    pub fn seek_next_unlabeled(&mut self) -> Result<(), Boundary> {
        if self.cursor + 1 >= self.items.len() {
            return Err(Boundary::AtEnd);
        }
        let found = (self.cursor + 1..self.items.len()).find(|&i| !self.labels[i].is_set());
        match found {
            Some(index) => {
                self.cursor = index;
                Ok(())
            }
            None => Err(Boundary::NoMoreUnlabeled(Direction::Forward)),
        }
    }

    /// Jump to the nearest unlabeled item before the cursor, index 0 included.
    pub fn seek_prev_unlabeled(&mut self) -> Result<(), Boundary> {
        if self.cursor == 0 {
            return Err(Boundary::AtStart);
        }
        let found = (0..self.cursor).rev().find(|&i| !self.labels[i].is_set());
        match found {
            Some(index) => {
                self.cursor = index;
                Ok(())
            }
            None => Err(Boundary::NoMoreUnlabeled(Direction::Backward)),
        }
    }

    pub fn status(&self) -> Status<'_> {
        Status {
            position: self.cursor + 1,
            total: self.items.len(),
            item: &self.items[self.cursor],
            label: self.labels[self.cursor],
            counts: LabelCounts::tally(&self.labels),
        }
    }

    /// All `(item, label)` pairs sorted by identifier, independent of the
    /// navigation order.
    pub fn export(&self) -> Vec<(String, Label)> {
        let mut rows: Vec<(String, Label)> = self
            .items
            .iter()
            .cloned()
            .zip(self.labels.iter().copied())
            .collect();
        rows.sort_by(|a, b| a.0.cmp(&b.0));
        rows
    }
}
