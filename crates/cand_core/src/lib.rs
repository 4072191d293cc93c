//! Bookkeeping for three-way candidate classification: the labeling session,
//! its history files and candidate discovery.

pub mod action;
pub mod discovery;
pub mod error;
pub mod history;
pub mod label;
pub mod session;

pub use action::{Action, Outcome};
pub use discovery::{DEFAULT_PATTERN, DiscoveryOptions, SortKey, discover};
pub use error::{DiscoveryError, HistoryError, SessionError};
pub use history::{History, load_history, write_history};
pub use label::Label;
pub use session::{Boundary, Direction, LabelCounts, LabelingSession, Status};
