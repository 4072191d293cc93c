//! Label history files.
//!
//! A history file is the output of a previous session, read back to resume:
//!
//! ```text
//! image,label
//! /data/cands/snr_12.1_rank_3.png,1
//! /data/cands/snr_9.4_rank_7.png,
//! ```
//!
//! Label cells hold `0`, `1`, `-1` or nothing. Anything else is read as
//! unlabeled and logged.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use crate::error::HistoryError;
use crate::label::Label;

const IMAGE_COLUMN: &str = "image";
const LABEL_COLUMN: &str = "label";

/// Labels recovered from a history file, keyed by item identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    entries: HashMap<String, Label>,
}

impl History {
    /// Label recorded for `item`, `Unset` when absent.
    pub fn get(&self, item: &str) -> Label {
        self.entries.get(item).copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Label)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl FromIterator<(String, Label)> for History {
    fn from_iter<I: IntoIterator<Item = (String, Label)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Read a history file. Later rows for the same image override earlier ones.
///
/// Only a missing file, a missing `image`/`label` header or an I/O error fail
/// the load. Short rows read as unlabeled, extra cells are ignored, rows
/// without an image are skipped, and non-UTF-8 cells are decoded lossily the
/// same way discovered paths are.
pub fn load_history(path: impl AsRef<Path>) -> Result<History, HistoryError> {
    let path = path.as_ref();
    tracing::info!("Loading history from {}", path.display());
    let file = File::open(path).map_err(|source| HistoryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(file);

    let headers = rdr.byte_headers()?.clone();
    let column_index = |column: &'static str| {
        headers
            .iter()
            .position(|h| String::from_utf8_lossy(h).trim() == column)
            .ok_or_else(|| HistoryError::MissingColumn {
                path: path.to_path_buf(),
                column,
            })
    };
    let image_idx = column_index(IMAGE_COLUMN)?;
    let label_idx = column_index(LABEL_COLUMN)?;

    let mut entries = HashMap::new();
    let mut record = csv::ByteRecord::new();
    while rdr.read_byte_record(&mut record)? {
        let line = record.position().map_or(0, |p| p.line());
        let image = match record.get(image_idx) {
            Some(cell) if !cell.is_empty() => String::from_utf8_lossy(cell).into_owned(),
            _ => {
                tracing::warn!("{}:{line}: row has no image, skipping", path.display());
                continue;
            }
        };
        let cell = record
            .get(label_idx)
            .map(String::from_utf8_lossy)
            .unwrap_or_default();
        let label = match Label::parse_cell(&cell) {
            Some(label) => label,
            None => {
                tracing::warn!(
                    "{}:{line}: unrecognised label `{cell}` for {image}, treating as unlabeled",
                    path.display(),
                );
                Label::Unset
            }
        };
        entries.insert(image, label);
    }

    Ok(History { entries })
}

/// Write `(image, label)` rows with an `image,label` header.
///
/// Rows are written in the order given; [`LabelingSession::export`] already
/// sorts them by identifier.
///
/// [`LabelingSession::export`]: crate::LabelingSession::export
pub fn write_history(rows: &[(String, Label)], path: impl AsRef<Path>) -> Result<(), HistoryError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| HistoryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut wtr = csv::Writer::from_writer(file);
    wtr.write_record([IMAGE_COLUMN, LABEL_COLUMN])?;
    for (image, label) in rows {
        wtr.write_record([image.as_str(), label.cell().as_str()])?;
    }
    wtr.flush().map_err(|source| HistoryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!("Wrote {} labels to {}", rows.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn write_history_writes_header_and_codes() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("out.csv");
        let rows = vec![
            ("a.png".to_string(), Label::False),
            ("b.png".to_string(), Label::Unset),
            ("c.png".to_string(), Label::True),
            ("d.png".to_string(), Label::Maybe),
        ];

        write_history(&rows, &path)?;

        let mut rdr = csv::Reader::from_path(&path)?;
        let headers = rdr.headers()?.clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), vec!["image", "label"]);

        let records: Vec<csv::StringRecord> = rdr.records().collect::<Result<_, _>>()?;
        let cells: Vec<(&str, &str)> = records.iter().map(|r| (&r[0], &r[1])).collect();
        assert_eq!(
            cells,
            vec![("a.png", "0"), ("b.png", ""), ("c.png", "1"), ("d.png", "-1")]
        );
        Ok(())
    }

    #[test]
    fn load_history_tolerates_blank_and_malformed_cells() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("history.csv");
        fs::write(
            &path,
            "image,label\na.png,0\nb.png,\nc.png,1.0\nd.png,maybe\ne.png,7\nf.png,-1\n",
        )?;

        let history = load_history(&path)?;
        assert_eq!(history.len(), 6);
        assert_eq!(history.get("a.png"), Label::False);
        assert_eq!(history.get("b.png"), Label::Unset);
        assert_eq!(history.get("c.png"), Label::True);
        assert_eq!(history.get("d.png"), Label::Unset);
        assert_eq!(history.get("e.png"), Label::Unset);
        assert_eq!(history.get("f.png"), Label::Maybe);
        assert_eq!(history.get("missing.png"), Label::Unset);
        Ok(())
    }

    #[test]
    fn load_history_accepts_reordered_columns() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("history.csv");
        fs::write(&path, "label,image\n1,b.png\n0,a.png\n")?;

        let history = load_history(&path)?;
        assert_eq!(history.get("a.png"), Label::False);
        assert_eq!(history.get("b.png"), Label::True);
        Ok(())
    }

    #[test]
    fn load_history_later_rows_win() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("history.csv");
        fs::write(&path, "image,label\na.png,0\na.png,1\n")?;

        assert_eq!(load_history(&path)?.get("a.png"), Label::True);
        Ok(())
    }

    #[test]
    fn load_history_requires_both_columns() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("history.csv");
        fs::write(&path, "file,label\na.png,0\n")?;

        let err = load_history(&path).unwrap_err();
        assert!(matches!(
            err,
            HistoryError::MissingColumn {
                column: "image",
                ..
            }
        ));
        Ok(())
    }

    #[test]
    fn load_history_reads_short_rows_as_unlabeled() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("history.csv");
        fs::write(&path, "image,label\na.png,1\nb.png\nc.png,0\n")?;

        let history = load_history(&path)?;
        assert_eq!(history.len(), 3);
        assert_eq!(history.get("a.png"), Label::True);
        assert_eq!(history.get("b.png"), Label::Unset);
        assert_eq!(history.get("c.png"), Label::False);
        Ok(())
    }

    #[test]
    fn load_history_ignores_extra_cells() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("history.csv");
        fs::write(&path, "image,label\na.png,1,extra\nb.png,-1\n")?;

        let history = load_history(&path)?;
        assert_eq!(history.get("a.png"), Label::True);
        assert_eq!(history.get("b.png"), Label::Maybe);
        Ok(())
    }

    #[test]
    fn load_history_decodes_non_utf8_images_lossily() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("history.csv");
        fs::write(&path, b"image,label\na\xff.png,1\nb.png,0\n")?;

        let history = load_history(&path)?;
        assert_eq!(history.get("a\u{FFFD}.png"), Label::True);
        assert_eq!(history.get("b.png"), Label::False);
        Ok(())
    }

    #[test]
    fn load_history_skips_rows_without_image() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("history.csv");
        fs::write(&path, "label,image\n1\n,\n0,a.png\n")?;

        let history = load_history(&path)?;
        assert_eq!(history.len(), 1);
        assert_eq!(history.get("a.png"), Label::False);
        Ok(())
    }

    #[test]
    fn load_history_keeps_spaces_in_image_names() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("history.csv");
        fs::write(&path, "image,label\n cand .png , 1 \n")?;

        let history = load_history(&path)?;
        assert_eq!(history.get(" cand .png "), Label::True);
        assert_eq!(history.get("cand .png"), Label::Unset);
        Ok(())
    }

    #[test]
    fn load_history_reports_missing_file() {
        let err = load_history("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, HistoryError::Io { .. }));
    }
}
