use csv::{ReaderBuilder, StringRecord, Trim};

use super::Row;
use crate::lib::errors::ReportError;

/// Parse comma-separated text into trimmed rows.
///
/// Quoted fields may contain commas and newlines. Records may differ in width.
/// Lines that contain nothing but whitespace are skipped; a line holding a
/// quoted empty field (`""`) still counts as a row.
pub fn parse_csv(content: &str) -> Result<Vec<Row>, ReportError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if is_blank_line(content, &record) {
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

/// Blankness is decided from the source text, since trimming erases the
/// difference between `   ` and `"   "`.
fn is_blank_line(content: &str, record: &StringRecord) -> bool {
    if record.len() != 1 || !record[0].is_empty() {
        return false;
    }
    let start = record
        .position()
        .and_then(|position| usize::try_from(position.byte()).ok())
        .unwrap_or(0);
    content
        .get(start..)
        .map(|rest| rest.trim_start_matches(['\u{feff}', '\r', '\n']))
        .and_then(|rest| rest.lines().next())
        .map_or(true, |line| line.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_are_trimmed() {
        let rows = parse_csv("a, b ,c\n").expect("valid csv");
        assert_eq!(rows, vec![vec!["a", "b", "c"]]);
    }

    #[test]
    fn one_row_per_non_empty_line() {
        let content = "date,visits\n2024-01-01, 10\n\n   \n2024-01-02,12\r\n";
        let rows = parse_csv(content).expect("valid csv");
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2], vec!["2024-01-02", "12"]);
    }

    #[test]
    fn quoted_fields_keep_embedded_commas_and_newlines() {
        let content = "name,notes\n\"Smith, J\",\"line one\nline two\"\n";
        let rows = parse_csv(content).expect("valid csv");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][0], "Smith, J");
        assert_eq!(rows[1][1], "line one\nline two");
    }

    #[test]
    fn ragged_records_are_accepted() {
        let rows = parse_csv("a,b,c\nd\n").expect("flexible csv");
        assert_eq!(rows[1], vec!["d"]);
    }

    #[test]
    fn quoted_empty_field_is_a_row() {
        let rows = parse_csv("a,b\n\"\"\nc,d\n").expect("valid csv");
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], vec![""]);

        let rows = parse_csv("x\n\n\"   \"\n").expect("valid csv");
        assert_eq!(rows, vec![vec!["x"], vec![""]]);
    }
}
