use super::Row;

/// Every key/value row has exactly two cells.
pub const KEY_VALUE_WIDTH: usize = 2;

/// Parse `key: value` lines into two-cell rows.
///
/// Each line is split on its first colon, so values may themselves contain
/// colons (timestamps, URLs). A line without a colon becomes `(line, "")`.
/// Blank lines and a leading byte-order mark are skipped.
pub fn parse_key_value(content: &str) -> Vec<Row> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| match line.split_once(':') {
            Some((key, value)) => vec![key.trim().to_string(), value.trim().to_string()],
            None => vec![line.to_string(), String::new()],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_first_colon_only() {
        let rows = parse_key_value("generated_at: 2024-02-01T10:15:00Z\nerrors : 3\n");
        assert_eq!(
            rows,
            vec![
                vec!["generated_at", "2024-02-01T10:15:00Z"],
                vec!["errors", "3"],
            ]
        );
    }

    #[test]
    fn line_without_colon_gets_empty_value() {
        let rows = parse_key_value("total: 42\nmalformed line\n");
        assert_eq!(rows[1], vec!["malformed line", ""]);
        assert!(rows.iter().all(|row| row.len() == KEY_VALUE_WIDTH));
    }

    #[test]
    fn crlf_and_blank_lines_are_tolerated() {
        let rows = parse_key_value("a: 1\r\n\r\nb: 2\r\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["a", "1"]);
    }

    #[test]
    fn leading_byte_order_mark_is_not_part_of_first_key() {
        let rows = parse_key_value("\u{feff}visits: 1\nerrors: 0\n");
        assert_eq!(rows[0], vec!["visits", "1"]);
    }
}
