//! A1 notation helpers.

/// Spreadsheet column letters for a 1-based column index (`1 -> A`, `27 -> AA`).
pub fn column_letters(mut column: usize) -> String {
    let mut letters = Vec::new();
    while column > 0 {
        let rem = (column - 1) % 26;
        letters.push(b'A' + rem as u8);
        column = (column - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// Quote a tab title for use in A1 notation.
pub fn quote_title(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

/// Range covering `rows` x `columns` starting at `A1` of `title`.
///
/// An empty table still targets `A1` so the write call stays well-formed.
pub fn table_range(title: &str, rows: usize, columns: usize) -> String {
    let quoted = quote_title(title);
    if rows == 0 || columns == 0 {
        return format!("{quoted}!A1");
    }
    format!("{quoted}!A1:{}{rows}", column_letters(columns))
}
