use unicode_width::UnicodeWidthStr;

const COLUMN_GAP: usize = 2;

/// Lays out rows as left-aligned columns sized by display width.
pub(crate) fn format_rows(rows: &[Vec<String>]) -> Vec<String> {
	let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
	let widths: Vec<usize> = (0..columns)
		.map(|column| rows.iter().filter_map(|row| row.get(column)).map(|cell| cell.width()).max().unwrap_or(0))
		.collect();

	rows.iter()
		.map(|row| {
			let mut line = String::new();
			for (column, cell) in row.iter().enumerate() {
				line.push_str(cell);
				if column + 1 < row.len() {
					line.extend(std::iter::repeat_n(' ', widths[column] - cell.width() + COLUMN_GAP));
				}
			}
			line.trim_end().to_string()
		})
		.collect()
}

pub(crate) fn print_rows(rows: &[Vec<String>]) {
	for line in format_rows(rows) {
		println!("{line}");
	}
}
