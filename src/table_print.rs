use crate::export::{format_inversion, format_optional, format_real};
use crate::pipeline::ScanTable;
use crate::record::Record;

const COLUMNS: [&str; 10] = [
    "n", "class", "I", "lane", "depth", "SIS", "K", "zone", "guard", "dom",
];

fn cells(r: &Record) -> Vec<String> {
    vec![
        r.n.to_string(),
        r.class.to_string(),
        format_inversion(&r.inversion),
        format_real(r.lane),
        format_real(r.depth),
        r.band.map(|b| b.to_string()).unwrap_or_else(|| "·".to_string()),
        r.curvature.map(format_real).unwrap_or_else(|| "·".to_string()),
        r.zone.to_string(),
        if r.guard { "1" } else { "0" }.to_string(),
        r.dominators.map(|d| d.to_string()).unwrap_or_else(|| "·".to_string()),
    ]
}

/// Box-drawn table of `records`, one row per record, columns sized to fit.
pub fn render_records(records: &[Record]) -> String {
    let rows: Vec<Vec<String>> = records.iter().map(cells).collect();

    // widest cell per column, header included
    let widths: Vec<usize> = COLUMNS
        .iter()
        .enumerate()
        .map(|(col, title)| {
            rows.iter()
                .map(|row| row[col].chars().count())
                .chain(std::iter::once(title.len()))
                .max()
                .unwrap_or(1)
        })
        .collect();

    let mut out = String::new();
    let header: Vec<String> = COLUMNS.iter().map(|c| c.to_string()).collect();
    push_row(&mut out, &header, &widths);
    push_separator(&mut out, &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, row: &[String], widths: &[usize]) {
    out.push_str("  ");
    for (col, (cell, &width)) in row.iter().zip(widths).enumerate() {
        let pad = width - cell.chars().count();
        out.push_str(cell);
        out.push_str(&" ".repeat(pad));
        if col < widths.len() - 1 {
            out.push_str(" │ ");
        }
    }
    out.push('\n');
}

fn push_separator(out: &mut String, widths: &[usize]) {
    out.push_str("  ");
    for (col, &width) in widths.iter().enumerate() {
        out.push_str(&"─".repeat(width));
        if col < widths.len() - 1 {
            out.push_str("─┼─");
        }
    }
    out.push('\n');
}

/// Print records `from..=to` of a table (clipped to what the table holds).
pub fn print_window(table: &ScanTable, from: u64, to: u64) {
    // records start at n = 2, stored at index n - 2
    let lo = from.max(2);
    let hi = to.min(table.config().n_max);
    if lo > hi {
        println!("  (no records in {}..={})", from, to);
        return;
    }
    let start = (lo - 2) as usize;
    let end = (hi - 2) as usize;
    print!("{}", render_records(&table.records()[start..=end]));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScanConfig;
    use crate::pipeline::run_scan;

    #[test]
    fn test_render_has_header_separator_and_rows() {
        let table = run_scan(&ScanConfig::with_n_max(12)).unwrap();
        let text = render_records(table.records());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2 + 11);
        assert!(lines[0].trim_start().starts_with("n "));
        assert!(lines[1].contains("─┼─"));
        assert!(lines[2].contains("INFINITE_ZONE"));
        assert!(lines[6].contains("THICK"));
    }

    #[test]
    fn test_columns_are_aligned() {
        let table = run_scan(&ScanConfig::with_n_max(40)).unwrap();
        let text = render_records(&table.records()[10..20]);
        let positions: Vec<Vec<usize>> = text
            .lines()
            .map(|line| {
                line.chars()
                    .enumerate()
                    .filter(|&(_, c)| c == '│' || c == '┼')
                    .map(|(i, _)| i)
                    .collect()
            })
            .collect();
        assert!(positions.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_empty_slice_renders_header_only() {
        let text = render_records(&[]);
        assert_eq!(text.lines().count(), 2);
    }
}
