use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use datefmt_cli::rows::{InferRow, ParseRow, ShapeRow};
use datefmt_core::{Dialect, Grammar, ZoneSuffixKind};

pub fn print_infer_table(rows: &[InferRow], dialects: &[Dialect]) {
    let mut header = vec![header_cell("Input")];
    header.extend(dialects.iter().map(|dialect| match dialect {
        Dialect::Legacy => header_cell("Legacy"),
        Dialect::Modern => header_cell("Modern"),
    }));
    header.push(header_cell("Zone"));
    let mut table = Table::new();
    table.set_header(header);
    apply_table_style(&mut table);

    for row in rows {
        let mut cells = vec![Cell::new(&row.input)];
        for dialect in dialects {
            let pattern = match dialect {
                Dialect::Legacy => row.legacy.as_ref(),
                Dialect::Modern => row.modern.as_ref(),
            };
            cells.push(pattern_cell(pattern.and_then(Option::as_deref)));
        }
        cells.push(match (&row.rejection, row.zone) {
            (Some(reason), _) => Cell::new(reason).fg(Color::Red),
            (None, Some(ZoneSuffixKind::None) | None) => dim_cell("-"),
            (None, Some(kind)) => Cell::new(kind.name()),
        });
        table.add_row(cells);
    }
    println!("{table}");
    let matched = rows.iter().filter(|row| row.is_match()).count();
    println!("{matched} of {} values matched", rows.len());
}

pub fn print_parse_table(pattern: &str, rows: &[ParseRow]) {
    println!("Pattern: {pattern}");
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Input"),
        header_cell("Value"),
        header_cell("Zone"),
        header_cell("Offset"),
        header_cell("Error"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);

    for row in rows {
        let fields = row.fields.as_ref();
        let zone = fields.and_then(|fields| fields.zone.as_deref());
        let offset = fields.and_then(|fields| fields.offset_seconds);
        table.add_row(vec![
            Cell::new(&row.input),
            match &row.value {
                Some(value) => Cell::new(value).fg(Color::Green),
                None => dim_cell("-"),
            },
            zone.map_or_else(|| dim_cell("-"), Cell::new),
            offset.map_or_else(|| dim_cell("-"), |seconds| Cell::new(format_offset(seconds))),
            match &row.error {
                Some(error) => Cell::new(error).fg(Color::Red),
                None => dim_cell("-"),
            },
        ]);
    }
    println!("{table}");
}

pub fn print_shapes_table(rows: &[ShapeRow]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Grammar"),
        header_cell("Sample"),
        header_cell("Legacy"),
        header_cell("Modern"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for row in rows {
        let grammar = match row.grammar {
            Grammar::Punctuated => "punctuated",
            Grammar::Concatenated => "concatenated",
        };
        table.add_row(vec![
            Cell::new(row.index),
            dim_cell(grammar),
            Cell::new(&row.sample),
            Cell::new(&row.legacy),
            Cell::new(&row.modern),
        ]);
    }
    println!("{table}");
}

/// `+05:30`, with seconds only when present.
pub fn format_offset(seconds: i32) -> String {
    let sign = if seconds < 0 { '-' } else { '+' };
    let total = seconds.unsigned_abs();
    let (hours, minutes, secs) = (total / 3600, total / 60 % 60, total % 60);
    if secs == 0 {
        format!("{sign}{hours:02}:{minutes:02}")
    } else {
        format!("{sign}{hours:02}:{minutes:02}:{secs:02}")
    }
}

fn pattern_cell(pattern: Option<&str>) -> Cell {
    match pattern {
        Some(pattern) => Cell::new(pattern).fg(Color::Green),
        None => dim_cell("-"),
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_render_like_iso() {
        assert_eq!(format_offset(0), "+00:00");
        assert_eq!(format_offset(19_800), "+05:30");
        assert_eq!(format_offset(-(5 * 3600 + 30 * 60 + 15)), "-05:30:15");
    }
}
