//! Terminal tables for validation reports and the field type list.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use rts_model::{BatchReport, FieldTypeCode, Status, UploadReport};

pub fn print_report(report: &UploadReport) {
    println!("{}", stats_table(report));
    let issues = issue_table(report);
    if issues.row_iter().next().is_some() {
        println!("{issues}");
    }
    if report.overall_success {
        println!("Validation passed");
    } else {
        eprintln!("Validation failed");
    }
}

/// Counts per status for each file.
pub fn stats_table(report: &UploadReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Success"),
        header_cell("Failed"),
        header_cell("Error"),
        header_cell("Info"),
        header_cell("Warning"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=5 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    for (label, batch) in [
        ("Record types", &report.record_types),
        ("Record fields", &report.record_fields),
    ] {
        table.add_row(stats_row(Cell::new(label), batch));
    }
    let totals = report.stats();
    let mut total_row = vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
    ];
    total_row.extend(
        STATUS_COLUMNS
            .iter()
            .map(|status| count_cell(totals.get(*status), *status).add_attribute(Attribute::Bold)),
    );
    table.add_row(total_row);
    table
}

const STATUS_COLUMNS: [Status; 5] = [
    Status::Success,
    Status::Failed,
    Status::Error,
    Status::Info,
    Status::Warning,
];

fn stats_row(label: Cell, batch: &BatchReport) -> Vec<Cell> {
    let stats = batch.stats();
    let mut row = vec![label];
    row.extend(
        STATUS_COLUMNS
            .iter()
            .map(|status| count_cell(stats.get(*status), *status)),
    );
    row
}

/// One row per failed, errored or warning detail.
pub fn issue_table(report: &UploadReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Record"),
        header_cell("Partition"),
        header_cell("Status"),
        header_cell("Check"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table);

    for batch in [&report.record_types, &report.record_fields] {
        for result in &batch.results {
            for detail in result
                .details
                .iter()
                .filter(|detail| detail.status.is_problem() || detail.status == Status::Warning)
            {
                table.add_row(vec![
                    Cell::new(&result.record),
                    dim_cell(result.partition_key.as_deref().unwrap_or("-")),
                    status_cell(detail.status),
                    Cell::new(&detail.field),
                    Cell::new(&detail.message),
                ]);
            }
        }
    }
    table
}

/// The field type code table.
pub fn field_type_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Code"),
        header_cell("Name"),
        header_cell("Label"),
        header_cell("Term set"),
        header_cell("Role"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for kind in FieldTypeCode::ALL {
        table.add_row(vec![
            Cell::new(kind.code()),
            Cell::new(kind.semantic_name()),
            Cell::new(kind.label()),
            flag_cell(kind.requires_data_source()),
            flag_cell(kind.is_role()),
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
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

fn status_color(status: Status) -> Color {
    match status {
        Status::Success => Color::Green,
        Status::Failed | Status::Error => Color::Red,
        Status::Warning => Color::Yellow,
        Status::Info => Color::Blue,
    }
}

fn status_cell(status: Status) -> Cell {
    Cell::new(status.as_str()).fg(status_color(status))
}

fn count_cell(count: usize, status: Status) -> Cell {
    if count == 0 {
        dim_cell(count)
    } else {
        Cell::new(count).fg(status_color(status))
    }
}

fn flag_cell(flag: bool) -> Cell {
    if flag {
        Cell::new("yes").fg(Color::Green)
    } else {
        dim_cell("-")
    }
}

fn dim_cell<T: std::fmt::Display>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use rts_model::{CheckResult, EntityResult};

    use super::*;

    fn report() -> UploadReport {
        let types = BatchReport::from_results(vec![EntityResult::from_details(
            "Brief",
            vec![CheckResult::success("Name", "Name is valid")],
        )]);
        let fields = BatchReport::from_results(vec![
            EntityResult::from_details(
                "Budget!",
                vec![
                    CheckResult::failed("RowKey Format", "bad key"),
                    CheckResult::warning("DataSourceName", "odd term set"),
                    CheckResult::info("WizardPosition", "defaulted"),
                ],
            )
            .with_partition_key("Brief"),
        ]);
        UploadReport::new(types, fields)
    }

    #[test]
    fn issue_table_lists_problem_and_warning_details() {
        let table = issue_table(&report());
        assert_eq!(table.row_iter().count(), 2);
        let rendered = table.to_string();
        assert!(rendered.contains("bad key"));
        assert!(rendered.contains("odd term set"));
        assert!(!rendered.contains("defaulted"));
    }

    #[test]
    fn stats_table_has_a_row_per_file_and_total() {
        assert_eq!(stats_table(&report()).row_iter().count(), 3);
    }

    #[test]
    fn field_type_table_lists_every_code() {
        let table = field_type_table();
        assert_eq!(table.row_iter().count(), FieldTypeCode::ALL.len());
        assert!(table.to_string().contains("dropdown_single"));
    }
}
