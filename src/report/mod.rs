use comfy_table::{Cell, CellAlignment, Table, TableComponent};

use crate::aggregate::SpendMatrix;

/// Print per-category totals across all months, plus a grand total row.
/// Presentation only, charts are unaffected.
pub(crate) fn print_totals(matrix: &SpendMatrix) {
    let mut table = Table::new();
    table.remove_style(TableComponent::HorizontalLines);
    table.remove_style(TableComponent::MiddleIntersections);
    table.remove_style(TableComponent::LeftBorderIntersections);
    table.remove_style(TableComponent::RightBorderIntersections);
    table.set_header(vec!["Category", "Total"]);

    let mut grand_total = 0f32;
    for (category, series) in matrix.iter() {
        let total: f32 = series.iter().sum();
        grand_total += total;
        table.add_row(vec![
            Cell::new(category),
            Cell::new(format_amount(total).as_str()).set_alignment(CellAlignment::Right),
        ]);
    }

    table.add_row(vec![
        Cell::new("All"),
        Cell::new(format_amount(grand_total).as_str()).set_alignment(CellAlignment::Right),
    ]);

    println!("{table}");
}

fn format_amount(amount: f32) -> String {
    format!("{amount:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(6.5), "6.50");
        assert_eq!(format_amount(1200.0), "1200.00");
        assert_eq!(format_amount(-20.0), "-20.00");
    }
}
