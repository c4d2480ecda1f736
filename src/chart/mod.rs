use std::path::Path;

use log::info;
use plotters::chart::SeriesLabelPosition;
use plotters::prelude::*;
use plotters::style::FontTransform;

use crate::aggregate::SpendMatrix;
use crate::ledger::MonthId;
use crate::ResultError;

/// Matplotlib-style base colors. Reused cyclically when categories outnumber
/// the palette, which repeats segment colors on busy ledgers.
pub(crate) static PALETTE: &[RGBColor] = &[BLUE, RED, GREEN, CYAN, MAGENTA, YELLOW, BLACK];

const CHART_SIZE: (u32, u32) = (1280, 960);
const BAR_MARGIN: f32 = 0.3;

/// Draw a stacked bar chart of the matrix, one segment per category per
/// month, and write it to `file_path`. Segments stack in category iteration
/// order; each segment's baseline is the sum of the segments below it. The
/// drawing area lives only for this call, nothing is shared between charts.
pub(crate) fn render(
    matrix: &SpendMatrix,
    months: &[MonthId],
    file_path: &Path,
    palette: &[RGBColor],
) -> ResultError<()> {
    if matrix.is_empty() || months.is_empty() {
        info!("No data to draw, skipping {:?}", file_path);
        return Ok(());
    }

    let labels: Vec<String> = months.iter().map(|m| m.to_string()).collect();
    let y_max = match column_totals(matrix, months.len()).into_iter().fold(0.0, f32::max) {
        max if max > 0.0 => max * 1.1,
        _ => 1.0,
    };

    let root = BitMapBackend::new(file_path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Monthly Spend by Category", ("sans-serif", 40))
        .margin(20)
        .x_label_area_size(120)
        .y_label_area_size(90)
        .build_cartesian_2d(0f32..months.len() as f32, 0f32..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Time")
        .y_desc("Spend")
        .x_labels(months.len())
        .x_label_formatter(&|x| {
            labels.get(x.round() as usize).cloned().unwrap_or_default()
        })
        .x_label_style(("sans-serif", 18).into_font().transform(FontTransform::Rotate90))
        .y_label_style(("sans-serif", 18).into_font())
        .draw()?;

    let mut bottom = vec![0f32; months.len()];
    for (idx, (category, series)) in matrix.iter().enumerate() {
        let color = palette[idx % palette.len()];
        chart
            .draw_series(series.iter().enumerate().map(|(i, &amount)| {
                let x0 = i as f32 + BAR_MARGIN;
                let x1 = (i + 1) as f32 - BAR_MARGIN;
                Rectangle::new([(x0, bottom[i]), (x1, bottom[i] + amount)], color.filled())
            }))?
            .label(category)
            .legend(move |(x, y)| Rectangle::new([(x, y - 6), (x + 12, y + 6)], color.filled()));

        for (i, &amount) in series.iter().enumerate() {
            bottom[i] += amount;
        }
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .label_font(("sans-serif", 20))
        .draw()?;

    root.present()?;
    info!("Wrote chart {:?}", file_path);
    Ok(())
}

/// Per-month stacked totals; the tallest column decides the y range.
fn column_totals(matrix: &SpendMatrix, num_months: usize) -> Vec<f32> {
    let mut totals = vec![0f32; num_months];
    for (_, series) in matrix.iter() {
        for (i, amount) in series.iter().enumerate() {
            totals[i] += amount;
        }
    }
    totals
}
