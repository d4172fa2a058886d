use plotters::prelude::*;

use crate::types::Float;

/// Plot a time series sampled every dt into `file_path` as a PNG
pub fn plot(
    file_path: &str,
    caption: &str,
    data: &[Float],
    dt: Float,
) -> Result<(), Box<dyn std::error::Error>> {
    if data.is_empty() {
        return Ok(());
    }
    let final_time = dt * data.len() as Float;

    // Determine y-axis limits based on the minimum and maximum values in the data
    let min_y = data.iter().cloned().fold(Float::INFINITY, Float::min);
    let mut max_y = data.iter().cloned().fold(Float::NEG_INFINITY, Float::max);
    if max_y <= min_y {
        max_y = min_y + 1.;
    }

    let root = BitMapBackend::new(file_path, (640, 480)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 20))
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(0.0..final_time, min_y..max_y)?;

    chart.configure_mesh().draw()?;

    chart.draw_series(LineSeries::new(
        data.iter().enumerate().map(|(i, y)| (i as Float * dt, *y)),
        &BLUE,
    ))?;
    root.present()?;

    Ok(())
}
