//! Spray-chart rendering: field diagram plus scatter layers on a
//! request-scoped, buffer-backed canvas, encoded to base64 PNG.

pub mod encoding;
pub mod field;

use std::io::Cursor;

use base64::{engine::general_purpose, Engine as _};
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::debug;

use crate::config::{
    CANVAS_MARGIN_PX, CANVAS_SIZE_PX, POINT_RADIUS_PX, X_MAX_FT, X_MIN_FT, Y_MAX_FT, Y_MIN_FT,
};
use crate::error::{AppError, Result};
use self::encoding::{viridis, ColorLayers, ContinuousScale, DiscreteLayer};

/// Width of the color-bar strip carved out of the square canvas in
/// exit-speed mode.
const COLORBAR_WIDTH_PX: u32 = 100;
const COLORBAR_SEGMENTS: usize = 128;

/// Renders the layers over the field diagram and returns the PNG as a
/// base64 string. The canvas is always a fixed-size square; every call
/// draws into its own buffer, so concurrent requests never share canvas
/// state.
pub fn render_graph(layers: &ColorLayers) -> Result<String> {
    let (width, height) = (CANVAS_SIZE_PX, CANVAS_SIZE_PX);

    let mut buf = vec![0u8; (width * height * 3) as usize];
    draw_chart(&mut buf, width, height, layers)
        .map_err(|e| AppError::Render(e.to_string()))?;

    let img = image::RgbImage::from_raw(width, height, buf)
        .ok_or_else(|| AppError::Render("canvas buffer size mismatch".to_string()))?;
    let mut png = Vec::new();
    img.write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)?;

    debug!(width, height, png_bytes = png.len(), "rendered spray chart");
    Ok(general_purpose::STANDARD.encode(&png))
}

fn draw_chart(
    buf: &mut [u8],
    width: u32,
    height: u32,
    layers: &ColorLayers,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::with_buffer(buf, (width, height)).into_drawing_area();
    root.fill(&WHITE)?;

    // The color bar, when present, takes a strip on the right; the field
    // area gives back the same amount vertically so it stays square and
    // x/y scales stay equal.
    let (field_area, bar_area) = if matches!(layers, ColorLayers::ExitSpeed(_)) {
        let (l, r) = root.split_horizontally((width - COLORBAR_WIDTH_PX) as i32);
        let pad = (COLORBAR_WIDTH_PX / 2) as i32;
        (l.margin(pad, pad, 0, 0), Some(r))
    } else {
        (root, None)
    };

    let mut chart = ChartBuilder::on(&field_area)
        .margin(CANVAS_MARGIN_PX)
        .build_cartesian_2d(X_MIN_FT..X_MAX_FT, Y_MIN_FT..Y_MAX_FT)?;

    // Playing surface behind everything else.
    chart.draw_series(std::iter::once(Rectangle::new(
        [(-500.0, -500.0), (500.0, 500.0)],
        field::GRASS.filled(),
    )))?;

    field::draw(&mut chart)?;

    match layers {
        ColorLayers::Discrete(discrete) => {
            draw_discrete(&mut chart, discrete)?;
        }
        ColorLayers::ExitSpeed(scale) => {
            chart.draw_series(scale.points.iter().map(|&(x, y, v)| {
                Circle::new((x, y), POINT_RADIUS_PX, viridis(scale.position(v)).filled())
            }))?;
            if let Some(bar_area) = &bar_area {
                draw_colorbar(bar_area, scale)?;
            }
        }
    }

    field_area.present()?;
    Ok(())
}

fn draw_discrete<'a, DB>(
    chart: &mut ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    layers: &[DiscreteLayer],
) -> std::result::Result<(), Box<dyn std::error::Error>>
where
    DB: DrawingBackend + 'a,
    DB::ErrorType: 'static,
{
    for layer in layers {
        let color = layer.color;
        chart
            .draw_series(
                layer
                    .points
                    .iter()
                    .map(move |&(x, y)| Circle::new((x, y), POINT_RADIUS_PX, color.filled())),
            )?
            .label(layer.label.clone())
            .legend(move |(x, y)| Circle::new((x, y), 5, color.filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK.mix(0.4))
        .label_font(("sans-serif", 20))
        .draw()?;

    Ok(())
}

/// Vertical viridis gradient annotated with the exit-speed range.
fn draw_colorbar<'a, DB>(
    area: &'a DrawingArea<DB, Shift>,
    scale: &ContinuousScale,
) -> std::result::Result<(), Box<dyn std::error::Error>>
where
    DB: DrawingBackend + 'a,
    DB::ErrorType: 'static,
{
    // Pad a degenerate range so the axis still has extent.
    let (lo, hi) = if (scale.max - scale.min).abs() <= f64::EPSILON {
        (scale.min - 1.0, scale.max + 1.0)
    } else {
        (scale.min, scale.max)
    };

    let mut bar = ChartBuilder::on(area)
        .margin_top(CANVAS_MARGIN_PX)
        .margin_bottom(CANVAS_MARGIN_PX)
        .margin_left(10)
        .set_label_area_size(LabelAreaPosition::Right, 52)
        .build_cartesian_2d(0.0..1.0, lo..hi)?;

    // Only the right label area exists, so no x labels are drawn.
    bar.configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .y_labels(6)
        .y_desc("Exit speed")
        .label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 16))
        .draw()?;

    let step = (hi - lo) / COLORBAR_SEGMENTS as f64;
    bar.draw_series((0..COLORBAR_SEGMENTS).map(|i| {
        let v0 = lo + step * i as f64;
        let t = (i as f64 + 0.5) / COLORBAR_SEGMENTS as f64;
        Rectangle::new([(0.0, v0), (1.0, v0 + step)], viridis(t).filled())
    }))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

    fn decode(b64: &str) -> Vec<u8> {
        general_purpose::STANDARD.decode(b64).unwrap()
    }

    #[test]
    fn discrete_render_produces_a_png() {
        let layers = ColorLayers::Discrete(vec![DiscreteLayer {
            label: "Single".to_string(),
            color: BLUE,
            points: vec![(-50.0, 180.0), (30.0, 250.0)],
        }]);
        let png = decode(&render_graph(&layers).unwrap());
        assert_eq!(&png[..8], &PNG_MAGIC);
    }

    #[test]
    fn exit_speed_render_keeps_the_square_canvas() {
        let layers = ColorLayers::ExitSpeed(ContinuousScale {
            points: vec![(0.0, 300.0, 88.0), (40.0, 350.0, 104.0)],
            min: 88.0,
            max: 104.0,
        });
        let png = decode(&render_graph(&layers).unwrap());
        assert_eq!(&png[..8], &PNG_MAGIC);
        // IHDR stores width then height big-endian at bytes 16..24
        let width = u32::from_be_bytes(png[16..20].try_into().unwrap());
        let height = u32::from_be_bytes(png[20..24].try_into().unwrap());
        assert_eq!((width, height), (CANVAS_SIZE_PX, CANVAS_SIZE_PX));
    }

    #[test]
    fn identical_layers_render_identically() {
        let layers = ColorLayers::Discrete(vec![DiscreteLayer {
            label: "Out".to_string(),
            color: RGBColor(128, 128, 128),
            points: vec![(10.0, 120.0)],
        }]);
        assert_eq!(render_graph(&layers).unwrap(), render_graph(&layers).unwrap());
    }
}
