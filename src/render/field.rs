//! Baseball field diagram, drawn in field coordinates (feet) with home
//! plate at the origin and straightaway center field up the +y axis.

use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;

/// Grass green used for the playing surface.
pub const GRASS: RGBColor = RGBColor(46, 125, 50);
const DIRT: RGBColor = RGBColor(177, 134, 90);
const FENCE: RGBColor = RGBColor(40, 40, 40);

/// Base-path length (feet); first base sits 90 ft from home at +45°.
const BASE_PATH_FT: f64 = 90.0;
/// Radius of the infield dirt wedge.
const INFIELD_RADIUS_FT: f64 = 155.0;
/// Fence distance down the lines and to straightaway center.
const FENCE_CORNER_FT: f64 = 330.0;
const FENCE_CENTER_FT: f64 = 400.0;
/// Foul lines run to the corners at ±45°.
const FOUL_LINE_DEG: f64 = 45.0;

type FieldChart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Draws the field markings bottom-to-top: infield dirt, infield grass,
/// mound, bases, foul lines, outfield fence. The caller has already
/// painted the grass background and draws scatter layers afterwards.
pub fn draw<'a, DB>(chart: &mut FieldChart<'a, DB>) -> Result<(), Box<dyn std::error::Error>>
where
    DB: DrawingBackend + 'a,
    DB::ErrorType: 'static,
{
    // Infield dirt: wedge between the foul lines out to the infield arc.
    let mut wedge: Vec<(f64, f64)> = vec![(0.0, 0.0)];
    wedge.extend(arc_points(INFIELD_RADIUS_FT, 64));
    chart.draw_series(std::iter::once(Polygon::new(wedge, DIRT.filled())))?;

    // Infield grass: diamond inset inside the base paths.
    let center_y = BASE_PATH_FT / 2.0_f64.sqrt();
    let half = center_y * 0.8;
    let diamond = vec![
        (0.0, center_y - half),
        (half, center_y),
        (0.0, center_y + half),
        (-half, center_y),
    ];
    chart.draw_series(std::iter::once(Polygon::new(diamond, GRASS.filled())))?;

    // Pitcher's mound (pixel-sized, scale is fixed).
    chart.draw_series(std::iter::once(Circle::new((0.0, 60.5), 14, DIRT.filled())))?;

    // Bases and home plate.
    let corner = BASE_PATH_FT / 2.0_f64.sqrt();
    for (bx, by) in [
        (0.0, 0.0),
        (corner, corner),
        (0.0, 2.0 * corner),
        (-corner, corner),
    ] {
        chart.draw_series(std::iter::once(Rectangle::new(
            [(bx - 3.0, by - 3.0), (bx + 3.0, by + 3.0)],
            WHITE.filled(),
        )))?;
    }

    // Foul lines out to the fence corners.
    let reach = FENCE_CORNER_FT / 2.0_f64.sqrt();
    for sign in [-1.0, 1.0] {
        chart.draw_series(LineSeries::new(
            vec![(0.0, 0.0), (sign * reach, reach)],
            WHITE.stroke_width(2),
        ))?;
    }

    // Outfield fence: arc from corner to corner, deepest in center.
    let fence: Vec<(f64, f64)> = (0..=96)
        .map(|i| {
            let deg = -FOUL_LINE_DEG + (i as f64 / 96.0) * 2.0 * FOUL_LINE_DEG;
            let rad = deg.to_radians();
            let r = FENCE_CORNER_FT
                + (FENCE_CENTER_FT - FENCE_CORNER_FT) * (2.0 * rad).cos();
            (r * rad.sin(), r * rad.cos())
        })
        .collect();
    chart.draw_series(LineSeries::new(fence, FENCE.stroke_width(3)))?;

    Ok(())
}

/// Points along an arc of the given radius between the foul lines.
fn arc_points(radius: f64, steps: usize) -> Vec<(f64, f64)> {
    (0..=steps)
        .map(|i| {
            let deg = -FOUL_LINE_DEG + (i as f64 / steps as f64) * 2.0 * FOUL_LINE_DEG;
            let rad = deg.to_radians();
            (radius * rad.sin(), radius * rad.cos())
        })
        .collect()
}
