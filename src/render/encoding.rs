//! Color encoding: turns filtered, projected rows into scatter layers.

use std::collections::BTreeMap;

use plotters::prelude::*;
use plotters::style::colors::colormaps::{ColorMap, ViridisRGB};

use crate::filter::GraphFilter;
use crate::types::{ColorBy, PlayOutcome, RawEvent};

/// Fixed palette for the outcome encoding.
pub fn outcome_color(outcome: PlayOutcome) -> RGBColor {
    match outcome {
        PlayOutcome::Single => BLUE,
        PlayOutcome::Double => YELLOW,
        PlayOutcome::Triple => RGBColor(255, 165, 0),
        PlayOutcome::HomeRun => RED,
        PlayOutcome::Out => RGBColor(128, 128, 128),
        PlayOutcome::Error => BLACK,
    }
}

/// Samples the viridis colormap at `t` in `[0, 1]`.
pub fn viridis(t: f64) -> RGBColor {
    ViridisRGB.get_color(t.clamp(0.0, 1.0) as f32)
}

/// One legend entry worth of points sharing a color.
#[derive(Debug, Clone)]
pub struct DiscreteLayer {
    pub label: String,
    pub color: RGBColor,
    pub points: Vec<(f64, f64)>,
}

/// Points colored individually by exit speed.
#[derive(Debug, Clone)]
pub struct ContinuousScale {
    /// (x, y, exit_speed)
    pub points: Vec<(f64, f64, f64)>,
    pub min: f64,
    pub max: f64,
}

impl ContinuousScale {
    /// Normalized position of a speed on the scale.
    pub fn position(&self, speed: f64) -> f64 {
        let span = self.max - self.min;
        if span <= f64::EPSILON {
            return 0.5;
        }
        (speed - self.min) / span
    }
}

#[derive(Debug, Clone)]
pub enum ColorLayers {
    Discrete(Vec<DiscreteLayer>),
    ExitSpeed(ContinuousScale),
}

/// Builds the scatter layers for the request's `colorBy` mode from rows
/// that survived filtering and projection.
pub fn build_layers(points: &[(&RawEvent, (f64, f64))], filter: &GraphFilter) -> ColorLayers {
    match filter.color_by {
        ColorBy::Outcome => ColorLayers::Discrete(outcome_layers(points, &filter.outcomes)),
        ColorBy::Date => ColorLayers::Discrete(partition_layers(points, |ev| &ev.game_date)),
        ColorBy::BatterName => ColorLayers::Discrete(partition_layers(points, |ev| &ev.batter)),
        ColorBy::PitcherName => {
            ColorLayers::Discrete(partition_layers(points, |ev| &ev.pitcher))
        }
        ColorBy::ExitSpeed => ColorLayers::ExitSpeed(speed_scale(points)),
    }
}

/// One layer per recognized outcome, palette order, restricted to the
/// outcomes the filter selected. Empty layers are dropped.
fn outcome_layers(
    points: &[(&RawEvent, (f64, f64))],
    active: &[String],
) -> Vec<DiscreteLayer> {
    PlayOutcome::ALL
        .iter()
        .filter(|o| active.iter().any(|a| a == o.label()))
        .filter_map(|o| {
            let layer: Vec<(f64, f64)> = points
                .iter()
                .filter(|(ev, _)| ev.play_outcome.as_deref() == Some(o.label()))
                .map(|&(_, p)| p)
                .collect();
            if layer.is_empty() {
                None
            } else {
                Some(DiscreteLayer {
                    label: o.label().to_string(),
                    color: outcome_color(*o),
                    points: layer,
                })
            }
        })
        .collect()
}

/// Partitions rows by a distinct string value and spreads the partitions
/// along the viridis scale, sorted so colors are stable across calls.
fn partition_layers<F>(points: &[(&RawEvent, (f64, f64))], key: F) -> Vec<DiscreteLayer>
where
    F: Fn(&RawEvent) -> &Option<String>,
{
    let mut groups: BTreeMap<String, Vec<(f64, f64)>> = BTreeMap::new();
    for (ev, p) in points {
        if let Some(k) = key(ev) {
            groups.entry(k.clone()).or_default().push(*p);
        }
    }
    let n = groups.len();
    groups
        .into_iter()
        .enumerate()
        .map(|(i, (label, pts))| DiscreteLayer {
            label,
            color: viridis(if n > 1 { i as f64 / (n - 1) as f64 } else { 0.5 }),
            points: pts,
        })
        .collect()
}

fn speed_scale(points: &[(&RawEvent, (f64, f64))]) -> ContinuousScale {
    let pts: Vec<(f64, f64, f64)> = points
        .iter()
        .filter_map(|&(ev, (x, y))| {
            ev.exit_speed.filter(|v| v.is_finite()).map(|v| (x, y, v))
        })
        .collect();
    let min = pts.iter().map(|p| p.2).fold(f64::INFINITY, f64::min);
    let max = pts.iter().map(|p| p.2).fold(f64::NEG_INFINITY, f64::max);
    let (min, max) = if pts.is_empty() { (0.0, 1.0) } else { (min, max) };
    ContinuousScale { points: pts, min, max }
}
