//! SVG rendering for sampled conics.

use std::fmt::Write;

use conic_core::R2;

/// SVG rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Canvas width in pixels
    pub width: f64,
    /// Canvas height in pixels
    pub height: f64,
    /// Padding around curves (fraction of canvas)
    pub padding: f64,
    /// Stroke width for curve outlines
    pub stroke_width: f64,
    /// Points with |x| or |y| beyond this break the path (asymptotes, points at infinity)
    pub clip: f64,
    /// Whether to mark each conic's midpoint
    pub show_midpoints: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            padding: 0.1,
            stroke_width: 0.05,
            clip: 50.0,
            show_midpoints: true,
        }
    }
}

/// Color palette for curves
const COLORS: &[&str] = &[
    "#e41a1c", // red
    "#377eb8", // blue
    "#4daf4a", // green
    "#984ea3", // purple
    "#ff7f00", // orange
    "#a65628", // brown
    "#f781bf", // pink
];

/// One sampled conic: its points in parameter order, plus its midpoint.
pub struct Curve {
    pub points: Vec<R2<f64>>,
    pub midpoint: R2<f64>,
}

impl RenderConfig {
    fn visible(&self, p: &R2<f64>) -> bool {
        p.is_finite() && p.x.abs() <= self.clip && p.y.abs() <= self.clip
    }
}

/// Split a sample run into drawable pieces at invisible points.
fn runs<'a>(points: &'a [R2<f64>], config: &'a RenderConfig) -> impl Iterator<Item = &'a [R2<f64>]> + 'a {
    points
        .split(move |p| !config.visible(p))
        .filter(|run| run.len() >= 2)
}

/// Render curves to SVG string
pub fn render_svg(curves: &[Curve], config: &RenderConfig) -> String {
    let (min_x, max_x, min_y, max_y) = compute_bounds(curves, config);

    // Add padding
    let width = max_x - min_x;
    let height = max_y - min_y;
    let pad_x = width * config.padding;
    let pad_y = height * config.padding;

    let view_min_x = min_x - pad_x;
    let view_min_y = min_y - pad_y;
    let view_width = width + 2.0 * pad_x;
    let view_height = height + 2.0 * pad_y;

    let mut svg = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(
        &mut svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="{} {} {} {}">"#,
        config.width, config.height, view_min_x, view_min_y, view_width, view_height
    );
    let _ = writeln!(
        &mut svg,
        r#"  <rect x="{}" y="{}" width="{}" height="{}" fill="white"/>"#,
        view_min_x, view_min_y, view_width, view_height
    );

    // Flip y so the plane's +y points up
    let _ = writeln!(
        &mut svg,
        r#"  <g transform="translate(0 {}) scale(1 -1)">"#,
        2.0 * view_min_y + view_height
    );
    for (idx, curve) in curves.iter().enumerate() {
        let color = COLORS[idx % COLORS.len()];
        for run in runs(&curve.points, config) {
            let mut path = format!("M {} {}", run[0].x, run[0].y);
            for p in &run[1..] {
                let _ = write!(&mut path, " L {} {}", p.x, p.y);
            }
            let _ = writeln!(
                &mut svg,
                r#"    <path d="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
                path, color, config.stroke_width
            );
        }
        if config.show_midpoints && config.visible(&curve.midpoint) {
            let _ = writeln!(
                &mut svg,
                r#"    <circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
                curve.midpoint.x, curve.midpoint.y, config.stroke_width * 2.0, color
            );
        }
    }
    let _ = writeln!(&mut svg, "  </g>");
    let _ = writeln!(&mut svg, "</svg>");

    svg
}

/// Compute bounding box over visible points
fn compute_bounds(curves: &[Curve], config: &RenderConfig) -> (f64, f64, f64, f64) {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for p in curves.iter().flat_map(|c| c.points.iter()).filter(|p| config.visible(p)) {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }

    // Handle empty/degenerate cases
    if min_x >= max_x {
        min_x = if min_x.is_finite() { min_x - 1.0 } else { -1.0 };
        max_x = min_x + 2.0;
    }
    if min_y >= max_y {
        min_y = if min_y.is_finite() { min_y - 1.0 } else { -1.0 };
        max_y = min_y + 2.0;
    }

    (min_x, max_x, min_y, max_y)
}
