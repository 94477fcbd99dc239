//! Axis ranges, tick positions and data-to-screen mapping for the latency chart.
//!
//! Everything here is plain arithmetic so it can be tested without a window.

/// Fraction of the data span added above and below the latency values.
const Y_PADDING_FRACTION: f64 = 0.05;

/// Upper limit on ticks per axis; anything beyond is treated as unplottable.
const MAX_TICKS: f64 = 1000.0;

/// Visible data range of the chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl ChartBounds {
    /// Compute bounds for a latency series plotted against its index.
    ///
    /// Non-finite values are left out of the y range. A single point or a flat
    /// series still gets a non-zero span on both axes.
    pub fn from_latencies(latencies: &[f64]) -> Self {
        let (x_min, x_max) = match latencies.len() {
            0 | 1 => (-0.5, 0.5),
            n => (0.0, (n - 1) as f64),
        };

        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        for &value in latencies.iter().filter(|v| v.is_finite()) {
            y_min = y_min.min(value);
            y_max = y_max.max(value);
        }

        if !y_min.is_finite() {
            // No finite values at all
            return Self {
                x_min,
                x_max,
                y_min: 0.0,
                y_max: 1.0,
            };
        }

        // Halved so values near f64::MAX do not overflow the span
        let half_span = y_max / 2.0 - y_min / 2.0;
        let pad = if half_span > 0.0 {
            half_span * (2.0 * Y_PADDING_FRACTION)
        } else {
            (y_min.abs() * Y_PADDING_FRACTION).max(1e-6)
        };

        Self {
            x_min,
            x_max,
            y_min: (y_min - pad).max(f64::MIN),
            y_max: (y_max + pad).min(f64::MAX),
        }
    }
}

/// Pick a "nice" step (1, 2 or 5 times a power of ten) giving roughly
/// `target_count` intervals across `[min, max]`.
pub fn nice_step(min: f64, max: f64, target_count: usize) -> f64 {
    let half_span = max / 2.0 - min / 2.0;
    if half_span <= 0.0 || !half_span.is_finite() || target_count == 0 {
        return 1.0;
    }

    let raw = (half_span / target_count as f64) * 2.0;
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;

    // Tolerate rounding noise from the power of ten
    let nice = if normalized <= 1.0 + 1e-9 {
        1.0
    } else if normalized <= 2.0 + 1e-9 {
        2.0
    } else if normalized <= 5.0 + 1e-9 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Tick positions inside `[min, max]` at a nice step.
pub fn nice_ticks(min: f64, max: f64, target_count: usize) -> Vec<f64> {
    nice_ticks_with_step(min, max, nice_step(min, max, target_count))
}

/// Integer tick positions for the packet index axis.
pub fn index_ticks(min: f64, max: f64, target_count: usize) -> Vec<f64> {
    let step = nice_step(min, max, target_count).max(1.0).round();
    nice_ticks_with_step(min, max, step)
}

fn nice_ticks_with_step(min: f64, max: f64, step: f64) -> Vec<f64> {
    let first = (min / step).ceil();
    let last = (max / step).floor();
    if !first.is_finite() || !last.is_finite() || last - first > MAX_TICKS {
        return Vec::new();
    }
    (first as i64..=last as i64).map(|i| i as f64 * step).collect()
}

/// Format a tick label with just enough decimals for the given step.
pub fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step > 0.0 && step < 1.0 {
        (-step.log10().floor()) as usize
    } else {
        0
    };
    // Avoid "-0.000"
    let value = if value.abs() < step * 1e-9 { 0.0 } else { value };
    format!("{:.*}", decimals, value)
}

/// Linearly map a data value onto a screen coordinate range.
pub fn map_to_screen(value: f64, data_min: f64, data_max: f64, screen_min: f32, screen_max: f32) -> f32 {
    let half_span = data_max / 2.0 - data_min / 2.0;
    if half_span == 0.0 || !half_span.is_finite() {
        return (screen_min + screen_max) / 2.0;
    }
    let t = ((value / 2.0 - data_min / 2.0) / half_span) as f32;
    screen_min + t * (screen_max - screen_min)
}
