//! Density plots rendered off-screen and printed as text.

use outvis_stats::density::KernelDensity;
use outvis_threshold::threshold::ThresholdPair;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    widgets::{Axis, Block, Chart, Dataset, GraphType, Widget},
};

pub(crate) const WIDTH: u16 = 100;
pub(crate) const HEIGHT: u16 = 28;
const GRID_POINTS: usize = 200;

#[derive(Debug, Clone)]
pub(crate) struct DensitySeries {
    pub name: String,
    pub color: Color,
    pub points: Vec<(f64, f64)>,
}

/// Kernel density curves of one or more samples, with the threshold drawn as
/// two vertical lines.
#[derive(Debug, Clone)]
pub(crate) struct DensityChart {
    title: String,
    series: Vec<DensitySeries>,
    threshold: Option<ThresholdPair>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
}

impl DensityChart {
    /// Samples with fewer than two present values have no density and are skipped.
    pub fn new<'a, I>(title: impl Into<String>, samples: I, threshold: Option<ThresholdPair>) -> Self
    where
        I: IntoIterator<Item = (&'a str, Color, &'a [f64])>,
    {
        let samples = samples.into_iter().collect::<Vec<_>>();
        let x_bounds = x_bounds(
            samples
                .iter()
                .flat_map(|(_, _, values)| values.iter().copied())
                .chain(threshold.iter().flat_map(|t| [t.lower, t.upper])),
        );

        let series = samples
            .into_iter()
            .filter_map(|(name, color, values)| match KernelDensity::new(values) {
                Ok(density) => Some(DensitySeries {
                    name: name.to_owned(),
                    color,
                    points: density.evaluate_grid(x_bounds[0], x_bounds[1], GRID_POINTS),
                }),
                Err(e) => {
                    tracing::warn!(series = name, "no density curve: {e}");
                    None
                }
            })
            .collect::<Vec<_>>();

        let y_max = series
            .iter()
            .flat_map(|s| s.points.iter().map(|(_, y)| *y))
            .fold(0.0, f64::max);
        let y_max = if y_max > 0.0 { y_max * 1.1 } else { 1.0 };

        Self {
            title: title.into(),
            series,
            threshold,
            x_bounds,
            y_bounds: [0.0, y_max],
        }
    }

    /// Renders the chart into a `width` x `height` text block, one line per row.
    pub fn to_text(&self, width: u16, height: u16) -> String {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        Widget::render(self, area, &mut buf);

        let mut text = String::new();
        for y in area.top()..area.bottom() {
            let line = (area.left()..area.right())
                .map(|x| buf[(x, y)].symbol())
                .collect::<String>();
            text.push_str(line.trim_end());
            text.push('\n');
        }
        text
    }
}

impl Widget for &DensityChart {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let [y_min, y_max] = self.y_bounds;
        let markers = self
            .threshold
            .map(|t| [[(t.lower, y_min), (t.lower, y_max)], [(t.upper, y_min), (t.upper, y_max)]]);

        let mut datasets = self
            .series
            .iter()
            .map(|series| {
                Dataset::default()
                    .name(series.name.as_str())
                    .marker(Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(series.color))
                    .data(&series.points)
            })
            .collect::<Vec<_>>();
        if let Some([lower, upper]) = &markers {
            for (name, data) in [("lower", lower), ("upper", upper)] {
                datasets.push(
                    Dataset::default()
                        .name(name)
                        .marker(Marker::Dot)
                        .graph_type(GraphType::Line)
                        .style(Style::default().fg(Color::Red))
                        .data(data),
                );
            }
        }

        let x_axis = Axis::default()
            .title("value")
            .bounds(self.x_bounds)
            .labels([
                format!("{:.2}", self.x_bounds[0]),
                format!("{:.2}", f64::midpoint(self.x_bounds[0], self.x_bounds[1])),
                format!("{:.2}", self.x_bounds[1]),
            ]);
        let y_axis = Axis::default()
            .title("density")
            .bounds(self.y_bounds)
            .labels([format!("{y_min:.3}"), format!("{y_max:.3}")]);
        let chart = Chart::new(datasets)
            .block(Block::bordered().title(self.title.as_str()))
            .x_axis(x_axis)
            .y_axis(y_axis);

        Widget::render(chart, area, buf);
    }
}

/// Range covering every value, padded by 5% on each side.
fn x_bounds<I>(values: I) -> [f64; 2]
where
    I: IntoIterator<Item = f64>,
{
    let (min, max) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), v| {
            (min.min(v), max.max(v))
        });
    if min > max {
        return [0.0, 1.0];
    }
    let pad = if max > min { (max - min) * 0.05 } else { 1.0 };
    [min - pad, max + pad]
}
