use crate::measurement::Measurement;
use plotters::style::RGBColor;

/// Preferred legend/bar order for the filter implementations
pub const FILTER_ORDER: &[&str] = &[
    "Bloomfilter",
    "BBloom",
    "VedhavyasCuckoo",
    "SeiflotfyCuckoo",
    "PanmariCuckoo",
];

/// Qualitative palette, assigned to traces in order
const COLORS: &[RGBColor] = &[
    RGBColor(99, 110, 250),  // Blue
    RGBColor(239, 85, 59),   // Red
    RGBColor(0, 204, 150),   // Green
    RGBColor(171, 99, 250),  // Purple
    RGBColor(255, 161, 90),  // Orange
    RGBColor(25, 211, 243),  // Cyan
    RGBColor(255, 102, 146), // Pink
    RGBColor(182, 232, 128), // Lime
    RGBColor(255, 151, 255), // Magenta
    RGBColor(254, 203, 82),  // Yellow
];

/// One sub-plot row of the figure
#[derive(Debug, Clone, PartialEq)]
pub struct Facet {
    /// The method this row shows
    pub value: String,
    /// Text drawn beside the row
    pub annotation: String,
}

/// One bar value inside a trace
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    /// Index into `Figure::rows`
    pub row: usize,
    pub facet: usize,
    pub category: String,
    pub y: f64,
}

/// All bars of one filter implementation, across every facet
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    /// The filter this trace shows
    pub value: String,
    /// Legend label
    pub name: String,
    pub color: RGBColor,
    pub points: Vec<Point>,
}

/// Grouped bar chart: x = size, color = filter, one row per method
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub facets: Vec<Facet>,
    pub traces: Vec<Trace>,
    /// x-axis categories in display order
    pub categories: Vec<String>,
    pub y_title: String,
    pub y_tick_suffix: String,
    /// Rows the figure was built from
    pub rows: Vec<Measurement>,
}

impl Figure {
    pub fn from_measurements(rows: Vec<Measurement>) -> Self {
        let facet_values = distinct(rows.iter().map(|m| m.method.as_str()));
        let categories = distinct(rows.iter().map(|m| m.size.as_str()));

        let mut filters = distinct(rows.iter().map(|m| m.filter.as_str()));
        filters.sort_by_key(|f| filter_rank(f));

        let facets = facet_values
            .iter()
            .map(|value| Facet {
                value: value.clone(),
                annotation: format!("method={}", value),
            })
            .collect();

        let traces = filters
            .iter()
            .enumerate()
            .map(|(idx, filter)| Trace {
                value: filter.clone(),
                name: format!("filter={}", filter),
                color: COLORS[idx % COLORS.len()],
                points: rows
                    .iter()
                    .enumerate()
                    .filter(|(_, m)| m.filter == *filter)
                    .filter_map(|(row, m)| {
                        Some(Point {
                            row,
                            facet: facet_values.iter().position(|v| *v == m.method)?,
                            category: m.size.clone(),
                            y: m.nanos()?,
                        })
                    })
                    .collect(),
            })
            .collect();

        Self {
            facets,
            traces,
            categories,
            y_title: "Time".to_string(),
            y_tick_suffix: " ns".to_string(),
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.traces.iter().all(|t| t.points.is_empty())
    }

    pub fn for_each_annotation<F: FnMut(&mut Facet)>(&mut self, f: F) {
        self.facets.iter_mut().for_each(f);
    }

    pub fn for_each_trace<F: FnMut(&mut Trace)>(&mut self, f: F) {
        self.traces.iter_mut().for_each(f);
    }

    /// Replace `method=Insert` / `filter=BBloom` style labels with just the value
    pub fn strip_label_prefixes(&mut self) {
        self.for_each_annotation(|a| a.annotation = strip_key_prefix(&a.annotation).to_string());
        self.for_each_trace(|t| t.name = strip_key_prefix(&t.name).to_string());
    }

    /// Largest bar value, 0 when there are no bars
    pub fn max_y(&self) -> f64 {
        self.traces
            .iter()
            .flat_map(|t| t.points.iter())
            .map(|p| p.y)
            .fold(0.0_f64, f64::max)
    }
}

/// `key=value` -> `value`. Text without `=` comes back unchanged.
pub fn strip_key_prefix(text: &str) -> &str {
    text.split('=').nth(1).unwrap_or(text)
}

fn filter_rank(filter: &str) -> usize {
    FILTER_ORDER
        .iter()
        .position(|f| *f == filter)
        .unwrap_or(FILTER_ORDER.len())
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for v in values {
        if !seen.iter().any(|s| s == v) {
            seen.push(v.to_string());
        }
    }
    seen
}
