use crate::figure::{Facet, Figure};
use anyhow::{Context, Result};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::fmt::Write as _;
use std::path::Path;

// Font sizes
const AXIS_LABEL_FONT_SIZE: u32 = 18;
const TICK_LABEL_FONT_SIZE: u32 = 14;
const ANNOTATION_FONT_SIZE: u32 = 16;

// Layout tuning
const Y_LABEL_AREA_SIZE: u32 = 90;
const ANNOTATION_AREA_SIZE: u32 = 40;

// Legend toggling and hover values, driven by the #benchmark-data rows
const FIGURE_SCRIPT: &str = r#"<script>
(function () {
  var root = document.getElementById("benchmark-figure");
  var rows = JSON.parse(document.getElementById("benchmark-data").textContent);
  var tip = root.querySelector(".tooltip");
  var bars = Array.prototype.slice.call(root.querySelectorAll(".bar"));
  root.querySelectorAll(".legend-item").forEach(function (item) {
    item.addEventListener("click", function () {
      var hidden = item.classList.toggle("off");
      bars.forEach(function (bar) {
        if (bar.getAttribute("data-filter") === item.getAttribute("data-filter")) {
          bar.style.display = hidden ? "none" : "";
        }
      });
    });
  });
  bars.forEach(function (bar) {
    bar.addEventListener("mousemove", function (e) {
      var row = rows[Number(bar.getAttribute("data-row"))];
      if (!row) { return; }
      tip.textContent = row.filter + " | " + row.method + " | size=" + row.size + ": " + row.time + " " + row.unit;
      tip.style.left = (e.pageX + 12) + "px";
      tip.style.top = (e.pageY + 12) + "px";
      tip.hidden = false;
    });
    bar.addEventListener("mouseleave", function () { tip.hidden = true; });
  });
})();
</script>
"#;

/// Rendering options for the HTML figure
#[derive(Debug, Clone)]
pub struct ChartConfig {
    /// Width of every sub-plot in pixels
    pub width: u32,
    /// Height of one facet row in pixels
    pub facet_height: u32,
    /// Optional heading above the chart
    pub title: Option<String>,
    /// Label under the x axis of the bottom row
    pub x_title: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            facet_height: 360,
            title: None,
            x_title: "size".to_string(),
        }
    }
}

/// Render the figure as a self-contained HTML document
pub fn render_html(figure: &Figure, config: &ChartConfig) -> Result<String> {
    let mut html = String::new();
    let title = config.title.as_deref().unwrap_or("Filter benchmarks");

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    writeln!(html, "<title>{}</title>", esc(title))?;
    html.push_str(
        "<style>\n\
         .bench-figure{font-family:sans-serif;max-width:100%}\n\
         .bench-figure .legend{display:flex;flex-wrap:wrap;gap:12px;margin:8px 0}\n\
         .bench-figure .legend-item{background:none;border:none;cursor:pointer;font:inherit}\n\
         .bench-figure .legend-item.off{opacity:0.4}\n\
         .bench-figure .swatch{display:inline-block;width:14px;height:14px;margin-right:4px;vertical-align:middle}\n\
         .bench-figure .facet svg{max-width:100%;height:auto}\n\
         .bench-figure .tooltip{position:absolute;pointer-events:none;background:#fff;border:1px solid #444;padding:2px 6px;font-size:13px}\n\
         </style>\n</head>\n<body>\n",
    );
    html.push_str("<div class=\"bench-figure\" id=\"benchmark-figure\">\n");

    if let Some(t) = &config.title {
        writeln!(html, "<h3>{}</h3>", esc(t))?;
    }

    if figure.is_empty() {
        html.push_str("<p class=\"empty\">No data</p>\n");
    } else {
        html.push_str("<div class=\"legend\">\n");
        for trace in &figure.traces {
            let RGBColor(r, g, b) = trace.color;
            writeln!(
                html,
                "<button type=\"button\" class=\"legend-item\" data-filter=\"{}\"><span class=\"swatch\" style=\"background:rgb({},{},{})\"></span>{}</button>",
                esc(&trace.value),
                r,
                g,
                b,
                esc(&trace.name)
            )?;
        }
        html.push_str("</div>\n");

        let y_max = (figure.max_y() * 1.1).max(1.0);
        let last = figure.facets.len().saturating_sub(1);
        for (idx, facet) in figure.facets.iter().enumerate() {
            let svg = render_facet(figure, idx, facet, y_max, idx == last, config)
                .with_context(|| format!("Failed to draw facet {}", facet.value))?;
            writeln!(html, "<div class=\"facet\" data-method=\"{}\">", esc(&facet.value))?;
            html.push_str(&svg);
            html.push_str("\n</div>\n");
        }
        html.push_str("<div class=\"tooltip\" hidden></div>\n");
    }

    let data = serde_json::to_string(&figure.rows)?;
    writeln!(
        html,
        "<script type=\"application/json\" id=\"benchmark-data\">{}</script>",
        data.replace("</", "<\\/")
    )?;
    if !figure.is_empty() {
        html.push_str(FIGURE_SCRIPT);
    }
    html.push_str("</div>\n</body>\n</html>\n");
    Ok(html)
}

/// Render the figure and write it to `path`, creating parent directories
pub fn write_html(figure: &Figure, config: &ChartConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).context("Failed to create output directory")?;
    }
    let html = render_html(figure, config)?;
    std::fs::write(path, html).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Generated: {}", path.display());
    Ok(())
}

/// Draw one facet row as an SVG string.
///
/// Axes and the annotation come from plotters. Bars are emitted as tagged
/// `<rect class="bar">` elements so the page script can find them.
fn render_facet(
    figure: &Figure,
    facet_idx: usize,
    facet: &Facet,
    y_max: f64,
    bottom: bool,
    config: &ChartConfig,
) -> Result<String> {
    let mut svg = String::new();
    let mut bars = Vec::new();
    {
        let root = SVGBackend::with_string(&mut svg, (config.width, config.facet_height))
            .into_drawing_area();
        root.fill(&WHITE)?;

        let plot_width = config.width.saturating_sub(ANNOTATION_AREA_SIZE);
        let (plot_area, annotation_area) = root.split_horizontally(plot_width as i32);

        let categories = &figure.categories;
        let num_categories = categories.len().max(1);
        let num_traces = figure.traces.len().max(1);
        let suffix = figure.y_tick_suffix.as_str();

        let mut chart = ChartBuilder::on(&plot_area)
            .margin(10)
            .x_label_area_size(if bottom { 50 } else { 25 })
            .y_label_area_size(Y_LABEL_AREA_SIZE)
            .build_cartesian_2d(-0.5..(num_categories as f64 - 0.5), 0.0..y_max)?;

        // Only integer positions are categories; anything between stays blank
        let x_formatter = |x: &f64| {
            let idx = x.round() as usize;
            if idx < categories.len() && (x - idx as f64).abs() < 0.3 {
                categories[idx].clone()
            } else {
                String::new()
            }
        };
        let y_formatter = |y: &f64| format!("{}{}", format_tick(*y), suffix);

        let mut mesh = chart.configure_mesh();
        mesh.disable_x_mesh()
            .x_labels(num_categories * 2 + 1)
            .x_label_formatter(&x_formatter)
            .y_labels(6)
            .y_label_formatter(&y_formatter)
            .y_desc(figure.y_title.as_str())
            .label_style(("sans-serif", TICK_LABEL_FONT_SIZE))
            .axis_desc_style(("sans-serif", AXIS_LABEL_FONT_SIZE));
        if bottom {
            mesh.x_desc(config.x_title.as_str());
        }
        mesh.draw()?;

        // Grouped bars, one slot per trace so colors line up across facets
        let group_width = 0.8;
        let bar_width = group_width / num_traces as f64;

        for (trace_idx, trace) in figure.traces.iter().enumerate() {
            let RGBColor(r, g, b) = trace.color;
            for point in trace.points.iter().filter(|p| p.facet == facet_idx) {
                let Some(cat_idx) = categories.iter().position(|c| *c == point.category) else {
                    continue;
                };

                let x_center = cat_idx as f64;
                let x_offset = (trace_idx as f64 - (num_traces as f64 - 1.0) / 2.0) * bar_width;
                let x_left = x_center + x_offset - bar_width / 2.0 + 0.01;
                let x_right = x_center + x_offset + bar_width / 2.0 - 0.01;

                let (left, top) = chart.backend_coord(&(x_left, point.y));
                let (right, base) = chart.backend_coord(&(x_right, 0.0));

                let label = figure
                    .rows
                    .get(point.row)
                    .map(|m| format!("{}: {} {}", trace.name, m.time, m.unit))
                    .unwrap_or_else(|| trace.name.clone());

                bars.push(format!(
                    "<rect class=\"bar\" data-filter=\"{}\" data-size=\"{}\" data-row=\"{}\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"rgb({},{},{})\"><title>{}</title></rect>",
                    esc(&trace.value),
                    esc(&point.category),
                    point.row,
                    left,
                    top,
                    (right - left).max(1),
                    (base - top).max(0),
                    r,
                    g,
                    b,
                    esc(&label)
                ));
            }
        }

        // Facet annotation, rotated inside its own strip on the right
        let (w, h) = annotation_area.dim_in_pixel();
        annotation_area.draw(&Text::new(
            facet.annotation.clone(),
            (w as i32 / 2, h as i32 / 2),
            ("sans-serif", ANNOTATION_FONT_SIZE)
                .into_font()
                .transform(FontTransform::Rotate90)
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Center)),
        ))?;

        root.present()?;
    }

    if let Some(end) = svg.rfind("</svg>") {
        svg.insert_str(end, &bars.join("\n"));
    }
    Ok(svg)
}

/// Format a y tick value without trailing zeros
fn format_tick(value: f64) -> String {
    if value >= 100.0 || value == value.trunc() {
        format!("{:.0}", value)
    } else {
        let s = format!("{:.2}", value);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

fn esc(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
