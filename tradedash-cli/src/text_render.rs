//! Plain-text chart renderer for the terminal.

use std::collections::BTreeMap;

use tradedash_core::format::format_money;
use tradedash_core::render::{Chart, ChartRenderer};

const POSITIVE: char = '█';
const NEGATIVE: char = '░';

/// Renders charts into text panels. Disposed panels disappear from
/// [`TextRenderer::panels`].
pub struct TextRenderer {
    bar_width: usize,
    next_id: usize,
    panels: BTreeMap<usize, String>,
}

impl TextRenderer {
    pub fn new(bar_width: usize) -> Self {
        Self {
            bar_width: bar_width.max(1),
            next_id: 0,
            panels: BTreeMap::new(),
        }
    }

    /// Live panels in render order.
    pub fn panels(&self) -> impl Iterator<Item = &str> {
        self.panels.values().map(String::as_str)
    }

    fn bar(&self, value: f64, max_abs: f64) -> String {
        if max_abs <= 0.0 {
            return String::new();
        }
        if value == 0.0 {
            return String::new();
        }
        // non-zero values always get at least one cell
        let len = ((value.abs() / max_abs) * self.bar_width as f64).round() as usize;
        let fill = if value > 0.0 { POSITIVE } else { NEGATIVE };
        std::iter::repeat(fill).take(len.max(1)).collect()
    }

    fn value_rows<'a>(&self, rows: impl Iterator<Item = (&'a str, f64)> + Clone) -> String {
        let label_width = rows.clone().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
        let max_abs = rows.clone().map(|(_, v)| v.abs()).fold(0.0_f64, f64::max);
        rows.map(|(label, value)| {
            format!(
                "  {label:<label_width$}  {:>12}  {}\n",
                format_money(value),
                self.bar(value, max_abs)
            )
        })
        .collect()
    }

    fn draw(&self, chart: Chart<'_>) -> String {
        let body = match chart {
            Chart::Equity(points) => {
                self.value_rows(points.iter().map(|p| (p.label.as_str(), p.cumulative)))
            }
            Chart::Daily(points) => self.value_rows(points.iter().map(|p| (p.date.as_str(), p.sum))),
            Chart::WinLoss(wl) => {
                let total = (wl.wins + wl.losses).max(1) as f64;
                let max = wl.wins.max(wl.losses) as f64;
                [("Wins", wl.wins), ("Losses", wl.losses)]
                    .into_iter()
                    .map(|(label, count)| {
                        format!(
                            "  {label:<6}  {count:>5}  {:>5.1}%  {}\n",
                            count as f64 / total * 100.0,
                            self.bar(count as f64, max)
                        )
                    })
                    .collect()
            }
        };
        format!("--- {} ---\n{body}", chart.title())
    }
}

impl ChartRenderer for TextRenderer {
    type Handle = usize;

    fn render(&mut self, chart: Chart<'_>) -> usize {
        self.next_id += 1;
        let text = self.draw(chart);
        self.panels.insert(self.next_id, text);
        self.next_id
    }

    fn dispose(&mut self, handle: usize) {
        self.panels.remove(&handle);
    }
}
