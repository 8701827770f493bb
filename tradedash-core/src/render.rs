//! Renderer capability interface.
//!
//! The pipeline never draws anything itself. A consumer supplies a
//! [`ChartRenderer`]; [`ChartBoard`] owns the live handles and replaces them
//! wholesale whenever a new snapshot (or the idle state) is shown.

use crate::aggregate::{ChartSeries, DailyPoint, DashboardSnapshot, EquityPoint, WinLoss};

/// One chart to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Chart<'a> {
    /// Cumulative P/L line.
    Equity(&'a [EquityPoint]),
    /// Per-day P/L bars.
    Daily(&'a [DailyPoint]),
    /// Two-slice win/loss breakdown.
    WinLoss(WinLoss),
}

impl Chart<'_> {
    pub fn title(&self) -> &'static str {
        match self {
            Chart::Equity(_) => "Equity Curve",
            Chart::Daily(_) => "Daily P/L",
            Chart::WinLoss(_) => "Wins vs Losses",
        }
    }
}

/// Something that can draw a chart and later tear it down.
pub trait ChartRenderer {
    type Handle;

    fn render(&mut self, chart: Chart<'_>) -> Self::Handle;

    fn dispose(&mut self, handle: Self::Handle);
}

/// Holds the handles of the charts currently on screen.
pub struct ChartBoard<R: ChartRenderer> {
    renderer: R,
    handles: Vec<R::Handle>,
}

impl<R: ChartRenderer> ChartBoard<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            handles: Vec::new(),
        }
    }

    /// Dispose whatever is showing, then draw the snapshot's charts.
    ///
    /// `None` (no trades loaded) only clears: stale charts never survive a
    /// reload.
    pub fn show(&mut self, snapshot: Option<&DashboardSnapshot>) {
        self.clear();
        if let Some(snapshot) = snapshot {
            self.draw(&snapshot.series);
        }
    }

    fn draw(&mut self, series: &ChartSeries) {
        for chart in [
            Chart::Equity(&series.equity),
            Chart::Daily(&series.daily),
            Chart::WinLoss(series.win_loss),
        ] {
            let handle = self.renderer.render(chart);
            self.handles.push(handle);
        }
    }

    pub fn clear(&mut self) {
        for handle in self.handles.drain(..) {
            self.renderer.dispose(handle);
        }
    }

    /// Number of charts currently showing.
    pub fn live_charts(&self) -> usize {
        self.handles.len()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_renderer(mut self) -> R {
        self.clear();
        let Self { renderer, .. } = self;
        renderer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::summarize;
    use crate::normalize::{normalize_rows, ParseMode};
    use crate::parser::parse_csv;
    use crate::sample::EXAMPLE_CSV;

    /// Records every call so tests can assert the lifecycle.
    #[derive(Default)]
    struct Recorder {
        next_id: usize,
        log: Vec<String>,
    }

    impl ChartRenderer for Recorder {
        type Handle = usize;

        fn render(&mut self, chart: Chart<'_>) -> usize {
            self.next_id += 1;
            self.log.push(format!("render {} #{}", chart.title(), self.next_id));
            self.next_id
        }

        fn dispose(&mut self, handle: usize) {
            self.log.push(format!("dispose #{handle}"));
        }
    }

    fn example_snapshot() -> DashboardSnapshot {
        let mut trades = normalize_rows(&parse_csv(EXAMPLE_CSV), ParseMode::Lenient).unwrap();
        summarize(&mut trades).unwrap()
    }

    #[test]
    fn show_renders_three_charts() {
        let mut board = ChartBoard::new(Recorder::default());
        board.show(Some(&example_snapshot()));
        assert_eq!(board.live_charts(), 3);
        assert_eq!(
            board.renderer().log,
            [
                "render Equity Curve #1",
                "render Daily P/L #2",
                "render Wins vs Losses #3",
            ]
        );
    }

    #[test]
    fn reshow_disposes_before_rendering() {
        let mut board = ChartBoard::new(Recorder::default());
        let snapshot = example_snapshot();
        board.show(Some(&snapshot));
        board.show(Some(&snapshot));
        let log = &board.renderer().log;
        assert_eq!(&log[3..6], ["dispose #1", "dispose #2", "dispose #3"]);
        assert_eq!(board.live_charts(), 3);
    }

    #[test]
    fn idle_state_clears_without_rendering() {
        let mut board = ChartBoard::new(Recorder::default());
        board.show(Some(&example_snapshot()));
        board.show(None);
        assert_eq!(board.live_charts(), 0);
        assert_eq!(board.renderer().log.len(), 6);
    }

    #[test]
    fn into_renderer_disposes_live_charts() {
        let mut board = ChartBoard::new(Recorder::default());
        board.show(Some(&example_snapshot()));
        let recorder = board.into_renderer();
        assert_eq!(recorder.log.last().unwrap(), "dispose #3");
    }
}
