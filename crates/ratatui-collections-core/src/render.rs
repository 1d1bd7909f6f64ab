//! Turning the visible window of a collection into lines.
//!
//! Rendering is a pure query: it reads items, a window and the selection, and never touches
//! controller state. Calling it twice without an intervening command yields the same lines.

use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use std::ops::Range;

/// Boundary markers shown when rows are hidden above or below the window.
///
/// `{n}` in either template is replaced with the number of hidden rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Indicators {
    pub enabled: bool,
    pub above: String,
    pub below: String,
}

impl Default for Indicators {
    fn default() -> Self {
        Self {
            enabled: true,
            above: "↑ {n} more".to_string(),
            below: "↓ {n} more".to_string(),
        }
    }
}

impl Indicators {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    fn format(template: &str, hidden: usize) -> String {
        template.replace("{n}", &hidden.to_string())
    }
}

#[derive(Clone, Copy, Debug)]
pub struct RenderStyles {
    pub base: Style,
    pub cursor: Style,
    pub indicator: Style,
    pub header: Style,
}

impl Default for RenderStyles {
    fn default() -> Self {
        Self {
            base: Style::default(),
            cursor: Style::default().add_modifier(Modifier::REVERSED),
            indicator: Style::default().add_modifier(Modifier::DIM),
            header: Style::default().add_modifier(Modifier::BOLD),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderedLine {
    Header(String),
    MoreAbove { hidden: usize },
    Item {
        index: usize,
        text: String,
        is_cursor: bool,
    },
    MoreBelow { hidden: usize },
}

impl RenderedLine {
    pub fn is_item(&self) -> bool {
        matches!(self, RenderedLine::Item { .. })
    }

    pub fn to_plain(&self, indicators: &Indicators) -> String {
        match self {
            RenderedLine::Header(text) | RenderedLine::Item { text, .. } => text.clone(),
            RenderedLine::MoreAbove { hidden } => Indicators::format(&indicators.above, *hidden),
            RenderedLine::MoreBelow { hidden } => Indicators::format(&indicators.below, *hidden),
        }
    }

    pub fn to_line(&self, indicators: &Indicators, styles: &RenderStyles) -> Line<'static> {
        let style = match self {
            RenderedLine::Header(_) => styles.base.patch(styles.header),
            RenderedLine::MoreAbove { .. } | RenderedLine::MoreBelow { .. } => {
                styles.base.patch(styles.indicator)
            }
            RenderedLine::Item {
                is_cursor: true, ..
            } => styles.base.patch(styles.cursor),
            RenderedLine::Item { .. } => styles.base,
        };
        Line::from(Span::styled(self.to_plain(indicators), style))
    }
}

/// Emits one [`RenderedLine::Item`] per index in `window`, framed by boundary markers.
///
/// `window` is clamped to `items`, so a stale window never panics.
pub fn render<T, F>(
    items: &[T],
    window: Range<usize>,
    selected: Option<usize>,
    indicators: &Indicators,
    mut format_item: F,
) -> Vec<RenderedLine>
where
    F: FnMut(&T, usize) -> String,
{
    let len = items.len();
    let end = window.end.min(len);
    let start = window.start.min(end);

    let mut out = Vec::with_capacity(end - start + 2);
    if indicators.enabled && start > 0 {
        out.push(RenderedLine::MoreAbove { hidden: start });
    }
    for (index, item) in items[start..end].iter().enumerate().map(|(i, it)| (start + i, it)) {
        out.push(RenderedLine::Item {
            index,
            text: format_item(item, index),
            is_cursor: selected == Some(index),
        });
    }
    if indicators.enabled && end < len {
        out.push(RenderedLine::MoreBelow { hidden: len - end });
    }
    out
}

pub fn to_plain_lines(lines: &[RenderedLine], indicators: &Indicators) -> Vec<String> {
    lines.iter().map(|l| l.to_plain(indicators)).collect()
}

pub fn to_styled_lines(
    lines: &[RenderedLine],
    indicators: &Indicators,
    styles: &RenderStyles,
) -> Vec<Line<'static>> {
    lines.iter().map(|l| l.to_line(indicators, styles)).collect()
}
