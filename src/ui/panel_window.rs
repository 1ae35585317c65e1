use unsegen::base::*;
use unsegen::widget::*;

use super::Theme;

/// A single styled line of text.
pub struct TextLine {
    text: String,
    style: StyleModifier,
}

impl TextLine {
    pub fn new(text: String, style: StyleModifier) -> Self {
        TextLine { text, style }
    }
}

impl Widget for TextLine {
    fn space_demand(&self) -> Demand2D {
        Demand2D {
            width: ColDemand::at_least(self.text.chars().count()),
            height: RowDemand::exact(1),
        }
    }

    fn draw(&self, mut window: Window, _hints: RenderingHints) {
        let mut cursor = Cursor::new(&mut window).style_modifier(self.style);
        cursor.write(&self.text);
    }
}

/// Static text panel with a title, scrolled by whole lines.
pub struct TextPanel<'a> {
    title: String,
    lines: Vec<String>,
    scroll: usize,
    theme: &'a Theme,
}

impl<'a> TextPanel<'a> {
    pub fn new(title: String, lines: Vec<String>, theme: &'a Theme) -> Self {
        TextPanel {
            title,
            lines,
            scroll: 0,
            theme,
        }
    }

    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }
}

impl Widget for TextPanel<'_> {
    fn space_demand(&self) -> Demand2D {
        let width = self
            .lines
            .iter()
            .map(|l| l.chars().count())
            .chain(std::iter::once(self.title.chars().count()))
            .max()
            .unwrap_or(0);

        Demand2D {
            width: ColDemand::at_least(width),
            height: RowDemand::at_least(2),
        }
    }

    fn draw(&self, mut window: Window, _hints: RenderingHints) {
        let mut cursor = Cursor::new(&mut window)
            .wrapping_mode(WrappingMode::Wrap)
            .style_modifier(self.theme.title_style);
        cursor.write(&self.title);
        cursor.wrap_line();
        cursor.wrap_line();

        cursor.set_style_modifier(StyleModifier::default());
        for line in self.lines.iter().skip(self.scroll) {
            cursor.write(line);
            cursor.wrap_line();
        }
    }
}
