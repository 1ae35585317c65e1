use unsegen::base::*;
use unsegen::widget::*;

use crate::calendar::{DayMark, MonthGrid, WEEKDAY_HEADER};
use crate::rotation::Label;

use super::{Context, Theme};

struct DayCell<'a> {
    mark: &'a DayMark,
    is_today: bool,
    theme: &'a Theme,
}

impl<'a> DayCell<'a> {
    fn new(mark: &'a DayMark, theme: &'a Theme) -> Self {
        DayCell {
            mark,
            is_today: false,
            theme,
        }
    }

    fn today(mut self, is_today: bool) -> Self {
        self.is_today = is_today;
        self
    }

    fn style(&self) -> StyleModifier {
        if self.is_today {
            self.theme.today_style
        } else {
            self.mark
                .label
                .map_or(self.theme.day_style, |label| self.theme.label_style(label))
        }
    }

    /// Day number with its label, followed by the today marker.
    fn segments(&self) -> [(String, StyleModifier); 2] {
        let day = format!(
            "{:>2}{}",
            self.mark.day_num(),
            self.mark.label.map_or(' ', Label::as_char)
        );
        let marker = if self.is_today {
            self.theme.today_char
        } else {
            ' '
        };

        [
            (day, self.style()),
            (marker.to_string(), self.theme.day_style),
        ]
    }
}

pub struct MonthPane<'a> {
    grid: &'a MonthGrid,
    context: &'a Context<'a>,
}

impl<'a> MonthPane<'a> {
    const HEADER_ROWS: usize = 2;
    const ROWS: usize = 6;

    pub fn new(grid: &'a MonthGrid, context: &'a Context<'a>) -> Self {
        MonthPane { grid, context }
    }
}

impl Widget for MonthPane<'_> {
    fn space_demand(&self) -> Demand2D {
        Demand2D {
            width: ColDemand::exact(MonthGrid::COLUMNS * MonthGrid::CELL_WIDTH),
            height: RowDemand::exact(Self::HEADER_ROWS + Self::ROWS),
        }
    }

    fn draw(&self, mut window: Window, _hints: RenderingHints) {
        let theme = &self.context.theme;
        let today = self.context.today();

        let mut cursor = Cursor::new(&mut window).style_modifier(theme.month_header_style);
        cursor.write(&format!("{} {}", self.grid.name(), self.grid.year()));
        cursor.wrap_line();

        cursor.set_style_modifier(theme.weekday_style);
        for head in WEEKDAY_HEADER.iter() {
            cursor.write(&format!("{:>2}  ", head));
        }
        cursor.wrap_line();

        for week in self.grid.weeks() {
            for cell in week {
                match cell {
                    Some(mark) => {
                        let cell = DayCell::new(mark, theme).today(mark.date == today);
                        for (text, style) in cell.segments().iter() {
                            cursor.set_style_modifier(*style);
                            cursor.write(text);
                        }
                    }
                    None => {
                        cursor.set_style_modifier(theme.day_style);
                        cursor.write(&" ".repeat(MonthGrid::CELL_WIDTH));
                    }
                }
            }
            cursor.wrap_line();
        }
    }
}
