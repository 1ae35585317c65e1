use std::convert::TryFrom;

use unsegen::base::*;
use unsegen::widget::*;

use crate::calendar::{MonthGrid, Quarter};

use super::panel_window::TextLine;
use super::{Context, MonthPane};

/// The three months of a quarter side by side, below the quarter title.
pub struct QuarterWindow<'a> {
    quarter: Quarter,
    grids: Vec<MonthGrid>,
    context: &'a Context<'a>,
}

impl<'a> QuarterWindow<'a> {
    const LEGEND: &'static str = "Domingos y miércoles: grupo de turno (A, B, C)";

    pub fn new(quarter: Quarter, context: &'a Context<'a>) -> Self {
        let grids = quarter
            .months()
            .iter()
            .map(|&month| MonthGrid::new(month, context.year(), context.rotation()))
            .collect();

        QuarterWindow {
            quarter,
            grids,
            context,
        }
    }

    fn as_widget<'w>(&'w self) -> impl Widget + 'w
    where
        'a: 'w,
    {
        let mut months = HLayout::new();
        if let Ok(separator) = GraphemeCluster::try_from(' ') {
            months = months.separator(separator);
        }
        for grid in self.grids.iter() {
            months = months.widget(MonthPane::new(grid, self.context));
        }

        VLayout::new()
            .widget(TextLine::new(
                self.quarter.title(),
                self.context.theme.title_style,
            ))
            .widget(months)
            .widget(TextLine::new(
                Self::LEGEND.to_owned(),
                StyleModifier::default(),
            ))
    }
}

impl Widget for QuarterWindow<'_> {
    fn space_demand(&self) -> Demand2D {
        self.as_widget().space_demand()
    }

    fn draw(&self, window: Window, hints: RenderingHints) {
        self.as_widget().draw(window, hints)
    }
}
