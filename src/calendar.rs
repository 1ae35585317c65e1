use chrono::{Datelike, Month, NaiveDate};
use derive_more::Constructor;
use itertools::Itertools;
use std::fmt;

use crate::rotation::{Label, Rotation};

pub const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

const MONTH_NAMES: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

/// Week starts on Sunday.
pub const WEEKDAY_HEADER: [&str; 7] = ["D", "L", "M", "M", "J", "V", "S"];

pub fn month_name(month: Month) -> &'static str {
    MONTH_NAMES[month.number_from_month() as usize - 1]
}

pub fn month_of<T: Datelike>(date: T) -> Month {
    MONTHS[date.month0() as usize]
}

pub fn days_of_month(month: Month, year: i32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month.number_from_month(), 1);
    let next = if month == Month::December {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month.number_from_month() + 1, 1)
    };

    match (first, next) {
        (Some(first), Some(next)) => next.signed_duration_since(first).num_days() as u32,
        _ => 0,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    pub const ALL: [Quarter; 4] = [Quarter::Q1, Quarter::Q2, Quarter::Q3, Quarter::Q4];

    pub fn from_number(number: u32) -> Option<Self> {
        match number {
            1..=4 => Some(Self::ALL[number as usize - 1]),
            _ => None,
        }
    }

    pub fn of(month: Month) -> Self {
        Self::ALL[(month.number_from_month() as usize - 1) / 3]
    }

    /// Quarter of `date` within `year`; dates of other years fall back to Q1.
    pub fn containing(date: NaiveDate, year: i32) -> Self {
        if date.year() == year {
            Self::of(month_of(date))
        } else {
            Quarter::Q1
        }
    }

    pub fn number(self) -> u32 {
        match self {
            Quarter::Q1 => 1,
            Quarter::Q2 => 2,
            Quarter::Q3 => 3,
            Quarter::Q4 => 4,
        }
    }

    pub fn months(self) -> [Month; 3] {
        let first = (self.number() as usize - 1) * 3;
        [MONTHS[first], MONTHS[first + 1], MONTHS[first + 2]]
    }

    pub fn name(self) -> &'static str {
        match self {
            Quarter::Q1 => "Q1",
            Quarter::Q2 => "Q2",
            Quarter::Q3 => "Q3",
            Quarter::Q4 => "Q4",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Quarter::Q1 => "ENERO – MARZO",
            Quarter::Q2 => "ABRIL – JUNIO",
            Quarter::Q3 => "JULIO – SEPTIEMBRE",
            Quarter::Q4 => "OCTUBRE – DICIEMBRE",
        }
    }

    pub fn title(self) -> String {
        format!("{}: {}", self.name(), self.label())
    }

    pub fn succ(self) -> Self {
        Self::ALL[self.number() as usize % 4]
    }

    pub fn pred(self) -> Self {
        Self::ALL[(self.number() as usize + 2) % 4]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Constructor)]
pub struct DayMark {
    pub date: NaiveDate,
    pub label: Option<Label>,
}

impl DayMark {
    pub fn day_num(&self) -> u32 {
        self.date.day()
    }
}

#[derive(Clone, Debug)]
pub struct MonthGrid {
    month: Month,
    year: i32,
    offset: usize,
    days: Vec<DayMark>,
}

impl MonthGrid {
    pub const COLUMNS: usize = 7;
    pub const CELL_WIDTH: usize = 4;

    pub fn new(month: Month, year: i32, rotation: &Rotation) -> Self {
        let days: Vec<DayMark> = (1..=days_of_month(month, year))
            .filter_map(|day| NaiveDate::from_ymd_opt(year, month.number_from_month(), day))
            .map(|date| DayMark::new(date, rotation.label_for(date)))
            .collect();

        let offset = days
            .first()
            .map_or(0, |d| d.date.weekday().num_days_from_sunday() as usize);

        MonthGrid {
            month,
            year,
            offset,
            days,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn name(&self) -> &'static str {
        month_name(self.month)
    }

    /// Number of empty cells before the 1st.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn days(&self) -> &[DayMark] {
        &self.days
    }

    pub fn day(&self, day: u32) -> Option<&DayMark> {
        self.days.get((day as usize).checked_sub(1)?)
    }

    /// Rows of seven cells, Sunday first. The last row is padded with `None`.
    pub fn weeks(&self) -> Vec<Vec<Option<&DayMark>>> {
        let cells = std::iter::repeat(None)
            .take(self.offset)
            .chain(self.days.iter().map(Some))
            .chunks(Self::COLUMNS);

        (&cells)
            .into_iter()
            .map(|week| {
                let mut week = week.collect_vec();
                week.resize(Self::COLUMNS, None);
                week
            })
            .collect()
    }
}

impl fmt::Display for MonthGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.name(), self.year)?;

        let header = WEEKDAY_HEADER
            .iter()
            .map(|h| format!("{:>2}  ", h))
            .join("");
        writeln!(f, "{}", header.trim_end())?;

        for week in self.weeks() {
            let line = week
                .iter()
                .map(|cell| match cell {
                    Some(mark) => format!(
                        "{:>2}{} ",
                        mark.day_num(),
                        mark.label.map_or(' ', Label::as_char)
                    ),
                    None => " ".repeat(Self::CELL_WIDTH),
                })
                .join("");
            writeln!(f, "{}", line.trim_end())?;
        }

        Ok(())
    }
}
