//! Weekly A/B/C group rotation.
//!
//! Every Sunday starts a new rotation week. The label of a week advances by one
//! step per week counted from a fixed [`AnchorPoint`] and wraps around after three
//! weeks. Wednesdays belong to the week of the Sunday three days before them.

use chrono::{Datelike, NaiveDate, Weekday};
use serde_with::DeserializeFromStr;
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, ErrorKind, Result};

pub const PRIMARY_WEEKDAY: Weekday = Weekday::Sun;
pub const SECONDARY_WEEKDAY: Weekday = Weekday::Wed;
pub const ROTATION_PERIOD_WEEKS: i64 = 3;

const SECONDARY_OFFSET_DAYS: i64 = 3;
const DAYS_PER_WEEK: i64 = 7;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, DeserializeFromStr)]
pub enum Label {
    A,
    B,
    C,
}

impl Label {
    pub const ALL: [Label; 3] = [Label::A, Label::B, Label::C];

    pub fn index(self) -> usize {
        match self {
            Label::A => 0,
            Label::B => 1,
            Label::C => 2,
        }
    }

    /// Maps any signed index onto the cycle, so `-1` is `C`.
    pub fn from_index(index: i64) -> Self {
        Self::ALL[index.rem_euclid(ROTATION_PERIOD_WEEKS) as usize]
    }

    pub fn as_char(self) -> char {
        match self {
            Label::A => 'A',
            Label::B => 'B',
            Label::C => 'C',
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Label {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "A" | "a" => Ok(Label::A),
            "B" | "b" => Ok(Label::B),
            "C" | "c" => Ok(Label::C),
            other => Err(Error::new(
                ErrorKind::LabelParse,
                &format!("'{}' is not one of A, B, C", other),
            )),
        }
    }
}

/// A Sunday with a known label, defining week 0 of the rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnchorPoint {
    date: NaiveDate,
    label: Label,
}

impl AnchorPoint {
    pub fn new(date: NaiveDate, label: Label) -> Result<Self> {
        if date.weekday() != PRIMARY_WEEKDAY {
            return Err(Error::from(ErrorKind::AnchorWeekday)
                .with_msg(&format!("{} is a {:?}", date, date.weekday())));
        }

        Ok(AnchorPoint { date, label })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn label(&self) -> Label {
        self.label
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RotationKind {
    Primary,
    Secondary,
}

/// A date the rotation is defined for. Only [`RotationDate::classify`] and
/// `TryFrom<NaiveDate>` build one, so the kind always matches the weekday.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RotationDate {
    kind: RotationKind,
    date: NaiveDate,
}

impl RotationDate {
    pub fn classify(date: NaiveDate) -> Option<Self> {
        let kind = match date.weekday() {
            PRIMARY_WEEKDAY => RotationKind::Primary,
            SECONDARY_WEEKDAY => RotationKind::Secondary,
            _ => return None,
        };
        Some(RotationDate { kind, date })
    }

    pub fn kind(&self) -> RotationKind {
        self.kind
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// The Sunday whose week this date belongs to.
    pub fn primary_date(&self) -> NaiveDate {
        match self.kind {
            RotationKind::Primary => self.date,
            RotationKind::Secondary => self.date - chrono::Duration::days(SECONDARY_OFFSET_DAYS),
        }
    }
}

impl TryFrom<NaiveDate> for RotationDate {
    type Error = Error;

    fn try_from(date: NaiveDate) -> Result<Self> {
        RotationDate::classify(date).ok_or_else(|| {
            Error::from(ErrorKind::InvalidWeekday)
                .with_msg(&format!("{} is a {:?}", date, date.weekday()))
        })
    }
}

fn day_ordinal(date: NaiveDate) -> i64 {
    date.num_days_from_ce() as i64
}

/// Whole weeks in `days`, rounded to the nearest week.
fn weeks_rounded(days: i64) -> i64 {
    (days + DAYS_PER_WEEK / 2).div_euclid(DAYS_PER_WEEK)
}

pub fn resolve(date: RotationDate, anchor: &AnchorPoint) -> Label {
    // Both ends are Sundays, the offset is a whole number of weeks.
    let offset = day_ordinal(date.primary_date()) - day_ordinal(anchor.date());

    Label::from_index(anchor.label().index() as i64 + weeks_rounded(offset))
}

/// Like [`resolve`], but rejects dates that are neither Sunday nor Wednesday.
pub fn resolve_date(date: NaiveDate, anchor: &AnchorPoint) -> Result<Label> {
    Ok(resolve(RotationDate::try_from(date)?, anchor))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rotation {
    anchor: AnchorPoint,
}

impl Rotation {
    pub fn new(anchor: AnchorPoint) -> Self {
        Rotation { anchor }
    }

    pub fn label_of(&self, date: NaiveDate) -> Result<Label> {
        resolve_date(date, &self.anchor)
    }

    pub fn label_for(&self, date: NaiveDate) -> Option<Label> {
        RotationDate::classify(date).map(|d| resolve(d, &self.anchor))
    }

    /// The next `count` rotation dates starting at `from` (inclusive).
    pub fn upcoming(
        &self,
        from: NaiveDate,
        count: usize,
    ) -> impl Iterator<Item = (NaiveDate, Label)> + '_ {
        from.iter_days()
            .filter_map(move |date| self.label_for(date).map(|label| (date, label)))
            .take(count)
    }
}
