use chrono::{Datelike, Local, NaiveDate, Weekday};

use crate::calendar::{month_of, Quarter};
use crate::config::Config;
use crate::error::Result;
use crate::presenter::{Panel, PresenterState};
use crate::rotation::{Label, Rotation};

use unsegen::base::style::*;
use unsegen::widget::builtin::PromptLine;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Command,
}

#[derive(Clone, Debug)]
pub struct Theme {
    pub title_style: StyleModifier,
    pub month_header_style: StyleModifier,
    pub weekday_style: StyleModifier,
    pub day_style: StyleModifier,
    pub today_style: StyleModifier,
    pub today_char: char,
    pub label_styles: [StyleModifier; 3],
    pub status_style: StyleModifier,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            title_style: StyleModifier::new().bold(true),
            month_header_style: StyleModifier::new().fg_color(Color::Yellow),
            weekday_style: StyleModifier::new().bold(true),
            day_style: StyleModifier::default(),
            today_style: StyleModifier::new().invert(true),
            today_char: '*',
            label_styles: [
                StyleModifier::new().fg_color(Color::Green).bold(true),
                StyleModifier::new().fg_color(Color::Cyan).bold(true),
                StyleModifier::new().fg_color(Color::Magenta).bold(true),
            ],
            status_style: StyleModifier::new().fg_color(Color::Red),
        }
    }
}

impl Theme {
    pub fn label_style(&self, label: Label) -> StyleModifier {
        self.label_styles[label.index()]
    }
}

pub struct Context<'a> {
    pub mode: Mode,
    pub theme: Theme,
    pub state: PresenterState,
    pub command_line: PromptLine,
    pub status_message: Option<String>,
    pub quit_requested: bool,
    config: &'a Config,
    rotation: Rotation,
    today: NaiveDate,
}

impl<'a> Context<'a> {
    const UPCOMING_ENTRIES: usize = 12;

    pub fn new(config: &'a Config, rotation: Rotation) -> Self {
        Context {
            mode: Mode::Normal,
            theme: Theme::default(),
            state: PresenterState::default(),
            command_line: PromptLine::with_prompt(":".to_owned()),
            status_message: None,
            quit_requested: false,
            config,
            rotation,
            today: Local::now().date_naive(),
        }
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn update(&mut self) {
        self.today = Local::now().date_naive();
    }

    pub fn year(&self) -> i32 {
        self.config.year
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn rotation(&self) -> &Rotation {
        &self.rotation
    }

    pub fn current_quarter(&self) -> Quarter {
        Quarter::containing(self.today, self.year())
    }

    pub fn select_today(&mut self) {
        let quarter = self.current_quarter();
        self.state.set_active_panel(Panel::Calendar(quarter));
    }

    /// Shows the quarter containing `date` and reports its group in the status line.
    pub fn show_date(&mut self, date: NaiveDate) -> Result<Label> {
        let label = self.rotation.label_of(date)?;

        if date.year() == self.year() {
            self.state
                .set_active_panel(Panel::Calendar(Quarter::of(month_of(date))));
        }
        self.status_message = Some(format!("{}: grupo {}", date, label));

        Ok(label)
    }

    pub fn panel_lines(&self, panel: Panel) -> Vec<String> {
        let texts = &self.config.panels;
        let (text, with_schedule) = match panel {
            Panel::Home => (&texts.home, false),
            Panel::Manual => (&texts.manual, false),
            Panel::Pastoreo => (&texts.pastoreo, true),
            Panel::Misiones => (&texts.misiones, true),
            Panel::Calendar(_) => return Vec::new(),
        };

        let mut lines: Vec<String> = text.lines().map(str::to_owned).collect();
        if with_schedule {
            lines.push(String::new());
            lines.push("Próximos turnos".to_owned());
            lines.extend(self.upcoming_lines());
        }
        lines
    }

    fn upcoming_lines(&self) -> Vec<String> {
        let from = if self.today.year() == self.year() {
            self.today
        } else {
            NaiveDate::from_ymd_opt(self.year(), 1, 1).unwrap_or(self.today)
        };

        self.rotation
            .upcoming(from, Self::UPCOMING_ENTRIES)
            .map(|(date, label)| {
                let weekday = if date.weekday() == Weekday::Sun {
                    "Domingo"
                } else {
                    "Miércoles"
                };
                format!("  {:<10} {}  {}", weekday, date.format("%d/%m/%Y"), label)
            })
            .collect()
    }

    /// Largest useful scroll offset for the active panel.
    pub fn scroll_limit(&self) -> usize {
        self.panel_lines(self.state.active_panel())
            .len()
            .saturating_sub(1)
    }

    pub fn report_error<E: std::fmt::Display>(&mut self, error: E) {
        log::warn!("{}", error);
        self.status_message = Some(error.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn context(config: &Config) -> Context<'_> {
        Context::new(config, config.rotation().unwrap()).with_today(ymd(2026, 5, 13))
    }

    #[test]
    fn today_selects_its_quarter() {
        let config = Config::default();
        let mut context = context(&config);
        context.select_today();
        assert_eq!(context.state.active_panel(), Panel::Calendar(Quarter::Q2));

        let mut context = context.with_today(ymd(2031, 8, 1));
        context.select_today();
        assert_eq!(context.state.active_panel(), Panel::Calendar(Quarter::Q1));
    }

    #[test]
    fn show_date_switches_quarter() {
        let config = Config::default();
        let mut context = context(&config);

        assert_eq!(context.show_date(ymd(2026, 10, 4)).unwrap(), Label::A);
        assert_eq!(context.state.active_panel(), Panel::Calendar(Quarter::Q4));
        assert!(context.status_message.as_deref().unwrap().starts_with("2026-10-04"));
    }

    #[test]
    fn show_date_rejects_other_weekdays() {
        let config = Config::default();
        let mut context = context(&config);

        let err = context.show_date(ymd(2026, 10, 5)).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidWeekday));
        assert_eq!(context.state.active_panel(), Panel::Home);
    }

    #[test]
    fn topic_panels_list_upcoming_turns() {
        let config = Config::default();
        let context = context(&config);

        let lines = context.panel_lines(Panel::Pastoreo);
        let schedule: Vec<&String> = lines
            .iter()
            .skip_while(|l| l.as_str() != "Próximos turnos")
            .skip(1)
            .collect();

        assert_eq!(schedule.len(), Context::UPCOMING_ENTRIES);
        assert!(schedule[0].contains("13/05/2026"));
        assert!(schedule[0].starts_with("  Miércoles"));
        assert!(context.panel_lines(Panel::Calendar(Quarter::Q1)).is_empty());
    }
}
