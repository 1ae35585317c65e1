use chrono::NaiveDate;
use nom::{
    character::complete::{alpha1, digit0, space0, space1},
    combinator::{all_consuming, rest},
    sequence::{preceded, tuple},
    IResult,
};
use phf::phf_map;
use unsegen::input::*;

use super::context::{Context, Mode};
use crate::calendar::Quarter;
use crate::error::{Error, ErrorKind, Result};
use crate::presenter::Panel;

pub type ActionResult = Result<()>;

pub enum Action {
    Arg(fn(&mut Context, &str) -> ActionResult),
    NoArg(fn(&mut Context) -> ActionResult),
    Repeatable(fn(&mut Context, u32) -> ActionResult),
}

static PANELS: phf::Map<&'static str, Panel> = phf_map! {
    "inicio" => Panel::Home,
    "manual" => Panel::Manual,
    "pastoreo" => Panel::Pastoreo,
    "misiones" => Panel::Misiones,
};

const COMMANDS: &[(&str, Action)] = &[
    ("t", Action::Arg(select_quarter)),
    ("trimestre", Action::Arg(select_quarter)),
    (
        "sig",
        Action::Repeatable(|c, n| step_quarter(c, n, true)),
    ),
    (
        "ant",
        Action::Repeatable(|c, n| step_quarter(c, n, false)),
    ),
    (
        "hoy",
        Action::NoArg(|c| {
            c.select_today();
            Ok(())
        }),
    ),
    (
        "fecha",
        Action::Arg(|c, arg| {
            let date = arg.parse::<NaiveDate>()?;
            c.show_date(date).map(|_| ())
        }),
    ),
    (
        "salir",
        Action::NoArg(|c| {
            c.quit_requested = true;
            Ok(())
        }),
    ),
];

fn select_quarter(context: &mut Context, arg: &str) -> ActionResult {
    let quarter = arg
        .parse::<u32>()
        .ok()
        .and_then(Quarter::from_number)
        .ok_or_else(|| {
            Error::new(
                ErrorKind::CommandParse,
                &format!("'{}' is not a quarter (1-4)", arg),
            )
        })?;

    context.state.set_active_panel(Panel::Calendar(quarter));
    Ok(())
}

fn step_quarter(context: &mut Context, n: u32, forwards: bool) -> ActionResult {
    let moved = if forwards {
        context.state.next_quarter(n)
    } else {
        context.state.prev_quarter(n)
    };

    if moved {
        Ok(())
    } else {
        Err(Error::new(ErrorKind::CommandParse, "no quarter is shown"))
    }
}

fn command_name(input: &str) -> IResult<&str, (&str, &str)> {
    preceded(space0, tuple((digit0, alpha1)))(input)
}

fn argument(input: &str) -> IResult<&str, &str> {
    all_consuming(preceded(space1, rest))(input)
}

fn end(input: &str) -> IResult<&str, &str> {
    all_consuming(space0)(input)
}

pub struct CommandParser<'a, 'c> {
    context: &'a mut Context<'c>,
}

impl<'a, 'c> CommandParser<'a, 'c> {
    pub fn new(context: &'a mut Context<'c>) -> Self {
        CommandParser { context }
    }

    pub fn run_command(&mut self, cmd: &str) -> ActionResult {
        let (args, (repeat, name)) = command_name(cmd)?;

        if let Some(panel) = PANELS.get(name) {
            if !repeat.is_empty() {
                return Err(Error::new(
                    ErrorKind::CommandParse,
                    &format!("'{}' cannot be repeated", name),
                ));
            }
            end(args)?;
            self.context.state.set_active_panel(*panel);
            return Ok(());
        }

        let action = COMMANDS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, act)| act)
            .ok_or_else(|| {
                Error::new(
                    ErrorKind::CommandParse,
                    &format!("unknown command '{}'", name),
                )
            })?;

        match action {
            Action::Repeatable(act) => {
                end(args)?;
                let repeats = if repeat.is_empty() {
                    1
                } else {
                    repeat.parse::<u32>().map_err(|e| {
                        Error::new(ErrorKind::CommandParse, &format!("'{}': {}", repeat, e))
                    })?
                };
                act(self.context, repeats)
            }
            _ if !repeat.is_empty() => Err(Error::new(
                ErrorKind::CommandParse,
                &format!("'{}' cannot be repeated", name),
            )),
            Action::Arg(act) => {
                let (_, arg) = argument(args)?;
                act(self.context, arg.trim())
            }
            Action::NoArg(act) => {
                end(args)?;
                act(self.context)
            }
        }
    }
}

impl Behavior for CommandParser<'_, '_> {
    fn input(mut self, input: Input) -> Option<Input> {
        if let Event::Key(Key::Char('\n')) = input.event {
            let cmd = self.context.command_line.finish_line().to_owned();
            self.context.mode = Mode::Normal;
            self.context.status_message = None;

            match self.run_command(&cmd) {
                Ok(()) => log::debug!("Executed command '{}'", cmd),
                Err(e) => self.context.report_error(e),
            }
            None
        } else {
            Some(input)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::rotation::Label;

    fn context(config: &Config) -> Context<'_> {
        let today = NaiveDate::from_ymd_opt(2026, 8, 2).unwrap();
        Context::new(config, config.rotation().unwrap()).with_today(today)
    }

    fn run(context: &mut Context, cmd: &str) -> ActionResult {
        CommandParser::new(context).run_command(cmd)
    }

    #[test]
    fn panel_commands() {
        let config = Config::default();
        let mut context = context(&config);

        run(&mut context, "manual").unwrap();
        assert_eq!(context.state.active_panel(), Panel::Manual);
        run(&mut context, " misiones ").unwrap();
        assert_eq!(context.state.active_panel(), Panel::Misiones);
        run(&mut context, "pastoreo").unwrap();
        assert_eq!(context.state.active_panel(), Panel::Pastoreo);
        run(&mut context, "inicio").unwrap();
        assert_eq!(context.state.active_panel(), Panel::Home);
    }

    #[test]
    fn quarter_commands() {
        let config = Config::default();
        let mut context = context(&config);

        run(&mut context, "t 3").unwrap();
        assert_eq!(context.state.active_panel(), Panel::Calendar(Quarter::Q3));
        run(&mut context, "trimestre 4").unwrap();
        assert_eq!(context.state.active_panel(), Panel::Calendar(Quarter::Q4));
        run(&mut context, "2sig").unwrap();
        assert_eq!(context.state.active_panel(), Panel::Calendar(Quarter::Q2));
        run(&mut context, "ant").unwrap();
        assert_eq!(context.state.active_panel(), Panel::Calendar(Quarter::Q1));

        assert!(run(&mut context, "t 5").is_err());
        assert!(run(&mut context, "t").is_err());
        assert_eq!(context.state.active_panel(), Panel::Calendar(Quarter::Q1));
    }

    #[test]
    fn stepping_needs_a_quarter() {
        let config = Config::default();
        let mut context = context(&config);

        let err = run(&mut context, "sig").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::CommandParse));
        assert_eq!(context.state.active_panel(), Panel::Home);
    }

    #[test]
    fn today_and_date() {
        let config = Config::default();
        let mut context = context(&config);

        run(&mut context, "hoy").unwrap();
        assert_eq!(context.state.active_panel(), Panel::Calendar(Quarter::Q3));

        run(&mut context, "fecha 2026-01-07").unwrap();
        assert_eq!(context.state.active_panel(), Panel::Calendar(Quarter::Q1));
        assert_eq!(
            context.status_message.as_deref(),
            Some(format!("2026-01-07: grupo {}", Label::A).as_str())
        );

        let err = run(&mut context, "fecha 2026-01-08").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidWeekday));

        let err = run(&mut context, "fecha mañana").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::DateParse));
    }

    #[test]
    fn invalid_commands() {
        let config = Config::default();
        let mut context = context(&config);

        assert!(run(&mut context, "").is_err());
        assert!(run(&mut context, "foo").is_err());
        assert!(run(&mut context, "2manual").is_err());
        assert!(run(&mut context, "manual extra").is_err());
        assert!(run(&mut context, "3hoy").is_err());
        assert_eq!(context.state.active_panel(), Panel::Home);
    }

    #[test]
    fn quit() {
        let config = Config::default();
        let mut context = context(&config);

        run(&mut context, "salir").unwrap();
        assert!(context.quit_requested);
    }
}
