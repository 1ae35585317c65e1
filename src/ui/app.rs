use crate::config::Config;
use crate::events::{Dispatcher, Event};
use crate::presenter::Panel;
use crate::rotation::Rotation;

use super::command::CommandParser;
use super::panel_window::{TextLine, TextPanel};
use super::{Context, Mode, QuarterWindow};

use unsegen::base::{StyleModifier, Terminal, Window};
use unsegen::input::{
    Behavior, EditBehavior, Event as InputEvent, Input, Key, Navigatable, NavigateBehavior,
    OperationResult, ScrollBehavior,
};
use unsegen::widget::*;

use crate::calendar::Quarter;

enum PanelWindow<'a> {
    Quarter(QuarterWindow<'a>),
    Text(TextPanel<'a>),
}

impl Widget for PanelWindow<'_> {
    fn space_demand(&self) -> Demand2D {
        match self {
            PanelWindow::Quarter(w) => w.space_demand(),
            PanelWindow::Text(w) => w.space_demand(),
        }
    }

    fn draw(&self, window: Window, hints: RenderingHints) {
        match self {
            PanelWindow::Quarter(w) => w.draw(window, hints),
            PanelWindow::Text(w) => w.draw(window, hints),
        }
    }
}

pub struct App<'a> {
    context: Context<'a>,
}

impl<'a> App<'a> {
    pub fn new(config: &'a Config, rotation: Rotation) -> App<'a> {
        let context = Context::new(config, rotation);
        App { context }
    }

    fn active_panel<'w>(&'w self) -> PanelWindow<'w>
    where
        'a: 'w,
    {
        let state = &self.context.state;
        match state.active_panel() {
            Panel::Calendar(quarter) => {
                PanelWindow::Quarter(QuarterWindow::new(quarter, &self.context))
            }
            panel => PanelWindow::Text(
                TextPanel::new(
                    panel.title(),
                    self.context.panel_lines(panel),
                    &self.context.theme,
                )
                .scroll(state.scroll()),
            ),
        }
    }

    fn bottom_bar<'w>(&'w self) -> impl Widget + 'w {
        let spacer = TextLine::new(" ".to_owned(), StyleModifier::default());

        let mut layout = HLayout::new().widget(spacer);
        if self.context.mode == Mode::Command {
            layout = layout.widget(self.context.command_line.as_widget());
        } else if let Some(message) = &self.context.status_message {
            layout = layout.widget(TextLine::new(
                message.clone(),
                self.context.theme.status_style,
            ));
        }

        layout
    }

    fn as_widget<'w>(&'w self) -> impl Widget + 'w
    where
        'a: 'w,
    {
        VLayout::new()
            .widget(self.active_panel())
            .widget(self.bottom_bar())
    }

    pub fn run(
        &mut self,
        dispatcher: Dispatcher,
        mut term: Terminal,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut run = true;

        while run && !self.context.quit_requested {
            // Handle events
            if let Ok(event) = dispatcher.next() {
                match event {
                    Event::Update => self.context.update(),
                    Event::Resize => log::debug!("Terminal resized"),
                    Event::Input(input) => {
                        if input.matches(Key::Esc) {
                            self.context.mode = Mode::Normal;
                        } else {
                            match self.context.mode {
                                Mode::Normal => {
                                    input
                                        .chain((Key::Char('q'), || run = false))
                                        .chain((Key::Char(':'), || {
                                            self.context.mode = Mode::Command
                                        }))
                                        .chain((Key::Char('i'), || {
                                            self.context.state.set_active_panel(Panel::Home)
                                        }))
                                        .chain((Key::Char('m'), || {
                                            self.context.state.set_active_panel(Panel::Manual)
                                        }))
                                        .chain((Key::Char('p'), || {
                                            self.context.state.set_active_panel(Panel::Pastoreo)
                                        }))
                                        .chain((Key::Char('x'), || {
                                            self.context.state.set_active_panel(Panel::Misiones)
                                        }))
                                        .chain(NavigationKeys(&mut self.context))
                                        .finish();
                                }
                                Mode::Command => {
                                    input
                                        .chain(
                                            EditBehavior::new(&mut self.context.command_line)
                                                .delete_forwards_on(Key::Delete)
                                                .delete_backwards_on(Key::Backspace)
                                                .left_on(Key::Left)
                                                .right_on(Key::Right),
                                        )
                                        .chain(
                                            ScrollBehavior::new(&mut self.context.command_line)
                                                .backwards_on(Key::Up)
                                                .forwards_on(Key::Down),
                                        )
                                        .chain(CommandParser::new(&mut self.context))
                                        .finish();
                                }
                            }
                        }
                    }
                }
            }

            // Draw
            let root = term.create_root_window();
            self.as_widget().draw(root, RenderingHints::new());
            term.present();
        }

        Ok(())
    }
}

/// Number keys `1`-`4` open the corresponding quarter.
struct QuarterKeys<'a, 'c>(&'a mut Context<'c>);

impl Behavior for QuarterKeys<'_, '_> {
    fn input(self, input: Input) -> Option<Input> {
        if let InputEvent::Key(Key::Char(c)) = input.event {
            if let Some(quarter) = c.to_digit(10).and_then(Quarter::from_number) {
                self.0.state.set_active_panel(Panel::Calendar(quarter));
                return None;
            }
        }
        Some(input)
    }
}

/// `1`-`4` select a quarter, `h`/`l` step through quarters and `j`/`k` scroll.
struct NavigationKeys<'a, 'c>(&'a mut Context<'c>);

impl Behavior for NavigationKeys<'_, '_> {
    fn input(self, input: Input) -> Option<Input> {
        let context = self.0;
        let scroll_limit = context.scroll_limit();
        let input = input.chain(QuarterKeys(&mut *context)).finish()?;

        let mut panel = PanelBehaviour(context, scroll_limit);
        input
            .chain(
                NavigateBehavior::new(&mut panel)
                    .down_on(Key::Char('j'))
                    .up_on(Key::Char('k'))
                    .left_on(Key::Char('h'))
                    .right_on(Key::Char('l')),
            )
            .finish()
    }
}

struct PanelBehaviour<'a, 'c>(&'a mut Context<'c>, usize);

impl Navigatable for PanelBehaviour<'_, '_> {
    fn move_down(&mut self) -> OperationResult {
        if self.0.state.scroll_forwards(self.1) {
            Ok(())
        } else {
            Err(())
        }
    }

    fn move_left(&mut self) -> OperationResult {
        if self.0.state.prev_quarter(1) {
            Ok(())
        } else {
            Err(())
        }
    }

    fn move_right(&mut self) -> OperationResult {
        if self.0.state.next_quarter(1) {
            Ok(())
        } else {
            Err(())
        }
    }

    fn move_up(&mut self) -> OperationResult {
        if self.0.state.scroll_backwards() {
            Ok(())
        } else {
            Err(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn key(c: char) -> Input {
        Input {
            event: InputEvent::Key(Key::Char(c)),
            raw: c.to_string().into_bytes(),
        }
    }

    fn press(context: &mut Context, c: char) -> bool {
        key(c).chain(NavigationKeys(context)).finish().is_none()
    }

    fn context(config: &Config) -> Context<'_> {
        let today = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        Context::new(config, config.rotation().unwrap()).with_today(today)
    }

    #[test]
    fn number_keys_open_quarters() {
        let config = Config::default();
        let mut context = context(&config);

        assert!(press(&mut context, '3'));
        assert_eq!(context.state.active_panel(), Panel::Calendar(Quarter::Q3));
        assert!(press(&mut context, '1'));
        assert_eq!(context.state.active_panel(), Panel::Calendar(Quarter::Q1));

        assert!(!press(&mut context, '5'));
        assert!(!press(&mut context, '0'));
        assert_eq!(context.state.active_panel(), Panel::Calendar(Quarter::Q1));
    }

    #[test]
    fn h_and_l_step_quarters() {
        let config = Config::default();
        let mut context = context(&config);
        context.state.set_active_panel(Panel::Calendar(Quarter::Q1));

        assert!(press(&mut context, 'l'));
        assert_eq!(context.state.active_panel(), Panel::Calendar(Quarter::Q2));
        assert!(press(&mut context, 'h'));
        assert!(press(&mut context, 'h'));
        assert_eq!(context.state.active_panel(), Panel::Calendar(Quarter::Q4));
    }

    #[test]
    fn quarter_keys_are_ignored_on_text_panels() {
        let config = Config::default();
        let mut context = context(&config);
        context.state.set_active_panel(Panel::Manual);

        assert!(!press(&mut context, 'l'));
        assert!(!press(&mut context, 'h'));
        assert_eq!(context.state.active_panel(), Panel::Manual);
    }

    #[test]
    fn j_and_k_scroll_within_bounds() {
        let config = Config::default();
        let mut context = context(&config);
        context.state.set_active_panel(Panel::Manual);

        assert!(!press(&mut context, 'k'));
        assert!(press(&mut context, 'j'));
        assert!(press(&mut context, 'j'));
        assert_eq!(context.state.scroll(), 2);
        assert!(press(&mut context, 'k'));
        assert_eq!(context.state.scroll(), 1);

        let limit = context.scroll_limit();
        while press(&mut context, 'j') {}
        assert_eq!(context.state.scroll(), limit);
    }

    #[test]
    fn other_keys_pass_through() {
        let config = Config::default();
        let mut context = context(&config);

        assert!(!press(&mut context, 'z'));
        assert_eq!(context.state.active_panel(), Panel::Home);
    }
}
