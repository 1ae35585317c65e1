mod app;
mod command;
mod context;
mod month_pane;
mod panel_window;
mod quarter_window;

pub use app::App;
pub use command::{Action, ActionResult, CommandParser};
pub use context::{Context, Mode, Theme};
pub use month_pane::MonthPane;
pub use panel_window::{TextLine, TextPanel};
pub use quarter_window::QuarterWindow;
