use crate::calendar::Quarter;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Panel {
    Home,
    Calendar(Quarter),
    Manual,
    Pastoreo,
    Misiones,
}

impl Panel {
    pub fn title(&self) -> String {
        match self {
            Panel::Home => "Inicio".to_owned(),
            Panel::Calendar(quarter) => quarter.title(),
            Panel::Manual => "Manual".to_owned(),
            Panel::Pastoreo => "Pastoreo".to_owned(),
            Panel::Misiones => "Misiones".to_owned(),
        }
    }
}

impl Default for Panel {
    fn default() -> Self {
        Panel::Home
    }
}

/// Which panel is visible and how far it is scrolled.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PresenterState {
    active_panel: Panel,
    scroll: usize,
}

impl PresenterState {
    pub fn new(active_panel: Panel) -> Self {
        PresenterState {
            active_panel,
            scroll: 0,
        }
    }

    pub fn active_panel(&self) -> Panel {
        self.active_panel
    }

    pub fn is_active(&self, panel: Panel) -> bool {
        self.active_panel == panel
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Switches to `panel` and scrolls back to the top.
    pub fn set_active_panel(&mut self, panel: Panel) {
        log::debug!("switching panel {:?} -> {:?}", self.active_panel, panel);
        self.active_panel = panel;
        self.scroll = 0;
    }

    pub fn scroll_forwards(&mut self, max: usize) -> bool {
        if self.scroll < max {
            self.scroll += 1;
            true
        } else {
            false
        }
    }

    pub fn scroll_backwards(&mut self) -> bool {
        if self.scroll > 0 {
            self.scroll -= 1;
            true
        } else {
            false
        }
    }

    pub fn next_quarter(&mut self, n: u32) -> bool {
        self.step_quarter(n, Quarter::succ)
    }

    pub fn prev_quarter(&mut self, n: u32) -> bool {
        self.step_quarter(n, Quarter::pred)
    }

    fn step_quarter(&mut self, n: u32, step: fn(Quarter) -> Quarter) -> bool {
        if let Panel::Calendar(quarter) = self.active_panel {
            // Four steps always lead back to the same quarter.
            let target = (0..n % 4).fold(quarter, |q, _| step(q));
            self.set_active_panel(Panel::Calendar(target));
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_home() {
        let state = PresenterState::default();
        assert_eq!(state.active_panel(), Panel::Home);
        assert_eq!(state.scroll(), 0);
    }

    #[test]
    fn exactly_one_panel_active() {
        let mut state = PresenterState::default();
        state.set_active_panel(Panel::Manual);

        let all = [
            Panel::Home,
            Panel::Calendar(Quarter::Q1),
            Panel::Calendar(Quarter::Q2),
            Panel::Manual,
            Panel::Pastoreo,
            Panel::Misiones,
        ];
        assert_eq!(all.iter().filter(|p| state.is_active(**p)).count(), 1);
        assert!(state.is_active(Panel::Manual));
    }

    #[test]
    fn switching_resets_scroll() {
        let mut state = PresenterState::new(Panel::Manual);
        assert!(state.scroll_forwards(5));
        assert!(state.scroll_forwards(5));
        assert_eq!(state.scroll(), 2);

        state.set_active_panel(Panel::Pastoreo);
        assert_eq!(state.scroll(), 0);
    }

    #[test]
    fn scrolling_is_bounded() {
        let mut state = PresenterState::new(Panel::Manual);
        assert!(!state.scroll_backwards());
        assert!(state.scroll_forwards(1));
        assert!(!state.scroll_forwards(1));
        assert_eq!(state.scroll(), 1);
    }

    #[test]
    fn quarter_navigation_wraps() {
        let mut state = PresenterState::new(Panel::Calendar(Quarter::Q4));
        assert!(state.next_quarter(1));
        assert_eq!(state.active_panel(), Panel::Calendar(Quarter::Q1));

        assert!(state.prev_quarter(2));
        assert_eq!(state.active_panel(), Panel::Calendar(Quarter::Q3));

        state.set_active_panel(Panel::Home);
        assert!(!state.next_quarter(1));
        assert_eq!(state.active_panel(), Panel::Home);
    }

    #[test]
    fn huge_repeat_counts_reduce_to_a_few_steps() {
        let mut state = PresenterState::new(Panel::Calendar(Quarter::Q1));
        assert!(state.next_quarter(u32::MAX));
        assert_eq!(state.active_panel(), Panel::Calendar(Quarter::Q4));

        assert!(state.prev_quarter(u32::MAX));
        assert_eq!(state.active_panel(), Panel::Calendar(Quarter::Q1));

        assert!(state.next_quarter(8));
        assert_eq!(state.active_panel(), Panel::Calendar(Quarter::Q1));
    }
}
