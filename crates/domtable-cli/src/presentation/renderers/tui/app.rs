use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use domtable_engine::{TOGGLES, Toggle};
use domtable_runtime::{DomainView, MonitorEvent, RefreshOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Toggle(Toggle),
    SelectNext,
    SelectPrevious,
    Refresh,
    Quit,
}

/// Key bindings: F2-F8 (or digits 2-8) flip the filter buttons in order.
/// Raw mode delivers Ctrl-C as a key press, so it quits here.
pub fn action_for(key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    let code = key.code;
    let toggle_slot = match code {
        KeyCode::F(n @ 2..=8) => Some(usize::from(n - 2)),
        KeyCode::Char(c @ '2'..='8') => Some(c as usize - '2' as usize),
        _ => None,
    };
    if let Some(slot) = toggle_slot {
        return TOGGLES.get(slot).copied().map(Action::Toggle);
    }

    match code {
        KeyCode::Down | KeyCode::Char('j') => Some(Action::SelectNext),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::SelectPrevious),
        KeyCode::Char('r') => Some(Action::Refresh),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

pub struct App {
    pub view: DomainView,
    pub selected: usize,
    /// Transient status message (filter flips, watcher errors)
    pub notice: Option<String>,
    /// Set when live updates are unavailable
    pub monitor_warning: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(view: DomainView) -> Self {
        Self {
            view,
            selected: 0,
            notice: None,
            monitor_warning: None,
            should_quit: false,
        }
    }

    pub fn with_monitor_warning(mut self, warning: Option<String>) -> Self {
        self.monitor_warning = warning;
        self
    }

    pub fn visible_count(&self) -> usize {
        self.view.visible_rows().count()
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if let Some(action) = action_for(key) {
            self.apply(action);
        }
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Toggle(toggle) => {
                let hidden = match toggle {
                    Toggle::State(state) => self.view.toggle_state(state),
                    Toggle::Type(vm_type) => self.view.toggle_type(vm_type),
                };
                let verb = if hidden { "hiding" } else { "showing" };
                self.notice = Some(format!("{} {}", verb, toggle.value()));
                self.clamp_selection();
            }
            Action::SelectNext => {
                let count = self.visible_count();
                if count > 0 && self.selected + 1 < count {
                    self.selected += 1;
                }
            }
            Action::SelectPrevious => {
                self.selected = self.selected.saturating_sub(1);
            }
            Action::Refresh => self.refresh(),
            Action::Quit => self.should_quit = true,
        }
    }

    pub fn on_monitor_event(&mut self, event: MonitorEvent) {
        match event {
            MonitorEvent::Changed { .. } => self.refresh(),
            MonitorEvent::Error(msg) => {
                tracing::warn!(error = %msg, "state file watcher reported an error");
                self.notice = Some(msg);
            }
        }
    }

    fn refresh(&mut self) {
        match self.view.refresh() {
            RefreshOutcome::Rebuilt { .. } => self.notice = None,
            RefreshOutcome::Failed(_) => {}
        }
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        let count = self.visible_count();
        if self.selected >= count {
            self.selected = count.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domtable_engine::{ColumnRegistry, Format};
    use domtable_types::{Domains, Label, PowerState, VmRecord};

    fn app() -> App {
        let domains = Domains::new(vec![
            VmRecord::new("sys-net", "AppVM", PowerState::Running, Label::new("red")),
            VmRecord::new("work", "AppVM", PowerState::Running, Label::new("blue")),
            VmRecord::new("fedora-40", "TemplateVM", PowerState::Halted, Label::new("black")),
        ]);
        let columns = ColumnRegistry::new().resolve_all(Format::Simple.columns().iter().copied());
        App::new(DomainView::open(Box::new(domains), columns).unwrap())
    }

    #[test]
    fn test_function_keys_and_digits_map_to_toggles() {
        assert_eq!(
            action_for(KeyCode::F(2).into()),
            Some(Action::Toggle(Toggle::State("Running")))
        );
        assert_eq!(
            action_for(KeyCode::F(8).into()),
            Some(Action::Toggle(Toggle::Type("DispVM")))
        );
        assert_eq!(action_for(KeyCode::Char('4').into()), action_for(KeyCode::F(4).into()));
        assert_eq!(action_for(KeyCode::F(1).into()), None);
        assert_eq!(action_for(KeyCode::F(9).into()), None);
        assert_eq!(action_for(KeyCode::Char('9').into()), None);
        assert_eq!(action_for(KeyCode::Esc.into()), Some(Action::Quit));
    }

    #[test]
    fn test_ctrl_c_quits() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(action_for(ctrl_c), Some(Action::Quit));
        assert_eq!(action_for(KeyCode::Char('c').into()), None);
        assert_eq!(
            action_for(KeyEvent::new(KeyCode::F(2), KeyModifiers::CONTROL)),
            None
        );

        let mut app = app();
        app.handle_key(ctrl_c);
        assert!(app.should_quit);
    }

    #[test]
    fn test_toggle_updates_view_and_notice() {
        let mut app = app();
        assert_eq!(app.visible_count(), 2);

        app.handle_key(KeyCode::F(4).into());
        assert_eq!(app.visible_count(), 3);
        assert_eq!(app.notice.as_deref(), Some("showing Halted"));

        app.handle_key(KeyCode::F(5).into());
        assert_eq!(app.visible_count(), 1);
        assert_eq!(app.notice.as_deref(), Some("hiding AppVM"));
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut app = app();
        app.handle_key(KeyCode::Down.into());
        app.handle_key(KeyCode::Char('j').into());
        assert_eq!(app.selected, 1);

        app.handle_key(KeyCode::F(2).into());
        assert_eq!(app.visible_count(), 0);
        assert_eq!(app.selected, 0);

        app.handle_key(KeyCode::Up.into());
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_change_notification_refreshes() {
        let mut app = app();
        app.on_monitor_event(MonitorEvent::Changed {
            path: "qubes.xml".into(),
        });
        assert_eq!(app.view.generation(), 2);

        app.on_monitor_event(MonitorEvent::Error("inotify limit".to_string()));
        assert_eq!(app.notice.as_deref(), Some("inotify limit"));

        app.handle_key(KeyCode::Char('q').into());
        assert!(app.should_quit);
    }
}
