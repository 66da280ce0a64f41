// App state and main event loop.
// Manages tabs, the repository list selection, and keyboard input handling.

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::prelude::*;
use ratatui::widgets::ListState;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::state::{RepoCacheHandle, RepoState};
use crate::ui::{self, Theme};

/// Active tab in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    Profile,
    Experience,
    #[default]
    Projects,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Profile, Tab::Experience, Tab::Projects];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Profile => "Profile",
            Tab::Experience => "Experience",
            Tab::Projects => "Projects",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Tab::Profile => Tab::Experience,
            Tab::Experience => Tab::Projects,
            Tab::Projects => Tab::Profile,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Tab::Profile => Tab::Projects,
            Tab::Experience => Tab::Profile,
            Tab::Projects => Tab::Experience,
        }
    }
}

/// Main application state.
pub struct App {
    /// Currently active tab.
    pub active_tab: Tab,
    /// Latest repository state received from the cache.
    pub repos: RepoState,
    /// Selection in the repository list.
    pub repo_list: ListState,
    pub theme: Theme,
    /// Account whose repositories are listed.
    pub account: String,
    /// Whether the app should exit.
    pub should_quit: bool,
    cache: RepoCacheHandle,
    updates: watch::Receiver<RepoState>,
    /// Pending user-triggered refresh; drives the refresh indicator.
    refreshing: Option<JoinHandle<()>>,
}

impl App {
    pub fn new(cache: RepoCacheHandle, account: impl Into<String>, theme: Theme) -> Self {
        let updates = cache.subscribe();
        Self {
            active_tab: Tab::default(),
            repos: RepoState::default(),
            repo_list: ListState::default(),
            theme,
            account: account.into(),
            should_quit: false,
            cache,
            updates,
            refreshing: None,
        }
    }

    /// Main event loop. Must be called from within a tokio runtime.
    pub fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> io::Result<()> {
        self.start_load();
        while !self.should_quit {
            self.sync_repos();
            terminal.draw(|frame| ui::draw(frame, self))?;
            self.handle_events()?;
        }
        Ok(())
    }

    /// Kick off the initial cache load in the background.
    pub fn start_load(&self) {
        let cache = self.cache.clone();
        tokio::spawn(async move { cache.load().await });
    }

    /// Force a refresh unless one is already pending.
    pub fn start_refresh(&mut self) {
        if self.is_refreshing() {
            return;
        }
        let cache = self.cache.clone();
        self.refreshing = Some(tokio::spawn(async move { cache.refresh().await }));
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    /// Pull the latest published state and keep the selection in range.
    pub fn sync_repos(&mut self) {
        if self.updates.has_changed().unwrap_or(false) {
            self.repos = self.updates.borrow_and_update().clone();
        }

        if self.refreshing.as_ref().is_some_and(|task| task.is_finished()) {
            self.refreshing = None;
        }

        let len = self.repos.repos.len();
        match self.repo_list.selected() {
            _ if len == 0 => self.repo_list.select(None),
            None => self.repo_list.select(Some(0)),
            Some(i) if i >= len => self.repo_list.select(Some(len - 1)),
            Some(_) => {}
        }
    }

    /// The repository under the cursor.
    pub fn selected_repo(&self) -> Option<&crate::github::Repository> {
        self.repo_list
            .selected()
            .and_then(|i| self.repos.repos.get(i))
    }

    /// Handle keyboard and other events.
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key.code);
                }
            }
        }
        Ok(())
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::Right => self.active_tab = self.active_tab.next(),
            KeyCode::BackTab | KeyCode::Left => self.active_tab = self.active_tab.prev(),
            KeyCode::Char('t') => self.theme = self.theme.toggle(),
            KeyCode::Char('r') if self.active_tab == Tab::Projects => self.start_refresh(),
            KeyCode::Char('j') | KeyCode::Down if self.active_tab == Tab::Projects => {
                self.select_next()
            }
            KeyCode::Char('k') | KeyCode::Up if self.active_tab == Tab::Projects => {
                self.select_prev()
            }
            _ => {}
        }
    }

    fn select_next(&mut self) {
        let len = self.repos.repos.len();
        if len == 0 {
            return;
        }
        let i = self
            .repo_list
            .selected()
            .map_or(0, |i| (i + 1).min(len - 1));
        self.repo_list.select(Some(i));
    }

    fn select_prev(&mut self) {
        if self.repos.repos.is_empty() {
            return;
        }
        let i = self
            .repo_list
            .selected()
            .map_or(0, |i| i.saturating_sub(1));
        self.repo_list.select(Some(i));
    }
}
