//! TUI application state and logic

use anyhow::{anyhow, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;

use super::event::{Event, EventHandler};
use super::ui::Terminal;
use super::utils::{nearest_in_heading, Heading};
use super::views;
use crate::domain::{GameStatus, NailId, PlacementResult, Removal, Session};
use crate::levels;

/// Popup drawn over the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    None,
    Help,
    LevelSelect,
}

/// Application state
pub struct App {
    /// Level being played
    session: Session,

    /// Nail under the cursor
    selected: Option<NailId>,

    /// Open popup, if any
    overlay: Overlay,

    /// Highlighted row in the level selector (0-based)
    level_cursor: usize,

    /// Status message to display
    status_message: Option<String>,

    /// Whether to quit
    should_quit: bool,
}

fn load_session(number: u32) -> Result<Session> {
    let level = levels::get(number).ok_or_else(|| {
        anyhow!(
            "Level {} does not exist (levels are numbered 1-{})",
            number,
            levels::count()
        )
    })?;
    Ok(Session::new(level)?)
}

impl App {
    /// Create the app on the given level
    pub fn new(level: u32, show_help: bool) -> Result<Self> {
        let mut app = Self {
            session: load_session(level)?,
            selected: None,
            overlay: if show_help { Overlay::Help } else { Overlay::None },
            level_cursor: 0,
            status_message: None,
            should_quit: false,
        };
        app.reset_cursor();
        Ok(app)
    }

    /// Run the main loop
    pub fn run(&mut self, terminal: &mut Terminal, events: EventHandler) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;

            match events.next()? {
                Event::Key(key) => self.handle_key(key)?,
                Event::Resize | Event::Tick => {}
            }
        }

        Ok(())
    }

    fn draw(&self, frame: &mut Frame) {
        views::draw(frame, self);
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return Ok(());
        }

        match self.overlay {
            Overlay::None => self.handle_game_key(key),
            Overlay::Help => {
                self.handle_help_key(key);
                Ok(())
            }
            Overlay::LevelSelect => self.handle_level_select_key(key),
        }
    }

    fn handle_game_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,

            KeyCode::Char('k') | KeyCode::Up => self.move_cursor(Heading::Up),
            KeyCode::Char('j') | KeyCode::Down => self.move_cursor(Heading::Down),
            KeyCode::Char('h') | KeyCode::Left => self.move_cursor(Heading::Left),
            KeyCode::Char('l') | KeyCode::Right => self.move_cursor(Heading::Right),
            KeyCode::Tab => self.select_next_removable(),

            KeyCode::Enter | KeyCode::Char(' ') => self.remove_selected(),
            KeyCode::Char('a') => self.add_stack(),

            KeyCode::Char('n') => self.next_level()?,
            KeyCode::Char('r') => {
                let number = self.level_number();
                self.load_level(number)?;
                self.status_message = Some(format!("Level {} restarted", number));
            }
            KeyCode::Char('L') => {
                self.level_cursor = self.level_number().saturating_sub(1) as usize;
                self.overlay = Overlay::LevelSelect;
            }
            KeyCode::Char('?') => self.overlay = Overlay::Help,

            _ => {}
        }

        Ok(())
    }

    fn handle_help_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') | KeyCode::Esc | KeyCode::Enter => self.overlay = Overlay::None,
            _ => {}
        }
    }

    fn handle_level_select_key(&mut self, key: KeyEvent) -> Result<()> {
        let last = levels::count().saturating_sub(1) as usize;

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('k') | KeyCode::Up => {
                self.level_cursor = self.level_cursor.saturating_sub(1);
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.level_cursor = (self.level_cursor + 1).min(last);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.load_level(self.level_cursor as u32 + 1)?;
            }
            KeyCode::Char('L') | KeyCode::Esc => self.overlay = Overlay::None,
            _ => {}
        }

        Ok(())
    }

    /// Replace the session with a fresh one for `number`
    fn load_level(&mut self, number: u32) -> Result<()> {
        self.session = load_session(number)?;
        self.overlay = Overlay::None;
        self.reset_cursor();
        let level = self.session.level();
        self.status_message = Some(format!("Level {}: {}", level.number, level.description));
        Ok(())
    }

    fn next_level(&mut self) -> Result<()> {
        if !self.session.is_complete() {
            self.status_message = Some("Finish this level first ([r]estart, [L]evels)".to_string());
        } else if self.level_number() >= levels::count() {
            self.status_message = Some("That was the last level. Well played!".to_string());
        } else {
            self.load_level(self.level_number() + 1)?;
        }
        Ok(())
    }

    /// Put the cursor on the first removable nail
    fn reset_cursor(&mut self) {
        self.selected = self
            .session
            .removable_nails()
            .first()
            .copied()
            .or_else(|| self.session.level().nail_ids().next());
    }

    fn move_cursor(&mut self, heading: Heading) {
        let current = self.selected;
        let Some(from) = current.and_then(|id| self.session.level().position_of(id)) else {
            self.reset_cursor();
            return;
        };

        let candidates = self
            .session
            .level()
            .positions
            .iter()
            .filter(|(id, _)| Some(**id) != current)
            .map(|(id, pos)| (*id, *pos));

        if let Some(id) = nearest_in_heading(from, heading, candidates) {
            self.selected = Some(id);
        }
    }

    /// Cycle the cursor through removable nails in id order
    fn select_next_removable(&mut self) {
        let removable = self.session.removable_nails();
        let next = removable
            .iter()
            .find(|id| Some(**id) > self.selected)
            .or_else(|| removable.first());

        match next {
            Some(id) => self.selected = Some(*id),
            None => self.status_message = Some("No nail can be removed".to_string()),
        }
    }

    fn remove_selected(&mut self) {
        let Some(id) = self.selected else {
            self.status_message = Some("No nail selected".to_string());
            return;
        };

        self.status_message = Some(match self.session.attempt_remove(id) {
            Ok(removal) => self.describe_removal(&removal),
            Err(e) => e.to_string(),
        });
    }

    fn add_stack(&mut self) {
        self.status_message = Some(match self.session.add_stack() {
            Ok(index) => format!("Stack {} added", index + 1),
            Err(e) => e.to_string(),
        });
    }

    fn describe_removal(&self, removal: &Removal) -> String {
        match (removal.status, removal.placement) {
            (GameStatus::LevelComplete, _) => {
                let winner = self
                    .session
                    .winner()
                    .map(|p| p.to_string())
                    .unwrap_or_default();
                if self.level_number() >= levels::count() {
                    format!("Level complete! {} wins. That was the last level.", winner)
                } else {
                    format!("Level complete! {} wins. Press n for the next level.", winner)
                }
            }
            (_, PlacementResult::Rejected) => format!(
                "No stack takes nail {}. Game over! Press r to restart.",
                removal.nail
            ),
            (_, PlacementResult::Placed { stack, cleared }) => format!(
                "Nail {} {} stack {}. {}'s turn.",
                removal.nail,
                if cleared { "filled and cleared" } else { "placed on" },
                stack + 1,
                self.session.current_player()
            ),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn level_number(&self) -> u32 {
        self.session.level().number
    }

    pub fn selected(&self) -> Option<NailId> {
        self.selected
    }

    pub fn overlay(&self) -> Overlay {
        self.overlay
    }

    pub fn level_cursor(&self) -> usize {
        self.level_cursor
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE)).unwrap();
    }

    fn chars(app: &mut App, keys: &str) {
        for c in keys.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn select(app: &mut App, id: u32) {
        app.selected = Some(NailId::new(id));
    }

    #[test]
    fn starts_on_first_removable_nail() {
        let app = App::new(1, false).unwrap();
        assert_eq!(app.selected(), Some(NailId::new(1)));
        assert_eq!(app.overlay(), Overlay::None);
        assert_eq!(app.level_number(), 1);
    }

    #[test]
    fn unknown_level_fails() {
        assert!(App::new(99, false).is_err());
    }

    #[test]
    fn show_help_opens_overlay() {
        let mut app = App::new(1, true).unwrap();
        assert_eq!(app.overlay(), Overlay::Help);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.overlay(), Overlay::None);
    }

    #[test]
    fn cursor_moves_between_nails() {
        let mut app = App::new(1, false).unwrap();
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected(), Some(NailId::new(2)));
        press(&mut app, KeyCode::Right);
        assert_eq!(app.selected(), Some(NailId::new(3)));
        chars(&mut app, "k");
        assert_eq!(app.selected(), Some(NailId::new(1)));
    }

    #[test]
    fn play_level_one_to_completion() {
        let mut app = App::new(1, false).unwrap();

        press(&mut app, KeyCode::Enter);
        assert!(app.status_message().unwrap().contains("placed on stack 1"));

        select(&mut app, 2);
        press(&mut app, KeyCode::Char(' '));
        chars(&mut app, "a");
        assert_eq!(app.session().stacks().len(), 2);

        select(&mut app, 3);
        press(&mut app, KeyCode::Enter);
        assert!(app.session().is_complete());
        assert!(app.status_message().unwrap().contains("Player 1 wins"));

        chars(&mut app, "n");
        assert_eq!(app.level_number(), 2);
        assert_eq!(app.session().moves(), 0);
    }

    #[test]
    fn refused_removal_reports_error() {
        let mut app = App::new(1, false).unwrap();
        select(&mut app, 2);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.status_message(), Some("Nail 2 cannot be removed yet"));
        assert!(app.session().removed_nails().is_empty());
    }

    #[test]
    fn rejected_placement_ends_game_and_restart_resets() {
        let mut app = App::new(1, false).unwrap();
        press(&mut app, KeyCode::Enter);
        select(&mut app, 3);
        press(&mut app, KeyCode::Enter);
        assert!(app.session().is_game_over());
        assert!(app.status_message().unwrap().contains("Game over"));

        chars(&mut app, "r");
        assert!(!app.session().is_game_over());
        assert!(app.session().removed_nails().is_empty());
    }

    #[test]
    fn next_level_requires_completion() {
        let mut app = App::new(1, false).unwrap();
        chars(&mut app, "n");
        assert_eq!(app.level_number(), 1);
        assert!(app.status_message().unwrap().contains("Finish"));
    }

    #[test]
    fn level_selector_loads_level() {
        let mut app = App::new(1, false).unwrap();
        chars(&mut app, "L");
        assert_eq!(app.overlay(), Overlay::LevelSelect);
        assert_eq!(app.level_cursor(), 0);

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.level_number(), 3);
        assert_eq!(app.overlay(), Overlay::None);
    }

    #[test]
    fn level_selector_stays_in_range() {
        let mut app = App::new(1, false).unwrap();
        chars(&mut app, "L");
        for _ in 0..10 {
            press(&mut app, KeyCode::Down);
        }
        assert_eq!(app.level_cursor(), levels::count() as usize - 1);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.overlay(), Overlay::None);
        assert_eq!(app.level_number(), 1);
    }

    #[test]
    fn tab_cycles_removable_nails() {
        let mut app = App::new(1, false).unwrap();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.selected(), Some(NailId::new(2)));
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.selected(), Some(NailId::new(3)));
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.selected(), Some(NailId::new(2)));
    }

    #[test]
    fn quit_keys() {
        let mut app = App::new(1, false).unwrap();
        chars(&mut app, "q");
        assert!(app.should_quit);

        let mut app = App::new(1, false).unwrap();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
            .unwrap();
        assert!(app.should_quit);
    }
}
