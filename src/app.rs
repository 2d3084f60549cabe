//! Menu / play / game-over flow and the frame loop.
//!
//! One task owns input, simulation and rendering: key events, the
//! simulation tick (at the selected level's rate) and the 30 FPS render
//! timer are multiplexed through a single `tokio::select!` loop, so every
//! tick-render cycle is atomic with respect to the game state.

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::{Duration, Instant, SystemTime};
use tokio::time::interval;

use crate::audio::{AudioSink, NullAudio, SoundCue, TerminalBell};
use crate::game::{
    Action, Direction, GameConfig, GameRng, GameSession, LevelConfig, Skin, LEVELS,
};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Render cadence, independent of the simulation tick rate
const RENDER_INTERVAL: Duration = Duration::from_millis(33);

enum Screen {
    Menu,
    Playing(GameSession),
    GameOver { final_score: u32 },
}

pub struct App {
    config: GameConfig,
    screen: Screen,
    skin_index: usize,
    level_index: usize,
    /// Fixed seed for reproducible obstacle layouts; entropy when absent
    seed: Option<u64>,
    audio: Box<dyn AudioSink>,
    renderer: Renderer,
    input_handler: InputHandler,
    metrics: GameMetrics,
    /// Most recent turn requested since the last tick; last one wins
    pending_direction: Option<Direction>,
    should_quit: bool,
}

impl App {
    pub fn new(
        config: GameConfig,
        skin: Option<Skin>,
        level: Option<usize>,
        seed: Option<u64>,
        mute: bool,
    ) -> Self {
        let audio: Box<dyn AudioSink> = if mute {
            Box::new(NullAudio)
        } else {
            Box::new(TerminalBell)
        };

        let skin_index = skin
            .and_then(|s| Skin::ALL.iter().position(|&x| x == s))
            .unwrap_or(0);

        Self {
            config,
            screen: Screen::Menu,
            skin_index,
            level_index: level.unwrap_or(0).min(LEVELS.len() - 1),
            seed,
            audio,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            metrics: GameMetrics::new(),
            pending_direction: None,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run the loop with cleanup
        let result = self.run_loop(&mut terminal).await;

        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_interval = self.wanted_tick_interval();
        let mut tick_timer = interval(tick_interval);
        let mut render_timer = interval(RENDER_INTERVAL);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                // Simulation tick
                _ = tick_timer.tick() => {
                    self.on_tick(Instant::now())?;
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        let wall_clock = SystemTime::now();
                        match &self.screen {
                            Screen::Menu => {
                                self.renderer.render_menu(frame, self.skin_index, self.level_index);
                            }
                            Screen::Playing(session) => {
                                self.renderer.render_session(frame, session, &self.metrics, wall_clock);
                            }
                            Screen::GameOver { final_score } => {
                                self.renderer.render_game_over(frame, *final_score, &self.metrics);
                            }
                        }
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }

            // Starting a session retunes the tick timer to the level's rate
            let wanted = self.wanted_tick_interval();
            if wanted != tick_interval {
                tick_interval = wanted;
                tick_timer = interval(tick_interval);
            }
        }

        Ok(())
    }

    fn wanted_tick_interval(&self) -> Duration {
        match &self.screen {
            Screen::Playing(session) => session.tick_interval(),
            _ => LevelConfig::get(self.level_index).tick_interval(),
        }
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            let action = self.input_handler.handle_key_event(key);
            self.apply_key_action(action)?;
        }

        Ok(())
    }

    fn apply_key_action(&mut self, action: KeyAction) -> Result<()> {
        match &self.screen {
            Screen::Menu => match action {
                KeyAction::GameAction(Action::Move(Direction::Up)) => {
                    self.skin_index = (self.skin_index + Skin::ALL.len() - 1) % Skin::ALL.len();
                }
                KeyAction::GameAction(Action::Move(Direction::Down)) => {
                    self.skin_index = (self.skin_index + 1) % Skin::ALL.len();
                }
                KeyAction::GameAction(Action::Move(Direction::Left)) => {
                    self.level_index = (self.level_index + LEVELS.len() - 1) % LEVELS.len();
                }
                KeyAction::GameAction(Action::Move(Direction::Right)) => {
                    self.level_index = (self.level_index + 1) % LEVELS.len();
                }
                KeyAction::Confirm => self.start_session()?,
                KeyAction::Cancel | KeyAction::Quit => self.should_quit = true,
                _ => {}
            },
            Screen::Playing(_) => match action {
                KeyAction::GameAction(Action::Move(direction)) => {
                    self.pending_direction = Some(direction);
                }
                KeyAction::Restart => self.start_session()?,
                KeyAction::Cancel => self.screen = Screen::Menu,
                KeyAction::Quit => self.should_quit = true,
                _ => {}
            },
            Screen::GameOver { .. } => match action {
                KeyAction::Confirm | KeyAction::Restart => self.start_session()?,
                KeyAction::Cancel => self.screen = Screen::Menu,
                KeyAction::Quit => self.should_quit = true,
                _ => {}
            },
        }

        Ok(())
    }

    fn on_tick(&mut self, now: Instant) -> Result<()> {
        let Screen::Playing(session) = &mut self.screen else {
            return Ok(());
        };

        let action = self
            .pending_direction
            .take()
            .map(Action::Move)
            .unwrap_or(Action::Continue);

        let report = session
            .tick(action, now)
            .context("Game board has no free cell for food")?;

        if report.ate_food {
            self.audio.play(SoundCue::Eat);
        }

        if report.died {
            let final_score = session.score();
            self.audio.play(SoundCue::GameOver);
            self.metrics.on_game_over(final_score);
            self.screen = Screen::GameOver { final_score };
        }

        Ok(())
    }

    fn start_session(&mut self) -> Result<()> {
        let rng = match self.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };

        let session = GameSession::new(
            self.config.clone(),
            self.level_index,
            Skin::ALL[self.skin_index],
            rng,
            Instant::now(),
        )
        .context("Failed to start game session")?;

        self.metrics.on_game_start();
        self.pending_direction = None;
        self.screen = Screen::Playing(session);

        Ok(())
    }

    fn cleanup_terminal(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(GameConfig::default(), None, Some(0), Some(7), true)
    }

    fn is_playing(app: &App) -> bool {
        matches!(app.screen, Screen::Playing(_))
    }

    #[test]
    fn test_starts_on_menu() {
        let app = app();
        assert!(matches!(app.screen, Screen::Menu));
        assert_eq!(app.skin_index, 0);
        assert_eq!(app.level_index, 0);
    }

    #[test]
    fn test_cli_preselects_menu_cursor() {
        let app = App::new(GameConfig::default(), Some(Skin::Gold), Some(2), None, true);
        assert_eq!(app.skin_index, 3);
        assert_eq!(app.level_index, 2);
    }

    #[test]
    fn test_menu_cursors_wrap() {
        let mut app = app();

        app.apply_key_action(KeyAction::GameAction(Action::Move(Direction::Up)))
            .unwrap();
        assert_eq!(app.skin_index, Skin::ALL.len() - 1);
        app.apply_key_action(KeyAction::GameAction(Action::Move(Direction::Down)))
            .unwrap();
        assert_eq!(app.skin_index, 0);

        app.apply_key_action(KeyAction::GameAction(Action::Move(Direction::Left)))
            .unwrap();
        assert_eq!(app.level_index, LEVELS.len() - 1);
        app.apply_key_action(KeyAction::GameAction(Action::Move(Direction::Right)))
            .unwrap();
        assert_eq!(app.level_index, 0);
    }

    #[test]
    fn test_confirm_starts_session() {
        let mut app = app();
        app.apply_key_action(KeyAction::Confirm).unwrap();
        assert!(is_playing(&app));
    }

    #[test]
    fn test_escape_returns_to_menu() {
        let mut app = app();
        app.apply_key_action(KeyAction::Confirm).unwrap();
        app.apply_key_action(KeyAction::Cancel).unwrap();
        assert!(matches!(app.screen, Screen::Menu));
    }

    #[test]
    fn test_death_moves_to_game_over_and_tracks_high_score() {
        let mut app = App::new(GameConfig::default(), None, Some(1), Some(7), true);
        app.apply_key_action(KeyAction::Confirm).unwrap();

        // Level 1 has a border wall; driving right long enough is fatal
        let now = Instant::now();
        for _ in 0..40 {
            app.on_tick(now).unwrap();
        }

        assert!(matches!(app.screen, Screen::GameOver { .. }));
        assert_eq!(app.metrics.games_played, 1);

        // Restart from game over
        app.apply_key_action(KeyAction::Confirm).unwrap();
        assert!(is_playing(&app));
    }

    #[test]
    fn test_ticks_are_noops_outside_play() {
        let mut app = app();
        app.on_tick(Instant::now()).unwrap();
        assert!(matches!(app.screen, Screen::Menu));
    }

    #[test]
    fn test_tick_interval_follows_selected_level() {
        let mut app = app();
        assert_eq!(app.wanted_tick_interval(), Duration::from_millis(100));

        app.level_index = 3;
        assert_eq!(app.wanted_tick_interval(), Duration::from_millis(40));

        app.apply_key_action(KeyAction::Confirm).unwrap();
        assert_eq!(app.wanted_tick_interval(), Duration::from_millis(40));
    }
}
