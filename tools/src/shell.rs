//! Interactive terminal shell: title screen, character creation, and the
//! real-time game loop.
//!
//! The shell owns the refresh timer. Every tick it measures the real time
//! since the previous tick and hands that to the engine, so late or missed
//! ticks never skew the in-game clock.

use crate::render;
use anyhow::Result;
use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};
use world_runner_core::{
    config::GameConfig,
    engine::GameSession,
    event::Notification,
    location::Location,
    player::{Character, CharacterDraft},
};

/// Measures real time between refreshes.
#[derive(Debug, Default)]
pub struct Ticker {
    last: Option<Instant>,
}

impl Ticker {
    /// Forget the previous timestamp so the next tick starts a new interval.
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Real time since the previous tick. The first tick after a reset only
    /// records the timestamp.
    pub fn tick(&mut self, now: Instant) -> Option<Duration> {
        self.last
            .replace(now)
            .map(|prev| now.saturating_duration_since(prev))
    }
}

/// Notifications on screen, each with its own expiry.
#[derive(Debug, Default)]
pub struct NoticeBoard {
    notices: Vec<(Instant, String)>,
}

impl NoticeBoard {
    pub fn post(&mut self, notification: Notification, now: Instant) {
        let until = now + Duration::from_millis(notification.display_ms);
        self.notices.push((until, notification.message));
    }

    /// Drop expired notices.
    pub fn expire(&mut self, now: Instant) {
        self.notices.retain(|(until, _)| *until > now);
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.notices.iter().map(|(_, m)| m.as_str())
    }
}

pub struct Game {
    pub session: GameSession,
    ticker:      Ticker,
    board:       NoticeBoard,
}

pub enum Screen {
    Title,
    CharacterCreation(CharacterDraft),
    Playing(Box<Game>),
}

#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Shell {
    config:     GameConfig,
    pub screen: Screen,
    /// One-off line shown under the current screen.
    message:    Option<String>,
}

impl Shell {
    pub fn new(config: GameConfig) -> Self {
        Self { config, screen: Screen::Title, message: None }
    }

    /// Start (or restart) play. Any previous session and its timer state
    /// are dropped with the old screen.
    pub fn start_game(&mut self, character: Character) -> Result<()> {
        let session = GameSession::start(self.config.clone(), Some(character))?;
        self.screen = Screen::Playing(Box::new(Game {
            session,
            ticker: Ticker::default(),
            board:  NoticeBoard::default(),
        }));
        Ok(())
    }

    pub fn handle_line(&mut self, line: &str, now: Instant) -> Flow {
        let line = line.trim();
        let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
        let word = word.to_ascii_lowercase();
        self.message = None;

        if word == "quit" || word == "exit" {
            return Flow::Quit;
        }

        match &mut self.screen {
            Screen::Title => match word.as_str() {
                "offline" => self.screen = Screen::CharacterCreation(CharacterDraft::default()),
                "online" => self.message = Some("Online mode coming soon".into()),
                "settings" => self.message = Some("Settings coming soon".into()),
                "" => {}
                other => self.message = Some(format!("Unknown choice '{other}'")),
            },

            Screen::CharacterCreation(draft) => match word.as_str() {
                "gender" => draft.choose_gender(rest),
                "city" => draft.choose_city(rest),
                "start" => match draft.clone().finish() {
                    Ok(character) => {
                        if let Err(e) = self.start_game(character) {
                            self.message = Some(format!("Cannot start: {e}"));
                        }
                    }
                    Err(e) => self.message = Some(e.to_string()),
                },
                "" => {}
                other => self.message = Some(format!("Unknown choice '{other}'")),
            },

            Screen::Playing(game) => match word.as_str() {
                "pause" => game.session.pause(),
                "resume" => {
                    // Time spent paused is not owed to the clock.
                    game.ticker.reset();
                    game.session.resume();
                }
                "restart" => {
                    if let Some(character) = game.session.character().cloned() {
                        if let Err(e) = self.start_game(character) {
                            self.message = Some(format!("Cannot restart: {e}"));
                        }
                    }
                }
                "" => {}
                _ => {
                    let target = if word == "go" { rest } else { word.as_str() };
                    match target.parse::<Location>() {
                        Ok(location) => {
                            let outcome = game.session.apply_travel(location);
                            game.board.post(
                                Notification::new(
                                    format!("{} ({:+})", outcome.name, outcome.delta),
                                    game.session.config().notifications.default_ms,
                                ),
                                now,
                            );
                        }
                        Err(e) => self.message = Some(e.to_string()),
                    }
                }
            },
        }
        Flow::Continue
    }

    /// Timer callback: feed real elapsed time to the engine.
    pub fn tick(&mut self, now: Instant) {
        let Screen::Playing(game) = &mut self.screen else { return };
        if let Some(elapsed) = game.ticker.tick(now) {
            let outcome = game.session.advance(elapsed);
            for notification in outcome.notifications {
                game.board.post(notification, now);
            }
        }
        game.board.expire(now);
    }

    pub fn frame(&self) -> String {
        let mut frame = match &self.screen {
            Screen::Title => {
                "World Runner\n  offline | online | settings | quit\n".to_string()
            }
            Screen::CharacterCreation(draft) => {
                let mut s = String::from("Create your character\n  gender <g> | city <c>\n");
                match draft.summary() {
                    Some(summary) => {
                        s.push_str(&summary);
                        s.push_str("\n  start\n");
                    }
                    None => s.push_str("  (choose a gender and a city)\n"),
                }
                s
            }
            Screen::Playing(game) => {
                let snap = game.session.snapshot();
                let mut s = render::game_frame(&snap, game.board.messages());
                s.push_str("\n  go <place> | pause | resume | restart | quit\n");
                s
            }
        };
        if let Some(message) = &self.message {
            frame.push_str(message);
            frame.push('\n');
        }
        frame
    }
}

/// Run the interactive loop until `quit` or end of input.
pub fn run(config: GameConfig) -> Result<()> {
    let period = Duration::from_millis(config.tick_interval_ms.max(1));

    // Stdin is read on a helper thread that only forwards lines. The
    // session itself is touched by this thread alone.
    let (tx, rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    log::warn!("stdin closed: {e}");
                    break;
                }
            }
        }
    });

    let mut shell = Shell::new(config);
    let mut stdout = io::stdout();
    let mut last_frame = String::new();

    loop {
        match rx.recv_timeout(period) {
            Ok(line) => {
                if shell.handle_line(&line, Instant::now()) == Flow::Quit {
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        shell.tick(Instant::now());

        let frame = shell.frame();
        if frame != last_frame {
            render::present(&mut stdout, &frame, true);
            last_frame = frame;
        }
    }

    if let Err(e) = stdout.flush() {
        log::warn!("Final flush failed: {e}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing(shell: &Shell) -> &Game {
        match &shell.screen {
            Screen::Playing(game) => game,
            _ => panic!("not playing"),
        }
    }

    fn shell_in_game(now: Instant) -> Shell {
        let mut shell = Shell::new(GameConfig::default());
        shell.handle_line("offline", now);
        shell.handle_line("gender woman", now);
        shell.handle_line("city Porto", now);
        shell.handle_line("start", now);
        shell
    }

    #[test]
    fn ticker_first_tick_only_records() {
        let t0 = Instant::now();
        let mut ticker = Ticker::default();
        assert_eq!(ticker.tick(t0), None);
        assert_eq!(ticker.tick(t0 + Duration::from_millis(260)), Some(Duration::from_millis(260)));
        ticker.reset();
        assert_eq!(ticker.tick(t0 + Duration::from_secs(60)), None);
    }

    #[test]
    fn notices_expire() {
        let t0 = Instant::now();
        let mut board = NoticeBoard::default();
        board.post(Notification::new("short", 1_000), t0);
        board.post(Notification::new("long", 5_000), t0);

        board.expire(t0 + Duration::from_millis(2_000));
        assert_eq!(board.messages().collect::<Vec<_>>(), vec!["long"]);

        board.expire(t0 + Duration::from_millis(5_000));
        assert_eq!(board.messages().count(), 0);
    }

    #[test]
    fn title_placeholders() {
        let now = Instant::now();
        let mut shell = Shell::new(GameConfig::default());
        shell.handle_line("online", now);
        assert!(shell.frame().ends_with("Online mode coming soon\n"));
        shell.handle_line("settings", now);
        assert!(shell.frame().ends_with("Settings coming soon\n"));
        assert!(matches!(shell.screen, Screen::Title));
    }

    #[test]
    fn start_needs_both_choices() {
        let now = Instant::now();
        let mut shell = Shell::new(GameConfig::default());
        shell.handle_line("offline", now);
        shell.handle_line("gender man", now);
        shell.handle_line("start", now);
        assert!(matches!(shell.screen, Screen::CharacterCreation(_)));
        assert!(shell.frame().contains("city not chosen"));
    }

    #[test]
    fn ticks_feed_real_elapsed_time() {
        let t0 = Instant::now();
        let mut shell = shell_in_game(t0);

        shell.tick(t0);
        // A late tick still delivers the full interval.
        shell.tick(t0 + Duration::from_millis(30_000));

        let state = playing(&shell).session.state();
        assert_eq!(state.time.hour, 9);
        assert_eq!(state.hunger, 10);
        assert_eq!(playing(&shell).board.messages().count(), 1);
    }

    #[test]
    fn travel_by_name() {
        let now = Instant::now();
        let mut shell = shell_in_game(now);

        shell.handle_line("go work", now);
        shell.handle_line("store", now);
        shell.handle_line("go moon", now);

        let game = playing(&shell);
        assert_eq!(game.session.state().money, 9_990);
        assert_eq!(game.session.location(), Location::Store);
        assert!(shell.frame().contains("Unknown location 'moon'"));
    }

    #[test]
    fn resume_does_not_owe_paused_time() {
        let t0 = Instant::now();
        let mut shell = shell_in_game(t0);
        shell.tick(t0);

        shell.handle_line("pause", t0);
        shell.tick(t0 + Duration::from_secs(600));
        shell.handle_line("resume", t0 + Duration::from_secs(600));
        shell.tick(t0 + Duration::from_secs(601));
        shell.tick(t0 + Duration::from_millis(601_500));

        let state = playing(&shell).session.state();
        assert_eq!(state.time.hour, 8);
        assert_eq!(state.time.minute, 1);
    }

    #[test]
    fn restart_resets_the_session() {
        let t0 = Instant::now();
        let mut shell = shell_in_game(t0);
        shell.tick(t0);
        shell.tick(t0 + Duration::from_secs(60));
        let first_id = playing(&shell).session.session_id.clone();

        shell.handle_line("restart", t0 + Duration::from_secs(60));
        shell.tick(t0 + Duration::from_secs(61));

        let game = playing(&shell);
        assert_ne!(game.session.session_id, first_id);
        assert_eq!(game.session.state().time.hour, 8);
        assert_eq!(game.session.state().time.minute, 0);
    }

    #[test]
    fn quit_from_anywhere() {
        let now = Instant::now();
        let mut shell = shell_in_game(now);
        assert_eq!(shell.handle_line("quit", now), Flow::Quit);
    }
}
