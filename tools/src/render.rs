//! Text rendering of a session for the terminal.

use crossterm::{
    cursor::MoveTo,
    queue,
    terminal::{Clear, ClearType},
};
use std::fmt::Write as _;
use std::io::{self, Write};
use world_runner_core::{location::Location, snapshot::SessionSnapshot};

pub fn stats(snap: &SessionSnapshot) -> String {
    let p = &snap.player;
    let mut out = String::new();
    let _ = writeln!(out, "Day: {}", p.time.day);
    let _ = writeln!(out, "Time: {} ({})", snap.time_of_day, snap.phase);
    let _ = writeln!(out, "Money: ${}", p.money);
    let _ = writeln!(out, "Total Earned: ${}", p.total_earned);
    let _ = writeln!(out, "Total Spent: ${}", p.total_spent);
    let _ = writeln!(out, "Energy: {}", p.energy);
    let _ = writeln!(out, "Hunger: {}", p.hunger);
    let _ = writeln!(out, "City: {}", snap.city().unwrap_or("N/A"));
    if snap.paused {
        out.push_str("[paused]\n");
    }
    out
}

pub fn map() -> String {
    let buttons: Vec<String> = Location::ALL
        .iter()
        .map(|l| format!("[{}] {}", l.id(), l.short_name()))
        .collect();
    format!("Map\n  {}\n", buttons.join("  "))
}

pub fn location(snap: &SessionSnapshot) -> String {
    format!("{}\n{}\n", snap.location_name, snap.location_description)
}

pub fn game_frame<'a>(snap: &SessionSnapshot, notices: impl Iterator<Item = &'a str>) -> String {
    let mut frame = String::new();
    frame.push_str(&stats(snap));
    frame.push('\n');
    frame.push_str(&map());
    frame.push('\n');
    frame.push_str(&location(snap));
    for notice in notices {
        frame.push_str("  * ");
        frame.push_str(notice);
        frame.push('\n');
    }
    frame
}

/// Write a frame. Failures are logged and dropped.
pub fn present(out: &mut impl Write, frame: &str, clear: bool) {
    if let Err(e) = write_frame(out, frame, clear) {
        log::warn!("Render failed: {e}");
    }
}

fn write_frame(out: &mut impl Write, frame: &str, clear: bool) -> io::Result<()> {
    if clear {
        queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    }
    out.write_all(frame.as_bytes())?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use world_runner_core::{config::GameConfig, engine::GameSession, player::Character};

    fn snapshot() -> SessionSnapshot {
        let mut session =
            GameSession::start(GameConfig::default(), Some(Character::new("man", "Cork")))
                .unwrap();
        session.advance_units(3_600 + 7 * 60);
        session.snapshot()
    }

    #[test]
    fn stats_block() {
        let text = stats(&snapshot());
        assert!(text.contains("Day: 1\n"));
        assert!(text.contains("Time: 09:07 (Daytime)\n"));
        assert!(text.contains("Money: $10000\n"));
        assert!(text.contains("Hunger: 10\n"));
        assert!(text.contains("City: Cork\n"));
        assert!(!text.contains("[paused]"));
    }

    #[test]
    fn map_lists_every_location() {
        let text = map();
        for l in Location::ALL {
            assert!(text.contains(l.short_name()), "{l}");
        }
    }

    #[test]
    fn frame_includes_notices() {
        let frame = game_frame(&snapshot(), ["Taxes paid"].into_iter());
        assert!(frame.contains("Your Apartment\nA small starter apartment in Cork.\n"));
        assert!(frame.ends_with("  * Taxes paid\n"));
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone"))
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn present_clears_before_the_frame() {
        let mut plain = Vec::new();
        present(&mut plain, "frame\n", false);
        assert_eq!(plain, b"frame\n");

        let mut cleared = Vec::new();
        present(&mut cleared, "frame\n", true);
        assert!(cleared.len() > plain.len());
        assert!(cleared.ends_with(b"frame\n"));
    }

    #[test]
    fn present_swallows_write_errors() {
        present(&mut Broken, "frame", true);
    }
}
