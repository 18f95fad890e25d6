//! Notification Sounds
//!
//! Two static cues and the players that can emit them. Playback is
//! fire-and-forget: nothing is queued and overlapping cues are left to the
//! underlying primitive.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::Arc;

use crate::config::{PlayerKind, SoundConfig};

/// Audible cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sound {
    /// A reminder is due, or one was just created
    Fulfillment,
    /// A reminder was deleted
    Regret,
}

impl Sound {
    /// Asset file name
    pub fn asset(self) -> &'static str {
        match self {
            Sound::Fulfillment => "fulfillment.mp3",
            Sound::Regret => "sad.mp3",
        }
    }
}

/// Something that can play a cue without blocking the caller
pub trait SoundPlayer: Send + Sync {
    fn play(&self, sound: Sound);
}

/// Rings the terminal bell
#[derive(Debug, Default)]
pub struct TerminalBell;

impl SoundPlayer for TerminalBell {
    fn play(&self, sound: Sound) {
        tracing::info!(sound = ?sound, "Playing cue");
        let mut stderr = std::io::stderr();
        let _ = stderr.write_all(b"\x07");
        let _ = stderr.flush();
    }
}

/// Runs an external audio program with the asset path as its only argument
#[derive(Debug)]
pub struct CommandPlayer {
    program: String,
    assets_dir: PathBuf,
}

impl CommandPlayer {
    pub fn new(program: impl Into<String>, assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            assets_dir: assets_dir.into(),
        }
    }

    pub fn asset_path(&self, sound: Sound) -> PathBuf {
        self.assets_dir.join(sound.asset())
    }
}

impl SoundPlayer for CommandPlayer {
    fn play(&self, sound: Sound) {
        let path = self.asset_path(sound);
        let spawned = Command::new(&self.program)
            .arg(&path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        match spawned {
            Ok(mut child) => {
                // Reap in the background so the caller never waits on playback
                std::thread::spawn(move || {
                    let _ = child.wait();
                });
            }
            Err(e) => {
                tracing::warn!(program = %self.program, path = ?path, error = %e, "Failed to play cue");
            }
        }
    }
}

/// Plays nothing
#[derive(Debug, Default)]
pub struct SilentPlayer;

impl SoundPlayer for SilentPlayer {
    fn play(&self, sound: Sound) {
        tracing::debug!(sound = ?sound, "Cue muted");
    }
}

/// Build the player selected in the configuration
pub fn build_player(config: &SoundConfig) -> Arc<dyn SoundPlayer> {
    match config.player {
        PlayerKind::Bell => Arc::new(TerminalBell),
        PlayerKind::Command => Arc::new(CommandPlayer::new(
            config.command.clone(),
            config.assets_dir.clone(),
        )),
        PlayerKind::Silent => Arc::new(SilentPlayer),
    }
}
