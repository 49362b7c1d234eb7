/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.
/// Command-line flags are merged on top by `main` and win over the file.

use serde::Deserialize;
use std::path::PathBuf;

/// Smallest board the generator is allowed to work with.
pub const MIN_BOARD: i32 = 4;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub glyphs: GlyphConfig,
    /// (width, height) per level, played in order.
    pub plan: Vec<(i32, i32)>,
    /// Fixed RNG seed for reproducible layouts; None = seed from entropy.
    pub seed: Option<u64>,
}

/// Display glyph per entity kind. Owned by the game and handed to the
/// renderer — nothing here is process-global.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphConfig {
    pub player: String,
    pub box_: String,
    pub captured: String,
    pub target: String,
    pub background: String,
    pub wall: String,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    glyphs: TomlGlyphs,
    #[serde(default)]
    game: TomlGame,
}

#[derive(Deserialize, Debug)]
struct TomlGlyphs {
    #[serde(default = "default_player")]
    player: String,
    #[serde(default = "default_box", rename = "box")]
    box_: String,
    #[serde(default = "default_captured")]
    captured: String,
    #[serde(default = "default_target")]
    target: String,
    #[serde(default = "default_background")]
    background: String,
    #[serde(default = "default_wall")]
    wall: String,
}

#[derive(Deserialize, Debug)]
struct TomlGame {
    #[serde(default = "default_plan")]
    levels: Vec<(i32, i32)>,
}

// ── Defaults ──

fn default_player() -> String { "☻".into() }
fn default_box() -> String { "▩".into() }
fn default_captured() -> String { "✔".into() }
fn default_target() -> String { "X".into() }
fn default_background() -> String { "□".into() }
fn default_wall() -> String { "#".into() }

/// The stock ten-level run.
fn default_plan() -> Vec<(i32, i32)> {
    vec![
        (10, 10), (12, 8), (10, 8),
        (10, 12), (12, 12), (8, 8),
        (10, 10), (12, 9), (11, 11),
        (11, 12),
    ]
}

impl Default for TomlGlyphs {
    fn default() -> Self {
        TomlGlyphs {
            player: default_player(),
            box_: default_box(),
            captured: default_captured(),
            target: default_target(),
            background: default_background(),
            wall: default_wall(),
        }
    }
}

impl Default for TomlGame {
    fn default() -> Self {
        TomlGame { levels: default_plan() }
    }
}

impl From<TomlConfig> for GameConfig {
    fn from(toml_cfg: TomlConfig) -> Self {
        GameConfig {
            glyphs: GlyphConfig {
                player: toml_cfg.glyphs.player,
                box_: toml_cfg.glyphs.box_,
                captured: toml_cfg.glyphs.captured,
                target: toml_cfg.glyphs.target,
                background: toml_cfg.glyphs.background,
                wall: toml_cfg.glyphs.wall,
            },
            plan: toml_cfg.game.levels,
            seed: None,
        }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        load_toml(&candidate_dirs()).into()
    }

    /// Force one dimension across the whole plan (CLI override).
    pub fn override_width(&mut self, width: i32) {
        for dims in &mut self.plan {
            dims.0 = width;
        }
    }

    pub fn override_height(&mut self, height: i32) {
        for dims in &mut self.plan {
            dims.1 = height;
        }
    }

    /// Reject unplayable plans. Called after all overrides are merged.
    pub fn validate(&self) -> Result<(), String> {
        if self.plan.is_empty() {
            return Err("level plan is empty".into());
        }
        for &(w, h) in &self.plan {
            if w < MIN_BOARD || h < MIN_BOARD {
                return Err(format!(
                    "board dimensions {}x{} are below the {}x{} minimum",
                    w, h, MIN_BOARD, MIN_BOARD
                ));
            }
        }
        Ok(())
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                    Ok(cfg) => return cfg,
                    Err(e) => {
                        eprintln!("Warning: config.toml parse error: {e}");
                        eprintln!("Using default settings.");
                        return TomlConfig::default();
                    }
                },
                Err(e) => {
                    eprintln!("Warning: could not read {}: {e}", path.display());
                }
            }
        }
    }
    TomlConfig::default()
}
