use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use lolo_core::{GameConfig, ModeKind, PlayEngine, Snapshot};

use crate::render;

pub(crate) fn run(path: &Path, mode: ModeKind) -> Result<()> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Could not read {}", path.display()))?;
    let snapshot = Snapshot::from_json(data.trim())
        .with_context(|| format!("Invalid snapshot in {}", path.display()))?;
    let engine = PlayEngine::from_snapshot(mode.build(), &snapshot, GameConfig::default())?;

    print!("{}", render(&engine));
    let groups = engine.find_groups().count();
    if engine.is_terminal() {
        println!("{}: finished board", engine.mode_name());
    } else {
        println!("{}: {groups} groups still playable", engine.mode_name());
    }
    Ok(())
}
