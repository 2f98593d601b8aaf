use std::fs;
use std::process::Command;

use anyhow::{bail, Context};
use log::info;

use crate::controller::{BatchOutcome, Session};
use crate::persist;

/// Open the current ledger as an editable grid in `$EDITOR` (falling back
/// to vi). The edited file is treated as a candidate ledger: it is re-run
/// through the normalizer and only replaces the store if anything changed.
pub(crate) fn edit_ledger(session: &mut Session) -> anyhow::Result<BatchOutcome> {
    let grid_path =
        std::env::temp_dir().join(format!("gastos-edit-{}.csv", std::process::id()));
    persist::save(&session.ledger, &grid_path)
        .with_context(|| format!("Unable to write editable grid to {:?}", grid_path))?;

    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
    info!("Opening {:?} in {}", grid_path, editor);

    let status = Command::new(&editor)
        .arg(&grid_path)
        .status()
        .with_context(|| format!("Unable to launch editor '{}'", editor))?;
    if !status.success() {
        let _ = fs::remove_file(&grid_path);
        bail!("Editor exited with {}, discarding edit", status);
    }

    let outcome = session.apply_edit(&grid_path);
    let _ = fs::remove_file(&grid_path);

    Ok(outcome?)
}
