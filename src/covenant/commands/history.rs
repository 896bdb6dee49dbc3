use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::History;

/// The newest `limit` generations, newest first.
pub fn recent(history: &History, limit: usize) -> Result<CmdResult> {
    let entries = history.recent(limit).into_iter().cloned().collect();
    Ok(CmdResult::default().with_history(entries))
}

pub fn clear(history: &mut History) -> Result<CmdResult> {
    let removed = history.len();
    history.clear();
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Cleared {} history {}.",
        removed,
        if removed == 1 { "entry" } else { "entries" }
    )));
    Ok(result)
}
