use crate::commands::{CampusSummary, CmdResult};
use crate::error::Result;
use crate::model::Library;

pub fn list(library: &Library) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    result.campuses = library
        .campuses()
        .iter()
        .enumerate()
        .map(|(i, campus)| CampusSummary::of(i + 1, campus))
        .collect();
    Ok(result)
}
