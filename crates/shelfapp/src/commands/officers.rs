use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{CampusSelector, Library, User};

pub fn hire(
    library: &mut Library,
    campus: &CampusSelector,
    id: &str,
    name: &str,
) -> Result<CmdResult> {
    let campus = library.campus_mut(campus)?;
    let officer = campus.hire_officer(id, name)?.clone();
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Officer hired: {} ({}) at {}",
        officer.name(),
        officer.id(),
        officer.campus()
    )));
    result.officers.push(officer);
    Ok(result)
}

/// Fires an officer. Their notification log goes with them; hiring the same
/// id again starts from scratch.
pub fn fire(library: &mut Library, campus: &CampusSelector, id: &str) -> Result<CmdResult> {
    let officer = library.campus_mut(campus)?.fire_officer(id.trim())?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Officer fired: {} ({})",
        officer.name(),
        officer.id()
    )));
    result.officers.push(officer);
    Ok(result)
}

pub fn show(library: &Library, campus: &CampusSelector, id: &str) -> Result<CmdResult> {
    let officer = library.campus(campus)?.officer(id.trim())?.clone();
    let mut result = CmdResult::default();
    result.officers.push(officer);
    Ok(result)
}

pub fn list(library: &Library, campus: &CampusSelector) -> Result<CmdResult> {
    let campus = library.campus(campus)?;
    let mut result = CmdResult::default();
    result.officers = campus.officers().to_vec();
    if result.officers.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No officers in {}.",
            campus.name()
        )));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LibraryError;

    fn fasil() -> CampusSelector {
        CampusSelector::Name("Fasil Campus".to_string())
    }

    #[test]
    fn hire_then_list_in_order() {
        let mut library = Library::seeded();
        hire(&mut library, &fasil(), "O1", "Kebede").unwrap();
        hire(&mut library, &fasil(), "O2", "Almaz").unwrap();

        let result = list(&library, &fasil()).unwrap();
        let ids: Vec<_> = result.officers.iter().map(|o| o.id()).collect();
        assert_eq!(ids, vec!["O1", "O2"]);
    }

    #[test]
    fn hire_duplicate_is_rejected() {
        let mut library = Library::seeded();
        hire(&mut library, &fasil(), "O1", "Kebede").unwrap();
        assert!(matches!(
            hire(&mut library, &fasil(), "O1", "Almaz"),
            Err(LibraryError::DuplicateId { .. })
        ));
    }

    #[test]
    fn same_officer_id_on_two_campuses_is_fine() {
        let mut library = Library::seeded();
        hire(&mut library, &fasil(), "O1", "Kebede").unwrap();
        hire(&mut library, &CampusSelector::Index(1), "O1", "Almaz").unwrap();
    }

    #[test]
    fn fire_removes_and_show_then_fails() {
        let mut library = Library::seeded();
        hire(&mut library, &fasil(), "O1", "Kebede").unwrap();

        let fired = fire(&mut library, &fasil(), "O1").unwrap();
        assert_eq!(fired.officers[0].name(), "Kebede");
        assert!(show(&library, &fasil(), "O1").is_err());
    }

    #[test]
    fn blank_name_is_invalid() {
        let mut library = Library::seeded();
        assert!(matches!(
            hire(&mut library, &fasil(), "O1", "   "),
            Err(LibraryError::InvalidInput(_))
        ));
    }
}
