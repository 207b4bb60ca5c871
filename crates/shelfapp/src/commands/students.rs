use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{CampusSelector, Library, User};

pub fn register(
    library: &mut Library,
    campus: &CampusSelector,
    id: &str,
    name: &str,
) -> Result<CmdResult> {
    let student = library
        .campus_mut(campus)?
        .register_student(id, name)?
        .clone();
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Student registered: {} ({}) at {}",
        student.name(),
        student.id(),
        student.campus()
    )));
    result.students.push(student);
    Ok(result)
}

pub fn show(library: &Library, campus: &CampusSelector, id: &str) -> Result<CmdResult> {
    let student = library.campus(campus)?.student(id.trim())?.clone();
    let mut result = CmdResult::default();
    result.students.push(student);
    Ok(result)
}

pub fn list(library: &Library, campus: &CampusSelector) -> Result<CmdResult> {
    let campus = library.campus(campus)?;
    let mut result = CmdResult::default();
    result.students = campus.students().to_vec();
    if result.students.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No students in {}.",
            campus.name()
        )));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EntityKind, LibraryError};

    fn gc() -> CampusSelector {
        CampusSelector::Index(2)
    }

    #[test]
    fn register_binds_student_to_campus() {
        let mut library = Library::seeded();
        let result = register(&mut library, &gc(), "S1", "Abebe").unwrap();
        assert_eq!(result.students[0].campus(), "GC Campus");
        assert!(result.students[0].loans().is_empty());
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut library = Library::seeded();
        register(&mut library, &gc(), "S1", "Abebe").unwrap();
        assert!(matches!(
            register(&mut library, &gc(), " S1 ", "Other"),
            Err(LibraryError::DuplicateId {
                kind: EntityKind::Student,
                ..
            })
        ));
        assert_eq!(list(&library, &gc()).unwrap().students.len(), 1);
    }

    #[test]
    fn student_ids_are_scoped_per_campus() {
        let mut library = Library::seeded();
        register(&mut library, &gc(), "S1", "Abebe").unwrap();
        register(&mut library, &CampusSelector::Index(5), "S1", "Hana").unwrap();

        let teda = show(&library, &CampusSelector::Index(5), "S1").unwrap();
        assert_eq!(teda.students[0].name(), "Hana");
    }

    #[test]
    fn show_unknown_student_is_not_found() {
        let library = Library::seeded();
        assert!(show(&library, &gc(), "S404").is_err());
    }

    #[test]
    fn empty_list_says_so() {
        let library = Library::seeded();
        let result = list(&library, &gc()).unwrap();
        assert!(result.messages[0].content.contains("No students"));
    }
}
