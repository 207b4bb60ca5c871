use crate::commands::{CmdMessage, CmdResult, InboxView};
use crate::error::Result;
use crate::model::{CampusSelector, Inbox, Library, User};

/// An officer on `officer_campus` notifies a student on `student_campus`.
/// The two campuses may differ.
pub fn send(
    library: &mut Library,
    officer_campus: &CampusSelector,
    officer_id: &str,
    student_campus: &CampusSelector,
    student_id: &str,
    message: &str,
) -> Result<CmdResult> {
    library.send_notification(
        officer_campus,
        officer_id.trim(),
        student_campus,
        student_id.trim(),
        message,
    )?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Notification sent to {}",
        student_id.trim()
    )));
    Ok(result)
}

pub fn student_inbox(
    library: &Library,
    campus: &CampusSelector,
    student_id: &str,
) -> Result<CmdResult> {
    let student = library.campus(campus)?.student(student_id.trim())?;
    Ok(inbox_result(student))
}

pub fn officer_inbox(
    library: &Library,
    campus: &CampusSelector,
    officer_id: &str,
) -> Result<CmdResult> {
    let officer = library.campus(campus)?.officer(officer_id.trim())?;
    Ok(inbox_result(officer))
}

fn inbox_result(user: &impl User) -> CmdResult {
    let mut result = CmdResult::default();
    let entries = match user.notifications().inbox() {
        Inbox::Empty => {
            result.add_message(CmdMessage::info("No notifications"));
            Vec::new()
        }
        Inbox::Entries(entries) => entries.to_vec(),
    };
    result.inbox = Some(InboxView {
        owner: user.id().to_string(),
        entries,
    });
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LibraryError;

    fn library() -> Library {
        let mut library = Library::seeded();
        library
            .campus_mut(&CampusSelector::Index(1))
            .unwrap()
            .hire_officer("O1", "Kebede")
            .unwrap();
        library
            .campus_mut(&CampusSelector::Index(2))
            .unwrap()
            .register_student("S1", "Abebe")
            .unwrap();
        library
    }

    #[test]
    fn empty_inbox_is_explicit() {
        let library = library();
        let result = student_inbox(&library, &CampusSelector::Index(2), "S1").unwrap();
        assert!(result.inbox.as_ref().unwrap().entries.is_empty());
        assert_eq!(result.messages[0].content, "No notifications");
    }

    #[test]
    fn cross_campus_notification_arrives_in_order() {
        let mut library = library();
        let atse = CampusSelector::Index(1);
        let gc = CampusSelector::Index(2);
        send(&mut library, &atse, "O1", &gc, "S1", "first").unwrap();
        send(&mut library, &atse, "O1", &gc, "S1", "second").unwrap();

        let result = student_inbox(&library, &gc, "S1").unwrap();
        let entries = result.inbox.unwrap().entries;
        assert_eq!(entries.len(), 2);
        assert!(entries[0].ends_with(" - first"));
        assert!(entries[1].ends_with(" - second"));
    }

    #[test]
    fn officer_keeps_no_record_of_sent_messages() {
        let mut library = library();
        let atse = CampusSelector::Index(1);
        send(&mut library, &atse, "O1", &CampusSelector::Index(2), "S1", "hi").unwrap();

        let result = officer_inbox(&library, &atse, "O1").unwrap();
        assert!(result.inbox.unwrap().entries.is_empty());
    }

    #[test]
    fn unknown_officer_is_rejected() {
        let mut library = library();
        let err = send(
            &mut library,
            &CampusSelector::Index(2),
            "O1",
            &CampusSelector::Index(2),
            "S1",
            "hi",
        )
        .unwrap_err();
        assert!(matches!(err, LibraryError::NotFound { .. }));
    }

    #[test]
    fn blank_message_is_rejected() {
        let mut library = library();
        let err = send(
            &mut library,
            &CampusSelector::Index(1),
            "O1",
            &CampusSelector::Index(2),
            "S1",
            "  ",
        )
        .unwrap_err();
        assert!(matches!(err, LibraryError::InvalidInput(_)));
    }
}
