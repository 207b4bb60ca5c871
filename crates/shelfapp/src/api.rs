//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every shelf operation, whatever the UI.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Owns** the in-memory [`Library`] and the [`LibraryStore`] behind it
//! - **Dispatches** to the appropriate command function
//! - **Persists** after every successful mutation (write-through)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## Write-Through and Rollback
//!
//! Every mutating method snapshots the library, runs the command, then saves
//! the whole graph before returning. If either the command or the save fails
//! the snapshot is put back, so a failed call never leaves a half-applied
//! change in memory or on disk.
//!
//! Mutating methods take `&mut self`. Whoever holds the API holds the only
//! lock there is: one mutation and its save happen before the next starts.
//!
//! ## Administrative Operations
//!
//! Catalog edits and officer hire/fire require an [`AdminGrant`], obtained
//! from [`crate::auth::verify_admin_password`].
//!
//! ## Generic Over StorageBackend
//!
//! `LibraryApi<B: StorageBackend>`:
//! - Production: `LibraryApi<FsBackend>`
//! - Testing: `LibraryApi<MemBackend>`

use crate::auth::AdminGrant;
use crate::commands::{self, books::BookFilter, CmdResult};
use crate::error::Result;
use crate::model::{BookDetails, CampusSelector, Library, SearchMode};
use crate::store::backend::StorageBackend;
use crate::store::{LibraryStore, LoadOrigin};
use chrono::Utc;

pub struct LibraryApi<B: StorageBackend> {
    store: LibraryStore<B>,
    library: Library,
}

impl<B: StorageBackend> LibraryApi<B> {
    pub fn new(store: LibraryStore<B>, library: Library) -> Self {
        Self { store, library }
    }

    /// Opens the store, seeding `campus_names` if it is empty.
    pub fn open(store: LibraryStore<B>, campus_names: &[String]) -> Result<(Self, LoadOrigin)> {
        let opened = store.open(campus_names)?;
        Ok((Self::new(store, opened.library), opened.origin))
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn store(&self) -> &LibraryStore<B> {
        &self.store
    }

    /// Writes the current library to the store.
    pub fn save(&self) -> Result<()> {
        self.store.save(&self.library)
    }

    // --- Campuses ---

    pub fn campuses(&self) -> Result<CmdResult> {
        commands::campuses::list(&self.library)
    }

    // --- Books ---

    pub fn add_book(
        &mut self,
        _grant: &AdminGrant,
        campus: &CampusSelector,
        id: &str,
        title: &str,
        author: &str,
        category: &str,
    ) -> Result<CmdResult> {
        let details = BookDetails::new(title, author, category)?;
        self.mutate(|library| commands::books::add(library, campus, id, details))
    }

    pub fn remove_book(
        &mut self,
        _grant: &AdminGrant,
        campus: &CampusSelector,
        id: &str,
    ) -> Result<CmdResult> {
        self.mutate(|library| commands::books::remove(library, campus, id))
    }

    pub fn update_book(
        &mut self,
        _grant: &AdminGrant,
        campus: &CampusSelector,
        id: &str,
        title: &str,
        author: &str,
        category: &str,
    ) -> Result<CmdResult> {
        let details = BookDetails::new(title, author, category)?;
        self.mutate(|library| commands::books::update(library, campus, id, details))
    }

    /// Officers may edit book details on their own campus without the
    /// administrator password.
    pub fn update_book_as_officer(
        &mut self,
        campus: &CampusSelector,
        officer_id: &str,
        id: &str,
        title: &str,
        author: &str,
        category: &str,
    ) -> Result<CmdResult> {
        let details = BookDetails::new(title, author, category)?;
        self.mutate(|library| {
            commands::books::update_as_officer(library, campus, officer_id, id, details)
        })
    }

    pub fn show_book(&self, campus: &CampusSelector, id: &str) -> Result<CmdResult> {
        commands::books::show(&self.library, campus, id)
    }

    pub fn list_books(&self, campus: &CampusSelector, filter: BookFilter) -> Result<CmdResult> {
        commands::books::list(&self.library, campus, filter)
    }

    pub fn search_books(
        &self,
        campus: &CampusSelector,
        query: &str,
        mode: SearchMode,
    ) -> Result<CmdResult> {
        commands::books::search(&self.library, campus, query, mode)
    }

    // --- Officers ---

    pub fn hire_officer(
        &mut self,
        _grant: &AdminGrant,
        campus: &CampusSelector,
        id: &str,
        name: &str,
    ) -> Result<CmdResult> {
        self.mutate(|library| commands::officers::hire(library, campus, id, name))
    }

    pub fn fire_officer(
        &mut self,
        _grant: &AdminGrant,
        campus: &CampusSelector,
        id: &str,
    ) -> Result<CmdResult> {
        self.mutate(|library| commands::officers::fire(library, campus, id))
    }

    pub fn show_officer(&self, campus: &CampusSelector, id: &str) -> Result<CmdResult> {
        commands::officers::show(&self.library, campus, id)
    }

    pub fn list_officers(&self, campus: &CampusSelector) -> Result<CmdResult> {
        commands::officers::list(&self.library, campus)
    }

    // --- Students ---

    pub fn register_student(
        &mut self,
        campus: &CampusSelector,
        id: &str,
        name: &str,
    ) -> Result<CmdResult> {
        self.mutate(|library| commands::students::register(library, campus, id, name))
    }

    pub fn show_student(&self, campus: &CampusSelector, id: &str) -> Result<CmdResult> {
        commands::students::show(&self.library, campus, id)
    }

    pub fn list_students(&self, campus: &CampusSelector) -> Result<CmdResult> {
        commands::students::list(&self.library, campus)
    }

    // --- Lending ---

    pub fn borrow(
        &mut self,
        campus: &CampusSelector,
        student_id: &str,
        book_id: &str,
    ) -> Result<CmdResult> {
        let now = Utc::now();
        self.mutate(|library| commands::lending::borrow(library, campus, student_id, book_id, now))
    }

    pub fn return_book(
        &mut self,
        campus: &CampusSelector,
        student_id: &str,
        book_id: &str,
    ) -> Result<CmdResult> {
        self.mutate(|library| commands::lending::return_book(library, campus, student_id, book_id))
    }

    pub fn loans(&self, campus: &CampusSelector, student_id: &str) -> Result<CmdResult> {
        commands::lending::loans(&self.library, campus, student_id)
    }

    // --- Notifications ---

    pub fn notify(
        &mut self,
        officer_campus: &CampusSelector,
        officer_id: &str,
        student_campus: &CampusSelector,
        student_id: &str,
        message: &str,
    ) -> Result<CmdResult> {
        self.mutate(|library| {
            commands::notify::send(
                library,
                officer_campus,
                officer_id,
                student_campus,
                student_id,
                message,
            )
        })
    }

    pub fn student_inbox(&self, campus: &CampusSelector, student_id: &str) -> Result<CmdResult> {
        commands::notify::student_inbox(&self.library, campus, student_id)
    }

    pub fn officer_inbox(&self, campus: &CampusSelector, officer_id: &str) -> Result<CmdResult> {
        commands::notify::officer_inbox(&self.library, campus, officer_id)
    }

    // --- Maintenance ---

    /// Repairs availability/loan mismatches. Saves only when something changed.
    pub fn doctor(&mut self) -> Result<CmdResult> {
        let snapshot = self.library.clone();
        let report = commands::doctor::repair(&mut self.library);
        if !report.is_clean() {
            self.persist_or_rollback(snapshot)?;
        }
        Ok(commands::doctor::summarize(&report))
    }

    fn mutate<F>(&mut self, op: F) -> Result<CmdResult>
    where
        F: FnOnce(&mut Library) -> Result<CmdResult>,
    {
        let snapshot = self.library.clone();
        match op(&mut self.library) {
            Ok(result) => {
                self.persist_or_rollback(snapshot)?;
                Ok(result)
            }
            Err(e) => {
                self.library = snapshot;
                Err(e)
            }
        }
    }

    fn persist_or_rollback(&mut self, snapshot: Library) -> Result<()> {
        if let Err(e) = self.store.save(&self.library) {
            tracing::warn!(error = %e, "save failed, rolled back in-memory change");
            self.library = snapshot;
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::verify_admin_password;
    use crate::error::LibraryError;
    use crate::model::{User, DEFAULT_CAMPUSES};
    use crate::store::InMemoryStore;

    fn gc() -> CampusSelector {
        CampusSelector::Index(2)
    }

    fn api() -> LibraryApi<crate::store::mem_backend::MemBackend> {
        let names: Vec<String> = DEFAULT_CAMPUSES.iter().map(|s| s.to_string()).collect();
        let (api, origin) = LibraryApi::open(InMemoryStore::new(), &names).unwrap();
        assert_eq!(origin, LoadOrigin::Seeded);
        api
    }

    fn admin() -> AdminGrant {
        verify_admin_password("micky").unwrap()
    }

    #[test]
    fn every_mutation_is_written_through() {
        let mut api = api();
        let writes = api.store().backend().write_count();

        api.add_book(&admin(), &gc(), "B1", "Intro", "X", "CS").unwrap();
        api.register_student(&gc(), "S1", "Abebe").unwrap();
        api.borrow(&gc(), "S1", "B1").unwrap();

        assert_eq!(api.store().backend().write_count(), writes + 3);
        let stored = api.store().load().unwrap().unwrap();
        assert_eq!(&stored, api.library());
    }

    #[test]
    fn reads_do_not_write() {
        let mut api = api();
        api.register_student(&gc(), "S1", "Abebe").unwrap();
        let writes = api.store().backend().write_count();

        api.list_students(&gc()).unwrap();
        api.student_inbox(&gc(), "S1").unwrap();
        api.campuses().unwrap();

        assert_eq!(api.store().backend().write_count(), writes);
    }

    #[test]
    fn failed_command_does_not_write() {
        let mut api = api();
        let writes = api.store().backend().write_count();

        assert!(api.borrow(&gc(), "S404", "B1").is_err());
        assert_eq!(api.store().backend().write_count(), writes);
    }

    #[test]
    fn failed_save_rolls_back_memory() {
        let mut api = api();
        api.add_book(&admin(), &gc(), "B1", "Intro", "X", "CS").unwrap();
        api.register_student(&gc(), "S1", "Abebe").unwrap();
        let before = api.library().clone();

        api.store().backend().set_simulate_write_error(true);
        let err = api.borrow(&gc(), "S1", "B1").unwrap_err();
        assert!(err.is_persistence());

        assert_eq!(api.library(), &before);
        let campus = api.library().campus(&gc()).unwrap();
        assert!(campus.book("B1").unwrap().is_available());
        assert!(campus.student("S1").unwrap().notifications().is_empty());
    }

    #[test]
    fn invalid_book_details_are_rejected_before_touching_state() {
        let mut api = api();
        let err = api.add_book(&admin(), &gc(), "B1", "Intro", "", "CS").unwrap_err();
        assert!(matches!(err, LibraryError::InvalidInput(_)));
        assert!(api.library().campus(&gc()).unwrap().catalog().is_empty());
    }

    #[test]
    fn doctor_on_clean_library_does_not_write() {
        let mut api = api();
        let writes = api.store().backend().write_count();
        let result = api.doctor().unwrap();
        assert!(result.messages[0].content.contains("No inconsistencies"));
        assert_eq!(api.store().backend().write_count(), writes);
    }

    #[test]
    fn officer_can_update_book_on_own_campus() {
        let mut api = api();
        api.add_book(&admin(), &gc(), "B1", "Intro", "X", "CS").unwrap();
        api.hire_officer(&admin(), &gc(), "O1", "Kebede").unwrap();

        api.update_book_as_officer(&gc(), "O1", "B1", "Intro 2e", "X", "CS").unwrap();

        let stored = api.store().load().unwrap().unwrap();
        let book = stored.campus(&gc()).unwrap().book("B1").unwrap().clone();
        assert_eq!(book.title(), "Intro 2e");
    }

    #[test]
    fn unknown_officer_cannot_update_book() {
        let mut api = api();
        api.add_book(&admin(), &gc(), "B1", "Intro", "X", "CS").unwrap();
        let writes = api.store().backend().write_count();

        let err = api
            .update_book_as_officer(&gc(), "O9", "B1", "Hijacked", "X", "CS")
            .unwrap_err();

        assert!(matches!(
            err,
            LibraryError::NotFound {
                kind: crate::error::EntityKind::Officer,
                ..
            }
        ));
        let campus = api.library().campus(&gc()).unwrap();
        assert_eq!(campus.book("B1").unwrap().title(), "Intro");
        assert_eq!(api.store().backend().write_count(), writes);
    }

    #[test]
    fn officer_of_another_campus_cannot_update_book() {
        let mut api = api();
        api.add_book(&admin(), &gc(), "B1", "Intro", "X", "CS").unwrap();
        api.hire_officer(&admin(), &CampusSelector::Index(1), "O1", "Kebede").unwrap();

        assert!(api
            .update_book_as_officer(&gc(), "O1", "B1", "Hijacked", "X", "CS")
            .is_err());
    }

    #[test]
    fn notify_across_campuses_is_persisted() {
        let mut api = api();
        let atse = CampusSelector::Index(1);
        api.hire_officer(&admin(), &atse, "O1", "Kebede").unwrap();
        api.register_student(&gc(), "S1", "Abebe").unwrap();

        api.notify(&atse, "O1", &gc(), "S1", "Library closes at 5").unwrap();

        let stored = api.store().load().unwrap().unwrap();
        let student = stored.campus(&gc()).unwrap().student("S1").unwrap();
        assert_eq!(student.notifications().len(), 1);
    }
}
