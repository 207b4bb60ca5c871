use crate::api::LibraryApi;
use crate::auth::{verify_admin_password, AdminGrant};
use crate::model::{CampusSelector, DEFAULT_CAMPUSES};
use crate::store::fs_backend::FsBackend;
use crate::store::FileStore;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestEnv {
    // Keeps the directory alive until the test is done
    pub _temp_dir: TempDir,
    pub data_file: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let data_file = temp_dir.path().join("library_data.json");
        Self {
            _temp_dir: temp_dir,
            data_file,
        }
    }

    pub fn store(&self) -> FileStore {
        FileStore::at(&self.data_file)
    }

    /// Opens (or seeds) the library at this env's data file.
    pub fn api(&self) -> LibraryApi<FsBackend> {
        let names: Vec<String> = DEFAULT_CAMPUSES.iter().map(|s| s.to_string()).collect();
        let (api, _) = LibraryApi::open(self.store(), &names).expect("failed to open library");
        api
    }

    pub fn admin() -> AdminGrant {
        verify_admin_password("micky").expect("admin password")
    }

    pub fn gc() -> CampusSelector {
        CampusSelector::Index(2)
    }
}
