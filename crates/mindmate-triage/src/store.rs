//! Static reference data loaded once at startup.
//!
//! Each resource is independent. A missing file or a malformed one yields an
//! empty collection and a log line; loading never fails the process.

use std::path::Path;
use std::sync::Arc;

use mindmate_common::{Doctor, KnowledgeEntry, SleepTip};
use serde::de::DeserializeOwned;
use tracing::{error, info, warn};

use crate::knowledge::KnowledgeStore;

pub const KNOWLEDGE_FILE: &str = "knowledge.json";
pub const DOCTORS_FILE: &str = "doctors.json";
pub const SLEEP_TIPS_FILE: &str = "sleep_tips.json";

/// Immutable, shareable view of every static resource.
#[derive(Clone)]
pub struct Catalog {
    pub knowledge: Arc<KnowledgeStore>,
    pub doctors: Arc<Vec<Doctor>>,
    pub sleep_tips: Arc<Vec<SleepTip>>,
}

impl Catalog {
    pub fn new(knowledge: Vec<KnowledgeEntry>, doctors: Vec<Doctor>, sleep_tips: Vec<SleepTip>) -> Self {
        Self {
            knowledge: Arc::new(KnowledgeStore::new(knowledge)),
            doctors: Arc::new(doctors),
            sleep_tips: Arc::new(sleep_tips),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new(), Vec::new())
    }

    pub fn load(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let knowledge: Vec<KnowledgeEntry> = load_records(&dir.join(KNOWLEDGE_FILE));
        let doctors: Vec<Doctor> = load_records(&dir.join(DOCTORS_FILE));
        let sleep_tips: Vec<SleepTip> = load_records(&dir.join(SLEEP_TIPS_FILE));

        info!(
            entries = knowledge.len(),
            doctors = doctors.len(),
            sleep_tips = sleep_tips.len(),
            dir = %dir.display(),
            "Loaded knowledge entries: {}",
            knowledge.len()
        );
        Self::new(knowledge, doctors, sleep_tips)
    }
}

/// Read a JSON array of records. Never fails: problems are logged and an
/// empty list is returned.
pub fn load_records<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "Data file not found, using empty list");
            return Vec::new();
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "Failed to read data file");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<T>>(&raw) {
        Ok(records) => records,
        Err(e) => {
            error!(path = %path.display(), error = %e, "JSON load error");
            Vec::new()
        }
    }
}
