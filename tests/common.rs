//! Shared test doubles for the media host and the submission repository.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use renu_internship_server::media::{
    DeleteOutcome, MediaStore, MediaStoreError, StoredFileReference, UploadOptions,
};
use renu_internship_server::submission::{
    AppendOutcome, CreateOutcome, RepositoryError, SubmissionRecord, SubmissionRepository,
    WeekUpdate,
};

/// In-memory media host. Uploads whose hinted name contains the configured
/// marker fail, to simulate store-side errors deterministically.
pub struct MockMediaStore {
    objects: Mutex<HashMap<String, String>>, // public_id -> folder
    upload_calls: AtomicUsize,
    delete_calls: AtomicUsize,
    fail_uploads_containing: Option<String>,
    fail_deletes: AtomicBool,
}

impl MockMediaStore {
    pub fn new() -> Self {
        Self {
            objects: Mutex::new(HashMap::new()),
            upload_calls: AtomicUsize::new(0),
            delete_calls: AtomicUsize::new(0),
            fail_uploads_containing: None,
            fail_deletes: AtomicBool::new(false),
        }
    }

    pub fn failing_uploads_containing(marker: &str) -> Self {
        Self {
            fail_uploads_containing: Some(marker.to_string()),
            ..Self::new()
        }
    }

    pub fn set_fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    pub async fn object_count(&self) -> usize {
        self.objects.lock().await.len()
    }

    pub async fn objects_in_folder(&self, folder: &str) -> usize {
        self.objects
            .lock()
            .await
            .values()
            .filter(|f| f.as_str() == folder)
            .count()
    }

    pub fn upload_calls(&self) -> usize {
        self.upload_calls.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MediaStore for MockMediaStore {
    async fn upload(
        &self,
        _data: Vec<u8>,
        options: UploadOptions,
    ) -> Result<StoredFileReference, MediaStoreError> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);

        let hint = options.public_id_hint.unwrap_or_else(|| "upload".to_string());
        if let Some(marker) = &self.fail_uploads_containing {
            if hint.contains(marker.as_str()) {
                return Err(MediaStoreError::Rejected(
                    "simulated store failure".to_string(),
                ));
            }
        }

        let public_id = format!("{}/{}", options.folder, hint);
        self.objects
            .lock()
            .await
            .insert(public_id.clone(), options.folder.clone());

        Ok(StoredFileReference {
            url: format!("https://media.test/{public_id}.{}", options.format),
            public_id,
            format: options.format,
        })
    }

    async fn delete(&self, public_id: &str) -> Result<DeleteOutcome, MediaStoreError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(MediaStoreError::Rejected(
                "simulated delete failure".to_string(),
            ));
        }

        match self.objects.lock().await.remove(public_id) {
            Some(_) => Ok(DeleteOutcome::Removed),
            None => Ok(DeleteOutcome::Missing),
        }
    }
}

/// In-memory submission repository mirroring the Postgres implementation's
/// conditional create/append semantics.
pub struct InMemorySubmissionRepository {
    records: Mutex<HashMap<Uuid, SubmissionRecord>>,
}

impl InMemorySubmissionRepository {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
        }
    }

    pub async fn record_count(&self) -> usize {
        self.records.lock().await.len()
    }
}

#[async_trait]
impl SubmissionRepository for InMemorySubmissionRepository {
    async fn find_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<SubmissionRecord>, RepositoryError> {
        Ok(self.records.lock().await.get(&user_id).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<SubmissionRecord>, RepositoryError> {
        Ok(self
            .records
            .lock()
            .await
            .values()
            .find(|record| record.id == id)
            .cloned())
    }

    async fn find_by_week(
        &self,
        user_id: Uuid,
        week_number: i32,
    ) -> Result<Vec<SubmissionRecord>, RepositoryError> {
        Ok(self
            .records
            .lock()
            .await
            .get(&user_id)
            .filter(|record| record.completed_weeks.contains(&week_number))
            .cloned()
            .into_iter()
            .collect())
    }

    async fn create(&self, record: &SubmissionRecord) -> Result<CreateOutcome, RepositoryError> {
        let mut records = self.records.lock().await;
        if records.contains_key(&record.user_id) {
            return Ok(CreateOutcome::AlreadyExists);
        }
        records.insert(record.user_id, record.clone());
        Ok(CreateOutcome::Created)
    }

    async fn append_week(
        &self,
        user_id: Uuid,
        update: &WeekUpdate,
    ) -> Result<AppendOutcome, RepositoryError> {
        let mut records = self.records.lock().await;
        let Some(record) = records.get_mut(&user_id) else {
            return Ok(AppendOutcome::NoRecord);
        };
        if record.completed_weeks.contains(&update.week_number) {
            return Ok(AppendOutcome::DuplicateWeek);
        }

        record.completed_weeks.push(update.week_number);
        record.images.extend(update.images.iter().cloned());
        record.pdfs.extend(update.pdfs.iter().cloned());
        record.links.extend(update.links.iter().cloned());
        record.notes.extend(update.notes.iter().cloned());
        record.updated_at = chrono::Utc::now();
        Ok(AppendOutcome::Updated)
    }

    async fn delete_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<SubmissionRecord>, RepositoryError> {
        let mut records = self.records.lock().await;
        let user_id = records
            .values()
            .find(|record| record.id == id)
            .map(|record| record.user_id);
        Ok(user_id.and_then(|user_id| records.remove(&user_id)))
    }
}
