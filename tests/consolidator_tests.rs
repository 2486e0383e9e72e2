//! End-to-end tests of the submission consolidator against in-memory doubles.

mod common;

use std::sync::Arc;

use uuid::Uuid;

use common::{InMemorySubmissionRepository, MockMediaStore};
use renu_internship_server::submission::{
    AppendOutcome, NewSubmission, SubmissionConsolidator, SubmissionError, SubmissionMetadata,
    SubmissionRepository, UploadedFile, WeekUpdate,
};

fn png(name: &str) -> UploadedFile {
    UploadedFile {
        content: vec![0x89, 0x50, 0x4E, 0x47],
        content_type: "image/png".to_string(),
        file_name: name.to_string(),
    }
}

fn jpeg(name: &str) -> UploadedFile {
    UploadedFile {
        content: vec![0xFF, 0xD8, 0xFF],
        content_type: "image/jpeg".to_string(),
        file_name: name.to_string(),
    }
}

fn pdf(name: &str) -> UploadedFile {
    UploadedFile {
        content: b"%PDF-1.4".to_vec(),
        content_type: "application/pdf".to_string(),
        file_name: name.to_string(),
    }
}

fn metadata(user_id: Uuid, week: i32) -> SubmissionMetadata {
    SubmissionMetadata {
        user_id,
        username: "jane".to_string(),
        department_id: None,
        week_number: week,
        notes: vec![format!("week {week} notes")],
        links: vec![format!("https://repo.example.com/week-{week}")],
    }
}

fn consolidator(
    media: Arc<MockMediaStore>,
    repository: Arc<InMemorySubmissionRepository>,
) -> SubmissionConsolidator {
    SubmissionConsolidator::new(media, repository)
}

#[tokio::test]
async fn first_submission_creates_the_record() {
    let media = Arc::new(MockMediaStore::new());
    let repository = Arc::new(InMemorySubmissionRepository::new());
    let consolidator = consolidator(media.clone(), repository.clone());
    let user = Uuid::new_v4();

    let record = consolidator
        .submit(NewSubmission {
            metadata: metadata(user, 1),
            files: vec![pdf("report.pdf"), png("screen.png")],
        })
        .await
        .expect("first submission should succeed");

    assert_eq!(record.completed_weeks, vec![1]);
    assert_eq!(record.images.len(), 1);
    assert_eq!(record.pdfs.len(), 1);
    assert_eq!(media.object_count().await, 2);
    assert_eq!(
        media
            .objects_in_folder(&format!("submissions/{user}/pdfs"))
            .await,
        1
    );
    assert_eq!(
        media
            .objects_in_folder(&format!("submissions/{user}/images"))
            .await,
        1
    );
}

#[tokio::test]
async fn two_weeks_accumulate_in_order() {
    let media = Arc::new(MockMediaStore::new());
    let repository = Arc::new(InMemorySubmissionRepository::new());
    let consolidator = consolidator(media.clone(), repository.clone());
    let user = Uuid::new_v4();

    consolidator
        .submit(NewSubmission {
            metadata: metadata(user, 1),
            files: vec![pdf("w1.pdf"), png("w1-a.png"), jpeg("w1-b.jpg"), png("w1-c.png")],
        })
        .await
        .expect("week 1 should succeed");

    let record = consolidator
        .submit(NewSubmission {
            metadata: metadata(user, 2),
            files: vec![pdf("w2.pdf"), png("w2-a.png"), jpeg("w2-b.jpg"), png("w2-c.png")],
        })
        .await
        .expect("week 2 should succeed");

    assert_eq!(record.completed_weeks, vec![1, 2]);
    assert_eq!(record.pdfs.len(), 2);
    assert_eq!(record.images.len(), 6);
    // Prior entries stay in place and in order.
    assert!(record.pdfs[0].public_id.contains("w1"));
    assert!(record.pdfs[1].public_id.contains("w2"));
    assert!(record.images[0].public_id.contains("w1-a"));
    assert!(record.images[3].public_id.contains("w2-a"));
    assert_eq!(
        record.notes,
        vec!["week 1 notes".to_string(), "week 2 notes".to_string()]
    );
    assert_eq!(record.links.len(), 2);
    assert_eq!(media.object_count().await, 8);
    assert_eq!(repository.record_count().await, 1);
}

#[tokio::test]
async fn duplicate_week_is_rejected_and_uploads_are_compensated() {
    let media = Arc::new(MockMediaStore::new());
    let repository = Arc::new(InMemorySubmissionRepository::new());
    let consolidator = consolidator(media.clone(), repository.clone());
    let user = Uuid::new_v4();

    consolidator
        .submit(NewSubmission {
            metadata: metadata(user, 2),
            files: vec![png("first.png"), pdf("first.pdf")],
        })
        .await
        .expect("first week-2 submission should succeed");

    let err = consolidator
        .submit(NewSubmission {
            metadata: metadata(user, 2),
            files: vec![png("second.png")],
        })
        .await
        .expect_err("second week-2 submission must fail");

    assert!(matches!(err, SubmissionError::DuplicateWeek(2)));
    // The store holds exactly the first call's files; the rejected call's
    // upload was deleted again.
    assert_eq!(media.object_count().await, 2);

    let record = repository
        .find_by_user(user)
        .await
        .unwrap()
        .expect("record must survive");
    assert_eq!(record.completed_weeks, vec![2]);
    assert_eq!(record.images.len(), 1);
}

#[tokio::test]
async fn validation_failure_reaches_no_remote_call() {
    let media = Arc::new(MockMediaStore::new());
    let repository = Arc::new(InMemorySubmissionRepository::new());
    let consolidator = consolidator(media.clone(), repository.clone());

    let err = consolidator
        .submit(NewSubmission {
            metadata: metadata(Uuid::new_v4(), 1),
            files: vec![pdf("a.pdf"), pdf("b.pdf")],
        })
        .await
        .expect_err("two PDFs must be rejected");

    assert!(matches!(err, SubmissionError::Validation(_)));
    assert_eq!(media.upload_calls(), 0);
    assert_eq!(repository.record_count().await, 0);
}

#[tokio::test]
async fn failed_upload_rolls_back_the_files_that_landed() {
    let media = Arc::new(MockMediaStore::failing_uploads_containing("broken"));
    let repository = Arc::new(InMemorySubmissionRepository::new());
    let consolidator = consolidator(media.clone(), repository.clone());

    let err = consolidator
        .submit(NewSubmission {
            metadata: metadata(Uuid::new_v4(), 1),
            files: vec![png("fine.png"), jpeg("broken.jpg")],
        })
        .await
        .expect_err("the failing upload must fail the submission");

    assert!(matches!(err, SubmissionError::Upload { .. }));
    if let SubmissionError::Upload { file_name, .. } = err {
        assert_eq!(file_name, "broken.jpg");
    }
    // No orphaned remote objects, no record.
    assert_eq!(media.object_count().await, 0);
    assert_eq!(repository.record_count().await, 0);
}

#[tokio::test]
async fn delete_missing_submission_touches_no_remote_file() {
    let media = Arc::new(MockMediaStore::new());
    let repository = Arc::new(InMemorySubmissionRepository::new());
    let consolidator = consolidator(media.clone(), repository.clone());

    let err = consolidator
        .delete_submission(Uuid::new_v4())
        .await
        .expect_err("deleting an unknown submission must fail");

    assert!(matches!(err, SubmissionError::NotFound));
    assert_eq!(media.delete_calls(), 0);
}

#[tokio::test]
async fn delete_submission_removes_every_remote_file_then_the_record() {
    let media = Arc::new(MockMediaStore::new());
    let repository = Arc::new(InMemorySubmissionRepository::new());
    let consolidator = consolidator(media.clone(), repository.clone());
    let user = Uuid::new_v4();

    let record = consolidator
        .submit(NewSubmission {
            metadata: metadata(user, 1),
            files: vec![pdf("w1.pdf"), png("w1-a.png"), jpeg("w1-b.jpg")],
        })
        .await
        .expect("submission should succeed");

    consolidator
        .delete_submission(record.id)
        .await
        .expect("delete should succeed");

    assert_eq!(media.delete_calls(), 3);
    assert_eq!(media.object_count().await, 0);
    assert_eq!(repository.record_count().await, 0);
}

#[tokio::test]
async fn delete_submission_keeps_the_record_when_cleanup_fails() {
    let media = Arc::new(MockMediaStore::new());
    let repository = Arc::new(InMemorySubmissionRepository::new());
    let consolidator = consolidator(media.clone(), repository.clone());
    let user = Uuid::new_v4();

    let record = consolidator
        .submit(NewSubmission {
            metadata: metadata(user, 1),
            files: vec![png("w1.png")],
        })
        .await
        .expect("submission should succeed");

    media.set_fail_deletes(true);
    let err = consolidator
        .delete_submission(record.id)
        .await
        .expect_err("delete must surface the cleanup failure");

    assert!(matches!(
        err,
        SubmissionError::Cleanup {
            attempted: 1,
            failed: 1
        }
    ));
    assert_eq!(repository.record_count().await, 1);
}

#[tokio::test]
async fn queries_return_empty_results_when_nothing_exists() {
    let media = Arc::new(MockMediaStore::new());
    let repository = Arc::new(InMemorySubmissionRepository::new());
    let consolidator = consolidator(media.clone(), repository.clone());
    let user = Uuid::new_v4();

    assert!(consolidator
        .submissions_for_user(user)
        .await
        .unwrap()
        .is_empty());
    assert!(consolidator
        .submissions_by_week(user, 3)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn week_queries_match_only_completed_weeks() {
    let media = Arc::new(MockMediaStore::new());
    let repository = Arc::new(InMemorySubmissionRepository::new());
    let consolidator = consolidator(media.clone(), repository.clone());
    let user = Uuid::new_v4();

    consolidator
        .submit(NewSubmission {
            metadata: metadata(user, 4),
            files: vec![png("w4.png")],
        })
        .await
        .expect("submission should succeed");

    assert_eq!(consolidator.submissions_by_week(user, 4).await.unwrap().len(), 1);
    assert!(consolidator
        .submissions_by_week(user, 5)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn repository_conditional_append_reports_duplicates() {
    let repository = InMemorySubmissionRepository::new();
    let user = Uuid::new_v4();

    let seed = renu_internship_server::submission::SubmissionRecord::first_week(
        &metadata(user, 1),
        Vec::new(),
        Vec::new(),
    );
    repository.create(&seed).await.unwrap();

    let update = WeekUpdate {
        week_number: 1,
        images: Vec::new(),
        pdfs: Vec::new(),
        links: Vec::new(),
        notes: Vec::new(),
    };
    let outcome = repository.append_week(user, &update).await.unwrap();
    assert_eq!(outcome, AppendOutcome::DuplicateWeek);

    let record = repository.find_by_user(user).await.unwrap().unwrap();
    assert_eq!(record.completed_weeks, vec![1]);
    assert!(record.notes.is_empty());
}
