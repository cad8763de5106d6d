use std::sync::Arc;

use super::common::*;

use crate::board::access::{AccessError, OwnedAction};
use crate::board::applications::{
    Application, ApplicationId, ApplicationRepository, ApplicationService,
    ApplicationServiceError, ApplicationStatus, DiskResumeStore, ResumeKey, Submission,
};
use crate::board::identity::{Role, UserId};
use crate::board::jobs::{JobId, JobRepository};
use crate::board::store::{InMemoryApplicationRepository, RepositoryError};

#[test]
fn applying_records_the_application_on_both_sides() {
    let board = board();
    let employer = board.employer("Grace");
    let seeker = board.jobseeker("Sam");
    let posted = board.post_job(&employer, "Backend");

    let details = board.apply(&seeker, &posted.job.id, Some(resume_upload()));

    assert_eq!(details.application.status, ApplicationStatus::Applied);
    assert_eq!(details.application.applicant, seeker.user.id);
    assert_eq!(
        details.job.as_ref().map(|job| job.title.as_str()),
        Some("Backend")
    );
    let key = details.application.resume.as_ref().expect("resume stored");
    assert!(key.url_path().starts_with("uploads/resumes/"));
    assert!(key.url_path().ends_with(".pdf"));

    let job = board
        .repositories
        .jobs
        .fetch(&posted.job.id)
        .expect("fetch")
        .expect("job exists");
    assert_eq!(job.applications, vec![details.application.id.clone()]);
}

#[test]
fn a_second_application_to_the_same_job_is_refused() {
    let board = board();
    let employer = board.employer("Grace");
    let seeker = board.jobseeker("Sam");
    let posted = board.post_job(&employer, "Backend");
    board.apply(&seeker, &posted.job.id, None);

    let err = board
        .state
        .applications
        .apply(
            &actor_of(&seeker),
            Submission {
                job_id: Some(posted.job.id.0.clone()),
                ..Submission::default()
            },
        )
        .expect_err("duplicate refused");
    assert_eq!(err.to_string(), "You have already applied for this job");
    assert_eq!(
        board
            .repositories
            .applications
            .count_for_job(&posted.job.id)
            .expect("count"),
        1
    );
}

#[test]
fn applying_requires_a_jobseeker_and_an_existing_job() {
    let board = board();
    let employer = board.employer("Grace");
    let seeker = board.jobseeker("Sam");
    let posted = board.post_job(&employer, "Backend");

    let err = board
        .state
        .applications
        .apply(
            &actor_of(&employer),
            Submission {
                job_id: Some(posted.job.id.0.clone()),
                ..Submission::default()
            },
        )
        .expect_err("employers cannot apply");
    assert!(matches!(
        err,
        ApplicationServiceError::Access(AccessError::RoleRequired {
            required: Role::Jobseeker
        })
    ));

    let err = board
        .state
        .applications
        .apply(
            &actor_of(&seeker),
            Submission {
                job_id: Some("missing".to_string()),
                ..Submission::default()
            },
        )
        .expect_err("unknown job");
    assert!(matches!(err, ApplicationServiceError::JobNotFound));
}

#[test]
fn invalid_status_is_rejected_before_any_change() {
    let board = board();
    let employer = board.employer("Grace");
    let seeker = board.jobseeker("Sam");
    let posted = board.post_job(&employer, "Backend");
    let submitted = board.apply(&seeker, &posted.job.id, None);

    for requested in [Some("hired"), Some("Accepted"), None] {
        let err = board
            .state
            .applications
            .set_status(&actor_of(&employer), &submitted.application.id, requested)
            .expect_err("invalid status");
        assert!(matches!(err, ApplicationServiceError::InvalidStatus));
    }

    let stored = board
        .repositories
        .applications
        .fetch(&submitted.application.id)
        .expect("fetch")
        .expect("exists");
    assert_eq!(stored.status, ApplicationStatus::Applied);
}

#[test]
fn only_the_job_owner_changes_status() {
    let board = board();
    let owner = board.employer("Grace");
    let rival = board.employer("Linus");
    let seeker = board.jobseeker("Sam");
    let posted = board.post_job(&owner, "Backend");
    let submitted = board.apply(&seeker, &posted.job.id, None);

    let err = board
        .state
        .applications
        .set_status(&actor_of(&rival), &submitted.application.id, Some("accepted"))
        .expect_err("rival refused");
    assert_eq!(err.to_string(), "Not authorized to update this application");

    let updated = board
        .state
        .applications
        .set_status(&actor_of(&owner), &submitted.application.id, Some("reviewed"))
        .expect("owner updates");
    assert_eq!(updated.application.status, ApplicationStatus::Reviewed);

    let err = board
        .state
        .applications
        .set_status(
            &actor_of(&owner),
            &ApplicationId("missing".to_string()),
            Some("accepted"),
        )
        .expect_err("unknown application");
    assert!(matches!(err, ApplicationServiceError::ApplicationNotFound));
}

#[test]
fn employers_see_applications_only_for_their_own_jobs() {
    let board = board();
    let owner = board.employer("Grace");
    let rival = board.employer("Linus");
    let seeker = board.jobseeker("Sam");
    let posted = board.post_job(&owner, "Backend");
    board.apply(&seeker, &posted.job.id, None);

    let received = board
        .state
        .applications
        .for_job(&actor_of(&owner), &posted.job.id)
        .expect("owner view");
    assert_eq!(received.job_title, "Backend");
    assert_eq!(received.applications.len(), 1);

    let err = board
        .state
        .applications
        .for_job(&actor_of(&rival), &posted.job.id)
        .expect_err("rival refused");
    assert!(matches!(
        err,
        ApplicationServiceError::Access(AccessError::NotOwner(OwnedAction::ViewApplications))
    ));

    let err = board
        .state
        .applications
        .for_job(&actor_of(&owner), &JobId("missing".to_string()))
        .expect_err("unknown job");
    assert!(matches!(err, ApplicationServiceError::JobNotFound));
}

#[test]
fn jobseekers_list_only_their_own_applications() {
    let board = board();
    let employer = board.employer("Grace");
    let sam = board.jobseeker("Sam");
    let ada = board.jobseeker("Ada");
    let backend = board.post_job(&employer, "Backend");
    let frontend = board.post_job(&employer, "Frontend");
    board.apply(&sam, &backend.job.id, None);
    board.apply(&sam, &frontend.job.id, None);
    board.apply(&ada, &backend.job.id, None);

    let mine = board.state.applications.mine(&actor_of(&sam)).expect("mine");
    assert_eq!(mine.len(), 2);
    assert!(mine
        .iter()
        .all(|details| details.application.applicant == sam.user.id));
}

#[test]
fn resume_download_is_limited_to_the_owning_employer() {
    let board = board();
    let owner = board.employer("Grace");
    let rival = board.employer("Linus");
    let seeker = board.jobseeker("Sam");
    let posted = board.post_job(&owner, "Backend");
    let with_resume = board.apply(&seeker, &posted.job.id, Some(resume_upload()));

    let file = board
        .state
        .applications
        .resume(&actor_of(&owner), &with_resume.application.id)
        .expect("owner downloads");
    assert_eq!(file.bytes, resume_upload().bytes);
    assert!(file.file_name.ends_with(".pdf"));

    let err = board
        .state
        .applications
        .resume(&actor_of(&rival), &with_resume.application.id)
        .expect_err("rival refused");
    assert!(matches!(
        err,
        ApplicationServiceError::Access(AccessError::NotOwner(OwnedAction::DownloadResume))
    ));

    let other_seeker = board.jobseeker("Ada");
    let without_resume = board.apply(&other_seeker, &posted.job.id, None);
    let err = board
        .state
        .applications
        .resume(&actor_of(&owner), &without_resume.application.id)
        .expect_err("nothing to download");
    assert!(matches!(err, ApplicationServiceError::ResumeMissing));
}

#[test]
fn stored_resumes_are_served_to_applicant_admin_and_owner() {
    let board = board();
    let owner = board.employer("Grace");
    let rival = board.employer("Linus");
    let seeker = board.jobseeker("Sam");
    let admin = board.admin();
    let posted = board.post_job(&owner, "Backend");
    let details = board.apply(&seeker, &posted.job.id, Some(resume_upload()));
    let key = details.application.resume.expect("resume stored");

    for reader in [&seeker, &admin, &owner] {
        let file = board
            .state
            .applications
            .stored_resume(&actor_of(reader), &key)
            .expect("reader allowed");
        assert_eq!(file.bytes, resume_upload().bytes);
    }

    let err = board
        .state
        .applications
        .stored_resume(&actor_of(&rival), &key)
        .expect_err("rival refused");
    assert_eq!(err.to_string(), "Not authorized");
}

/// Accepts reads but refuses every insert.
struct RefusingInserts(InMemoryApplicationRepository);

impl ApplicationRepository for RefusingInserts {
    fn insert(&self, _application: Application) -> Result<Application, RepositoryError> {
        Err(RepositoryError::Unavailable("write refused".to_string()))
    }
    fn fetch(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError> {
        self.0.fetch(id)
    }
    fn update(&self, application: Application) -> Result<(), RepositoryError> {
        self.0.update(application)
    }
    fn find_for(&self, job: &JobId, applicant: &UserId) -> Result<Option<Application>, RepositoryError> {
        self.0.find_for(job, applicant)
    }
    fn find_by_resume(&self, resume: &ResumeKey) -> Result<Option<Application>, RepositoryError> {
        self.0.find_by_resume(resume)
    }
    fn list_for_job(&self, job: &JobId) -> Result<Vec<Application>, RepositoryError> {
        self.0.list_for_job(job)
    }
    fn list_for_applicant(&self, applicant: &UserId) -> Result<Vec<Application>, RepositoryError> {
        self.0.list_for_applicant(applicant)
    }
    fn count_for_job(&self, job: &JobId) -> Result<usize, RepositoryError> {
        self.0.count_for_job(job)
    }
}

#[test]
fn failed_insert_leaves_no_resume_behind() {
    let board = board();
    let employer = board.employer("Grace");
    let seeker = board.jobseeker("Sam");
    let posted = board.post_job(&employer, "Backend");

    let uploads = tempfile::tempdir().expect("temp upload dir");
    let service = ApplicationService::new(
        Arc::new(RefusingInserts(InMemoryApplicationRepository::default())),
        board.repositories.jobs.clone(),
        board.repositories.users.clone(),
        Arc::new(DiskResumeStore::new(uploads.path())),
    );

    let err = service
        .apply(
            &actor_of(&seeker),
            Submission {
                job_id: Some(posted.job.id.0.clone()),
                cover_letter: None,
                resume: Some(resume_upload()),
            },
        )
        .expect_err("insert refused");
    assert!(matches!(err, ApplicationServiceError::Repository(_)));

    let leftovers = std::fs::read_dir(uploads.path().join("resumes"))
        .expect("resume folder exists")
        .count();
    assert_eq!(leftovers, 0);
}
