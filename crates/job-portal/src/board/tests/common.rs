use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use chrono::Utc;
use serde_json::Value;
use tempfile::TempDir;

use crate::board::applications::{
    Application, ApplicationDetails, ApplicationId, ApplicationRepository, ApplicationStatus,
    DiskResumeStore, ResumeUpload, Submission,
};
use crate::board::identity::{
    Actor, Argon2Passwords, Credentials, Registration, Session, TokenIssuer,
};
use crate::board::jobs::{JobDraft, JobId, JobListing};
use crate::board::store::Repositories;
use crate::http::{portal_router, PortalState};

pub(super) const HOST: &str = "jobs.test";
pub(super) const BOUNDARY: &str = "job-portal-boundary";

/// A fully wired board over in-memory repositories and a scratch upload dir.
pub(super) struct Board {
    pub(super) state: PortalState,
    pub(super) repositories: Repositories,
    _uploads: TempDir,
}

pub(super) fn board() -> Board {
    let uploads = tempfile::tempdir().expect("temp upload dir");
    let repositories = Repositories::in_memory();
    let state = PortalState::new(
        repositories.clone(),
        Arc::new(DiskResumeStore::new(uploads.path())),
        Argon2Passwords::with_cost(8, 1, 1).expect("cheap argon2 params"),
        TokenIssuer::new("board-test-secret", 1).expect("token issuer"),
        1024 * 1024,
    );

    Board {
        state,
        repositories,
        _uploads: uploads,
    }
}

pub(super) fn actor_of(session: &Session) -> Actor {
    Actor {
        id: session.user.id.clone(),
        role: session.user.role,
    }
}

impl Board {
    pub(super) fn router(&self) -> Router {
        portal_router(self.state.clone())
    }

    pub(super) fn register(&self, name: &str, role: &str) -> Session {
        self.state
            .accounts
            .register(Registration {
                name: Some(name.to_string()),
                email: Some(format!("{}@example.com", name.to_lowercase())),
                password: Some("correct horse".to_string()),
                role: Some(role.to_string()),
            })
            .expect("registration succeeds")
    }

    pub(super) fn employer(&self, name: &str) -> Session {
        self.register(name, "employer")
    }

    pub(super) fn jobseeker(&self, name: &str) -> Session {
        self.register(name, "jobseeker")
    }

    pub(super) fn admin(&self) -> Session {
        self.state
            .accounts
            .ensure_admin("Root", "root@example.com", "admin password")
            .expect("bootstrap admin");
        self.state
            .accounts
            .login(Credentials {
                email: Some("root@example.com".to_string()),
                password: Some("admin password".to_string()),
            })
            .expect("admin login")
    }

    pub(super) fn post_job(&self, employer: &Session, title: &str) -> JobListing {
        self.state
            .jobs
            .create(&actor_of(employer), draft(title))
            .expect("job created")
    }

    pub(super) fn apply(
        &self,
        seeker: &Session,
        job: &JobId,
        resume: Option<ResumeUpload>,
    ) -> ApplicationDetails {
        self.state
            .applications
            .apply(
                &actor_of(seeker),
                Submission {
                    job_id: Some(job.0.clone()),
                    cover_letter: Some("I would love to join.".to_string()),
                    resume,
                },
            )
            .expect("application submitted")
    }

    /// Store an application without touching the job's id list.
    pub(super) fn insert_unlinked_application(&self, seeker: &Session, job: &JobId) -> Application {
        let now = Utc::now();
        self.repositories
            .applications
            .insert(Application {
                id: ApplicationId::generate(),
                job: job.clone(),
                applicant: seeker.user.id.clone(),
                cover_letter: None,
                resume: None,
                status: ApplicationStatus::Applied,
                created_at: now,
                updated_at: now,
            })
            .expect("direct insert")
    }
}

pub(super) fn draft(title: &str) -> JobDraft {
    JobDraft {
        title: Some(title.to_string()),
        description: Some("Build and run backend services".to_string()),
        company: Some("Acme".to_string()),
        location: Some("Remote".to_string()),
        salary: None,
    }
}

pub(super) fn resume_upload() -> ResumeUpload {
    ResumeUpload {
        file_name: "cv.pdf".to_string(),
        bytes: b"%PDF-1.4 resume".to_vec(),
    }
}

pub(super) fn request(method: Method, uri: &str, token: Option<&str>, body: Body) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::HOST, HOST);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(body).expect("request builds")
}

pub(super) fn json_request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    payload: &Value,
) -> Request<Body> {
    let mut request = request(
        method,
        uri,
        token,
        Body::from(serde_json::to_vec(payload).expect("json body")),
    );
    request.headers_mut().insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("application/json"),
    );
    request
}

/// Hand-built `multipart/form-data` body for the apply endpoint.
pub(super) fn apply_request(token: &str, job: &JobId, resume: Option<&ResumeUpload>) -> Request<Body> {
    let mut body = Vec::new();
    let mut text_part = |name: &str, value: &str| {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    };
    text_part("jobId", &job.0);
    text_part("coverLetter", "Keen to help.");

    if let Some(resume) = resume {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"resume\"; filename=\"{}\"\r\nContent-Type: application/pdf\r\n\r\n",
                resume.file_name
            )
            .as_bytes(),
        );
        body.extend_from_slice(&resume.bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let mut request = request(
        Method::POST,
        "/api/applications/apply",
        Some(token),
        Body::from(body),
    );
    request.headers_mut().insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_str(&format!("multipart/form-data; boundary={BOUNDARY}"))
            .expect("content type"),
    );
    request
}

pub(super) async fn read_body(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body")
        .to_vec()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = read_body(response).await;
    serde_json::from_slice(&body).expect("json payload")
}
