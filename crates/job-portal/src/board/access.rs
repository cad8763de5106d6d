//! Role and ownership rules applied before any record is read or written.
//!
//! Every rule is a plain equality check on the acting identity. Ownership is
//! judged against the stored creator of the job, never against the caller's
//! role, so an admin acting on an employer endpoint is refused like anyone else.

use super::applications::Application;
use super::identity::{Actor, Role, User};
use super::jobs::Job;

/// Operations reserved for the employer that posted the job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnedAction {
    UpdateJob,
    DeleteJob,
    ViewApplications,
    UpdateApplication,
    DownloadResume,
}

impl OwnedAction {
    pub fn denial(self) -> &'static str {
        match self {
            OwnedAction::UpdateJob => "Not authorized to update this job",
            OwnedAction::DeleteJob => "Not authorized to delete this job",
            OwnedAction::ViewApplications => "Not authorized to view applications for this job",
            OwnedAction::UpdateApplication => "Not authorized to update this application",
            OwnedAction::DownloadResume => "Not authorized",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    #[error("Access denied: {required} role required")]
    RoleRequired { required: Role },
    #[error("{}", .0.denial())]
    NotOwner(OwnedAction),
    #[error("Cannot delete another admin")]
    ProtectedAdmin,
    #[error("Not authorized")]
    ResumeHidden,
}

pub fn require_role(actor: &Actor, required: Role) -> Result<(), AccessError> {
    if actor.role == required {
        Ok(())
    } else {
        Err(AccessError::RoleRequired { required })
    }
}

pub fn ensure_job_owner(actor: &Actor, job: &Job, action: OwnedAction) -> Result<(), AccessError> {
    if job.created_by == actor.id {
        Ok(())
    } else {
        Err(AccessError::NotOwner(action))
    }
}

/// Admins may remove any account except another admin, themselves included.
pub fn ensure_removable(target: &User) -> Result<(), AccessError> {
    if target.role == Role::Admin {
        Err(AccessError::ProtectedAdmin)
    } else {
        Ok(())
    }
}

/// Stored resumes are readable by the applicant, any admin, and the employer
/// owning the job. A missing job leaves only the first two.
pub fn ensure_resume_reader(
    actor: &Actor,
    application: &Application,
    job: Option<&Job>,
) -> Result<(), AccessError> {
    let allowed = actor.role == Role::Admin
        || application.applicant == actor.id
        || job.is_some_and(|job| job.created_by == actor.id);
    if allowed {
        Ok(())
    } else {
        Err(AccessError::ResumeHidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::applications::{ApplicationId, ApplicationStatus};
    use crate::board::identity::UserId;
    use crate::board::jobs::JobId;
    use chrono::Utc;

    fn actor(id: &str, role: Role) -> Actor {
        Actor {
            id: UserId(id.to_string()),
            role,
        }
    }

    fn job(owner: &str) -> Job {
        let now = Utc::now();
        Job {
            id: JobId("job-1".to_string()),
            title: "Rust engineer".to_string(),
            description: "Build services".to_string(),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            salary: None,
            created_by: UserId(owner.to_string()),
            applications: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn application(applicant: &str) -> Application {
        let now = Utc::now();
        Application {
            id: ApplicationId("app-1".to_string()),
            job: JobId("job-1".to_string()),
            applicant: UserId(applicant.to_string()),
            cover_letter: None,
            resume: None,
            status: ApplicationStatus::Applied,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn role_gate_requires_exact_role() {
        let admin = actor("a", Role::Admin);
        assert!(require_role(&admin, Role::Admin).is_ok());
        assert_eq!(
            require_role(&admin, Role::Employer),
            Err(AccessError::RoleRequired {
                required: Role::Employer
            })
        );
    }

    #[test]
    fn only_the_creator_owns_a_job() {
        let posting = job("owner");
        assert!(ensure_job_owner(
            &actor("owner", Role::Employer),
            &posting,
            OwnedAction::UpdateJob
        )
        .is_ok());

        for intruder in [
            actor("rival", Role::Employer),
            actor("root", Role::Admin),
            actor("seeker", Role::Jobseeker),
        ] {
            let denial = ensure_job_owner(&intruder, &posting, OwnedAction::DeleteJob)
                .expect_err("non-creators are refused");
            assert_eq!(denial.to_string(), "Not authorized to delete this job");
        }
    }

    #[test]
    fn admins_cannot_be_removed() {
        let now = Utc::now();
        let mut target = User {
            id: UserId("t".to_string()),
            name: "Target".to_string(),
            email: "t@example.com".to_string(),
            password_hash: String::new(),
            role: Role::Admin,
            created_at: now,
            updated_at: now,
        };
        assert_eq!(ensure_removable(&target), Err(AccessError::ProtectedAdmin));

        target.role = Role::Employer;
        assert!(ensure_removable(&target).is_ok());
    }

    #[test]
    fn resume_readers_are_applicant_admin_and_owner() {
        let posting = job("owner");
        let submitted = application("seeker");

        for reader in [
            actor("seeker", Role::Jobseeker),
            actor("root", Role::Admin),
            actor("owner", Role::Employer),
        ] {
            assert!(ensure_resume_reader(&reader, &submitted, Some(&posting)).is_ok());
        }

        let rival = actor("rival", Role::Employer);
        assert_eq!(
            ensure_resume_reader(&rival, &submitted, Some(&posting)),
            Err(AccessError::ResumeHidden)
        );
        assert!(ensure_resume_reader(&actor("owner", Role::Employer), &submitted, None).is_err());
    }
}
