use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;

use super::RepositoryError;
use crate::board::applications::{Application, ApplicationId, ApplicationRepository, ResumeKey};
use crate::board::identity::{User, UserId, UserRepository};
use crate::board::jobs::{Job, JobId, JobRepository};

fn lock<'a, T>(
    mutex: &'a Mutex<Vec<T>>,
    collection: &str,
) -> Result<MutexGuard<'a, Vec<T>>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Unavailable(format!("{collection} lock poisoned")))
}

#[derive(Default, Clone)]
pub struct InMemoryUserRepository {
    records: Arc<Mutex<Vec<User>>>,
}

impl UserRepository for InMemoryUserRepository {
    fn insert(&self, user: User) -> Result<User, RepositoryError> {
        let mut guard = lock(&self.records, "users")?;
        if guard
            .iter()
            .any(|existing| existing.id == user.id || existing.email == user.email)
        {
            return Err(RepositoryError::Conflict);
        }
        guard.push(user.clone());
        Ok(user)
    }

    fn fetch(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        let guard = lock(&self.records, "users")?;
        Ok(guard.iter().find(|user| &user.id == id).cloned())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let guard = lock(&self.records, "users")?;
        Ok(guard.iter().find(|user| user.email == email).cloned())
    }

    fn list(&self) -> Result<Vec<User>, RepositoryError> {
        Ok(lock(&self.records, "users")?.clone())
    }

    fn delete(&self, id: &UserId) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.records, "users")?;
        let before = guard.len();
        guard.retain(|user| &user.id != id);
        if guard.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[derive(Default, Clone)]
pub struct InMemoryJobRepository {
    records: Arc<Mutex<Vec<Job>>>,
}

impl JobRepository for InMemoryJobRepository {
    fn insert(&self, job: Job) -> Result<Job, RepositoryError> {
        let mut guard = lock(&self.records, "jobs")?;
        if guard.iter().any(|existing| existing.id == job.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(job.clone());
        Ok(job)
    }

    fn fetch(&self, id: &JobId) -> Result<Option<Job>, RepositoryError> {
        let guard = lock(&self.records, "jobs")?;
        Ok(guard.iter().find(|job| &job.id == id).cloned())
    }

    fn update(&self, job: Job) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.records, "jobs")?;
        let slot = guard
            .iter_mut()
            .find(|existing| existing.id == job.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = job;
        Ok(())
    }

    fn delete(&self, id: &JobId) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.records, "jobs")?;
        let before = guard.len();
        guard.retain(|job| &job.id != id);
        if guard.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    fn list(&self) -> Result<Vec<Job>, RepositoryError> {
        Ok(lock(&self.records, "jobs")?.clone())
    }

    fn list_by_creator(&self, creator: &UserId) -> Result<Vec<Job>, RepositoryError> {
        let guard = lock(&self.records, "jobs")?;
        Ok(guard
            .iter()
            .filter(|job| &job.created_by == creator)
            .cloned()
            .collect())
    }

    fn push_application(
        &self,
        id: &JobId,
        application: ApplicationId,
    ) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.records, "jobs")?;
        let job = guard
            .iter_mut()
            .find(|job| &job.id == id)
            .ok_or(RepositoryError::NotFound)?;
        job.applications.push(application);
        job.updated_at = Utc::now();
        Ok(())
    }
}

#[derive(Default, Clone)]
pub struct InMemoryApplicationRepository {
    records: Arc<Mutex<Vec<Application>>>,
}

impl ApplicationRepository for InMemoryApplicationRepository {
    fn insert(&self, application: Application) -> Result<Application, RepositoryError> {
        let mut guard = lock(&self.records, "applications")?;
        if guard.iter().any(|existing| existing.id == application.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(application.clone());
        Ok(application)
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError> {
        let guard = lock(&self.records, "applications")?;
        Ok(guard.iter().find(|record| &record.id == id).cloned())
    }

    fn update(&self, application: Application) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.records, "applications")?;
        let slot = guard
            .iter_mut()
            .find(|existing| existing.id == application.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = application;
        Ok(())
    }

    fn find_for(
        &self,
        job: &JobId,
        applicant: &UserId,
    ) -> Result<Option<Application>, RepositoryError> {
        let guard = lock(&self.records, "applications")?;
        Ok(guard
            .iter()
            .find(|record| &record.job == job && &record.applicant == applicant)
            .cloned())
    }

    fn find_by_resume(&self, resume: &ResumeKey) -> Result<Option<Application>, RepositoryError> {
        let wanted = resume.url_path();
        let guard = lock(&self.records, "applications")?;
        Ok(guard
            .iter()
            .find(|record| {
                record
                    .resume
                    .as_ref()
                    .is_some_and(|key| key.url_path() == wanted)
            })
            .cloned())
    }

    fn list_for_job(&self, job: &JobId) -> Result<Vec<Application>, RepositoryError> {
        let guard = lock(&self.records, "applications")?;
        Ok(guard
            .iter()
            .filter(|record| &record.job == job)
            .cloned()
            .collect())
    }

    fn list_for_applicant(&self, applicant: &UserId) -> Result<Vec<Application>, RepositoryError> {
        let guard = lock(&self.records, "applications")?;
        Ok(guard
            .iter()
            .filter(|record| &record.applicant == applicant)
            .cloned()
            .collect())
    }

    fn count_for_job(&self, job: &JobId) -> Result<usize, RepositoryError> {
        let guard = lock(&self.records, "applications")?;
        Ok(guard.iter().filter(|record| &record.job == job).count())
    }
}
