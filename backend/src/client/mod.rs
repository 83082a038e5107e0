//! Client facade over the HR API.
//!
//! [`HrClient`] signs in, runs the workflow services on behalf of the
//! signed-in user, and mirrors every result or failure into an [`HrStore`].
//! The store sits behind a `std::sync::Mutex` that is only locked between
//! awaits.

mod store;

pub use store::{EntityStore, HrStore, Identified};

use std::collections::BTreeSet;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::NaiveDate;
use tracing::debug;

use crate::domain::ports::{
    AccessRequest, AuthApi, Credentials, DecisionNotifier, HrPorts, InternshipsApi,
    JobApplicationsApi, LeavesApi, MissionsApi, TracingDecisionNotifier, UserUpdate, UsersApi,
    WorkHoursApi,
};
use crate::domain::{
    Actor, Capability, DashboardStats, Error, Internship, InternshipId, InternshipService,
    InternshipStatus, InternshipUpdate, JobApplication, JobApplicationId, JobApplicationService,
    JobApplicationUpdate, Leave, LeaveId, LeaveService, LeaveUpdate, Mission, MissionId,
    MissionService, MissionUpdate, NewInternship, NewJobApplication, NewLeave, NewMission,
    NewWorkHours, User, UserDirectory, UserFilter, UserId, WorkHours, WorkHoursService,
    capabilities,
};
use crate::outbound::hr_api::HrApiHttpClient;

fn users(store: &mut HrStore) -> &mut EntityStore<User> {
    &mut store.users
}

fn leaves(store: &mut HrStore) -> &mut EntityStore<Leave> {
    &mut store.leaves
}

fn missions(store: &mut HrStore) -> &mut EntityStore<Mission> {
    &mut store.missions
}

fn work_hours(store: &mut HrStore) -> &mut EntityStore<WorkHours> {
    &mut store.work_hours
}

fn internships(store: &mut HrStore) -> &mut EntityStore<Internship> {
    &mut store.internships
}

fn job_applications(store: &mut HrStore) -> &mut EntityStore<JobApplication> {
    &mut store.job_applications
}

/// Signed-in HR session with cached entity state.
pub struct HrClient {
    auth: Arc<dyn AuthApi>,
    users: UserDirectory<dyn UsersApi>,
    leaves: LeaveService<dyn LeavesApi, dyn UsersApi>,
    missions: MissionService<dyn MissionsApi>,
    work_hours: WorkHoursService<dyn WorkHoursApi>,
    internships: InternshipService<dyn InternshipsApi>,
    job_applications: JobApplicationService<dyn JobApplicationsApi, dyn DecisionNotifier>,
    store: Mutex<HrStore>,
}

impl HrClient {
    /// Client over the reqwest adapter, logging decision notifications.
    pub fn new(api: HrApiHttpClient) -> Self {
        let api = Arc::new(api);
        Self::from_ports(
            api.clone(),
            HrPorts::shared(api),
            Arc::new(TracingDecisionNotifier),
        )
    }

    /// Client over explicit ports.
    pub fn from_ports(
        auth: Arc<dyn AuthApi>,
        ports: HrPorts,
        notifier: Arc<dyn DecisionNotifier>,
    ) -> Self {
        let HrPorts {
            users,
            leaves,
            missions,
            work_hours,
            internships,
            job_applications,
        } = ports;
        Self {
            auth,
            users: UserDirectory::new(users.clone()),
            leaves: LeaveService::new(leaves, users),
            missions: MissionService::new(missions),
            work_hours: WorkHoursService::new(work_hours),
            internships: InternshipService::new(internships),
            job_applications: JobApplicationService::new(job_applications, notifier),
            store: Mutex::new(HrStore::new()),
        }
    }

    /// Read the cached state.
    pub fn read<R>(&self, f: impl FnOnce(&HrStore) -> R) -> R {
        let guard = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Copy of the cached state.
    pub fn snapshot(&self) -> HrStore {
        self.read(HrStore::clone)
    }

    fn update<R>(&self, f: impl FnOnce(&mut HrStore) -> R) -> R {
        let mut guard = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// Run `call` with the collection marked as loading, recording failure.
    async fn tracked<E, T, Fut>(
        &self,
        slot: fn(&mut HrStore) -> &mut EntityStore<E>,
        call: Fut,
    ) -> Result<T, Error>
    where
        E: Identified + Clone,
        Fut: Future<Output = Result<T, Error>>,
    {
        self.update(|store| slot(store).begin());
        let outcome = call.await;
        if let Err(error) = &outcome {
            let error = error.clone();
            self.update(|store| slot(store).fail(error));
        }
        outcome
    }

    /// The signed-in user as an [`Actor`].
    ///
    /// # Errors
    ///
    /// Returns `Unauthenticated` before [`HrClient::login`] succeeds.
    pub fn actor(&self) -> Result<Actor, Error> {
        self.read(|store| store.current_user().map(User::actor))
            .ok_or_else(|| Error::unauthenticated("sign in before acting"))
    }

    /// Capabilities of the signed-in user; empty when signed out.
    pub fn capabilities(&self) -> BTreeSet<Capability> {
        self.actor()
            .map(|actor| capabilities(actor.role()))
            .unwrap_or_default()
    }

    /// Whether a token is held.
    pub fn is_authenticated(&self) -> bool {
        self.auth.is_authenticated()
    }

    /// Obtain tokens and load the signed-in user.
    pub async fn login(&self, credentials: &Credentials) -> Result<User, Error> {
        self.update(HrStore::clear);
        self.auth.login(credentials).await?;
        let user = self.tracked(users, self.users.current()).await?;
        debug!(user_id = %user.id(), role = user.role().as_str(), "signed in");
        self.update(|store| store.set_current_user(user.clone()));
        Ok(user)
    }

    /// Drop tokens and every cached collection.
    pub fn logout(&self) {
        self.auth.logout();
        self.update(HrStore::clear);
    }

    /// Reload the signed-in user, e.g. after a balance change elsewhere.
    pub async fn refresh_current_user(&self) -> Result<User, Error> {
        let user = self.tracked(users, self.users.current()).await?;
        self.update(|store| store.set_current_user(user.clone()));
        Ok(user)
    }

    /// Load users matching `filter`.
    pub async fn fetch_users(&self, filter: &UserFilter) -> Result<Vec<User>, Error> {
        let listed = self.tracked(users, self.users.list(filter)).await?;
        self.update(|store| store.users.replace_all(listed.clone()));
        Ok(listed)
    }

    /// Edit a profile, keeping the signed-in user in sync.
    pub async fn update_user(&self, user: &User, update: &UserUpdate) -> Result<User, Error> {
        let updated = self
            .tracked(users, self.users.update(user.id(), update))
            .await?;
        self.update(|store| {
            if store.current_user().is_some_and(|current| current.id() == updated.id()) {
                store.set_current_user(updated.clone());
            } else {
                store.users.upsert(updated.clone());
            }
        });
        Ok(updated)
    }

    /// Remove an account.
    pub async fn delete_user(&self, id: UserId) -> Result<(), Error> {
        let actor = self.actor()?;
        self.tracked(users, self.users.delete(actor, id)).await?;
        self.update(|store| store.users.remove(id));
        Ok(())
    }

    /// Ask for an account. No sign-in is required and nothing is cached.
    pub async fn request_access(&self, request: &AccessRequest) -> Result<User, Error> {
        self.users.request_access(request).await
    }

    /// Load the accounts awaiting approval into the users collection.
    pub async fn fetch_access_requests(&self) -> Result<Vec<User>, Error> {
        let actor = self.actor()?;
        let pending = self
            .tracked(users, self.users.pending_requests(actor))
            .await?;
        self.update(|store| {
            for user in &pending {
                store.users.upsert(user.clone());
            }
        });
        Ok(pending)
    }

    /// Activate a requested account.
    pub async fn approve_user(&self, id: UserId) -> Result<User, Error> {
        let actor = self.actor()?;
        let user = self
            .tracked(users, self.users.approve_request(actor, id))
            .await?;
        self.update(|store| store.users.upsert(user.clone()));
        Ok(user)
    }

    /// Turn down a requested account and drop it from the cache.
    pub async fn reject_user(&self, id: UserId) -> Result<(), Error> {
        let actor = self.actor()?;
        self.tracked(users, self.users.reject_request(actor, id))
            .await?;
        self.update(|store| store.users.remove(id));
        Ok(())
    }

    /// Load all leaves visible to the signed-in user.
    pub async fn fetch_leaves(&self) -> Result<Vec<Leave>, Error> {
        let listed = self.tracked(leaves, self.leaves.list()).await?;
        self.update(|store| store.leaves.replace_all(listed.clone()));
        Ok(listed)
    }

    /// Load one leave and select it.
    pub async fn select_leave(&self, id: LeaveId) -> Result<Leave, Error> {
        let leave = self.tracked(leaves, self.leaves.get(id)).await?;
        self.update(|store| store.leaves.select(leave.clone()));
        Ok(leave)
    }

    /// Request leave for the signed-in user.
    pub async fn create_leave(&self, draft: &NewLeave) -> Result<Leave, Error> {
        self.actor()?;
        let leave = self.tracked(leaves, self.leaves.create(draft)).await?;
        self.update(|store| store.leaves.upsert(leave.clone()));
        Ok(leave)
    }

    /// Edit a pending leave.
    pub async fn update_leave(&self, id: LeaveId, update: &LeaveUpdate) -> Result<Leave, Error> {
        let actor = self.actor()?;
        let leave = self
            .tracked(leaves, self.leaves.update(actor, id, update))
            .await?;
        self.update(|store| store.leaves.upsert(leave.clone()));
        Ok(leave)
    }

    /// Approve a leave and deduct the requester's balance.
    pub async fn approve_leave(&self, id: LeaveId) -> Result<Leave, Error> {
        let actor = self.actor()?;
        let approval = self.tracked(leaves, self.leaves.approve(actor, id)).await?;
        self.update(|store| store.apply_leave_approval(&approval));
        Ok(approval.into_leave())
    }

    /// Reject a leave.
    pub async fn reject_leave(&self, id: LeaveId) -> Result<Leave, Error> {
        let actor = self.actor()?;
        let leave = self.tracked(leaves, self.leaves.reject(actor, id)).await?;
        self.update(|store| store.leaves.upsert(leave.clone()));
        Ok(leave)
    }

    /// Load all missions visible to the signed-in user.
    pub async fn fetch_missions(&self) -> Result<Vec<Mission>, Error> {
        let listed = self.tracked(missions, self.missions.list()).await?;
        self.update(|store| store.missions.replace_all(listed.clone()));
        Ok(listed)
    }

    /// Load one mission and select it.
    pub async fn select_mission(&self, id: MissionId) -> Result<Mission, Error> {
        let mission = self.tracked(missions, self.missions.get(id)).await?;
        self.update(|store| store.missions.select(mission.clone()));
        Ok(mission)
    }

    /// Create a mission.
    pub async fn create_mission(&self, draft: &NewMission) -> Result<Mission, Error> {
        let actor = self.actor()?;
        let mission = self
            .tracked(missions, self.missions.create(actor, draft))
            .await?;
        self.update(|store| store.missions.upsert(mission.clone()));
        Ok(mission)
    }

    /// Edit an open mission.
    pub async fn update_mission(
        &self,
        id: MissionId,
        update: &MissionUpdate,
    ) -> Result<Mission, Error> {
        let actor = self.actor()?;
        let mission = self
            .tracked(missions, self.missions.update(actor, id, update))
            .await?;
        self.update(|store| store.missions.upsert(mission.clone()));
        Ok(mission)
    }

    /// Mark a mission completed.
    pub async fn complete_mission(&self, id: MissionId) -> Result<Mission, Error> {
        let actor = self.actor()?;
        let mission = self
            .tracked(missions, self.missions.complete(actor, id))
            .await?;
        self.update(|store| store.missions.upsert(mission.clone()));
        Ok(mission)
    }

    /// Load work-hour entries visible to the signed-in user.
    pub async fn fetch_work_hours(&self) -> Result<Vec<WorkHours>, Error> {
        let listed = self.tracked(work_hours, self.work_hours.list()).await?;
        self.update(|store| store.work_hours.replace_all(listed.clone()));
        Ok(listed)
    }

    /// Log worked hours.
    pub async fn log_work_hours(&self, draft: &NewWorkHours) -> Result<WorkHours, Error> {
        let actor = self.actor()?;
        let entry = self
            .tracked(work_hours, self.work_hours.log(actor, draft))
            .await?;
        self.update(|store| store.work_hours.upsert(entry.clone()));
        Ok(entry)
    }

    /// Load internships visible to the signed-in user.
    pub async fn fetch_internships(&self) -> Result<Vec<Internship>, Error> {
        let listed = self.tracked(internships, self.internships.list()).await?;
        self.update(|store| store.internships.replace_all(listed.clone()));
        Ok(listed)
    }

    /// Load one internship and select it.
    pub async fn select_internship(&self, id: InternshipId) -> Result<Internship, Error> {
        let internship = self.tracked(internships, self.internships.get(id)).await?;
        self.update(|store| store.internships.select(internship.clone()));
        Ok(internship)
    }

    /// Create an internship.
    pub async fn create_internship(&self, draft: &NewInternship) -> Result<Internship, Error> {
        let actor = self.actor()?;
        let internship = self
            .tracked(internships, self.internships.create(actor, draft))
            .await?;
        self.update(|store| store.internships.upsert(internship.clone()));
        Ok(internship)
    }

    /// Edit an internship that has not ended.
    pub async fn update_internship(
        &self,
        id: InternshipId,
        update: &InternshipUpdate,
    ) -> Result<Internship, Error> {
        let actor = self.actor()?;
        let internship = self
            .tracked(internships, self.internships.update(actor, id, update))
            .await?;
        self.update(|store| store.internships.upsert(internship.clone()));
        Ok(internship)
    }

    /// Move an internship to `target`.
    pub async fn change_internship_status(
        &self,
        id: InternshipId,
        target: InternshipStatus,
    ) -> Result<Internship, Error> {
        let actor = self.actor()?;
        let internship = self
            .tracked(internships, self.internships.change_status(actor, id, target))
            .await?;
        self.update(|store| store.internships.upsert(internship.clone()));
        Ok(internship)
    }

    /// Load job applications.
    pub async fn fetch_job_applications(&self) -> Result<Vec<JobApplication>, Error> {
        let listed = self
            .tracked(job_applications, self.job_applications.list())
            .await?;
        self.update(|store| store.job_applications.replace_all(listed.clone()));
        Ok(listed)
    }

    /// Load one job application and select it.
    pub async fn select_job_application(
        &self,
        id: JobApplicationId,
    ) -> Result<JobApplication, Error> {
        let application = self
            .tracked(job_applications, self.job_applications.get(id))
            .await?;
        self.update(|store| store.job_applications.select(application.clone()));
        Ok(application)
    }

    /// Submit an application with its résumé. No sign-in is required.
    pub async fn submit_job_application(
        &self,
        draft: NewJobApplication,
    ) -> Result<JobApplication, Error> {
        let application = self
            .tracked(job_applications, self.job_applications.submit(draft))
            .await?;
        self.update(|store| store.job_applications.upsert(application.clone()));
        Ok(application)
    }

    /// Correct a pending application's details.
    pub async fn update_job_application(
        &self,
        id: JobApplicationId,
        update: &JobApplicationUpdate,
    ) -> Result<JobApplication, Error> {
        let actor = self.actor()?;
        let application = self
            .tracked(
                job_applications,
                self.job_applications.update(actor, id, update),
            )
            .await?;
        self.update(|store| store.job_applications.upsert(application.clone()));
        Ok(application)
    }

    /// Approve a pending application.
    pub async fn approve_job_application(
        &self,
        id: JobApplicationId,
    ) -> Result<JobApplication, Error> {
        let actor = self.actor()?;
        let application = self
            .tracked(job_applications, self.job_applications.approve(actor, id))
            .await?;
        self.update(|store| store.job_applications.upsert(application.clone()));
        Ok(application)
    }

    /// Reject a pending application.
    pub async fn reject_job_application(
        &self,
        id: JobApplicationId,
    ) -> Result<JobApplication, Error> {
        let actor = self.actor()?;
        let application = self
            .tracked(job_applications, self.job_applications.reject(actor, id))
            .await?;
        self.update(|store| store.job_applications.upsert(application.clone()));
        Ok(application)
    }

    /// Dashboard figures from the cached leaves and missions.
    pub fn dashboard_stats(&self, today: NaiveDate) -> DashboardStats {
        self.read(|store| {
            DashboardStats::compute(store.leaves.items(), store.missions.items(), today)
        })
    }
}

#[cfg(test)]
mod tests;
