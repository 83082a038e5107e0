//! In-memory entity state mirrored from the HR API.
//!
//! Each collection keeps its list, the selected item, and loading and error
//! flags. The store is a plain value owned by whoever drives the API; the
//! [`crate::client::HrClient`] facade keeps one behind a mutex.

use crate::domain::{
    Error, Internship, InternshipId, JobApplication, JobApplicationId, Leave, LeaveApproval,
    LeaveId, Mission, MissionId, User, UserId, WorkHours, WorkHoursId,
};

/// Entities carrying a stable identifier.
pub trait Identified {
    /// Identifier type.
    type Id: Copy + Eq;

    /// The entity identifier.
    fn key(&self) -> Self::Id;
}

macro_rules! identified {
    ($($entity:ty => $id:ty),+ $(,)?) => {
        $(
            impl Identified for $entity {
                type Id = $id;

                fn key(&self) -> Self::Id {
                    self.id()
                }
            }
        )+
    };
}

identified! {
    User => UserId,
    Leave => LeaveId,
    Mission => MissionId,
    WorkHours => WorkHoursId,
    Internship => InternshipId,
    JobApplication => JobApplicationId,
}

/// Cached state of one entity collection.
///
/// Every mutating call except [`EntityStore::begin`] clears the loading
/// flag.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityStore<T> {
    items: Vec<T>,
    selected: Option<T>,
    loading: bool,
    error: Option<Error>,
}

impl<T> Default for EntityStore<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            selected: None,
            loading: false,
            error: None,
        }
    }
}

impl<T> EntityStore<T>
where
    T: Identified + Clone,
{
    /// Mark a request as in flight and drop any previous error.
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Replace the whole collection with a fresh listing.
    pub fn replace_all(&mut self, items: Vec<T>) {
        if let Some(selected) = self.selected.as_ref() {
            let key = selected.key();
            self.selected = items.iter().find(|item| item.key() == key).cloned();
        }
        self.items = items;
        self.loading = false;
        self.error = None;
    }

    /// Insert or replace one item, keeping the selection in sync.
    pub fn upsert(&mut self, item: T) {
        let key = item.key();
        if self
            .selected
            .as_ref()
            .is_some_and(|selected| selected.key() == key)
        {
            self.selected = Some(item.clone());
        }
        match self.items.iter_mut().find(|existing| existing.key() == key) {
            Some(existing) => *existing = item,
            None => self.items.push(item),
        }
        self.loading = false;
        self.error = None;
    }

    /// Drop one item, and the selection when it is that item.
    pub fn remove(&mut self, key: T::Id) -> Option<T> {
        if self
            .selected
            .as_ref()
            .is_some_and(|selected| selected.key() == key)
        {
            self.selected = None;
        }
        let position = self.items.iter().position(|item| item.key() == key);
        self.loading = false;
        self.error = None;
        position.map(|index| self.items.remove(index))
    }

    /// Select an item and mirror it into the list.
    pub fn select(&mut self, item: T) {
        self.selected = Some(item.clone());
        self.upsert(item);
    }

    /// Drop the selection.
    pub fn clear_selected(&mut self) {
        self.selected = None;
        self.loading = false;
    }

    /// Record a failed request.
    pub fn fail(&mut self, error: Error) {
        self.error = Some(error);
        self.loading = false;
    }

    /// Forget the last error.
    pub fn clear_error(&mut self) {
        self.error = None;
        self.loading = false;
    }

    /// Drop everything cached.
    pub fn invalidate(&mut self) {
        *self = Self::default();
    }

    /// Cached item by id.
    pub fn get(&self, key: T::Id) -> Option<&T> {
        self.items.iter().find(|item| item.key() == key)
    }

    /// Cached items in listing order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Currently selected item.
    pub fn selected(&self) -> Option<&T> {
        self.selected.as_ref()
    }

    /// Whether a request is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Last recorded error.
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }
}

/// Entity state for one signed-in session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HrStore {
    /// Accounts, including the signed-in user.
    pub users: EntityStore<User>,
    /// Leave requests.
    pub leaves: EntityStore<Leave>,
    /// Missions.
    pub missions: EntityStore<Mission>,
    /// Work-hour entries.
    pub work_hours: EntityStore<WorkHours>,
    /// Internships.
    pub internships: EntityStore<Internship>,
    /// Job applications.
    pub job_applications: EntityStore<JobApplication>,
    current_user: Option<User>,
}

impl HrStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Signed-in user, when known.
    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    /// Remember the signed-in user and mirror it into the users list.
    pub fn set_current_user(&mut self, user: User) {
        self.users.upsert(user.clone());
        self.current_user = Some(user);
    }

    /// Apply an approved leave and the requester's new balance together.
    pub fn apply_leave_approval(&mut self, approval: &LeaveApproval) {
        self.leaves.upsert(approval.leave().clone());

        let requester = approval.requester();
        let balance = approval.balance();
        if let Some(mut user) = self.users.get(requester).cloned() {
            user.set_leave_balance(balance);
            self.users.upsert(user);
        }
        if let Some(current) = self
            .current_user
            .as_mut()
            .filter(|current| current.id() == requester)
        {
            current.set_leave_balance(balance);
        }
    }

    /// Drop every cached collection and the signed-in user.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
