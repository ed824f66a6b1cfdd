//! Ordered status workflow and its linear transition rules.

use super::{MoveDirection, StatusName, TaskDomainError};

/// Status new boards start tasks in.
pub const INITIAL_STATUS: &str = "Todo";

/// Statuses every board starts with, in order.
pub const DEFAULT_STATUSES: [&str; 3] = [INITIAL_STATUS, "InProgress", "Done"];

/// Ordered list of statuses a task moves through.
///
/// Moving forward goes to the next entry and moving back to the previous
/// one; there are no other transitions. Lookups ignore ASCII case so that
/// `todo` resolves to the configured `Todo`.
///
/// Every change bumps [`revision`](Self::revision) so holders of derived
/// data (the board projector's column layout) can tell that the list
/// changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusWorkflow {
    statuses: Vec<StatusName>,
    revision: u64,
}

impl Default for StatusWorkflow {
    fn default() -> Self {
        Self::new(DEFAULT_STATUSES)
    }
}

impl StatusWorkflow {
    /// Creates a workflow from an ordered list of names.
    ///
    /// Blank names and repeated names (ignoring case) are dropped; the first
    /// spelling wins.
    #[must_use]
    pub fn new<I, S>(statuses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut workflow = Self {
            statuses: Vec::new(),
            revision: 0,
        };
        workflow.push_all(statuses);
        workflow
    }

    /// Creates the default workflow followed by `extra` statuses.
    #[must_use]
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut workflow = Self::default();
        workflow.push_all(extra);
        workflow
    }

    /// Returns the statuses in order.
    #[must_use]
    pub fn statuses(&self) -> &[StatusName] {
        &self.statuses
    }

    /// Returns the number of statuses.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.statuses.len()
    }

    /// Returns `true` when no status is configured.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    /// Returns the first status, where new and repaired tasks go.
    #[must_use]
    pub fn first(&self) -> Option<&StatusName> {
        self.statuses.first()
    }

    /// Returns the last status.
    #[must_use]
    pub fn last(&self) -> Option<&StatusName> {
        self.statuses.last()
    }

    /// Returns the change counter of this workflow.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns the configured spelling of `status`, if it is in the workflow.
    #[must_use]
    pub fn resolve(&self, status: &str) -> Option<&StatusName> {
        self.statuses.iter().find(|known| known.matches(status))
    }

    /// Returns `true` when `status` is in the workflow.
    #[must_use]
    pub fn is_valid(&self, status: &str) -> bool {
        self.resolve(status).is_some()
    }

    /// Returns the position of `status` in the workflow.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::UnknownStatus`] when the status is not
    /// configured.
    pub fn index_of(&self, status: &str) -> Result<usize, TaskDomainError> {
        self.statuses
            .iter()
            .position(|known| known.matches(status))
            .ok_or_else(|| TaskDomainError::UnknownStatus(status.to_owned()))
    }

    /// Returns the status one step from `status` in `direction`.
    ///
    /// Returns `Ok(None)` when `status` is already the first (moving back) or
    /// last (moving forward) entry.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::UnknownStatus`] when `status` is not
    /// configured.
    pub fn neighbour(
        &self,
        status: &str,
        direction: MoveDirection,
    ) -> Result<Option<&StatusName>, TaskDomainError> {
        let index = self.index_of(status)?;
        let target = match direction {
            MoveDirection::Forward => index.checked_add(1),
            MoveDirection::Back => index.checked_sub(1),
        };
        Ok(target.and_then(|position| self.statuses.get(position)))
    }

    /// Appends statuses that are not configured yet.
    ///
    /// Returns how many statuses were added. The revision only advances when
    /// at least one was.
    pub fn extend<I, S>(&mut self, statuses: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let added = self.push_all(statuses);
        if added > 0 {
            self.bump();
        }
        added
    }

    /// Replaces the whole list, keeping the revision history.
    pub fn reconfigure<I, S>(&mut self, statuses: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.statuses.clear();
        self.push_all(statuses);
        self.bump();
    }

    fn push_all<I, S>(&mut self, statuses: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut added = 0_usize;
        for raw in statuses {
            let status = StatusName::new(raw);
            if status.is_blank() || self.is_valid(status.as_str()) {
                continue;
            }
            self.statuses.push(status);
            added = added.saturating_add(1);
        }
        added
    }

    const fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
