//! Change-request planning.
//!
//! A request proposes field edits to a project plus add/remove deltas for its
//! tags, media, links and collaborators. This module turns the stored deltas
//! into a concrete plan; the repository layer executes it in one transaction.

use std::collections::HashMap;

use crate::error::CoreError;
use crate::types::DbId;

/// Proposed field edits carried by a request. `None` leaves the field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldEdits {
    pub new_title: Option<String>,
    pub new_description: Option<String>,
    pub new_bibtex: Option<String>,
}

/// The mutable fields of a project that a request can touch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFields {
    pub title: String,
    pub description: String,
    pub bibtex: Option<String>,
}

impl FieldEdits {
    pub fn is_empty(&self) -> bool {
        self.new_title.is_none() && self.new_description.is_none() && self.new_bibtex.is_none()
    }

    /// Reject edits that would blank out a required project field.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.new_title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(CoreError::Validation("Proposed title must not be empty".into()));
        }
        if self
            .new_description
            .as_deref()
            .is_some_and(|d| d.trim().is_empty())
        {
            return Err(CoreError::Validation(
                "Proposed description must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Overlay the proposed edits on the current project fields.
    pub fn apply_to(&self, current: ProjectFields) -> ProjectFields {
        ProjectFields {
            title: self.new_title.clone().unwrap_or(current.title),
            description: self.new_description.clone().unwrap_or(current.description),
            bibtex: self.new_bibtex.clone().or(current.bibtex),
        }
    }
}

/// One add/remove entry of a request delta set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delta {
    pub target: DbId,
    pub is_remove: bool,
}

impl Delta {
    pub fn add(target: DbId) -> Self {
        Self {
            target,
            is_remove: false,
        }
    }

    pub fn remove(target: DbId) -> Self {
        Self {
            target,
            is_remove: true,
        }
    }
}

/// Targets to attach to and detach from the project when a request is accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeltaPlan {
    pub attach: Vec<DbId>,
    pub detach: Vec<DbId>,
}

impl DeltaPlan {
    pub fn is_empty(&self) -> bool {
        self.attach.is_empty() && self.detach.is_empty()
    }
}

/// Collapse a delta list into an attach/detach plan.
///
/// When the same target appears more than once the last entry wins. Targets
/// keep the order of their first appearance.
pub fn plan_deltas(deltas: &[Delta]) -> DeltaPlan {
    let mut order: Vec<DbId> = Vec::new();
    let mut last: HashMap<DbId, bool> = HashMap::new();

    for delta in deltas {
        if last.insert(delta.target, delta.is_remove).is_none() {
            order.push(delta.target);
        }
    }

    let mut plan = DeltaPlan::default();
    for target in order {
        if last[&target] {
            plan.detach.push(target);
        } else {
            plan.attach.push(target);
        }
    }
    plan
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use uuid::Uuid;

    use super::*;

    fn fields() -> ProjectFields {
        ProjectFields {
            title: "Old".into(),
            description: "Old desc".into(),
            bibtex: Some("@old".into()),
        }
    }

    #[test]
    fn empty_edits_leave_fields_untouched() {
        let edits = FieldEdits::default();
        assert!(edits.is_empty());
        assert_eq!(edits.apply_to(fields()), fields());
    }

    #[test]
    fn partial_edits_overlay_only_given_fields() {
        let edits = FieldEdits {
            new_title: Some("New".into()),
            new_description: None,
            new_bibtex: None,
        };
        let result = edits.apply_to(fields());
        assert_eq!(result.title, "New");
        assert_eq!(result.description, "Old desc");
        assert_eq!(result.bibtex.as_deref(), Some("@old"));
    }

    #[test]
    fn blank_title_is_rejected() {
        let edits = FieldEdits {
            new_title: Some("   ".into()),
            ..Default::default()
        };
        assert_matches!(edits.validate(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn plan_splits_adds_and_removes() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let plan = plan_deltas(&[Delta::add(a), Delta::remove(b)]);
        assert_eq!(plan.attach, vec![a]);
        assert_eq!(plan.detach, vec![b]);
    }

    #[test]
    fn last_delta_for_a_target_wins() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let plan = plan_deltas(&[
            Delta::add(a),
            Delta::add(b),
            Delta::remove(a),
            Delta::add(b),
        ]);
        assert_eq!(plan.attach, vec![b]);
        assert_eq!(plan.detach, vec![a]);
    }

    #[test]
    fn empty_plan() {
        assert!(plan_deltas(&[]).is_empty());
    }
}
