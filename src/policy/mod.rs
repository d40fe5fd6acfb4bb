//! Document access policy.
//!
//! Every client read or write is described as an [`Access`] and checked by
//! [`Policy::authorize`] before the repository is touched. Rules are pure
//! functions of the principal and the facts carried by the access; any
//! lookups they depend on (quiz owner, team membership) are resolved by the
//! caller beforehand.

mod rules;

use crate::errors::AppError;
use crate::models::collections;

/// An authenticated identity making a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: String,
    /// Administrative claim
    pub admin: bool,
}

impl Principal {
    pub fn user(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            admin: false,
        }
    }

    pub fn admin(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            admin: true,
        }
    }

    pub fn is(&self, id: &str) -> bool {
        self.id == id
    }
}

/// Kind of document operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Get,
    List,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Get => "get",
            Operation::List => "list",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

/// Facts about the document (or collection query) being accessed.
///
/// Membership and ownership flags are relative to the requesting principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource<'a> {
    UserPermission {
        owner_id: &'a str,
    },
    UserPermissions,
    Quiz {
        owner_id: &'a str,
    },
    Quizzes {
        owner_filter: Option<&'a str>,
    },
    QuizSecret {
        quiz_owner_id: &'a str,
    },
    QuizSecrets,
    Team {
        quiz_owner_id: &'a str,
        /// Requester is a member, or is creating their own membership in the same write
        member: bool,
    },
    Teams {
        quiz_owner_id: &'a str,
    },
    TeamSecret {
        quiz_owner_id: &'a str,
        /// Requester is creating the team in the same write
        creator: bool,
    },
    TeamSecrets,
    PlayerTeam {
        player_id: &'a str,
    },
    PlayerTeams {
        player_filter: Option<&'a str>,
    },
    WallInProgress {
        quiz_owner_id: &'a str,
        member: bool,
    },
    WallsInProgress,
}

impl Resource<'_> {
    /// Collection the resource belongs to.
    pub fn collection(&self) -> &'static str {
        match self {
            Resource::UserPermission { .. } | Resource::UserPermissions => {
                collections::USER_PERMISSIONS
            }
            Resource::Quiz { .. } | Resource::Quizzes { .. } => collections::QUIZZES,
            Resource::QuizSecret { .. } | Resource::QuizSecrets => collections::QUIZ_SECRETS,
            Resource::Team { .. } | Resource::Teams { .. } => collections::TEAMS,
            Resource::TeamSecret { .. } | Resource::TeamSecrets => collections::TEAM_SECRETS,
            Resource::PlayerTeam { .. } | Resource::PlayerTeams { .. } => {
                collections::PLAYER_TEAMS
            }
            Resource::WallInProgress { .. } | Resource::WallsInProgress => {
                collections::WALL_IN_PROGRESS
            }
        }
    }
}

/// A single access to be evaluated.
///
/// For `Create`, `target` describes the proposed document. For `Update`,
/// `target` is the stored document and `incoming` the proposed one.
#[derive(Debug, Clone, Copy)]
pub struct Access<'a> {
    pub operation: Operation,
    pub target: Resource<'a>,
    pub incoming: Option<Resource<'a>>,
}

impl<'a> Access<'a> {
    pub fn get(target: Resource<'a>) -> Self {
        Self::new(Operation::Get, target)
    }

    pub fn list(target: Resource<'a>) -> Self {
        Self::new(Operation::List, target)
    }

    pub fn create(target: Resource<'a>) -> Self {
        Self::new(Operation::Create, target)
    }

    pub fn update(existing: Resource<'a>, incoming: Resource<'a>) -> Self {
        Self {
            operation: Operation::Update,
            target: existing,
            incoming: Some(incoming),
        }
    }

    pub fn delete(target: Resource<'a>) -> Self {
        Self::new(Operation::Delete, target)
    }

    fn new(operation: Operation, target: Resource<'a>) -> Self {
        Self {
            operation,
            target,
            incoming: None,
        }
    }
}

/// Outcome of evaluating an access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

impl From<bool> for Decision {
    fn from(allowed: bool) -> Self {
        if allowed {
            Decision::Allow
        } else {
            Decision::Deny
        }
    }
}

/// The rule evaluator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Policy;

impl Policy {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate an access without side effects.
    pub fn evaluate(&self, principal: &Principal, access: &Access<'_>) -> Decision {
        rules::allows(principal, access).into()
    }

    /// Evaluate an access, turning a denial into a generic error.
    pub fn authorize(&self, principal: &Principal, access: &Access<'_>) -> Result<(), AppError> {
        match self.evaluate(principal, access) {
            Decision::Allow => Ok(()),
            Decision::Deny => {
                tracing::debug!(
                    principal = %principal.id,
                    collection = access.target.collection(),
                    operation = access.operation.as_str(),
                    "access denied"
                );
                Err(AppError::PermissionDenied)
            }
        }
    }
}
