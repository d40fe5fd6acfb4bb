//! Policy-enforcing document store.
//!
//! Every public method takes the requesting [`Principal`] explicitly and
//! checks the access policy before reading or writing. Passcode checks read
//! secrets through the repository directly; those reads never leave this
//! module.

mod quizzes;
mod teams;
mod walls;

use crate::auth::constant_time_compare;
use crate::db::Repository;
use crate::errors::AppError;
use crate::models::{PlayerTeam, Quiz, QuizSecret, Team, UserPermission};
use crate::policy::{Access, Policy, Principal, Resource};

/// Document store guarded by the access policy.
#[derive(Clone)]
pub struct DocumentStore {
    repo: Repository,
    policy: Policy,
}

/// Facts about a team relative to one principal.
struct TeamFacts {
    quiz_owner_id: String,
    member: bool,
}

impl DocumentStore {
    pub fn new(repo: Repository, policy: Policy) -> Self {
        Self { repo, policy }
    }

    /// Unguarded repository access for trusted callers.
    #[cfg(test)]
    pub fn repository(&self) -> &Repository {
        &self.repo
    }

    // ==================== USER PERMISSIONS ====================

    pub async fn get_user_permission(
        &self,
        principal: &Principal,
        owner_id: &str,
    ) -> Result<UserPermission, AppError> {
        self.policy
            .authorize(principal, &Access::get(Resource::UserPermission { owner_id }))?;

        self.repo
            .get_user_permission(owner_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User permission {} not found", owner_id)))
    }

    pub async fn list_user_permissions(
        &self,
        principal: &Principal,
    ) -> Result<Vec<UserPermission>, AppError> {
        self.policy
            .authorize(principal, &Access::list(Resource::UserPermissions))?;

        // No rule currently admits a listing.
        Err(AppError::PermissionDenied)
    }

    /// Create or update a permission document.
    pub async fn put_user_permission(
        &self,
        principal: &Principal,
        permission: &UserPermission,
    ) -> Result<UserPermission, AppError> {
        let doc = Resource::UserPermission {
            owner_id: &permission.owner_id,
        };
        let access = match self.repo.get_user_permission(&permission.owner_id).await? {
            Some(_) => Access::update(doc, doc),
            None => Access::create(doc),
        };
        self.policy.authorize(principal, &access)?;

        self.repo.put_user_permission(permission).await?;
        tracing::info!(owner_id = %permission.owner_id, by = %principal.id, "user permission written");
        Ok(permission.clone())
    }

    pub async fn delete_user_permission(
        &self,
        principal: &Principal,
        owner_id: &str,
    ) -> Result<(), AppError> {
        self.policy
            .authorize(principal, &Access::delete(Resource::UserPermission { owner_id }))?;

        self.repo.delete_user_permission(owner_id).await?;
        tracing::info!(owner_id = %owner_id, by = %principal.id, "user permission deleted");
        Ok(())
    }

    // ==================== QUIZZES ====================

    pub async fn get_quiz(&self, principal: &Principal, quiz_id: &str) -> Result<Quiz, AppError> {
        let quiz = self
            .repo
            .get_quiz(quiz_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz {} not found", quiz_id)))?;

        self.policy.authorize(
            principal,
            &Access::get(Resource::Quiz {
                owner_id: &quiz.owner_id,
            }),
        )?;

        Ok(quiz)
    }

    /// List quizzes. Only a listing scoped to the requester's own id is admitted.
    pub async fn list_quizzes(
        &self,
        principal: &Principal,
        owner_id: Option<&str>,
    ) -> Result<Vec<Quiz>, AppError> {
        self.policy.authorize(
            principal,
            &Access::list(Resource::Quizzes {
                owner_filter: owner_id,
            }),
        )?;

        match owner_id {
            Some(owner_id) => self.repo.list_quizzes_by_owner(owner_id).await,
            None => Err(AppError::PermissionDenied),
        }
    }

    /// Read a quiz's secret. `None` when the quiz has no passcode.
    pub async fn get_quiz_secret(
        &self,
        principal: &Principal,
        quiz_id: &str,
    ) -> Result<Option<QuizSecret>, AppError> {
        let quiz = self
            .repo
            .get_quiz(quiz_id)
            .await?
            .ok_or(AppError::PermissionDenied)?;

        self.policy.authorize(
            principal,
            &Access::get(Resource::QuizSecret {
                quiz_owner_id: &quiz.owner_id,
            }),
        )?;

        self.repo.get_quiz_secret(quiz_id).await
    }

    // ==================== TEAMS ====================

    /// Read a team. An unknown id is denied like a team the caller is not in.
    pub async fn get_team(&self, principal: &Principal, team_id: &str) -> Result<Team, AppError> {
        let team = self
            .repo
            .get_team(team_id)
            .await?
            .ok_or(AppError::PermissionDenied)?;

        let facts = self.team_facts(principal, &team).await?;
        self.policy.authorize(
            principal,
            &Access::get(Resource::Team {
                quiz_owner_id: &facts.quiz_owner_id,
                member: facts.member,
            }),
        )?;

        Ok(team)
    }

    /// List the teams of a quiz for its owner.
    pub async fn list_teams(
        &self,
        principal: &Principal,
        quiz_id: &str,
    ) -> Result<Vec<Team>, AppError> {
        let quiz = self
            .repo
            .get_quiz(quiz_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz {} not found", quiz_id)))?;

        self.policy.authorize(
            principal,
            &Access::list(Resource::Teams {
                quiz_owner_id: &quiz.owner_id,
            }),
        )?;

        self.repo.list_teams_for_quiz(quiz_id).await
    }

    // ==================== MEMBERSHIPS ====================

    pub async fn get_player_team(
        &self,
        principal: &Principal,
        id: &str,
    ) -> Result<PlayerTeam, AppError> {
        // A membership's existence is private to its player.
        let membership = self
            .repo
            .get_player_team(id)
            .await?
            .ok_or(AppError::PermissionDenied)?;

        self.policy.authorize(
            principal,
            &Access::get(Resource::PlayerTeam {
                player_id: &membership.player_id,
            }),
        )?;

        Ok(membership)
    }

    /// List memberships of the requester.
    pub async fn list_player_teams(
        &self,
        principal: &Principal,
    ) -> Result<Vec<PlayerTeam>, AppError> {
        self.policy.authorize(
            principal,
            &Access::list(Resource::PlayerTeams {
                player_filter: Some(principal.id.as_str()),
            }),
        )?;

        self.repo.list_player_teams(&principal.id).await
    }

    async fn team_facts(&self, principal: &Principal, team: &Team) -> Result<TeamFacts, AppError> {
        let quiz_owner_id = self
            .repo
            .get_quiz(&team.quiz_id)
            .await?
            .map(|quiz| quiz.owner_id)
            .unwrap_or_default();
        let member = self
            .repo
            .find_membership(&principal.id, &team.id)
            .await?
            .is_some();

        Ok(TeamFacts {
            quiz_owner_id,
            member,
        })
    }
}

/// Exact, case-sensitive passcode check. A missing side never matches.
pub(crate) fn passcode_matches(supplied: Option<&str>, stored: Option<&str>) -> bool {
    match (supplied, stored) {
        (Some(supplied), Some(stored)) => constant_time_compare(supplied, stored),
        _ => false,
    }
}

/// Reject an absent or empty passcode.
fn required_passcode(passcode: Option<&str>, label: &str) -> Result<String, AppError> {
    match passcode {
        Some(passcode) if !passcode.is_empty() => Ok(passcode.to_string()),
        _ => Err(AppError::Validation(format!("{} is required", label))),
    }
}

/// Trim a display name, rejecting blank input.
fn required_name(name: &str, label: &str) -> Result<String, AppError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{} is required", label)));
    }
    Ok(trimmed.to_string())
}
