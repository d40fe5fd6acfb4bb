//! Wall-in-progress tracking.
//!
//! A missing wall or team is reported as [`AppError::PermissionDenied`], the
//! same as a wall the caller may not touch.

use super::DocumentStore;
use crate::errors::AppError;
use crate::models::{CreateWallRequest, WallInProgress};
use crate::policy::{Access, Principal, Resource};

impl DocumentStore {
    /// Start a wall attempt for a team with no selections.
    pub async fn create_wall(
        &self,
        principal: &Principal,
        request: &CreateWallRequest,
    ) -> Result<WallInProgress, AppError> {
        let team = self
            .repo
            .get_team(&request.team_id)
            .await?
            .ok_or(AppError::PermissionDenied)?;
        let facts = self.team_facts(principal, &team).await?;

        self.policy.authorize(
            principal,
            &Access::create(Resource::WallInProgress {
                quiz_owner_id: &facts.quiz_owner_id,
                member: facts.member,
            }),
        )?;

        let wall = WallInProgress {
            id: uuid::Uuid::new_v4().to_string(),
            team_id: team.id,
            clue_id: request.clue_id.clone(),
            question_id: request.question_id.clone(),
            selected_texts: Vec::new(),
        };
        self.repo.insert_wall(&wall).await?;
        tracing::debug!(wall_id = %wall.id, team_id = %wall.team_id, "wall started");

        Ok(wall)
    }

    pub async fn get_wall(
        &self,
        principal: &Principal,
        wall_id: &str,
    ) -> Result<WallInProgress, AppError> {
        let wall = self
            .repo
            .get_wall(wall_id)
            .await?
            .ok_or(AppError::PermissionDenied)?;

        let team = self
            .repo
            .get_team(&wall.team_id)
            .await?
            .ok_or(AppError::PermissionDenied)?;
        let facts = self.team_facts(principal, &team).await?;

        self.policy.authorize(
            principal,
            &Access::get(Resource::WallInProgress {
                quiz_owner_id: &facts.quiz_owner_id,
                member: facts.member,
            }),
        )?;

        Ok(wall)
    }

    /// Replace the selected texts wholesale.
    pub async fn update_wall_selections(
        &self,
        principal: &Principal,
        wall_id: &str,
        selected_texts: Vec<String>,
    ) -> Result<WallInProgress, AppError> {
        let existing = self
            .repo
            .get_wall(wall_id)
            .await?
            .ok_or(AppError::PermissionDenied)?;

        let team = self
            .repo
            .get_team(&existing.team_id)
            .await?
            .ok_or(AppError::PermissionDenied)?;
        let facts = self.team_facts(principal, &team).await?;
        let wall = Resource::WallInProgress {
            quiz_owner_id: &facts.quiz_owner_id,
            member: facts.member,
        };

        // The team never changes, so the incoming facts equal the stored ones.
        self.policy.authorize(principal, &Access::update(wall, wall))?;

        self.repo
            .replace_wall_selections(wall_id, &selected_texts)
            .await?;

        Ok(WallInProgress {
            selected_texts,
            ..existing
        })
    }
}
