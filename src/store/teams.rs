//! Team creation and joining.
//!
//! Passcode failures, unknown quizzes and unknown teams all surface as the
//! same [`AppError::PermissionDenied`], so a caller cannot tell which one it hit.

use chrono::Utc;

use super::{passcode_matches, required_name, required_passcode, DocumentStore};
use crate::errors::AppError;
use crate::models::{
    quiz_route, CreateTeamRequest, JoinTeamRequest, JoinedTeam, PlayerTeam, Quiz, Team,
    TeamSecret,
};
use crate::policy::{Access, Principal, Resource};

impl DocumentStore {
    /// Create a team in a quiz with the requester as its first member.
    ///
    /// Team, optional team secret and membership are written in one
    /// transaction. Each call creates a new team.
    pub async fn create_team(
        &self,
        principal: &Principal,
        quiz_id: &str,
        request: &CreateTeamRequest,
    ) -> Result<JoinedTeam, AppError> {
        let team_name = required_name(&request.team_name, "Team name")?;
        let team_passcode = if request.use_team_passcode {
            Some(required_passcode(
                request.team_passcode.as_deref(),
                "Team passcode",
            )?)
        } else {
            None
        };

        let quiz = self
            .verify_quiz_passcode(quiz_id, request.quiz_passcode.as_deref())
            .await?;

        let now = Utc::now().to_rfc3339();
        let team = Team {
            id: uuid::Uuid::new_v4().to_string(),
            quiz_id: quiz.id.clone(),
            name: team_name,
            created_at: now.clone(),
        };
        let secret = team_passcode.map(|passcode| TeamSecret {
            team_id: team.id.clone(),
            passcode,
        });
        let membership = PlayerTeam {
            id: uuid::Uuid::new_v4().to_string(),
            player_id: principal.id.clone(),
            team_id: team.id.clone(),
            quiz_id: quiz.id.clone(),
            created_at: now,
        };

        self.policy.authorize(
            principal,
            &Access::create(Resource::Team {
                quiz_owner_id: &quiz.owner_id,
                member: principal.is(&membership.player_id),
            }),
        )?;
        if secret.is_some() {
            self.policy.authorize(
                principal,
                &Access::create(Resource::TeamSecret {
                    quiz_owner_id: &quiz.owner_id,
                    creator: true,
                }),
            )?;
        }
        self.policy.authorize(
            principal,
            &Access::create(Resource::PlayerTeam {
                player_id: &membership.player_id,
            }),
        )?;

        self.repo
            .insert_team(&team, secret.as_ref(), &membership)
            .await?;
        tracing::info!(
            quiz_id = %quiz.id,
            team_id = %team.id,
            player_id = %principal.id,
            "team created"
        );

        Ok(JoinedTeam {
            redirect_to: quiz_route(&quiz.id),
            team,
            player_team: membership,
        })
    }

    /// Join an existing team. Joining a team twice returns the existing membership.
    pub async fn join_team(
        &self,
        principal: &Principal,
        team_id: &str,
        request: &JoinTeamRequest,
    ) -> Result<JoinedTeam, AppError> {
        let Some(team) = self.repo.get_team(team_id).await? else {
            tracing::warn!(team_id = %team_id, "join rejected: unknown team");
            return Err(AppError::PermissionDenied);
        };

        if let Some(existing) = self.repo.find_membership(&principal.id, &team.id).await? {
            return Ok(JoinedTeam {
                redirect_to: quiz_route(&team.quiz_id),
                team,
                player_team: existing,
            });
        }

        self.verify_quiz_passcode(&team.quiz_id, request.quiz_passcode.as_deref())
            .await?;

        if let Some(secret) = self.repo.get_team_secret(&team.id).await? {
            if !passcode_matches(request.team_passcode.as_deref(), Some(&secret.passcode)) {
                tracing::warn!(team_id = %team.id, "join rejected: team passcode mismatch");
                return Err(AppError::PermissionDenied);
            }
        }

        let membership = PlayerTeam {
            id: uuid::Uuid::new_v4().to_string(),
            player_id: principal.id.clone(),
            team_id: team.id.clone(),
            quiz_id: team.quiz_id.clone(),
            created_at: Utc::now().to_rfc3339(),
        };
        self.policy.authorize(
            principal,
            &Access::create(Resource::PlayerTeam {
                player_id: &membership.player_id,
            }),
        )?;

        let membership = self.repo.upsert_player_team(&membership).await?;
        tracing::info!(team_id = %team.id, player_id = %principal.id, "team joined");

        Ok(JoinedTeam {
            redirect_to: quiz_route(&team.quiz_id),
            team,
            player_team: membership,
        })
    }

    /// Trusted read of the quiz and, when required, its passcode.
    async fn verify_quiz_passcode(
        &self,
        quiz_id: &str,
        supplied: Option<&str>,
    ) -> Result<Quiz, AppError> {
        let Some(quiz) = self.repo.get_quiz(quiz_id).await? else {
            tracing::warn!(quiz_id = %quiz_id, "join rejected: unknown quiz");
            return Err(AppError::PermissionDenied);
        };

        if !quiz.require_quiz_passcode {
            return Ok(quiz);
        }

        let stored = self
            .repo
            .get_quiz_secret(quiz_id)
            .await?
            .and_then(|secret| secret.passcode);

        if passcode_matches(supplied, stored.as_deref()) {
            Ok(quiz)
        } else {
            tracing::warn!(quiz_id = %quiz_id, "join rejected: quiz passcode mismatch");
            Err(AppError::PermissionDenied)
        }
    }
}
