//! Database repository for document reads and writes.
//!
//! The repository performs no access checks; callers go through
//! [`crate::store::DocumentStore`] unless they run in a trusted context.
//! Multi-document writes run in a single transaction.

use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{PlayerTeam, Quiz, QuizSecret, Team, TeamSecret, UserPermission, WallInProgress};

/// How a quiz save treats the quiz's secret document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretChange {
    Keep,
    Set(String),
    Remove,
}

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ==================== QUIZ OPERATIONS ====================

    /// Get a quiz by ID.
    pub async fn get_quiz(&self, id: &str) -> Result<Option<Quiz>, AppError> {
        let row = sqlx::query(
            "SELECT id, name, owner_id, question_ids, require_quiz_passcode FROM quizzes WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(quiz_from_row))
    }

    /// List the quizzes owned by a principal.
    pub async fn list_quizzes_by_owner(&self, owner_id: &str) -> Result<Vec<Quiz>, AppError> {
        let rows = sqlx::query(
            "SELECT id, name, owner_id, question_ids, require_quiz_passcode FROM quizzes WHERE owner_id = ? ORDER BY name, id",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(quiz_from_row).collect())
    }

    /// Insert a quiz and, when given, its secret.
    pub async fn insert_quiz(&self, quiz: &Quiz, secret: Option<&QuizSecret>) -> Result<(), AppError> {
        let question_ids = serde_json::to_string(&quiz.question_ids)?;

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO quizzes (id, name, owner_id, question_ids, require_quiz_passcode) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&quiz.id)
        .bind(&quiz.name)
        .bind(&quiz.owner_id)
        .bind(&question_ids)
        .bind(quiz.require_quiz_passcode as i32)
        .execute(&mut *tx)
        .await?;

        if let Some(secret) = secret {
            sqlx::query("INSERT INTO quiz_secrets (quiz_id, passcode) VALUES (?, ?)")
                .bind(&secret.quiz_id)
                .bind(&secret.passcode)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Overwrite a quiz and apply the secret change in one transaction.
    pub async fn save_quiz(&self, quiz: &Quiz, secret: &SecretChange) -> Result<(), AppError> {
        let question_ids = serde_json::to_string(&quiz.question_ids)?;

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "UPDATE quizzes SET name = ?, question_ids = ?, require_quiz_passcode = ? WHERE id = ?",
        )
        .bind(&quiz.name)
        .bind(&question_ids)
        .bind(quiz.require_quiz_passcode as i32)
        .bind(&quiz.id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Quiz {} not found", quiz.id)));
        }

        match secret {
            SecretChange::Keep => {}
            SecretChange::Set(passcode) => {
                sqlx::query(
                    "INSERT INTO quiz_secrets (quiz_id, passcode) VALUES (?, ?) ON CONFLICT(quiz_id) DO UPDATE SET passcode = excluded.passcode",
                )
                .bind(&quiz.id)
                .bind(passcode)
                .execute(&mut *tx)
                .await?;
            }
            SecretChange::Remove => {
                sqlx::query("DELETE FROM quiz_secrets WHERE quiz_id = ?")
                    .bind(&quiz.id)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        tx.commit().await?;
        Ok(())
    }

    /// Get the secret of a quiz.
    pub async fn get_quiz_secret(&self, quiz_id: &str) -> Result<Option<QuizSecret>, AppError> {
        let row = sqlx::query("SELECT quiz_id, passcode FROM quiz_secrets WHERE quiz_id = ?")
            .bind(quiz_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| QuizSecret {
            quiz_id: row.get("quiz_id"),
            passcode: row.get("passcode"),
        }))
    }

    // ==================== TEAM OPERATIONS ====================

    /// Get a team by ID.
    pub async fn get_team(&self, id: &str) -> Result<Option<Team>, AppError> {
        let row = sqlx::query("SELECT id, quiz_id, name, created_at FROM teams WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(team_from_row))
    }

    /// List the teams of a quiz in creation order.
    pub async fn list_teams_for_quiz(&self, quiz_id: &str) -> Result<Vec<Team>, AppError> {
        let rows = sqlx::query(
            "SELECT id, quiz_id, name, created_at FROM teams WHERE quiz_id = ? ORDER BY created_at, id",
        )
        .bind(quiz_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(team_from_row).collect())
    }

    /// Get the secret of a team.
    pub async fn get_team_secret(&self, team_id: &str) -> Result<Option<TeamSecret>, AppError> {
        let row = sqlx::query("SELECT team_id, passcode FROM team_secrets WHERE team_id = ?")
            .bind(team_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| TeamSecret {
            team_id: row.get("team_id"),
            passcode: row.get("passcode"),
        }))
    }

    /// Insert a team, its optional secret and the creator's membership atomically.
    pub async fn insert_team(
        &self,
        team: &Team,
        secret: Option<&TeamSecret>,
        membership: &PlayerTeam,
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO teams (id, quiz_id, name, created_at) VALUES (?, ?, ?, ?)")
            .bind(&team.id)
            .bind(&team.quiz_id)
            .bind(&team.name)
            .bind(&team.created_at)
            .execute(&mut *tx)
            .await?;

        if let Some(secret) = secret {
            sqlx::query("INSERT INTO team_secrets (team_id, passcode) VALUES (?, ?)")
                .bind(&secret.team_id)
                .bind(&secret.passcode)
                .execute(&mut *tx)
                .await?;
        }

        insert_player_team_row(&mut tx, membership).await?;

        tx.commit().await?;
        Ok(())
    }

    // ==================== MEMBERSHIP OPERATIONS ====================

    /// Insert a membership unless the player already belongs to the team.
    ///
    /// Returns the stored membership, which is the earlier one when a
    /// concurrent join won the race.
    pub async fn upsert_player_team(
        &self,
        membership: &PlayerTeam,
    ) -> Result<PlayerTeam, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO player_teams (id, player_id, team_id, quiz_id, created_at) VALUES (?, ?, ?, ?, ?) ON CONFLICT(player_id, team_id) DO NOTHING",
        )
        .bind(&membership.id)
        .bind(&membership.player_id)
        .bind(&membership.team_id)
        .bind(&membership.quiz_id)
        .bind(&membership.created_at)
        .execute(&mut *tx)
        .await?;

        let row = sqlx::query(
            "SELECT id, player_id, team_id, quiz_id, created_at FROM player_teams WHERE player_id = ? AND team_id = ?",
        )
        .bind(&membership.player_id)
        .bind(&membership.team_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(player_team_from_row(&row))
    }

    /// Get a membership by ID.
    pub async fn get_player_team(&self, id: &str) -> Result<Option<PlayerTeam>, AppError> {
        let row = sqlx::query(
            "SELECT id, player_id, team_id, quiz_id, created_at FROM player_teams WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(player_team_from_row))
    }

    /// Find the membership of a player in a team.
    pub async fn find_membership(
        &self,
        player_id: &str,
        team_id: &str,
    ) -> Result<Option<PlayerTeam>, AppError> {
        let row = sqlx::query(
            "SELECT id, player_id, team_id, quiz_id, created_at FROM player_teams WHERE player_id = ? AND team_id = ?",
        )
        .bind(player_id)
        .bind(team_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(player_team_from_row))
    }

    /// List the memberships of a player.
    pub async fn list_player_teams(&self, player_id: &str) -> Result<Vec<PlayerTeam>, AppError> {
        let rows = sqlx::query(
            "SELECT id, player_id, team_id, quiz_id, created_at FROM player_teams WHERE player_id = ? ORDER BY created_at, id",
        )
        .bind(player_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(player_team_from_row).collect())
    }

    // ==================== PERMISSION OPERATIONS ====================

    /// Get the permission document of a principal.
    pub async fn get_user_permission(
        &self,
        owner_id: &str,
    ) -> Result<Option<UserPermission>, AppError> {
        let row = sqlx::query(
            "SELECT owner_id, some_permission FROM user_permissions WHERE owner_id = ?",
        )
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| {
            let some_permission: i32 = row.get("some_permission");
            UserPermission {
                owner_id: row.get("owner_id"),
                some_permission: some_permission != 0,
            }
        }))
    }

    /// Create or replace a permission document.
    pub async fn put_user_permission(&self, permission: &UserPermission) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO user_permissions (owner_id, some_permission) VALUES (?, ?) ON CONFLICT(owner_id) DO UPDATE SET some_permission = excluded.some_permission",
        )
        .bind(&permission.owner_id)
        .bind(permission.some_permission as i32)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Delete a permission document.
    pub async fn delete_user_permission(&self, owner_id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM user_permissions WHERE owner_id = ?")
            .bind(owner_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "User permission {} not found",
                owner_id
            )));
        }

        Ok(())
    }

    // ==================== WALL OPERATIONS ====================

    /// Insert a wall attempt.
    pub async fn insert_wall(&self, wall: &WallInProgress) -> Result<(), AppError> {
        let selected_texts = serde_json::to_string(&wall.selected_texts)?;

        sqlx::query(
            "INSERT INTO wall_in_progress (id, team_id, clue_id, question_id, selected_texts) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&wall.id)
        .bind(&wall.team_id)
        .bind(&wall.clue_id)
        .bind(&wall.question_id)
        .bind(&selected_texts)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Get a wall attempt by ID.
    pub async fn get_wall(&self, id: &str) -> Result<Option<WallInProgress>, AppError> {
        let row = sqlx::query(
            "SELECT id, team_id, clue_id, question_id, selected_texts FROM wall_in_progress WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| {
            let selected_texts: String = row.get("selected_texts");
            WallInProgress {
                id: row.get("id"),
                team_id: row.get("team_id"),
                clue_id: row.get("clue_id"),
                question_id: row.get("question_id"),
                selected_texts: parse_json_array(&selected_texts),
            }
        }))
    }

    /// Replace the selected texts of a wall attempt. Last write wins.
    pub async fn replace_wall_selections(
        &self,
        id: &str,
        selected_texts: &[String],
    ) -> Result<(), AppError> {
        let selected_texts = serde_json::to_string(selected_texts)?;

        let result = sqlx::query("UPDATE wall_in_progress SET selected_texts = ? WHERE id = ?")
            .bind(&selected_texts)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Wall {} not found", id)));
        }

        Ok(())
    }
}

async fn insert_player_team_row(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    membership: &PlayerTeam,
) -> Result<(), AppError> {
    sqlx::query(
        "INSERT INTO player_teams (id, player_id, team_id, quiz_id, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&membership.id)
    .bind(&membership.player_id)
    .bind(&membership.team_id)
    .bind(&membership.quiz_id)
    .bind(&membership.created_at)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

// Helper functions for row conversion

fn quiz_from_row(row: &sqlx::sqlite::SqliteRow) -> Quiz {
    let question_ids: String = row.get("question_ids");
    let require_quiz_passcode: i32 = row.get("require_quiz_passcode");
    Quiz {
        id: row.get("id"),
        name: row.get("name"),
        owner_id: row.get("owner_id"),
        question_ids: parse_json_array(&question_ids),
        require_quiz_passcode: require_quiz_passcode != 0,
    }
}

fn team_from_row(row: &sqlx::sqlite::SqliteRow) -> Team {
    Team {
        id: row.get("id"),
        quiz_id: row.get("quiz_id"),
        name: row.get("name"),
        created_at: row.get("created_at"),
    }
}

fn player_team_from_row(row: &sqlx::sqlite::SqliteRow) -> PlayerTeam {
    PlayerTeam {
        id: row.get("id"),
        player_id: row.get("player_id"),
        team_id: row.get("team_id"),
        quiz_id: row.get("quiz_id"),
        created_at: row.get("created_at"),
    }
}

fn parse_json_array(s: &str) -> Vec<String> {
    serde_json::from_str(s).unwrap_or_default()
}
