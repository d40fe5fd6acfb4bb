//! Quiz creation and editing.

use super::{required_name, required_passcode, DocumentStore};
use crate::db::SecretChange;
use crate::errors::AppError;
use crate::models::{
    quiz_edit_route, CreateQuizRequest, CreatedQuiz, JoinFormInfo, Quiz, QuizSecret,
    UpdateQuizRequest,
};
use crate::policy::{Access, Principal, Resource};

impl DocumentStore {
    /// Create a quiz owned by the requester, with a secret when a passcode is used.
    ///
    /// The response is read back from storage so the edit view shows what was
    /// actually persisted.
    pub async fn create_quiz(
        &self,
        principal: &Principal,
        request: &CreateQuizRequest,
    ) -> Result<CreatedQuiz, AppError> {
        let name = required_name(&request.name, "Quiz name")?;
        let passcode = if request.use_passcode {
            Some(required_passcode(
                request.passcode.as_deref(),
                "Quiz passcode",
            )?)
        } else {
            None
        };

        let quiz = Quiz {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            owner_id: principal.id.clone(),
            question_ids: Vec::new(),
            require_quiz_passcode: passcode.is_some(),
        };
        let secret = passcode.map(|passcode| QuizSecret {
            quiz_id: quiz.id.clone(),
            passcode: Some(passcode),
        });

        self.policy.authorize(
            principal,
            &Access::create(Resource::Quiz {
                owner_id: &quiz.owner_id,
            }),
        )?;
        if secret.is_some() {
            self.policy.authorize(
                principal,
                &Access::create(Resource::QuizSecret {
                    quiz_owner_id: &quiz.owner_id,
                }),
            )?;
        }

        self.repo.insert_quiz(&quiz, secret.as_ref()).await?;
        tracing::info!(
            quiz_id = %quiz.id,
            owner_id = %quiz.owner_id,
            passcode = quiz.require_quiz_passcode,
            "quiz created"
        );

        let stored = self.get_quiz(principal, &quiz.id).await?;
        let passcode = self
            .get_quiz_secret(principal, &quiz.id)
            .await?
            .and_then(|secret| secret.passcode);

        Ok(CreatedQuiz {
            redirect_to: quiz_edit_route(&stored.id),
            quiz: stored,
            passcode,
        })
    }

    /// Apply an owner's edit. The quiz and its secret change together.
    pub async fn update_quiz(
        &self,
        principal: &Principal,
        quiz_id: &str,
        request: &UpdateQuizRequest,
    ) -> Result<Quiz, AppError> {
        let existing = self
            .repo
            .get_quiz(quiz_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz {} not found", quiz_id)))?;

        // Ownership never changes on edit.
        self.policy.authorize(
            principal,
            &Access::update(
                Resource::Quiz {
                    owner_id: &existing.owner_id,
                },
                Resource::Quiz {
                    owner_id: &existing.owner_id,
                },
            ),
        )?;

        let mut next = existing.clone();
        if let Some(name) = &request.name {
            next.name = required_name(name, "Quiz name")?;
        }
        if let Some(question_ids) = &request.question_ids {
            next.question_ids = question_ids.clone();
        }

        let secret_change = plan_secret_change(&existing, request)?;
        match secret_change {
            SecretChange::Set(_) => next.require_quiz_passcode = true,
            SecretChange::Remove => next.require_quiz_passcode = false,
            SecretChange::Keep => {}
        }

        let secret = Resource::QuizSecret {
            quiz_owner_id: &existing.owner_id,
        };
        match secret_change {
            SecretChange::Set(_) => self
                .policy
                .authorize(principal, &Access::update(secret, secret))?,
            SecretChange::Remove => self.policy.authorize(principal, &Access::delete(secret))?,
            SecretChange::Keep => {}
        }

        self.repo.save_quiz(&next, &secret_change).await?;
        tracing::info!(quiz_id = %next.id, passcode = next.require_quiz_passcode, "quiz updated");

        Ok(next)
    }

    /// What a joining principal needs to render the join form.
    pub async fn join_form(
        &self,
        principal: &Principal,
        quiz_id: &str,
    ) -> Result<JoinFormInfo, AppError> {
        let quiz = self.get_quiz(principal, quiz_id).await?;
        Ok(JoinFormInfo::from(&quiz))
    }
}

/// Decide what happens to the quiz secret so that a secret with a passcode
/// exists exactly when the quiz requires one.
fn plan_secret_change(
    existing: &Quiz,
    request: &UpdateQuizRequest,
) -> Result<SecretChange, AppError> {
    let passcode = request.passcode.as_deref();
    match request.require_quiz_passcode {
        Some(false) => Ok(SecretChange::Remove),
        Some(true) => match passcode {
            Some(_) => Ok(SecretChange::Set(required_passcode(
                passcode,
                "Quiz passcode",
            )?)),
            None if existing.require_quiz_passcode => Ok(SecretChange::Keep),
            None => Err(AppError::Validation(
                "Quiz passcode is required".to_string(),
            )),
        },
        None => match passcode {
            Some(_) if existing.require_quiz_passcode => Ok(SecretChange::Set(
                required_passcode(passcode, "Quiz passcode")?,
            )),
            Some(_) => Err(AppError::Validation(
                "Enable the quiz passcode before setting one".to_string(),
            )),
            None => Ok(SecretChange::Keep),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiz(require_quiz_passcode: bool) -> Quiz {
        Quiz {
            id: "q1".to_string(),
            name: "Test Quiz".to_string(),
            owner_id: "u1".to_string(),
            question_ids: Vec::new(),
            require_quiz_passcode,
        }
    }

    fn request(require: Option<bool>, passcode: Option<&str>) -> UpdateQuizRequest {
        UpdateQuizRequest {
            require_quiz_passcode: require,
            passcode: passcode.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_enabling_passcode_needs_a_value() {
        let result = plan_secret_change(&quiz(false), &request(Some(true), None));
        assert!(matches!(result, Err(AppError::Validation(_))));

        let result = plan_secret_change(&quiz(false), &request(Some(true), Some("pw")));
        assert_eq!(result.unwrap(), SecretChange::Set("pw".to_string()));
    }

    #[test]
    fn test_disabling_passcode_removes_secret() {
        let result = plan_secret_change(&quiz(true), &request(Some(false), Some("ignored")));
        assert_eq!(result.unwrap(), SecretChange::Remove);
    }

    #[test]
    fn test_passcode_change_without_toggle() {
        assert_eq!(
            plan_secret_change(&quiz(true), &request(None, Some("new"))).unwrap(),
            SecretChange::Set("new".to_string())
        );
        assert!(matches!(
            plan_secret_change(&quiz(false), &request(None, Some("new"))),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            plan_secret_change(&quiz(true), &request(None, Some(""))),
            Err(AppError::Validation(_))
        ));
        assert_eq!(
            plan_secret_change(&quiz(true), &request(None, None)).unwrap(),
            SecretChange::Keep
        );
    }
}
