// ABOUTME: Survey response database operations
// ABOUTME: One response per (survey, user); duplicates surface as a typed error
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gatofit

use super::Database;
use crate::errors::SurveySubmissionError;
use anyhow::Result;
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create the survey response table
    ///
    /// # Errors
    ///
    /// Returns an error if table creation fails
    pub(super) async fn migrate_surveys(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS survey_responses (
                id TEXT PRIMARY KEY,
                survey_id TEXT NOT NULL,
                user_id TEXT NOT NULL,
                answers TEXT NOT NULL,
                submitted_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                UNIQUE(survey_id, user_id)
            )
            ",
        )
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// Insert the user's response to a survey
    ///
    /// The `(survey_id, user_id)` uniqueness constraint rejects a second
    /// submission; that case is reported as
    /// [`SurveySubmissionError::Duplicate`] so the caller can treat the
    /// survey as already answered.
    ///
    /// # Errors
    ///
    /// Returns `Duplicate` when a response already exists, or `Store` for any
    /// other database failure
    pub async fn submit_survey_response(
        &self,
        survey_id: &str,
        user_id: Uuid,
        answers: &serde_json::Value,
    ) -> Result<(), SurveySubmissionError> {
        let result = sqlx::query(
            r"
            INSERT INTO survey_responses (id, survey_id, user_id, answers)
            VALUES (?1, ?2, ?3, ?4)
            ",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(survey_id)
        .bind(user_id.to_string())
        .bind(answers.to_string())
        .execute(self.pool())
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(SurveySubmissionError::Duplicate {
                    survey_id: survey_id.to_owned(),
                })
            }
            Err(e) => Err(SurveySubmissionError::Store(e.into())),
        }
    }

    /// Whether the user has already answered a survey
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn has_survey_response(&self, survey_id: &str, user_id: Uuid) -> Result<bool> {
        let row = sqlx::query(
            "SELECT COUNT(*) as count FROM survey_responses WHERE survey_id = ?1 AND user_id = ?2",
        )
        .bind(survey_id)
        .bind(user_id.to_string())
        .fetch_one(self.pool())
        .await?;

        let count: i64 = row.get("count");
        Ok(count > 0)
    }
}
