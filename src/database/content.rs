// ABOUTME: Content library database operations for routines, plans, videos, documents, surveys
// ABOUTME: Batch id lookups power the aggregator's join step
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gatofit

use super::Database;
use crate::models::{
    ContentItem, ContentKind, DocumentSummary, NutritionPlanSummary, RoutineSummary,
    SurveySummary, VideoSummary,
};
use anyhow::Result;
use sqlx::Row;

impl Database {
    /// Create content library tables
    ///
    /// # Errors
    ///
    /// Returns an error if table creation fails
    pub(super) async fn migrate_content(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS routines (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                routine_type TEXT,
                description TEXT,
                estimated_duration_minutes INTEGER,
                exercise_count INTEGER,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS nutrition_plans (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS library_videos (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT,
                platform_video_id TEXT,
                video_url TEXT,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS library_documents (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT,
                file_url TEXT,
                file_name TEXT,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS library_surveys (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT,
                is_active BOOLEAN NOT NULL DEFAULT 1,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// Batch-resolve content records by id for one library kind
    ///
    /// Missing ids are simply absent from the result; the caller decides how
    /// to degrade. Order of the result is unspecified.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_content_by_ids(
        &self,
        kind: ContentKind,
        ids: &[String],
    ) -> Result<Vec<ContentItem>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = ids.iter().map(|_| "?").collect::<Vec<_>>().join(", ");

        match kind {
            ContentKind::Routine => {
                let sql = format!(
                    "SELECT id, name, routine_type, description, estimated_duration_minutes, \
                     exercise_count FROM routines WHERE id IN ({placeholders})"
                );
                let mut query = sqlx::query(&sql);
                for id in ids {
                    query = query.bind(id);
                }
                let rows = query.fetch_all(self.pool()).await?;
                Ok(rows
                    .iter()
                    .map(|row| ContentItem::Routine(Self::row_to_routine(row)))
                    .collect())
            }
            ContentKind::NutritionPlan => {
                let sql = format!(
                    "SELECT id, name, description FROM nutrition_plans WHERE id IN ({placeholders})"
                );
                let mut query = sqlx::query(&sql);
                for id in ids {
                    query = query.bind(id);
                }
                let rows = query.fetch_all(self.pool()).await?;
                Ok(rows
                    .iter()
                    .map(|row| {
                        ContentItem::NutritionPlan(NutritionPlanSummary {
                            id: row.get("id"),
                            name: row.get("name"),
                            description: row.get("description"),
                        })
                    })
                    .collect())
            }
            ContentKind::Video => {
                let sql = format!(
                    "SELECT id, title, description, platform_video_id, video_url \
                     FROM library_videos WHERE id IN ({placeholders})"
                );
                let mut query = sqlx::query(&sql);
                for id in ids {
                    query = query.bind(id);
                }
                let rows = query.fetch_all(self.pool()).await?;
                Ok(rows
                    .iter()
                    .map(|row| {
                        ContentItem::Video(VideoSummary {
                            id: row.get("id"),
                            title: row.get("title"),
                            description: row.get("description"),
                            platform_video_id: row.get("platform_video_id"),
                            video_url: row.get("video_url"),
                        })
                    })
                    .collect())
            }
            ContentKind::Document => {
                let sql = format!(
                    "SELECT id, title, description, file_url, file_name \
                     FROM library_documents WHERE id IN ({placeholders})"
                );
                let mut query = sqlx::query(&sql);
                for id in ids {
                    query = query.bind(id);
                }
                let rows = query.fetch_all(self.pool()).await?;
                Ok(rows
                    .iter()
                    .map(|row| {
                        ContentItem::Document(DocumentSummary {
                            id: row.get("id"),
                            title: row.get("title"),
                            description: row.get("description"),
                            file_url: row.get("file_url"),
                            file_name: row.get("file_name"),
                        })
                    })
                    .collect())
            }
            ContentKind::Survey => {
                let sql = format!(
                    "SELECT id, title, description, is_active \
                     FROM library_surveys WHERE id IN ({placeholders})"
                );
                let mut query = sqlx::query(&sql);
                for id in ids {
                    query = query.bind(id);
                }
                let rows = query.fetch_all(self.pool()).await?;
                Ok(rows
                    .iter()
                    .map(|row| {
                        ContentItem::Survey(SurveySummary {
                            id: row.get("id"),
                            title: row.get("title"),
                            description: row.get("description"),
                            is_active: row.get("is_active"),
                        })
                    })
                    .collect())
            }
        }
    }

    /// Create a routine record
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_routine(&self, routine: &RoutineSummary) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO routines
                (id, name, routine_type, description, estimated_duration_minutes, exercise_count)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ",
        )
        .bind(&routine.id)
        .bind(&routine.name)
        .bind(routine.routine_type.as_deref())
        .bind(routine.description.as_deref())
        .bind(routine.estimated_duration_minutes)
        .bind(routine.exercise_count)
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// Create a nutrition plan record
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_nutrition_plan(&self, plan: &NutritionPlanSummary) -> Result<()> {
        sqlx::query("INSERT INTO nutrition_plans (id, name, description) VALUES (?1, ?2, ?3)")
            .bind(&plan.id)
            .bind(&plan.name)
            .bind(plan.description.as_deref())
            .execute(self.pool())
            .await?;

        Ok(())
    }

    /// Create a library video record
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_library_video(&self, video: &VideoSummary) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO library_videos (id, title, description, platform_video_id, video_url)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ",
        )
        .bind(&video.id)
        .bind(&video.title)
        .bind(video.description.as_deref())
        .bind(video.platform_video_id.as_deref())
        .bind(video.video_url.as_deref())
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// Create a library document record
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_library_document(&self, document: &DocumentSummary) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO library_documents (id, title, description, file_url, file_name)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ",
        )
        .bind(&document.id)
        .bind(&document.title)
        .bind(document.description.as_deref())
        .bind(document.file_url.as_deref())
        .bind(document.file_name.as_deref())
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// Create a library survey record
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_library_survey(&self, survey: &SurveySummary) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO library_surveys (id, title, description, is_active)
            VALUES (?1, ?2, ?3, ?4)
            ",
        )
        .bind(&survey.id)
        .bind(&survey.title)
        .bind(survey.description.as_deref())
        .bind(survey.is_active)
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// Delete a routine record
    ///
    /// Content management can remove a routine while schedule rows still
    /// reference it; the aggregator degrades those references to placeholders.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_routine(&self, routine_id: &str) -> Result<()> {
        sqlx::query("DELETE FROM routines WHERE id = ?1")
            .bind(routine_id)
            .execute(self.pool())
            .await?;

        Ok(())
    }

    /// Delete a library video record
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_library_video(&self, video_id: &str) -> Result<()> {
        sqlx::query("DELETE FROM library_videos WHERE id = ?1")
            .bind(video_id)
            .execute(self.pool())
            .await?;

        Ok(())
    }

    /// Convert a database row to a `RoutineSummary`
    fn row_to_routine(row: &sqlx::sqlite::SqliteRow) -> RoutineSummary {
        RoutineSummary {
            id: row.get("id"),
            name: row.get("name"),
            routine_type: row.get("routine_type"),
            description: row.get("description"),
            estimated_duration_minutes: row.get("estimated_duration_minutes"),
            exercise_count: row.get("exercise_count"),
        }
    }
}
