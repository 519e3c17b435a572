//! SQLite implementation of [`ProfileStore`].

use crate::db::pool::DbPool;
use crate::db::store::ProfileStore;
use crate::errors::{AppError, AppResult};
use crate::models::{PlanType, ProfilePatch, SubscriptionUpdate, UserProfile};
use rusqlite::{OptionalExtension, Result, Row, params};

pub fn map_profile(row: &Row) -> Result<UserProfile> {
    let plan_str: String = row.get("plan")?;
    let plan = PlanType::from_db_str(&plan_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidPlan(plan_str.clone())),
        )
    })?;

    Ok(UserProfile {
        id: row.get("id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        phone: row.get("phone")?,
        plan,
        whatsapp_notifications: row.get::<_, i32>("whatsapp_notifications")? == 1,
        stripe_customer_id: row.get("stripe_customer_id")?,
        stripe_subscription_id: row.get("stripe_subscription_id")?,
        subscription_status: row.get("subscription_status")?,
    })
}

impl ProfileStore for DbPool {
    fn load_profile(&self, user_id: i64) -> AppResult<UserProfile> {
        self.conn
            .query_row("SELECT * FROM profiles WHERE id = ?1", [user_id], map_profile)
            .optional()?
            .ok_or_else(|| AppError::not_found("Profile", user_id))
    }

    fn update_profile(&self, user_id: i64, patch: &ProfilePatch) -> AppResult<()> {
        let current = self.load_profile(user_id)?;

        let name = patch.name.clone().unwrap_or(current.name);
        let email = patch.email.clone().unwrap_or(current.email);
        let phone = patch.phone.clone().unwrap_or(current.phone);

        self.conn.execute(
            "UPDATE profiles SET name = ?1, email = ?2, phone = ?3 WHERE id = ?4",
            params![name.trim(), email.trim(), phone, user_id],
        )?;
        Ok(())
    }

    fn set_notifications(&self, user_id: i64, enabled: bool) -> AppResult<()> {
        let changed = self.conn.execute(
            "UPDATE profiles SET whatsapp_notifications = ?1 WHERE id = ?2",
            params![if enabled { 1 } else { 0 }, user_id],
        )?;
        if changed == 0 {
            return Err(AppError::not_found("Profile", user_id));
        }
        Ok(())
    }

    fn find_profile_by_email(&self, email: &str) -> AppResult<Option<i64>> {
        let id = self
            .conn
            .query_row(
                "SELECT id FROM profiles WHERE lower(email) = lower(?1) ORDER BY id LIMIT 1",
                [email.trim()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id)
    }

    fn find_profile_by_customer(&self, customer_id: &str) -> AppResult<Option<i64>> {
        let id = self
            .conn
            .query_row(
                "SELECT id FROM profiles WHERE stripe_customer_id = ?1 ORDER BY id LIMIT 1",
                [customer_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id)
    }

    fn profile_exists(&self, user_id: i64) -> AppResult<bool> {
        let mut stmt = self.conn.prepare("SELECT 1 FROM profiles WHERE id = ?1")?;
        Ok(stmt.exists([user_id])?)
    }

    fn apply_subscription(&self, user_id: i64, update: &SubscriptionUpdate) -> AppResult<()> {
        // ids absent from the event keep their stored value
        let changed = self.conn.execute(
            "UPDATE profiles
             SET stripe_customer_id = COALESCE(?1, stripe_customer_id),
                 stripe_subscription_id = COALESCE(?2, stripe_subscription_id),
                 subscription_status = ?3,
                 plan = ?4
             WHERE id = ?5",
            params![
                update.stripe_customer_id,
                update.stripe_subscription_id,
                update.subscription_status,
                update.plan.to_db_str(),
                user_id,
            ],
        )?;
        if changed == 0 {
            return Err(AppError::not_found("Profile", user_id));
        }
        Ok(())
    }
}
