//! MySQL-backed OTP store and account directory.
//!
//! The `otp_info` table holds at most one login OTP row per account number;
//! writes upsert on the primary key. Account existence checks go against the
//! `accounts` table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use tracing::error;

use otp_core::domain::entities::OtpRecord;
use otp_core::errors::{OtpError, OtpResult};
use otp_core::repositories::{AccountDirectory, OtpStore};

/// Login OTP records persisted in the `otp_info` table.
pub struct MySqlOtpStore {
    pool: MySqlPool,
}

impl MySqlOtpStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OtpStore for MySqlOtpStore {
    async fn get(&self, account_number: &str) -> OtpResult<Option<OtpRecord>> {
        let row = sqlx::query(
            "SELECT account_number, otp_code, generated_at FROM otp_info WHERE account_number = ?",
        )
        .bind(account_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage_err("fetch OTP record", e))?;

        match row {
            Some(row) => {
                let account_number: String = row
                    .try_get("account_number")
                    .map_err(|e| storage_err("decode OTP row", e))?;
                let code: String = row
                    .try_get("otp_code")
                    .map_err(|e| storage_err("decode OTP row", e))?;
                let generated_at: DateTime<Utc> = row
                    .try_get("generated_at")
                    .map_err(|e| storage_err("decode OTP row", e))?;
                Ok(Some(OtpRecord::new(account_number, code, generated_at)))
            }
            None => Ok(None),
        }
    }

    async fn put(&self, record: OtpRecord) -> OtpResult<()> {
        sqlx::query(
            "INSERT INTO otp_info (account_number, otp_code, generated_at) \
             VALUES (?, ?, ?) \
             ON DUPLICATE KEY UPDATE otp_code = VALUES(otp_code), \
             generated_at = VALUES(generated_at)",
        )
        .bind(&record.account_number)
        .bind(&record.code)
        .bind(record.generated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| storage_err("store OTP record", e))?;
        Ok(())
    }

    async fn delete(&self, account_number: &str) -> OtpResult<()> {
        sqlx::query("DELETE FROM otp_info WHERE account_number = ?")
            .bind(account_number)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_err("delete OTP record", e))?;
        Ok(())
    }
}

/// Account existence lookups against the `accounts` table.
pub struct MySqlAccountDirectory {
    pool: MySqlPool,
}

impl MySqlAccountDirectory {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountDirectory for MySqlAccountDirectory {
    async fn account_exists(&self, account_number: &str) -> OtpResult<bool> {
        let row =
            sqlx::query("SELECT EXISTS(SELECT 1 FROM accounts WHERE account_number = ?) AS found")
                .bind(account_number)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| storage_err("check account existence", e))?;

        let found: i64 = row
            .try_get("found")
            .map_err(|e| storage_err("decode existence row", e))?;
        Ok(found != 0)
    }
}

fn storage_err(operation: &str, error: sqlx::Error) -> OtpError {
    error!("Failed to {}: {}", operation, error);
    OtpError::Storage {
        message: format!("{}: {}", operation, error),
    }
}
