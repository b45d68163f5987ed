//! # Flat-file store
//!
//! JSON files on disk, one per logical table.
//!
//! ## Requirements
//!
//! - Tiny dataset: a few hundred accounts, a handful of weekly entries each
//! - Whole-table reads dominate; the leaderboard and insights walk full tables
//! - Survive restarts without running a database server
//!
//! ## Implementation
//!
//! - One file per table: `users.json`, `user_inputs.json`, `water_quality.json`
//! - Read the whole file, mutate in memory, rewrite the whole file
//! - Per-table async mutex, so in-process read-modify-write cycles cannot interleave
//! - Missing file reads as the empty table
//! - Estimated file sizes:
//!   (300 bytes (account) + 600 bytes (weekly entry) × 52) × 500 users = roughly 16 MB upper bound
use std::{
    collections::HashMap,
    marker::PhantomData,
    path::{Path, PathBuf},
};

use serde::{Serialize, de::DeserializeOwned};
use tokio::{fs, sync::Mutex};
use tracing::info;

use super::{
    error::AppError,
    inputs::UserLog,
    quality::{QualityMap, seed_quality},
    user::User,
};

pub const USERS_FILE: &str = "users.json";
pub const INPUTS_FILE: &str = "user_inputs.json";
pub const QUALITY_FILE: &str = "water_quality.json";

pub type Users = HashMap<String, User>;
pub type UserInputs = HashMap<String, UserLog>;

pub struct Table<T> {
    path: PathBuf,
    lock: Mutex<()>,
    _payload: PhantomData<fn() -> T>,
}

impl<T> Table<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    pub fn new(dir: &Path, file: &str) -> Self {
        Self {
            path: dir.join(file),
            lock: Mutex::new(()),
            _payload: PhantomData,
        }
    }

    pub async fn read(&self) -> Result<T, AppError> {
        let _guard = self.lock.lock().await;

        self.load().await
    }

    /// Runs `mutate` against the current contents and rewrites the file,
    /// all while holding the table lock. Nothing is written when `mutate`
    /// returns an error.
    pub async fn update<R>(
        &self,
        mutate: impl FnOnce(&mut T) -> Result<R, AppError>,
    ) -> Result<R, AppError> {
        let _guard = self.lock.lock().await;

        let mut value = self.load().await?;
        let result = mutate(&mut value)?;

        fs::write(&self.path, serde_json::to_vec_pretty(&value)?).await?;

        Ok(result)
    }

    async fn load(&self) -> Result<T, AppError> {
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(T::default()),
            Err(error) => Err(error.into()),
        }
    }
}

pub struct Database {
    pub users: Table<Users>,
    pub inputs: Table<UserInputs>,
    pub quality: Table<QualityMap>,
}

pub async fn init_database(data_dir: &Path) -> Database {
    fs::create_dir_all(data_dir).await.unwrap();

    let database = Database {
        users: Table::new(data_dir, USERS_FILE),
        inputs: Table::new(data_dir, INPUTS_FILE),
        quality: Table::new(data_dir, QUALITY_FILE),
    };

    if !data_dir.join(QUALITY_FILE).exists() {
        info!("Seeding water quality table");

        database
            .quality
            .update(|table| {
                *table = seed_quality();
                Ok(())
            })
            .await
            .unwrap();
    }

    database
}
