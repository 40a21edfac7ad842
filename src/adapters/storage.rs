use crate::domain::model::{
    Car, NewCar, NewRating, Page, PageRequest, PopularCar, RatedCar, Rating,
};
use crate::domain::ports::CarStore;
use crate::utils::error::{Result, ServiceError};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Executor;
use std::str::FromStr;
use std::time::Duration;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS cars (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    make VARCHAR(30) NOT NULL,
    model VARCHAR(30) NOT NULL,
    UNIQUE (make, model)
);

CREATE TABLE IF NOT EXISTS ratings (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    car_id INTEGER NOT NULL REFERENCES cars (id) ON DELETE CASCADE,
    rating INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5)
);

CREATE INDEX IF NOT EXISTS ratings_car_id ON ratings (car_id);
"#;

/// SQLite-backed [`CarStore`].
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Connect (creating the file if needed) and make sure the schema exists.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        tracing::info!("Connecting to SQLite database at {}", database_url);

        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool_options = if database_url.contains(":memory:") {
            // every connection to `:memory:` opens a separate database, and
            // the database is gone once its connection closes
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections)
        };

        let pool = pool_options.connect_with(options).await?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> Result<()> {
        self.pool.execute(SCHEMA).await?;
        tracing::debug!("Database schema is up to date");
        Ok(())
    }
}

#[async_trait]
impl CarStore for SqliteStore {
    async fn insert_car(&self, car: &NewCar) -> Result<Car> {
        let result = sqlx::query("INSERT INTO cars (make, model) VALUES (?, ?)")
            .bind(&car.make)
            .bind(&car.model)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                    ServiceError::UniqueConstraintError {
                        message: "The fields make, model must make a unique set.".to_string(),
                    }
                }
                other => ServiceError::DatabaseError(other),
            })?;

        Ok(Car {
            id: result.last_insert_rowid(),
            make: car.make.clone(),
            model: car.model.clone(),
        })
    }

    async fn list_cars(&self, page: PageRequest) -> Result<Page<RatedCar>> {
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM cars")
            .fetch_one(&self.pool)
            .await?;

        let items: Vec<RatedCar> = sqlx::query_as(
            "SELECT c.id, c.make, c.model, AVG(r.rating) AS avg_rating \
             FROM cars c LEFT JOIN ratings r ON r.car_id = c.id \
             GROUP BY c.id, c.make, c.model \
             ORDER BY c.id \
             LIMIT ? OFFSET ?",
        )
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(Page { total, items })
    }

    async fn delete_car(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM cars WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ServiceError::NotFoundError { resource: "Car", id });
        }
        Ok(())
    }

    async fn insert_rating(&self, rating: &NewRating) -> Result<Rating> {
        let result = sqlx::query("INSERT INTO ratings (car_id, rating) VALUES (?, ?)")
            .bind(rating.car_id)
            .bind(rating.rating)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                    ServiceError::NotFoundError {
                        resource: "Car",
                        id: rating.car_id,
                    }
                }
                other => ServiceError::DatabaseError(other),
            })?;

        Ok(Rating {
            id: result.last_insert_rowid(),
            car_id: rating.car_id,
            rating: rating.rating,
        })
    }

    async fn popular_cars(&self, limit: i64) -> Result<Vec<PopularCar>> {
        let cars = sqlx::query_as(
            "SELECT c.id, c.make, c.model, COUNT(r.id) AS rates_number \
             FROM cars c LEFT JOIN ratings r ON r.car_id = c.id \
             GROUP BY c.id, c.make, c.model \
             ORDER BY rates_number DESC, c.id ASC \
             LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(cars)
    }
}
