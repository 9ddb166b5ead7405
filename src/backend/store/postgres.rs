//! PostgreSQL user collection
//!
//! One table holds every user document; the relationship lists are `TEXT[]`
//! columns and the counters `BIGINT`. Filters and mutations are rendered
//! with `sqlx::QueryBuilder`, values always bound, column names taken from
//! the typed field enums.
//!
//! ## Table
//!
//! ```sql
//! CREATE TABLE users (
//!     id TEXT PRIMARY KEY,
//!     name TEXT, contact_no TEXT, email TEXT, password TEXT,
//!     following TEXT[], following_count BIGINT,
//!     followers TEXT[], followers_count BIGINT
//! );
//! ```
//!
//! `apply_two_phase` runs both updates in one transaction and rolls back if
//! the source matched nothing.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::document::{Filter, Mutation, Operation, PhaseUpdate, TwoPhaseOutcome};
use super::UserCollection;
use crate::backend::error::StoreError;
use crate::shared::User;

const COLUMNS: &str =
    "id, name, contact_no, email, password, following, following_count, followers, followers_count";

/// User collection backed by one PostgreSQL table
#[derive(Debug, Clone)]
pub struct PgUserCollection {
    pool: PgPool,
    table: String,
}

impl PgUserCollection {
    /// `table` must be a plain identifier; `ServerConfig::validate` checks it
    pub fn new(pool: PgPool, table: impl Into<String>) -> Self {
        Self {
            pool,
            table: table.into(),
        }
    }

    fn select(&self, filter: &Filter) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new(format!("SELECT {} FROM {}", COLUMNS, self.table));
        push_where(&mut qb, filter);
        qb
    }

    /// `UPDATE ... SET ...` restricted to one row when `single`
    fn update(
        &self,
        filter: &Filter,
        mutation: &Mutation,
        single: bool,
    ) -> Result<QueryBuilder<'static, Postgres>, StoreError> {
        if mutation.is_empty() {
            return Err(StoreError::EmptyMutation);
        }
        let mut qb = QueryBuilder::new(format!("UPDATE {} SET ", self.table));
        push_mutation(&mut qb, mutation);
        self.push_target(&mut qb, filter, single);
        Ok(qb)
    }

    fn push_target(&self, qb: &mut QueryBuilder<'static, Postgres>, filter: &Filter, single: bool) {
        match filter {
            Filter::ById(_) => push_where(qb, filter),
            _ if single => {
                qb.push(format!(" WHERE id IN (SELECT id FROM {}", self.table));
                push_where(qb, filter);
                qb.push(" LIMIT 1)");
            }
            _ => push_where(qb, filter),
        }
    }
}

fn push_where(qb: &mut QueryBuilder<'static, Postgres>, filter: &Filter) {
    match filter {
        Filter::ById(id) => {
            qb.push(" WHERE id = ").push_bind(id.clone());
        }
        Filter::IdIn(ids) => {
            qb.push(" WHERE id = ANY(").push_bind(ids.clone()).push(")");
        }
        Filter::All => {}
    }
}

fn push_mutation(qb: &mut QueryBuilder<'static, Postgres>, mutation: &Mutation) {
    let mut set = qb.separated(", ");
    for operation in mutation.operations() {
        match operation {
            Operation::Set(field, value) => {
                set.push(format!("{} = ", field.column()));
                set.push_bind_unseparated(value.clone());
            }
            Operation::SetCount(field, value) => {
                set.push(format!("{} = ", field.column()));
                set.push_bind_unseparated(*value);
            }
            Operation::Push(field, values) => {
                let column = field.column();
                set.push(format!("{column} = {column} || "));
                set.push_bind_unseparated(values.clone());
                set.push_unseparated("::text[]");
            }
            Operation::Pull(field, values) => {
                let column = field.column();
                set.push(format!(
                    "{column} = ARRAY(SELECT e.v FROM unnest({column}) WITH ORDINALITY AS e(v, n) WHERE e.v <> ALL("
                ));
                set.push_bind_unseparated(values.clone());
                set.push_unseparated("::text[]) ORDER BY e.n)");
            }
            Operation::Inc {
                field,
                delta,
                floor,
            } => {
                let column = field.column();
                match floor {
                    Some(floor) => {
                        set.push(format!("{column} = GREATEST({column} + "));
                        set.push_bind_unseparated(*delta);
                        set.push_unseparated(", ");
                        set.push_bind_unseparated(*floor);
                        set.push_unseparated(")");
                    }
                    None => {
                        set.push(format!("{column} = {column} + "));
                        set.push_bind_unseparated(*delta);
                    }
                }
            }
        }
    }
}

#[async_trait]
impl UserCollection for PgUserCollection {
    async fn insert_one(&self, user: &User) -> Result<(), StoreError> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "INSERT INTO {} ({}) ",
            self.table, COLUMNS
        ));
        qb.push_values(std::iter::once(user), |mut row, user| {
            row.push_bind(user.id.clone())
                .push_bind(user.name.clone())
                .push_bind(user.contact_no.clone())
                .push_bind(user.email.clone())
                .push_bind(user.password.clone())
                .push_bind(user.following.clone())
                .push_bind(user.following_count)
                .push_bind(user.followers.clone())
                .push_bind(user.followers_count);
        });

        qb.build()
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::from_insert(e, &user.id))?;
        Ok(())
    }

    async fn find_one(&self, filter: &Filter) -> Result<Option<User>, StoreError> {
        let mut qb = self.select(filter);
        qb.push(" LIMIT 1");
        let user = qb.build_query_as::<User>().fetch_optional(&self.pool).await?;
        Ok(user)
    }

    async fn find_many(&self, filter: &Filter) -> Result<Vec<User>, StoreError> {
        let mut qb = self.select(filter);
        let users = qb.build_query_as::<User>().fetch_all(&self.pool).await?;
        Ok(users)
    }

    async fn update_one(&self, filter: &Filter, mutation: &Mutation) -> Result<u64, StoreError> {
        let mut qb = self.update(filter, mutation, true)?;
        let result = qb.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn update_many(&self, filter: &Filter, mutation: &Mutation) -> Result<u64, StoreError> {
        let mut qb = self.update(filter, mutation, false)?;
        let result = qb.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn delete_one(&self, filter: &Filter) -> Result<u64, StoreError> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("DELETE FROM {}", self.table));
        self.push_target(&mut qb, filter, true);
        let result = qb.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    fn supports_transactions(&self) -> bool {
        true
    }

    async fn apply_two_phase(
        &self,
        source: &PhaseUpdate,
        targets: &PhaseUpdate,
    ) -> Result<TwoPhaseOutcome, StoreError> {
        let mut source_query = self.update(&source.filter, &source.mutation, true)?;
        let mut targets_query = self.update(&targets.filter, &targets.mutation, false)?;

        let mut tx = self.pool.begin().await?;

        let source_matched = source_query.build().execute(&mut *tx).await?.rows_affected();
        if source_matched == 0 {
            tx.rollback().await?;
            return Ok(TwoPhaseOutcome::SourceMissing);
        }

        let targets_matched = targets_query.build().execute(&mut *tx).await?.rows_affected();
        tx.commit().await?;

        Ok(TwoPhaseOutcome::Applied {
            source_matched,
            targets_matched,
        })
    }

    async fn close(&self) {
        tracing::info!("Closing database connection pool");
        self.pool.close().await;
    }
}
