use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DbConn, DbErr, EntityTrait, IntoActiveModel,
    PrimaryKeyTrait,
};

use quill_core::error::RepoError;
use quill_core::ports::BaseRepository;

/// Generic PostgreSQL repository implementation.
///
/// Repositories share one connection pool through an `Arc`.
pub struct PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub(crate) db: Arc<DbConn>,
    _entity: PhantomData<E>,
}

impl<E> PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub fn new(db: impl Into<Arc<DbConn>>) -> Self {
        Self {
            db: db.into(),
            _entity: PhantomData,
        }
    }
}

/// Map a SeaORM error onto the repository error taxonomy.
pub(crate) fn map_db_err(err: DbErr) -> RepoError {
    match err {
        DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => RepoError::NotFound,
        DbErr::Conn(e) => RepoError::Connection(e.to_string()),
        DbErr::ConnectionAcquire(e) => RepoError::Connection(e.to_string()),
        other => {
            let err_str = other.to_string();
            if err_str.contains("duplicate") || err_str.contains("unique") {
                RepoError::Constraint("Entity already exists".to_string())
            } else if err_str.contains("foreign key") {
                RepoError::Constraint(err_str)
            } else {
                RepoError::Query(err_str)
            }
        }
    }
}

/// Binds a SeaORM entity to its domain type and its insert draft.
pub trait DomainEntity: EntityTrait {
    type Domain: From<Self::Model> + Into<Self::ActiveModel> + Send + Sync + 'static;
    type Draft: Into<Self::ActiveModel> + Send + Sync + 'static;
}

type PrimaryKeyOf<E> = <<E as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType;

#[async_trait]
impl<E> BaseRepository<E::Domain, E::Draft, PrimaryKeyOf<E>> for PostgresBaseRepository<E>
where
    E: DomainEntity,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync + Send,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send + Sync,
    PrimaryKeyOf<E>: Send + Sync + Into<sea_orm::Value> + Clone + Copy + 'static,
{
    async fn find_by_id(&self, id: PrimaryKeyOf<E>) -> Result<Option<E::Domain>, RepoError> {
        let result = E::find_by_id(id).one(self.db.as_ref()).await.map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn insert(&self, draft: E::Draft) -> Result<E::Domain, RepoError> {
        let active_model: E::ActiveModel = draft.into();
        let model = active_model.insert(self.db.as_ref()).await.map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn update(&self, entity: E::Domain) -> Result<E::Domain, RepoError> {
        let active_model: E::ActiveModel = entity.into();
        let model = active_model.update(self.db.as_ref()).await.map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn delete(&self, id: PrimaryKeyOf<E>) -> Result<(), RepoError> {
        let result = E::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}
