//! Post entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use quill_core::domain::{NewPost, Post};

use crate::database::postgres_base::DomainEntity;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub author_id: Uuid,
    pub category_id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub created_date: DateTimeWithTimeZone,
    pub published_date: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Category,
    #[sea_orm(has_many = "super::comment::Entity")]
    Comment,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl DomainEntity for Entity {
    type Domain = Post;
    type Draft = NewPost;
}

impl From<Model> for Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            author_id: model.author_id,
            category_id: model.category_id,
            title: model.title,
            body: model.body,
            created_date: model.created_date.into(),
            published_date: model.published_date.map(Into::into),
        }
    }
}

/// Full overwrite of an existing row.
impl From<Post> for ActiveModel {
    fn from(post: Post) -> Self {
        Self {
            id: Set(post.id),
            author_id: Set(post.author_id),
            category_id: Set(post.category_id),
            title: Set(post.title),
            body: Set(post.body),
            created_date: Set(post.created_date.into()),
            published_date: Set(post.published_date.map(Into::into)),
        }
    }
}

/// Insert with a database-assigned id.
impl From<NewPost> for ActiveModel {
    fn from(post: NewPost) -> Self {
        Self {
            id: NotSet,
            author_id: Set(post.author_id),
            category_id: Set(post.category_id),
            title: Set(post.title),
            body: Set(post.body),
            created_date: Set(post.created_date.into()),
            published_date: Set(post.published_date.map(Into::into)),
        }
    }
}
