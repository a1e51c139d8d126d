//! Comment entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use quill_core::domain::{Comment, NewComment};

use crate::database::postgres_base::DomainEntity;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "comments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub post_id: i64,
    pub author: String,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    pub created_date: DateTimeWithTimeZone,
    pub approved: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::post::Entity",
        from = "Column::PostId",
        to = "super::post::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Post,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl DomainEntity for Entity {
    type Domain = Comment;
    type Draft = NewComment;
}

impl From<Model> for Comment {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            post_id: model.post_id,
            author: model.author,
            text: model.text,
            created_date: model.created_date.into(),
            approved: model.approved,
        }
    }
}

impl From<Comment> for ActiveModel {
    fn from(comment: Comment) -> Self {
        Self {
            id: Set(comment.id),
            post_id: Set(comment.post_id),
            author: Set(comment.author),
            text: Set(comment.text),
            created_date: Set(comment.created_date.into()),
            approved: Set(comment.approved),
        }
    }
}

impl From<NewComment> for ActiveModel {
    fn from(comment: NewComment) -> Self {
        Self {
            id: NotSet,
            post_id: Set(comment.post_id),
            author: Set(comment.author),
            text: Set(comment.text),
            created_date: Set(comment.created_date.into()),
            approved: Set(comment.approved),
        }
    }
}
