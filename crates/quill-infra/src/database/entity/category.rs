//! Category entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use quill_core::domain::{Category, NewCategory};

use crate::database::postgres_base::DomainEntity;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post::Entity")]
    Post,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl DomainEntity for Entity {
    type Domain = Category;
    type Draft = NewCategory;
}

impl From<Model> for Category {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

impl From<Category> for ActiveModel {
    fn from(category: Category) -> Self {
        Self {
            id: Set(category.id),
            name: Set(category.name),
        }
    }
}

impl From<NewCategory> for ActiveModel {
    fn from(category: NewCategory) -> Self {
        Self {
            id: NotSet,
            name: Set(category.name),
        }
    }
}
