use sea_orm::{entity::prelude::*, sea_query::Expr, DatabaseConnection, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::errors::ModelError;

/// To-do item owned by a `users` row.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub is_completed: bool,
    pub owner_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::OwnerId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    Owner,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef { Relation::Owner.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Insert an open task. A missing owner surfaces as `ForeignKeyViolation`.
pub async fn create(db: &DatabaseConnection, owner_id: Uuid, content: &str) -> Result<Model, ModelError> {
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        content: Set(content.to_string()),
        is_completed: Set(false),
        owner_id: Set(owner_id),
    };
    am.insert(db).await.map_err(ModelError::from)
}

pub async fn find_by_id(db: &DatabaseConnection, id: Uuid) -> Result<Option<Model>, ModelError> {
    Entity::find_by_id(id).one(db).await.map_err(ModelError::from)
}

/// Tasks of one owner, oldest id first for a stable order.
pub async fn find_by_owner(db: &DatabaseConnection, owner_id: Uuid) -> Result<Vec<Model>, ModelError> {
    Entity::find()
        .filter(Column::OwnerId.eq(owner_id))
        .order_by_asc(Column::Id)
        .all(db)
        .await
        .map_err(ModelError::from)
}

/// Overwrite content and completion of an existing task; `NotFound` when no row matched.
pub async fn update(db: &DatabaseConnection, task: &Model) -> Result<(), ModelError> {
    let res = Entity::update_many()
        .col_expr(Column::Content, Expr::value(task.content.clone()))
        .col_expr(Column::IsCompleted, Expr::value(task.is_completed))
        .filter(Column::Id.eq(task.id))
        .exec(db)
        .await?;
    if res.rows_affected == 0 {
        return Err(ModelError::NotFound);
    }
    Ok(())
}

pub async fn delete_by_id(db: &DatabaseConnection, id: Uuid) -> Result<(), ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ModelError::NotFound);
    }
    Ok(())
}
