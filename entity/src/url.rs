use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "urls")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::url_check::Entity")]
    UrlCheck,
}

impl Related<super::url_check::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UrlCheck.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
