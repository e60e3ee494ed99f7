//! Filter entity

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "filters")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub code: String,
    pub primary: String,  // "Si", "No"
    pub typology: String, // "air", "oil", "passenger", "diesel", "gas"
    pub quantity: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::car_filter::Entity")]
    CarFilters,
}

impl Related<super::car_filter::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CarFilters.def()
    }
}

impl Related<super::car::Entity> for Entity {
    fn to() -> RelationDef {
        super::car_filter::Relation::Car.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::car_filter::Relation::Filter.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
