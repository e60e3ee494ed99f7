//! Car entity

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cars")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub make: String,
    pub model: String,
    pub year: String,
    pub engine: String,    // "petrol", "diesel"
    pub cylinders: String, // "900" .. "2000"
    pub oil_quantity: f64,
    pub oil_specific: String, // "RN0710", "RN0720", "RN17"
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

impl Related<super::filter::Entity> for Entity {
    fn to() -> RelationDef {
        super::car_filter::Relation::Filter.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::car_filter::Relation::Car.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
