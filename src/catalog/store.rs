//! Catalog storage.
//!
//! `CatalogRepository` is the data-access seam used by the web handlers.
//! `SeaOrmCatalog` implements it over the SQLite tables created in `db`.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, SqlErr, TransactionTrait,
};

use super::model::{Car, CarFilter, CarQuery, Filter, NewCar, NewFilter};
use crate::db::entities::{car, car_filter, filter};
use crate::error::{Result, ServerError};

/// Record access for cars, filters and the links between them.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Fetch a car by primary key.
    async fn get_car_by_id(&self, id: i32) -> Result<Car>;

    /// All filters linked to `car`, each listed once, ordered by id.
    async fn get_filters_for_car(&self, car: &Car) -> Result<Vec<Filter>>;

    /// All cars linked to `filter`, each listed once, ordered by id.
    async fn get_cars_for_filter(&self, filter: &Filter) -> Result<Vec<Car>>;

    async fn list_cars(&self, query: &CarQuery) -> Result<Vec<Car>>;

    /// Insert a car. Fails with `Duplicate` if (make, model, engine) is taken.
    async fn create_car(&self, new: NewCar) -> Result<Car>;

    /// Replace every field of an existing car.
    async fn update_car(&self, id: i32, new: NewCar) -> Result<Car>;

    /// Delete a car and its filter links. Filters are kept.
    async fn delete_car(&self, id: i32) -> Result<()>;

    async fn get_filter_by_id(&self, id: i32) -> Result<Filter>;

    async fn list_filters(&self) -> Result<Vec<Filter>>;

    async fn create_filter(&self, new: NewFilter) -> Result<Filter>;

    async fn update_filter(&self, id: i32, new: NewFilter) -> Result<Filter>;

    /// Delete a filter and its car links. Cars are kept.
    async fn delete_filter(&self, id: i32) -> Result<()>;

    /// Record that a filter fits a car. Repeated links are stored as-is.
    async fn link(&self, car_id: i32, filter_id: i32) -> Result<CarFilter>;
}

/// SeaORM-backed catalog.
pub struct SeaOrmCatalog {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmCatalog {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn find_car(&self, id: i32) -> Result<car::Model> {
        car::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or(ServerError::CarNotFound(id))
    }

    async fn find_filter(&self, id: i32) -> Result<filter::Model> {
        filter::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or(ServerError::FilterNotFound(id))
    }

    /// Reject a (make, model, engine) triple already used by another car.
    async fn ensure_unique(&self, new: &NewCar, except: Option<i32>) -> Result<()> {
        let mut query = car::Entity::find()
            .filter(car::Column::Make.eq(new.make.as_str()))
            .filter(car::Column::Model.eq(new.model.as_str()))
            .filter(car::Column::Engine.eq(new.engine.value()));
        if let Some(id) = except {
            query = query.filter(car::Column::Id.ne(id));
        }

        if query.one(self.db.as_ref()).await?.is_some() {
            return Err(duplicate_car(new));
        }
        Ok(())
    }
}

fn duplicate_car(new: &NewCar) -> ServerError {
    ServerError::Duplicate(format!(
        "car {} {} with {} engine",
        new.make,
        new.model,
        new.engine.value()
    ))
}

/// Map a unique-constraint failure that slipped past the pre-check.
fn map_car_write_err(err: DbErr, new: &NewCar) -> ServerError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => duplicate_car(new),
        _ => ServerError::Database(err),
    }
}

fn cars_from(models: Vec<car::Model>) -> Result<Vec<Car>> {
    models.into_iter().map(Car::try_from).collect()
}

fn filters_from(models: Vec<filter::Model>) -> Result<Vec<Filter>> {
    models.into_iter().map(Filter::try_from).collect()
}

#[async_trait]
impl CatalogRepository for SeaOrmCatalog {
    async fn get_car_by_id(&self, id: i32) -> Result<Car> {
        tracing::debug!("Looking up car {}", id);
        self.find_car(id).await?.try_into()
    }

    async fn get_filters_for_car(&self, car: &Car) -> Result<Vec<Filter>> {
        // Joins filters -> car_filters -> cars through the many-to-many relation
        let models = filter::Entity::find()
            .inner_join(car::Entity)
            .filter(car::Column::Id.eq(car.id))
            .distinct()
            .order_by_asc(filter::Column::Id)
            .all(self.db.as_ref())
            .await?;
        filters_from(models)
    }

    async fn get_cars_for_filter(&self, filter: &Filter) -> Result<Vec<Car>> {
        let models = car::Entity::find()
            .inner_join(filter::Entity)
            .filter(filter::Column::Id.eq(filter.id))
            .distinct()
            .order_by_asc(car::Column::Id)
            .all(self.db.as_ref())
            .await?;
        cars_from(models)
    }

    async fn list_cars(&self, query: &CarQuery) -> Result<Vec<Car>> {
        let mut select = car::Entity::find();
        if let Some(make) = &query.make {
            select = select.filter(car::Column::Make.eq(make.as_str()));
        }
        if let Some(model) = &query.model {
            select = select.filter(car::Column::Model.eq(model.as_str()));
        }
        if let Some(engine) = query.engine {
            select = select.filter(car::Column::Engine.eq(engine.value()));
        }

        let models = select
            .order_by_asc(car::Column::Id)
            .all(self.db.as_ref())
            .await?;
        cars_from(models)
    }

    async fn create_car(&self, new: NewCar) -> Result<Car> {
        new.validate()?;
        self.ensure_unique(&new, None).await?;

        let model = car::ActiveModel {
            make: Set(new.make.clone()),
            model: Set(new.model.clone()),
            year: Set(new.year.clone()),
            engine: Set(new.engine.value().to_string()),
            cylinders: Set(new.cylinders.value().to_string()),
            oil_quantity: Set(new.oil_quantity),
            oil_specific: Set(new.oil_specific.value().to_string()),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await
        .map_err(|e| map_car_write_err(e, &new))?;

        tracing::info!("Created car {} ({} {})", model.id, model.make, model.model);
        model.try_into()
    }

    async fn update_car(&self, id: i32, new: NewCar) -> Result<Car> {
        new.validate()?;
        let existing = self.find_car(id).await?;
        self.ensure_unique(&new, Some(id)).await?;

        let mut active: car::ActiveModel = existing.into();
        active.make = Set(new.make.clone());
        active.model = Set(new.model.clone());
        active.year = Set(new.year.clone());
        active.engine = Set(new.engine.value().to_string());
        active.cylinders = Set(new.cylinders.value().to_string());
        active.oil_quantity = Set(new.oil_quantity);
        active.oil_specific = Set(new.oil_specific.value().to_string());

        let model = active
            .update(self.db.as_ref())
            .await
            .map_err(|e| map_car_write_err(e, &new))?;

        tracing::info!("Updated car {}", id);
        model.try_into()
    }

    async fn delete_car(&self, id: i32) -> Result<()> {
        let txn = self.db.begin().await?;

        let links = car_filter::Entity::delete_many()
            .filter(car_filter::Column::CarId.eq(id))
            .exec(&txn)
            .await?;
        let deleted = car::Entity::delete_by_id(id).exec(&txn).await?;
        if deleted.rows_affected == 0 {
            txn.rollback().await?;
            return Err(ServerError::CarNotFound(id));
        }

        txn.commit().await?;
        tracing::info!("Deleted car {} and {} filter links", id, links.rows_affected);
        Ok(())
    }

    async fn get_filter_by_id(&self, id: i32) -> Result<Filter> {
        tracing::debug!("Looking up filter {}", id);
        self.find_filter(id).await?.try_into()
    }

    async fn list_filters(&self) -> Result<Vec<Filter>> {
        let models = filter::Entity::find()
            .order_by_asc(filter::Column::Id)
            .all(self.db.as_ref())
            .await?;
        filters_from(models)
    }

    async fn create_filter(&self, new: NewFilter) -> Result<Filter> {
        new.validate()?;

        let model = filter::ActiveModel {
            code: Set(new.code),
            primary: Set(new.primary.value().to_string()),
            typology: Set(new.typology.value().to_string()),
            quantity: Set(i64::from(new.quantity)),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await?;

        tracing::info!("Created filter {} ({})", model.id, model.code);
        model.try_into()
    }

    async fn update_filter(&self, id: i32, new: NewFilter) -> Result<Filter> {
        new.validate()?;
        let existing = self.find_filter(id).await?;

        let mut active: filter::ActiveModel = existing.into();
        active.code = Set(new.code);
        active.primary = Set(new.primary.value().to_string());
        active.typology = Set(new.typology.value().to_string());
        active.quantity = Set(i64::from(new.quantity));

        let model = active.update(self.db.as_ref()).await?;
        tracing::info!("Updated filter {}", id);
        model.try_into()
    }

    async fn delete_filter(&self, id: i32) -> Result<()> {
        let txn = self.db.begin().await?;

        let links = car_filter::Entity::delete_many()
            .filter(car_filter::Column::FilterId.eq(id))
            .exec(&txn)
            .await?;
        let deleted = filter::Entity::delete_by_id(id).exec(&txn).await?;
        if deleted.rows_affected == 0 {
            txn.rollback().await?;
            return Err(ServerError::FilterNotFound(id));
        }

        txn.commit().await?;
        tracing::info!("Deleted filter {} and {} car links", id, links.rows_affected);
        Ok(())
    }

    async fn link(&self, car_id: i32, filter_id: i32) -> Result<CarFilter> {
        self.find_car(car_id).await?;
        self.find_filter(filter_id).await?;

        let model = car_filter::ActiveModel {
            car_id: Set(car_id),
            filter_id: Set(filter_id),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await?;

        tracing::info!("Linked filter {} to car {}", filter_id, car_id);
        Ok(model.into())
    }
}
