use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use crate::{
    entities::{movie, user},
    error::AppResult,
    models::{MovieChanges, MovieDetails},
};

#[derive(Clone)]
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_users(&self) -> AppResult<Vec<user::Model>> {
        Ok(user::Entity::find().order_by_asc(user::Column::Id).all(&self.db).await?)
    }

    pub async fn get_user(&self, id: i32) -> AppResult<Option<user::Model>> {
        Ok(user::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn add_user(&self, name: &str) -> AppResult<user::Model> {
        let model = user::ActiveModel { name: Set(name.to_string()), ..Default::default() };
        Ok(model.insert(&self.db).await?)
    }

    /// Removes the user and every movie it owns. Returns `false` if there was
    /// no such user.
    pub async fn delete_user(&self, id: i32) -> AppResult<bool> {
        let txn = self.db.begin().await?;

        movie::Entity::delete_many()
            .filter(movie::Column::UserId.eq(id))
            .exec(&txn)
            .await?;
        let res = user::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        Ok(res.rows_affected > 0)
    }

    /// Movies owned by `user_id`, oldest first. Empty when the user is unknown.
    pub async fn user_movies(&self, user_id: i32) -> AppResult<Vec<movie::Model>> {
        Ok(movie::Entity::find()
            .filter(movie::Column::UserId.eq(user_id))
            .order_by_asc(movie::Column::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn add_movie(&self, user_id: i32, details: MovieDetails) -> AppResult<movie::Model> {
        let model = movie::ActiveModel {
            id: Default::default(),
            name: Set(details.name),
            director: Set(details.director),
            year: Set(details.year),
            rating: Set(details.rating),
            poster_url: Set(details.poster_url),
            user_id: Set(user_id),
        };
        Ok(model.insert(&self.db).await?)
    }

    pub async fn get_movie(&self, id: i32) -> AppResult<Option<movie::Model>> {
        Ok(movie::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn update_movie(
        &self,
        id: i32,
        changes: MovieChanges,
    ) -> AppResult<Option<movie::Model>> {
        let Some(existing) = self.get_movie(id).await? else {
            return Ok(None);
        };

        let mut model: movie::ActiveModel = existing.into();
        model.name = Set(changes.name);
        model.director = Set(changes.director);
        model.year = Set(changes.year);
        model.rating = Set(changes.rating);

        Ok(Some(model.update(&self.db).await?))
    }

    pub async fn delete_movie(&self, id: i32) -> AppResult<bool> {
        let res = movie::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}
