use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set, TransactionTrait,
};
use tracing::debug;

use crate::{
    entities::movie,
    error::{AppError, AppResult},
    models::NewMovie,
};

#[derive(Clone)]
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// All movies, best rating first. SQLite sorts NULL ratings to the end
    /// of a descending scan, so unrated movies trail the list.
    pub async fn list_by_rating(&self) -> AppResult<Vec<movie::Model>> {
        let movies = movie::Entity::find()
            .order_by_desc(movie::Column::Rating)
            .all(&self.db)
            .await?;
        Ok(movies)
    }

    pub async fn get(&self, id: i32) -> AppResult<movie::Model> {
        movie::Entity::find_by_id(id).one(&self.db).await?.ok_or(AppError::NotFound(id))
    }

    pub async fn insert(&self, new: NewMovie) -> AppResult<movie::Model> {
        let model = movie::ActiveModel {
            title: Set(new.title.clone()),
            year: Set(new.year),
            description: Set(new.description),
            img_url: Set(new.img_url),
            ..Default::default()
        };

        let movie =
            model.insert(&self.db).await.map_err(|e| AppError::from_insert_err(e, &new.title))?;
        debug!(id = movie.id, title = %movie.title, "inserted movie");
        Ok(movie)
    }

    pub async fn update_review(&self, id: i32, rating: f64, review: String) -> AppResult<movie::Model> {
        let movie = self.get(id).await?;

        let mut active: movie::ActiveModel = movie.into();
        active.rating = Set(Some(rating));
        active.review = Set(Some(review));

        let movie = active.update(&self.db).await?;
        debug!(id = movie.id, rating = rating, "updated rating and review");
        Ok(movie)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let res = movie::Entity::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound(id));
        }
        debug!(id = id, "deleted movie");
        Ok(())
    }

    /// Writes back recomputed rankings in one transaction.
    pub async fn save_rankings(&self, movies: &[movie::Model]) -> AppResult<()> {
        let txn = self.db.begin().await?;

        for movie in movies {
            let active = movie::ActiveModel {
                id: Set(movie.id),
                ranking: Set(movie.ranking),
                ..Default::default()
            };
            active.update(&txn).await?;
        }

        txn.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db, ranking};

    async fn store() -> MovieStore {
        let db = db::connect_and_migrate("sqlite::memory:").await.unwrap();
        MovieStore::new(db)
    }

    fn new_movie(title: &str) -> NewMovie {
        NewMovie {
            title: title.to_string(),
            year: Some(2010),
            description: "A thief who steals corporate secrets.".to_string(),
            img_url: Some("https://image.tmdb.org/t/p/w500/poster.jpg".to_string()),
        }
    }

    #[tokio::test]
    async fn duplicate_title_is_a_conflict() {
        let store = store().await;
        store.insert(new_movie("Inception")).await.unwrap();

        let err = store.insert(new_movie("Inception")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(title) if title == "Inception"));
    }

    #[tokio::test]
    async fn get_after_delete_is_not_found() {
        let store = store().await;
        let movie = store.insert(new_movie("Heat")).await.unwrap();

        store.delete(movie.id).await.unwrap();
        let err = store.get(movie.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(id) if id == movie.id));
    }

    #[tokio::test]
    async fn delete_unknown_id_is_not_found() {
        let store = store().await;
        assert!(matches!(store.delete(999).await.unwrap_err(), AppError::NotFound(999)));
    }

    #[tokio::test]
    async fn update_review_persists() {
        let store = store().await;
        let movie = store.insert(new_movie("Phone Booth")).await.unwrap();
        assert_eq!(movie.rating, None);
        assert_eq!(movie.review, None);

        store.update_review(movie.id, 7.3, "My favourite character was the caller.".to_string())
            .await
            .unwrap();

        let stored = store.get(movie.id).await.unwrap();
        assert_eq!(stored.rating, Some(7.3));
        assert_eq!(stored.review.as_deref(), Some("My favourite character was the caller."));
        assert_eq!(stored.title, "Phone Booth");
        assert_eq!(stored.year, Some(2010));
    }

    #[tokio::test]
    async fn rankings_round_trip_through_the_store() {
        let store = store().await;
        let a = store.insert(new_movie("A")).await.unwrap();
        let b = store.insert(new_movie("B")).await.unwrap();
        let c = store.insert(new_movie("C")).await.unwrap();

        store.update_review(a.id, 8.0, "good".to_string()).await.unwrap();
        store.update_review(b.id, 9.5, "great".to_string()).await.unwrap();
        store.update_review(c.id, 7.0, "fine".to_string()).await.unwrap();

        let mut movies = store.list_by_rating().await.unwrap();
        ranking::assign(&mut movies);
        store.save_rankings(&movies).await.unwrap();

        assert_eq!(store.get(b.id).await.unwrap().ranking, Some(1));
        assert_eq!(store.get(a.id).await.unwrap().ranking, Some(2));
        assert_eq!(store.get(c.id).await.unwrap().ranking, Some(3));
    }

    #[tokio::test]
    async fn list_orders_best_first() {
        let store = store().await;
        let a = store.insert(new_movie("A")).await.unwrap();
        let b = store.insert(new_movie("B")).await.unwrap();

        store.update_review(a.id, 4.0, "meh".to_string()).await.unwrap();
        store.update_review(b.id, 9.0, "great".to_string()).await.unwrap();

        let movies = store.list_by_rating().await.unwrap();
        assert_eq!(movies[0].title, "B");
        assert_eq!(movies[1].title, "A");
    }
}
