use mockall_double::double;
use mongodb::bson::doc;
use mongodb::options::FindOptions;
use std::sync::Arc;

use crate::constants::*;
use crate::models::restaurant::Restaurant;
use crate::utils::AppError;

#[double]
use crate::database::AppDatabase;

/// All restaurants for the home rail, name order
pub async fn list_restaurants(db: &Arc<AppDatabase>) -> Result<Vec<Restaurant>, AppError> {
    let mut options = FindOptions::default();
    options.sort = Some(doc! {"name": 1});
    options.limit = Some(DEFAULT_QUERY_LIMIT as i64);
    let restaurants = db
        .find::<Restaurant>(DB_NAME, COLL_RESTAURANTS, None, Some(options))
        .await?;
    Ok(restaurants)
}
