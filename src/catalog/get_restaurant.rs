use mockall_double::double;
use mongodb::bson::doc;
use std::sync::Arc;

use crate::constants::*;
use crate::models::restaurant::Restaurant;
use crate::utils::{parse_object_id, AppError};

#[double]
use crate::database::AppDatabase;

/// Fetch one restaurant document for the detail view
pub async fn get_restaurant(
    db: &Arc<AppDatabase>,
    restaurant_id: &str,
) -> Result<Restaurant, AppError> {
    let oid = parse_object_id(restaurant_id, "Not a valid restaurant id")?;
    let filter = Some(doc! {"_id": oid});
    let not_found = format!("Restaurant not found with id: {restaurant_id}");
    let not_found = AppError::NotFound(not_found);
    let restaurant = db
        .find_one::<Restaurant>(DB_NAME, COLL_RESTAURANTS, filter, None)
        .await?
        .ok_or(not_found)?;
    Ok(restaurant)
}
