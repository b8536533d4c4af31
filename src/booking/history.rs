use mockall_double::double;
use mongodb::bson::doc;
use mongodb::options::FindOptions;
use std::sync::Arc;

use crate::constants::*;
use crate::models::booking::Booking;
use crate::session::Session;
use crate::utils::AppError;

#[double]
use crate::database::AppDatabase;

/// Bookings made from this account, newest first. Guests have no account
/// to query by, so they get an empty history.
pub async fn get_booking_history(
    db: &Arc<AppDatabase>,
    session: &Session,
) -> Result<Vec<Booking>, AppError> {
    if !session.is_authenticated() {
        return Ok(vec![]);
    }
    let Some(email) = session.user_email.as_deref() else {
        return Ok(vec![]);
    };
    let filter = Some(doc! {"email": email});
    let mut options = FindOptions::default();
    options.sort = Some(doc! {"createdTs": -1});
    options.limit = Some(DEFAULT_QUERY_LIMIT as i64);
    let bookings = db
        .find::<Booking>(DB_NAME, COLL_BOOKINGS, filter, Some(options))
        .await?;
    Ok(bookings)
}
