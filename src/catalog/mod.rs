pub mod get_restaurant;
pub mod list_restaurants;

pub use get_restaurant::get_restaurant;
pub use list_restaurants::list_restaurants;
