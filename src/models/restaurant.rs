use serde::{Deserialize, Serialize};

use crate::utils::deserialize_helper;

/// Catalog document describing one bookable restaurant. Slot labels and
/// carousel images are published as part of the document; operating hours
/// are display data and are not enforced when a booking date is chosen.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    #[serde(rename = "_id")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(deserialize_with = "deserialize_helper")]
    #[serde(default)]
    pub id: Option<String>,

    pub name: String,
    pub address: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub closing: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub seats: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub carousel_images: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub slots: Option<Vec<String>>,
}

impl Restaurant {
    /// Slot labels offered by this restaurant, empty when none are published
    pub fn published_slots(&self) -> &[String] {
        self.slots.as_deref().unwrap_or_default()
    }
}
