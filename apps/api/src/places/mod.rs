//! Local internship search against the Places text-search API.
//!
//! This flow never fails the request. A missing key, an unusable search area,
//! a transport error or an unexpected payload each produce an empty list and a
//! log line.

pub mod handlers;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, warn};

const FIELD_MASK: &str =
    "places.displayName,places.formattedAddress,places.websiteUri,places.rating";
const UNKNOWN_COMPANY: &str = "Unknown Company";
const DEFAULT_RADIUS_M: f64 = 10_000.0;

fn default_radius() -> f64 {
    DEFAULT_RADIUS_M
}

#[derive(Debug, Error)]
pub enum PlacesError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Places API error (status {status}): {body}")]
    Api { status: u16, body: String },
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalOpportunitiesInput {
    pub career_name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Search radius in metres.
    #[serde(default = "default_radius")]
    pub radius: f64,
}

impl LocalOpportunitiesInput {
    /// Whether the query describes a search worth sending upstream.
    fn is_searchable(&self) -> bool {
        !self.career_name.trim().is_empty()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
            && self.radius.is_finite()
            && self.radius > 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opportunity {
    pub name: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocalOpportunitiesOutput {
    pub opportunities: Vec<Opportunity>,
}

#[derive(Debug, Deserialize)]
struct SearchTextResponse {
    #[serde(default)]
    places: Vec<Place>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Place {
    display_name: Option<LocalizedText>,
    formatted_address: Option<String>,
    website_uri: Option<String>,
    rating: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct LocalizedText {
    text: String,
}

impl From<Place> for Opportunity {
    fn from(place: Place) -> Self {
        Opportunity {
            name: place
                .display_name
                .map(|d| d.text)
                .unwrap_or_else(|| UNKNOWN_COMPANY.to_string()),
            address: place.formatted_address.unwrap_or_default(),
            rating: place.rating,
            website: place.website_uri,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct PlacesClient {
    client: Client,
    /// `None` disables the search entirely.
    api_key: Option<String>,
    endpoint: String,
}

impl PlacesClient {
    pub fn new(api_key: Option<String>, endpoint: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            endpoint,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    /// Searches for "<career> internships" around a point.
    pub async fn find_local_opportunities(
        &self,
        input: &LocalOpportunitiesInput,
    ) -> LocalOpportunitiesOutput {
        let Some(api_key) = self.api_key.as_deref() else {
            warn!("Places API key not configured; local opportunities disabled");
            return LocalOpportunitiesOutput::default();
        };
        if !input.is_searchable() {
            warn!(
                latitude = input.latitude,
                longitude = input.longitude,
                radius = input.radius,
                "Unusable local opportunities query; returning no results"
            );
            return LocalOpportunitiesOutput::default();
        }

        match self.search(api_key, input).await {
            Ok(opportunities) => {
                debug!(count = opportunities.len(), "Places search succeeded");
                LocalOpportunitiesOutput { opportunities }
            }
            Err(e) => {
                warn!(career = %input.career_name, "Places search failed: {e}");
                LocalOpportunitiesOutput::default()
            }
        }
    }

    async fn search(
        &self,
        api_key: &str,
        input: &LocalOpportunitiesInput,
    ) -> Result<Vec<Opportunity>, PlacesError> {
        let body = json!({
            "textQuery": format!("{} internships", input.career_name.trim()),
            "locationBias": {
                "circle": {
                    "center": {
                        "latitude": input.latitude,
                        "longitude": input.longitude,
                    },
                    "radius": input.radius,
                }
            }
        });

        let response = self
            .client
            .post(&self.endpoint)
            .header("X-Goog-Api-Key", api_key)
            .header("X-Goog-FieldMask", FIELD_MASK)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PlacesError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: SearchTextResponse = response.json().await?;
        Ok(parsed.places.into_iter().map(Opportunity::from).collect())
    }
}
