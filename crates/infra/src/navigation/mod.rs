//! Hand-off to an external maps application.
//!
//! Two links are built for the same destination: a native deep link and a web
//! fallback. The native link is used only when the platform says it can be
//! handled; every other outcome (unsupported, probe error, open error) lands
//! on the web link.

pub mod system;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use savemyspot_spots::Coordinates;

pub use system::SystemUrlOpener;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("failed to query URL handler for {url}: {reason}")]
    Probe { url: String, reason: String },

    #[error("failed to open {url}: {reason}")]
    Open { url: String, reason: String },
}

/// Platform URL handling.
#[async_trait]
pub trait UrlOpener: Send + Sync {
    /// Whether some installed application handles `url`.
    async fn can_open(&self, url: &str) -> Result<bool, LaunchError>;

    async fn open(&self, url: &str) -> Result<(), LaunchError>;
}

#[async_trait]
impl<O> UrlOpener for Arc<O>
where
    O: UrlOpener + ?Sized,
{
    async fn can_open(&self, url: &str) -> Result<bool, LaunchError> {
        (**self).can_open(url).await
    }

    async fn open(&self, url: &str) -> Result<(), LaunchError> {
        (**self).open(url).await
    }
}

/// Driving-directions links to one destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationLinks {
    pub app_url: String,
    pub web_url: String,
}

impl NavigationLinks {
    pub fn driving_to(destination: Coordinates) -> Self {
        let lat_lng = destination.as_query_value();
        Self {
            app_url: format!("comgooglemaps://?daddr={lat_lng}&directionsmode=driving"),
            web_url: format!(
                "https://www.google.com/maps/dir/?api=1&destination={lat_lng}&travelmode=driving"
            ),
        }
    }
}

/// Which link ended up being opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationTarget {
    NativeApp,
    Web,
    /// Even the web link could not be opened.
    Unavailable,
}

/// Open driving directions to `destination`. Never fails; the outcome says
/// which link was used.
pub async fn open_navigation<O>(opener: &O, destination: Coordinates) -> NavigationTarget
where
    O: UrlOpener + ?Sized,
{
    let links = NavigationLinks::driving_to(destination);

    let supported = match opener.can_open(&links.app_url).await {
        Ok(supported) => supported,
        Err(err) => {
            tracing::warn!(error = %err, "maps app probe failed, using web link");
            false
        }
    };

    if supported {
        match opener.open(&links.app_url).await {
            Ok(()) => return NavigationTarget::NativeApp,
            Err(err) => tracing::warn!(error = %err, "maps app refused link, using web link"),
        }
    }

    match opener.open(&links.web_url).await {
        Ok(()) => NavigationTarget::Web,
        Err(err) => {
            tracing::error!(error = %err, "could not open web directions");
            NavigationTarget::Unavailable
        }
    }
}
