use async_trait::async_trait;

use super::{LaunchError, UrlOpener};

/// Opens URLs with the operating system's default handler.
///
/// Desktop platforms cannot be asked whether a custom scheme is registered,
/// so `can_open` answers from an allow-list: `http`/`https` always, plus the
/// configured native schemes.
#[derive(Debug, Clone, Default)]
pub struct SystemUrlOpener {
    native_schemes: Vec<String>,
}

impl SystemUrlOpener {
    pub fn new<I, S>(native_schemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            native_schemes: native_schemes
                .into_iter()
                .map(|s| s.into().to_ascii_lowercase())
                .collect(),
        }
    }

    fn handles(&self, url: &str) -> bool {
        let Some((scheme, _)) = url.split_once(':') else {
            return false;
        };
        let scheme = scheme.to_ascii_lowercase();
        scheme == "http" || scheme == "https" || self.native_schemes.contains(&scheme)
    }
}

#[async_trait]
impl UrlOpener for SystemUrlOpener {
    async fn can_open(&self, url: &str) -> Result<bool, LaunchError> {
        Ok(self.handles(url))
    }

    async fn open(&self, url: &str) -> Result<(), LaunchError> {
        let target = url.to_string();
        tokio::task::spawn_blocking(move || open::that(&target))
            .await
            .map_err(|e| LaunchError::Open {
                url: url.to_string(),
                reason: e.to_string(),
            })?
            .map_err(|e| LaunchError::Open {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        tracing::info!(url, "opened external link");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn web_links_are_always_handled() {
        let opener = SystemUrlOpener::default();
        assert!(opener.can_open("https://www.google.com/maps").await.unwrap());
        assert!(!opener.can_open("comgooglemaps://?daddr=1,2").await.unwrap());
    }

    #[tokio::test]
    async fn configured_schemes_are_handled_case_insensitively() {
        let opener = SystemUrlOpener::new(["ComGoogleMaps"]);
        assert!(opener.can_open("comgooglemaps://?daddr=1,2").await.unwrap());
        assert!(!opener.can_open("no-scheme-here").await.unwrap());
    }
}
