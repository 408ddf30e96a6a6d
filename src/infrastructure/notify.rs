use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Payload mirrored to the business-partner server when a business account
/// registers. Carries the stored hash, not the cleartext password.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessRegistration {
    pub email: String,
    pub password: String,
    pub country: Option<String>,
    pub business_name: Option<String>,
    pub business_description: Option<String>,
}

/// Fire-and-forget client for the external business-registration collaborator.
/// Delivery failures are logged and never surfaced to the registering caller.
pub struct BusinessNotifier {
    client: Client,
    endpoint: String,
}

impl BusinessNotifier {
    pub fn new(base_url: &str) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            endpoint: format!("{}/register-business", base_url.trim_end_matches('/')),
        }
    }

    /// Dispatches the notification on a detached task. The caller's response
    /// never waits on, or learns the outcome of, this call.
    pub fn notify_registration(&self, registration: BusinessRegistration) {
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        tokio::spawn(async move {
            debug!(endpoint = %endpoint, email = %registration.email, "Syncing business registration");
            match client.post(&endpoint).json(&registration).send().await {
                Ok(response) if response.status().is_success() => {
                    debug!(email = %registration.email, "Business registration synced");
                }
                Ok(response) => {
                    error!(
                        email = %registration.email,
                        status = %response.status(),
                        "Business server rejected registration sync"
                    );
                }
                Err(err) => {
                    error!(email = %registration.email, error = %err, "Error syncing with business server");
                }
            }
        });
    }
}
