/*
[INPUT]:  Subscription records and the transport
[OUTPUT]: Subscription accessors and whitelisted updates
[POS]:    Resource layer - webhook subscription wrapper
[UPDATE]: When subscription fields change
*/

use serde_json::{Map, Value};

use crate::http::{ApiPath, HttpClient, Result};
use crate::types::{SubscriptionData, UpdateSubscriptionOptions};

use super::Resource;

#[derive(Debug, Clone)]
pub struct Subscription {
    data: SubscriptionData,
    http: HttpClient,
}

impl Resource for Subscription {
    type Data = SubscriptionData;

    fn from_data(data: SubscriptionData, http: HttpClient) -> Self {
        Self { data, http }
    }
}

impl Subscription {
    pub fn id(&self) -> &str {
        &self.data.id
    }

    pub fn url(&self) -> &str {
        &self.data.url
    }

    pub fn scope(&self) -> &[String] {
        &self.data.scope
    }

    pub fn is_active(&self) -> Option<bool> {
        self.data.is_active
    }

    pub fn other(&self) -> &Map<String, Value> {
        &self.data.other
    }

    pub fn data(&self) -> &SubscriptionData {
        &self.data
    }

    /// PATCH /subscriptions/{subscription_id}
    pub async fn update(&self, options: &UpdateSubscriptionOptions) -> Result<Subscription> {
        update(&self.http, &self.data.id, options).await
    }
}

/// Shared by the facade and the wrapper; only recognized keys are ever sent
pub(crate) async fn update(
    http: &HttpClient,
    sub_id: &str,
    options: &UpdateSubscriptionOptions,
) -> Result<Subscription> {
    let path = ApiPath::Subscriptions.with_id(sub_id);
    let value = http.patch(&path, options).await?;
    Subscription::from_value(value, http.clone())
}
