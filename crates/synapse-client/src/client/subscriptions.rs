/*
[INPUT]:  Webhook URLs, scopes and subscription options
[OUTPUT]: Subscription wrappers and listings
[POS]:    Client layer - webhook subscription endpoints
[UPDATE]: When subscription options change
*/

use tracing::debug;

use crate::client::SynapseClient;
use crate::http::{ApiPath, NO_QUERY, Result};
use crate::resources::{Collection, Resource, Subscription, Subscriptions, update_subscription};
use crate::types::{CreateSubscriptionRequest, ListQuery, UpdateSubscriptionOptions};

impl SynapseClient {
    /// POST /subscriptions with body `{url, scope}`
    pub async fn create_subscription(
        &self,
        webhook_url: &str,
        scope: &[String],
    ) -> Result<Subscription> {
        debug!(webhook_url, "creating a new subscription");
        let body = CreateSubscriptionRequest {
            url: webhook_url.to_string(),
            scope: scope.to_vec(),
        };
        let value = self.http.post(ApiPath::Subscriptions.as_str(), &body).await?;
        Subscription::from_value(value, self.http.clone())
    }

    /// GET /subscriptions/{subscription_id}
    pub async fn get_subscription(&self, sub_id: &str) -> Result<Subscription> {
        debug!(sub_id, "getting a subscription");
        let path = ApiPath::Subscriptions.with_id(sub_id);
        let value = self.http.get(&path, NO_QUERY).await?;
        Subscription::from_value(value, self.http.clone())
    }

    /// GET /subscriptions
    pub async fn get_all_subs(&self, query: &ListQuery) -> Result<Subscriptions> {
        debug!(?query, "getting all subscriptions");
        Collection::fetch(&self.http, ApiPath::Subscriptions.as_str(), query).await
    }

    /// PATCH /subscriptions/{subscription_id}
    ///
    /// Only `is_active`, `url` and `scope` can be sent; unset options are omitted.
    pub async fn update_subscription(
        &self,
        sub_id: &str,
        options: &UpdateSubscriptionOptions,
    ) -> Result<Subscription> {
        debug!(sub_id, "updating subscription");
        update_subscription(&self.http, sub_id, options).await
    }
}
