use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use crate::{AgentError, BrickRequest, PickOutcome};

/// Cart type used when the catalog entry carries no delivery channel.
const DEFAULT_CART_TYPE: &str = "pab";

const ELEMENT_QUERY: &str = "query PickABrickQuery($query: String, $page: Int!, $perPage: Int!, $sort: SortInput, $includeOutOfStock: Boolean) { elements(query: $query, page: $page, perPage: $perPage, includeOutOfStock: $includeOutOfStock, sort: $sort) { results { id ... on SingleVariantElement { variant { id attributes { deliveryChannel } } } } } }";

const ADD_TO_CART_MUTATION: &str = "mutation AddToElementCart($items: [ElementInput!]!, $cartType: CartType) { addToElementCart(input: {items: $items, cartType: $cartType}) { ... on BrickCart { id } } }";

/// Connection settings for the shop GraphQL endpoint.
#[derive(Debug, Clone)]
pub struct ShopSettings {
    /// Base URL of the shop, e.g. `https://www.lego.com`.
    pub base_url: String,
    /// Value for the `authorization` header: the page session's GraphQL
    /// auth cookie. Session acquisition is outside this crate.
    pub auth_token: Option<String>,
    /// Locale sent in the lookup request body. The page protocol sends a
    /// fixed value here that differs from the `x-locale` header; kept
    /// configurable until that discrepancy is resolved upstream.
    pub lookup_locale: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ShopSettings {
    fn default() -> Self {
        Self {
            base_url: "https://www.lego.com".to_string(),
            auth_token: None,
            lookup_locale: "nl-nl".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GraphResponse<T> {
    data: Option<T>,
    errors: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct ElementQueryData {
    elements: ElementList,
}

#[derive(Debug, Deserialize)]
struct ElementList {
    results: Vec<ElementHit>,
}

#[derive(Debug, Deserialize)]
struct ElementHit {
    variant: Option<ElementVariant>,
}

#[derive(Debug, Deserialize)]
struct ElementVariant {
    attributes: VariantAttributes,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VariantAttributes {
    delivery_channel: Option<String>,
}

enum Lookup {
    CartType(String),
    NotFound,
    Failed,
}

#[async_trait::async_trait]
pub trait PageAgent: Send + Sync {
    /// Produces exactly one outcome per request; never retries internally.
    /// All retry and fallback logic lives in the orchestrator.
    async fn pick(&self, brick: &BrickRequest) -> PickOutcome;
}

#[derive(Debug, Clone)]
pub struct ReqwestPageAgent {
    client: reqwest::Client,
    settings: ShopSettings,
}

impl ReqwestPageAgent {
    pub fn new(settings: ShopSettings) -> Result<Self, AgentError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| AgentError::Transport(err.to_string()))?;
        Ok(Self { client, settings })
    }

    fn operation_url(&self, operation: &str) -> String {
        format!(
            "{}/api/graphql/{operation}",
            self.settings.base_url.trim_end_matches('/')
        )
    }

    async fn post_graphql<T: DeserializeOwned>(
        &self,
        operation: &str,
        locale: &str,
        body: serde_json::Value,
    ) -> Result<GraphResponse<T>, AgentError> {
        let mut request = self
            .client
            .post(self.operation_url(operation))
            .header("x-locale", locale)
            .header(ACCEPT, "application/json")
            .json(&body);
        if let Some(token) = &self.settings.auth_token {
            request = request.header(AUTHORIZATION, token);
        }

        let response = request
            .send()
            .await
            .map_err(|err| AgentError::Transport(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(AgentError::HttpStatus(status.as_u16()));
        }
        response
            .json::<GraphResponse<T>>()
            .await
            .map_err(|err| AgentError::Malformed(err.to_string()))
    }

    async fn lookup_element(&self, brick: &BrickRequest, element_id: &str) -> Lookup {
        let body = json!({
            "operationName": "PickABrickQuery",
            "variables": {
                "page": 1,
                "perPage": 20,
                "includeOutOfStock": false,
                "sort": { "key": "RELEVANCE", "direction": "ASC" },
                "query": element_id,
                "locale": self.settings.lookup_locale,
            },
            "query": ELEMENT_QUERY,
        });

        match self
            .post_graphql::<ElementQueryData>("PickABrickQuery", &brick.locale, body)
            .await
        {
            Ok(response) => match response.data {
                Some(data) => match data.elements.results.first() {
                    Some(hit) => {
                        let cart_type = hit
                            .variant
                            .as_ref()
                            .and_then(|variant| variant.attributes.delivery_channel.clone())
                            .unwrap_or_else(|| DEFAULT_CART_TYPE.to_string());
                        Lookup::CartType(cart_type)
                    }
                    None => {
                        log::debug!("element {element_id} not listed in the shop catalog");
                        Lookup::NotFound
                    }
                },
                None => {
                    log::debug!("lookup for element {element_id} returned no data");
                    Lookup::Failed
                }
            },
            Err(err) => {
                log::warn!("element lookup failed for {element_id}: {err}");
                Lookup::Failed
            }
        }
    }

    async fn add_to_cart(&self, brick: &BrickRequest, element_id: &str, cart_type: &str) -> bool {
        let body = json!({
            "operationName": "AddToElementCart",
            "variables": {
                "items": [{ "sku": element_id, "quantity": brick.requested_quantity }],
                "cartType": cart_type,
            },
            "query": ADD_TO_CART_MUTATION,
        });

        match self
            .post_graphql::<serde_json::Value>("AddToElementCart", &brick.locale, body)
            .await
        {
            Ok(response) => {
                if response.errors.as_ref().is_some_and(|errors| !errors.is_empty()) {
                    log::debug!("cart rejected element {element_id} with cart type {cart_type}");
                    false
                } else {
                    true
                }
            }
            Err(err) => {
                log::warn!("add-to-cart failed for element {element_id}: {err}");
                false
            }
        }
    }
}

#[async_trait::async_trait]
impl PageAgent for ReqwestPageAgent {
    async fn pick(&self, brick: &BrickRequest) -> PickOutcome {
        let Some(element_id) = brick.element_id.clone() else {
            log::warn!(
                "pick request without a resolved element id for part {}",
                brick.part_number
            );
            return PickOutcome::failed(brick.clone());
        };

        let cart_type = match self.lookup_element(brick, &element_id).await {
            Lookup::CartType(cart_type) => cart_type,
            Lookup::NotFound => return PickOutcome::not_found(brick.clone()),
            Lookup::Failed => return PickOutcome::failed(brick.clone()),
        };

        if self.add_to_cart(brick, &element_id, &cart_type).await {
            PickOutcome::added(brick.clone())
        } else {
            PickOutcome::failed(brick.clone())
        }
    }
}
