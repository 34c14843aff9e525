use crate::core::locale::Locale;
use crate::core::models::{
    OrderStatus, OrderStatusDetail, OrderSummary, ProcessingStep, OPTIONAL_ATTRIBUTE_KEYS,
};
use crate::core::settings::Settings;
use crate::providers::{FetchError, OrderApi, SetupError};
use async_trait::async_trait;
use reqwest::header::ACCEPT_LANGUAGE;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde_json::Value;

const ORDER_LIST_QUERY: [(&str, &str); 3] =
    [("limit", "1"), ("offset", "0"), ("include_ugc", "true")];

pub struct DeliverooClient {
    http: reqwest::Client,
    token: String,
    locale: Locale,
    orders_url: String,
    order_status_url: String,
}

impl DeliverooClient {
    pub fn new(settings: &Settings) -> Self {
        Self {
            http: reqwest::Client::new(),
            token: settings.token.clone(),
            locale: settings.locale,
            orders_url: settings.api.orders_url.clone(),
            order_status_url: settings.api.order_status_url.trim_end_matches('/').to_string(),
        }
    }

    fn get(&self, url: &str) -> RequestBuilder {
        self.http
            .get(url)
            .bearer_auth(&self.token)
            .header(ACCEPT_LANGUAGE, self.locale.language())
    }

    fn orders_request(&self) -> RequestBuilder {
        self.get(&self.orders_url).query(&ORDER_LIST_QUERY)
    }

    async fn read_json(response: Response) -> Result<Value, FetchError> {
        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::UnexpectedStatus(status));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// One-time check that the token is accepted by the order list endpoint.
    pub async fn check_credentials(&self) -> Result<(), SetupError> {
        let response = self
            .orders_request()
            .send()
            .await
            .map_err(SetupError::CannotConnect)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(SetupError::InvalidAuth(status));
        }
        Ok(())
    }
}

#[async_trait]
impl OrderApi for DeliverooClient {
    async fn fetch_orders(&self) -> Result<Vec<OrderSummary>, FetchError> {
        let response = self.orders_request().send().await?;
        let body = Self::read_json(response).await?;
        parse_orders(&body)
    }

    async fn fetch_order_status(&self, order_id: &str) -> Result<OrderStatusDetail, FetchError> {
        let url = format!("{}/{}", self.order_status_url, order_id);
        let response = self.get(&url).send().await?;
        let body = Self::read_json(response).await?;
        Ok(parse_order_status(&body))
    }
}

fn parse_orders(body: &Value) -> Result<Vec<OrderSummary>, FetchError> {
    let Some(orders) = body.get("orders").filter(|v| !v.is_null()) else {
        return Ok(Vec::new());
    };
    let orders = orders
        .as_array()
        .ok_or_else(|| FetchError::MalformedPayload("`orders` is not an array".to_string()))?;

    orders
        .iter()
        .map(|order| {
            let id = match order.get("id") {
                Some(Value::String(id)) => id.clone(),
                Some(Value::Number(id)) => id.to_string(),
                _ => {
                    return Err(FetchError::MalformedPayload(
                        "order is missing its `id`".to_string(),
                    ))
                }
            };
            let status = OrderStatus::from_api(order.get("status").and_then(Value::as_str));
            Ok(OrderSummary { id, status })
        })
        .collect()
}

/// Missing fields yield empty values, which the tracker turns into `UNKNOWN`
/// or an omitted attribute.
fn parse_order_status(body: &Value) -> OrderStatusDetail {
    let Some(attrs) = body
        .get("data")
        .and_then(|data| data.get("attributes"))
        .and_then(Value::as_object)
    else {
        tracing::debug!("Order status payload has no data.attributes");
        return OrderStatusDetail::default();
    };

    let processing_steps = attrs
        .get("processing_steps")
        .and_then(Value::as_array)
        .map(|steps| steps.iter().map(parse_step).collect())
        .unwrap_or_default();

    let optional_fields = OPTIONAL_ATTRIBUTE_KEYS
        .iter()
        .filter_map(|key| {
            attrs
                .get(*key)
                .and_then(attribute_text)
                .map(|value| (key.to_string(), value))
        })
        .collect();

    OrderStatusDetail {
        ui_status: attrs
            .get("ui_status")
            .and_then(Value::as_str)
            .map(str::to_string),
        processing_steps,
        advisory: attrs
            .get("advisory")
            .and_then(Value::as_str)
            .map(str::to_string),
        optional_fields,
    }
}

fn parse_step(step: &Value) -> ProcessingStep {
    ProcessingStep {
        title: step
            .get("title")
            .and_then(Value::as_str)
            .map(str::to_string),
        is_current: step
            .get("is_current")
            .and_then(Value::as_bool)
            .unwrap_or(false),
    }
}

fn attribute_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
