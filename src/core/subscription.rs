//! Subscription sync: turn payment-provider webhook events into plan changes.
//!
//! Events use the Stripe envelope (`type` + `data.object`) and the
//! `Stripe-Signature` header format `t=<unix>,v1=<hex>`.

use crate::db::ProfileStore;
use crate::errors::{AppError, AppResult};
use crate::models::{PlanType, SubscriptionUpdate};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use std::collections::HashMap;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: WebhookData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookData {
    pub object: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    pub client_reference_id: Option<String>,
    pub customer: Option<String>,
    pub subscription: Option<String>,
    pub customer_details: Option<CustomerDetails>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CustomerDetails {
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Subscription {
    pub id: Option<String>,
    pub customer: String,
    pub status: String,
}

/// Decoded intent of an event, before any profile lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum WebhookAction {
    CheckoutCompleted {
        client_reference_id: Option<String>,
        email: Option<String>,
        customer_id: Option<String>,
        subscription_id: Option<String>,
    },
    SubscriptionChanged {
        customer_id: String,
        subscription_id: Option<String>,
        status: String,
    },
    Ignored(String),
}

/// Result of handling one event.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    Applied { profile_id: i64, plan: PlanType },
    /// The event was valid but matched no profile.
    Unmatched,
    Ignored(String),
}

/// `hex(HMAC-SHA256(secret, "<timestamp>.<payload>"))`
pub fn compute_signature(secret: &str, timestamp: i64, payload: &str) -> AppResult<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| AppError::Webhook("invalid webhook secret".to_string()))?;
    mac.update(format!("{timestamp}.{payload}").as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Check the signature header against the payload.
/// `now` and `tolerance_secs` bound the accepted timestamp age.
pub fn verify_signature(
    payload: &str,
    header: &str,
    secret: &str,
    now: i64,
    tolerance_secs: i64,
) -> AppResult<()> {
    let parts: HashMap<&str, &str> = header
        .split(',')
        .filter_map(|part| part.trim().split_once('='))
        .collect();

    let timestamp = parts
        .get("t")
        .ok_or_else(|| AppError::Webhook("missing timestamp".to_string()))?;
    let received = parts
        .get("v1")
        .ok_or_else(|| AppError::Webhook("missing signature".to_string()))?;

    let timestamp: i64 = timestamp
        .parse()
        .map_err(|_| AppError::Webhook("invalid timestamp".to_string()))?;

    let mismatch = || AppError::Webhook("signature mismatch".to_string());
    let received = hex::decode(received).map_err(|_| mismatch())?;
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| AppError::Webhook("invalid webhook secret".to_string()))?;
    mac.update(format!("{timestamp}.{payload}").as_bytes());
    mac.verify_slice(&received).map_err(|_| mismatch())?;

    if (now - timestamp).abs() > tolerance_secs {
        return Err(AppError::Webhook("timestamp outside tolerance".to_string()));
    }

    Ok(())
}

pub fn parse_event(payload: &str) -> AppResult<WebhookEvent> {
    serde_json::from_str(payload)
        .map_err(|e| AppError::Webhook(format!("malformed event: {e}")))
}

pub fn decode_action(event: &WebhookEvent) -> AppResult<WebhookAction> {
    let object = event.data.object.clone();
    let malformed = |e: serde_json::Error| {
        AppError::Webhook(format!("malformed {} object: {e}", event.event_type))
    };

    match event.event_type.as_str() {
        "checkout.session.completed" => {
            let session: CheckoutSession = serde_json::from_value(object).map_err(malformed)?;
            Ok(WebhookAction::CheckoutCompleted {
                client_reference_id: session.client_reference_id,
                email: session.customer_details.and_then(|d| d.email),
                customer_id: session.customer,
                subscription_id: session.subscription,
            })
        }
        "customer.subscription.updated" | "customer.subscription.deleted" => {
            let sub: Subscription = serde_json::from_value(object).map_err(malformed)?;
            Ok(WebhookAction::SubscriptionChanged {
                customer_id: sub.customer,
                subscription_id: sub.id,
                status: sub.status,
            })
        }
        other => Ok(WebhookAction::Ignored(other.to_string())),
    }
}

fn resolve_checkout_target<S: ProfileStore>(
    store: &S,
    client_reference_id: Option<&str>,
    email: Option<&str>,
) -> AppResult<Option<i64>> {
    if let Some(reference) = client_reference_id.filter(|r| !r.trim().is_empty()) {
        return match reference.trim().parse::<i64>() {
            Ok(id) if store.profile_exists(id)? => Ok(Some(id)),
            _ => Ok(None),
        };
    }

    match email.filter(|e| !e.trim().is_empty()) {
        Some(email) => store.find_profile_by_email(email),
        None => Ok(None),
    }
}

/// Apply a decoded action to the matching profile, if any.
pub fn apply_action<S: ProfileStore>(store: &S, action: WebhookAction) -> AppResult<SyncOutcome> {
    let (target, update) = match action {
        WebhookAction::Ignored(kind) => {
            log::info!("unhandled webhook event type {kind}");
            return Ok(SyncOutcome::Ignored(kind));
        }
        WebhookAction::CheckoutCompleted {
            client_reference_id,
            email,
            customer_id,
            subscription_id,
        } => {
            let target =
                resolve_checkout_target(store, client_reference_id.as_deref(), email.as_deref())?;
            let status = "active".to_string();
            (
                target,
                SubscriptionUpdate {
                    stripe_customer_id: customer_id,
                    stripe_subscription_id: subscription_id,
                    plan: PlanType::from_subscription_status(&status),
                    subscription_status: status,
                },
            )
        }
        WebhookAction::SubscriptionChanged {
            customer_id,
            subscription_id,
            status,
        } => {
            let target = store.find_profile_by_customer(&customer_id)?;
            (
                target,
                SubscriptionUpdate {
                    stripe_customer_id: Some(customer_id),
                    stripe_subscription_id: subscription_id,
                    plan: PlanType::from_subscription_status(&status),
                    subscription_status: status,
                },
            )
        }
    };

    let Some(profile_id) = target else {
        log::warn!("webhook event matched no profile");
        return Ok(SyncOutcome::Unmatched);
    };

    store.apply_subscription(profile_id, &update)?;
    store.record(
        "plan",
        &format!("profile #{profile_id}"),
        &format!(
            "subscription {} → plan {}",
            update.subscription_status, update.plan
        ),
    );

    Ok(SyncOutcome::Applied {
        profile_id,
        plan: update.plan,
    })
}

/// Full pipeline: verify, parse, apply. Signature and secret are both required.
pub fn handle_webhook<S: ProfileStore>(
    store: &S,
    payload: &str,
    signature: Option<&str>,
    secret: Option<&str>,
    now: i64,
    tolerance_secs: i64,
) -> AppResult<SyncOutcome> {
    let (Some(signature), Some(secret)) = (signature, secret) else {
        return Err(AppError::Webhook(
            "missing signature or webhook secret".to_string(),
        ));
    };

    verify_signature(payload, signature, secret, now, tolerance_secs)?;
    let event = parse_event(payload)?;
    log::debug!(
        "webhook event {} ({})",
        event.event_type,
        event.id.as_deref().unwrap_or("no id")
    );
    apply_action(store, decode_action(&event)?)
}

/// Checkout link carrying the profile id and email, so the completed
/// checkout can be matched back to this profile.
pub fn checkout_link(base_url: &str, profile_id: i64, email: &str) -> String {
    let separator = if base_url.contains('?') { '&' } else { '?' };
    format!(
        "{base_url}{separator}client_reference_id={profile_id}&prefilled_email={}",
        urlencoding::encode(email.trim())
    )
}
