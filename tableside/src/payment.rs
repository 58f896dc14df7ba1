//! Card payment integration
//!
//! Builds the request the card widget consumes and forwards the
//! capture payload to the backend. Capture happens before order
//! placement; a failed capture means no order is sent.

use serde::Serialize;

use shared::models::PaymentCapture;
use shared::money;
use tably_client::{ClientResult, HttpClient};

const API_VERSION: u32 = 2;
const API_VERSION_MINOR: u32 = 0;
const GATEWAY: &str = "stripe";
const GATEWAY_VERSION: &str = "2018-10-31";
const GATEWAY_PUBLISHABLE_KEY: &str = "pk_test_TYooMQauvdEDq54NiTphI7jx";
const MERCHANT_NAME: &str = "Tably Demo Merchant";
const CURRENCY_CODE: &str = "INR";
const COUNTRY_CODE: &str = "IN";

/// Request handed to the card widget
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPaymentRequest {
    pub api_version: u32,
    pub api_version_minor: u32,
    pub allowed_payment_methods: Vec<CardMethodSpec>,
    pub merchant_info: MerchantInfo,
    pub transaction_info: TransactionInfo,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardMethodSpec {
    #[serde(rename = "type")]
    pub method_type: &'static str,
    pub parameters: CardParameters,
    pub tokenization_specification: TokenizationSpec,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardParameters {
    pub allowed_auth_methods: Vec<&'static str>,
    pub allowed_card_networks: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenizationSpec {
    #[serde(rename = "type")]
    pub spec_type: &'static str,
    pub parameters: GatewayParameters,
}

/// Gateway fields use the widget's vendor-prefixed key names
#[derive(Debug, Clone, Serialize)]
pub struct GatewayParameters {
    pub gateway: &'static str,
    #[serde(rename = "stripe:version")]
    pub gateway_version: &'static str,
    #[serde(rename = "stripe:publishableKey")]
    pub publishable_key: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantInfo {
    pub merchant_name: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInfo {
    pub total_price_status: &'static str,
    /// Two-decimal string, the format the widget expects
    pub total_price: String,
    pub currency_code: &'static str,
    pub country_code: &'static str,
}

/// Build the widget request for a checkout total
pub fn card_payment_request(total_cents: i64) -> CardPaymentRequest {
    CardPaymentRequest {
        api_version: API_VERSION,
        api_version_minor: API_VERSION_MINOR,
        allowed_payment_methods: vec![CardMethodSpec {
            method_type: "CARD",
            parameters: CardParameters {
                allowed_auth_methods: vec!["PAN_ONLY", "CRYPTOGRAM_3DS"],
                allowed_card_networks: vec!["MASTERCARD", "VISA"],
            },
            tokenization_specification: TokenizationSpec {
                spec_type: "PAYMENT_GATEWAY",
                parameters: GatewayParameters {
                    gateway: GATEWAY,
                    gateway_version: GATEWAY_VERSION,
                    publishable_key: GATEWAY_PUBLISHABLE_KEY,
                },
            },
        }],
        merchant_info: MerchantInfo {
            merchant_name: MERCHANT_NAME,
        },
        transaction_info: TransactionInfo {
            total_price_status: "FINAL",
            total_price: format!("{:.2}", money::to_amount(total_cents)),
            currency_code: CURRENCY_CODE,
            country_code: COUNTRY_CODE,
        },
    }
}

/// Capture payload built from the widget result
pub fn capture_from_token(token: &str, total_cents: i64) -> PaymentCapture {
    PaymentCapture {
        payment_data: serde_json::json!({
            "paymentMethodData": {
                "tokenizationData": {
                    "type": "PAYMENT_GATEWAY",
                    "token": token,
                }
            }
        }),
        amount: money::to_amount(total_cents),
    }
}

/// Forward a capture to the backend ahead of order placement
pub async fn capture_card_payment(
    client: &HttpClient,
    capture: &PaymentCapture,
) -> ClientResult<()> {
    client.process_payment(capture).await?;
    tracing::info!(amount = capture.amount, "Card payment captured");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widget_request_shape() {
        let request = card_payment_request(2825);
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["apiVersion"], 2);
        assert_eq!(json["apiVersionMinor"], 0);
        let method = &json["allowedPaymentMethods"][0];
        assert_eq!(method["type"], "CARD");
        assert_eq!(method["parameters"]["allowedAuthMethods"][0], "PAN_ONLY");
        assert_eq!(method["parameters"]["allowedCardNetworks"][1], "VISA");
        let spec = &method["tokenizationSpecification"];
        assert_eq!(spec["type"], "PAYMENT_GATEWAY");
        assert_eq!(spec["parameters"]["gateway"], "stripe");
        assert!(spec["parameters"]["stripe:publishableKey"]
            .as_str()
            .unwrap()
            .starts_with("pk_test_"));
        assert_eq!(json["transactionInfo"]["totalPriceStatus"], "FINAL");
        assert_eq!(json["transactionInfo"]["totalPrice"], "28.25");
    }

    #[test]
    fn test_total_price_is_always_two_decimals() {
        let request = card_payment_request(1000);
        assert_eq!(request.transaction_info.total_price, "10.00");
    }

    #[test]
    fn test_capture_payload() {
        let capture = capture_from_token("tok_visa", 2825);
        assert_eq!(capture.amount, 28.25);
        let json = serde_json::to_value(&capture).unwrap();
        assert_eq!(
            json["paymentData"]["paymentMethodData"]["tokenizationData"]["token"],
            "tok_visa"
        );
    }
}
