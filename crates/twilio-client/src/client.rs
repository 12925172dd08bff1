//! Twilio REST API HTTP client.

use crate::error::TwilioError;
use crate::types::{Application, IncomingPhoneNumber, IncomingPhoneNumberPage, VoiceMethod};
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::instrument;

const DEFAULT_BASE_URL: &str = "https://api.twilio.com/2010-04-01";

/// Twilio REST API client authenticated with an API key.
///
/// The key secret is stored as a `SecretString` to keep it out of logs and
/// debug output.
#[derive(Clone)]
pub struct TwilioClient {
    client: Client,
    base_url: String,
    account_sid: String,
    api_key_sid: String,
    api_key_secret: SecretString,
}

impl TwilioClient {
    /// Create a client against the production Twilio API.
    pub fn new(
        account_sid: impl Into<String>,
        api_key_sid: impl Into<String>,
        api_key_secret: impl Into<String>,
    ) -> Result<Self, TwilioError> {
        Self::with_base_url(DEFAULT_BASE_URL, account_sid, api_key_sid, api_key_secret)
    }

    /// Create a client against a custom base URL.
    pub fn with_base_url(
        base_url: impl Into<String>,
        account_sid: impl Into<String>,
        api_key_sid: impl Into<String>,
        api_key_secret: impl Into<String>,
    ) -> Result<Self, TwilioError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            account_sid: account_sid.into(),
            api_key_sid: api_key_sid.into(),
            api_key_secret: SecretString::new(api_key_secret.into()),
        })
    }

    /// Look up the incoming phone number resource for a literal phone number.
    #[instrument(skip(self))]
    pub async fn find_incoming_phone_number(
        &self,
        phone_number: &str,
    ) -> Result<IncomingPhoneNumber, TwilioError> {
        let response = self
            .client
            .get(format!(
                "{}/Accounts/{}/IncomingPhoneNumbers.json",
                self.base_url, self.account_sid
            ))
            .query(&[("PhoneNumber", phone_number), ("PageSize", "1")])
            .basic_auth(&self.api_key_sid, Some(self.api_key_secret.expose_secret()))
            .send()
            .await?;

        let page: IncomingPhoneNumberPage = self.parse(response).await?;
        page.incoming_phone_numbers
            .into_iter()
            .next()
            .ok_or_else(|| TwilioError::PhoneNumberNotFound(phone_number.to_string()))
    }

    /// Point an incoming phone number's voice callback at `voice_url`.
    #[instrument(skip(self))]
    pub async fn update_incoming_phone_number(
        &self,
        sid: &str,
        voice_url: &str,
        voice_method: VoiceMethod,
    ) -> Result<IncomingPhoneNumber, TwilioError> {
        let response = self
            .client
            .post(format!(
                "{}/Accounts/{}/IncomingPhoneNumbers/{}.json",
                self.base_url, self.account_sid, sid
            ))
            .basic_auth(&self.api_key_sid, Some(self.api_key_secret.expose_secret()))
            .form(&[
                ("VoiceUrl", voice_url),
                ("VoiceMethod", voice_method.as_str()),
            ])
            .send()
            .await?;

        self.parse(response).await
    }

    /// Point a TwiML application's voice callback at `voice_url`.
    #[instrument(skip(self))]
    pub async fn update_application(
        &self,
        sid: &str,
        voice_url: &str,
        voice_method: VoiceMethod,
    ) -> Result<Application, TwilioError> {
        let response = self
            .client
            .post(format!(
                "{}/Accounts/{}/Applications/{}.json",
                self.base_url, self.account_sid, sid
            ))
            .basic_auth(&self.api_key_sid, Some(self.api_key_secret.expose_secret()))
            .form(&[
                ("VoiceUrl", voice_url),
                ("VoiceMethod", voice_method.as_str()),
            ])
            .send()
            .await?;

        self.parse(response).await
    }

    async fn parse<T: DeserializeOwned>(&self, response: Response) -> Result<T, TwilioError> {
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(TwilioError::Api { status, message });
        }

        Ok(response.json().await?)
    }
}
