use serde_json::json;

use crate::operations::{DO_DEVICE_LOGIN, DO_DEVICE_LOGOUT, DO_DEVICE_RESET};
use crate::{AxlClient, AxlResponse, AxlResult};

/// Provides device-level actions: resets and Extension Mobility login and
/// logout.
#[derive(Debug, Clone)]
pub struct DeviceHandler {
    client: AxlClient,
}

impl DeviceHandler {
    pub(crate) fn new(client: AxlClient) -> Self {
        Self { client }
    }

    /// Resets any device by name.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use axl_client::AxlClient;
    /// # async fn example(client: &AxlClient) -> Result<(), axl_client::AxlError> {
    /// client
    ///     .devices()
    ///     .reset("SEP001122334455")
    ///     .hard()
    ///     .send()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn reset(&self, device_name: impl Into<String>) -> DeviceResetBuilder {
        DeviceResetBuilder {
            client: self.client.clone(),
            device_name: device_name.into(),
            hard: false,
            mgcp: false,
            reset_type: ResetType::Reset,
        }
    }

    /// Logs `user_id` into `device_name` with the given device profile.
    pub fn login(
        &self,
        device_name: impl Into<String>,
        user_id: impl Into<String>,
        profile_name: impl Into<String>,
    ) -> DeviceLoginBuilder {
        DeviceLoginBuilder {
            client: self.client.clone(),
            device_name: device_name.into(),
            user_id: user_id.into(),
            profile_name: profile_name.into(),
            duration_minutes: None,
        }
    }

    /// Logs the current user out of `device_name`.
    pub async fn logout(&self, device_name: impl Into<String>) -> AxlResult<AxlResponse> {
        let args = json!({ "deviceName": device_name.into() });
        self.client.execute(&DO_DEVICE_LOGOUT, args).await
    }
}

/// Whether a reset reboots the device or only reloads its configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetType {
    Reset,
    Restart,
}

impl ResetType {
    fn as_str(self) -> &'static str {
        match self {
            ResetType::Reset => "Reset",
            ResetType::Restart => "Restart",
        }
    }
}

#[derive(Debug, Clone)]
pub struct DeviceResetBuilder {
    client: AxlClient,
    device_name: String,
    hard: bool,
    mgcp: bool,
    reset_type: ResetType,
}

impl DeviceResetBuilder {
    /// Power-cycle style reset.
    pub fn hard(mut self) -> Self {
        self.hard = true;
        self
    }

    /// The device is an MGCP gateway.
    pub fn mgcp(mut self) -> Self {
        self.mgcp = true;
        self
    }

    pub fn reset_type(mut self, reset_type: ResetType) -> Self {
        self.reset_type = reset_type;
        self
    }

    /// Sends the request.
    pub async fn send(self) -> AxlResult<AxlResponse> {
        let args = json!({
            "deviceName": self.device_name,
            "isHardReset": self.hard,
            "isMGCP": self.mgcp,
            "deviceResetType": self.reset_type.as_str(),
        });
        self.client.execute(&DO_DEVICE_RESET, args).await
    }
}

#[derive(Debug, Clone)]
pub struct DeviceLoginBuilder {
    client: AxlClient,
    device_name: String,
    user_id: String,
    profile_name: String,
    duration_minutes: Option<u32>,
}

impl DeviceLoginBuilder {
    /// Log the user out automatically after `minutes`. Without it the login
    /// does not expire.
    pub fn duration_minutes(mut self, minutes: u32) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }

    /// Sends the request.
    pub async fn send(self) -> AxlResult<AxlResponse> {
        let args = json!({
            "deviceName": self.device_name,
            "loginDuration": self.duration_minutes.unwrap_or(0).to_string(),
            "profileName": self.profile_name,
            "userId": self.user_id,
        });
        self.client.execute(&DO_DEVICE_LOGIN, args).await
    }
}
