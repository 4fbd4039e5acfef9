use std::net::SocketAddr;

use serde::Deserialize;

use common::config::Validate;

pub const DEFAULT_CONFIG_PATH: &str = "tictactoe_server.yaml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub client_channel_capacity: usize,
    pub intent_channel_capacity: usize,
    /// Derive the acting symbol from the connection's seat instead of
    /// trusting the symbol the client sends.
    pub enforce_symbol_binding: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            client_channel_capacity: 128,
            intent_channel_capacity: 1024,
            enforce_symbol_binding: false,
        }
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("host must not be empty".to_string());
        }
        if self.port == 0 {
            return Err("port must be between 1 and 65535".to_string());
        }
        if self.client_channel_capacity == 0 {
            return Err("client_channel_capacity must be positive".to_string());
        }
        if self.intent_channel_capacity == 0 {
            return Err("intent_channel_capacity must be positive".to_string());
        }
        Ok(())
    }
}

impl ServerConfig {
    /// Command-line values win over whatever the file provided.
    pub fn with_overrides(
        mut self,
        host: Option<String>,
        port: Option<u16>,
        enforce_symbol_binding: bool,
    ) -> Result<Self, String> {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self.enforce_symbol_binding |= enforce_symbol_binding;
        self.validate()?;
        Ok(self)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| format!("Invalid listen address {}:{}: {}", self.host, self.port, e))
    }
}
