use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HubConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub rewards: RewardConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub db_path: String,
    pub log_level: String,
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string()]
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AuthConfig {
    /// HMAC signing secret for bearer tokens. Empty means a random secret is
    /// generated at startup, so issued tokens do not survive a restart.
    #[serde(default)]
    pub token_secret: String,
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: u64,
}

fn default_token_ttl_hours() -> u64 {
    2
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RewardConfig {
    #[serde(default = "default_starting_balance")]
    pub starting_balance: u64,
    #[serde(default = "default_daily_reward")]
    pub daily_reward: u64,
    #[serde(default = "default_claim_interval_hours")]
    pub claim_interval_hours: u64,
    #[serde(default = "default_vote_cost")]
    pub vote_cost: u64,
}

fn default_starting_balance() -> u64 {
    100
}

fn default_daily_reward() -> u64 {
    10
}

fn default_claim_interval_hours() -> u64 {
    24
}

fn default_vote_cost() -> u64 {
    10
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                port: 5000,
                db_path: "./data/hub".to_string(),
                log_level: "info".to_string(),
                allowed_origins: default_allowed_origins(),
            },
            auth: AuthConfig {
                token_secret: String::new(),
                token_ttl_hours: default_token_ttl_hours(),
            },
            rewards: RewardConfig {
                starting_balance: default_starting_balance(),
                daily_reward: default_daily_reward(),
                claim_interval_hours: default_claim_interval_hours(),
                vote_cost: default_vote_cost(),
            },
        }
    }
}

impl HubConfig {
    pub fn load_or_default(path: &str) -> Self {
        if std::path::Path::new(path).exists() {
            match std::fs::read_to_string(path) {
                Ok(s) => match toml::from_str(&s) {
                    Ok(c) => {
                        println!("Config loaded from {}", path);
                        c
                    }
                    Err(e) => {
                        eprintln!("Error parsing config: {}. Using Defaults.", e);
                        Self::default()
                    }
                },
                Err(e) => {
                    eprintln!("Error reading config: {}. Using Defaults.", e);
                    Self::default()
                }
            }
        } else {
            println!("Config file not found at '{}'. Creating default.", path);
            let config = Self::default();
            if let Ok(s) = toml::to_string_pretty(&config) {
                let _ = std::fs::write(path, s);
            }
            config
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_fall_back_to_defaults() {
        let config: HubConfig = toml::from_str(
            r#"
            [server]
            port = 8080
            db_path = "/tmp/hub"
            log_level = "debug"

            [auth]

            [rewards]
            daily_reward = 25
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(
            config.server.allowed_origins,
            vec!["http://localhost:3000".to_string()]
        );
        assert!(config.auth.token_secret.is_empty());
        assert_eq!(config.auth.token_ttl_hours, 2);
        assert_eq!(config.rewards.daily_reward, 25);
        assert_eq!(config.rewards.starting_balance, 100);
        assert_eq!(config.rewards.claim_interval_hours, 24);
        assert_eq!(config.rewards.vote_cost, 10);
    }

    #[test]
    fn default_roundtrips_through_toml() {
        let config = HubConfig::default();
        let encoded = toml::to_string_pretty(&config).unwrap();
        let decoded: HubConfig = toml::from_str(&encoded).unwrap();
        assert_eq!(decoded.server.port, 5000);
        assert_eq!(decoded.rewards.vote_cost, 10);
    }
}
