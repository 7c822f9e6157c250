//! Tests for configuration

#[cfg(test)]
mod tests {
    use super::super::config::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_strategy_config_default() {
        let config = StrategyConfig::default();
        assert_eq!(config.min_ev, dec!(0.01));
        assert_eq!(config.max_ev, dec!(1.0));
        assert_eq!(config.scan_interval_mins, 3);
    }

    #[test]
    fn test_strategy_config_deserialize() {
        let toml_str = r#"
min_ev = 0.04
max_ev = 0.5
scan_interval_mins = 10
"#;
        let config: StrategyConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.min_ev, dec!(0.04));
        assert_eq!(config.max_ev, dec!(0.5));
        assert_eq!(config.scan_interval_mins, 10);
    }

    #[test]
    fn test_strategy_config_partial_deserialize() {
        let config: StrategyConfig = toml::from_str("min_ev = 0.0").unwrap();
        assert_eq!(config.min_ev, dec!(0.0));
        assert_eq!(config.scan_interval_mins, 3); // defaults kept
    }

    #[test]
    fn test_database_config_default() {
        let config = DatabaseConfig::default();
        assert_eq!(config.path, "data/sent.db");
    }

    #[test]
    fn test_database_config_deserialize() {
        let config: DatabaseConfig = toml::from_str(r#"path = "sent.db""#).unwrap();
        assert_eq!(config.path, "sent.db");
    }

    #[test]
    fn test_odds_api_config_minimal() {
        let config: OddsApiConfig = toml::from_str(r#"api_key = "k123""#).unwrap();
        assert_eq!(config.api_key, "k123");
        assert_eq!(config.base_url, "https://api.the-odds-api.com/v4");
        assert!(config.sports.contains(&"soccer_epl".to_string()));
    }

    #[test]
    fn test_odds_api_config_custom_sports() {
        let toml_str = r#"
api_key = "k123"
sports = ["basketball_nba"]
"#;
        let config: OddsApiConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.sports, vec!["basketball_nba".to_string()]);
    }

    #[test]
    fn test_gamdom_config_defaults() {
        let config: GamdomConfig = toml::from_str("").unwrap();
        assert_eq!(config.base_url, "https://api.gamdom.onebittech.com/api");
        assert_eq!(config.leagues, vec![56, 90, 95, 29, 116]);
    }

    #[test]
    fn test_rainbet_config_defaults() {
        let config: RainbetConfig = toml::from_str("").unwrap();
        assert!(config.url.contains("circa.cloud"));
    }

    #[test]
    fn test_full_config_deserialize() {
        let toml_str = r#"
[discord]
webhook_url = "https://discord.com/api/webhooks/1/abc"

[odds_api]
api_key = "k123"

[gamdom]
leagues = [95]

[strategy]
min_ev = 0.04
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.discord.unwrap().webhook_url,
            "https://discord.com/api/webhooks/1/abc"
        );
        assert_eq!(config.odds_api.unwrap().api_key, "k123");
        assert_eq!(config.gamdom.unwrap().leagues, vec![95]);
        assert!(config.rainbet.is_none());
        assert_eq!(config.strategy.min_ev, dec!(0.04));
        assert_eq!(config.database.path, "data/sent.db");
    }

    #[test]
    fn test_empty_config_all_collaborators_disabled() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.discord.is_none());
        assert!(config.odds_api.is_none());
        assert!(config.gamdom.is_none());
        assert!(config.rainbet.is_none());
    }
}
