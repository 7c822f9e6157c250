//! Gamdom soft-odds feed
//!
//! Pulls each configured tournament from the `partidos` endpoint. The payload
//! uses Spanish field names; team names sometimes only appear in the
//! `Competidores` list, and a price can live in either `CotizacionWeb` or
//! `CotizacionTicket`. `Localia` tells us which team an offer is on
//! (1 = home, 2 = away, anything else is a named outcome such as the draw).

use super::SoftFeed;
use crate::error::Result;
use crate::types::OddsRecord;
use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

pub struct GamdomFeed {
    http: Client,
    base_url: String,
    leagues: Vec<u64>,
}

/// The endpoint sometimes wraps matches in an object, sometimes returns a
/// bare list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GamdomResponse {
    Wrapped {
        #[serde(default)]
        matches: Vec<GamdomMatch>,
    },
    List(Vec<GamdomMatch>),
}

impl GamdomResponse {
    fn into_matches(self) -> Vec<GamdomMatch> {
        match self {
            GamdomResponse::Wrapped { matches } => matches,
            GamdomResponse::List(matches) => matches,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GamdomMatch {
    #[serde(rename = "EquipoLocalNombre")]
    home: Option<String>,
    #[serde(rename = "EquipoVisitanteNombre")]
    away: Option<String>,
    #[serde(rename = "Competidores", default)]
    competitors: Vec<GamdomCompetitor>,
    #[serde(rename = "Modalidades", default)]
    markets: Vec<GamdomMarket>,
}

#[derive(Debug, Deserialize)]
struct GamdomCompetitor {
    #[serde(rename = "Nombre")]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GamdomMarket {
    #[serde(rename = "Modalidad")]
    name: Option<String>,
    #[serde(rename = "Ofertas", default)]
    offers: Vec<GamdomOffer>,
}

#[derive(Debug, Deserialize)]
struct GamdomOffer {
    #[serde(rename = "CotizacionWeb")]
    web_price: Option<Decimal>,
    #[serde(rename = "CotizacionTicket")]
    ticket_price: Option<Decimal>,
    #[serde(rename = "Localia")]
    side: Option<i64>,
    #[serde(rename = "OfertaEvento")]
    label: Option<String>,
}

impl GamdomMatch {
    /// Resolve (home, away), falling back to the competitor list when the
    /// direct name fields are missing.
    fn team_names(&self) -> Option<(String, String)> {
        let from_competitors = |idx: usize| {
            self.competitors
                .get(idx)
                .and_then(|c| c.name.clone())
        };
        let home = self.home.clone().or_else(|| from_competitors(0))?;
        let away = self.away.clone().or_else(|| from_competitors(1))?;
        Some((home, away))
    }
}

impl GamdomFeed {
    pub fn new(config: &crate::config::GamdomConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            leagues: config.leagues.clone(),
        })
    }

    async fn fetch_league(&self, league_id: u64) -> Result<Vec<OddsRecord>> {
        let url = format!("{}/partidos", self.base_url);
        let response: GamdomResponse = self
            .http
            .get(&url)
            .query(&[("IdInstanciaTorneo", league_id.to_string())])
            .header("User-Agent", "Mozilla/5.0")
            .header("Accept", "application/json")
            .header("Accept-Language", "en")
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let matches = response.into_matches();
        debug!("gamdom league {}: {} matches", league_id, matches.len());
        Ok(matches.iter().flat_map(parse_match).collect())
    }
}

fn parse_match(m: &GamdomMatch) -> Vec<OddsRecord> {
    let Some((home, away)) = m.team_names() else {
        return Vec::new();
    };

    let mut records = Vec::new();
    for market in &m.markets {
        let market_name = market.name.clone().unwrap_or_else(|| "Unknown".to_string());
        for offer in &market.offers {
            let Some(price) = offer.web_price.or(offer.ticket_price) else {
                continue;
            };
            let outcome = match offer.side {
                Some(1) => home.clone(),
                Some(2) => away.clone(),
                _ => match &offer.label {
                    Some(label) => label.clone(),
                    None => continue,
                },
            };
            records.push(OddsRecord {
                book: "gamdom".to_string(),
                home: home.clone(),
                away: away.clone(),
                market: market_name.clone(),
                outcome,
                price,
            });
        }
    }
    records
}

#[async_trait]
impl SoftFeed for GamdomFeed {
    fn name(&self) -> &str {
        "gamdom"
    }

    async fn fetch(&self) -> Result<Vec<OddsRecord>> {
        let mut records = Vec::new();
        for &league_id in &self.leagues {
            // One unreachable league should not cost us the others.
            match self.fetch_league(league_id).await {
                Ok(mut batch) => records.append(&mut batch),
                Err(e) => warn!("gamdom league {} fetch error: {}", league_id, e),
            }
        }
        Ok(records)
    }
}
