//! Odds quoting
//!
//! A horse's fair price is `1 / p` where `p` is its win-rate share of the
//! field; the house keeps `house_edge` of it. A selection's base odds are the
//! product of its horses' prices, scaled by the bet type multiplier and
//! clamped to the configured range.

use serde::{Deserialize, Serialize};

use crate::{BetType, Horse, HorseId, RaceConfig, RaceError, Result};

/// Price of a single horse after the house edge
pub fn horse_odds(horse: HorseId, field: &[Horse], config: &RaceConfig) -> Result<f64> {
    let total: f64 = field.iter().map(|h| h.win_rate).sum();
    let runner = field
        .iter()
        .find(|h| h.id == horse)
        .ok_or_else(|| RaceError::InvalidBetSelection(format!("horse {} is not running", horse)))?;

    if total <= 0.0 || runner.win_rate <= 0.0 {
        return Err(RaceError::InvalidField(format!(
            "horse {} has no chance to win",
            horse
        )));
    }

    let p = runner.win_rate / total;
    Ok((1.0 / p) * (1.0 - config.house_edge))
}

/// Product of the selected horses' prices
pub fn base_odds(selection: &[HorseId], field: &[Horse], config: &RaceConfig) -> Result<f64> {
    selection
        .iter()
        .try_fold(1.0, |acc, h| -> Result<f64> {
            Ok(acc * horse_odds(*h, field, config)?)
        })
}

/// Final odds for a validated selection
pub fn quote_odds(
    bet_type: BetType,
    selection: &[HorseId],
    field: &[Horse],
    config: &RaceConfig,
) -> Result<f64> {
    bet_type.validate_selection(selection, field)?;
    let raw = base_odds(selection, field, config)? * config.odds_multipliers.get(bet_type);
    Ok(raw.clamp(config.min_odds, config.max_odds))
}

/// Win odds for one horse, as shown before betting opens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OddsLine {
    pub horse: HorseId,
    pub name: String,
    pub win_rate: f64,
    pub win_odds: f64,
}

/// Win odds for the whole field
pub fn odds_board(field: &[Horse], config: &RaceConfig) -> Result<Vec<OddsLine>> {
    field
        .iter()
        .map(|h| {
            Ok(OddsLine {
                horse: h.id,
                name: h.name.clone(),
                win_rate: h.win_rate,
                win_odds: quote_odds(BetType::Win, &[h.id], field, config)?,
            })
        })
        .collect()
}
