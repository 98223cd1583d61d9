//! Per-asset trading session

use crate::types::{Position, SettlementResult, SettlementStatus, TradeReport};
use common::{Error, InstrumentKey, OptionType, PositionId, Result, Side, Symbol};
use market_data::{contract_quote, payoff, OptionContract, PriceSource, PricingParams};
use matching_engine::{BookRegistry, BookSnapshot};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

/// Per-asset workflow on top of the pricing model and the book registry
///
/// The session holds the registry and price source handles plus its own
/// positions. The spot price is always fetched before the core is invoked,
/// so nothing below the session ever waits on I/O.
pub struct TradingSession {
    asset: Symbol,
    registry: Arc<BookRegistry>,
    price_source: Arc<dyn PriceSource>,
    params: PricingParams,
    positions: Mutex<HashMap<PositionId, Position>>,
    next_position_id: AtomicU64,
}

impl TradingSession {
    /// Create a session for one asset
    pub fn new(
        asset: impl Into<Symbol>,
        registry: Arc<BookRegistry>,
        price_source: Arc<dyn PriceSource>,
        params: PricingParams,
    ) -> Self {
        Self {
            asset: asset.into(),
            registry,
            price_source,
            params,
            positions: Mutex::new(HashMap::new()),
            next_position_id: AtomicU64::new(1),
        }
    }

    /// Asset this session trades
    pub fn asset(&self) -> &Symbol {
        &self.asset
    }

    async fn spot(&self) -> Result<f64> {
        let point = self.price_source.current_price(&self.asset).await?;
        Ok(point.value)
    }

    /// Quote a contract at the current spot
    pub async fn quote(&self, strike: f64) -> Result<OptionContract> {
        let spot = self.spot().await?;
        contract_quote(self.asset.clone(), spot, strike, self.params)
    }

    /// Open a position: quote, submit at the quoted premium, record the fill
    ///
    /// The limit price is the freshly quoted call or put premium for the
    /// requested type. A position is created for whatever size actually
    /// filled; the unfilled remainder rests in the book under the returned
    /// order id.
    pub async fn open_position(
        &self,
        strike: f64,
        option_type: OptionType,
        side: Side,
        size: u32,
    ) -> Result<TradeReport> {
        let contract = self.quote(strike).await?;
        let premium = match option_type {
            OptionType::Call => contract.call,
            OptionType::Put => contract.put,
        };

        let key = InstrumentKey::new(self.asset.clone(), strike, option_type);
        let report = self.registry.submit(&key, side, premium, size)?;

        let position = if report.has_fills() {
            let entry_price = report
                .avg_fill_price
                .ok_or_else(|| Error::inconsistency("fills without an average price"))?;
            let position = Position {
                id: PositionId(self.next_position_id.fetch_add(1, Ordering::Relaxed)),
                instrument: key.clone(),
                side,
                entry_price,
                size: report.filled_size,
                order_id: report.order_id,
            };
            self.positions.lock().insert(position.id, position.clone());
            info!(
                position_id = %position.id,
                instrument = %key,
                %side,
                entry_price,
                size = position.size,
                "Position opened"
            );
            Some(position)
        } else {
            info!(
                order_id = %report.order_id,
                instrument = %key,
                %side,
                price = premium,
                size,
                "Order resting, no position opened"
            );
            None
        };

        Ok(TradeReport {
            order_id: report.order_id,
            filled_size: report.filled_size,
            resting_size: report.resting_size,
            position,
            fills: report.fills,
        })
    }

    /// Settle a position at the current spot and remove it on success
    pub async fn settle(&self, position_id: PositionId) -> Result<SettlementResult> {
        let position = self.position(position_id)?;
        let spot = self.spot().await?;

        match payoff::settle(
            spot,
            position.instrument.strike_price(),
            position.instrument.option_type,
            position.side,
            position.entry_price,
        ) {
            Ok(pnl) => {
                self.positions.lock().remove(&position_id);
                info!(%position_id, pnl, settlement_price = spot, "Position settled");
                Ok(SettlementResult {
                    pnl,
                    settlement_price: spot,
                    status: SettlementStatus::Success,
                    message: format!("Contract settled successfully. PnL: {pnl:.2}"),
                })
            }
            Err(err) => Ok(self.failed(position_id, spot, "settlement", err)),
        }
    }

    /// Exercise a position at the current spot and remove it on success
    ///
    /// Exercise realizes intrinsic value; the result is side-independent and
    /// not PnL relative to entry.
    pub async fn exercise(&self, position_id: PositionId) -> Result<SettlementResult> {
        let position = self.position(position_id)?;
        let spot = self.spot().await?;

        match payoff::exercise(
            spot,
            position.instrument.strike_price(),
            position.instrument.option_type,
        ) {
            Ok(value) => {
                self.positions.lock().remove(&position_id);
                info!(%position_id, value, settlement_price = spot, "Position exercised");
                Ok(SettlementResult {
                    pnl: value,
                    settlement_price: spot,
                    status: SettlementStatus::Success,
                    message: format!("Option exercised successfully. Intrinsic value: {value:.2}"),
                })
            }
            Err(err) => Ok(self.failed(position_id, spot, "exercise", err)),
        }
    }

    /// Evaluation failed: report it, leave the position for a retry
    fn failed(
        &self,
        position_id: PositionId,
        spot: f64,
        operation: &str,
        err: Error,
    ) -> SettlementResult {
        warn!(%position_id, %err, "Payoff evaluation failed, position retained");
        SettlementResult {
            pnl: 0.0,
            settlement_price: spot,
            status: SettlementStatus::Failed,
            message: format!("{operation} failed: {err}"),
        }
    }

    fn position(&self, position_id: PositionId) -> Result<Position> {
        self.positions
            .lock()
            .get(&position_id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("position {position_id}")))
    }

    /// Positions currently held by this session
    pub fn positions(&self) -> Vec<Position> {
        self.positions.lock().values().cloned().collect()
    }

    /// Book snapshot for one of this asset's instruments
    pub fn book(&self, strike: f64, option_type: OptionType, depth: usize) -> BookSnapshot {
        let key = InstrumentKey::new(self.asset.clone(), strike, option_type);
        self.registry.snapshot(&key, depth)
    }
}
