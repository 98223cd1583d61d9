pub fn default_enabled() -> bool {
    true
}

pub fn default_volatility() -> f64 {
    0.3
}

pub fn default_risk_free_rate() -> f64 {
    0.05
}

pub fn default_snapshot_depth() -> usize {
    10
}
