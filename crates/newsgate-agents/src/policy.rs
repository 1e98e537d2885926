use newsgate_models::{Confidence, Impact, JudgmentResult, Signal};

/// Trading proceeds unless the model is both sure of an impact and says so
/// with high confidence. Unknown impact (including the fallback) trades.
pub fn is_trade_recommended(result: &JudgmentResult) -> bool {
    !matches!(
        (result.impact, result.confidence),
        (Impact::Yes, Some(Confidence::High))
    )
}

pub fn signal_for(result: &JudgmentResult) -> Signal {
    if is_trade_recommended(result) {
        Signal::Trade
    } else {
        Signal::NoTrade
    }
}
