//! Exponential moving average over a raw input sequence, used by MACD.
//!
//! k = 2/(n+1), seed with the SMA of the first n inputs, then EMA[i] = x[i]*k + EMA[i-1]*(1-k).
//! Warmup: first (n-1) inputs yield `None`.

/// EMA over an arbitrary input sequence; `None` during warm-up.
pub(crate) fn ema_over(input: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(input.len());
    if period == 0 {
        out.resize(input.len(), None);
        return out;
    }

    let k = 2.0 / (period as f64 + 1.0);
    let mut ema = 0.0;
    let mut sum = 0.0;

    for (i, &x) in input.iter().enumerate() {
        if i < period - 1 {
            sum += x;
            out.push(None);
        } else if i == period - 1 {
            sum += x;
            ema = sum / period as f64;
            out.push(Some(ema));
        } else {
            ema = x * k + ema * (1.0 - k);
            out.push(Some(ema));
        }
    }

    out
}
