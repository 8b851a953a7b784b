/// Ticker suggestions surfaced on the holdings step. Validation accepts
/// any non-empty symbol; `OTHER` covers everything off this list.
pub const COIN_OPTIONS: &[(&str, &str)] = &[
    ("BTC", "Bitcoin (BTC)"),
    ("ETH", "Ethereum (ETH)"),
    ("SOL", "Solana (SOL)"),
    ("ADA", "Cardano (ADA)"),
    ("DOT", "Polkadot (DOT)"),
    ("AVAX", "Avalanche (AVAX)"),
    ("MATIC", "Polygon (MATIC)"),
    ("LINK", "Chainlink (LINK)"),
    ("XRP", "XRP (XRP)"),
    ("USDT", "Tether (USDT)"),
    ("USDC", "USD Coin (USDC)"),
    ("OTHER", "Other (specify)"),
];

/// Receiving address for the analysis fee. Shown as a payment instruction;
/// never verified against any chain.
pub const PAYMENT_WALLET_ADDRESS: &str = "TBNwZnv9rU28cpJhJyw9D55kiPqE7qWdFd";

/// Flat fee for one analysis, in USDT over TRC20.
pub const ANALYSIS_FEE_USDT: u32 = 10;
