// DONUT, the protocol reward token. Deep liquidity against both the native
// asset and every mined token makes it the routing hub for two-hop swaps.
pub const INTERMEDIATE_TOKEN_ADDRESS: &str = "0xae4a37d554c6d6f3e398546d8566b25052e0169c";

/// Integrator fee, 0.4%.
pub const SWAP_FEE_BPS: u32 = 40;

/// Seconds from "now" after which a built swap transaction reverts.
pub const DEADLINE_BUFFER_SECONDS: u64 = 1200;

pub const DEFAULT_SLIPPAGE_BPS: u32 = 50;

pub const ETH_TOKEN_DECIMALS: u8 = 18;
