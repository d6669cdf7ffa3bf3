/// On-chain token precision (AWE and launched tokens are 18-decimal ERC20s)
pub const TOKEN_DECIMALS: u32 = 18;

/// Platform fee (0.5%) in basis points
pub const PLATFORM_FEE_BPS: u64 = 50;
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Market cap in AWE at which a bonding curve graduates
pub const GRADUATION_MARKET_CAP_AWE: u64 = 100_000;

pub const DEFAULT_CURRENCY: &str = "AWE";

pub const TGE_LABEL: &str = "TGE";

pub const MS_PER_SECOND: i64 = 1_000;
pub const MS_PER_HOUR: i64 = 3_600_000;
pub const MS_PER_DAY: i64 = 86_400_000;
