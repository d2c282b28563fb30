//! Well-known Application Identifier codes referenced by the pipeline.

pub const SSCC: &str = "00";
pub const GTIN: &str = "01";
pub const CONTENT_GTIN: &str = "02";
pub const BATCH: &str = "10";
pub const PRODUCTION_DATE: &str = "11";
pub const DUE_DATE: &str = "12";
pub const PACKAGING_DATE: &str = "13";
pub const BEST_BEFORE: &str = "15";
pub const SELL_BY: &str = "16";
pub const EXPIRY: &str = "17";
pub const SERIAL: &str = "21";
pub const CONSUMER_VARIANT: &str = "22";

/// Pseudo-key under which non-GS1 text is kept whole.
pub const PLAIN_TEXT: &str = "text";
