pub mod stooq;

pub use stooq::StooqMarketDataFeed;
