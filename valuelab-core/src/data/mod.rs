//! Data acquisition: provider ports, adapters, and date alignment.

pub mod align;
pub mod memory;
pub mod provider;
pub mod yahoo;

pub use align::{align_pair, AlignedSeriesPair};
pub use memory::InMemoryProvider;
pub use provider::{DataError, MetadataProvider, PriceSeriesProvider, TickerInfo};
pub use yahoo::YahooProvider;
