pub mod block;
pub mod channel;
pub mod dct;
pub mod dwt;
pub mod error;
pub mod metrics;
pub mod packing;
pub mod params;
pub mod qim;
pub mod wavelet;

pub use self::block::{DctCapacity, DctEmbedding, calculate_dct_capacity, embed_dct, extract_dct};
pub use self::error::{Result, WatermarkError};
pub use self::packing::Extraction;
pub use self::params::{DctOptions, DwtOptions};
pub use self::wavelet::{
    DwtCapacity, DwtEmbedding, calculate_dwt_capacity, embed_dwt, extract_dwt,
};
