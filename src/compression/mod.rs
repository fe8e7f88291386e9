//! Compression handling for GeoTIFF output
//!
//! This module implements strategies for the compression methods a profile
//! can ask for.

mod handler;
mod uncompressed;
mod deflate;
mod lzw;
mod factory;
mod zstd;

pub use handler::CompressionHandler;
pub use uncompressed::UncompressedHandler;
pub use deflate::AdobeDeflateHandler;
pub use lzw::LzwHandler;
pub use factory::CompressionFactory;
pub use self::zstd::ZstdHandler;
