//! Factory for creating compression handlers

use crate::profile::Compression;
use super::handler::CompressionHandler;
use super::uncompressed::UncompressedHandler;
use super::deflate::AdobeDeflateHandler;
use super::lzw::LzwHandler;
use super::zstd::ZstdHandler;

/// Factory for creating compression handlers
pub struct CompressionFactory;

impl CompressionFactory {
    /// Create the handler for a profile compression mode
    pub fn create_handler(compression: Compression) -> Box<dyn CompressionHandler> {
        match compression {
            Compression::None => Box::new(UncompressedHandler),
            Compression::Lzw => Box::new(LzwHandler),
            Compression::Deflate => Box::new(AdobeDeflateHandler),
            Compression::Zstd => Box::new(ZstdHandler::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiff::constants::compression;

    #[test]
    fn test_handler_codes() {
        assert_eq!(CompressionFactory::create_handler(Compression::None).code(), compression::NONE);
        assert_eq!(CompressionFactory::create_handler(Compression::Lzw).code(), compression::LZW);
        assert_eq!(CompressionFactory::create_handler(Compression::Deflate).code(), compression::DEFLATE);
        assert_eq!(CompressionFactory::create_handler(Compression::Zstd).code(), compression::ZSTD);
    }

    #[test]
    fn test_deflate_and_zstd_restore_input() {
        let chunk: Vec<u8> = (0..2048u32).map(|i| (i % 251) as u8).collect();
        for mode in [Compression::Deflate, Compression::Zstd] {
            let handler = CompressionFactory::create_handler(mode);
            let packed = handler.compress(&chunk).unwrap();
            assert_eq!(handler.decompress(&packed).unwrap(), chunk, "{}", handler.name());
        }
    }
}
