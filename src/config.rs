//! Configuration for rowcodec
//!
//! Centralized codec configuration with sensible defaults.

/// Byte order used for the value-path fixed-width fields.
///
/// Key-path encodings are always big-endian so that byte comparison
/// matches value ordering; this setting only affects how fields that
/// never need to sort (schema version header, value payloads, lengths)
/// are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    Big,
    Little,
}

impl ByteOrder {
    /// Byte order of the host this process runs on
    pub fn native() -> Self {
        if cfg!(target_endian = "little") {
            ByteOrder::Little
        } else {
            ByteOrder::Big
        }
    }

    pub fn from_little_endian(little_endian: bool) -> Self {
        if little_endian {
            ByteOrder::Little
        } else {
            ByteOrder::Big
        }
    }

    pub fn is_little_endian(self) -> bool {
        self == ByteOrder::Little
    }
}

impl Default for ByteOrder {
    fn default() -> Self {
        ByteOrder::Big
    }
}

/// Codec configuration shared by encoders and decoders
#[derive(Debug, Clone)]
pub struct CodecConfig {
    // -------------------------------------------------------------------------
    // Wire Configuration
    // -------------------------------------------------------------------------
    /// Byte order for value-path fixed-width fields
    pub byte_order: ByteOrder,

    // -------------------------------------------------------------------------
    // Buffer Sizing
    // -------------------------------------------------------------------------
    /// Assumed average length (in bytes) of a string column, used only to
    /// size the initial encode buffer
    pub avg_string_len: usize,

    /// Assumed average element count of a list column
    pub avg_list_len: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            byte_order: ByteOrder::Big,
            avg_string_len: 32,
            avg_list_len: 8,
        }
    }
}

impl CodecConfig {
    /// Create a new config builder
    pub fn builder() -> CodecConfigBuilder {
        CodecConfigBuilder::default()
    }

    /// Default config using the host byte order
    pub fn native() -> Self {
        Self {
            byte_order: ByteOrder::native(),
            ..Self::default()
        }
    }
}

/// Builder for CodecConfig
#[derive(Default)]
pub struct CodecConfigBuilder {
    config: CodecConfig,
}

impl CodecConfigBuilder {
    /// Set the value-path byte order
    pub fn byte_order(mut self, order: ByteOrder) -> Self {
        self.config.byte_order = order;
        self
    }

    /// Shorthand for `byte_order(ByteOrder::Little)` / `Big`
    pub fn little_endian(mut self, little_endian: bool) -> Self {
        self.config.byte_order = ByteOrder::from_little_endian(little_endian);
        self
    }

    /// Set the assumed average string length (in bytes)
    pub fn avg_string_len(mut self, len: usize) -> Self {
        self.config.avg_string_len = len;
        self
    }

    /// Set the assumed average list element count
    pub fn avg_list_len(mut self, len: usize) -> Self {
        self.config.avg_list_len = len;
        self
    }

    pub fn build(self) -> CodecConfig {
        self.config
    }
}
