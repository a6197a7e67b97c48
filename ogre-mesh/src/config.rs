//! Import options

use serde::Deserialize;

use crate::buffer::Usage;

/// Options applied to every mesh a [`MeshLoader`](crate::MeshLoader) imports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Skinning runs on the GPU: bone buffers are uploaded instead of kept CPU-side
    pub hardware_skinning: bool,
    /// Exporters write one interleaved vertex stream instead of one stream per attribute
    pub auto_interleave: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            hardware_skinning: false,
            auto_interleave: true,
        }
    }
}

impl ImportConfig {
    /// Usage hint for bone index/weight buffers
    pub fn bone_buffer_usage(&self) -> Usage {
        if self.hardware_skinning {
            Usage::Static
        } else {
            Usage::CpuOnly
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_keys() {
        let config: ImportConfig = toml::from_str("hardware_skinning = true").unwrap();
        assert!(config.hardware_skinning);
        assert!(config.auto_interleave);
        assert_eq!(config.bone_buffer_usage(), Usage::Static);
        assert_eq!(ImportConfig::default().bone_buffer_usage(), Usage::CpuOnly);
    }
}
