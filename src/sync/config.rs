//! 同步器配置

use crate::consts::DEFAULT_BLOCKS_PER_BAND;
use crate::types::AccessPolicy;

/// 同步器配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncConfig {
    /// 访问策略
    pub policy: AccessPolicy,
    /// 每波段期望的块数（分区粒度）
    ///
    /// 更细的分区减少处理不相交行范围的线程之间的竞争，
    /// 更粗的分区减少块切换时的协议开销。
    pub blocks_per_band: usize,
}

impl SyncConfig {
    /// 设置访问策略
    pub fn with_policy(mut self, policy: AccessPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// 设置每波段块数
    pub fn with_blocks_per_band(mut self, blocks_per_band: usize) -> Self {
        self.blocks_per_band = blocks_per_band;
        self
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            policy: AccessPolicy::ReadWrite,
            blocks_per_band: DEFAULT_BLOCKS_PER_BAND,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = SyncConfig::default();
        assert_eq!(config.policy, AccessPolicy::ReadWrite);
        assert_eq!(config.blocks_per_band, DEFAULT_BLOCKS_PER_BAND);
    }

    #[test]
    fn test_config_builder() {
        let config = SyncConfig::default()
            .with_policy(AccessPolicy::ReadOnly)
            .with_blocks_per_band(3);
        assert_eq!(config.policy, AccessPolicy::ReadOnly);
        assert_eq!(config.blocks_per_band, 3);
    }
}
