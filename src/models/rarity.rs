use serde::{Deserialize, Serialize};

/// 稀有度等级（由低到高，可比较大小）
///
/// 仅作展示分类，不约束条目的权重。
/// 兼容旧版记录中的西语名称（basico / medio / valioso / muy-valioso / legendario）。
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Rarity {
    #[default]
    #[serde(alias = "basico")]
    Basic,
    #[serde(alias = "medio")]
    Medium,
    #[serde(alias = "valioso")]
    Valuable,
    #[serde(alias = "muy-valioso")]
    VeryValuable,
    #[serde(alias = "legendario")]
    Legendary,
}

/// 稀有度展示配置
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RarityConfig {
    pub label: &'static str,
    pub color: &'static str,
    pub glow_color: &'static str,
    /// 表单选择该稀有度时预填的权重
    pub default_percentage: f64,
}

const BASIC: RarityConfig = RarityConfig {
    label: "Basic",
    color: "#94a3b8",
    glow_color: "rgba(148, 163, 184, 0.4)",
    default_percentage: 50.0,
};

const MEDIUM: RarityConfig = RarityConfig {
    label: "Medium",
    color: "#0ea5e9",
    glow_color: "rgba(14, 165, 233, 0.4)",
    default_percentage: 30.0,
};

const VALUABLE: RarityConfig = RarityConfig {
    label: "Valuable",
    color: "#a855f7",
    glow_color: "rgba(168, 85, 247, 0.4)",
    default_percentage: 15.0,
};

const VERY_VALUABLE: RarityConfig = RarityConfig {
    label: "Very Valuable",
    color: "#f43f5e",
    glow_color: "rgba(244, 63, 94, 0.4)",
    default_percentage: 4.0,
};

const LEGENDARY: RarityConfig = RarityConfig {
    label: "Legendary",
    color: "#eab308",
    glow_color: "rgba(234, 179, 8, 0.5)",
    default_percentage: 1.0,
};

impl Rarity {
    pub const ALL: [Rarity; 5] = [
        Rarity::Basic,
        Rarity::Medium,
        Rarity::Valuable,
        Rarity::VeryValuable,
        Rarity::Legendary,
    ];

    pub fn config(&self) -> &'static RarityConfig {
        match self {
            Rarity::Basic => &BASIC,
            Rarity::Medium => &MEDIUM,
            Rarity::Valuable => &VALUABLE,
            Rarity::VeryValuable => &VERY_VALUABLE,
            Rarity::Legendary => &LEGENDARY,
        }
    }

    pub fn label(&self) -> &'static str {
        self.config().label
    }

    pub fn default_percentage(&self) -> f64 {
        self.config().default_percentage
    }
}
