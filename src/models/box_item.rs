use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Rarity;
use crate::error::{AppError, AppResult};

/// 图片类条目使用的固定标识
pub const IMAGE_PLACEHOLDER: &str = "Image";

/// 标识类型（兼容旧版西语名称）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierType {
    #[default]
    #[serde(alias = "numero")]
    Number,
    #[serde(alias = "letra")]
    Letter,
    #[serde(alias = "alfanumerico")]
    Alphanumeric,
    #[serde(alias = "imagen")]
    Image,
}

/// 池中的一个盒子
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxItem {
    /// 创建时分配，之后不再变化
    pub id: String,
    pub identifier: String,
    pub identifier_type: IdentifierType,
    pub rarity: Rarity,
    /// 相对权重 (0, 100]，全池无需加总为 100
    pub percentage: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl BoxItem {
    pub fn from_draft(draft: BoxItemDraft, id: String, created_at: DateTime<Utc>) -> Self {
        BoxItem {
            id,
            identifier: draft.identifier,
            identifier_type: draft.identifier_type,
            rarity: draft.rarity,
            percentage: draft.percentage,
            image_url: draft.image_url,
            created_at,
        }
    }

    /// 展示名称：图片条目直接显示标识，其余显示 "Item <标识>"
    pub fn display_label(&self) -> String {
        match self.identifier_type {
            IdentifierType::Image => self.identifier.clone(),
            _ => format!("Item {}", self.identifier),
        }
    }
}

/// 新增条目的输入（尚未分配 id / 创建时间）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxItemDraft {
    pub identifier: String,
    pub identifier_type: IdentifierType,
    pub rarity: Rarity,
    pub percentage: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl BoxItemDraft {
    pub fn new(
        identifier: impl Into<String>,
        identifier_type: IdentifierType,
        rarity: Rarity,
        percentage: f64,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            identifier_type,
            rarity,
            percentage,
            image_url: None,
        }
    }

    /// 权重取稀有度的默认值
    pub fn with_default_percentage(
        identifier: impl Into<String>,
        identifier_type: IdentifierType,
        rarity: Rarity,
    ) -> Self {
        Self::new(identifier, identifier_type, rarity, rarity.default_percentage())
    }

    pub fn image(image_url: impl Into<String>, rarity: Rarity, percentage: f64) -> Self {
        Self {
            identifier: IMAGE_PLACEHOLDER.to_string(),
            identifier_type: IdentifierType::Image,
            rarity,
            percentage,
            image_url: Some(image_url.into()),
        }
    }

    /// 校验并规范化：图片条目的标识统一替换为占位文字，非图片条目丢弃 image_url
    pub fn validate(mut self) -> AppResult<Self> {
        if !self.percentage.is_finite() || self.percentage <= 0.0 || self.percentage > 100.0 {
            return Err(AppError::ValidationError(format!(
                "Percentage must be within (0, 100], got {}",
                self.percentage
            )));
        }

        match self.identifier_type {
            IdentifierType::Image => {
                let has_image = self
                    .image_url
                    .as_deref()
                    .is_some_and(|url| !url.trim().is_empty());
                if !has_image {
                    return Err(AppError::ValidationError(
                        "Image boxes require an image".into(),
                    ));
                }
                self.identifier = IMAGE_PLACEHOLDER.to_string();
            }
            _ => {
                let trimmed = self.identifier.trim();
                if trimmed.is_empty() {
                    return Err(AppError::ValidationError(
                        "Identifier must not be empty".into(),
                    ));
                }
                if trimmed.len() != self.identifier.len() {
                    self.identifier = trimmed.to_string();
                }
                self.image_url = None;
            }
        }

        Ok(self)
    }
}
