use uuid::Uuid;

/// 生成条目ID（UUID v4，不会复用）
pub fn generate_item_id() -> String {
    Uuid::new_v4().to_string()
}
