pub mod file;
pub mod gateway;
pub mod memory;

pub use file::FileStore;
pub use gateway::{PersistenceGateway, decode_record, encode_record};
pub use memory::MemoryStore;

use crate::config::{StorageBackend, StorageConfig};
use crate::error::AppResult;

/// 按键存取字符串记录的后端
pub trait KeyValueStore {
    /// 读取记录，不存在时返回 None
    fn read(&self, key: &str) -> AppResult<Option<String>>;

    /// 写入记录，覆盖旧值
    fn write(&self, key: &str, value: &str) -> AppResult<()>;

    /// 删除记录，不存在时不报错
    fn remove(&self, key: &str) -> AppResult<()>;
}

/// 按配置打开存储后端
pub fn open_store(config: &StorageConfig) -> AppResult<Box<dyn KeyValueStore>> {
    match config.backend {
        StorageBackend::File => {
            log::info!("Opening file store at {}", config.data_dir.display());
            Ok(Box::new(FileStore::open(&config.data_dir)?))
        }
        StorageBackend::Memory => {
            log::info!("Using in-memory store");
            Ok(Box::new(MemoryStore::new()))
        }
    }
}
