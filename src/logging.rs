use chrono::Local;
use env_logger::{Env, Target};
use std::io::Write;

/// 安装单行 JSON 格式的日志输出（默认级别 info，可用 RUST_LOG 覆盖）
///
/// 已经安装过时返回 false，便于测试中重复调用。
pub fn init_logging() -> bool {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .try_init()
        .is_ok()
}
