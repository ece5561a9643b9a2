// src/logging/logger.rs

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

/// 默认日志级别，可通过 RUST_LOG 覆盖
const DEFAULT_FILTER: &str = "info";

/// **初始化全局 tracing 日志**
///
/// - 结构化 JSON 日志按小时滚动写入 `log_dir/<file_name>`
/// - 同时向 stderr 输出便于本地查看的文本日志
///
/// 返回的 `WorkerGuard` 必须在进程结束前一直持有，否则缓冲中的日志会丢失。
pub fn init_tracing(
    log_dir: &str,
    file_name: &str,
) -> Result<WorkerGuard, tracing::subscriber::SetGlobalDefaultError> {
    let log_file = rolling::hourly(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(log_file);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let subscriber = Registry::default()
        .with(filter)
        .with(fmt::layer().json().with_writer(non_blocking))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false));
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(guard)
}
