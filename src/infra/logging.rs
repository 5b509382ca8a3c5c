use log::LevelFilter;

/// Поднять `env_logger`: уровень по умолчанию `level`, `RUST_LOG` его переопределяет.
///
/// Повторный вызов ничего не ломает (второй логгер просто не ставится).
pub fn init(level: LevelFilter) {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(level.as_str()),
    )
    .format_target(false)
    .format_timestamp_millis()
    .try_init();
}
