use crate::common::*;

#[doc = "로그 한 줄 포맷: 시각 [레벨] 모듈:라인 메시지"]
fn log_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "[{}] [{}] [{}:{}] {}",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        record.level(),
        record.module_path().unwrap_or("<unnamed>"),
        record.line().unwrap_or(0),
        &record.args()
    )
}

#[doc = r#"
    전역 로거를 설정하는 함수.

    - 로그 레벨은 `RUST_LOG` 환경변수를 우선하고, 없으면 `info`
    - `./logs` 디렉토리에 일 단위로 로테이션되며 최근 10개 파일만 유지
    - 모든 로그는 stdout 으로도 복제 출력

    반환되는 `LoggerHandle` 은 프로세스 종료 시까지 유지해야 한다.
"#]
pub fn set_global_logger() -> anyhow::Result<LoggerHandle> {
    let handle: LoggerHandle = Logger::try_with_env_or_str("info")?
        .log_to_file(
            FileSpec::default()
                .directory("logs")
                .basename("dataset_plot_bot"),
        )
        .rotate(
            Criterion::Age(Age::Day),
            Naming::Timestamps,
            Cleanup::KeepLogFiles(10),
        )
        .duplicate_to_stdout(Duplicate::All)
        .format(log_format)
        .start()
        .context("[set_global_logger] Failed to start flexi_logger")?;

    Ok(handle)
}
