use crate::common::*;

#[doc = r#"
    환경변수를 읽어와서 반환하고, 환경변수가 설정되지 않은 경우 치명적 오류로 처리하는 함수.

    봇 토큰처럼 없으면 프로세스가 동작할 수 없는 값에만 사용한다.

    # Arguments
    * `key` - 조회할 환경변수 키명

    # Returns
    * `String` - 환경변수 값

    # Panics
    환경변수가 설정되지 않은 경우 애플리케이션 종료
"#]
fn get_env_or_panic(key: &str) -> String {
    match env::var(key) {
        Ok(val) if !val.trim().is_empty() => val,
        _ => {
            let msg: String = format!("[ENV file read Error] '{}' must be set", key);
            error!("{}", msg);
            panic!("{}", msg);
        }
    }
}

#[doc = r#"
    Telegram Bot API 인증 토큰.

    `BOT_TOKEN` 환경변수(.env 포함)에서 읽어온다. 첫 접근 시에만 초기화된다.

    # Panics
    `BOT_TOKEN` 환경변수가 설정되지 않은 경우
"#]
pub static BOT_TOKEN: once_lazy<String> = once_lazy::new(|| get_env_or_panic("BOT_TOKEN"));

#[doc = r#"
    선택적인 봇 설정 파일(TOML) 경로.

    `BOT_CONFIG_PATH` 가 없으면 모든 설정값은 기본값을 사용한다.
"#]
pub static BOT_CONFIG_PATH: once_lazy<Option<String>> =
    once_lazy::new(|| env::var("BOT_CONFIG_PATH").ok().filter(|p| !p.trim().is_empty()));
