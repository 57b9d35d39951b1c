//! G2P 변환 에러 정의

use std::path::PathBuf;

use thiserror::Error;

/// 변환 세션 전체에서 사용하는 에러
#[derive(Debug, Error)]
pub enum G2pError {
    /// 한글 음절 범위(U+AC00..=U+D7A3) 밖의 코드포인트
    #[error("한글 음절이 아닌 코드포인트: U+{0:04X}")]
    InvalidCodepoint(u32),

    /// 초성/중성/종성 인덱스가 테이블 범위를 벗어남
    #[error("자모 인덱스 범위 초과: 초성 {onset}, 중성 {nucleus}, 종성 {coda}")]
    IndexOutOfRange { onset: u32, nucleus: u32, coda: u32 },

    /// 규칙 파일 읽기 실패
    #[error("규칙 파일을 읽을 수 없음 ({path}): {source}")]
    RulebookLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 탭 구분자가 없거나 필드 수가 맞지 않는 규칙 줄
    #[error("잘못된 규칙 {line}번째 줄: {content:?}")]
    MalformedRuleLine { line: usize, content: String },

    /// 정규식으로 컴파일할 수 없는 규칙 패턴
    #[error("규칙 {line}번째 줄의 패턴 오류: {source}")]
    InvalidRulePattern {
        line: usize,
        #[source]
        source: regex::Error,
    },

    /// 규칙 파일 밖에서 만든 규칙의 패턴 오류
    #[error("규칙 패턴 오류 ({pattern:?}): {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// 해석할 수 없는 치환 문자열
    #[error("규칙 치환 오류 ({replacement:?}): {reason}")]
    InvalidReplacement { replacement: String, reason: String },

    #[error("규칙 {line}번째 줄의 치환 오류 ({replacement:?}): {reason}")]
    InvalidRuleReplacement {
        line: usize,
        replacement: String,
        reason: String,
    },

    /// 규칙 반복 횟수 상한이 0
    #[error("규칙 최대 반복 횟수는 1 이상이어야 함: {0}")]
    InvalidMaxPasses(usize),

    /// 기호 테이블에 없는 자모
    #[error("{position} 테이블에 없는 자모: {grapheme:?}")]
    UnknownGrapheme { grapheme: char, position: &'static str },

    /// 로마자 음소 테이블에 없는 음소 코드
    #[error("{position} 테이블에 없는 음소: {phone:?}")]
    UnknownPhone { phone: String, position: &'static str },

    /// 음절 단위(3개)로 나누어지지 않는 자모열
    #[error("자모열 길이가 3의 배수가 아님 ({len}): {graphemes}")]
    MalformedGraphemeSequence { len: usize, graphemes: String },

    /// 최대 반복 횟수 안에 규칙 적용이 수렴하지 않음
    #[error("{passes}회 반복 후에도 규칙 적용이 수렴하지 않음: {last}")]
    Diverged { passes: usize, last: String },

    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),

    /// 설정 직렬화/역직렬화 실패
    #[error("설정 오류: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, G2pError>;
