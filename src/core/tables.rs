//! 자모 테이블과 음소/기호 매핑 테이블
//!
//! 모든 테이블은 초성(19)/중성(21)/종성(28) 인덱스 순서에 맞춰 정렬되어 있으며
//! 프로세스 전역의 읽기 전용 데이터입니다.
//!
//! 초성 인덱스 순서:
//! ㄱ(0) ㄲ(1) ㄴ(2) ㄷ(3) ㄸ(4) ㄹ(5) ㅁ(6) ㅂ(7) ㅃ(8) ㅅ(9)
//! ㅆ(10) ㅇ(11) ㅈ(12) ㅉ(13) ㅊ(14) ㅋ(15) ㅌ(16) ㅍ(17) ㅎ(18)
//!
//! 중성 인덱스 순서:
//! ㅏ(0) ㅐ(1) ㅑ(2) ㅒ(3) ㅓ(4) ㅔ(5) ㅕ(6) ㅖ(7) ㅗ(8) ㅘ(9)
//! ㅙ(10) ㅚ(11) ㅛ(12) ㅜ(13) ㅝ(14) ㅞ(15) ㅟ(16) ㅠ(17) ㅡ(18) ㅢ(19) ㅣ(20)
//!
//! 종성 인덱스 순서 (0 = 없음):
//! 없음(0) ㄱ(1) ㄲ(2) ㄳ(3) ㄴ(4) ㄵ(5) ㄶ(6) ㄷ(7) ㄹ(8) ㄺ(9)
//! ㄻ(10) ㄼ(11) ㄽ(12) ㄾ(13) ㄿ(14) ㅀ(15) ㅁ(16) ㅂ(17) ㅄ(18) ㅅ(19)
//! ㅆ(20) ㅇ(21) ㅈ(22) ㅊ(23) ㅋ(24) ㅌ(25) ㅍ(26) ㅎ(27)

use std::sync::LazyLock;

use crate::core::unicode::{
    choseong_to_jamo_char, jongseong_to_jamo_char, jungseong_to_jamo_char, CHOSEONG_COUNT,
    JONGSEONG_COUNT, JUNGSEONG_COUNT,
};

/// 종성 없음을 나타내는 자모열 채움 문자
pub const NO_CODA: char = '_';

/// 초성 ㅇ (소리 없는 초성)
pub const SILENT_ONSET: char = 'ㅇ';

/// 음절 내 자모 위치
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Onset,
    Nucleus,
    Coda,
}

impl Position {
    /// 음절 내 순번(0, 1, 2)으로 위치 결정
    pub fn from_cycle(n: usize) -> Self {
        match n % 3 {
            0 => Position::Onset,
            1 => Position::Nucleus,
            _ => Position::Coda,
        }
    }

    /// 에러 메시지용 이름
    pub fn name(self) -> &'static str {
        match self {
            Position::Onset => "초성",
            Position::Nucleus => "중성",
            Position::Coda => "종성",
        }
    }
}

/// 초성 자모 (호환용 자모)
pub static CHOSEONG_GRAPHEMES: LazyLock<Vec<char>> =
    LazyLock::new(|| (0..CHOSEONG_COUNT).filter_map(choseong_to_jamo_char).collect());

/// 중성 자모 (호환용 자모)
pub static JUNGSEONG_GRAPHEMES: LazyLock<Vec<char>> =
    LazyLock::new(|| (0..JUNGSEONG_COUNT).filter_map(jungseong_to_jamo_char).collect());

/// 종성 자모 (0번은 종성 없음 `_`)
pub static JONGSEONG_GRAPHEMES: LazyLock<Vec<char>> = LazyLock::new(|| {
    (0..JONGSEONG_COUNT)
        .map(|i| jongseong_to_jamo_char(i).unwrap_or(NO_CODA))
        .collect()
});

// --- 로마자 음소 코드 (성인자유발화코퍼스 표기) ------------------------------

/// 초성 음소 코드 (`oh` = 소리 없는 ㅇ)
#[rustfmt::skip]
pub const ONSET_PHONES: [&str; 19] = [
    "k0", "kk", "nn", "t0", "tt", "rr", "mm", "p0", "pp", "s0",
    "ss", "oh", "c0", "cc", "ch", "kh", "th", "ph", "h0",
];

/// 중성 음소 코드
#[rustfmt::skip]
pub const NUCLEUS_PHONES: [&str; 21] = [
    "aa", "qq", "ya", "yq", "vv", "ee", "yv", "ye", "oo", "wa",
    "wq", "wo", "yo", "uu", "wv", "we", "wi", "yu", "xx", "xi", "ii",
];

/// 종성 음소 코드 (0번 = 종성 없음)
#[rustfmt::skip]
pub const CODA_PHONES: [&str; 28] = [
    "",   "kf", "kk", "ks", "nf", "nc", "nh", "tf",
    "ll", "lk", "lm", "lb", "ls", "lt", "lp", "lh",
    "mf", "pf", "ps", "s0", "ss", "oh", "c0", "ch",
    "kh", "th", "ph", "h0",
];

/// 소리 없는 ㅇ 표기
pub const ZERO_SOUND: &str = "oh";

/// 받침 ㅇ 의 실제 발음 (연구개 비음)
pub const VELAR_NASAL: &str = "ng";

/// 받침 대표음: ㄱ ㄴ ㄷ ㄹ ㅁ ㅂ ㅇ
pub const EFFECTIVE_CODAS: [&str; 7] = ["kf", "nf", "tf", "ll", "mf", "pf", "ng"];

// --- 출력 기호 ------------------------------------------------------------------

#[rustfmt::skip]
pub const ONSET_SYMBOLS: [&str; 19] = [
    "g", "gg", "n", "d", "dd", "l", "m", "b", "bb", "s",
    "ss", "", "j", "jj", "ch", "kh", "t", "p", "h",
];

#[rustfmt::skip]
pub const NUCLEUS_SYMBOLS: [&str; 21] = [
    "a", "ae", "ya", "yae", "eo", "e", "yeo", "ye", "o", "wa",
    "wae", "oe", "yo", "u", "wo", "we", "wi", "yu", "eu", "ui", "i",
];

/// 대표음이 아닌 종성은 빈 기호
#[rustfmt::skip]
pub const CODA_SYMBOLS: [&str; 28] = [
    "", "g2", "", "", "n2", "", "", "d2", "l2", "",
    "", "", "", "", "", "", "m2", "b2", "", "",
    "", "ng", "", "", "", "", "", "",
];

#[rustfmt::skip]
pub const ONSET_SYMBOLS_IPA: [&str; 19] = [
    "k", "k͈", "n", "t", "t͈", "ɾ", "m", "p", "p͈", "sʰ",
    "s͈", "", "t͡ɕ", "t͡ɕ͈", "t͡ɕʰ", "kʰ", "tʰ", "pʰ", "h",
];

#[rustfmt::skip]
pub const NUCLEUS_SYMBOLS_IPA: [&str; 21] = [
    "a", "ɛ", "ja̠", "jɛ̝", "ʌ̹", "e", "jʌ", "je", "o", "wa",
    "wɛ̝", "we", "jo", "u", "wʌ", "we", "y", "ju", "ɯ", "ɰi", "i",
];

#[rustfmt::skip]
pub const CODA_SYMBOLS_IPA: [&str; 28] = [
    "", "k̚", "", "", "n", "", "", "t̚", "ɭ", "",
    "", "", "", "", "", "", "m", "p̚", "", "",
    "", "ŋ", "", "", "", "", "", "",
];

// --- 조회 함수 ------------------------------------------------------------------

/// 위치별 자모 테이블
pub fn graphemes(position: Position) -> &'static [char] {
    match position {
        Position::Onset => CHOSEONG_GRAPHEMES.as_slice(),
        Position::Nucleus => JUNGSEONG_GRAPHEMES.as_slice(),
        Position::Coda => JONGSEONG_GRAPHEMES.as_slice(),
    }
}

/// 자모의 테이블 인덱스
pub fn grapheme_index(position: Position, grapheme: char) -> Option<usize> {
    graphemes(position).iter().position(|&g| g == grapheme)
}

/// 음소 코드의 테이블 인덱스 (종성 "없음" 항목은 매칭하지 않음)
pub fn phone_index(position: Position, phone: &str) -> Option<usize> {
    let table: &[&str] = match position {
        Position::Onset => &ONSET_PHONES[..],
        Position::Nucleus => &NUCLEUS_PHONES[..],
        Position::Coda => &CODA_PHONES[..],
    };
    if phone.is_empty() {
        return None;
    }
    table.iter().position(|&p| p == phone)
}

pub fn is_onset_phone(phone: &str) -> bool {
    phone_index(Position::Onset, phone).is_some()
}

pub fn is_coda_phone(phone: &str) -> bool {
    phone_index(Position::Coda, phone).is_some()
}

pub fn is_effective_coda(phone: &str) -> bool {
    EFFECTIVE_CODAS.contains(&phone)
}
