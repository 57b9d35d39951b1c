//! 한글 -> 로마자 음소열 변환
//!
//! 각 음절을 `-` + 초성 코드 + 중성 코드 (+ 종성 코드) 로 풀어 쓰고,
//! 공백은 어절 경계 `#` 로 표시합니다.
//! 한글 음절과 공백이 아닌 문자는 조용히 건너뜁니다.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::tables::{CODA_PHONES, NUCLEUS_PHONES, ONSET_PHONES};
use crate::core::unicode::{classify, decompose_syllable, CharClass};

/// 음절 경계 직후(또는 맨 앞)의 초성 ㅇ
static ZERO_ONSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^|-)oh").expect("초성 ㅇ 패턴"));

/// 경계/공백/끝 앞의 받침 ㅇ
static ZERO_CODA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"oh([-# ]|$)").expect("받침 ㅇ 패턴"));

/// 음절 경계 앞에 남은 비문자 잔여물
static RESIDUE_BEFORE_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\W+)-").expect("경계 잔여물 패턴"));

static TRAILING_RESIDUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\W+$").expect("끝 잔여물 패턴"));

/// 정리 전 음소열: 음절마다 `-` 와 초성/중성/종성 코드, 공백은 `#`
pub fn raw_phones(word: &str) -> String {
    let mut phones = String::with_capacity(word.len() * 3);

    for c in word.chars() {
        match classify(c) {
            CharClass::HangulSyllable => {
                let Ok((cho, jung, jong)) = decompose_syllable(c) else {
                    continue;
                };
                phones.push('-');
                phones.push_str(ONSET_PHONES[cho as usize]);
                phones.push_str(NUCLEUS_PHONES[jung as usize]);
                phones.push_str(CODA_PHONES[jong as usize]);
            }
            CharClass::Whitespace => phones.push('#'),
            CharClass::Other => {
                log::trace!("한글이 아닌 문자 건너뜀: {:?}", c);
            }
        }
    }

    phones
}

/// 초성 ㅇ 삭제 (소리 없음)
fn strip_zero_onset(phones: &str) -> String {
    ZERO_ONSET.replace_all(phones, "${1}").into_owned()
}

/// 받침 ㅇ 을 연구개 비음 `ng` 로 변환
fn velarize_zero_coda(phones: &str) -> String {
    ZERO_CODA.replace_all(phones, "ng${1}").into_owned()
}

/// 경계 앞 잔여물, 끝의 비문자, 맨 앞 경계 제거
fn strip_boundary_residue(phones: &str) -> String {
    let phones = RESIDUE_BEFORE_BOUNDARY.replace_all(phones, "${1}");
    let phones = TRAILING_RESIDUE.replace(&phones, "");
    phones.strip_prefix('-').unwrap_or(&*phones).to_string()
}

/// 한글 어절을 로마자 음소열로 변환
///
/// ```
/// use kog2p::core::romanizer::romanize;
/// assert_eq!(romanize("사람"), "s0aa-rraamf");
/// assert_eq!(romanize("강"), "k0aang");
/// ```
pub fn romanize(word: &str) -> String {
    let phones = raw_phones(word);
    let phones = strip_zero_onset(&phones);
    let phones = velarize_zero_coda(&phones);
    strip_boundary_residue(&phones)
}

/// 두 글자마다 `,` 를 붙여 음소 경계를 표시
///
/// `-` 와 `#` 는 다음 음소 앞에 한 글자로 남기고 공백은 버립니다.
pub fn add_phone_boundary(phones: &str) -> String {
    let chars: Vec<char> = phones.chars().collect();
    let mut out = String::with_capacity(phones.len() * 3 / 2 + 1);
    let mut pos = 0;

    while pos + 2 <= chars.len() {
        match chars[pos] {
            '-' | '#' => {
                out.push(chars[pos]);
                pos += 1;
            }
            ' ' => pos += 1,
            _ => {}
        }
        if pos + 2 > chars.len() {
            break;
        }
        out.push(chars[pos]);
        out.push(chars[pos + 1]);
        out.push(',');
        pos += 2;
    }

    out
}
